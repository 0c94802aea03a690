//! Shop Street Headless Harness
//!
//! Validates the bundled street and the walkthrough logic without a
//! renderer. Runs entirely in-process: no window, no input devices.
//!
//! Usage:
//!   cargo run -p shopstreet-simtest
//!   cargo run -p shopstreet-simtest -- --verbose
//!
//! `RUST_LOG` overrides the log level as usual.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shopstreet_logic::ambience::BackgroundTone;
use shopstreet_logic::catalog::{build_street, parse_catalog};
use shopstreet_logic::collision::{hits_wall, in_door_zone, resolve, CollisionParams};
use shopstreet_logic::config::{validate_config, StreetConfig};
use shopstreet_logic::geometry::{Severity, Size3, Vec3};
use shopstreet_logic::layout::{allocate, reconcile_counts, wall_capacities, Wall};
use shopstreet_logic::shop::{Crossing, Presence, Shop, ShopDescriptor};
use shopstreet_logic::street::Street;
use tracing_subscriber::EnvFilter;

// ── Street catalog (same JSON a viewer loads) ───────────────────────────
const STREET_JSON: &str = include_str!("../../../data/street.json");

const NUM_SAMPLES: usize = 5000;
const SEED: u64 = 0x5409_57EE_7000_0001;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    init_logging(verbose);
    println!("=== Shop Street Harness ===\n");

    let mut results = Vec::new();

    // 1. Catalog and config validation
    let street = validate_catalog(&mut results);

    // 2. Wall allocation per shop
    if let Some(street) = &street {
        results.extend(report_allocation(street, verbose));
    }

    // 3. Scripted walk through a door
    if let Some(street) = street {
        results.extend(scripted_walk(street));
    }

    // 4. Collision property sweep
    results.extend(sweep_collision());

    // 5. Allocator property sweep
    results.extend(sweep_allocator());

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        "shopstreet_logic=debug"
    } else {
        "shopstreet_logic=info"
    };
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = level.parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

// ── 1. Catalog ──────────────────────────────────────────────────────────

fn validate_catalog(results: &mut Vec<TestResult>) -> Option<Street> {
    println!("--- Street Catalog ---");

    let config = StreetConfig::default();
    let config_errors = validate_config(&config);
    results.push(TestResult {
        name: "config_defaults_valid".into(),
        passed: config_errors.is_empty(),
        detail: if config_errors.is_empty() {
            "default tunables pass validation".into()
        } else {
            config_errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ")
        },
    });

    let descriptors = match parse_catalog(STREET_JSON) {
        Ok(d) => d,
        Err(e) => {
            results.push(TestResult {
                name: "catalog_parse".into(),
                passed: false,
                detail: e.to_string(),
            });
            return None;
        }
    };

    results.push(TestResult {
        name: "catalog_not_empty".into(),
        passed: !descriptors.is_empty(),
        detail: format!("{} shops loaded", descriptors.len()),
    });

    let missing_images: Vec<_> = descriptors
        .iter()
        .flat_map(|d| d.items.iter().map(move |i| (d.name.as_str(), i)))
        .filter(|(_, i)| i.image_url.is_empty())
        .collect();
    results.push(TestResult {
        name: "catalog_items_have_images".into(),
        passed: missing_images.is_empty(),
        detail: if missing_images.is_empty() {
            "every item has a picture".into()
        } else {
            format!("{} items without a picture", missing_images.len())
        },
    });

    let total_items: usize = descriptors.iter().map(|d| d.items.len()).sum();
    results.push(TestResult {
        name: "catalog_total_items".into(),
        passed: total_items > 0,
        detail: format!("{} items across the street", total_items),
    });

    match build_street(descriptors, config) {
        Ok(street) => {
            let warnings = street
                .validate()
                .iter()
                .filter(|v| v.severity == Severity::Warning)
                .count();
            results.push(TestResult {
                name: "street_layout_valid".into(),
                passed: true,
                detail: format!("no layout errors, {} warnings", warnings),
            });
            Some(street)
        }
        Err(e) => {
            results.push(TestResult {
                name: "street_layout_valid".into(),
                passed: false,
                detail: e.to_string(),
            });
            None
        }
    }
}

// ── 2. Wall allocation ──────────────────────────────────────────────────

fn report_allocation(street: &Street, verbose: bool) -> Vec<TestResult> {
    println!("--- Wall Allocation ---");
    let config = street.config();
    let mut results = Vec::new();

    for shop in street.shops() {
        let size = shop.size();
        let caps = wall_capacities(
            size.width,
            size.depth,
            config.frame_width,
            config.frame_spacing,
        );
        let layout = shop.layout();
        let per_wall = Wall::ALL.map(|w| layout.on_wall(w).count());
        let shown: usize = per_wall.iter().sum();

        if verbose {
            println!(
                "  {:<20} capacity {:?}  shown {:?}  dropped {}",
                shop.name(),
                caps,
                per_wall,
                layout.dropped
            );
        }

        results.push(TestResult {
            name: format!("alloc_conserves_{}", slug(shop.name())),
            passed: shown + layout.dropped == shop.items().len(),
            detail: format!(
                "{} shown + {} dropped of {} items",
                shown,
                layout.dropped,
                shop.items().len()
            ),
        });

        let total_capacity: u32 = caps.iter().sum();
        let small = shop.items().len() <= 3;
        results.push(TestResult {
            name: format!("alloc_within_capacity_{}", slug(shop.name())),
            passed: small || shown <= total_capacity as usize,
            detail: format!("{} frames, capacity {}", shown, total_capacity),
        });
    }

    results
}

fn slug(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect::<String>()
        .to_lowercase()
        .replace(' ', "_")
}

// ── 3. Scripted walk ────────────────────────────────────────────────────

/// Walk straight through the door of the shop nearest the street's
/// centre line and back out again.
fn scripted_walk(mut street: Street) -> Vec<TestResult> {
    println!("--- Scripted Walk ---");
    let mut results = Vec::new();

    let Some((index, shop)) = street
        .shops()
        .iter()
        .enumerate()
        .find(|(_, s)| s.position().z < 0.0 && s.position().x.abs() < 1.0)
    else {
        results.push(TestResult {
            name: "walk_target_shop".into(),
            passed: false,
            detail: "no shop on the centre line".into(),
        });
        return results;
    };
    let name = shop.name().to_string();
    let door_x = shop.position().x;
    let front_z = shop.front_z();
    let inside_z = shop.position().z;

    let outside_z = front_z + 8.0;
    let step = 0.25;
    let steps = ((outside_z - inside_z) / step).round() as usize;

    street.place_player(Vec3::new(door_x, 2.0, outside_z));
    let mut crossings = Vec::new();
    let mut blocked = 0;
    let path = (1..=steps)
        .map(|i| outside_z - step * i as f32)
        .chain((0..steps).rev().map(|i| outside_z - step * i as f32));
    let mut tone_inside = None;
    for (i, z) in path.enumerate() {
        let outcome = street.try_move(Vec3::new(door_x, 2.0, z));
        if !outcome.committed {
            blocked += 1;
        }
        crossings.extend(
            outcome
                .transitions
                .iter()
                .filter(|t| t.shop == index)
                .map(|t| t.crossing),
        );
        if i + 1 == steps {
            tone_inside = Some(street.ambience().tone);
        }
    }

    results.push(TestResult {
        name: "walk_door_never_blocks".into(),
        passed: blocked == 0,
        detail: format!("{} blocked steps walking through '{}'", blocked, name),
    });
    results.push(TestResult {
        name: "walk_enter_then_exit".into(),
        passed: crossings == [Crossing::Entered, Crossing::Exited],
        detail: format!("crossings {:?}", crossings),
    });
    results.push(TestResult {
        name: "walk_background_switches".into(),
        passed: tone_inside == Some(BackgroundTone::Interior)
            && street.ambience().tone == BackgroundTone::Exterior,
        detail: format!(
            "inside {:?}, after leaving {:?}",
            tone_inside,
            street.ambience().tone
        ),
    });

    results
}

// ── 4. Collision sweep ──────────────────────────────────────────────────

fn sweep_collision() -> Vec<TestResult> {
    println!("--- Collision Sweep ---");
    let config = StreetConfig::default();
    let params = CollisionParams::from_config(&config);
    let mut rng = StdRng::seed_from_u64(SEED);
    let mut results = Vec::new();

    let mut shop = Shop::new(
        ShopDescriptor {
            name: "sweep".to_string(),
            position: Vec3::new(0.0, 4.0, -30.0),
            size: Size3::new(20.0, 8.0, 25.0),
            colour: 0xCCCCCC,
            items: Vec::new(),
        },
        &config,
    );
    let bounds = shop.bounds(params.margin);

    let mut door_blocked = 0;
    let mut outside_blocked = 0;
    let mut band_mismatch = 0;
    let mut door_samples = 0;

    for _ in 0..NUM_SAMPLES {
        let p = Vec3::new(
            rng.gen_range(-20.0..20.0),
            2.0,
            rng.gen_range(-50.0..-10.0),
        );
        let presence = if rng.gen_bool(0.5) {
            Presence::Inside
        } else {
            Presence::Outside
        };
        shop.presence = presence;

        let door = in_door_zone(p, &shop, &params);
        let expect_band = presence.is_inside()
            && bounds.contains_strict(p.x, p.z)
            && bounds.near_any_edge(p.x, p.z, params.margin);
        let wall = hits_wall(p, &shop, &params);
        let resolution = resolve(p, &mut shop, &params);

        if door {
            door_samples += 1;
            if resolution.blocked {
                door_blocked += 1;
            }
            continue;
        }
        if !bounds.contains_strict(p.x, p.z) && resolution.blocked {
            outside_blocked += 1;
        }
        if presence.is_inside() && wall != expect_band {
            band_mismatch += 1;
        }
    }

    results.push(TestResult {
        name: "collision_door_zone_open".into(),
        passed: door_blocked == 0,
        detail: format!("{} of {} door samples blocked", door_blocked, door_samples),
    });
    results.push(TestResult {
        name: "collision_outside_bounds_open".into(),
        passed: outside_blocked == 0,
        detail: format!("{} samples outside the footprint blocked", outside_blocked),
    });
    results.push(TestResult {
        name: "collision_inside_wall_band".into(),
        passed: band_mismatch == 0,
        detail: format!("{} inside samples disagree with the wall band", band_mismatch),
    });

    results
}

// ── 5. Allocator sweep ──────────────────────────────────────────────────

fn sweep_allocator() -> Vec<TestResult> {
    println!("--- Allocator Sweep ---");
    let mut rng = StdRng::seed_from_u64(SEED + 1);
    let mut results = Vec::new();

    let mut unbalanced = 0;
    let mut lost_items = 0;
    for _ in 0..NUM_SAMPLES {
        let caps = [
            rng.gen_range(0..8u32),
            rng.gen_range(0..8u32),
            rng.gen_range(0..8u32),
        ];
        let total: u32 = caps.iter().sum();
        let target = rng.gen_range(0..=total);
        let counts = reconcile_counts(caps, target);
        if counts.iter().sum::<u32>() != target {
            unbalanced += 1;
        }

        let width = rng.gen_range(0.0..40.0);
        let depth = rng.gen_range(0.0..40.0);
        let items: Vec<usize> = (0..rng.gen_range(0..30)).collect();
        let assignment = allocate(&items, width, depth, 4.0, 1.8);
        if assignment.total_shown() + assignment.dropped != items.len() {
            lost_items += 1;
        }
    }

    results.push(TestResult {
        name: "alloc_counts_sum_to_target".into(),
        passed: unbalanced == 0,
        detail: format!("{} of {} samples off target", unbalanced, NUM_SAMPLES),
    });
    results.push(TestResult {
        name: "alloc_items_accounted".into(),
        passed: lost_items == 0,
        detail: format!("{} of {} samples lost items", lost_items, NUM_SAMPLES),
    });

    log::debug!("Allocator sweep done ({} samples)", NUM_SAMPLES);
    results
}
