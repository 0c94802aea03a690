//! The street session: shops in fixed order, the player, and the scene
//! background.
//!
//! Each tick the walker proposes a position, every shop is asked in order
//! whether it blocks, and the move is committed only if none does. The
//! first blocking shop ends the tick, so shops after it are not consulted
//! (and cannot fire threshold crossings) that tick.

use serde::Serialize;

use crate::ambience::Ambience;
use crate::collision::{resolve, CollisionParams};
use crate::config::StreetConfig;
use crate::geometry::{validate_all, ShopFootprint, ValidationError, Vec3};
use crate::movement::{MoveInput, WalkParams, Walker};
use crate::shop::{Crossing, Shop, ShopDescriptor};

/// A threshold crossing, tagged with the shop it happened at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transition {
    /// Index into [`Street::shops`].
    pub shop: usize,
    pub shop_name: String,
    pub crossing: Crossing,
}

/// Result of [`Street::try_move`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    pub committed: bool,
    /// First shop that refused the move.
    pub blocked_by: Option<usize>,
    /// Crossings in shop order. Recorded even when a later shop blocks.
    pub transitions: Vec<Transition>,
}

/// Result of [`Street::tick`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Frame took too long; nothing was simulated.
    Skipped,
    Stepped(MoveOutcome),
}

/// Shops plus the player walking among them.
#[derive(Debug, Clone)]
pub struct Street {
    shops: Vec<Shop>,
    config: StreetConfig,
    collision: CollisionParams,
    walk: WalkParams,
    ambience: Ambience,
    player: Walker,
}

impl Street {
    pub fn new(shops: Vec<Shop>, config: StreetConfig) -> Self {
        Self {
            collision: CollisionParams::from_config(&config),
            walk: WalkParams::from_config(&config),
            ambience: Ambience::new(&config),
            player: Walker::new(config.spawn),
            shops,
            config,
        }
    }

    /// Build every shop from its descriptor, hanging frames once.
    pub fn from_descriptors(descriptors: Vec<ShopDescriptor>, config: StreetConfig) -> Self {
        let shops: Vec<Shop> = descriptors
            .into_iter()
            .map(|d| Shop::new(d, &config))
            .collect();
        let frames: usize = shops.iter().map(|s| s.layout().frames.len()).sum();
        log::info!("Built street: {} shops, {} frames", shops.len(), frames);
        Self::new(shops, config)
    }

    pub fn shops(&self) -> &[Shop] {
        &self.shops
    }

    pub fn shop(&self, name: &str) -> Option<&Shop> {
        self.shops.iter().find(|s| s.name() == name)
    }

    pub fn config(&self) -> &StreetConfig {
        &self.config
    }

    pub fn player(&self) -> &Walker {
        &self.player
    }

    pub fn ambience(&self) -> &Ambience {
        &self.ambience
    }

    /// Teleport the player, bypassing collision. Shop presence is untouched.
    pub fn place_player(&mut self, position: Vec3) {
        self.player.position = position;
    }

    /// Shop the player is currently inside, if any.
    pub fn occupied_shop(&self) -> Option<&Shop> {
        self.shops.iter().find(|s| s.is_player_inside())
    }

    /// Check `next` against every shop in order and move the player there
    /// if nothing blocks.
    pub fn try_move(&mut self, next: Vec3) -> MoveOutcome {
        let mut outcome = MoveOutcome::default();

        for (index, shop) in self.shops.iter_mut().enumerate() {
            let resolution = resolve(next, shop, &self.collision);
            if let Some(crossing) = resolution.crossing {
                self.ambience.apply(crossing);
                outcome.transitions.push(Transition {
                    shop: index,
                    shop_name: shop.name().to_string(),
                    crossing,
                });
            }
            if resolution.blocked {
                log::debug!(
                    "Move to ({:.2}, {:.2}) blocked by '{}'",
                    next.x,
                    next.z,
                    shop.name()
                );
                outcome.blocked_by = Some(index);
                return outcome;
            }
        }

        self.player.position.x = next.x;
        self.player.position.z = next.z;
        outcome.committed = true;
        outcome
    }

    /// Advance one frame: walk, collide, fall, then cull distant shops.
    /// `facing` is the camera look direction, `elapsed` the seconds since
    /// the previous frame.
    pub fn tick(&mut self, input: &MoveInput, facing: Vec3, elapsed: f32) -> TickOutcome {
        if elapsed > self.config.max_frame_delta {
            return TickOutcome::Skipped;
        }
        let delta = elapsed.max(0.0);

        if input.jump {
            self.player.try_jump(&self.walk);
        }

        let next = self.player.propose(input, facing, delta, &self.walk);
        let outcome = self.try_move(next);
        self.player.update_vertical(delta, &self.walk);
        self.update_visibility(self.player.position);

        TickOutcome::Stepped(outcome)
    }

    /// Hide shops further than the cull distance from `camera`. Returns how
    /// many remain visible.
    pub fn update_visibility(&mut self, camera: Vec3) -> usize {
        let limit = self.config.cull_distance;
        let mut visible = 0;
        for shop in &mut self.shops {
            shop.visible = camera.distance(&shop.position()) <= limit;
            if shop.visible {
                visible += 1;
            }
        }
        visible
    }

    /// Layout problems with this street's shops.
    pub fn validate(&self) -> Vec<ValidationError> {
        let footprints: Vec<ShopFootprint> = self
            .shops
            .iter()
            .map(|s| ShopFootprint {
                name: s.name().to_string(),
                position: s.position(),
                size: s.size(),
            })
            .collect();
        validate_all(
            &footprints,
            self.config.door_width,
            self.config.collision_margin,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ambience::BackgroundTone;
    use crate::geometry::Size3;

    fn descriptor(name: &str, x: f32, z: f32) -> ShopDescriptor {
        ShopDescriptor {
            name: name.to_string(),
            position: Vec3::new(x, 4.0, z),
            size: Size3::new(20.0, 8.0, 25.0),
            colour: 0xCCCCCC,
            items: Vec::new(),
        }
    }

    fn two_shops() -> Street {
        Street::from_descriptors(
            vec![descriptor("west", -30.0, -40.0), descriptor("mid", 0.0, -30.0)],
            StreetConfig::default(),
        )
    }

    #[test]
    fn spawns_at_configured_point() {
        let street = two_shops();
        assert_eq!(street.player().position, Vec3::new(0.0, 2.0, 180.0));
        assert_eq!(street.ambience().tone, BackgroundTone::Exterior);
    }

    #[test]
    fn open_street_commits() {
        let mut street = two_shops();
        let outcome = street.try_move(Vec3::new(0.0, 2.0, 10.0));
        assert!(outcome.committed);
        assert_eq!(street.player().position.z, 10.0);
    }

    #[test]
    fn blocked_move_keeps_position() {
        let mut street = two_shops();
        street.place_player(Vec3::new(15.0, 2.0, -30.0));
        let outcome = street.try_move(Vec3::new(11.0, 2.0, -30.0));
        assert!(!outcome.committed);
        assert_eq!(outcome.blocked_by, Some(1));
        assert_eq!(street.player().position.x, 15.0);
    }

    #[test]
    fn entering_switches_background() {
        let mut street = two_shops();
        street.place_player(Vec3::new(0.0, 2.0, -16.0));
        let outcome = street.try_move(Vec3::new(0.0, 2.0, -17.6));
        assert!(outcome.committed);
        assert_eq!(
            outcome.transitions,
            vec![Transition {
                shop: 1,
                shop_name: "mid".to_string(),
                crossing: Crossing::Entered,
            }]
        );
        assert_eq!(street.ambience().background().to_hex(), 0x333333);
        assert_eq!(street.occupied_shop().map(|s| s.name()), Some("mid"));
    }

    #[test]
    fn first_block_short_circuits() {
        // Two copies of the same shop: the first blocks, the second is never asked
        let mut street = Street::from_descriptors(
            vec![descriptor("a", 0.0, -30.0), descriptor("b", 0.0, -30.0)],
            StreetConfig::default(),
        );
        street.place_player(Vec3::new(0.0, 2.0, -30.0));
        let outcome = street.try_move(Vec3::new(5.0, 2.0, -30.0));
        assert_eq!(outcome.blocked_by, Some(0));
        assert!(outcome.transitions.is_empty());
    }

    #[test]
    fn slow_frames_are_skipped() {
        let mut street = two_shops();
        let input = MoveInput {
            forward: true,
            ..MoveInput::default()
        };
        let before = street.player().position;
        let outcome = street.tick(&input, Vec3::new(0.0, 0.0, -1.0), 0.5);
        assert_eq!(outcome, TickOutcome::Skipped);
        assert_eq!(street.player().position, before);
    }

    #[test]
    fn tick_walks_forward() {
        let mut street = two_shops();
        let input = MoveInput {
            forward: true,
            ..MoveInput::default()
        };
        for _ in 0..10 {
            street.tick(&input, Vec3::new(0.0, 0.0, -1.0), 1.0 / 60.0);
        }
        assert!(street.player().position.z < 180.0);
    }

    #[test]
    fn visibility_uses_cull_distance() {
        let mut street = two_shops();
        // From (0, 4, 70): "mid" at distance 100, "west" further
        let visible = street.update_visibility(Vec3::new(0.0, 4.0, 70.0));
        assert_eq!(visible, 1);
        assert!(street.shop("mid").is_some_and(|s| s.visible));
        assert!(street.shop("west").is_some_and(|s| !s.visible));
    }

    #[test]
    fn validate_clean_street() {
        assert!(two_shops().validate().is_empty());
    }
}
