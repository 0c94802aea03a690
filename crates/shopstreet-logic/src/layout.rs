//! Wall layout: splitting a shop's items across its three display walls.
//!
//! Algorithm:
//! 1. Three items or fewer: one per wall in the order left, back, right.
//! 2. Otherwise each wall holds `floor(length / (frame_width + spacing))`
//!    frames, where left/right run along the depth and back along the width.
//! 3. Items beyond the total capacity are dropped.
//! 4. The shown items are shared out in proportion to capacity, each share
//!    rounded on its own, then the rounding drift is reconciled.
//! 5. Items are sliced contiguously: left run, back run, right run.
//! 6. Each run is centred on its wall and stepped at `frame_width + spacing`.
//!
//! A shop too small for its stock shows a prefix of it; frames never
//! overlap.

use std::f32::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};

use crate::config::StreetConfig;
use crate::geometry::{Size3, Vec3};

/// One of the three interior display walls. The front wall holds the door
/// and never carries frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Wall {
    Left,
    Back,
    Right,
}

impl Wall {
    /// Fill order; also the tie-break priority during reconciliation.
    pub const ALL: [Wall; 3] = [Wall::Left, Wall::Back, Wall::Right];

    pub fn index(self) -> usize {
        match self {
            Wall::Left => 0,
            Wall::Back => 1,
            Wall::Right => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Wall::Left => "left",
            Wall::Back => "back",
            Wall::Right => "right",
        }
    }

    /// Yaw that turns a frame's face towards the shop interior.
    pub fn rotation_y(self) -> f32 {
        match self {
            Wall::Left => FRAC_PI_2,
            Wall::Back => 0.0,
            Wall::Right => -FRAC_PI_2,
        }
    }

    /// Length of the wall for a shop of the given size.
    pub fn length(self, width: f32, depth: f32) -> f32 {
        match self {
            Wall::Left | Wall::Right => depth,
            Wall::Back => width,
        }
    }
}

/// Frame dimensions and hanging offsets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSpec {
    pub width: f32,
    pub height: f32,
    pub spacing: f32,
    pub wall_offset: f32,
    pub inset: f32,
    pub eye_level_drop: f32,
}

impl FrameSpec {
    pub fn from_config(config: &StreetConfig) -> Self {
        Self {
            width: config.frame_width,
            height: config.frame_height,
            spacing: config.frame_spacing,
            wall_offset: config.wall_offset,
            inset: config.frame_inset,
            eye_level_drop: config.eye_level_drop,
        }
    }

    /// Distance between the centres of neighbouring frames.
    pub fn step(&self) -> f32 {
        self.width + self.spacing
    }
}

impl Default for FrameSpec {
    fn default() -> Self {
        Self::from_config(&StreetConfig::default())
    }
}

/// Per-wall capacity ceiling; three full walls still sum within `u32`.
const MAX_WALL_CAPACITY: u32 = u32::MAX / 3;

/// Slack for lengths that are whole multiples of the slot but land just
/// under it in binary (17.4 / 5.8 comes out as 2.9999998).
const SLOT_EPSILON: f64 = 1e-4;

/// Number of frames each wall can hold, indexed by [`Wall::index`].
pub fn wall_capacities(width: f32, depth: f32, frame_width: f32, frame_spacing: f32) -> [u32; 3] {
    let slot = frame_width as f64 + frame_spacing as f64;
    if !(slot > 0.0) {
        return [0; 3];
    }
    Wall::ALL.map(|w| {
        let slots = (w.length(width, depth) as f64 / slot + SLOT_EPSILON).floor();
        // `as` saturates: negative lengths give 0
        (slots as u32).min(MAX_WALL_CAPACITY)
    })
}

/// Walls ordered by capacity, stable on [`Wall::ALL`] priority.
fn walls_by_capacity(capacities: [u32; 3], descending: bool) -> [Wall; 3] {
    let mut order = Wall::ALL;
    if descending {
        order.sort_by(|a, b| capacities[b.index()].cmp(&capacities[a.index()]));
    } else {
        order.sort_by_key(|w| capacities[w.index()]);
    }
    order
}

/// Share `target` items across the walls in proportion to `capacities`.
///
/// Each share is rounded half-up on its own. A shortfall goes entirely to
/// the wall with the largest capacity; an excess comes off the wall with
/// the smallest capacity. Ties resolve left, then back, then right. When
/// the smallest wall holds fewer items than the excess (a zero-capacity back
/// wall with an odd target), the rest comes off the next-smallest wall, so
/// the result always sums to `target` as long as some wall has capacity.
pub fn reconcile_counts(capacities: [u32; 3], target: u32) -> [u32; 3] {
    let total: u64 = capacities.iter().map(|&c| u64::from(c)).sum();
    if total == 0 || target == 0 {
        return [0; 3];
    }

    let mut counts =
        capacities.map(|c| (target as f64 * (c as f64 / total as f64)).round() as u32);
    let allocated: u64 = counts.iter().map(|&c| u64::from(c)).sum();
    let target_wide = u64::from(target);

    if allocated < target_wide {
        let largest = walls_by_capacity(capacities, true)[0];
        counts[largest.index()] += (target_wide - allocated) as u32;
    } else if allocated > target_wide {
        let mut excess = allocated - target_wide;
        for wall in walls_by_capacity(capacities, false) {
            let take = excess.min(u64::from(counts[wall.index()]));
            counts[wall.index()] -= take as u32;
            excess -= take;
            if excess == 0 {
                break;
            }
        }
    }

    counts
}

/// Items assigned to each wall, as contiguous runs of the input.
#[derive(Debug, Clone, PartialEq)]
pub struct WallAssignment<'a, T> {
    runs: [&'a [T]; 3],
    /// Items that didn't fit on any wall.
    pub dropped: usize,
}

impl<'a, T> WallAssignment<'a, T> {
    /// Items on `wall`, possibly empty.
    pub fn get(&self, wall: Wall) -> &'a [T] {
        self.runs[wall.index()]
    }

    pub fn count(&self, wall: Wall) -> usize {
        self.runs[wall.index()].len()
    }

    /// Walls that received at least one item, in fill order.
    pub fn walls(&self) -> impl Iterator<Item = (Wall, &'a [T])> + '_ {
        Wall::ALL
            .into_iter()
            .map(move |w| (w, self.runs[w.index()]))
            .filter(|(_, run)| !run.is_empty())
    }

    pub fn total_shown(&self) -> usize {
        self.runs.iter().map(|r| r.len()).sum()
    }
}

/// Split `items` across the left, back and right walls.
pub fn allocate<T>(
    items: &[T],
    shop_width: f32,
    shop_depth: f32,
    frame_width: f32,
    frame_spacing: f32,
) -> WallAssignment<'_, T> {
    if items.len() <= 3 {
        let mut runs: [&[T]; 3] = [&[], &[], &[]];
        for (i, run) in runs.iter_mut().enumerate().take(items.len()) {
            *run = &items[i..i + 1];
        }
        return WallAssignment { runs, dropped: 0 };
    }

    let capacities = wall_capacities(shop_width, shop_depth, frame_width, frame_spacing);
    let total_capacity: u64 = capacities.iter().map(|&c| u64::from(c)).sum();
    let items_to_show = (items.len() as u64).min(total_capacity) as usize;
    let counts = reconcile_counts(capacities, items_to_show as u32);

    let mut runs: [&[T]; 3] = [&[], &[], &[]];
    let mut start = 0;
    for wall in Wall::ALL {
        let end = start + counts[wall.index()] as usize;
        runs[wall.index()] = &items[start..end];
        start = end;
    }

    WallAssignment {
        runs,
        dropped: items.len() - start,
    }
}

/// Position and yaw of one frame in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub position: Vec3,
    pub rotation_y: f32,
}

/// Placements for `count` frames hung on `wall` of a shop centred at
/// `center`. Side walls run from the front (+Z) towards the back; the back
/// wall runs left to right.
pub fn wall_placements(
    wall: Wall,
    count: usize,
    center: Vec3,
    size: Size3,
    frame: &FrameSpec,
) -> Vec<Placement> {
    if count == 0 {
        return Vec::new();
    }

    let span = count as f32 * frame.width + (count - 1) as f32 * frame.spacing;
    let y = center.y - frame.eye_level_drop;
    let inward = frame.wall_offset + frame.inset;
    let rotation_y = wall.rotation_y();

    (0..count)
        .map(|i| {
            let along = i as f32 * frame.step();
            let position = match wall {
                Wall::Left => Vec3::new(
                    center.x - size.width / 2.0 + inward,
                    y,
                    center.z + span / 2.0 - frame.width / 2.0 - along,
                ),
                Wall::Right => Vec3::new(
                    center.x + size.width / 2.0 - inward,
                    y,
                    center.z + span / 2.0 - frame.width / 2.0 - along,
                ),
                Wall::Back => Vec3::new(
                    center.x - span / 2.0 + frame.width / 2.0 + along,
                    y,
                    center.z - size.depth / 2.0 + inward,
                ),
            };
            Placement {
                position,
                rotation_y,
            }
        })
        .collect()
}

/// A placed frame and the item it shows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FramePlacement {
    pub wall: Wall,
    /// Position of the frame within its wall's run.
    pub slot: usize,
    /// Index into the shop's item list.
    pub item: usize,
    pub placement: Placement,
}

/// Every frame of a shop, plus how many items didn't fit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShopLayout {
    pub frames: Vec<FramePlacement>,
    pub dropped: usize,
}

impl ShopLayout {
    pub fn on_wall(&self, wall: Wall) -> impl Iterator<Item = &FramePlacement> + '_ {
        self.frames.iter().filter(move |f| f.wall == wall)
    }
}

/// Allocate `items` to walls and place a frame for each shown item.
pub fn layout_shop<T>(items: &[T], center: Vec3, size: Size3, frame: &FrameSpec) -> ShopLayout {
    let assignment = allocate(items, size.width, size.depth, frame.width, frame.spacing);

    let mut frames = Vec::with_capacity(assignment.total_shown());
    let mut first_item = 0;
    for wall in Wall::ALL {
        let count = assignment.count(wall);
        for (slot, placement) in wall_placements(wall, count, center, size, frame)
            .into_iter()
            .enumerate()
        {
            frames.push(FramePlacement {
                wall,
                slot,
                item: first_item + slot,
                placement,
            });
        }
        first_item += count;
    }

    ShopLayout {
        frames,
        dropped: assignment.dropped,
    }
}

/// A rectangular panel on the face of a frame, offset from the frame centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelRect {
    pub width: f32,
    pub height: f32,
    pub offset_y: f32,
    pub offset_z: f32,
}

/// Local geometry of one frame: the board plus the image and info panels
/// mounted on its face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FramePanels {
    pub board_width: f32,
    pub board_height: f32,
    pub board_thickness: f32,
    pub image: PanelRect,
    pub info: PanelRect,
}

impl FramePanels {
    pub fn for_frame(frame: &FrameSpec) -> Self {
        let face = 0.15;
        Self {
            board_width: frame.width,
            board_height: frame.height,
            board_thickness: 0.1,
            image: PanelRect {
                width: frame.width * 0.95,
                height: frame.height * 0.75,
                offset_y: frame.height * 0.10,
                offset_z: face,
            },
            info: PanelRect {
                width: frame.width * 0.95,
                height: frame.height * 0.22,
                offset_y: -frame.height * 0.39,
                offset_z: face,
            },
        }
    }
}
