//! Shop collision and threshold tracking.
//!
//! Per tick, [`resolve`] is asked once per shop whether the player's next
//! position is allowed:
//! 1. Grow the shop footprint by the collision margin.
//! 2. In the door zone, update inside/outside from the side of the front
//!    wall the player is on, and never block.
//! 3. Inside a shop, block only near one of the (grown) walls.
//! 4. Outside, block anywhere within the grown footprint.
//!
//! The door zone is an X band of `door_width` around the shop centre,
//! crossed with a Z band of `margin` either side of the front wall. The
//! X band is open on both ends, the Z band likewise.

use crate::config::StreetConfig;
use crate::geometry::Vec3;
use crate::shop::{Crossing, Shop};

/// Collision tunables used by [`resolve`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionParams {
    /// Distance the player keeps from walls.
    pub margin: f32,
    pub door_width: f32,
}

impl CollisionParams {
    pub fn from_config(config: &StreetConfig) -> Self {
        Self {
            margin: config.collision_margin,
            door_width: config.door_width,
        }
    }
}

impl Default for CollisionParams {
    fn default() -> Self {
        Self::from_config(&StreetConfig::default())
    }
}

/// Outcome of checking one shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub blocked: bool,
    /// Set when this check moved the player across the shop's threshold.
    pub crossing: Option<Crossing>,
}

impl Resolution {
    const FREE: Self = Self {
        blocked: false,
        crossing: None,
    };
    const BLOCKED: Self = Self {
        blocked: true,
        crossing: None,
    };
}

/// Is `position` in the doorway of `shop`?
pub fn in_door_zone(position: Vec3, shop: &Shop, params: &CollisionParams) -> bool {
    let center_x = shop.position().x;
    let half_door = params.door_width / 2.0;
    position.x > center_x - half_door
        && position.x < center_x + half_door
        && (position.z - shop.front_z()).abs() < params.margin
}

/// Would standing at `position` put the player through a wall of `shop`?
/// Doesn't look at the door zone or change any state.
pub fn hits_wall(position: Vec3, shop: &Shop, params: &CollisionParams) -> bool {
    let bounds = shop.bounds(params.margin);
    let inside_bounds = bounds.contains_strict(position.x, position.z);
    if shop.is_player_inside() {
        // Open floor inside a shop is walkable, only the band along the walls isn't
        inside_bounds && bounds.near_any_edge(position.x, position.z, params.margin)
    } else {
        inside_bounds
    }
}

/// Decide whether the player may move to `position` with respect to
/// `shop`, flipping the shop's presence when the doorway is crossed.
pub fn resolve(position: Vec3, shop: &mut Shop, params: &CollisionParams) -> Resolution {
    if in_door_zone(position, shop, params) {
        let entering = position.z < shop.front_z();
        let crossing = shop.presence.cross(entering);
        if let Some(c) = crossing {
            log::debug!(
                "{:?} '{}' at ({:.2}, {:.2})",
                c,
                shop.name(),
                position.x,
                position.z
            );
        }
        return Resolution {
            blocked: false,
            crossing,
        };
    }

    if hits_wall(position, shop, params) {
        Resolution::BLOCKED
    } else {
        Resolution::FREE
    }
}
