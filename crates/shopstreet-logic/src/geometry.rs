//! Vectors, shop footprints, and street layout validation.
//!
//! Pure functions over plain structs. The street is laid out on the X/Z
//! ground plane with +Y up; a shop's door always sits on its +Z face.

use serde::{Deserialize, Serialize};

/// 3D position vector
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };
    pub const UP: Self = Self { x: 0.0, y: 1.0, z: 0.0 };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn distance_squared(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    pub fn distance(&self, other: &Self) -> f32 {
        self.distance_squared(other).sqrt()
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > 0.0 {
            Self {
                x: self.x / len,
                y: self.y / len,
                z: self.z / len,
            }
        } else {
            Self::ZERO
        }
    }

    pub fn cross(&self, other: &Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Same vector with the vertical component dropped.
    pub fn flattened(&self) -> Self {
        Self {
            x: self.x,
            y: 0.0,
            z: self.z,
        }
    }
}

impl std::ops::Add for Vec3 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl std::ops::Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

/// Outer dimensions of a shop box.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Size3 {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl Size3 {
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }
}

/// Horizontal footprint of a box (min/max on X and Z).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisAlignedBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl AxisAlignedBounds {
    /// Footprint of a box centred on `center`, grown by `margin` on all four
    /// horizontal sides.
    pub fn expanded(center: Vec3, size: Size3, margin: f32) -> Self {
        let half_w = size.width / 2.0;
        let half_d = size.depth / 2.0;
        Self {
            min_x: center.x - half_w - margin,
            max_x: center.x + half_w + margin,
            min_z: center.z - half_d - margin,
            max_z: center.z + half_d + margin,
        }
    }

    /// Strict containment on X and Z; points on an edge are outside.
    pub fn contains_strict(&self, x: f32, z: f32) -> bool {
        x > self.min_x && x < self.max_x && z > self.min_z && z < self.max_z
    }

    /// True if the point lies within `distance` of any of the four edge lines.
    pub fn near_any_edge(&self, x: f32, z: f32, distance: f32) -> bool {
        (x - self.min_x).abs() < distance
            || (x - self.max_x).abs() < distance
            || (z - self.min_z).abs() < distance
            || (z - self.max_z).abs() < distance
    }

    pub fn overlaps(&self, other: &Self) -> bool {
        self.min_x < other.max_x
            && other.min_x < self.max_x
            && self.min_z < other.max_z
            && other.min_z < self.max_z
    }
}

/// Minimal shop data needed for layout validation.
#[derive(Debug, Clone)]
pub struct ShopFootprint {
    pub name: String,
    pub position: Vec3,
    pub size: Size3,
}

/// A street validation finding.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub category: &'static str,
    pub severity: Severity,
    pub message: String,
}

/// Error severity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Severity {
    Error,
    Warning,
}

/// Check that no shop has zero or negative dimensions.
pub fn check_shop_dimensions(shops: &[ShopFootprint]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for s in shops {
        let Size3 {
            width,
            height,
            depth,
        } = s.size;
        if width <= 0.0 || height <= 0.0 || depth <= 0.0 {
            errors.push(ValidationError {
                category: "shop_geometry",
                severity: Severity::Error,
                message: format!(
                    "Shop '{}' has non-positive dimensions: {}×{}×{}",
                    s.name, width, height, depth
                ),
            });
        }
    }
    errors
}

/// Check that the door opening leaves some front wall on both sides.
pub fn check_door_fits(shops: &[ShopFootprint], door_width: f32) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for s in shops {
        if s.size.width <= 0.0 {
            continue; // caught by dimension check
        }
        let segment = (s.size.width - door_width) / 2.0;
        if segment <= 0.0 {
            errors.push(ValidationError {
                category: "shop_geometry",
                severity: Severity::Warning,
                message: format!(
                    "Shop '{}' is {} wide, door of {} leaves no front wall",
                    s.name, s.size.width, door_width
                ),
            });
        }
    }
    errors
}

/// Pairwise check that collision footprints (shop box plus margin) don't
/// overlap. Overlapping footprints make the gap between two shops impassable.
pub fn check_shop_overlaps(shops: &[ShopFootprint], margin: f32) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let bounds: Vec<AxisAlignedBounds> = shops
        .iter()
        .map(|s| AxisAlignedBounds::expanded(s.position, s.size, margin))
        .collect();

    for i in 0..shops.len() {
        for j in (i + 1)..shops.len() {
            if !bounds[i].overlaps(&bounds[j]) {
                continue;
            }
            // Overlapping walls are an error, overlapping margins only a warning
            let solid = AxisAlignedBounds::expanded(shops[i].position, shops[i].size, 0.0)
                .overlaps(&AxisAlignedBounds::expanded(
                    shops[j].position,
                    shops[j].size,
                    0.0,
                ));
            errors.push(ValidationError {
                category: "shop_overlap",
                severity: if solid {
                    Severity::Error
                } else {
                    Severity::Warning
                },
                message: format!(
                    "Shops '{}' and '{}' {}",
                    shops[i].name,
                    shops[j].name,
                    if solid {
                        "overlap"
                    } else {
                        "are closer than the collision margin"
                    }
                ),
            });
        }
    }
    errors
}

/// Run all street validations and return combined results.
pub fn validate_all(
    shops: &[ShopFootprint],
    door_width: f32,
    margin: f32,
) -> Vec<ValidationError> {
    let mut all = Vec::new();
    all.extend(check_shop_dimensions(shops));
    all.extend(check_door_fits(shops, door_width));
    all.extend(check_shop_overlaps(shops, margin));
    all
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_shop(name: &str, x: f32, z: f32, w: f32, d: f32) -> ShopFootprint {
        ShopFootprint {
            name: name.to_string(),
            position: Vec3::new(x, 4.0, z),
            size: Size3::new(w, 8.0, d),
        }
    }

    #[test]
    fn test_cross_right_vector() {
        // Looking down -Z, right is +X
        let forward = Vec3::new(0.0, 0.0, -1.0);
        let right = forward.cross(&Vec3::UP);
        assert!((right.x - 1.0).abs() < 1e-6);
        assert!(right.y.abs() < 1e-6);
        assert!(right.z.abs() < 1e-6);
    }

    #[test]
    fn test_normalize_zero_is_zero() {
        assert_eq!(Vec3::ZERO.normalize(), Vec3::ZERO);
    }

    #[test]
    fn test_expanded_bounds() {
        let b = AxisAlignedBounds::expanded(
            Vec3::new(0.0, 4.0, -30.0),
            Size3::new(20.0, 8.0, 25.0),
            2.0,
        );
        assert_eq!(b.min_x, -12.0);
        assert_eq!(b.max_x, 12.0);
        assert_eq!(b.min_z, -44.5);
        assert_eq!(b.max_z, -15.5);
    }

    #[test]
    fn test_contains_is_strict() {
        let b = AxisAlignedBounds::expanded(Vec3::ZERO, Size3::new(10.0, 1.0, 10.0), 0.0);
        assert!(b.contains_strict(0.0, 0.0));
        assert!(!b.contains_strict(5.0, 0.0));
        assert!(!b.contains_strict(0.0, -5.0));
    }

    #[test]
    fn test_valid_street_no_errors() {
        let shops = vec![
            make_shop("a", -30.0, -40.0, 20.0, 25.0),
            make_shop("b", 0.0, -30.0, 20.0, 25.0),
        ];
        assert!(check_shop_dimensions(&shops).is_empty());
        assert!(check_door_fits(&shops, 3.0).is_empty());
    }

    #[test]
    fn test_zero_depth_shop() {
        let shops = vec![make_shop("flat", 0.0, 0.0, 10.0, 0.0)];
        let errs = check_shop_dimensions(&shops);
        assert_eq!(errs.len(), 1);
        assert!(errs[0].message.contains("non-positive"));
    }

    #[test]
    fn test_door_wider_than_shop() {
        let shops = vec![make_shop("kiosk", 0.0, 0.0, 2.5, 10.0)];
        let errs = check_door_fits(&shops, 3.0);
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].severity, Severity::Warning);
    }

    #[test]
    fn test_overlapping_shops() {
        let shops = vec![
            make_shop("a", 0.0, 0.0, 10.0, 10.0),
            make_shop("b", 5.0, 5.0, 10.0, 10.0),
        ];
        let errs = check_shop_overlaps(&shops, 2.0);
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].severity, Severity::Error);
    }

    #[test]
    fn test_margins_touching_is_warning() {
        // Walls 3 apart, margins of 2 on each side overlap
        let shops = vec![
            make_shop("a", 0.0, 0.0, 10.0, 10.0),
            make_shop("b", 13.0, 0.0, 10.0, 10.0),
        ];
        let errs = check_shop_overlaps(&shops, 2.0);
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].severity, Severity::Warning);
    }

    #[test]
    fn test_validate_all_clean() {
        let shops = vec![
            make_shop("a", -30.0, -40.0, 20.0, 25.0),
            make_shop("c", 25.0, -20.0, 10.0, 15.0),
        ];
        let errs = validate_all(&shops, 3.0, 2.0);
        assert!(errs.is_empty(), "Expected no errors, got: {:?}", errs);
    }
}
