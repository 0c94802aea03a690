//! Shops, their stock, and the per-shop inside/outside state machine.

use serde::{Deserialize, Serialize};

use crate::config::StreetConfig;
use crate::geometry::{AxisAlignedBounds, ShopFootprint, Size3, Vec3};
use crate::layout::{layout_shop, FrameSpec, ShopLayout};

/// A product shown on a placard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub name: String,
    /// Free text, shown as-is ("$29.99", "Happy Anniversary", ...).
    pub price: String,
    pub description: String,
    /// Path or URL of the product picture.
    pub image_url: String,
}

impl Item {
    pub fn new(name: &str, price: &str, description: &str, image_url: &str) -> Self {
        Self {
            name: name.to_string(),
            price: price.to_string(),
            description: description.to_string(),
            image_url: image_url.to_string(),
        }
    }
}

/// Stock shown by shops configured without any items, when
/// [`StreetConfig::placeholder_stock`] is on.
pub fn placeholder_items() -> Vec<Item> {
    vec![
        Item::new(
            "Silver Pendant",
            "$29.99",
            "Elegant silver pendant with crystal accent",
            "images/pendant.jpg",
        ),
        Item::new(
            "Gold Chain",
            "$49.99",
            "14K gold-plated chain, 18 inches",
            "images/chain.jpg",
        ),
        Item::new(
            "Pearl Earrings",
            "$35.99",
            "Freshwater pearl studs with silver backing",
            "images/earrings.jpg",
        ),
    ]
}

/// Static description of one shop, as read from the street catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopDescriptor {
    pub name: String,
    pub position: Vec3,
    pub size: Size3,
    /// Wall colour, 0xRRGGBB.
    #[serde(default = "default_colour")]
    pub colour: u32,
    #[serde(default)]
    pub items: Vec<Item>,
}

fn default_colour() -> u32 {
    0xCCCCCC
}

impl ShopDescriptor {
    pub fn footprint(&self) -> ShopFootprint {
        ShopFootprint {
            name: self.name.clone(),
            position: self.position,
            size: self.size,
        }
    }
}

/// Whether the player is inside a shop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Presence {
    #[default]
    Outside,
    Inside,
}

/// A change of [`Presence`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Crossing {
    Entered,
    Exited,
}

impl Presence {
    pub fn is_inside(self) -> bool {
        self == Presence::Inside
    }

    /// Move to the state implied by `entering`. Returns the crossing only
    /// when the state actually changes.
    pub fn cross(&mut self, entering: bool) -> Option<Crossing> {
        let next = if entering {
            Presence::Inside
        } else {
            Presence::Outside
        };
        if next == *self {
            return None;
        }
        *self = next;
        Some(match next {
            Presence::Inside => Crossing::Entered,
            Presence::Outside => Crossing::Exited,
        })
    }
}

/// A shop on the street. Position and size never change after
/// construction; only presence and visibility do.
#[derive(Debug, Clone)]
pub struct Shop {
    name: String,
    position: Vec3,
    size: Size3,
    colour: u32,
    items: Vec<Item>,
    layout: ShopLayout,
    pub presence: Presence,
    pub visible: bool,
}

impl Shop {
    /// Build a shop and hang its frames.
    pub fn new(descriptor: ShopDescriptor, config: &StreetConfig) -> Self {
        let ShopDescriptor {
            name,
            position,
            size,
            colour,
            mut items,
        } = descriptor;

        if items.is_empty() && config.placeholder_stock {
            items = placeholder_items();
        }

        let layout = layout_shop(&items, position, size, &FrameSpec::from_config(config));
        if layout.dropped > 0 {
            log::debug!(
                "Shop '{}': {} of {} items don't fit on the walls",
                name,
                layout.dropped,
                items.len()
            );
        }

        Self {
            name,
            position,
            size,
            colour,
            items,
            layout,
            presence: Presence::Outside,
            visible: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn size(&self) -> Size3 {
        self.size
    }

    pub fn colour(&self) -> u32 {
        self.colour
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn layout(&self) -> &ShopLayout {
        &self.layout
    }

    pub fn is_player_inside(&self) -> bool {
        self.presence.is_inside()
    }

    /// Z coordinate of the front (door) wall.
    pub fn front_z(&self) -> f32 {
        self.position.z + self.size.depth / 2.0
    }

    /// Collision footprint grown by `margin`.
    pub fn bounds(&self, margin: f32) -> AxisAlignedBounds {
        AxisAlignedBounds::expanded(self.position, self.size, margin)
    }

    /// Item shown by a placed frame.
    pub fn item_at(&self, frame: usize) -> Option<&Item> {
        self.layout
            .frames
            .get(frame)
            .and_then(|f| self.items.get(f.item))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Wall;

    fn descriptor(items: Vec<Item>) -> ShopDescriptor {
        ShopDescriptor {
            name: "Cup of Tea".to_string(),
            position: Vec3::new(25.0, 4.0, -20.0),
            size: Size3::new(10.0, 10.0, 15.0),
            colour: 0x215EEB,
            items,
        }
    }

    #[test]
    fn presence_flips_once() {
        let mut p = Presence::Outside;
        assert_eq!(p.cross(false), None);
        assert_eq!(p.cross(true), Some(Crossing::Entered));
        assert_eq!(p.cross(true), None);
        assert_eq!(p.cross(false), Some(Crossing::Exited));
        assert_eq!(p, Presence::Outside);
    }

    #[test]
    fn new_shop_is_outside_and_visible() {
        let shop = Shop::new(descriptor(placeholder_items()), &StreetConfig::default());
        assert!(!shop.is_player_inside());
        assert!(shop.visible);
        assert_eq!(shop.front_z(), -12.5);
    }

    #[test]
    fn empty_shop_stays_empty_by_default() {
        let shop = Shop::new(descriptor(Vec::new()), &StreetConfig::default());
        assert!(shop.items().is_empty());
        assert!(shop.layout().frames.is_empty());
    }

    #[test]
    fn placeholder_stock_fills_empty_shop() {
        let config = StreetConfig {
            placeholder_stock: true,
            ..StreetConfig::default()
        };
        let shop = Shop::new(descriptor(Vec::new()), &config);
        assert_eq!(shop.items().len(), 3);
        assert_eq!(shop.layout().frames.len(), 3);
        assert_eq!(shop.layout().frames[2].wall, Wall::Right);
        assert_eq!(shop.item_at(1).map(|i| i.name.as_str()), Some("Gold Chain"));
    }

    #[test]
    fn item_json_uses_camel_case() {
        let item: Item = serde_json::from_str(
            r#"{"name":"Mug","price":"$8","description":"Glass","imageUrl":"images/cup.jpg"}"#,
        )
        .unwrap();
        assert_eq!(item.image_url, "images/cup.jpg");
    }

    #[test]
    fn four_items_in_small_shop() {
        // 10×15: sides hold floor(15/5.8) = 2, back floor(10/5.8) = 1
        let items: Vec<Item> = (0..4)
            .map(|i| Item::new(&format!("item {i}"), "$1", "", ""))
            .collect();
        let shop = Shop::new(descriptor(items), &StreetConfig::default());
        let walls: Vec<Wall> = shop.layout().frames.iter().map(|f| f.wall).collect();
        // 4 * 2/5 = 1.6 -> 2, 4 * 1/5 = 0.8 -> 1: 5 of 4, back gives one up
        assert_eq!(walls, vec![Wall::Left, Wall::Left, Wall::Right, Wall::Right]);
    }
}
