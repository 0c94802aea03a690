//! Scene background tone, driven by shop threshold crossings.

use serde::{Deserialize, Serialize};

use crate::config::StreetConfig;
use crate::shop::Crossing;

/// Which background the scene shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BackgroundTone {
    #[default]
    Exterior,
    Interior,
}

/// 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }

    pub fn to_hex(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Linear 0.0–1.0 channels, as most renderers want them.
    pub fn to_unit(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

/// Current background plus the two colours it switches between.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ambience {
    pub tone: BackgroundTone,
    interior: Rgb,
    exterior: Rgb,
}

impl Ambience {
    pub fn new(config: &StreetConfig) -> Self {
        Self {
            tone: BackgroundTone::Exterior,
            interior: Rgb::from_hex(config.interior_tone),
            exterior: Rgb::from_hex(config.exterior_tone),
        }
    }

    pub fn apply(&mut self, crossing: Crossing) {
        self.tone = match crossing {
            Crossing::Entered => BackgroundTone::Interior,
            Crossing::Exited => BackgroundTone::Exterior,
        };
    }

    pub fn background(&self) -> Rgb {
        match self.tone {
            BackgroundTone::Interior => self.interior,
            BackgroundTone::Exterior => self.exterior,
        }
    }
}

impl Default for Ambience {
    fn default() -> Self {
        Self::new(&StreetConfig::default())
    }
}
