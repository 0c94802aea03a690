//! Street catalog: the JSON list of shop descriptors a street is built from.
//!
//! The format is a top-level array; each entry looks like
//!
//! ```json
//! {
//!   "name": "Cup of Tea",
//!   "position": { "x": 25, "y": 4, "z": -20 },
//!   "size": { "width": 10, "height": 10, "depth": 15 },
//!   "colour": 2186987,
//!   "items": [
//!     { "name": "Glass Keep Cup", "price": "$100",
//!       "description": "...", "imageUrl": "images/cup.jpg" }
//!   ]
//! }
//! ```
//!
//! `colour` and `items` are optional.

use std::io;
use std::path::Path;

use crate::config::StreetConfig;
use crate::geometry::{validate_all, Severity, ShopFootprint};
use crate::shop::ShopDescriptor;
use crate::street::Street;

/// Errors that can occur while loading a catalog
#[derive(Debug)]
pub enum CatalogError {
    Io(io::Error),
    Json(serde_json::Error),
    /// The catalog parsed but describes an unusable street.
    Invalid(Vec<String>),
}

impl From<io::Error> for CatalogError {
    fn from(e: io::Error) -> Self {
        CatalogError::Io(e)
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Json(e)
    }
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Io(e) => write!(f, "IO error: {}", e),
            CatalogError::Json(e) => write!(f, "Catalog parse error: {}", e),
            CatalogError::Invalid(problems) => {
                write!(f, "Invalid street: {}", problems.join("; "))
            }
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Io(e) => Some(e),
            CatalogError::Json(e) => Some(e),
            CatalogError::Invalid(_) => None,
        }
    }
}

/// Parse a catalog from JSON text.
pub fn parse_catalog(json: &str) -> Result<Vec<ShopDescriptor>, CatalogError> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse a catalog file.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Vec<ShopDescriptor>, CatalogError> {
    let text = std::fs::read_to_string(path)?;
    parse_catalog(&text)
}

/// Validate descriptors and build the street. Warnings are logged, errors
/// reject the whole catalog.
pub fn build_street(
    descriptors: Vec<ShopDescriptor>,
    config: StreetConfig,
) -> Result<Street, CatalogError> {
    let footprints: Vec<ShopFootprint> = descriptors.iter().map(|d| d.footprint()).collect();
    let findings = validate_all(&footprints, config.door_width, config.collision_margin);

    let mut errors = Vec::new();
    for finding in findings {
        match finding.severity {
            Severity::Warning => log::warn!("[{}] {}", finding.category, finding.message),
            Severity::Error => errors.push(finding.message),
        }
    }
    if !errors.is_empty() {
        return Err(CatalogError::Invalid(errors));
    }

    Ok(Street::from_descriptors(descriptors, config))
}

/// Parse JSON text straight into a validated street.
pub fn street_from_json(json: &str, config: StreetConfig) -> Result<Street, CatalogError> {
    build_street(parse_catalog(json)?, config)
}
