//! The body catalog: a star plus an ordered list of orbiting bodies.
//!
//! Built once at startup and never mutated afterwards.

mod body;
mod solar;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use body::{BodyContent, CelestialBody, Language, Moon, RingBand, RingSystem, Star};

/// Data-integrity problems in a catalog.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("duplicate body id '{0}'")]
    DuplicateId(String),
    #[error("body '{id}': eccentricity {value} is outside [0, 1)")]
    Eccentricity { id: String, value: f64 },
    #[error("body '{id}': {field} must be positive, got {value}")]
    NonPositive {
        id: String,
        field: &'static str,
        value: f64,
    },
    #[error("body '{id}': ring inner radius {inner} is not below outer radius {outer}")]
    RingBounds { id: String, inner: f64, outer: f64 },
    #[error("body '{id}': ring system has no colors")]
    RingColors { id: String },
    #[error("catalog JSON: {0}")]
    Json(String),
}

/// Star plus orbiting bodies, innermost first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub star: Star,
    pub bodies: Vec<CelestialBody>,
}

impl Catalog {
    /// The built-in solar system.
    pub fn solar_system() -> Self {
        Self {
            star: solar::sun(),
            bodies: solar::planets(),
        }
    }

    /// Parse and validate a catalog from JSON.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog =
            serde_json::from_str(json).map_err(|e| CatalogError::Json(e.to_string()))?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn get(&self, id: &str) -> Option<&CelestialBody> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CelestialBody> {
        self.bodies.iter()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Check every record. Stops at the first problem.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        seen.insert(self.star.id.as_str());
        positive(&self.star.id, "radius", self.star.radius)?;

        for body in &self.bodies {
            if !seen.insert(body.id.as_str()) {
                return Err(CatalogError::DuplicateId(body.id.clone()));
            }
            if !(0.0..1.0).contains(&body.eccentricity) {
                return Err(CatalogError::Eccentricity {
                    id: body.id.clone(),
                    value: body.eccentricity,
                });
            }
            positive(&body.id, "radius", body.radius)?;
            positive(&body.id, "semi_major_axis", body.semi_major_axis)?;
            positive(&body.id, "orbit_period", body.orbit_period)?;

            if let Some(rings) = &body.rings {
                if rings.colors.is_empty() {
                    return Err(CatalogError::RingColors { id: body.id.clone() });
                }
                if rings.inner_radius >= rings.outer_radius {
                    return Err(CatalogError::RingBounds {
                        id: body.id.clone(),
                        inner: rings.inner_radius,
                        outer: rings.outer_radius,
                    });
                }
                for band in &rings.bands {
                    positive(&body.id, "ring band radius", band.radius)?;
                    positive(&body.id, "ring band width", band.width)?;
                }
            }

            for moon in &body.moons {
                positive(&body.id, "moon radius", moon.radius)?;
                positive(&body.id, "moon distance", moon.distance)?;
                positive(&body.id, "moon period", moon.period)?;
            }
        }
        Ok(())
    }
}

fn positive(id: &str, field: &'static str, value: f64) -> Result<(), CatalogError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(CatalogError::NonPositive {
            id: id.to_string(),
            field,
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = Catalog::solar_system();
        assert_eq!(catalog.validate(), Ok(()));
        assert_eq!(catalog.len(), 9);
        assert_eq!(catalog.star.semi_major_axis(), 0.0);
        assert_eq!(catalog.star.orbit_period(), 0.0);
    }

    #[test]
    fn earth_matches_reference_elements() {
        let catalog = Catalog::solar_system();
        let earth = catalog.get("earth").unwrap();
        assert_eq!(earth.semi_major_axis, 140.0);
        assert_eq!(earth.eccentricity, 0.0167);
        assert_eq!(earth.moons.len(), 1);
    }

    #[test]
    fn bodies_are_ordered_outward() {
        let catalog = Catalog::solar_system();
        let axes: Vec<f64> = catalog.iter().map(|b| b.semi_major_axis).collect();
        assert!(axes.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn rejects_hyperbolic_orbit() {
        let mut catalog = Catalog::solar_system();
        catalog.bodies[0].eccentricity = 1.0;
        assert!(matches!(
            catalog.validate(),
            Err(CatalogError::Eccentricity { .. })
        ));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut catalog = Catalog::solar_system();
        let dup = catalog.bodies[1].clone();
        catalog.bodies.push(dup);
        assert_eq!(
            catalog.validate(),
            Err(CatalogError::DuplicateId("venus".to_string()))
        );
    }

    #[test]
    fn rejects_inverted_rings() {
        let mut catalog = Catalog::solar_system();
        let saturn = catalog.bodies.iter_mut().find(|b| b.id == "saturn").unwrap();
        if let Some(rings) = saturn.rings.as_mut() {
            rings.inner_radius = 3.0;
        }
        assert!(matches!(catalog.validate(), Err(CatalogError::RingBounds { .. })));
    }

    #[test]
    fn json_round_trip_keeps_catalog() {
        let catalog = Catalog::solar_system();
        let json = serde_json::to_string(&catalog).unwrap();
        let parsed = Catalog::from_json(&json).unwrap();
        assert_eq!(parsed.len(), catalog.len());
        assert_eq!(parsed.get("saturn").unwrap().rings, catalog.get("saturn").unwrap().rings);
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(Catalog::from_json("{"), Err(CatalogError::Json(_))));
    }
}
