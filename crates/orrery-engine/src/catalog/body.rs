//! Catalog record types.
//!
//! One flat record per body; rings and moons are optional fields rather
//! than subtypes.

use serde::{Deserialize, Serialize};

use crate::components::color::Color;

/// Display language for all user-facing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    #[default]
    Zh,
}

impl Language {
    pub fn toggle(self) -> Self {
        match self {
            Language::En => Language::Zh,
            Language::Zh => Language::En,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
        }
    }

    /// Parse a language code; anything unknown is `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Some(Language::En),
            "zh" | "cn" => Some(Language::Zh),
            _ => None,
        }
    }
}

/// Presentation text for one body in one language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyContent {
    pub name: String,
    /// Short summary line.
    pub description: String,
    /// Longer scientific detail.
    pub detail: String,
    pub facts: Vec<String>,
    /// Type label, e.g. "Gas Giant".
    #[serde(rename = "type")]
    pub kind: String,
    /// Short tag shown next to the name in the scene label.
    pub feature: String,
}

/// Ring bands around a body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RingSystem {
    /// Band colors, innermost first.
    pub colors: Vec<Color>,
    /// Inner edge as a multiple of the body radius.
    pub inner_radius: f64,
    /// Outer edge as a multiple of the body radius.
    pub outer_radius: f64,
    pub opacity: f64,
    /// Hand-placed bands. When present they replace the even split of
    /// `colors` across the span.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bands: Vec<RingBand>,
}

/// One explicitly placed ring band, in multiples of the body radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RingBand {
    /// Center-line radius.
    pub radius: f64,
    pub width: f64,
    pub color: Color,
    /// Stroke opacity, multiplied with the ring system's opacity.
    #[serde(default = "full_opacity")]
    pub opacity: f64,
}

fn full_opacity() -> f64 {
    1.0
}

/// A moon orbiting a catalog body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Moon {
    pub name: String,
    pub radius: f64,
    /// Distance from the parent center, scene units.
    pub distance: f64,
    /// Seconds per revolution.
    pub period: f64,
    pub color: Color,
    #[serde(default)]
    pub retrograde: bool,
}

/// A planet (or dwarf planet) orbiting the star.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CelestialBody {
    pub id: String,
    pub color: Color,
    pub radius: f64,
    /// `a`, scene units.
    pub semi_major_axis: f64,
    /// `e`, in [0, 1).
    pub eccentricity: f64,
    /// Degrees; rotates the whole ellipse about the star.
    pub argument_of_perihelion: f64,
    /// Seconds for one full traversal (scaled, not physical).
    pub orbit_period: f64,
    /// Degrees; rotates body, rings and moons together.
    #[serde(default)]
    pub axial_tilt: f64,
    #[serde(default)]
    pub rings: Option<RingSystem>,
    #[serde(default)]
    pub moons: Vec<Moon>,
    pub temperature: String,
    pub en: BodyContent,
    pub zh: BodyContent,
}

impl CelestialBody {
    pub fn content(&self, lang: Language) -> &BodyContent {
        match lang {
            Language::En => &self.en,
            Language::Zh => &self.zh,
        }
    }

    /// Radius of the invisible click target around the body.
    pub fn hit_radius(&self) -> f64 {
        (self.radius * 2.0).max(40.0)
    }
}

/// The central star. Degenerate orbit: `a = 0`, never animated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Star {
    pub id: String,
    pub color: Color,
    pub radius: f64,
    /// Radius of the soft glow around the core.
    pub corona_radius: f64,
    pub en: BodyContent,
    pub zh: BodyContent,
}

impl Star {
    pub fn content(&self, lang: Language) -> &BodyContent {
        match lang {
            Language::En => &self.en,
            Language::Zh => &self.zh,
        }
    }

    pub const fn semi_major_axis(&self) -> f64 {
        0.0
    }

    pub const fn orbit_period(&self) -> f64 {
        0.0
    }
}
