//! Decorative background: starfield and the two debris belts.
//!
//! Generated once from a seed; only the belt spin depends on `t`.

use std::f64::consts::TAU;

use glam::DVec2;

use super::rng::Rng;
use crate::components::color::Color;

/// Stars are scattered over a square this far from the origin on each axis.
pub const STARFIELD_EXTENT: f64 = 1500.0;
/// Stars larger than this radius twinkle.
pub const TWINKLE_RADIUS: f64 = 1.2;

/// A background star.
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundStar {
    pub position: DVec2,
    pub radius: f64,
    pub opacity: f64,
    /// Seconds before the twinkle animation starts.
    pub twinkle_delay: f64,
}

impl BackgroundStar {
    pub fn twinkles(&self) -> bool {
        self.radius > TWINKLE_RADIUS
    }
}

/// Generate `count` stars. Nine in ten are faint pinpricks; the rest are
/// larger and may twinkle.
pub fn starfield(count: usize, seed: u64) -> Vec<BackgroundStar> {
    let mut rng = Rng::new(seed);
    (0..count)
        .map(|_| {
            let x = rng.range(-STARFIELD_EXTENT, STARFIELD_EXTENT);
            let y = rng.range(-STARFIELD_EXTENT, STARFIELD_EXTENT);
            let radius = if rng.next_unit() < 0.9 {
                rng.range(0.2, 1.0)
            } else {
                rng.range(0.5, 2.0)
            };
            BackgroundStar {
                position: DVec2::new(x, y),
                radius,
                opacity: rng.range(0.3, 1.0),
                twinkle_delay: rng.range(0.0, 5.0),
            }
        })
        .collect()
}

/// Parameters for one ring of debris around the star.
#[derive(Debug, Clone, PartialEq)]
pub struct BeltSpec {
    pub count: usize,
    pub inner_radius: f64,
    pub outer_radius: f64,
    /// Random particle radius is `size_min + u * size_span`.
    pub size_min: f64,
    pub size_span: f64,
    pub opacity_min: f64,
    pub opacity_span: f64,
    /// Seconds per full rotation of the belt.
    pub spin_period: f64,
    pub color: Color,
    pub seed: u64,
}

impl BeltSpec {
    /// Main asteroid belt, between Mars and Jupiter.
    pub fn asteroid() -> Self {
        Self {
            count: 400,
            inner_radius: 200.0,
            outer_radius: 240.0,
            size_min: 0.5,
            size_span: 1.0,
            opacity_min: 0.2,
            opacity_span: 0.4,
            spin_period: 120.0,
            color: Color::rgb8(0xa8, 0xa2, 0x9e),
            seed: 0xA57E_401D,
        }
    }

    /// Kuiper belt, beyond Neptune.
    pub fn kuiper() -> Self {
        Self {
            count: 600,
            inner_radius: 520.0,
            outer_radius: 750.0,
            size_min: 0.5,
            size_span: 1.2,
            opacity_min: 0.1,
            opacity_span: 0.3,
            spin_period: 400.0,
            color: Color::rgb8(0x94, 0xa3, 0xb8),
            seed: 0x4B01_9E12,
        }
    }
}

/// One belt particle, in the belt's unrotated frame.
#[derive(Debug, Clone, PartialEq)]
pub struct BeltParticle {
    pub position: DVec2,
    pub radius: f64,
    pub opacity: f64,
}

/// A generated belt. The whole group rotates rigidly with time.
#[derive(Debug, Clone)]
pub struct Belt {
    pub spec: BeltSpec,
    pub particles: Vec<BeltParticle>,
}

impl Belt {
    pub fn generate(spec: BeltSpec) -> Self {
        let mut rng = Rng::new(spec.seed);
        let particles = (0..spec.count)
            .map(|_| {
                let angle = rng.next_unit() * TAU;
                let r = rng.range(spec.inner_radius, spec.outer_radius);
                BeltParticle {
                    position: DVec2::from_angle(angle) * r,
                    radius: spec.size_min + rng.next_unit() * spec.size_span,
                    opacity: spec.opacity_min + rng.next_unit() * spec.opacity_span,
                }
            })
            .collect();
        Self { spec, particles }
    }
}
