//! Per-body layout: static paths built once, positions evaluated per frame.

use glam::DVec2;

use crate::catalog::CelestialBody;
use crate::core::orbit::{MoonPath, OrbitPath};
use crate::core::time::{moon_progress, orbit_progress};
use crate::extensions::transform::{LocalTransform, TransformChain};
use crate::systems::occlusion::{moon_occlusion, Occlusion};

/// Gap between the bottom of a body and its label anchor.
pub const LABEL_GAP: f64 = 25.0;

/// A moon's static path and timing.
#[derive(Debug, Clone)]
pub struct MoonTrack {
    pub path: MoonPath,
    pub period: f64,
    pub retrograde: bool,
}

/// Static geometry for one body, computed once at startup.
#[derive(Debug, Clone)]
pub struct OrbitLayout {
    pub orbit: OrbitPath,
    pub moons: Vec<MoonTrack>,
    pub radius: f64,
    pub axial_tilt: f64,
    pub period: f64,
    pub hit_radius: f64,
}

/// Where one moon is at a given instant, in the parent's tilted frame.
#[derive(Debug, Clone, PartialEq)]
pub struct MoonFrame {
    /// Index into the parent's `moons`.
    pub index: usize,
    pub progress: f64,
    pub position: DVec2,
    pub occlusion: Occlusion,
}

/// Everything the renderer needs about one body at time `t`.
#[derive(Debug, Clone)]
pub struct BodyFrame {
    pub progress: f64,
    /// Position in the orbit's own (unrotated) frame.
    pub local_position: DVec2,
    /// Position in scene coordinates.
    pub position: DVec2,
    /// Orbit rotation, then the move along the path.
    pub carrier: TransformChain,
    /// Rotation applied inside the carrier so the subsystem's net on-screen
    /// rotation equals the axial tilt.
    pub tilt: LocalTransform,
    /// Carrier plus offset below the body plus the counter-rotation.
    pub label: TransformChain,
    pub moons: Vec<MoonFrame>,
}

impl BodyFrame {
    /// Full chain into the tilted subsystem.
    pub fn subsystem(&self) -> TransformChain {
        self.carrier.clone().then(self.tilt)
    }
}

impl OrbitLayout {
    pub fn new(body: &CelestialBody) -> Self {
        let moons = body
            .moons
            .iter()
            .map(|m| MoonTrack {
                path: MoonPath::new(m.distance),
                period: m.period,
                retrograde: m.retrograde,
            })
            .collect();
        Self {
            orbit: OrbitPath::new(
                body.semi_major_axis,
                body.eccentricity,
                body.argument_of_perihelion,
            ),
            moons,
            radius: body.radius,
            axial_tilt: body.axial_tilt,
            period: body.orbit_period,
            hit_radius: body.hit_radius(),
        }
    }

    /// Whether the body moves at all. A zero period pins it to the origin.
    pub fn is_animated(&self) -> bool {
        self.period > 0.0 && self.orbit.semi_major() > 0.0
    }

    pub fn frame(&self, t: f64) -> BodyFrame {
        let (progress, local_position) = if self.is_animated() {
            let p = orbit_progress(t, self.period);
            (p, self.orbit.local_point_at(p))
        } else {
            (0.0, DVec2::ZERO)
        };

        let theta = self.orbit.rotation_deg();
        let carrier = TransformChain::new()
            .then(LocalTransform::rotate(theta))
            .then(LocalTransform::translate(local_position));
        let tilt = LocalTransform::rotate(self.axial_tilt - theta);
        let label = carrier.clone().then(
            LocalTransform::translate(DVec2::new(0.0, self.radius + LABEL_GAP)).with_rotation(-theta),
        );
        let position = carrier.origin();

        let moons = self
            .moons
            .iter()
            .enumerate()
            .map(|(index, track)| {
                let p = moon_progress(t, track.period);
                MoonFrame {
                    index,
                    progress: p,
                    position: track.path.point_at(p, track.retrograde),
                    occlusion: moon_occlusion(p, track.retrograde),
                }
            })
            .collect();

        BodyFrame {
            progress,
            local_position,
            position,
            carrier,
            tilt,
            label,
            moons,
        }
    }
}
