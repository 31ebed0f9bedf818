//! Occlusion against the body disk.
//!
//! There is no depth buffer: whether a ring half or a moon is hidden by the
//! planet is decided purely by which draw layer it lands in.
//!
//! The projected plane is viewed from slightly above, so the upper half of
//! every flattened ellipse (negative y on screen) is the far side.

use crate::catalog::RingSystem;
use crate::components::color::Color;
use crate::components::layer::DrawLayer;
use crate::core::orbit::{fmt_num, MOON_FORESHORTENING};

/// Which side of the parent disk something is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Occlusion {
    Back,
    Front,
}

impl Occlusion {
    pub fn flip(self) -> Self {
        match self {
            Occlusion::Back => Occlusion::Front,
            Occlusion::Front => Occlusion::Back,
        }
    }

    pub fn ring_layer(self) -> DrawLayer {
        match self {
            Occlusion::Back => DrawLayer::BackRings,
            Occlusion::Front => DrawLayer::FrontRings,
        }
    }

    pub fn moon_layer(self) -> DrawLayer {
        match self {
            Occlusion::Back => DrawLayer::BackMoons,
            Occlusion::Front => DrawLayer::FrontMoons,
        }
    }
}

/// Side of the parent a moon is on at path progress `p`.
///
/// A step function of `p mod 1`: the first half of the path runs across the
/// far side. A retrograde moon walks the path backwards, so its answer is
/// inverted.
pub fn moon_occlusion(progress: f64, retrograde: bool) -> Occlusion {
    let p = progress.rem_euclid(1.0);
    let side = if p < 0.5 {
        Occlusion::Back
    } else {
        Occlusion::Front
    };
    if retrograde {
        side.flip()
    } else {
        side
    }
}

/// One stroked half-ellipse of a ring band.
#[derive(Debug, Clone, PartialEq)]
pub struct RingArc {
    pub side: Occlusion,
    /// Center-line radius along x.
    pub radius: f64,
    pub stroke: Color,
    pub stroke_width: f64,
    pub opacity: f64,
}

impl RingArc {
    pub fn layer(&self) -> DrawLayer {
        self.side.ring_layer()
    }

    /// Half-ellipse path from the left vertex to the right one, through the
    /// top for the back half and through the bottom for the front half.
    pub fn path_data(&self) -> String {
        half_ellipse_path(self.radius, self.side)
    }
}

pub fn half_ellipse_path(radius: f64, side: Occlusion) -> String {
    let rx = fmt_num(radius);
    let ry = fmt_num(radius * MOON_FORESHORTENING);
    let sweep = match side {
        Occlusion::Back => 1,
        Occlusion::Front => 0,
    };
    format!(
        "M {} 0 A {rx} {ry} 0 0 {sweep} {rx} 0",
        fmt_num(-radius)
    )
}

/// Thin highlight line drawn over the middle of the ring span.
const HIGHLIGHT_WIDTH: f64 = 0.5;
const HIGHLIGHT_OPACITY: f64 = 0.3;

/// Split a ring system into back and front arcs.
///
/// Explicit bands are drawn as given, followed by a highlight along the
/// widest one. Otherwise the span between the inner and outer edge is
/// divided equally among the band colors, innermost first, and the
/// highlight follows the middle of the whole span. Each band is stroked
/// along its center line.
pub fn ring_arcs(rings: &RingSystem, body_radius: f64) -> Vec<RingArc> {
    if !rings.bands.is_empty() {
        return placed_band_arcs(rings, body_radius);
    }
    let n = rings.colors.len();
    if n == 0 {
        return Vec::new();
    }
    let band = (rings.outer_radius - rings.inner_radius) / n as f64;
    let mut arcs = Vec::with_capacity(2 * (n + 1));

    for side in [Occlusion::Back, Occlusion::Front] {
        for (i, color) in rings.colors.iter().enumerate() {
            let center = rings.inner_radius + band * (i as f64 + 0.5);
            arcs.push(RingArc {
                side,
                radius: body_radius * center,
                stroke: *color,
                stroke_width: body_radius * band,
                opacity: rings.opacity,
            });
        }
        let middle = (rings.inner_radius + rings.outer_radius) / 2.0;
        arcs.push(RingArc {
            side,
            radius: body_radius * middle,
            stroke: Color::WHITE,
            stroke_width: HIGHLIGHT_WIDTH,
            opacity: rings.opacity * HIGHLIGHT_OPACITY,
        });
    }
    arcs
}

fn placed_band_arcs(rings: &RingSystem, body_radius: f64) -> Vec<RingArc> {
    let widest = rings
        .bands
        .iter()
        .fold(&rings.bands[0], |w, b| if b.width > w.width { b } else { w });
    let mut arcs = Vec::with_capacity(2 * (rings.bands.len() + 1));

    for side in [Occlusion::Back, Occlusion::Front] {
        for band in &rings.bands {
            arcs.push(RingArc {
                side,
                radius: body_radius * band.radius,
                stroke: band.color,
                stroke_width: body_radius * band.width,
                opacity: rings.opacity * band.opacity,
            });
        }
        arcs.push(RingArc {
            side,
            radius: body_radius * widest.radius,
            stroke: Color::WHITE,
            stroke_width: HIGHLIGHT_WIDTH,
            opacity: rings.opacity * HIGHLIGHT_OPACITY,
        });
    }
    arcs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn saturn_rings() -> RingSystem {
        RingSystem {
            colors: vec![
                Color::rgb8(0xa8, 0xa2, 0x9e),
                Color::rgb8(0xe7, 0xe5, 0xe4),
                Color::rgb8(0xd6, 0xd3, 0xd1),
            ],
            inner_radius: 1.2,
            outer_radius: 2.3,
            opacity: 0.9,
            bands: Vec::new(),
        }
    }

    #[test]
    fn moon_occlusion_steps_at_half() {
        assert_eq!(moon_occlusion(0.0, false), Occlusion::Back);
        assert_eq!(moon_occlusion(0.4999, false), Occlusion::Back);
        assert_eq!(moon_occlusion(0.5, false), Occlusion::Front);
        assert_eq!(moon_occlusion(0.9999, false), Occlusion::Front);
        assert_eq!(moon_occlusion(1.0, false), Occlusion::Back);
        assert_eq!(moon_occlusion(1.25, false), Occlusion::Back);
    }

    #[test]
    fn retrograde_inverts_every_phase() {
        for i in 0..100 {
            let p = i as f64 / 100.0;
            assert_eq!(moon_occlusion(p, true), moon_occlusion(p, false).flip());
        }
    }

    #[test]
    fn layers_follow_side() {
        assert_eq!(Occlusion::Back.ring_layer(), DrawLayer::BackRings);
        assert_eq!(Occlusion::Front.ring_layer(), DrawLayer::FrontRings);
        assert_eq!(Occlusion::Back.moon_layer(), DrawLayer::BackMoons);
        assert_eq!(Occlusion::Front.moon_layer(), DrawLayer::FrontMoons);
    }

    #[test]
    fn half_paths_use_opposite_sweeps() {
        assert_eq!(half_ellipse_path(50.0, Occlusion::Back), "M -50 0 A 50 20 0 0 1 50 0");
        assert_eq!(half_ellipse_path(50.0, Occlusion::Front), "M -50 0 A 50 20 0 0 0 50 0");
    }

    #[test]
    fn bands_split_span_evenly() {
        let arcs = ring_arcs(&saturn_rings(), 10.0);
        // three bands plus a highlight, per side
        assert_eq!(arcs.len(), 8);
        let back: Vec<_> = arcs.iter().filter(|a| a.side == Occlusion::Back).collect();
        assert_eq!(back.len(), 4);
        assert!((back[0].radius - 10.0 * (1.2 + 1.1 / 6.0)).abs() < 1e-9);
        assert!((back[0].stroke_width - 10.0 * 1.1 / 3.0).abs() < 1e-9);
        assert!((back[2].radius - 10.0 * (2.3 - 1.1 / 6.0)).abs() < 1e-9);
        assert_eq!(back[3].stroke, Color::WHITE);
        // bands tile the span with no gap
        let inner_edge = back[0].radius - back[0].stroke_width / 2.0;
        let outer_edge = back[2].radius + back[2].stroke_width / 2.0;
        assert!((inner_edge - 12.0).abs() < 1e-9);
        assert!((outer_edge - 23.0).abs() < 1e-9);
    }

    #[test]
    fn placed_bands_keep_cassini_division() {
        let catalog = crate::catalog::Catalog::solar_system();
        let saturn = catalog.get("saturn").unwrap();
        let arcs = ring_arcs(saturn.rings.as_ref().unwrap(), saturn.radius);
        let back: Vec<_> = arcs.iter().filter(|a| a.side == Occlusion::Back).collect();
        // C, B, Cassini, A, highlight
        assert_eq!(back.len(), 5);
        let r = saturn.radius;
        let radii: Vec<f64> = back[..4].iter().map(|a| a.radius / r).collect();
        for (got, want) in radii.iter().zip([1.35, 1.72, 1.95, 2.15]) {
            assert!((got - want).abs() < 1e-9, "{got} vs {want}");
        }
        let cassini = back[2];
        assert_eq!(cassini.stroke, Color::BLACK);
        assert!((cassini.stroke_width - r * 0.05).abs() < 1e-9);
        assert!((cassini.opacity - 0.9 * 0.2).abs() < 1e-9);
        // highlight rides the B ring
        assert_eq!(back[4].stroke, Color::WHITE);
        assert!((back[4].radius - r * 1.72).abs() < 1e-9);
        assert_eq!(arcs.iter().filter(|a| a.side == Occlusion::Front).count(), 5);
    }

    #[test]
    fn empty_ring_colors_produce_nothing() {
        let mut rings = saturn_rings();
        rings.colors.clear();
        assert!(ring_arcs(&rings, 10.0).is_empty());
    }
}
