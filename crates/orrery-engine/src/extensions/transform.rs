// extensions/transform.rs
//
// Nested 2D transforms: the Rust mirror of SVG `<g transform=...>` nesting.
//
// A body on screen sits inside several groups: the orbit rotation, the
// position along the path, the axial tilt, and (for its label) a local
// offset plus a counter-rotation. `TransformChain` composes them outermost
// first so we can both emit the attribute strings and ask where things end up.

use glam::{DAffine2, DVec2};

use crate::core::orbit::fmt_num;

/// One group's transform: translate by `offset`, then rotate by `rotation_deg`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTransform {
    /// Translation relative to the parent group.
    pub offset: DVec2,
    /// Rotation in degrees (clockwise on screen, y down).
    pub rotation_deg: f64,
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self {
            offset: DVec2::ZERO,
            rotation_deg: 0.0,
        }
    }
}

impl LocalTransform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn translate(offset: DVec2) -> Self {
        Self::new().with_offset(offset)
    }

    pub fn rotate(rotation_deg: f64) -> Self {
        Self::new().with_rotation(rotation_deg)
    }

    pub fn with_offset(mut self, offset: DVec2) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_rotation(mut self, rotation_deg: f64) -> Self {
        self.rotation_deg = rotation_deg;
        self
    }

    pub fn is_identity(&self) -> bool {
        self.offset == DVec2::ZERO && self.rotation_deg == 0.0
    }

    pub fn to_affine(&self) -> DAffine2 {
        DAffine2::from_translation(self.offset) * DAffine2::from_angle(self.rotation_deg.to_radians())
    }

    /// SVG `transform` attribute value.
    pub fn to_svg(&self) -> String {
        let mut parts = Vec::with_capacity(2);
        if self.offset != DVec2::ZERO {
            parts.push(format!(
                "translate({} {})",
                fmt_num(self.offset.x),
                fmt_num(self.offset.y)
            ));
        }
        if self.rotation_deg != 0.0 {
            parts.push(format!("rotate({})", fmt_num(self.rotation_deg)));
        }
        parts.join(" ")
    }
}

/// Nested transforms, outermost group first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformChain {
    links: Vec<LocalTransform>,
}

impl TransformChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nest another group inside the current innermost one.
    pub fn then(mut self, local: LocalTransform) -> Self {
        self.links.push(local);
        self
    }

    pub fn links(&self) -> &[LocalTransform] {
        &self.links
    }

    /// Combined transform from the innermost frame to scene coordinates.
    pub fn to_affine(&self) -> DAffine2 {
        self.links
            .iter()
            .fold(DAffine2::IDENTITY, |acc, link| acc * link.to_affine())
    }

    /// Where the innermost frame's origin lands in scene coordinates.
    pub fn origin(&self) -> DVec2 {
        self.to_affine().transform_point2(DVec2::ZERO)
    }

    /// Map a point from the innermost frame to scene coordinates.
    pub fn apply(&self, point: DVec2) -> DVec2 {
        self.to_affine().transform_point2(point)
    }

    /// Sum of all rotations, normalized to (-180, 180].
    pub fn net_rotation_deg(&self) -> f64 {
        let sum: f64 = self.links.iter().map(|l| l.rotation_deg).sum();
        normalize_degrees(sum)
    }
}

/// Wrap an angle into (-180, 180].
pub fn normalize_degrees(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}
