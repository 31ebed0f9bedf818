//! Orbit geometry: pure math, no catalog or scene dependencies.
//!
//! Uses f64 throughout. Coordinates are SVG scene units with y pointing
//! down, so a positive rotation turns clockwise on screen.

use std::f64::consts::TAU;

use glam::{DAffine2, DVec2};

/// Number of parameter samples in an arc-length table.
pub const PATH_SAMPLES: usize = 256;

/// Vertical squash applied to moon paths and rings to fake a view from
/// slightly above the orbital plane.
pub const MOON_FORESHORTENING: f64 = 0.4;

/// An axis-aligned ellipse traced the way the SVG path data draws it:
/// starting at the right-hand vertex and sweeping toward negative y first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    /// Horizontal semi-axis.
    pub rx: f64,
    /// Vertical semi-axis.
    pub ry: f64,
    /// Center position on the x axis.
    pub center_x: f64,
}

impl Ellipse {
    /// Keplerian orbit with the focus at the origin and perihelion on +x.
    pub fn from_orbit(semi_major_axis: f64, eccentricity: f64) -> Self {
        let a = semi_major_axis;
        let e = eccentricity;
        Self {
            rx: a,
            ry: a * (1.0 - e * e).sqrt(),
            center_x: -a * e,
        }
    }

    /// Ellipse centered on the origin, squashed vertically by `factor`.
    pub fn flattened(radius: f64, factor: f64) -> Self {
        Self {
            rx: radius,
            ry: radius * factor,
            center_x: 0.0,
        }
    }

    /// Start vertex of the path (perihelion for an orbit).
    pub fn start(&self) -> DVec2 {
        DVec2::new(self.center_x + self.rx, 0.0)
    }

    /// Opposite vertex (aphelion for an orbit).
    pub fn far_vertex(&self) -> DVec2 {
        DVec2::new(self.center_x - self.rx, 0.0)
    }

    /// Point at sweep parameter `s` radians from the start vertex.
    #[inline]
    pub fn point(&self, s: f64) -> DVec2 {
        DVec2::new(self.center_x + self.rx * s.cos(), -self.ry * s.sin())
    }

    /// SVG path data: two large-arc half ellipses, sweep flag 0.
    pub fn path_data(&self) -> String {
        let start = self.start();
        let far = self.far_vertex();
        format!(
            "M {sx} 0 A {rx} {ry} 0 1 0 {fx} 0 A {rx} {ry} 0 1 0 {sx} 0",
            sx = fmt_num(start.x),
            fx = fmt_num(far.x),
            rx = fmt_num(self.rx),
            ry = fmt_num(self.ry),
        )
    }
}

/// Format a scene coordinate for path data.
pub fn fmt_num(v: f64) -> String {
    let rounded = (v * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        // avoid "-0"
        return "0".to_string();
    }
    format!("{}", rounded)
}

/// Cumulative arc-length table over one full sweep of an ellipse.
///
/// Lets a fraction of the path length be mapped back to a point, the same
/// way a CSS `offset-distance` percentage walks a path.
#[derive(Debug, Clone)]
pub struct ArcTable {
    ellipse: Ellipse,
    /// `cumulative[i]` = length from the start to sample `i`.
    cumulative: Vec<f64>,
}

impl ArcTable {
    pub fn new(ellipse: Ellipse) -> Self {
        let mut cumulative = Vec::with_capacity(PATH_SAMPLES + 1);
        cumulative.push(0.0);
        let mut prev = ellipse.point(0.0);
        let mut total = 0.0;
        for i in 1..=PATH_SAMPLES {
            let p = ellipse.point(sample_param(i));
            total += p.distance(prev);
            cumulative.push(total);
            prev = p;
        }
        Self { ellipse, cumulative }
    }

    pub fn ellipse(&self) -> &Ellipse {
        &self.ellipse
    }

    /// Total path length.
    pub fn length(&self) -> f64 {
        self.cumulative[PATH_SAMPLES]
    }

    /// Point at `fraction` of the path length (wrapped into [0, 1)).
    pub fn point_at(&self, fraction: f64) -> DVec2 {
        let total = self.length();
        if total <= 0.0 {
            return self.ellipse.start();
        }
        let target = fraction.rem_euclid(1.0) * total;
        // First sample at or beyond the target distance.
        let hi = self
            .cumulative
            .partition_point(|&d| d < target)
            .clamp(1, PATH_SAMPLES);
        let lo = hi - 1;
        let span = self.cumulative[hi] - self.cumulative[lo];
        let local = if span > 0.0 {
            (target - self.cumulative[lo]) / span
        } else {
            0.0
        };
        let s = sample_param(lo) + (sample_param(hi) - sample_param(lo)) * local;
        self.ellipse.point(s)
    }
}

#[inline]
fn sample_param(i: usize) -> f64 {
    TAU * i as f64 / PATH_SAMPLES as f64
}

/// A body's orbit: ellipse shape, arc-length table and the rotation by the
/// argument of perihelion.
#[derive(Debug, Clone)]
pub struct OrbitPath {
    semi_major_axis: f64,
    eccentricity: f64,
    rotation_deg: f64,
    table: ArcTable,
}

impl OrbitPath {
    pub fn new(semi_major_axis: f64, eccentricity: f64, argument_of_perihelion: f64) -> Self {
        let ellipse = Ellipse::from_orbit(semi_major_axis, eccentricity);
        Self {
            semi_major_axis,
            eccentricity,
            rotation_deg: argument_of_perihelion,
            table: ArcTable::new(ellipse),
        }
    }

    /// Semi-major axis `a`.
    pub fn semi_major(&self) -> f64 {
        self.semi_major_axis
    }

    /// Semi-minor axis `b = a·sqrt(1−e²)`.
    pub fn semi_minor(&self) -> f64 {
        self.table.ellipse().ry
    }

    /// Focal offset `c = a·e`.
    pub fn focal_offset(&self) -> f64 {
        self.semi_major_axis * self.eccentricity
    }

    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    /// Perihelion in the orbit's own (unrotated) frame: `(a−c, 0)`.
    pub fn perihelion(&self) -> DVec2 {
        self.table.ellipse().start()
    }

    /// Aphelion in the orbit's own frame: `(−(a+c), 0)`.
    pub fn aphelion(&self) -> DVec2 {
        self.table.ellipse().far_vertex()
    }

    /// Argument of perihelion in degrees.
    pub fn rotation_deg(&self) -> f64 {
        self.rotation_deg
    }

    /// Rotation about the parent focus.
    pub fn transform(&self) -> DAffine2 {
        DAffine2::from_angle(self.rotation_deg.to_radians())
    }

    /// Unrotated path data; the renderer wraps it in the rotation.
    pub fn path_data(&self) -> String {
        self.table.ellipse().path_data()
    }

    pub fn length(&self) -> f64 {
        self.table.length()
    }

    /// Position at path fraction `progress`, in the orbit's own frame.
    pub fn local_point_at(&self, progress: f64) -> DVec2 {
        self.table.point_at(progress)
    }

    /// Position at path fraction `progress`, in scene coordinates.
    pub fn world_point_at(&self, progress: f64) -> DVec2 {
        self.transform().transform_point2(self.local_point_at(progress))
    }
}

/// A moon's path around its parent, in the parent's tilted frame.
#[derive(Debug, Clone)]
pub struct MoonPath {
    table: ArcTable,
}

impl MoonPath {
    pub fn new(distance: f64) -> Self {
        Self {
            table: ArcTable::new(Ellipse::flattened(distance, MOON_FORESHORTENING)),
        }
    }

    pub fn path_data(&self) -> String {
        self.table.ellipse().path_data()
    }

    /// Position at `progress`; a retrograde moon walks the path backwards.
    pub fn point_at(&self, progress: f64, retrograde: bool) -> DVec2 {
        let f = if retrograde { 1.0 - progress } else { progress };
        self.table.point_at(f)
    }
}
