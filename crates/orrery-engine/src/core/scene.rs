use glam::DVec2;

use crate::assets::manifest::AssetManifest;
use crate::catalog::{Catalog, CelestialBody, Moon};
use crate::components::layer::DrawLayer;
use crate::core::time::{cycle_fraction, spin_angle};
use crate::extensions::easing::{lerp, Easing};
use crate::panel::ViewState;
use crate::systems::backdrop::{starfield, BackgroundStar, Belt, BeltSpec};
use crate::systems::layout::{BodyFrame, MoonFrame, OrbitLayout};
use crate::systems::occlusion::{ring_arcs, RingArc};

/// Seconds per selection-ring pulse.
pub const PULSE_PERIOD: f64 = 2.0;
/// Opacity of the selection ring before the pulse is applied.
pub const SELECTION_OPACITY: f64 = 0.4;
/// Gap between a body's edge and its selection ring, on top of the 1.5x radius.
pub const SELECTION_MARGIN: f64 = 15.0;

/// Logical coordinate region of the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for ViewBox {
    fn default() -> Self {
        Self {
            min_x: -650.0,
            min_y: -650.0,
            width: 1300.0,
            height: 1300.0,
        }
    }
}

impl ViewBox {
    /// `viewBox` attribute value.
    pub fn to_attr(&self) -> String {
        format!("{} {} {} {}", self.min_x, self.min_y, self.width, self.height)
    }
}

/// Scene configuration. Passed once to `Scene::new`.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    pub view_box: ViewBox,
    /// Number of background stars (default: 500).
    pub star_count: usize,
    pub star_seed: u64,
    pub show_asteroid_belt: bool,
    pub show_kuiper_belt: bool,
    pub asteroid_belt: BeltSpec,
    pub kuiper_belt: BeltSpec,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            view_box: ViewBox::default(),
            star_count: 500,
            star_seed: 0x5EED_57A5,
            show_asteroid_belt: true,
            show_kuiper_belt: true,
            asteroid_belt: BeltSpec::asteroid(),
            kuiper_belt: BeltSpec::kuiper(),
        }
    }
}

/// The composed scene: catalog, static paths and backdrop.
///
/// Everything here is built once; `frame` is a pure function of `t` and the
/// view state.
#[derive(Debug, Clone)]
pub struct Scene {
    config: SceneConfig,
    catalog: Catalog,
    assets: AssetManifest,
    layouts: Vec<OrbitLayout>,
    stars: Vec<BackgroundStar>,
    belts: Vec<Belt>,
}

/// One item in a body's back-to-front draw list.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawItem {
    Ring(RingArc),
    Moon(MoonFrame),
    /// The disk, its texture and shading.
    Body,
    /// The upright label block.
    Label { visible: bool },
}

/// A body at one instant, ready to draw.
#[derive(Debug, Clone)]
pub struct BodyView<'a> {
    pub body: &'a CelestialBody,
    pub frame: BodyFrame,
    pub selected: bool,
    pub hovered: bool,
    /// Sorted by layer, back to front. Ties keep insertion order.
    pub items: Vec<(DrawLayer, DrawItem)>,
}

impl<'a> BodyView<'a> {
    pub fn label_visible(&self) -> bool {
        self.selected || self.hovered
    }

    pub fn moon(&self, index: usize) -> Option<&'a Moon> {
        self.body.moons.get(index)
    }

    /// Radius of the selection ring.
    pub fn selection_radius(&self) -> f64 {
        self.body.radius * 1.5 + SELECTION_MARGIN
    }
}

/// A belt at one instant.
#[derive(Debug, Clone, Copy)]
pub struct BeltView<'a> {
    pub belt: &'a Belt,
    /// Degrees.
    pub rotation: f64,
}

/// The whole scene at time `t`.
#[derive(Debug, Clone)]
pub struct SceneFrame<'a> {
    pub t: f64,
    pub bodies: Vec<BodyView<'a>>,
    pub belts: Vec<BeltView<'a>>,
    /// Current opacity of the selection ring.
    pub selection_opacity: f64,
}

impl Scene {
    pub fn new(catalog: Catalog, assets: AssetManifest, config: SceneConfig) -> Self {
        let layouts = catalog.iter().map(OrbitLayout::new).collect();
        let stars = starfield(config.star_count, config.star_seed);
        let mut belts = Vec::with_capacity(2);
        // outermost first so the inner belt paints over it
        if config.show_kuiper_belt {
            belts.push(Belt::generate(config.kuiper_belt.clone()));
        }
        if config.show_asteroid_belt {
            belts.push(Belt::generate(config.asteroid_belt.clone()));
        }
        log::info!(
            "Scene: {} bodies, {} stars, {} belts",
            catalog.len(),
            stars.len(),
            belts.len()
        );
        Self {
            config,
            catalog,
            assets,
            layouts,
            stars,
            belts,
        }
    }

    /// Built-in solar system with the embedded asset manifest.
    pub fn solar_system() -> Self {
        Self::new(
            Catalog::solar_system(),
            AssetManifest::embedded(),
            SceneConfig::default(),
        )
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn assets(&self) -> &AssetManifest {
        &self.assets
    }

    pub fn stars(&self) -> &[BackgroundStar] {
        &self.stars
    }

    pub fn layout(&self, id: &str) -> Option<&OrbitLayout> {
        let index = self.catalog.iter().position(|b| b.id == id)?;
        self.layouts.get(index)
    }

    /// Position of a body in scene coordinates at time `t`.
    pub fn position_of(&self, id: &str, t: f64) -> Option<DVec2> {
        self.layout(id).map(|l| l.frame(t).position)
    }

    /// Compose every body and belt at time `t`.
    pub fn frame(&self, t: f64, view: &ViewState) -> SceneFrame<'_> {
        let bodies = self
            .catalog
            .iter()
            .zip(&self.layouts)
            .map(|(body, layout)| {
                let frame = layout.frame(t);
                let selected = view.selected.as_deref() == Some(body.id.as_str());
                let hovered = view.hovered.as_deref() == Some(body.id.as_str());
                let items = draw_list(body, &frame, selected || hovered);
                BodyView {
                    body,
                    frame,
                    selected,
                    hovered,
                    items,
                }
            })
            .collect();

        let belts = self
            .belts
            .iter()
            .map(|belt| BeltView {
                belt,
                rotation: spin_angle(t, belt.spec.spin_period),
            })
            .collect();

        SceneFrame {
            t,
            bodies,
            belts,
            selection_opacity: selection_pulse(t),
        }
    }

    /// Body under `point` at time `t`. Overlapping hit areas go to the
    /// body whose center is closest.
    pub fn hit_test(&self, t: f64, point: DVec2) -> Option<&CelestialBody> {
        self.catalog
            .iter()
            .zip(&self.layouts)
            .filter_map(|(body, layout)| {
                let d = layout.frame(t).position.distance(point);
                (d <= layout.hit_radius).then_some((body, d))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(body, _)| body)
    }
}

/// Draw list for one body, sorted back to front.
fn draw_list(body: &CelestialBody, frame: &BodyFrame, label_visible: bool) -> Vec<(DrawLayer, DrawItem)> {
    let mut items = Vec::with_capacity(4 + 2 * body.moons.len());
    if let Some(rings) = &body.rings {
        for arc in ring_arcs(rings, body.radius) {
            items.push((arc.layer(), DrawItem::Ring(arc)));
        }
    }
    for moon in &frame.moons {
        items.push((moon.occlusion.moon_layer(), DrawItem::Moon(moon.clone())));
    }
    items.push((DrawLayer::Body, DrawItem::Body));
    items.push((
        DrawLayer::Label,
        DrawItem::Label {
            visible: label_visible,
        },
    ));
    // stable: items within a layer keep insertion order
    items.sort_by_key(|(layer, _)| *layer);
    items
}

/// Selection ring opacity at time `t`: fades to half and back every
/// `PULSE_PERIOD` seconds.
pub fn selection_pulse(t: f64) -> f64 {
    let u = cycle_fraction(t, PULSE_PERIOD);
    let level = if u < 0.5 {
        lerp(1.0, 0.5, Easing::Pulse.apply(u * 2.0))
    } else {
        lerp(0.5, 1.0, Easing::Pulse.apply(u * 2.0 - 1.0))
    };
    SELECTION_OPACITY * level
}
