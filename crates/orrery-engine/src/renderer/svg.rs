//! SVG snapshot of the scene at one instant.
//!
//! Group nesting mirrors the transform chains from the layout:
//! orbit rotation > position on path > tilt (body, rings, moons), with the
//! label as a sibling of the tilt group.

use svg::node::element::{
    Circle, ClipPath, Definitions, Element, Filter, FilterEffectGaussianBlur, FilterEffectMerge,
    FilterEffectMergeNode, Group, Image, Path, RadialGradient, Rectangle as Rect, Stop, Style, Text,
};
use svg::node::Node;
use svg::node::Text as TextNode;
use svg::Document;

use crate::catalog::Language;
use crate::core::orbit::fmt_num as n;
use crate::core::scene::{BeltView, BodyView, DrawItem, Scene, SceneFrame};
use crate::extensions::transform::LocalTransform;
use crate::panel::ViewState;
use crate::systems::backdrop::BackgroundStar;

const BACKGROUND: &str = "#050b14";
const ORBIT_STROKE: &str = "#cbd5e1";
const LABEL_BG: &str = "#0f172a";
const LABEL_TAG: &str = "#94a3b8";
const BACKDROP_OPACITY: &str = "0.35";

const STYLE: &str = "\
@keyframes twinkle { 0%, 100% { opacity: 1; } 50% { opacity: 0.3; } }
.twinkle { animation: twinkle 3s ease-in-out infinite; }
.label { transition: opacity 0.3s; }
";

/// Render the scene at time `t` to an SVG string.
pub fn render_svg(scene: &Scene, t: f64, view: &ViewState) -> String {
    render_document(scene, t, view).to_string()
}

/// Build the SVG document for the scene at time `t`.
pub fn render_document(scene: &Scene, t: f64, view: &ViewState) -> Document {
    let frame = scene.frame(t, view);
    let vb = scene.config().view_box;

    let mut doc = Document::new()
        .set("viewBox", vb.to_attr())
        .set("preserveAspectRatio", "xMidYMid meet")
        .set("data-t", n(t))
        .add(Style::new(STYLE))
        .add(definitions(scene, &frame))
        .add(
            Rect::new()
                .set("x", "-1500")
                .set("y", "-1500")
                .set("width", "3000")
                .set("height", "3000")
                .set("fill", BACKGROUND),
        );
    // the flat fill shows through if the image never loads
    if let Some(uri) = scene.assets().backdrop_uri() {
        doc = doc.add(
            Image::new()
                .set("class", "backdrop")
                .set("href", uri)
                .set("x", "-1500")
                .set("y", "-1500")
                .set("width", "3000")
                .set("height", "3000")
                .set("preserveAspectRatio", "xMidYMid slice")
                .set("opacity", BACKDROP_OPACITY)
                .set("pointer-events", "none"),
        );
    }
    doc = doc
        .add(
            Rect::new()
                .set("x", "-1500")
                .set("y", "-1500")
                .set("width", "3000")
                .set("height", "3000")
                .set("fill", "url(#spaceGlow)")
                .set("pointer-events", "none"),
        )
        .add(starfield(scene.stars()));

    for belt in &frame.belts {
        doc = doc.add(belt_group(belt));
    }
    doc = doc.add(sun(scene, view.language));
    for body in &frame.bodies {
        doc = doc.add(body_group(scene, body, frame.selection_opacity, view.language));
    }

    doc.add(footer(vb.min_x, vb.min_y + vb.height, view.language))
}

fn definitions(scene: &Scene, frame: &SceneFrame<'_>) -> Definitions {
    let mut defs = Definitions::new()
        .add(gradient(
            "sunGradient",
            "0.5",
            &[
                ("0%", "#fff7ed", "1"),
                ("20%", "#fef08a", "1"),
                ("50%", "#fbbf24", "1"),
                ("100%", "#ea580c", "0"),
            ],
        ))
        .add(gradient(
            "spaceGlow",
            "0.8",
            &[("0%", "#1e293b", "0.3"), ("100%", BACKGROUND, "0")],
        ))
        // lit from the upper left, dark toward the lower right
        .add(
            gradient(
                "bodyShade",
                "0.75",
                &[
                    ("0%", "#ffffff", "0.25"),
                    ("55%", "#000000", "0"),
                    ("100%", "#000000", "0.6"),
                ],
            )
            .set("cx", "0.35")
            .set("cy", "0.35"),
        )
        .add(glow_filter("sunGlowFilter", "12", "-100%", "300%"))
        .add(glow_filter("planetGlow", "2", "-50%", "200%"));

    let star = &scene.catalog().star;
    defs = defs.add(clip_circle(&star.id, star.radius));
    for body in &frame.bodies {
        defs = defs.add(clip_circle(&body.body.id, body.body.radius));
    }
    defs
}

fn gradient(id: &str, r: &str, stops: &[(&str, &str, &str)]) -> RadialGradient {
    stops.iter().fold(
        RadialGradient::new()
            .set("id", id)
            .set("cx", "0.5")
            .set("cy", "0.5")
            .set("r", r),
        |g, (offset, color, opacity)| {
            g.add(
                Stop::new()
                    .set("offset", *offset)
                    .set("stop-color", *color)
                    .set("stop-opacity", *opacity),
            )
        },
    )
}

fn glow_filter(id: &str, blur: &str, origin: &str, size: &str) -> Filter {
    Filter::new()
        .set("id", id)
        .set("x", origin)
        .set("y", origin)
        .set("width", size)
        .set("height", size)
        .add(
            FilterEffectGaussianBlur::new()
                .set("stdDeviation", blur)
                .set("result", "coloredBlur"),
        )
        .add(
            FilterEffectMerge::new()
                .add(FilterEffectMergeNode::new().set("in", "coloredBlur"))
                .add(FilterEffectMergeNode::new().set("in", "SourceGraphic")),
        )
}

fn clip_circle(id: &str, radius: f64) -> ClipPath {
    ClipPath::new()
        .set("id", format!("clip-{id}"))
        .add(Circle::new().set("r", n(radius)))
}

fn starfield(stars: &[BackgroundStar]) -> Group {
    stars.iter().fold(
        Group::new()
            .set("class", "starfield")
            .set("pointer-events", "none"),
        |g, star| {
            let mut c = Circle::new()
                .set("cx", n(star.position.x))
                .set("cy", n(star.position.y))
                .set("r", n(star.radius))
                .set("fill", "white")
                .set("opacity", n(star.opacity));
            if star.twinkles() {
                c = c
                    .set("class", "twinkle")
                    .set("style", format!("animation-delay: {}s", n(star.twinkle_delay)));
            }
            g.add(c)
        },
    )
}

fn belt_group(view: &BeltView<'_>) -> Group {
    let color = view.belt.spec.color.to_hex();
    view.belt.particles.iter().fold(
        set_transform(
            Group::new()
                .set("class", "belt")
                .set("pointer-events", "none"),
            &LocalTransform::rotate(view.rotation),
        ),
        |g, p| {
            g.add(
                Circle::new()
                    .set("cx", n(p.position.x))
                    .set("cy", n(p.position.y))
                    .set("r", n(p.radius))
                    .set("fill", color.as_str())
                    .set("opacity", n(p.opacity)),
            )
        },
    )
}

fn sun(scene: &Scene, lang: Language) -> Group {
    let star = &scene.catalog().star;
    let mut g = Group::new()
        .set("data-body", star.id.as_str())
        .set("pointer-events", "none")
        .add(
            Circle::new()
                .set("r", n(star.corona_radius))
                .set("fill", "url(#sunGradient)")
                .set("opacity", "0.3"),
        )
        .add(
            Circle::new()
                .set("r", n(star.radius))
                .set("fill", star.color.to_hex())
                .set("filter", "url(#sunGlowFilter)"),
        );
    if let Some(uri) = scene.assets().texture_uri(&star.id) {
        g = g.add(texture(&star.id, &uri, star.radius).set("opacity", "0.6"));
    }
    g.add(
        Text::new(star.content(lang).name.as_str())
            .set("x", "0")
            .set("y", "5")
            .set("text-anchor", "middle")
            .set("fill", "#78350f")
            .set("font-size", "14")
            .set("font-weight", "bold")
            .set("letter-spacing", "1px")
            .set("opacity", "0.8"),
    )
}

fn texture(id: &str, uri: &str, radius: f64) -> Image {
    Image::new()
        .set("href", uri)
        .set("x", n(-radius))
        .set("y", n(-radius))
        .set("width", n(radius * 2.0))
        .set("height", n(radius * 2.0))
        .set("preserveAspectRatio", "xMidYMid slice")
        .set("clip-path", format!("url(#clip-{id})"))
}

fn set_transform(g: Group, t: &LocalTransform) -> Group {
    if t.is_identity() {
        g
    } else {
        g.set("transform", t.to_svg())
    }
}

fn body_group(scene: &Scene, view: &BodyView<'_>, selection_opacity: f64, lang: Language) -> Group {
    let body = view.body;
    let frame = &view.frame;

    let orbit = set_transform(
        Group::new()
            .set("id", format!("orbit-{}", body.id))
            .set("data-body", body.id.as_str())
            .set("data-progress", n(frame.progress)),
        &LocalTransform::rotate(body.argument_of_perihelion),
    )
    .add(
        Path::new()
            .set("d", layout_path(scene, &body.id))
            .set("fill", "none")
            .set("stroke", ORBIT_STROKE)
            .set("stroke-width", "1")
            .set("stroke-opacity", "0.15")
            .set("stroke-dasharray", "4 4")
            .set("pointer-events", "none"),
    );

    let mut carrier = set_transform(
        Group::new(),
        &LocalTransform::translate(frame.local_position),
    );

    if view.selected {
        carrier = carrier.add(
            Circle::new()
                .set("class", "selection")
                .set("r", n(view.selection_radius()))
                .set("fill", "none")
                .set("stroke", "white")
                .set("stroke-width", "1")
                .set("opacity", n(selection_opacity))
                .set("pointer-events", "none"),
        );
    }

    carrier = carrier.add(
        Circle::new()
            .set("class", "hit-area")
            .set("r", n(body.hit_radius()))
            .set("fill", "transparent"),
    );

    let mut tilted = set_transform(Group::new().set("class", "subsystem"), &frame.tilt);
    if let Some(layout) = scene.layout(&body.id) {
        for track in &layout.moons {
            tilted = tilted.add(
                Path::new()
                    .set("class", "moon-orbit")
                    .set("d", track.path.path_data())
                    .set("fill", "none")
                    .set("stroke", "white")
                    .set("stroke-opacity", "0.15")
                    .set("stroke-width", "0.5")
                    .set("pointer-events", "none"),
            );
        }
    }

    let mut label = None;
    for (layer, item) in &view.items {
        match item {
            DrawItem::Ring(arc) => {
                tilted = tilted.add(
                    Path::new()
                        .set("data-layer", layer.name())
                        .set("d", arc.path_data())
                        .set("fill", "none")
                        .set("stroke", arc.stroke.to_hex())
                        .set("stroke-width", n(arc.stroke_width))
                        .set("opacity", n(arc.opacity))
                        .set("pointer-events", "none"),
                );
            }
            DrawItem::Moon(moon) => {
                if let Some(data) = view.moon(moon.index) {
                    tilted = tilted.add(
                        Circle::new()
                            .set("data-layer", layer.name())
                            .set("data-moon", data.name.as_str())
                            .set("cx", n(moon.position.x))
                            .set("cy", n(moon.position.y))
                            .set("r", n(data.radius))
                            .set("fill", data.color.to_hex())
                            .set("opacity", "0.9"),
                    );
                }
            }
            DrawItem::Body => {
                let mut disk = Group::new().set("data-layer", layer.name()).add(
                    Circle::new()
                        .set("r", n(body.radius))
                        .set("fill", body.color.to_hex())
                        .set("filter", "url(#planetGlow)"),
                );
                if let Some(uri) = scene.assets().texture_uri(&body.id) {
                    disk = disk.add(texture(&body.id, &uri, body.radius));
                }
                disk = disk.add(
                    Circle::new()
                        .set("r", n(body.radius))
                        .set("fill", "url(#bodyShade)")
                        .set("pointer-events", "none"),
                );
                tilted = tilted.add(disk);
            }
            DrawItem::Label { visible } => {
                label = Some(label_group(view, *visible, lang));
            }
        }
    }

    carrier = carrier.add(tilted);
    if let Some(label) = label {
        carrier = carrier.add(label);
    }
    orbit.add(carrier)
}

fn layout_path(scene: &Scene, id: &str) -> String {
    scene
        .layout(id)
        .map(|l| l.orbit.path_data())
        .unwrap_or_default()
}

fn label_group(view: &BodyView<'_>, visible: bool, lang: Language) -> Group {
    let content = view.body.content(lang);
    let local = view
        .frame
        .label
        .links()
        .last()
        .copied()
        .unwrap_or_default();

    let mut tag = Element::new("tspan");
    tag.assign("fill", LABEL_TAG);
    tag.assign("font-size", "10");
    tag.append(TextNode::new(format!("· {}", content.feature)));

    set_transform(Group::new(), &local)
        .set("class", "label")
        .set("data-layer", "label")
        .set("data-label", if visible { "visible" } else { "hidden" })
        .set("opacity", if visible { "1" } else { "0" })
        .add(
            Rect::new()
                .set("x", "-60")
                .set("y", "-10")
                .set("width", "120")
                .set("height", "20")
                .set("rx", "10")
                .set("fill", LABEL_BG)
                .set("fill-opacity", "0.8")
                .set("pointer-events", "none"),
        )
        .add(
            Text::new(format!("{} ", content.name))
                .set("x", "0")
                .set("y", "4")
                .set("text-anchor", "middle")
                .set("fill", "white")
                .set("font-size", "11")
                .set("font-weight", "500")
                .set("pointer-events", "none")
                .add(tag),
        )
}

fn footer(x: f64, bottom: f64, lang: Language) -> Text {
    let note = match lang {
        Language::En => "* Orbit scales and speeds adjusted for visualization purposes.",
        Language::Zh => "* 轨道大小和速度为可视化效果已做调整，非真实比例。",
    };
    Text::new(note)
        .set("class", "disclaimer")
        .set("x", n(x + 16.0))
        .set("y", n(bottom - 16.0))
        .set("fill", "#64748b")
        .set("font-size", "12")
        .set("font-family", "monospace")
        .set("opacity", "0.5")
        .set("pointer-events", "none")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(view: &ViewState, t: f64) -> String {
        render_svg(&Scene::solar_system(), t, view)
    }

    fn body_markup<'a>(svg: &'a str, id: &str) -> &'a str {
        let start = svg.find(&format!("id=\"orbit-{id}\"")).unwrap();
        let rest = &svg[start..];
        let end = rest[1..].find("id=\"orbit-").map(|e| e + 1).unwrap_or(rest.len());
        &rest[..end]
    }

    #[test]
    fn backdrop_sits_behind_starfield() {
        let svg = render(&ViewState::default(), 0.0);
        let backdrop = svg.find("class=\"backdrop\"").unwrap();
        let stars = svg.find("class=\"starfield\"").unwrap();
        assert!(backdrop < stars);
        assert!(svg.contains("/assets/textures/2k_stars_milky_way.jpg"));

        let bare = Scene::new(
            crate::catalog::Catalog::solar_system(),
            crate::assets::manifest::AssetManifest::default(),
            crate::core::scene::SceneConfig::default(),
        );
        let svg = render_svg(&bare, 0.0, &ViewState::default());
        assert!(!svg.contains("class=\"backdrop\""));
    }

    #[test]
    fn document_has_fixed_view_box() {
        let svg = render(&ViewState::default(), 0.0);
        assert!(svg.contains("viewBox=\"-650 -650 1300 1300\""));
        assert!(svg.contains("preserveAspectRatio=\"xMidYMid meet\""));
        assert!(svg.contains("太阳"));
        assert!(svg.contains("非真实比例"));
    }

    #[test]
    fn saturn_layers_paint_back_to_front() {
        let svg = render(&ViewState::default(), 12.0);
        let saturn = body_markup(&svg, "saturn");
        let back = saturn.find("data-layer=\"back-rings\"").unwrap();
        let disk = saturn.find("data-layer=\"body\"").unwrap();
        let front = saturn.find("data-layer=\"front-rings\"").unwrap();
        let label = saturn.find("data-layer=\"label\"").unwrap();
        assert!(back < disk && disk < front && front < label);
    }

    #[test]
    fn orbit_path_is_dashed_ellipse() {
        let svg = render(&ViewState::default(), 0.0);
        let earth = body_markup(&svg, "earth");
        assert!(earth.contains("M 137.662 0 A 140 139.98 0 1 0 -142.338 0"));
        assert!(earth.contains("stroke-dasharray=\"4 4\""));
        assert!(earth.contains("transform=\"rotate(102.94)\""));
    }

    #[test]
    fn label_and_selection_follow_view_state() {
        let view = ViewState {
            selected: Some("earth".to_string()),
            hovered: None,
            language: Language::En,
        };
        let svg = render(&view, 0.0);
        let earth = body_markup(&svg, "earth");
        assert!(earth.contains("class=\"selection\""));
        assert!(earth.contains("r=\"37.5\""));
        assert!(earth.contains("Earth"));
        assert!(earth.contains("· Life"));
        let mars = body_markup(&svg, "mars");
        assert!(!mars.contains("class=\"selection\""));
        assert!(mars.contains("data-label=\"hidden\""));
        assert!(earth.contains("data-label=\"visible\""));
    }

    #[test]
    fn textures_are_clipped_over_flat_fill() {
        let svg = render(&ViewState::default(), 0.0);
        let earth = body_markup(&svg, "earth");
        let fill = earth.find("fill=\"#3b82f6\"").unwrap();
        let image = earth.find("clip-path=\"url(#clip-earth)\"").unwrap();
        assert!(fill < image);
        assert!(svg.contains("id=\"clip-earth\""));
    }
}
