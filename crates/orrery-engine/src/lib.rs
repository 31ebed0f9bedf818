pub mod assets;
pub mod catalog;
pub mod components;
pub mod core;
pub mod extensions;
pub mod panel;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use assets::manifest::{AssetManifest, BodyAssets};
pub use catalog::{BodyContent, Catalog, CatalogError, CelestialBody, Language, Moon, RingBand, RingSystem, Star};
pub use components::color::Color;
pub use components::layer::DrawLayer;
pub use core::orbit::{Ellipse, MoonPath, OrbitPath, MOON_FORESHORTENING};
pub use core::scene::{BodyView, DrawItem, Scene, SceneConfig, SceneFrame, ViewBox, selection_pulse};
pub use core::time::{AnimationClock, cycle_fraction, moon_progress, orbit_progress, spin_angle};
pub use panel::{AskFailure, AskTicket, ChatMessage, Explorer, InfoCard, InfoPanel, Role, ViewState};
pub use panel::prompt::{build_prompt, DEFAULT_MODEL};
pub use renderer::{render_document, render_svg};
pub use systems::layout::{BodyFrame, MoonFrame, OrbitLayout};
pub use systems::occlusion::{moon_occlusion, Occlusion, RingArc};

// Extensions: decoupled math helpers
pub use extensions::{Easing, lerp, ease, LocalTransform, TransformChain};
