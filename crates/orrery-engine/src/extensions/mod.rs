// extensions/mod.rs
//
// Small math helpers shared by the layout and the renderer.
// No dependencies on the catalog or the scene.

pub mod easing;
pub mod transform;

pub use easing::{Easing, lerp, ease};
pub use transform::{LocalTransform, TransformChain, normalize_degrees};
