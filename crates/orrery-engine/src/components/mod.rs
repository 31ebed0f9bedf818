pub mod color;
pub mod layer;
