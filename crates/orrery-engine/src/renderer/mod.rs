pub mod svg;

pub use self::svg::{render_document, render_svg};
