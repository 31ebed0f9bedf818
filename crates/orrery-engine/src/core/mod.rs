pub mod orbit;
pub mod scene;
pub mod time;
