pub mod backdrop;
pub mod layout;
pub mod occlusion;
pub mod rng;
