pub mod model;
pub mod phase;
pub mod validation;

// Re-export commonly used items
pub use model::*;
pub use phase::Phase;
