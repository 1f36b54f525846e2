pub mod align;
pub mod normalize;

pub use align::*;
pub use normalize::*;
