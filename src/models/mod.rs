pub mod agenda;
pub mod alignment;
pub mod transcript;

pub use agenda::*;
pub use alignment::*;
pub use transcript::*;
