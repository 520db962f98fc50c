pub mod colors;
pub mod formatting;
pub mod props;

pub use colors::*;
pub use formatting::*;
pub use props::*;
