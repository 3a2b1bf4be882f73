pub mod fields;
pub mod index;

pub use fields::*;
pub use index::*;
