pub mod payload;
pub mod store;
pub mod text;

pub use payload::*;
pub use store::*;
pub use text::*;
