pub mod resolver;
pub mod session;
pub mod sort;
pub mod types;

pub use resolver::*;
pub use session::*;
pub use sort::*;
pub use types::*;
