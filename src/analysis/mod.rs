mod analyst;
mod types;

pub use analyst::*;
pub use types::*;
