pub mod client;
pub mod prompt;
pub mod types;

pub use client::*;
pub use prompt::INSTRUCTION_PROMPT;
pub use types::*;
