mod parser;
mod types;

pub use parser::{DELIMITERS, DelimitedSectionParser, ReportParser, extract};
pub use types::*;
