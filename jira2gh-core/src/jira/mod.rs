//! Reading JIRA XML exports

mod export;
mod markup;

pub use export::{parse_export, read_export};
pub use markup::to_plain_text;
