pub mod error;
pub mod output;
pub mod parser;
pub mod reshape;
pub mod stats;

pub use error::TransformError;
pub use stats::{ReshapedDocument, StatRecord};
