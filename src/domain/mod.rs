pub mod models;
pub mod parser;
pub mod evaluator;
pub mod services;
pub mod errors;

pub use models::*;
pub use parser::{convert_to_postfix, format_postfix, Lexer, Scanned};
pub use evaluator::evaluate_postfix;
pub use services::*;
pub use errors::*;
