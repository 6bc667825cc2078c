//! boolterm - Terminal Boolean Expression Evaluator Library
//!
//! Converts infix boolean expressions to postfix with the shunting-yard
//! algorithm and evaluates them, with a terminal shell built on ratatui.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
