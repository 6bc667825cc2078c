//! Expression evaluation services for the boolean calculator.
//!
//! This module ties the converter and the evaluator together and provides
//! the fixed truth table of the five gates shown by the shell.

use super::errors::{ExpressionError, ExpressionResult};
use super::evaluator::evaluate_postfix;
use super::models::{Operator, SymbolConfig, Token};
use super::parser::{convert_to_postfix, format_postfix};

/// Outcome of a successful evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// The expression as typed
    pub expression: String,
    /// Postfix form rendered with the symbols active at evaluation time
    pub postfix: String,
    /// Final value
    pub result: bool,
    /// Symbols the expression was evaluated under
    pub symbols: SymbolConfig,
}

impl Evaluation {
    /// The result as written with the symbols of its own evaluation.
    pub fn result_symbol(&self) -> char {
        self.symbols.format_bool(self.result)
    }
}

/// Runs the convert-then-evaluate pipeline under one symbol configuration.
///
/// The evaluator borrows the configuration for its whole lifetime, so a
/// single evaluation can never observe a half-updated pair of symbols.
///
/// # Examples
///
/// ```
/// use boolterm::domain::{ExpressionEvaluator, SymbolConfig};
///
/// let config = SymbolConfig::default();
/// let evaluator = ExpressionEvaluator::new(&config);
///
/// assert_eq!(evaluator.evaluate("T | F & F").unwrap().result, true);
/// assert_eq!(evaluator.evaluate("(T | F) & F").unwrap().result, false);
/// assert!(evaluator.evaluate("T & & F").is_err());
/// ```
pub struct ExpressionEvaluator<'a> {
    config: &'a SymbolConfig,
}

impl<'a> ExpressionEvaluator<'a> {
    pub fn new(config: &'a SymbolConfig) -> Self {
        Self { config }
    }

    /// Converts and evaluates `expression`.
    pub fn evaluate(&self, expression: &str) -> ExpressionResult<Evaluation> {
        match self.run(expression) {
            Ok((tokens, result)) => {
                tracing::debug!(expression, result, "expression evaluated");
                Ok(Evaluation {
                    expression: expression.to_string(),
                    postfix: format_postfix(&tokens, self.config),
                    result,
                    symbols: *self.config,
                })
            }
            Err(error) => {
                tracing::warn!(expression, %error, kind = ?error.kind(), "expression rejected");
                Err(error)
            }
        }
    }

    /// Evaluates and returns only the boolean.
    pub fn evaluate_value(&self, expression: &str) -> ExpressionResult<bool> {
        self.run(expression).map(|(_, result)| result)
    }

    fn run(&self, expression: &str) -> Result<(Vec<Token>, bool), ExpressionError> {
        let tokens = convert_to_postfix(expression, self.config)?;
        let result = evaluate_postfix(&tokens, self.config)?;
        Ok((tokens, result))
    }
}

/// One row of the gate truth table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TruthTableRow {
    pub a: bool,
    pub b: bool,
    pub and: bool,
    pub or: bool,
    pub nand: bool,
    pub xor: bool,
    pub not_a: bool,
    pub not_b: bool,
}

/// Truth table of AND, OR, NAND, XOR and NOT over two inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateTruthTable {
    pub rows: Vec<TruthTableRow>,
}

impl GateTruthTable {
    pub const HEADERS: [&'static str; 8] = ["A", "B", "AND", "OR", "NAND", "XOR", "NOT A", "NOT B"];

    /// Builds the four rows in (F,F), (F,T), (T,F), (T,T) order using the evaluator's own gates.
    pub fn generate() -> Self {
        let gate = |op: Operator, a: bool, b: bool| op.apply_binary(a, b).unwrap_or_default();
        let not = |a: bool| Operator::Not.apply_unary(a).unwrap_or_default();

        let rows = [false, true]
            .into_iter()
            .flat_map(|a| [false, true].into_iter().map(move |b| (a, b)))
            .map(|(a, b)| TruthTableRow {
                a,
                b,
                and: gate(Operator::And, a, b),
                or: gate(Operator::Or, a, b),
                nand: gate(Operator::Nand, a, b),
                xor: gate(Operator::Xor, a, b),
                not_a: not(a),
                not_b: not(b),
            })
            .collect();

        Self { rows }
    }

    /// Renders every row as strings, booleans spelled with `config`.
    pub fn to_string_rows(&self, config: &SymbolConfig) -> Vec<[String; 8]> {
        self.rows
            .iter()
            .map(|row| {
                [row.a, row.b, row.and, row.or, row.nand, row.xor, row.not_a, row.not_b]
                    .map(|value| config.format_bool(value).to_string())
            })
            .collect()
    }
}
