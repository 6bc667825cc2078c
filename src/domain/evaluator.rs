//! Stack-based evaluation of postfix token sequences.

use super::errors::EvalError;
use super::models::{SymbolConfig, Token};

/// Reduces a postfix sequence to a single boolean.
///
/// The sequence is checked as it is consumed, so hand-built or truncated
/// sequences are reported as errors rather than trusted. `config` is the
/// configuration the sequence was converted under; literals already carry
/// their value, so it only renders tokens in logs and errors.
///
/// # Examples
///
/// ```
/// use boolterm::domain::{evaluate_postfix, Operator, SymbolConfig, Token};
///
/// let config = SymbolConfig::default();
/// let tokens = [Token::Literal(true), Token::Literal(false), Token::Operator(Operator::Nand)];
/// assert_eq!(evaluate_postfix(&tokens, &config), Ok(true));
///
/// assert!(evaluate_postfix(&[Token::Operator(Operator::Not)], &config).is_err());
/// ```
pub fn evaluate_postfix(tokens: &[Token], config: &SymbolConfig) -> Result<bool, EvalError> {
    let mut stack: Vec<bool> = Vec::with_capacity(tokens.len());

    for token in tokens {
        match token {
            Token::Literal(value) => stack.push(*value),

            Token::Operator(op) if op.is_unary() => {
                let value = stack.pop().ok_or(EvalError::MissingOperandForNot)?;
                stack.extend(op.apply_unary(value));
            }

            Token::Operator(op) => {
                let missing = || EvalError::MissingOperandForBinary { op: *op };
                let right = stack.pop().ok_or_else(missing)?;
                let left = stack.pop().ok_or_else(missing)?;
                stack.extend(op.apply_binary(left, right));
            }

            Token::LeftParen | Token::RightParen => {
                let symbol = token.to_char(config);
                tracing::warn!(token = %symbol, "parenthesis in postfix sequence");
                return Err(EvalError::UnexpectedParenthesis { symbol });
            }
        }

        tracing::trace!(
            token = %token.to_char(config),
            depth = stack.len(),
            "postfix token consumed"
        );
    }

    match stack.len() {
        0 => Err(EvalError::EmptyResult),
        1 => Ok(stack[0]),
        n => Err(EvalError::UnconsumedOperands { count: n - 1 }),
    }
}
