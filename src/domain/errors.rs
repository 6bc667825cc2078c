use thiserror::Error;

use super::models::Operator;

/// Broad category of an expression failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A character that is neither a literal, an operator nor a parenthesis.
    Lexical,
    /// Well-formed characters in an ill-formed arrangement.
    Syntax,
    /// A postfix sequence that cannot be reduced to a single value.
    Evaluation,
}

/// Errors raised while converting an infix expression to postfix.
///
/// Positions are zero-based character indices into the original input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unrecognized character '{ch}' at position {position}")]
    UnrecognizedCharacter { ch: char, position: usize },

    #[error("operand follows operand at position {position}")]
    OperandFollowsOperand { position: usize },

    #[error("missing operand before operator {op} at position {position}")]
    MissingOperandBeforeOperator { op: Operator, position: usize },

    #[error("consecutive operators without intervening operand: {op} at position {position}")]
    ConsecutiveOperators { op: Operator, position: usize },

    #[error("missing operand before ')' at position {position}")]
    MissingOperandBeforeParen { position: usize },

    #[error("missing operand after operator")]
    MissingOperandAfterOperator,

    #[error("mismatched parentheses at position {position}")]
    MismatchedParentheses { position: usize },

    #[error("no operands or operators present")]
    EmptyExpression,
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::UnrecognizedCharacter { .. } => ErrorKind::Lexical,
            _ => ErrorKind::Syntax,
        }
    }
}

/// Errors raised while reducing a postfix sequence.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("missing operand for NOT")]
    MissingOperandForNot,

    #[error("missing operand for binary operator {op}")]
    MissingOperandForBinary { op: Operator },

    #[error("parenthesis '{symbol}' in postfix sequence")]
    UnexpectedParenthesis { symbol: char },

    #[error("postfix sequence produced no value")]
    EmptyResult,

    #[error("postfix sequence left {count} unconsumed operands")]
    UnconsumedOperands { count: usize },
}

impl EvalError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Evaluation
    }
}

/// Any failure of the convert-then-evaluate pipeline.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExpressionError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl ExpressionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExpressionError::Parse(e) => e.kind(),
            ExpressionError::Eval(e) => e.kind(),
        }
    }
}

/// Rejected true/false symbol definitions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("'true' and 'false' cannot both be '{0}'")]
    SameSymbol(char),

    #[error("'{0}' is reserved for operators and parentheses")]
    Reserved(char),

    #[error("symbols cannot be whitespace")]
    Whitespace,

    #[error("enter exactly one character, got {0}")]
    NotSingleCharacter(usize),
}

pub type ExpressionResult<T> = Result<T, ExpressionError>;
