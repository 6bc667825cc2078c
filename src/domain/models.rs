use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::ConfigError;

/// Characters that the scanner always treats as grammar, never as literals.
pub const RESERVED_SYMBOLS: [char; 7] = ['!', '&', '|', '@', '$', '(', ')'];

/// The pair of characters that spell `true` and `false` in an expression.
///
/// A configuration is an immutable value: the shell builds a new one when the
/// user redefines a symbol and hands it to each conversion and evaluation.
/// Both characters are guaranteed distinct, non-whitespace and outside
/// [`RESERVED_SYMBOLS`].
///
/// # Examples
///
/// ```
/// use boolterm::domain::SymbolConfig;
///
/// let config = SymbolConfig::default();
/// assert_eq!(config.true_char(), 'T');
/// assert_eq!(config.false_char(), 'F');
///
/// let binary = SymbolConfig::new('1', '0').unwrap();
/// assert_eq!(binary.literal_value('1'), Some(true));
/// assert!(SymbolConfig::new('x', 'x').is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSymbols", into = "RawSymbols")]
pub struct SymbolConfig {
    true_char: char,
    false_char: char,
}

impl SymbolConfig {
    pub fn new(true_char: char, false_char: char) -> Result<Self, ConfigError> {
        Self::check_symbol(true_char)?;
        Self::check_symbol(false_char)?;
        if true_char == false_char {
            return Err(ConfigError::SameSymbol(true_char));
        }

        Ok(Self { true_char, false_char })
    }

    /// Returns a copy with a new `true` character, validated against the current `false` one.
    pub fn with_true(self, true_char: char) -> Result<Self, ConfigError> {
        Self::new(true_char, self.false_char)
    }

    /// Returns a copy with a new `false` character, validated against the current `true` one.
    pub fn with_false(self, false_char: char) -> Result<Self, ConfigError> {
        Self::new(self.true_char, false_char)
    }

    pub fn true_char(&self) -> char {
        self.true_char
    }

    pub fn false_char(&self) -> char {
        self.false_char
    }

    /// Maps a character to the boolean it spells, if it is one of the two literals.
    pub fn literal_value(&self, ch: char) -> Option<bool> {
        if ch == self.true_char {
            Some(true)
        } else if ch == self.false_char {
            Some(false)
        } else {
            None
        }
    }

    /// Renders a boolean with the configured characters.
    pub fn format_bool(&self, value: bool) -> char {
        if value { self.true_char } else { self.false_char }
    }

    fn check_symbol(ch: char) -> Result<(), ConfigError> {
        if ch.is_whitespace() {
            Err(ConfigError::Whitespace)
        } else if RESERVED_SYMBOLS.contains(&ch) {
            Err(ConfigError::Reserved(ch))
        } else {
            Ok(())
        }
    }
}

impl Default for SymbolConfig {
    fn default() -> Self {
        Self {
            true_char: 'T',
            false_char: 'F',
        }
    }
}

/// Reads a symbol typed at a prompt: exactly one non-whitespace, non-reserved character.
pub fn parse_symbol(input: &str) -> Result<char, ConfigError> {
    let mut chars = input.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => {
            SymbolConfig::check_symbol(ch)?;
            Ok(ch)
        }
        _ => Err(ConfigError::NotSingleCharacter(input.chars().count())),
    }
}

/// Unvalidated on-disk form of [`SymbolConfig`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawSymbols {
    #[serde(rename = "true")]
    true_char: char,
    #[serde(rename = "false")]
    false_char: char,
}

impl TryFrom<RawSymbols> for SymbolConfig {
    type Error = ConfigError;

    fn try_from(raw: RawSymbols) -> Result<Self, Self::Error> {
        SymbolConfig::new(raw.true_char, raw.false_char)
    }
}

impl From<SymbolConfig> for RawSymbols {
    fn from(config: SymbolConfig) -> Self {
        Self {
            true_char: config.true_char,
            false_char: config.false_char,
        }
    }
}

/// How repeated applications of equal-precedence operators group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

/// The five boolean operators understood by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Not,
    And,
    Or,
    Nand,
    Xor,
}

/// Static description of one operator: its spelling, arity and precedence rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorInfo {
    pub operator: Operator,
    pub symbol: char,
    pub name: &'static str,
    pub arity: usize,
    pub precedence: u8,
    pub associativity: Associativity,
}

/// Operator table, indexed by `Operator as usize`.
///
/// Higher precedence binds tighter: NOT > AND = XOR > OR = NAND.
static OPERATOR_TABLE: [OperatorInfo; 5] = [
    OperatorInfo { operator: Operator::Not, symbol: '!', name: "NOT", arity: 1, precedence: 3, associativity: Associativity::Right },
    OperatorInfo { operator: Operator::And, symbol: '&', name: "AND", arity: 2, precedence: 2, associativity: Associativity::Left },
    OperatorInfo { operator: Operator::Or, symbol: '|', name: "OR", arity: 2, precedence: 1, associativity: Associativity::Left },
    OperatorInfo { operator: Operator::Nand, symbol: '@', name: "NAND", arity: 2, precedence: 1, associativity: Associativity::Left },
    OperatorInfo { operator: Operator::Xor, symbol: '$', name: "XOR", arity: 2, precedence: 2, associativity: Associativity::Left },
];

impl Operator {
    pub const ALL: [Operator; 5] = [
        Operator::Not,
        Operator::And,
        Operator::Or,
        Operator::Nand,
        Operator::Xor,
    ];

    pub fn info(self) -> &'static OperatorInfo {
        &OPERATOR_TABLE[self as usize]
    }

    pub fn from_symbol(ch: char) -> Option<Self> {
        OPERATOR_TABLE
            .iter()
            .find(|info| info.symbol == ch)
            .map(|info| info.operator)
    }

    pub fn symbol(self) -> char {
        self.info().symbol
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    pub fn precedence(self) -> u8 {
        self.info().precedence
    }

    pub fn associativity(self) -> Associativity {
        self.info().associativity
    }

    pub fn is_unary(self) -> bool {
        self.info().arity == 1
    }

    /// Whether `self`, arriving while `top` sits on the operator stack, forces `top` out first.
    pub fn yields_to(self, top: Operator) -> bool {
        match self.associativity() {
            Associativity::Left => self.precedence() <= top.precedence(),
            Associativity::Right => self.precedence() < top.precedence(),
        }
    }

    /// Applies a unary gate. Returns `None` for binary operators.
    pub fn apply_unary(self, value: bool) -> Option<bool> {
        match self {
            Operator::Not => Some(!value),
            Operator::And | Operator::Or | Operator::Nand | Operator::Xor => None,
        }
    }

    /// Applies a binary gate. Returns `None` for unary operators.
    pub fn apply_binary(self, left: bool, right: bool) -> Option<bool> {
        match self {
            Operator::Not => None,
            Operator::And => Some(left && right),
            Operator::Or => Some(left || right),
            Operator::Nand => Some(!(left && right)),
            Operator::Xor => Some(left != right),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ('{}')", self.name(), self.symbol())
    }
}

/// A scanned unit of an expression.
///
/// Postfix sequences only ever contain `Literal` and `Operator` tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Literal(bool),
    Operator(Operator),
    LeftParen,
    RightParen,
}

impl Token {
    /// Renders the token the way a user would type it under `config`.
    pub fn to_char(&self, config: &SymbolConfig) -> char {
        match self {
            Token::Literal(value) => config.format_bool(*value),
            Token::Operator(op) => op.symbol(),
            Token::LeftParen => '(',
            Token::RightParen => ')',
        }
    }
}

pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// User preferences persisted between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub symbols: SymbolConfig,
    pub history_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            symbols: SymbolConfig::default(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

/// A previously evaluated expression, kept with the symbols it was written in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub expression: String,
    pub postfix: String,
    pub result: bool,
    pub symbols: SymbolConfig,
}

impl HistoryEntry {
    /// The result spelled with the symbols in force when it was computed.
    pub fn result_symbol(&self) -> char {
        self.symbols.format_bool(self.result)
    }
}

/// Everything saved by "save session": settings plus the evaluation history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}
