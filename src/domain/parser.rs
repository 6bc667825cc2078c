//! Infix-to-postfix conversion for boolean expressions.
//!
//! Expressions are scanned one character at a time; there are no multi-character
//! tokens. The grammar recognised is:
//!
//! ```bnf
//! Expression ::= Operand ( BinaryOp Operand )*
//! Operand    ::= "!"* ( Literal | "(" Expression ")" )
//! BinaryOp   ::= "&" | "|" | "@" | "$"
//! Literal    ::= <configured true char> | <configured false char>
//! ```
//!
//! Whitespace may appear anywhere and is ignored. Operator precedence, from
//! tightest to loosest:
//! - `!` NOT (unary, right-associative)
//! - `&` AND, `$` XOR (left-associative)
//! - `|` OR, `@` NAND (left-associative)
//!
//! Conversion uses the shunting-yard algorithm while an `expect_operand` flag
//! checks the grammar above, so every sequence this module returns is a valid
//! postfix program for [`super::evaluator::evaluate_postfix`].

use super::errors::ParseError;
use super::models::{Operator, SymbolConfig, Token};

/// A token together with the character index where it was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scanned {
    pub token: Token,
    pub position: usize,
}

/// Lexical analyzer that classifies characters under a symbol configuration.
pub struct Lexer<'a> {
    input: Vec<char>,
    position: usize,
    config: &'a SymbolConfig,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &str, config: &'a SymbolConfig) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            config,
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.input.get(self.position) {
            if ch.is_whitespace() {
                self.position += 1;
            } else {
                break;
            }
        }
    }

    /// Gets the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Result<Option<Scanned>, ParseError> {
        self.skip_whitespace();

        let Some(&ch) = self.input.get(self.position) else {
            return Ok(None);
        };
        let position = self.position;
        self.position += 1;

        let token = if let Some(value) = self.config.literal_value(ch) {
            Token::Literal(value)
        } else if let Some(op) = Operator::from_symbol(ch) {
            Token::Operator(op)
        } else {
            match ch {
                '(' => Token::LeftParen,
                ')' => Token::RightParen,
                _ => return Err(ParseError::UnrecognizedCharacter { ch, position }),
            }
        };

        Ok(Some(Scanned { token, position }))
    }

    /// Scans the whole input.
    pub fn tokenize(mut self) -> Result<Vec<Scanned>, ParseError> {
        let mut tokens = Vec::new();
        while let Some(scanned) = self.next_token()? {
            tokens.push(scanned);
        }
        Ok(tokens)
    }
}

/// Converts an infix expression to postfix order.
///
/// The input is only read; the result depends on nothing but the expression
/// and the configuration.
///
/// # Examples
///
/// ```
/// use boolterm::domain::{convert_to_postfix, format_postfix, SymbolConfig};
///
/// let config = SymbolConfig::default();
/// let postfix = convert_to_postfix("T | F & F", &config).unwrap();
/// assert_eq!(format_postfix(&postfix, &config), "T F F & |");
///
/// assert!(convert_to_postfix("(T & F", &config).is_err());
/// ```
pub fn convert_to_postfix(expression: &str, config: &SymbolConfig) -> Result<Vec<Token>, ParseError> {
    if expression.chars().all(char::is_whitespace) {
        return Err(ParseError::EmptyExpression);
    }

    let mut lexer = Lexer::new(expression, config);
    let mut output = Vec::with_capacity(expression.len());
    // parentheses keep their position so an unmatched '(' can be reported
    let mut operators: Vec<Scanned> = Vec::new();
    let mut expect_operand = true;
    let mut previous: Option<Token> = None;

    while let Some(scanned) = lexer.next_token()? {
        let Scanned { token, position } = scanned;

        match token {
            Token::Literal(_) => {
                if !expect_operand {
                    return Err(ParseError::OperandFollowsOperand { position });
                }
                output.push(token);
                expect_operand = false;
            }

            Token::Operator(op) => {
                if op.is_unary() {
                    if !expect_operand {
                        return Err(ParseError::ConsecutiveOperators { op, position });
                    }
                } else if expect_operand {
                    return Err(match previous {
                        Some(Token::Operator(_)) => ParseError::ConsecutiveOperators { op, position },
                        _ => ParseError::MissingOperandBeforeOperator { op, position },
                    });
                }

                while let Some(Scanned { token: Token::Operator(top), .. }) = operators.last() {
                    if !op.yields_to(*top) {
                        break;
                    }
                    tracing::trace!(operator = top.name(), "pop on precedence");
                    output.push(Token::Operator(*top));
                    operators.pop();
                }
                operators.push(scanned);
                expect_operand = true;
            }

            Token::LeftParen => {
                if !expect_operand {
                    return Err(ParseError::OperandFollowsOperand { position });
                }
                operators.push(scanned);
            }

            Token::RightParen => {
                if expect_operand {
                    return Err(ParseError::MissingOperandBeforeParen { position });
                }
                loop {
                    match operators.pop() {
                        Some(Scanned { token: Token::LeftParen, .. }) => break,
                        Some(Scanned { token, .. }) => output.push(token),
                        None => return Err(ParseError::MismatchedParentheses { position }),
                    }
                }
                expect_operand = false;
            }
        }

        previous = Some(token);
    }

    if expect_operand {
        return Err(ParseError::MissingOperandAfterOperator);
    }

    while let Some(Scanned { token, position }) = operators.pop() {
        if token == Token::LeftParen {
            return Err(ParseError::MismatchedParentheses { position });
        }
        output.push(token);
    }

    Ok(output)
}

/// Renders a token sequence with the configured literal characters, space separated.
pub fn format_postfix(tokens: &[Token], config: &SymbolConfig) -> String {
    tokens
        .iter()
        .map(|token| token.to_char(config).to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn postfix(expression: &str) -> String {
        let config = SymbolConfig::default();
        let tokens = convert_to_postfix(expression, &config).unwrap();
        format_postfix(&tokens, &config)
    }

    fn error(expression: &str) -> ParseError {
        convert_to_postfix(expression, &SymbolConfig::default()).unwrap_err()
    }

    #[test]
    fn test_lexer_classifies_characters() {
        let config = SymbolConfig::default();
        let tokens: Vec<Token> = Lexer::new("T F ! & | @ $ ( )", &config)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|s| s.token)
            .collect();

        assert_eq!(
            tokens,
            vec![
                Token::Literal(true),
                Token::Literal(false),
                Token::Operator(Operator::Not),
                Token::Operator(Operator::And),
                Token::Operator(Operator::Or),
                Token::Operator(Operator::Nand),
                Token::Operator(Operator::Xor),
                Token::LeftParen,
                Token::RightParen,
            ]
        );
    }

    #[test]
    fn test_lexer_positions_count_characters() {
        let config = SymbolConfig::default();
        let mut lexer = Lexer::new("  T\t&F", &config);

        assert_eq!(lexer.next_token().unwrap(), Some(Scanned { token: Token::Literal(true), position: 2 }));
        assert_eq!(
            lexer.next_token().unwrap(),
            Some(Scanned { token: Token::Operator(Operator::And), position: 4 })
        );
        assert_eq!(lexer.next_token().unwrap(), Some(Scanned { token: Token::Literal(false), position: 5 }));
        assert_eq!(lexer.next_token().unwrap(), None);
    }

    #[test]
    fn test_lexer_error_handling() {
        let config = SymbolConfig::default();
        let mut lexer = Lexer::new("T # F", &config);
        assert!(lexer.next_token().is_ok());
        assert_eq!(
            lexer.next_token(),
            Err(ParseError::UnrecognizedCharacter { ch: '#', position: 2 })
        );
    }

    #[test]
    fn test_lexer_is_case_sensitive() {
        assert_eq!(error("t"), ParseError::UnrecognizedCharacter { ch: 't', position: 0 });
    }

    #[test]
    fn test_custom_symbols() {
        let config = SymbolConfig::new('1', '0').unwrap();
        let tokens = convert_to_postfix("1 & 0", &config).unwrap();
        assert_eq!(
            tokens,
            vec![Token::Literal(true), Token::Literal(false), Token::Operator(Operator::And)]
        );
        assert_eq!(format_postfix(&tokens, &config), "1 0 &");

        // the default letters are no longer literals
        assert_eq!(
            convert_to_postfix("T", &config),
            Err(ParseError::UnrecognizedCharacter { ch: 'T', position: 0 })
        );
    }

    #[test]
    fn test_operator_precedence() {
        assert_eq!(postfix("T|F&F"), "T F F & |");
        assert_eq!(postfix("T&F|F"), "T F & F |");
        assert_eq!(postfix("T@F$T"), "T F T $ @");
        assert_eq!(postfix("!T&F"), "T ! F &");
    }

    #[test]
    fn test_equal_tiers_are_left_associative() {
        assert_eq!(postfix("T&F$T"), "T F & T $");
        assert_eq!(postfix("T$F&T"), "T F $ T &");
        assert_eq!(postfix("T|F@T"), "T F | T @");
        assert_eq!(postfix("T@F|T"), "T F @ T |");
        assert_eq!(postfix("T&F&T"), "T F & T &");
    }

    #[test]
    fn test_not_is_right_associative() {
        assert_eq!(postfix("!!T"), "T ! !");
        assert_eq!(postfix("!!!F|T"), "F ! ! ! T |");
        assert_eq!(postfix("T&!F"), "T F ! &");
    }

    #[test]
    fn test_parentheses_override_precedence() {
        assert_eq!(postfix("(T|F)&F"), "T F | F &");
        assert_eq!(postfix("!(T&F)"), "T F & !");
        assert_eq!(postfix("((T))"), "T");
        assert_eq!(postfix("(T@(F$T))|F"), "T F T $ @ F |");
    }

    #[test]
    fn test_input_is_not_mutated() {
        let config = SymbolConfig::default();
        let expression = String::from(" T & F ");
        let first = convert_to_postfix(&expression, &config).unwrap();
        let second = convert_to_postfix(&expression, &config).unwrap();
        assert_eq!(expression, " T & F ");
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_expression() {
        assert_eq!(error(""), ParseError::EmptyExpression);
        assert_eq!(error("  \t "), ParseError::EmptyExpression);
    }

    #[test]
    fn test_operand_follows_operand() {
        assert_eq!(error("TF"), ParseError::OperandFollowsOperand { position: 1 });
        assert_eq!(error("T (F)"), ParseError::OperandFollowsOperand { position: 2 });
        assert_eq!(error("(T)F"), ParseError::OperandFollowsOperand { position: 3 });
    }

    #[test]
    fn test_operator_without_left_operand() {
        assert_eq!(
            error("&T"),
            ParseError::MissingOperandBeforeOperator { op: Operator::And, position: 0 }
        );
        assert_eq!(
            error("(|F)"),
            ParseError::MissingOperandBeforeOperator { op: Operator::Or, position: 1 }
        );
        assert_eq!(
            error("T&&F"),
            ParseError::ConsecutiveOperators { op: Operator::And, position: 2 }
        );
        assert_eq!(
            error("!$T"),
            ParseError::ConsecutiveOperators { op: Operator::Xor, position: 1 }
        );
    }

    #[test]
    fn test_not_after_operand() {
        assert_eq!(
            error("T!F"),
            ParseError::ConsecutiveOperators { op: Operator::Not, position: 1 }
        );
        assert_eq!(
            error("(T)!"),
            ParseError::ConsecutiveOperators { op: Operator::Not, position: 3 }
        );
    }

    #[test]
    fn test_missing_trailing_operand() {
        assert_eq!(error("T&"), ParseError::MissingOperandAfterOperator);
        assert_eq!(error("!"), ParseError::MissingOperandAfterOperator);
        assert_eq!(error("T | !"), ParseError::MissingOperandAfterOperator);
        assert_eq!(error("("), ParseError::MissingOperandAfterOperator);
    }

    #[test]
    fn test_closing_paren_without_operand() {
        assert_eq!(error("()"), ParseError::MissingOperandBeforeParen { position: 1 });
        assert_eq!(error("(T&)"), ParseError::MissingOperandBeforeParen { position: 3 });
    }

    #[test]
    fn test_mismatched_parentheses() {
        assert_eq!(error("(T&F"), ParseError::MismatchedParentheses { position: 0 });
        assert_eq!(error("T&F)"), ParseError::MismatchedParentheses { position: 3 });
        assert_eq!(error("((T)"), ParseError::MismatchedParentheses { position: 0 });
        assert_eq!(error("(T))"), ParseError::MismatchedParentheses { position: 3 });
    }

    #[test]
    fn test_unrecognized_character() {
        assert_eq!(error("T & X"), ParseError::UnrecognizedCharacter { ch: 'X', position: 4 });
        assert_eq!(error("T + F"), ParseError::UnrecognizedCharacter { ch: '+', position: 2 });
    }

    #[test]
    fn test_output_contains_no_parentheses() {
        let config = SymbolConfig::default();
        let tokens = convert_to_postfix("(!(T$F)@(F|T))&T", &config).unwrap();
        assert!(tokens
            .iter()
            .all(|t| matches!(t, Token::Literal(_) | Token::Operator(_))));
        assert_eq!(tokens.len(), 10);
    }
}
