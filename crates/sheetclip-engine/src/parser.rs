//! Recursive descent parser with operator precedence.
//!
//! Precedence (lowest to highest):
//! 1. `||`
//! 2. `&&`
//! 3. comparison: `==`/`=`, `!=`/`<>`, `<`, `<=`, `>`, `>=`
//! 4. concatenation: `&`
//! 5. additive: `+`, `-`
//! 6. multiplicative: `*`, `/`, `%`
//! 7. exponentiation: `^` (right associative)
//! 8. unary: `-`, `+`, `!`
//! 9. primary: literals, function calls, parentheses

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::error::{EvalError, EvalResult};
use crate::lexer::{Lexer, Token};

/// Parse an expression string into an AST.
///
/// The input must contain exactly one expression; trailing tokens are a
/// syntax error. An empty or whitespace-only input is also a syntax error —
/// callers are expected to skip blank cells before parsing.
pub fn parse(input: &str) -> EvalResult<Expr> {
    let mut parser = Parser::new(input)?;

    if parser.current == Token::Eof {
        return Err(EvalError::Syntax("empty expression".to_string()));
    }

    let expr = parser.parse_or()?;

    if parser.current != Token::Eof {
        return Err(EvalError::Syntax(format!(
            "unexpected token after expression: {:?}",
            parser.current
        )));
    }

    Ok(expr)
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> EvalResult<Self> {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    fn advance(&mut self) -> EvalResult<Token> {
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn expect(&mut self, expected: Token, what: &str) -> EvalResult<()> {
        if self.current == expected {
            self.advance()?;
            Ok(())
        } else {
            Err(EvalError::Syntax(format!(
                "expected {}, got {:?}",
                what, self.current
            )))
        }
    }

    fn parse_or(&mut self) -> EvalResult<Expr> {
        let mut left = self.parse_and()?;
        while self.current == Token::OrOr {
            self.advance()?;
            let right = self.parse_and()?;
            left = binary(BinaryOp::Or, left, right);
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> EvalResult<Expr> {
        let mut left = self.parse_comparison()?;
        while self.current == Token::AndAnd {
            self.advance()?;
            let right = self.parse_comparison()?;
            left = binary(BinaryOp::And, left, right);
        }
        Ok(left)
    }

    fn parse_comparison(&mut self) -> EvalResult<Expr> {
        let mut left = self.parse_concat()?;
        loop {
            let op = match self.current {
                Token::Eq => BinaryOp::Equal,
                Token::NotEq => BinaryOp::NotEqual,
                Token::Less => BinaryOp::Less,
                Token::LessEq => BinaryOp::LessEq,
                Token::Greater => BinaryOp::Greater,
                Token::GreaterEq => BinaryOp::GreaterEq,
                _ => break,
            };
            self.advance()?;
            let right = self.parse_concat()?;
            left = binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_concat(&mut self) -> EvalResult<Expr> {
        let mut left = self.parse_additive()?;
        while self.current == Token::Ampersand {
            self.advance()?;
            let right = self.parse_additive()?;
            left = binary(BinaryOp::Concat, left, right);
        }
        Ok(left)
    }

    fn parse_additive(&mut self) -> EvalResult<Expr> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let op = match self.current {
                Token::Plus => BinaryOp::Add,
                Token::Minus => BinaryOp::Subtract,
                _ => break,
            };
            self.advance()?;
            let right = self.parse_multiplicative()?;
            left = binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> EvalResult<Expr> {
        let mut left = self.parse_exponent()?;
        loop {
            let op = match self.current {
                Token::Star => BinaryOp::Multiply,
                Token::Slash => BinaryOp::Divide,
                Token::Percent => BinaryOp::Modulo,
                _ => break,
            };
            self.advance()?;
            let right = self.parse_exponent()?;
            left = binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_exponent(&mut self) -> EvalResult<Expr> {
        let left = self.parse_unary()?;
        if self.current == Token::Caret {
            self.advance()?;
            // Right associative.
            let right = self.parse_exponent()?;
            return Ok(binary(BinaryOp::Power, left, right));
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> EvalResult<Expr> {
        match self.current {
            Token::Minus => {
                self.advance()?;
                let operand = self.parse_unary()?;
                Ok(Expr::Unary {
                    op: UnaryOp::Negate,
                    operand: Box::new(operand),
                })
            }
            Token::Plus => {
                // Prefix plus is a no-op.
                self.advance()?;
                self.parse_unary()
            }
            Token::Bang => {
                self.advance()?;
                let operand = self.parse_unary()?;
                Ok(Expr::Unary {
                    op: UnaryOp::Not,
                    operand: Box::new(operand),
                })
            }
            _ => self.parse_primary(),
        }
    }

    fn parse_primary(&mut self) -> EvalResult<Expr> {
        match self.advance()? {
            Token::Number(n) => Ok(Expr::Number(n)),
            Token::Str(s) => Ok(Expr::Str(s)),
            Token::Bool(b) => Ok(Expr::Bool(b)),
            Token::LeftParen => {
                let expr = self.parse_or()?;
                self.expect(Token::RightParen, "')'")?;
                Ok(expr)
            }
            Token::Ident(name) => {
                self.expect(Token::LeftParen, "'(' after function name")?;
                let args = self.parse_args()?;
                Ok(Expr::Call { name, args })
            }
            other => Err(EvalError::Syntax(format!("unexpected token: {:?}", other))),
        }
    }

    fn parse_args(&mut self) -> EvalResult<Vec<Expr>> {
        let mut args = Vec::new();

        if self.current == Token::RightParen {
            self.advance()?;
            return Ok(args);
        }

        loop {
            args.push(self.parse_or()?);
            match self.advance()? {
                Token::Comma => continue,
                Token::RightParen => return Ok(args),
                other => {
                    return Err(EvalError::Syntax(format!(
                        "expected ',' or ')' in argument list, got {:?}",
                        other
                    )));
                }
            }
        }
    }
}

fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    Expr::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_mul_over_add() {
        let expr = parse("2 + 3 * 4").unwrap();
        assert_eq!(
            expr,
            binary(
                BinaryOp::Add,
                Expr::Number(2.0),
                binary(BinaryOp::Multiply, Expr::Number(3.0), Expr::Number(4.0)),
            )
        );
    }

    #[test]
    fn test_parens_override_precedence() {
        let expr = parse("(2 + 3) * 4").unwrap();
        assert_eq!(
            expr,
            binary(
                BinaryOp::Multiply,
                binary(BinaryOp::Add, Expr::Number(2.0), Expr::Number(3.0)),
                Expr::Number(4.0),
            )
        );
    }

    #[test]
    fn test_power_right_associative() {
        let expr = parse("2 ^ 3 ^ 2").unwrap();
        assert_eq!(
            expr,
            binary(
                BinaryOp::Power,
                Expr::Number(2.0),
                binary(BinaryOp::Power, Expr::Number(3.0), Expr::Number(2.0)),
            )
        );
    }

    #[test]
    fn test_function_call() {
        let expr = parse("min(1, 2, 3)").unwrap();
        assert_eq!(
            expr,
            Expr::Call {
                name: "min".to_string(),
                args: vec![Expr::Number(1.0), Expr::Number(2.0), Expr::Number(3.0)],
            }
        );
    }

    #[test]
    fn test_empty_input_is_syntax_error() {
        assert!(matches!(parse(""), Err(EvalError::Syntax(_))));
        assert!(matches!(parse("   "), Err(EvalError::Syntax(_))));
    }

    #[test]
    fn test_trailing_tokens_rejected() {
        assert!(matches!(parse("1 2"), Err(EvalError::Syntax(_))));
        assert!(matches!(parse("1 +"), Err(EvalError::Syntax(_))));
    }

    #[test]
    fn test_bare_identifier_rejected() {
        // Identifiers are only valid as function calls; there are no
        // variables in the language.
        assert!(parse("foo").is_err());
        assert!(parse("foo + 1").is_err());
    }

    #[test]
    fn test_unary_chain() {
        assert!(parse("--5").is_ok());
        assert!(parse("!!true").is_ok());
        assert!(parse("-min(1, 2)").is_ok());
    }
}
