//! Tokenizer for the expression language.

use crate::error::{EvalError, EvalResult};

/// Lexical tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    Str(String),
    Bool(bool),
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    Ampersand,
    Bang,

    Eq,
    NotEq,
    Less,
    LessEq,
    Greater,
    GreaterEq,

    AndAnd,
    OrOr,

    LeftParen,
    RightParen,
    Comma,

    Eof,
}

/// Character-by-character scanner over the expression source.
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Scan the next token, skipping leading whitespace.
    pub fn next_token(&mut self) -> EvalResult<Token> {
        self.skip_whitespace();

        let Some(c) = self.peek() else {
            return Ok(Token::Eof);
        };

        match c {
            '+' => self.single(Token::Plus),
            '-' => self.single(Token::Minus),
            '*' => self.single(Token::Star),
            '/' => self.single(Token::Slash),
            '%' => self.single(Token::Percent),
            '^' => self.single(Token::Caret),
            '(' => self.single(Token::LeftParen),
            ')' => self.single(Token::RightParen),
            ',' => self.single(Token::Comma),
            '&' => {
                self.advance();
                if self.peek() == Some('&') {
                    self.advance();
                    Ok(Token::AndAnd)
                } else {
                    Ok(Token::Ampersand)
                }
            }
            '|' => {
                self.advance();
                if self.peek() == Some('|') {
                    self.advance();
                    Ok(Token::OrOr)
                } else {
                    Err(EvalError::Syntax("unexpected character '|'".to_string()))
                }
            }
            '=' => {
                self.advance();
                // Accept both "=" and "==" as equality.
                if self.peek() == Some('=') {
                    self.advance();
                }
                Ok(Token::Eq)
            }
            '!' => {
                self.advance();
                if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::NotEq)
                } else {
                    Ok(Token::Bang)
                }
            }
            '<' => {
                self.advance();
                match self.peek() {
                    Some('=') => {
                        self.advance();
                        Ok(Token::LessEq)
                    }
                    Some('>') => {
                        self.advance();
                        Ok(Token::NotEq)
                    }
                    _ => Ok(Token::Less),
                }
            }
            '>' => {
                self.advance();
                if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::GreaterEq)
                } else {
                    Ok(Token::Greater)
                }
            }
            '"' => self.scan_string(),
            c if c.is_ascii_digit() || (c == '.' && self.peek_second_is_digit()) => {
                self.scan_number()
            }
            c if c.is_ascii_alphabetic() || c == '_' => Ok(self.scan_ident()),
            c => Err(EvalError::Syntax(format!("unexpected character '{}'", c))),
        }
    }

    fn single(&mut self, token: Token) -> EvalResult<Token> {
        self.advance();
        Ok(token)
    }

    fn scan_string(&mut self) -> EvalResult<Token> {
        self.advance(); // opening quote

        let mut s = String::new();
        loop {
            match self.peek() {
                Some('"') => {
                    // "" inside a string is an escaped quote.
                    if self.peek_at(1) == Some('"') {
                        s.push('"');
                        self.advance();
                        self.advance();
                    } else {
                        self.advance();
                        return Ok(Token::Str(s));
                    }
                }
                Some(c) => {
                    s.push(c);
                    self.advance();
                }
                None => {
                    return Err(EvalError::Syntax("unterminated string literal".to_string()));
                }
            }
        }
    }

    fn scan_number(&mut self) -> EvalResult<Token> {
        let start = self.pos;

        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        if self.peek() == Some('.') {
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }
        if self.peek().is_some_and(|c| c == 'e' || c == 'E') {
            self.advance();
            if self.peek().is_some_and(|c| c == '+' || c == '-') {
                self.advance();
            }
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        let text = &self.input[start..self.pos];
        text.parse::<f64>()
            .map(Token::Number)
            .map_err(|_| EvalError::Syntax(format!("invalid number literal '{}'", text)))
    }

    fn scan_ident(&mut self) -> Token {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.advance();
        }
        let text = &self.input[start..self.pos];

        if text.eq_ignore_ascii_case("true") {
            Token::Bool(true)
        } else if text.eq_ignore_ascii_case("false") {
            Token::Bool(false)
        } else {
            Token::Ident(text.to_string())
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(offset)
    }

    fn peek_second_is_digit(&self) -> bool {
        self.peek_at(1).is_some_and(|c| c.is_ascii_digit())
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|c| c.is_whitespace()) {
            self.advance();
        }
    }
}
