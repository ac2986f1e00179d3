//! Formula tokenizer
//!
//! Splits formula text into parentheses, operators, variables, and
//! floating-point literals. Whitespace separates tokens and is discarded;
//! any other unrecognized character is a format error.

use crate::error::{FormulaError, FormulaResult};
use std::fmt;

/// One of the four binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOp {
    pub(crate) fn symbol(self) -> char {
        match self {
            BinaryOp::Add => '+',
            BinaryOp::Subtract => '-',
            BinaryOp::Multiply => '*',
            BinaryOp::Divide => '/',
        }
    }
}

/// A single formula token
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    /// Non-negative floating-point literal
    Number(f64),
    /// Variable name (a letter followed by letters and/or digits)
    Variable(String),
    /// `+ - * /`
    Op(BinaryOp),
    LeftParen,
    RightParen,
}

impl Token {
    pub(crate) fn is_operand(&self) -> bool {
        matches!(self, Token::Number(_) | Token::Variable(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Variable(v) => f.write_str(v),
            Token::Op(op) => write!(f, "{}", op.symbol()),
            Token::LeftParen => f.write_str("("),
            Token::RightParen => f.write_str(")"),
        }
    }
}

/// Check whether a string is a legal variable token
/// (a letter followed by zero or more letters/digits)
pub(crate) fn is_variable_token(s: &str) -> bool {
    let bytes = s.as_bytes();
    match bytes.first() {
        Some(b) if b.is_ascii_alphabetic() => {}
        _ => return false,
    }
    bytes[1..].iter().all(|b| b.is_ascii_alphanumeric())
}

/// Tokenize formula text
pub(crate) fn tokenize(input: &str) -> FormulaResult<Vec<Token>> {
    let mut scanner = Scanner::new(input);
    let mut tokens = Vec::new();

    while let Some(token) = scanner.scan_token()? {
        tokens.push(token);
    }

    Ok(tokens)
}

struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.as_bytes().get(self.pos + offset).copied()
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.advance();
        }
    }

    /// Scan the next token, or `None` at end of input
    fn scan_token(&mut self) -> FormulaResult<Option<Token>> {
        self.skip_whitespace();

        let Some(c) = self.peek() else {
            return Ok(None);
        };

        match c {
            b'(' => {
                self.advance();
                Ok(Some(Token::LeftParen))
            }
            b')' => {
                self.advance();
                Ok(Some(Token::RightParen))
            }
            b'+' => {
                self.advance();
                Ok(Some(Token::Op(BinaryOp::Add)))
            }
            b'-' => {
                self.advance();
                Ok(Some(Token::Op(BinaryOp::Subtract)))
            }
            b'*' => {
                self.advance();
                Ok(Some(Token::Op(BinaryOp::Multiply)))
            }
            b'/' => {
                self.advance();
                Ok(Some(Token::Op(BinaryOp::Divide)))
            }
            c if c.is_ascii_alphabetic() => Ok(Some(self.scan_variable())),
            c if c.is_ascii_digit() => self.scan_number().map(Some),
            b'.' if self.peek_at(1).is_some_and(|b| b.is_ascii_digit()) => {
                self.scan_number().map(Some)
            }
            c => Err(FormulaError::Format(format!(
                "unrecognized character '{}'",
                char::from(c)
            ))),
        }
    }

    fn scan_variable(&mut self) -> Token {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_alphanumeric()) {
            self.advance();
        }
        Token::Variable(self.input[start..self.pos].to_string())
    }

    /// Scan a literal of the form `\d+(\.\d*)?`, `\.\d+`, or either followed
    /// by an exponent `[eE][+-]?\d+`
    fn scan_number(&mut self) -> FormulaResult<Token> {
        let start = self.pos;

        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.advance();
        }
        if self.peek() == Some(b'.') {
            self.advance();
            while self.peek().is_some_and(|b| b.is_ascii_digit()) {
                self.advance();
            }
        }

        // An exponent suffix is only consumed when it is complete; otherwise
        // the 'e' is left to become a variable token (and the grammar pass
        // rejects the operand/operand sequence).
        if self.peek().is_some_and(|b| b == b'e' || b == b'E') {
            let mut offset = 1;
            if self.peek_at(offset).is_some_and(|b| b == b'+' || b == b'-') {
                offset += 1;
            }
            if self.peek_at(offset).is_some_and(|b| b.is_ascii_digit()) {
                self.pos += offset;
                while self.peek().is_some_and(|b| b.is_ascii_digit()) {
                    self.advance();
                }
            }
        }

        let lexeme = &self.input[start..self.pos];
        let value = lexeme
            .parse::<f64>()
            .map_err(|_| FormulaError::Format(format!("invalid number literal '{}'", lexeme)))?;

        Ok(Token::Number(value))
    }
}
