//! Lexer for the selection-rule mini-language.
//!
//! Rule syntax: `[column name]` references (bracket contents are taken
//! verbatim up to the closing `]`), numeric literals, comparisons
//! (`<`, `<=`, `>`, `>=`, `==`, `!=`), `&`, `|`, `!`, unary `-`, and
//! parentheses.

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// `[name]` — value of a column in the table under evaluation.
    Column(String),
    Number(f64),
    And,
    Or,
    Not,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    Minus,
    LParen,
    RParen,
}

/// A token plus its byte offset in the rule text, for error reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    pub token: Token,
    pub offset: usize,
}

fn syntax_error(offset: usize, message: impl Into<String>) -> Error {
    Error::RuleSyntax {
        offset,
        message: message.into(),
    }
}

/// Tokenize rule text.
pub fn lex(text: &str) -> Result<Vec<SpannedToken>> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let start = i;
        let c = bytes[i] as char;
        let token = match c {
            c if c.is_ascii_whitespace() => {
                i += 1;
                continue;
            }
            '[' => {
                let end = text[i + 1..]
                    .find(']')
                    .map(|off| i + 1 + off)
                    .ok_or_else(|| syntax_error(start, "unterminated column reference"))?;
                let name = &text[i + 1..end];
                if name.is_empty() {
                    return Err(syntax_error(start, "empty column reference"));
                }
                i = end + 1;
                Token::Column(name.to_string())
            }
            '0'..='9' | '.' => {
                let mut end = i;
                while end < bytes.len() && matches!(bytes[end] as char, '0'..='9' | '.') {
                    end += 1;
                }
                // Exponent suffix, e.g. 1.5e-3.
                if end < bytes.len() && matches!(bytes[end] as char, 'e' | 'E') {
                    let mut exp = end + 1;
                    if exp < bytes.len() && matches!(bytes[exp] as char, '+' | '-') {
                        exp += 1;
                    }
                    if exp < bytes.len() && (bytes[exp] as char).is_ascii_digit() {
                        end = exp;
                        while end < bytes.len() && (bytes[end] as char).is_ascii_digit() {
                            end += 1;
                        }
                    }
                }
                let literal = &text[i..end];
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| syntax_error(start, format!("invalid number '{literal}'")))?;
                i = end;
                Token::Number(value)
            }
            '&' => {
                i += 1;
                Token::And
            }
            '|' => {
                i += 1;
                Token::Or
            }
            '(' => {
                i += 1;
                Token::LParen
            }
            ')' => {
                i += 1;
                Token::RParen
            }
            '-' => {
                i += 1;
                Token::Minus
            }
            '<' => {
                if bytes.get(i + 1) == Some(&b'=') {
                    i += 2;
                    Token::Le
                } else {
                    i += 1;
                    Token::Lt
                }
            }
            '>' => {
                if bytes.get(i + 1) == Some(&b'=') {
                    i += 2;
                    Token::Ge
                } else {
                    i += 1;
                    Token::Gt
                }
            }
            '=' => {
                if bytes.get(i + 1) == Some(&b'=') {
                    i += 2;
                    Token::Eq
                } else {
                    return Err(syntax_error(start, "expected '==' for equality"));
                }
            }
            '!' => {
                if bytes.get(i + 1) == Some(&b'=') {
                    i += 2;
                    Token::Ne
                } else {
                    i += 1;
                    Token::Not
                }
            }
            other => return Err(syntax_error(start, format!("unexpected character '{other}'"))),
        };
        tokens.push(SpannedToken {
            token,
            offset: start,
        });
    }
    Ok(tokens)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
