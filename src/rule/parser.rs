//! Recursive-descent parser for the selection-rule mini-language.
//!
//! Grammar, loosest to tightest binding:
//! ```text
//! expr    := and ( '|' and )*
//! and     := cmp ( '&' cmp )*
//! cmp     := unary ( ('<'|'<='|'>'|'>='|'=='|'!=') unary )?
//! unary   := ('!'|'-') unary | primary
//! primary := '(' expr ')' | column | number
//! ```

use crate::error::{Error, Result};
use crate::rule::token::{lex, SpannedToken, Token};

/// A parsed rule expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `[name]` column reference.
    Column(String),
    /// Numeric literal.
    Number(f64),
    /// `!expr` boolean negation.
    Not(Box<Expr>),
    /// `-expr` numeric negation.
    Neg(Box<Expr>),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    And,
    Or,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

/// Parse rule text into an expression tree.
pub fn parse(text: &str) -> Result<Expr> {
    let tokens = lex(text)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        len: text.len(),
    };
    let expr = parser.expr()?;
    if let Some(tok) = parser.peek() {
        return Err(parser.error_at(tok.offset, "unexpected trailing input"));
    }
    Ok(expr)
}

struct Parser {
    tokens: Vec<SpannedToken>,
    pos: usize,
    len: usize,
}

impl Parser {
    fn peek(&self) -> Option<&SpannedToken> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<SpannedToken> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn error_at(&self, offset: usize, message: impl Into<String>) -> Error {
        Error::RuleSyntax {
            offset,
            message: message.into(),
        }
    }

    fn error_eof(&self, message: impl Into<String>) -> Error {
        Error::RuleSyntax {
            offset: self.len,
            message: message.into(),
        }
    }

    fn expr(&mut self) -> Result<Expr> {
        let mut lhs = self.and()?;
        while matches!(self.peek().map(|t| &t.token), Some(Token::Or)) {
            self.advance();
            let rhs = self.and()?;
            lhs = Expr::Binary {
                op: BinaryOp::Or,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn and(&mut self) -> Result<Expr> {
        let mut lhs = self.cmp()?;
        while matches!(self.peek().map(|t| &t.token), Some(Token::And)) {
            self.advance();
            let rhs = self.cmp()?;
            lhs = Expr::Binary {
                op: BinaryOp::And,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn cmp(&mut self) -> Result<Expr> {
        let lhs = self.unary()?;
        let op = match self.peek().map(|t| &t.token) {
            Some(Token::Lt) => BinaryOp::Lt,
            Some(Token::Le) => BinaryOp::Le,
            Some(Token::Gt) => BinaryOp::Gt,
            Some(Token::Ge) => BinaryOp::Ge,
            Some(Token::Eq) => BinaryOp::Eq,
            Some(Token::Ne) => BinaryOp::Ne,
            _ => return Ok(lhs),
        };
        self.advance();
        let rhs = self.unary()?;
        Ok(Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        })
    }

    fn unary(&mut self) -> Result<Expr> {
        match self.peek().map(|t| &t.token) {
            Some(Token::Not) => {
                self.advance();
                Ok(Expr::Not(Box::new(self.unary()?)))
            }
            Some(Token::Minus) => {
                self.advance();
                Ok(Expr::Neg(Box::new(self.unary()?)))
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<Expr> {
        let Some(tok) = self.advance() else {
            return Err(self.error_eof("expected a column reference, number, or '('"));
        };
        match tok.token {
            Token::Column(name) => Ok(Expr::Column(name)),
            Token::Number(value) => Ok(Expr::Number(value)),
            Token::LParen => {
                let inner = self.expr()?;
                match self.advance() {
                    Some(SpannedToken {
                        token: Token::RParen,
                        ..
                    }) => Ok(inner),
                    Some(other) => Err(self.error_at(other.offset, "expected ')'")),
                    None => Err(self.error_eof("expected ')'")),
                }
            }
            other => Err(self.error_at(
                tok.offset,
                format!("expected a column reference, number, or '(', found {other:?}"),
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn column(name: &str) -> Box<Expr> {
        Box::new(Expr::Column(name.to_string()))
    }

    #[test]
    fn and_binds_tighter_than_or() {
        let expr = parse("[a] | [b] & [c]").unwrap();
        assert_eq!(
            expr,
            Expr::Binary {
                op: BinaryOp::Or,
                lhs: column("a"),
                rhs: Box::new(Expr::Binary {
                    op: BinaryOp::And,
                    lhs: column("b"),
                    rhs: column("c"),
                }),
            }
        );
    }

    #[test]
    fn comparison_binds_tighter_than_and() {
        let expr = parse("[a] & [v] > 5.5").unwrap();
        assert_eq!(
            expr,
            Expr::Binary {
                op: BinaryOp::And,
                lhs: column("a"),
                rhs: Box::new(Expr::Binary {
                    op: BinaryOp::Gt,
                    lhs: column("v"),
                    rhs: Box::new(Expr::Number(5.5)),
                }),
            }
        );
    }

    #[test]
    fn parentheses_and_unary() {
        let expr = parse("!([a] | [b])").unwrap();
        assert_eq!(
            expr,
            Expr::Not(Box::new(Expr::Binary {
                op: BinaryOp::Or,
                lhs: column("a"),
                rhs: column("b"),
            }))
        );
        assert_eq!(
            parse("[v] > -1.5").unwrap(),
            Expr::Binary {
                op: BinaryOp::Gt,
                lhs: column("v"),
                rhs: Box::new(Expr::Neg(Box::new(Expr::Number(1.5)))),
            }
        );
    }

    #[test]
    fn trailing_input_is_rejected() {
        assert!(parse("[a] [b]").is_err());
    }

    #[test]
    fn dangling_operator_is_rejected() {
        assert!(parse("[a] &").is_err());
        assert!(parse("& [a]").is_err());
    }

    #[test]
    fn unbalanced_parenthesis_is_rejected() {
        assert!(parse("([a] & [b]").is_err());
    }
}
