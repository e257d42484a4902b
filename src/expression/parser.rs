//! Recursive-descent parser for equation text
//!
//! Accepts the canonical text produced by `Expression`'s `Display` plus the
//! usual conveniences: an optional `f(x,y) =` prefix, `//` as a synonym for
//! `/`, and free spacing. Precedence, lowest first: `|`, `^`, `&`, `+ -`,
//! `* / // %`, unary `- ~`.

use crate::expression::{BinaryOp, Expression, UnaryOp, Value, Variable};
use crate::io::configuration::{MAX_EQUATION_LENGTH, MAX_EQUATION_NESTING};
use crate::io::error::{Result, invalid_parameter, parse_error};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
enum TokenKind {
    Int(Value),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Amp,
    Pipe,
    Caret,
    Tilde,
    LParen,
    RParen,
}

#[derive(Debug, Clone, PartialEq)]
struct Token {
    kind: TokenKind,
    position: usize,
}

/// Parse equation text into an expression
///
/// # Errors
///
/// Returns `InvalidParameter` for overlong input, `UnknownVariable` for
/// identifiers other than `x` and `y`, and `Parse` for any other syntax error.
pub fn parse_equation(text: &str) -> Result<Expression> {
    if text.len() > MAX_EQUATION_LENGTH {
        return Err(invalid_parameter(
            "equation",
            &format!("{} bytes", text.len()),
            &format!("equations are limited to {MAX_EQUATION_LENGTH} bytes"),
        ));
    }

    // Drop an "f(x,y) =" style prefix, keeping offsets relative to the full text
    let (offset, body) = text
        .find('=')
        .map_or((0, text), |index| (index + 1, text.get(index + 1..).unwrap_or("")));

    let tokens = tokenize(body, offset)?;
    let mut parser = Parser::new(&tokens, offset + body.len());
    let expression = parser.parse_or()?;

    match parser.peek() {
        Some(token) => Err(parse_error(
            token.position,
            &format!("unexpected {:?} after complete expression", token.kind),
        )),
        None => Ok(expression),
    }
}

impl FromStr for Expression {
    type Err = crate::io::error::BitartError;

    fn from_str(text: &str) -> Result<Self> {
        parse_equation(text)
    }
}

fn tokenize(input: &str, offset: usize) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some((index, c)) = chars.next() {
        let position = offset + index;
        let kind = match c {
            c if c.is_whitespace() => continue,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => {
                // Floor division spelled the Python way
                if chars.peek().is_some_and(|&(_, next)| next == '/') {
                    chars.next();
                }
                TokenKind::Slash
            }
            '%' => TokenKind::Percent,
            '&' => TokenKind::Amp,
            '|' => TokenKind::Pipe,
            '^' => TokenKind::Caret,
            '~' => TokenKind::Tilde,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            c if c.is_ascii_digit() => {
                let mut end = index + c.len_utf8();
                while let Some(&(next_index, next)) = chars.peek() {
                    if !next.is_ascii_digit() {
                        break;
                    }
                    end = next_index + next.len_utf8();
                    chars.next();
                }
                let digits = input.get(index..end).unwrap_or("");
                let value = digits
                    .parse::<Value>()
                    .map_err(|e| parse_error(position, &format!("invalid integer: {e}")))?;
                TokenKind::Int(value)
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut end = index + c.len_utf8();
                while let Some(&(next_index, next)) = chars.peek() {
                    if !(next.is_ascii_alphanumeric() || next == '_') {
                        break;
                    }
                    end = next_index + next.len_utf8();
                    chars.next();
                }
                TokenKind::Ident(input.get(index..end).unwrap_or("").to_string())
            }
            other => {
                return Err(parse_error(
                    position,
                    &format!("unexpected character '{other}'"),
                ));
            }
        };
        tokens.push(Token { kind, position });
    }

    Ok(tokens)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    end_position: usize,
    nesting: usize,
}

impl<'a> Parser<'a> {
    const fn new(tokens: &'a [Token], end_position: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            end_position,
            nesting: 0,
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<&TokenKind> {
        self.peek().map(|token| &token.kind)
    }

    fn enter(&mut self, position: usize) -> Result<()> {
        self.nesting += 1;
        if self.nesting > MAX_EQUATION_NESTING {
            return Err(parse_error(
                position,
                &format!("nesting deeper than {MAX_EQUATION_NESTING} levels"),
            ));
        }
        Ok(())
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    // Grammar rules, lowest precedence first

    fn parse_or(&mut self) -> Result<Expression> {
        let mut lhs = self.parse_xor()?;
        while matches!(self.peek_kind(), Some(TokenKind::Pipe)) {
            self.advance();
            let rhs = self.parse_xor()?;
            lhs = Expression::binary(BinaryOp::BitOr, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_xor(&mut self) -> Result<Expression> {
        let mut lhs = self.parse_and()?;
        while matches!(self.peek_kind(), Some(TokenKind::Caret)) {
            self.advance();
            let rhs = self.parse_and()?;
            lhs = Expression::binary(BinaryOp::BitXor, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_and(&mut self) -> Result<Expression> {
        let mut lhs = self.parse_additive()?;
        while matches!(self.peek_kind(), Some(TokenKind::Amp)) {
            self.advance();
            let rhs = self.parse_additive()?;
            lhs = Expression::binary(BinaryOp::BitAnd, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_additive(&mut self) -> Result<Expression> {
        let mut lhs = self.parse_multiplicative()?;
        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Plus) => BinaryOp::Add,
                Some(TokenKind::Minus) => BinaryOp::Subtract,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_multiplicative()?;
            lhs = Expression::binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_multiplicative(&mut self) -> Result<Expression> {
        let mut lhs = self.parse_unary()?;
        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Star) => BinaryOp::Multiply,
                Some(TokenKind::Slash) => BinaryOp::Divide,
                Some(TokenKind::Percent) => BinaryOp::Modulo,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_unary()?;
            lhs = Expression::binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<Expression> {
        let op = match self.peek_kind() {
            Some(TokenKind::Minus) => UnaryOp::Negate,
            Some(TokenKind::Tilde) => UnaryOp::BitNot,
            _ => return self.parse_atom(),
        };
        let position = self.advance().map_or(self.end_position, |token| token.position);
        self.enter(position)?;
        let operand = self.parse_unary()?;
        self.nesting -= 1;
        Ok(Expression::unary(op, operand))
    }

    fn parse_atom(&mut self) -> Result<Expression> {
        let Some(token) = self.advance() else {
            return Err(parse_error(self.end_position, &"unexpected end of input"));
        };

        match token.kind {
            TokenKind::Int(value) => Ok(Expression::Literal(value)),
            TokenKind::Ident(name) => name.parse::<Variable>().map(Expression::Lookup),
            TokenKind::LParen => {
                self.enter(token.position)?;
                let inner = self.parse_or()?;
                self.nesting -= 1;
                match self.advance() {
                    Some(Token {
                        kind: TokenKind::RParen,
                        ..
                    }) => Ok(inner),
                    Some(other) => Err(parse_error(
                        other.position,
                        &format!("expected ')', found {:?}", other.kind),
                    )),
                    None => Err(parse_error(self.end_position, &"expected ')'")),
                }
            }
            other => Err(parse_error(
                token.position,
                &format!("unexpected {other:?}"),
            )),
        }
    }
}
