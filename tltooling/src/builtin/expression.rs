//! Arithmetic-only expression parser and evaluator.
//!
//! The grammar accepts numeric literals, unary `+`/`-`, binary `+ - * / **`
//! and parentheses. Nothing else is a valid token, so names, calls, attribute
//! access and string literals are rejected before evaluation starts.
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := factor (('*' | '/') factor)*
//! factor  := ('+' | '-') factor | power
//! power   := primary ('**' factor)?
//! primary := NUMBER | '(' expr ')'
//! ```
//!
//! ```rust
//! use tltooling::builtin::expression::{Number, evaluate};
//!
//! assert_eq!(evaluate("2**3").expect("valid"), Number::Int(8));
//! assert_eq!(evaluate("-2**2").expect("valid"), Number::Int(-4));
//! assert_eq!(evaluate("7/2").expect("valid"), Number::Float(3.5));
//! assert!(evaluate("__import__('os')").is_err());
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};

use serde_json::Value;

const MAX_DEPTH: usize = 200;
/// Operator chains are folded into a left-leaning tree, one level per
/// operator, so the token count bounds evaluation depth as well as size.
const MAX_TOKENS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(value) => value as f64,
            Self::Float(value) => value,
        }
    }

    fn is_zero(self) -> bool {
        match self {
            Self::Int(value) => value == 0,
            Self::Float(value) => value == 0.0,
        }
    }

    fn is_negative(self) -> bool {
        match self {
            Self::Int(value) => value < 0,
            Self::Float(value) => value < 0.0,
        }
    }

    pub fn to_json(self) -> Value {
        match self {
            Self::Int(value) => Value::from(value),
            Self::Float(value) => serde_json::Number::from_f64(value)
                .map(Value::Number)
                .unwrap_or(Value::Null),
        }
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalErrorKind {
    Syntax,
    DivisionByZero,
    ComplexResult,
    OutOfRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub message: String,
    /// Byte offset into the evaluated text, when the failure is positional.
    pub offset: Option<usize>,
}

impl EvalError {
    fn syntax(message: impl Into<String>, offset: usize) -> Self {
        Self {
            kind: EvalErrorKind::Syntax,
            message: message.into(),
            offset: Some(offset),
        }
    }

    fn arithmetic(kind: EvalErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            offset: None,
        }
    }
}

impl Display for EvalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.offset {
            Some(offset) => write!(f, "{} at offset {}", self.message, offset),
            None => f.write_str(&self.message),
        }
    }
}

impl Error for EvalError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Minus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Number),
    Unary(UnaryOp, Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
}

/// Parses and evaluates `input` in one step.
pub fn evaluate(input: &str) -> Result<Number, EvalError> {
    parse(input)?.eval()
}

pub fn parse(input: &str) -> Result<Expr, EvalError> {
    let tokens = tokenize(input)?;
    let mut parser = Parser {
        tokens,
        position: 0,
        depth: 0,
        end: input.len(),
    };

    let expr = parser.expr()?;
    match parser.peek() {
        None => Ok(expr),
        Some(token) => Err(EvalError::syntax(
            format!("unexpected {}", token.kind.describe()),
            token.offset,
        )),
    }
}

impl Expr {
    pub fn eval(&self) -> Result<Number, EvalError> {
        match self {
            Self::Literal(value) => Ok(*value),
            Self::Unary(UnaryOp::Plus, operand) => operand.eval(),
            Self::Unary(UnaryOp::Minus, operand) => Ok(match operand.eval()? {
                Number::Int(value) => value
                    .checked_neg()
                    .map(Number::Int)
                    .unwrap_or(Number::Float(-(value as f64))),
                Number::Float(value) => Number::Float(-value),
            }),
            Self::Binary(op, lhs, rhs) => apply(*op, lhs.eval()?, rhs.eval()?),
        }
    }
}

fn apply(op: BinaryOp, lhs: Number, rhs: Number) -> Result<Number, EvalError> {
    let result = match (op, lhs, rhs) {
        (BinaryOp::Add, Number::Int(a), Number::Int(b)) => int_or_float(a.checked_add(b), || {
            a as f64 + b as f64
        }),
        (BinaryOp::Sub, Number::Int(a), Number::Int(b)) => int_or_float(a.checked_sub(b), || {
            a as f64 - b as f64
        }),
        (BinaryOp::Mul, Number::Int(a), Number::Int(b)) => int_or_float(a.checked_mul(b), || {
            a as f64 * b as f64
        }),
        (BinaryOp::Add, a, b) => Number::Float(a.as_f64() + b.as_f64()),
        (BinaryOp::Sub, a, b) => Number::Float(a.as_f64() - b.as_f64()),
        (BinaryOp::Mul, a, b) => Number::Float(a.as_f64() * b.as_f64()),
        (BinaryOp::Div, a, b) => {
            if b.is_zero() {
                return Err(EvalError::arithmetic(
                    EvalErrorKind::DivisionByZero,
                    "division by zero",
                ));
            }
            Number::Float(a.as_f64() / b.as_f64())
        }
        (BinaryOp::Pow, base, exponent) => power(base, exponent)?,
    };

    match result {
        Number::Float(value) if !value.is_finite() => Err(EvalError::arithmetic(
            EvalErrorKind::OutOfRange,
            "numerical result out of range",
        )),
        other => Ok(other),
    }
}

fn power(base: Number, exponent: Number) -> Result<Number, EvalError> {
    if base.is_zero() && exponent.is_negative() {
        return Err(EvalError::arithmetic(
            EvalErrorKind::DivisionByZero,
            "zero cannot be raised to a negative power",
        ));
    }

    match (base, exponent) {
        (Number::Int(0), Number::Int(b)) if b >= 0 => Ok(Number::Int(i64::from(b == 0))),
        (Number::Int(1), Number::Int(b)) if b >= 0 => Ok(Number::Int(1)),
        (Number::Int(-1), Number::Int(b)) if b >= 0 => {
            Ok(Number::Int(if b % 2 == 0 { 1 } else { -1 }))
        }
        (Number::Int(a), Number::Int(b)) if b >= 0 => {
            let checked = u32::try_from(b).ok().and_then(|b| a.checked_pow(b));
            Ok(int_or_float(checked, || (a as f64).powf(b as f64)))
        }
        (Number::Int(a), Number::Int(b)) => Ok(Number::Float((a as f64).powf(b as f64))),
        (base, exponent) => {
            let (a, b) = (base.as_f64(), exponent.as_f64());
            if a < 0.0 && b.fract() != 0.0 {
                return Err(EvalError::arithmetic(
                    EvalErrorKind::ComplexResult,
                    "negative number cannot be raised to a fractional power",
                ));
            }
            Ok(Number::Float(a.powf(b)))
        }
    }
}

fn int_or_float(checked: Option<i64>, fallback: impl FnOnce() -> f64) -> Number {
    checked.map(Number::Int).unwrap_or_else(|| Number::Float(fallback()))
}

#[derive(Debug, Clone, PartialEq)]
enum TokenKind {
    Number(Number),
    Plus,
    Minus,
    Star,
    DoubleStar,
    Slash,
    LParen,
    RParen,
}

impl TokenKind {
    fn describe(&self) -> String {
        match self {
            Self::Number(value) => format!("number {value}"),
            Self::Plus => "'+'".to_string(),
            Self::Minus => "'-'".to_string(),
            Self::Star => "'*'".to_string(),
            Self::DoubleStar => "'**'".to_string(),
            Self::Slash => "'/'".to_string(),
            Self::LParen => "'('".to_string(),
            Self::RParen => "')'".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Token {
    kind: TokenKind,
    offset: usize,
}

fn tokenize(input: &str) -> Result<Vec<Token>, EvalError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some((offset, ch)) = chars.next() {
        let kind = match ch {
            ' ' | '\t' | '\n' | '\r' => continue,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '/' => TokenKind::Slash,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '*' => {
                if chars.next_if(|(_, next)| *next == '*').is_some() {
                    TokenKind::DoubleStar
                } else {
                    TokenKind::Star
                }
            }
            '0'..='9' | '.' => {
                let mut end = offset + ch.len_utf8();
                while let Some((next_offset, next)) =
                    chars.next_if(|(_, next)| next.is_ascii_digit() || *next == '.')
                {
                    end = next_offset + next.len_utf8();
                }
                TokenKind::Number(parse_number(&input[offset..end], offset)?)
            }
            ch if ch.is_alphabetic() || ch == '_' => {
                return Err(EvalError::syntax(
                    format!("names are not allowed (found '{ch}')"),
                    offset,
                ));
            }
            other => {
                return Err(EvalError::syntax(
                    format!("unexpected character '{other}'"),
                    offset,
                ));
            }
        };

        if tokens.len() == MAX_TOKENS {
            return Err(EvalError::syntax(
                format!("expression is too long (more than {MAX_TOKENS} tokens)"),
                offset,
            ));
        }
        tokens.push(Token { kind, offset });
    }

    Ok(tokens)
}

fn parse_number(literal: &str, offset: usize) -> Result<Number, EvalError> {
    let invalid = || EvalError::syntax(format!("invalid number literal '{literal}'"), offset);

    if literal.contains('.') {
        if literal == "." || literal.matches('.').count() > 1 {
            return Err(invalid());
        }
        return literal
            .parse::<f64>()
            .map(Number::Float)
            .map_err(|_| invalid());
    }

    match literal.parse::<i64>() {
        Ok(value) => Ok(Number::Int(value)),
        Err(_) => literal
            .parse::<f64>()
            .map(Number::Float)
            .map_err(|_| invalid()),
    }
}

struct Parser {
    tokens: Vec<Token>,
    position: usize,
    depth: usize,
    end: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    fn advance_if(&mut self, kind: &TokenKind) -> bool {
        if self.peek().is_some_and(|token| &token.kind == kind) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    fn enter(&mut self) -> Result<(), EvalError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            let offset = self.peek().map_or(self.end, |token| token.offset);
            return Err(EvalError::syntax("expression is nested too deeply", offset));
        }
        Ok(())
    }

    fn expr(&mut self) -> Result<Expr, EvalError> {
        let mut lhs = self.term()?;
        loop {
            let op = if self.advance_if(&TokenKind::Plus) {
                BinaryOp::Add
            } else if self.advance_if(&TokenKind::Minus) {
                BinaryOp::Sub
            } else {
                return Ok(lhs);
            };
            let rhs = self.term()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
    }

    fn term(&mut self) -> Result<Expr, EvalError> {
        let mut lhs = self.factor()?;
        loop {
            let op = if self.advance_if(&TokenKind::Star) {
                BinaryOp::Mul
            } else if self.advance_if(&TokenKind::Slash) {
                BinaryOp::Div
            } else {
                return Ok(lhs);
            };
            let rhs = self.factor()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
    }

    fn factor(&mut self) -> Result<Expr, EvalError> {
        let op = if self.advance_if(&TokenKind::Plus) {
            UnaryOp::Plus
        } else if self.advance_if(&TokenKind::Minus) {
            UnaryOp::Minus
        } else {
            return self.power();
        };

        self.enter()?;
        let operand = self.factor()?;
        self.depth -= 1;
        Ok(Expr::Unary(op, Box::new(operand)))
    }

    fn power(&mut self) -> Result<Expr, EvalError> {
        let base = self.primary()?;
        if !self.advance_if(&TokenKind::DoubleStar) {
            return Ok(base);
        }

        self.enter()?;
        let exponent = self.factor()?;
        self.depth -= 1;
        Ok(Expr::Binary(BinaryOp::Pow, Box::new(base), Box::new(exponent)))
    }

    fn primary(&mut self) -> Result<Expr, EvalError> {
        let Some(token) = self.tokens.get(self.position).cloned() else {
            return Err(EvalError::syntax("unexpected end of expression", self.end));
        };
        self.position += 1;

        match token.kind {
            TokenKind::Number(value) => Ok(Expr::Literal(value)),
            TokenKind::LParen => {
                self.enter()?;
                let inner = self.expr()?;
                self.depth -= 1;
                if self.advance_if(&TokenKind::RParen) {
                    Ok(inner)
                } else {
                    let offset = self.peek().map_or(self.end, |token| token.offset);
                    Err(EvalError::syntax("expected ')'", offset))
                }
            }
            other => Err(EvalError::syntax(
                format!("unexpected {}", other.describe()),
                token.offset,
            )),
        }
    }
}
