//! Calculation formulas - arithmetic templates over named response fields.
//!
//! Grammar (whitespace ignored):
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := factor (('*' | '/') factor)*
//! factor := '-' factor | '(' expr ')' | number | '{' name '}'
//! ```
//!
//! Evaluation walks the parsed tree; nothing is executed dynamically.
//! Templates are bounded in length and nesting so parsing and evaluation
//! cannot exhaust the stack.

use thiserror::Error;

/// Longest accepted template, in tokens.
const MAX_TOKENS: usize = 256;

/// Deepest accepted nesting of parentheses and unary minus.
const MAX_DEPTH: usize = 32;

/// Errors raised while parsing or evaluating a formula.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormulaError {
    #[error("Unexpected character '{ch}' at position {position}")]
    UnexpectedChar { ch: char, position: usize },

    #[error("Unexpected end of formula")]
    UnexpectedEnd,

    #[error("Unexpected token at position {0}")]
    UnexpectedToken(usize),

    #[error("Unclosed placeholder starting at position {0}")]
    UnclosedPlaceholder(usize),

    #[error("Empty placeholder at position {0}")]
    EmptyPlaceholder(usize),

    #[error("Invalid number '{0}'")]
    InvalidNumber(String),

    #[error("Formula exceeds {} tokens", MAX_TOKENS)]
    TooLong,

    #[error("Formula nests too deeply at position {0}")]
    TooDeep(usize),

    #[error("Unresolved variable '{0}'")]
    UnresolvedVariable(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Result is not a finite number")]
    NonFinite,
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Var(String),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Debug, Clone, PartialEq)]
enum Expr {
    Number(f64),
    Var(String),
    Neg(Box<Expr>),
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

/// A parsed calculation formula.
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    expr: Expr,
}

impl Formula {
    /// Parses a formula template such as `{revenue} / ({users} + 1)`.
    pub fn parse(template: &str) -> Result<Self, FormulaError> {
        let tokens = tokenize(template)?;
        if tokens.len() > MAX_TOKENS {
            return Err(FormulaError::TooLong);
        }
        let mut parser = Parser {
            tokens,
            pos: 0,
            depth: 0,
        };
        let expr = parser.expr()?;
        if let Some((_, position)) = parser.tokens.get(parser.pos) {
            return Err(FormulaError::UnexpectedToken(*position));
        }
        Ok(Self { expr })
    }

    /// Evaluates the formula, resolving each placeholder through `resolve`.
    ///
    /// A placeholder that resolves to `None` or a non-finite value is an
    /// [`FormulaError::UnresolvedVariable`].
    pub fn evaluate<F>(&self, resolve: F) -> Result<f64, FormulaError>
    where
        F: Fn(&str) -> Option<f64>,
    {
        let value = eval(&self.expr, &resolve)?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(FormulaError::NonFinite)
        }
    }
}

fn eval<F>(expr: &Expr, resolve: &F) -> Result<f64, FormulaError>
where
    F: Fn(&str) -> Option<f64>,
{
    match expr {
        Expr::Number(n) => Ok(*n),
        Expr::Var(name) => resolve(name)
            .filter(|v| v.is_finite())
            .ok_or_else(|| FormulaError::UnresolvedVariable(name.clone())),
        Expr::Neg(inner) => Ok(-eval(inner, resolve)?),
        Expr::Binary { op, lhs, rhs } => {
            let l = eval(lhs, resolve)?;
            let r = eval(rhs, resolve)?;
            match op {
                BinOp::Add => Ok(l + r),
                BinOp::Sub => Ok(l - r),
                BinOp::Mul => Ok(l * r),
                BinOp::Div => {
                    if r == 0.0 {
                        Err(FormulaError::DivisionByZero)
                    } else {
                        Ok(l / r)
                    }
                }
            }
        }
    }
}

fn tokenize(input: &str) -> Result<Vec<(Token, usize)>, FormulaError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        match ch {
            c if c.is_whitespace() => i += 1,
            '+' => {
                tokens.push((Token::Plus, i));
                i += 1;
            }
            '-' => {
                tokens.push((Token::Minus, i));
                i += 1;
            }
            '*' => {
                tokens.push((Token::Star, i));
                i += 1;
            }
            '/' => {
                tokens.push((Token::Slash, i));
                i += 1;
            }
            '(' => {
                tokens.push((Token::LParen, i));
                i += 1;
            }
            ')' => {
                tokens.push((Token::RParen, i));
                i += 1;
            }
            '{' => {
                let start = i;
                let close = chars[i + 1..]
                    .iter()
                    .position(|c| *c == '}')
                    .ok_or(FormulaError::UnclosedPlaceholder(start))?;
                let name: String = chars[i + 1..i + 1 + close].iter().collect();
                let name = name.trim();
                if name.is_empty() {
                    return Err(FormulaError::EmptyPlaceholder(start));
                }
                if let Some(bad) = name
                    .chars()
                    .find(|c| !(c.is_alphanumeric() || matches!(c, '_' | '.' | '-')))
                {
                    return Err(FormulaError::UnexpectedChar {
                        ch: bad,
                        position: start,
                    });
                }
                tokens.push((Token::Var(name.to_string()), start));
                i += close + 2;
            }
            c if c.is_ascii_digit() || c == '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let text: String = chars[start..i].iter().collect();
                let value: f64 = text
                    .parse()
                    .map_err(|_| FormulaError::InvalidNumber(text.clone()))?;
                tokens.push((Token::Number(value), start));
            }
            other => {
                return Err(FormulaError::UnexpectedChar {
                    ch: other,
                    position: i,
                })
            }
        }
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<(Token, usize)>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn descend(&mut self, position: usize) -> Result<(), FormulaError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(FormulaError::TooDeep(position));
        }
        Ok(())
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(t, _)| t)
    }

    fn next(&mut self) -> Option<(Token, usize)> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expr(&mut self) -> Result<Expr, FormulaError> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinOp::Add,
                Some(Token::Minus) => BinOp::Sub,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.term()?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
    }

    fn term(&mut self) -> Result<Expr, FormulaError> {
        let mut lhs = self.factor()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinOp::Mul,
                Some(Token::Slash) => BinOp::Div,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.factor()?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
    }

    fn factor(&mut self) -> Result<Expr, FormulaError> {
        match self.next() {
            Some((Token::Minus, position)) => {
                self.descend(position)?;
                let inner = self.factor()?;
                self.depth -= 1;
                Ok(Expr::Neg(Box::new(inner)))
            }
            Some((Token::LParen, position)) => {
                self.descend(position)?;
                let inner = self.expr()?;
                self.depth -= 1;
                match self.next() {
                    Some((Token::RParen, _)) => Ok(inner),
                    Some((_, position)) => Err(FormulaError::UnexpectedToken(position)),
                    None => Err(FormulaError::UnexpectedEnd),
                }
            }
            Some((Token::Number(n), _)) => Ok(Expr::Number(n)),
            Some((Token::Var(name), _)) => Ok(Expr::Var(name)),
            Some((_, position)) => Err(FormulaError::UnexpectedToken(position)),
            None => Err(FormulaError::UnexpectedEnd),
        }
    }
}
