//! Arithmetic evaluator tool
//!
//! Expressions are parsed by a small recursive-descent parser; nothing is ever
//! handed to an interpreter. Supported: `+ - * / % **`, unary signs, parentheses,
//! the constants `pi`, `e`, `tau` and a fixed set of single-argument math functions.

use crate::error::{Result, ToolError};
use crate::tools::{Tool, ToolExample};
use async_trait::async_trait;

const NAME: &str = "calculator";

/// Calculator tool
pub struct CalculatorTool;

impl CalculatorTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CalculatorTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for CalculatorTool {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        "Useful for performing mathematical calculations and arithmetic operations. \
         Input should be a mathematical expression like '5+3', '144/12', or '2**8'. \
         Supports +, -, *, /, % and ** (power), parentheses, pi and e, and functions such as \
         sqrt, log, sin and cos. Use this when the user asks to calculate, compute, or solve a math problem."
    }

    async fn execute(&self, input: &str) -> Result<String> {
        tracing::debug!("Calculating '{}'", input);

        let expression = normalize(input);
        let value = evaluate(&expression).map_err(|message| ToolError::InvalidInput {
            message: format!("Cannot calculate '{}': {}", input, message),
        })?;

        Ok(format!("The result is: **{}**", format_number(value)))
    }

    fn examples(&self) -> Vec<ToolExample> {
        vec![
            ToolExample::new("Simple division", "144/12", "The result is: **12**"),
            ToolExample::new("Powers", "2**8", "The result is: **256**"),
            ToolExample::new(
                "Words and functions",
                "sqrt(16) plus 3 times 2",
                "The result is: **10**",
            ),
        ]
    }
}

/// Rewrite spoken operators and typographic symbols into plain operators
pub fn normalize(input: &str) -> String {
    let mut expr = input.trim().to_lowercase();
    for (word, op) in [
        (" to the power of ", "**"),
        (" divided by ", "/"),
        (" plus ", "+"),
        (" minus ", "-"),
        (" times ", "*"),
    ] {
        expr = expr.replace(word, op);
    }
    expr = expr.replace('×', "*").replace('÷', "/").replace('^', "**");

    let compact: Vec<char> = expr.chars().filter(|c| !c.is_whitespace()).collect();

    // An `x` between two operands means multiplication ("3 x 4", "2x3x4")
    compact
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            let between_operands = i > 0
                && i + 1 < compact.len()
                && matches!(compact[i - 1], '0'..='9' | '.' | ')')
                && matches!(compact[i + 1], '0'..='9' | '.' | '(');
            if c == 'x' && between_operands {
                '*'
            } else {
                c
            }
        })
        .collect()
}

/// Format a value the way a person would write it: integral values without decimals
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Evaluate a normalized expression
pub fn evaluate(expression: &str) -> std::result::Result<f64, String> {
    let tokens = tokenize(expression)?;
    if tokens.is_empty() {
        return Err("empty expression".to_string());
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let value = parser.expr()?;
    if parser.pos != parser.tokens.len() {
        return Err(format!("unexpected token {:?}", parser.tokens[parser.pos]));
    }
    if !value.is_finite() {
        return Err("result is not a finite number".to_string());
    }
    Ok(value)
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Num(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Pow,
    LParen,
    RParen,
    Comma,
}

fn tokenize(input: &str) -> std::result::Result<Vec<Token>, String> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            c if c.is_whitespace() => i += 1,
            '0'..='9' | '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let text: String = chars[start..i].iter().collect();
                let value = text
                    .parse::<f64>()
                    .map_err(|_| format!("invalid number '{}'", text))?;
                tokens.push(Token::Num(value));
            }
            'a'..='z' | 'A'..='Z' | '_' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                tokens.push(Token::Ident(chars[start..i].iter().collect()));
            }
            '*' if chars.get(i + 1) == Some(&'*') => {
                tokens.push(Token::Pow);
                i += 2;
            }
            _ => {
                let token = match c {
                    '+' => Token::Plus,
                    '-' => Token::Minus,
                    '*' => Token::Star,
                    '/' => Token::Slash,
                    '%' => Token::Percent,
                    '(' => Token::LParen,
                    ')' => Token::RParen,
                    ',' => Token::Comma,
                    other => return Err(format!("unsupported character '{}'", other)),
                };
                tokens.push(token);
                i += 1;
            }
        }
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

/// Nesting allowed for parentheses, signs and exponents; every recursive rule passes
/// through `unary`
const MAX_DEPTH: usize = 256;

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn expect(&mut self, expected: Token) -> std::result::Result<(), String> {
        match self.next() {
            Some(token) if token == expected => Ok(()),
            Some(token) => Err(format!("expected {:?}, found {:?}", expected, token)),
            None => Err(format!("expected {:?}, found end of input", expected)),
        }
    }

    // expr := term (('+' | '-') term)*
    fn expr(&mut self) -> std::result::Result<f64, String> {
        let mut value = self.term()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.pos += 1;
                    value += self.term()?;
                }
                Some(Token::Minus) => {
                    self.pos += 1;
                    value -= self.term()?;
                }
                _ => return Ok(value),
            }
        }
    }

    // term := unary (('*' | '/' | '%') unary)*
    fn term(&mut self) -> std::result::Result<f64, String> {
        let mut value = self.unary()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.pos += 1;
                    value *= self.unary()?;
                }
                Some(Token::Slash) => {
                    self.pos += 1;
                    let rhs = self.unary()?;
                    if rhs == 0.0 {
                        return Err("division by zero".to_string());
                    }
                    value /= rhs;
                }
                Some(Token::Percent) => {
                    self.pos += 1;
                    let rhs = self.unary()?;
                    if rhs == 0.0 {
                        return Err("modulo by zero".to_string());
                    }
                    // Floored modulo: the result takes the sign of the divisor
                    value -= rhs * (value / rhs).floor();
                }
                _ => return Ok(value),
            }
        }
    }

    // unary := ('+' | '-') unary | power
    fn unary(&mut self) -> std::result::Result<f64, String> {
        if self.depth >= MAX_DEPTH {
            return Err("expression nested too deeply".to_string());
        }
        self.depth += 1;
        let value = self.signed();
        self.depth -= 1;
        value
    }

    fn signed(&mut self) -> std::result::Result<f64, String> {
        match self.peek() {
            Some(Token::Minus) => {
                self.pos += 1;
                Ok(-self.unary()?)
            }
            Some(Token::Plus) => {
                self.pos += 1;
                self.unary()
            }
            _ => self.power(),
        }
    }

    // power := primary ('**' unary)?   (right associative, binds tighter than unary minus)
    fn power(&mut self) -> std::result::Result<f64, String> {
        let base = self.primary()?;
        if let Some(Token::Pow) = self.peek() {
            self.pos += 1;
            let exponent = self.unary()?;
            return Ok(base.powf(exponent));
        }
        Ok(base)
    }

    fn primary(&mut self) -> std::result::Result<f64, String> {
        match self.next() {
            Some(Token::Num(value)) => Ok(value),
            Some(Token::LParen) => {
                let value = self.expr()?;
                self.expect(Token::RParen)?;
                Ok(value)
            }
            Some(Token::Ident(name)) => {
                if let Some(Token::LParen) = self.peek() {
                    self.pos += 1;
                    let mut args = vec![self.expr()?];
                    while let Some(Token::Comma) = self.peek() {
                        self.pos += 1;
                        args.push(self.expr()?);
                    }
                    self.expect(Token::RParen)?;
                    call_function(&name, &args)
                } else {
                    constant(&name)
                }
            }
            Some(token) => Err(format!("unexpected token {:?}", token)),
            None => Err("unexpected end of input".to_string()),
        }
    }
}

fn constant(name: &str) -> std::result::Result<f64, String> {
    match name {
        "pi" => Ok(std::f64::consts::PI),
        "e" => Ok(std::f64::consts::E),
        "tau" => Ok(std::f64::consts::TAU),
        _ => Err(format!("unknown name '{}'", name)),
    }
}

fn call_function(name: &str, args: &[f64]) -> std::result::Result<f64, String> {
    if name == "log" && args.len() == 2 {
        return Ok(args[0].ln() / args[1].ln());
    }
    if args.len() != 1 {
        return Err(format!("{}() takes exactly one argument", name));
    }

    let x = args[0];
    let value = match name {
        "sqrt" => {
            if x < 0.0 {
                return Err("math domain error".to_string());
            }
            x.sqrt()
        }
        "log" => x.ln(),
        "log10" => x.log10(),
        "exp" => x.exp(),
        "sin" => x.sin(),
        "cos" => x.cos(),
        "tan" => x.tan(),
        "asin" => x.asin(),
        "acos" => x.acos(),
        "atan" => x.atan(),
        "sinh" => x.sinh(),
        "cosh" => x.cosh(),
        "tanh" => x.tanh(),
        "floor" => x.floor(),
        "ceil" => x.ceil(),
        "abs" | "fabs" => x.abs(),
        _ => return Err(format!("unknown function '{}'", name)),
    };
    Ok(value)
}
