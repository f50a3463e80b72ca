use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{json, Value};

use crate::errors::{ToolError, ToolResult};
use crate::tool::Tool;

lazy_static! {
    static ref CALCULATOR_TRIGGER: Regex = Regex::new(r"calculate|compute|\d+[+\-*/]\d+").unwrap();
    static ref EXPRESSION: Regex = Regex::new(r"[\d+\-*/().\s]+").unwrap();
    static ref SOLVER_TRIGGER: Regex = Regex::new(r"solve|equation|[a-z]\s*=").unwrap();
    static ref EQUATION: Regex = Regex::new(r"[\dx+\-=\s]+").unwrap();
    static ref LINEAR_FORM: Regex = Regex::new(r"^(\d*)x([+-]\d+)=(\d+)$").unwrap();
}

/// Evaluate `+ - * /` expressions with standard precedence, parenthesis
/// nesting and unary minus.
pub fn calculator() -> Tool {
    Tool::new(
        "calculator",
        "Perform basic arithmetic operations",
        json!({
            "expression": {
                "type": "string",
                "description": "Mathematical expression to evaluate (e.g., \"2 + 3 * 4\")"
            }
        }),
        |message| CALCULATOR_TRIGGER.is_match(message),
        extract_expression,
        run_calculator,
    )
}

/// Solve linear equations of the exact shape `ax+b=c`
pub fn equation_solver() -> Tool {
    Tool::new(
        "equationSolver",
        "Solve simple algebraic equations",
        json!({
            "equation": {
                "type": "string",
                "description": "Equation to solve (e.g., \"2x + 5 = 11\")"
            }
        }),
        |message| SOLVER_TRIGGER.is_match(message),
        extract_equation,
        run_equation_solver,
    )
}

fn extract_expression(message: &str) -> Value {
    let expression = EXPRESSION
        .find(message)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_else(|| message.to_string());
    json!({ "expression": expression })
}

fn extract_equation(message: &str) -> Value {
    let equation = EQUATION
        .find(message)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_else(|| message.to_string());
    json!({ "equation": equation })
}

fn run_calculator(parameters: &Value) -> ToolResult<Value> {
    let expression = parameters
        .get("expression")
        .and_then(Value::as_str)
        .ok_or_else(|| ToolError::InvalidParameters("expression must be a string".to_string()))?;

    // Keep only digits, whitespace and arithmetic punctuation
    let sanitized: String = expression
        .chars()
        .filter(|c| c.is_ascii_digit() || c.is_whitespace() || "+-*/().".contains(*c))
        .collect();

    let result = ExpressionParser::new(&sanitized)
        .evaluate()
        .map_err(|e| ToolError::ExecutionError(format!("Calculator error: {}", e)))?;

    if !result.is_finite() {
        return Err(ToolError::ExecutionError(
            "Calculator error: expression did not evaluate to a finite number".to_string(),
        ));
    }

    Ok(json!({
        "result": result,
        "expression": expression,
        "steps": format!("Calculated: {} = {}", expression, result),
    }))
}

fn run_equation_solver(parameters: &Value) -> ToolResult<Value> {
    let equation = parameters
        .get("equation")
        .and_then(Value::as_str)
        .ok_or_else(|| ToolError::InvalidParameters("equation must be a string".to_string()))?;

    let normalized: String = equation
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    // Only `ax+b=c` with integer coefficients is recognized; anything
    // else fails loudly rather than guessing.
    let captures = LINEAR_FORM.captures(&normalized).ok_or_else(|| {
        ToolError::ExecutionError("Equation solver error: Equation format not supported".to_string())
    })?;

    let a: f64 = if captures[1].is_empty() {
        1.0
    } else {
        captures[1]
            .parse()
            .map_err(|e| ToolError::ExecutionError(format!("Equation solver error: {}", e)))?
    };
    let b: f64 = captures[2]
        .parse()
        .map_err(|e| ToolError::ExecutionError(format!("Equation solver error: {}", e)))?;
    let c: f64 = captures[3]
        .parse()
        .map_err(|e| ToolError::ExecutionError(format!("Equation solver error: {}", e)))?;

    if a == 0.0 {
        return Err(ToolError::ExecutionError(
            "Equation solver error: Equation format not supported".to_string(),
        ));
    }

    let x = (c - b) / a;

    Ok(json!({
        "solution": x,
        "steps": [
            format!("Original equation: {}", equation),
            format!("Rearranged: {}x = {} - ({})", a, c, b),
            format!("Simplified: {}x = {}", a, c - b),
            format!("Solution: x = {}", x),
        ],
    }))
}

/// Recursive-descent evaluator over an already sanitized expression.
/// The input is ASCII only, so byte positions are char positions.
struct ExpressionParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> ExpressionParser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn evaluate(mut self) -> Result<f64, String> {
        let value = self.expression()?;
        if let Some(c) = self.peek() {
            return Err(format!("unexpected character '{}'", c as char));
        }
        Ok(value)
    }

    fn peek(&mut self) -> Option<u8> {
        let bytes = self.input.as_bytes();
        while self.pos < bytes.len() && bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
        bytes.get(self.pos).copied()
    }

    fn expression(&mut self) -> Result<f64, String> {
        let mut value = self.term()?;
        while let Some(op) = self.peek() {
            match op {
                b'+' => {
                    self.pos += 1;
                    value += self.term()?;
                }
                b'-' => {
                    self.pos += 1;
                    value -= self.term()?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, String> {
        let mut value = self.factor()?;
        while let Some(op) = self.peek() {
            match op {
                b'*' => {
                    self.pos += 1;
                    value *= self.factor()?;
                }
                b'/' => {
                    self.pos += 1;
                    value /= self.factor()?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn factor(&mut self) -> Result<f64, String> {
        match self.peek() {
            Some(b'-') => {
                self.pos += 1;
                Ok(-self.factor()?)
            }
            Some(b'(') => {
                self.pos += 1;
                let value = self.expression()?;
                if self.peek() != Some(b')') {
                    return Err("missing closing parenthesis".to_string());
                }
                self.pos += 1;
                Ok(value)
            }
            Some(c) if c.is_ascii_digit() || c == b'.' => self.number(),
            Some(c) => Err(format!("unexpected character '{}'", c as char)),
            None => Err("empty expression".to_string()),
        }
    }

    fn number(&mut self) -> Result<f64, String> {
        let bytes = self.input.as_bytes();
        let start = self.pos;
        while self.pos < bytes.len() && (bytes[self.pos].is_ascii_digit() || bytes[self.pos] == b'.')
        {
            self.pos += 1;
        }
        self.input[start..self.pos]
            .parse()
            .map_err(|_| format!("invalid number '{}'", &self.input[start..self.pos]))
    }
}
