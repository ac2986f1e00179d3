//! Infix arithmetic formulas
//!
//! A [`Formula`] holds a token sequence that was fully validated at
//! construction time, so evaluation never sees a malformed expression.

use crate::error::{FormulaError, FormulaResult};
use crate::token::{is_variable_token, tokenize, BinaryOp, Token};
use ahash::AHashSet;
use std::fmt;
use std::str::FromStr;

/// A validated formula in standard infix notation
///
/// Formulas are composed of non-negative floating-point literals, variables
/// (a letter followed by zero or more letters/digits), parentheses, and the
/// binary operators `+ - * /`. Unary operators are not allowed.
///
/// # Examples
/// ```
/// use slate_sheets_formula::Formula;
///
/// let f = Formula::parse("(5 * 2) + 8").unwrap();
/// assert_eq!(f.evaluate(|_| None).unwrap(), 18.0);
///
/// assert!(Formula::parse("-5.3").is_err());
/// assert!(Formula::parse("2 5 + 3").is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    tokens: Vec<Token>,
    /// Normalized variable names, duplicate-free, in first-use order
    variables: Vec<String>,
}

impl Formula {
    /// Parse formula text with the identity normalizer and a validator that
    /// accepts every variable
    pub fn parse(text: &str) -> FormulaResult<Self> {
        Self::parse_with(text, |v| v.to_string(), |_| true)
    }

    /// Parse formula text, normalizing and validating every variable token
    ///
    /// Each variable token is replaced by `normalize(token)`. The normalized
    /// form must itself be a legal variable token and must be accepted by
    /// `is_valid`, otherwise parsing fails with a format error.
    pub fn parse_with<N, V>(text: &str, normalize: N, is_valid: V) -> FormulaResult<Self>
    where
        N: Fn(&str) -> String,
        V: Fn(&str) -> bool,
    {
        let mut tokens = tokenize(text)?;

        for token in &mut tokens {
            if let Token::Variable(var) = token {
                let normalized = normalize(var);
                if !is_variable_token(&normalized) {
                    return Err(FormulaError::Format(format!(
                        "variable '{}' normalizes to illegal token '{}'",
                        var, normalized
                    )));
                }
                if !is_valid(&normalized) {
                    return Err(FormulaError::Format(format!(
                        "variable '{}' rejected by validator",
                        normalized
                    )));
                }
                *var = normalized;
            }
        }

        validate_grammar(&tokens)?;

        let mut seen = AHashSet::new();
        let mut variables = Vec::new();
        for token in &tokens {
            if let Token::Variable(var) = token {
                if seen.insert(var.clone()) {
                    variables.push(var.clone());
                }
            }
        }

        Ok(Self { tokens, variables })
    }

    /// The normalized variable names referenced by this formula,
    /// duplicate-free
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.variables.iter().map(String::as_str)
    }

    /// Evaluate the formula, resolving variables through `lookup`
    ///
    /// Uses the standard precedence rules: `*` and `/` bind tighter than `+`
    /// and `-`, with left-to-right associativity. `lookup` returns the value
    /// of a variable, or `None` when it cannot supply one; an unresolvable
    /// variable or a division by zero fails with an evaluation error.
    pub fn evaluate<L>(&self, lookup: L) -> FormulaResult<f64>
    where
        L: Fn(&str) -> Option<f64>,
    {
        let mut values: Vec<f64> = Vec::new();
        let mut ops: Vec<StackEntry> = Vec::new();

        for token in &self.tokens {
            match token {
                Token::Number(n) => push_operand(*n, &mut values, &mut ops)?,
                Token::Variable(var) => {
                    let value = lookup(var).ok_or_else(|| {
                        FormulaError::Evaluation(format!("undefined variable '{}'", var))
                    })?;
                    push_operand(value, &mut values, &mut ops)?;
                }
                Token::Op(op @ (BinaryOp::Add | BinaryOp::Subtract)) => {
                    if pending_additive(&ops) {
                        apply_top(&mut values, &mut ops)?;
                    }
                    ops.push(StackEntry::Op(*op));
                }
                Token::Op(op @ (BinaryOp::Multiply | BinaryOp::Divide)) => {
                    ops.push(StackEntry::Op(*op));
                }
                Token::LeftParen => ops.push(StackEntry::Paren),
                Token::RightParen => {
                    if pending_additive(&ops) {
                        apply_top(&mut values, &mut ops)?;
                    }
                    // The matching open paren is guaranteed by validation
                    ops.pop();
                    if pending_multiplicative(&ops) {
                        apply_top(&mut values, &mut ops)?;
                    }
                }
            }
        }

        if !ops.is_empty() {
            apply_top(&mut values, &mut ops)?;
        }

        values
            .pop()
            .ok_or_else(|| FormulaError::Evaluation("empty value stack".to_string()))
    }
}

impl fmt::Display for Formula {
    /// Reconstructs the formula text by concatenating tokens in order.
    /// Re-parses to an equivalent formula; whitespace is not preserved.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}

impl FromStr for Formula {
    type Err = FormulaError;

    fn from_str(s: &str) -> FormulaResult<Self> {
        Self::parse(s)
    }
}

/// Entry on the operator stack during evaluation
enum StackEntry {
    Op(BinaryOp),
    Paren,
}

fn pending_additive(ops: &[StackEntry]) -> bool {
    matches!(
        ops.last(),
        Some(StackEntry::Op(BinaryOp::Add | BinaryOp::Subtract))
    )
}

fn pending_multiplicative(ops: &[StackEntry]) -> bool {
    matches!(
        ops.last(),
        Some(StackEntry::Op(BinaryOp::Multiply | BinaryOp::Divide))
    )
}

/// Push an operand, first resolving a pending `*` or `/` on the stack top
fn push_operand(value: f64, values: &mut Vec<f64>, ops: &mut Vec<StackEntry>) -> FormulaResult<()> {
    if pending_multiplicative(ops) {
        let Some(StackEntry::Op(op)) = ops.pop() else {
            return Err(stack_underflow());
        };
        let lhs = values.pop().ok_or_else(stack_underflow)?;
        values.push(apply_op(lhs, value, op)?);
    } else {
        values.push(value);
    }
    Ok(())
}

/// Pop one operator and two values, push the result
fn apply_top(values: &mut Vec<f64>, ops: &mut Vec<StackEntry>) -> FormulaResult<()> {
    let Some(StackEntry::Op(op)) = ops.pop() else {
        return Err(stack_underflow());
    };
    let rhs = values.pop().ok_or_else(stack_underflow)?;
    let lhs = values.pop().ok_or_else(stack_underflow)?;
    values.push(apply_op(lhs, rhs, op)?);
    Ok(())
}

fn apply_op(lhs: f64, rhs: f64, op: BinaryOp) -> FormulaResult<f64> {
    match op {
        BinaryOp::Add => Ok(lhs + rhs),
        BinaryOp::Subtract => Ok(lhs - rhs),
        BinaryOp::Multiply => Ok(lhs * rhs),
        BinaryOp::Divide => {
            if rhs == 0.0 {
                Err(FormulaError::Evaluation("division by zero".to_string()))
            } else {
                Ok(lhs / rhs)
            }
        }
    }
}

// Unreachable for token sequences accepted by validate_grammar; kept as an
// error rather than a panic so evaluation can never abort the process.
fn stack_underflow() -> FormulaError {
    FormulaError::Evaluation("malformed expression".to_string())
}

/// Single left-to-right pass enforcing the formula grammar
fn validate_grammar(tokens: &[Token]) -> FormulaResult<()> {
    let Some(first) = tokens.first() else {
        return Err(FormulaError::Format("empty formula".to_string()));
    };

    if !first.is_operand() && *first != Token::LeftParen {
        return Err(FormulaError::Format(
            "first token must be a number, variable, or open parenthesis".to_string(),
        ));
    }

    let mut open = 0usize;
    let mut close = 0usize;
    let mut prev: Option<&Token> = None;

    for token in tokens {
        match token {
            Token::LeftParen => open += 1,
            Token::RightParen => {
                close += 1;
                if close > open {
                    return Err(FormulaError::Format(
                        "close parenthesis without matching open parenthesis".to_string(),
                    ));
                }
            }
            _ => {}
        }

        match prev {
            // A token following `(` or an operator must start an operand
            Some(Token::LeftParen | Token::Op(_)) => {
                if !token.is_operand() && *token != Token::LeftParen {
                    return Err(FormulaError::Format(format!(
                        "expected a number, variable, or open parenthesis, found '{}'",
                        token
                    )));
                }
            }
            // A token following an operand or `)` must be an operator or `)`
            Some(p) if p.is_operand() || *p == Token::RightParen => {
                if !matches!(token, Token::Op(_) | Token::RightParen) {
                    return Err(FormulaError::Format(format!(
                        "expected an operator or close parenthesis, found '{}'",
                        token
                    )));
                }
            }
            _ => {}
        }

        prev = Some(token);
    }

    if open != close {
        return Err(FormulaError::Format(
            "unbalanced parentheses".to_string(),
        ));
    }

    // prev is the last token; tokens is non-empty here
    if let Some(last) = prev {
        if !last.is_operand() && *last != Token::RightParen {
            return Err(FormulaError::Format(
                "last token must be a number, variable, or close parenthesis".to_string(),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn no_vars(_: &str) -> Option<f64> {
        None
    }

    #[test]
    fn test_parse_valid_examples() {
        for text in ["2.5e9 + x5 / 17", "(5 * 2) + 8", "x*y-2+35/9", "17", "z9"] {
            assert!(Formula::parse(text).is_ok(), "{text} should parse");
        }
    }

    #[test]
    fn test_parse_invalid_examples() {
        for text in [
            "",
            "   ",
            "_",
            "-5.3",
            "2 5 + 3",
            "+1",
            "1+",
            "(1+2))",
            "((1+2)",
            "()",
            "2+(3",
            "x y",
            "1 2",
            "*3",
            "5 +",
            "(+)",
        ] {
            assert!(
                matches!(Formula::parse(text), Err(FormulaError::Format(_))),
                "{text:?} should be a format error"
            );
        }
    }

    #[test]
    fn test_evaluate_precedence_and_associativity() {
        let cases = [
            ("2+3*4", 14.0),
            ("2*3+4", 10.0),
            ("(2+3)*4", 20.0),
            ("10-4-3", 3.0),
            ("100/10/5", 2.0),
            ("2+6/3-1", 3.0),
            ("5.5*2", 11.0),
            ("((((7))))", 7.0),
        ];
        for (text, expected) in cases {
            let formula = Formula::parse(text).unwrap();
            assert_eq!(formula.evaluate(no_vars).unwrap(), expected, "{text}");
        }
    }

    #[test]
    fn test_evaluate_with_variables() {
        let formula = Formula::parse("(x + y) * (z / x) * 1.0").unwrap();
        let value = formula
            .evaluate(|var| match var {
                "x" => Some(4.0),
                "y" => Some(6.0),
                "z" => Some(8.0),
                _ => None,
            })
            .unwrap();
        assert_eq!(value, 20.0);
    }

    #[test]
    fn test_evaluate_undefined_variable() {
        let formula = Formula::parse("x1 + 1").unwrap();
        assert!(matches!(
            formula.evaluate(no_vars),
            Err(FormulaError::Evaluation(_))
        ));
    }

    #[test]
    fn test_evaluate_division_by_zero() {
        let formula = Formula::parse("5 / 0").unwrap();
        assert!(matches!(
            formula.evaluate(no_vars),
            Err(FormulaError::Evaluation(_))
        ));

        let formula = Formula::parse("1 / (2 - 2)").unwrap();
        assert!(matches!(
            formula.evaluate(no_vars),
            Err(FormulaError::Evaluation(_))
        ));
    }

    #[test]
    fn test_variables_deduplicated() {
        let formula = Formula::parse("a1 + b2 * a1 / c3").unwrap();
        let vars: Vec<_> = formula.variables().collect();
        assert_eq!(vars, vec!["a1", "b2", "c3"]);
    }

    #[test]
    fn test_normalizer_applied() {
        let formula = Formula::parse_with("a1 + b2", |v| v.to_ascii_uppercase(), |_| true).unwrap();
        let vars: Vec<_> = formula.variables().collect();
        assert_eq!(vars, vec!["A1", "B2"]);
        assert_eq!(formula.to_string(), "A1+B2");
    }

    #[test]
    fn test_normalizer_producing_illegal_token_rejected() {
        let result = Formula::parse_with("a1", |v| format!("_{v}"), |_| true);
        assert!(matches!(result, Err(FormulaError::Format(_))));
    }

    #[test]
    fn test_validator_rejection() {
        let result = Formula::parse_with("a1 + bogus", |v| v.to_string(), |v| v != "bogus");
        assert!(matches!(result, Err(FormulaError::Format(_))));
    }

    #[test]
    fn test_display_round_trip() {
        for text in ["2.5e9 + x5 / 17", "(x + y) * (z / x) * 1.0", "1+2*3"] {
            let formula = Formula::parse(text).unwrap();
            let reparsed = Formula::parse(&formula.to_string()).unwrap();
            assert_eq!(formula, reparsed, "{text}");
        }
    }

    #[test]
    fn test_display_evaluates_the_same() {
        let formula = Formula::parse("(5 * 2) + 8 / 4").unwrap();
        let reparsed = Formula::parse(&formula.to_string()).unwrap();
        assert_eq!(
            formula.evaluate(no_vars).unwrap(),
            reparsed.evaluate(no_vars).unwrap()
        );
    }
}
