// SPDX-License-Identifier: MIT

//! Condition cell parser
//!
//! Parses cells like:
//! - `=false`
//! - `>10`
//! - `<=10`
//! - `!=PENDING`

use super::ast::{CompareOp, Condition, Literal};
use crate::error::ConditionError;

/// Parse a condition cell into its operator and operand
pub fn parse(input: &str) -> Result<Condition, ConditionError> {
    let input = input.trim();
    let (op, rest) =
        CompareOp::split(input).ok_or_else(|| ConditionError::UnknownOperator(input.to_string()))?;

    Ok(Condition {
        op,
        operand: parse_literal(rest),
        raw: rest.to_string(),
    })
}

// Boolean and text operands are taken exactly as written; numbers may carry
// surrounding whitespace.
fn parse_literal(input: &str) -> Literal {
    if input.eq_ignore_ascii_case("true") {
        return Literal::Boolean(true);
    }
    if input.eq_ignore_ascii_case("false") {
        return Literal::Boolean(false);
    }

    match input.trim().parse::<f64>() {
        Ok(n) => Literal::Number(n),
        Err(_) => Literal::Text(input.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_equality() {
        let cond = parse("=APPROVED").unwrap();
        assert_eq!(
            cond,
            Condition {
                op: CompareOp::Eq,
                operand: Literal::Text("APPROVED".to_string()),
                raw: "APPROVED".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_not_equal() {
        let cond = parse("!=done").unwrap();
        assert_eq!(cond.op, CompareOp::NotEq);
        assert_eq!(cond.operand, Literal::Text("done".to_string()));
    }

    #[test]
    fn test_parse_gte() {
        let cond = parse(">=18").unwrap();
        assert_eq!(cond.op, CompareOp::Gte);
        assert_eq!(cond.operand, Literal::Number(18.0));
    }

    #[test]
    fn test_parse_lte() {
        let cond = parse("<=10").unwrap();
        assert_eq!(cond.op, CompareOp::Lte);
        assert_eq!(cond.operand, Literal::Number(10.0));
    }

    #[test]
    fn test_parse_gt_and_lt() {
        assert_eq!(parse(">0.8").unwrap().op, CompareOp::Gt);
        assert_eq!(parse("<3").unwrap().op, CompareOp::Lt);
    }

    #[test]
    fn test_parse_boolean_case_insensitive() {
        assert_eq!(parse("=TRUE").unwrap().operand, Literal::Boolean(true));
        assert_eq!(parse("=False").unwrap().operand, Literal::Boolean(false));
        assert_eq!(parse("!=true").unwrap().operand, Literal::Boolean(true));
    }

    #[test]
    fn test_parse_number_with_inner_whitespace() {
        let cond = parse("  >=  5 ").unwrap();
        assert_eq!(cond.op, CompareOp::Gte);
        assert_eq!(cond.operand, Literal::Number(5.0));
        assert_eq!(cond.raw, "  5");
    }

    #[test]
    fn test_parse_keeps_text_operand_untrimmed() {
        let cond = parse("= abc").unwrap();
        assert_eq!(cond.operand, Literal::Text(" abc".to_string()));
        assert_eq!(cond.raw, " abc");

        // Not a boolean literal once padded
        assert_eq!(parse("= true").unwrap().operand, Literal::Text(" true".to_string()));
    }

    #[test]
    fn test_parse_keeps_raw_for_numbers() {
        let cond = parse("=007").unwrap();
        assert_eq!(cond.operand, Literal::Number(7.0));
        assert_eq!(cond.raw, "007");
        assert_eq!(cond.to_string(), "=007");
    }

    #[test]
    fn test_parse_empty_operand() {
        let cond = parse("=").unwrap();
        assert_eq!(cond.operand, Literal::Text(String::new()));
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(
            parse("adult"),
            Err(ConditionError::UnknownOperator("adult".to_string()))
        );
        assert!(parse("").is_err());
    }
}
