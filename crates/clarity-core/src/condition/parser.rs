//! Condition string parser
//!
//! Parses condition strings like:
//! - `STATUS = cancelled`
//! - `AGE >= 65`
//! - `DEPT not in ICU; OR`
//! - `NOTES is empty`

use super::operator::Operator;
use super::types::{fold_case, Condition, Operand};
use crate::error::{MalformedConditionError, Result};
use regex::RegexBuilder;

/// Operators ordered by token length, longest first, so that at any position
/// `is not empty` wins over `is empty`, `<=` over `<`, and so on.
const OPERATORS_BY_LENGTH: [Operator; 12] = [
    Operator::IsNotEmpty,
    Operator::NotMatches,
    Operator::IsEmpty,
    Operator::Matches,
    Operator::NotIn,
    Operator::NotEquals,
    Operator::LessOrEqual,
    Operator::GreaterOrEqual,
    Operator::In,
    Operator::LessThan,
    Operator::GreaterThan,
    Operator::Equals,
];

/// Separator between the values of an `in` / `not in` operand
const LIST_SEPARATOR: char = ';';

/// Condition parser
#[derive(Debug, Clone, Copy, Default)]
pub struct ConditionParser {
    case_sensitive: bool,
}

impl ConditionParser {
    /// Create a parser producing case-insensitive conditions
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser producing case-sensitive conditions
    pub fn case_sensitive() -> Self {
        Self {
            case_sensitive: true,
        }
    }

    /// Parse a single condition string into a [`Condition`]
    ///
    /// The string is scanned left to right; the first position where an
    /// operator token appears splits it into field name and operand. When
    /// several tokens start at that position the longest one is used.
    pub fn parse(&self, raw: &str) -> Result<Condition> {
        let condition = raw.trim();
        if condition.is_empty() {
            return Err(MalformedConditionError::new(raw, "empty condition"));
        }

        let (pos, operator) = Self::find_operator(condition)
            .ok_or_else(|| MalformedConditionError::new(condition, "no operator found"))?;

        let field = condition[..pos].trim();
        if field.is_empty() {
            return Err(MalformedConditionError::new(condition, "empty field name"));
        }

        let operand_str = condition[pos + operator.token().len()..].trim();
        let operand = self.parse_operand(condition, operator, operand_str)?;

        log::debug!(
            "Parsed condition '{}': field={}, operator={:?}",
            condition,
            field,
            operator
        );

        Ok(Condition::new(
            condition.to_string(),
            field.to_string(),
            operator,
            operand,
            self.case_sensitive,
        ))
    }

    /// Parse multiple condition strings, failing on the first malformed one
    pub fn parse_all<S: AsRef<str>>(&self, conditions: &[S]) -> Result<Vec<Condition>> {
        conditions.iter().map(|c| self.parse(c.as_ref())).collect()
    }

    /// Locate the leftmost operator token
    fn find_operator(condition: &str) -> Option<(usize, Operator)> {
        for (pos, _) in condition.char_indices() {
            let rest = &condition[pos..];
            for op in OPERATORS_BY_LENGTH {
                if !rest.starts_with(op.token()) {
                    continue;
                }
                if op.is_word() && !Self::is_delimited(condition, pos, op.token().len()) {
                    continue;
                }
                return Some((pos, op));
            }
        }
        None
    }

    /// Word operators need whitespace before them and whitespace or the end
    /// of the string after them
    fn is_delimited(condition: &str, pos: usize, len: usize) -> bool {
        let before = condition[..pos].chars().next_back();
        let after = condition[pos + len..].chars().next();
        before.is_some_and(char::is_whitespace) && after.map_or(true, char::is_whitespace)
    }

    fn parse_operand(&self, condition: &str, operator: Operator, operand: &str) -> Result<Operand> {
        match operator {
            Operator::IsEmpty | Operator::IsNotEmpty => {
                if operand.is_empty() {
                    Ok(Operand::None)
                } else {
                    Err(MalformedConditionError::new(
                        condition,
                        format!("operator '{}' does not take an operand", operator),
                    ))
                }
            }
            Operator::Equals | Operator::NotEquals => {
                let text = Self::require_operand(condition, operator, operand)?;
                Ok(Operand::Text(self.fold(text)))
            }
            Operator::In | Operator::NotIn => {
                let list = Self::require_operand(condition, operator, operand)?;
                let mut items: Vec<String> = list
                    .split(LIST_SEPARATOR)
                    .map(|item| self.fold(item.trim()))
                    .collect();
                // an empty value between separators matches a blank field;
                // trailing separators add nothing
                while items.last().is_some_and(String::is_empty) {
                    items.pop();
                }
                if items.is_empty() {
                    return Err(MalformedConditionError::new(
                        condition,
                        format!("operator '{}' needs at least one value", operator),
                    ));
                }
                Ok(Operand::List(items))
            }
            Operator::Matches | Operator::NotMatches => {
                let pattern = Self::require_operand(condition, operator, operand)?;
                RegexBuilder::new(pattern)
                    .case_insensitive(!self.case_sensitive)
                    .build()
                    .map(Operand::Pattern)
                    .map_err(|e| {
                        MalformedConditionError::new(
                            condition,
                            format!("invalid regular expression: {}", e),
                        )
                    })
            }
            Operator::LessThan
            | Operator::LessOrEqual
            | Operator::GreaterThan
            | Operator::GreaterOrEqual => {
                let number = Self::require_operand(condition, operator, operand)?;
                number
                    .parse::<f64>()
                    .ok()
                    .filter(|n| n.is_finite())
                    .map(Operand::Number)
                    .ok_or_else(|| {
                        MalformedConditionError::new(
                            condition,
                            format!("operand '{}' is not a number", number),
                        )
                    })
            }
        }
    }

    fn require_operand<'a>(condition: &str, operator: Operator, operand: &'a str) -> Result<&'a str> {
        if operand.is_empty() {
            Err(MalformedConditionError::new(
                condition,
                format!("operator '{}' needs an operand", operator),
            ))
        } else {
            Ok(operand)
        }
    }

    fn fold(&self, value: &str) -> String {
        fold_case(value, self.case_sensitive).into_owned()
    }
}
