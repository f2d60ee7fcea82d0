//! Condition evaluation against visit records

use clarity_core::{Condition, Operand, Operator, Record};
use std::cmp::Ordering;

/// Evaluates parsed conditions against records.
///
/// Evaluation never fails: a missing column, a non-numeric value for a
/// numeric operator or an operand of the wrong shape all resolve to
/// "does not match".
pub struct ConditionEvaluator;

impl ConditionEvaluator {
    /// Evaluate a single condition against a record
    pub fn evaluate(condition: &Condition, record: &Record) -> bool {
        let value = record.get(condition.field()).map(String::as_str);
        let text = value.unwrap_or("");

        let result = match condition.operator() {
            Operator::Equals => Self::text_equals(condition, text),
            Operator::NotEquals => Self::text_equals(condition, text).map(|eq| !eq),
            Operator::In => Self::list_contains(condition, text),
            Operator::NotIn => Self::list_contains(condition, text).map(|found| !found),
            Operator::Matches => Self::pattern_matches(condition, text),
            Operator::NotMatches => Self::pattern_matches(condition, text).map(|m| !m),
            Operator::LessThan => {
                Self::compare(condition, value).map(|ord| ord == Ordering::Less)
            }
            Operator::LessOrEqual => {
                Self::compare(condition, value).map(|ord| ord != Ordering::Greater)
            }
            Operator::GreaterThan => {
                Self::compare(condition, value).map(|ord| ord == Ordering::Greater)
            }
            Operator::GreaterOrEqual => {
                Self::compare(condition, value).map(|ord| ord != Ordering::Less)
            }
            Operator::IsEmpty => Some(Self::is_blank(value)),
            Operator::IsNotEmpty => Some(!Self::is_blank(value)),
        }
        .unwrap_or(false);

        tracing::trace!("condition '{}' -> {}", condition, result);
        result
    }

    /// True when every condition matches; stops at the first one that does not.
    ///
    /// An empty list matches.
    pub fn evaluate_all(conditions: &[Condition], record: &Record) -> bool {
        Self::first_unmatched(conditions, record).is_none()
    }

    /// The first condition, in configuration order, that does not match
    pub fn first_unmatched<'a>(conditions: &'a [Condition], record: &Record) -> Option<&'a Condition> {
        conditions
            .iter()
            .find(|condition| !Self::evaluate(condition, record))
    }

    fn text_equals(condition: &Condition, value: &str) -> Option<bool> {
        let expected = condition.operand().as_text()?;
        Some(condition.fold(value) == expected)
    }

    fn list_contains(condition: &Condition, value: &str) -> Option<bool> {
        let items = condition.operand().as_list()?;
        let value = condition.fold(value);
        Some(items.iter().any(|item| *item == value))
    }

    fn pattern_matches(condition: &Condition, value: &str) -> Option<bool> {
        let pattern = condition.operand().as_pattern()?;
        Some(pattern.is_match(value))
    }

    /// Compare the record value with the operand; `None` when either side is
    /// not a number
    fn compare(condition: &Condition, value: Option<&str>) -> Option<Ordering> {
        let expected = match condition.operand() {
            Operand::Number(n) => *n,
            _ => return None,
        };
        let actual = value?.trim().parse::<f64>().ok()?;
        actual.partial_cmp(&expected)
    }

    fn is_blank(value: Option<&str>) -> bool {
        value.map_or(true, |v| v.trim().is_empty())
    }
}
