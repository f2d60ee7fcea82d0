//! Parsed condition types

use super::operator::Operator;
use regex::Regex;
use std::borrow::Cow;
use std::fmt;

/// The operand of a parsed condition.
///
/// `Text` and `List` values are stored in comparison form: lower-cased unless
/// the owning condition is case-sensitive.
#[derive(Debug, Clone)]
pub enum Operand {
    /// Unary operators carry no operand
    None,
    /// String equality operand
    Text(String),
    /// Membership operand, split on `;` and trimmed, never empty
    List(Vec<String>),
    /// Numeric comparison operand
    Number(f64),
    /// Compiled regular expression
    Pattern(Regex),
}

impl Operand {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Operand::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Operand::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Operand::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_pattern(&self) -> Option<&Regex> {
        match self {
            Operand::Pattern(re) => Some(re),
            _ => None,
        }
    }
}

impl PartialEq for Operand {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Operand::None, Operand::None) => true,
            (Operand::Text(a), Operand::Text(b)) => a == b,
            (Operand::List(a), Operand::List(b)) => a == b,
            (Operand::Number(a), Operand::Number(b)) => a == b,
            (Operand::Pattern(a), Operand::Pattern(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

/// One parsed comparison clause, immutable once built.
///
/// Built by [`ConditionParser`](super::ConditionParser), which guarantees that
/// the operand shape agrees with the operator.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    raw: String,
    field: String,
    operator: Operator,
    operand: Operand,
    case_sensitive: bool,
}

impl Condition {
    pub(crate) fn new(
        raw: String,
        field: String,
        operator: Operator,
        operand: Operand,
        case_sensitive: bool,
    ) -> Self {
        Self {
            raw,
            field,
            operator,
            operand,
            case_sensitive,
        }
    }

    /// The condition text as configured
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Record column this condition reads
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn operand(&self) -> &Operand {
        &self.operand
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Bring a record value into the same comparison form as the operand
    pub fn fold<'a>(&self, value: &'a str) -> Cow<'a, str> {
        fold_case(value, self.case_sensitive)
    }
}

pub(crate) fn fold_case(value: &str, case_sensitive: bool) -> Cow<'_, str> {
    if case_sensitive {
        Cow::Borrowed(value)
    } else {
        Cow::Owned(value.to_lowercase())
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl std::str::FromStr for Condition {
    type Err = crate::error::MalformedConditionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        super::ConditionParser::new().parse(s)
    }
}
