//! Operators for condition clauses

use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison operator of a single condition clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    // String operators
    /// Equals (=)
    Equals,
    /// Not equals (<>)
    NotEquals,

    // Membership operators
    /// In (`a; b; c`)
    In,
    /// Not in
    NotIn,

    // Regex operators
    /// Matches
    Matches,
    /// Not matches
    NotMatches,

    // Numeric operators
    /// Less than (<)
    LessThan,
    /// Less than or equal (<=)
    LessOrEqual,
    /// Greater than (>)
    GreaterThan,
    /// Greater than or equal (>=)
    GreaterOrEqual,

    // Unary operators
    /// Is empty
    IsEmpty,
    /// Is not empty
    IsNotEmpty,
}

impl Operator {
    /// Every operator, in no particular order
    pub const ALL: [Operator; 12] = [
        Operator::Equals,
        Operator::NotEquals,
        Operator::In,
        Operator::NotIn,
        Operator::Matches,
        Operator::NotMatches,
        Operator::LessThan,
        Operator::LessOrEqual,
        Operator::GreaterThan,
        Operator::GreaterOrEqual,
        Operator::IsEmpty,
        Operator::IsNotEmpty,
    ];

    /// The token used for this operator in condition strings
    pub fn token(&self) -> &'static str {
        match self {
            Operator::Equals => "=",
            Operator::NotEquals => "<>",
            Operator::In => "in",
            Operator::NotIn => "not in",
            Operator::Matches => "matches",
            Operator::NotMatches => "not matches",
            Operator::LessThan => "<",
            Operator::LessOrEqual => "<=",
            Operator::GreaterThan => ">",
            Operator::GreaterOrEqual => ">=",
            Operator::IsEmpty => "is empty",
            Operator::IsNotEmpty => "is not empty",
        }
    }

    /// Returns true if this operator takes no operand
    pub fn is_unary(&self) -> bool {
        matches!(self, Operator::IsEmpty | Operator::IsNotEmpty)
    }

    /// Returns true if this is a numeric comparison
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Operator::LessThan
                | Operator::LessOrEqual
                | Operator::GreaterThan
                | Operator::GreaterOrEqual
        )
    }

    /// Returns true if the operand is a `;`-separated list
    pub fn is_membership(&self) -> bool {
        matches!(self, Operator::In | Operator::NotIn)
    }

    /// Returns true if the operand is a regular expression
    pub fn is_regex(&self) -> bool {
        matches!(self, Operator::Matches | Operator::NotMatches)
    }

    /// Returns true if the operator is spelled with words rather than symbols.
    ///
    /// Word operators must be separated from the field name by whitespace.
    pub fn is_word(&self) -> bool {
        self.token().starts_with(|c: char| c.is_ascii_alphabetic())
    }

    /// The logical opposite for string, membership, regex and emptiness operators.
    ///
    /// Numeric operators have no exact opposite, since a non-numeric value
    /// fails both `<` and `>=`.
    pub fn negated(&self) -> Option<Operator> {
        match self {
            Operator::Equals => Some(Operator::NotEquals),
            Operator::NotEquals => Some(Operator::Equals),
            Operator::In => Some(Operator::NotIn),
            Operator::NotIn => Some(Operator::In),
            Operator::Matches => Some(Operator::NotMatches),
            Operator::NotMatches => Some(Operator::Matches),
            Operator::IsEmpty => Some(Operator::IsNotEmpty),
            Operator::IsNotEmpty => Some(Operator::IsEmpty),
            Operator::LessThan
            | Operator::LessOrEqual
            | Operator::GreaterThan
            | Operator::GreaterOrEqual => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
