//! Condition Parsing Module
//!
//! Conditions are configured by administrators as plain strings, one clause
//! per string. A processor holds a list of them and matches a record only
//! when every clause matches.
//!
//! # Syntax
//!
//! ```text
//! FIELD_NAME <operator> [operand]
//! ```
//!
//! ```yaml
//! conditions:
//!   - STATUS = cancelled
//!   - DEPT in ICU; OR; PACU
//!   - LOCATION matches ^PMH
//!   - AGE >= 65
//!   - NOTES is empty
//! ```
//!
//! ## Supported Operators
//! - `=` / `<>` (case-insensitive string equality / inequality)
//! - `in` / `not in` (case-insensitive membership, operand split on `;`)
//! - `matches` / `not matches` (case-insensitive regex, partial match)
//! - `<`, `<=`, `>`, `>=` (numeric comparison)
//! - `is empty` / `is not empty` (no operand)
//!
//! Field names are matched against record columns exactly.

mod operator;
mod parser;
mod types;

pub use operator::Operator;
pub use parser::ConditionParser;
pub use types::{Condition, Operand};
