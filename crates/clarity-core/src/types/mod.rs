//! Type definitions for Clarity

pub mod record;

pub use record::Record;
