//! Validation rule expansion for translatable attributes.
//!
//! - `rules`: Rule declaration types (field key -> rule spec)
//! - `placeholder`: Detects and rewrites placeholder tokens
//! - `rule_factory`: Expands a declaration for the active locales

mod placeholder;
mod rule_factory;
mod rules;

pub use placeholder::Placeholder;
pub use rule_factory::{RuleFactory, RuleFormat, RuleOptions};
pub use rules::{RuleDeclaration, RuleSpec};
