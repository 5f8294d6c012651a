//! Rule declaration types.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Field key -> rule spec, in declaration order.
pub type RuleDeclaration = IndexMap<String, RuleSpec>;

/// The rules attached to one field.
///
/// Deserializes from JSON as: string -> [`RuleSpec::Rules`], array ->
/// [`RuleSpec::List`], anything else -> [`RuleSpec::Scalar`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleSpec {
    /// Pipe-delimited rule string such as `"required|min:3"`
    Rules(String),
    /// Ordered list of rule specs
    List(Vec<RuleSpec>),
    /// Any other value, passed through untouched
    Scalar(serde_json::Value),
}

impl From<&str> for RuleSpec {
    fn from(rules: &str) -> Self {
        RuleSpec::Rules(rules.to_string())
    }
}

impl From<String> for RuleSpec {
    fn from(rules: String) -> Self {
        RuleSpec::Rules(rules)
    }
}

impl<T: Into<RuleSpec>> From<Vec<T>> for RuleSpec {
    fn from(list: Vec<T>) -> Self {
        RuleSpec::List(list.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for RuleSpec {
    fn from(value: serde_json::Value) -> Self {
        RuleSpec::Scalar(value)
    }
}
