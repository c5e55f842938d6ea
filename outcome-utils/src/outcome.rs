use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::convert::TryFrom;
use std::fmt;
use std::iter::FromIterator;

use crate::error::OutcomeError;

/// One concrete assignment of values to negotiation issues.
///
/// Issues are kept ordered by name, so two outcomes with the same
/// issue-value pairs are equal and hash the same, regardless of the order
/// in which they were built.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Outcome(BTreeMap<String, String>);

impl Outcome {
    pub fn new() -> Outcome {
        Outcome(BTreeMap::new())
    }

    pub fn with(mut self, issue: impl ToString, value: impl ToString) -> Outcome {
        self.0.insert(issue.to_string(), value.to_string());
        self
    }

    pub fn get(&self, issue: &str) -> Option<&str> {
        self.0.get(issue).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(issue, value)| (issue.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Mapping form used when exchanging outcomes with foreign code.
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.0
                .iter()
                .map(|(issue, value)| (issue.clone(), Value::String(value.clone())))
                .collect(),
        )
    }
}

impl<K: ToString, V: ToString> FromIterator<(K, V)> for Outcome {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Outcome(
            iter.into_iter()
                .map(|(issue, value)| (issue.to_string(), value.to_string()))
                .collect(),
        )
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (idx, (issue, value)) in self.0.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", issue, value)?;
        }
        write!(f, "}}")
    }
}

/// Adapter for offers coming from outside of the core. Scalars are accepted
/// as values, anything nested is rejected.
impl TryFrom<&Value> for Outcome {
    type Error = OutcomeError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let map = value
            .as_object()
            .ok_or_else(|| OutcomeError::NotAMapping(value.to_string()))?;

        map.iter()
            .map(|(issue, value)| {
                let value = match value {
                    Value::String(s) => s.clone(),
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    _ => {
                        return Err(OutcomeError::InvalidValue {
                            issue: issue.clone(),
                            value: value.to_string(),
                        })
                    }
                };
                Ok((issue.clone(), value))
            })
            .collect::<Result<BTreeMap<_, _>, _>>()
            .map(Outcome)
    }
}
