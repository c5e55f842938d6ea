use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::convert::TryFrom;

use crate::error::SpaceError;
use crate::outcome::Outcome;

/// Negotiation issue together with its finite domain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub name: String,
    pub values: Vec<String>,
}

impl Issue {
    pub fn new(name: impl ToString, values: &[&str]) -> Issue {
        Issue {
            name: name.to_string(),
            values: values.iter().map(|value| value.to_string()).collect(),
        }
    }
}

/// Finite multi-issue outcome space.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Issue>", into = "Vec<Issue>")]
pub struct OutcomeSpace {
    issues: Vec<Issue>,
}

impl OutcomeSpace {
    pub fn new(issues: Vec<Issue>) -> Result<OutcomeSpace, SpaceError> {
        let mut names = HashSet::new();
        for issue in &issues {
            if issue.values.is_empty() {
                return Err(SpaceError::EmptyDomain(issue.name.clone()));
            }
            if !names.insert(issue.name.as_str()) {
                return Err(SpaceError::DuplicateIssue(issue.name.clone()));
            }

            let mut values = HashSet::new();
            if let Some(value) = issue.values.iter().find(|value| !values.insert(*value)) {
                return Err(SpaceError::DuplicateValue {
                    issue: issue.name.clone(),
                    value: value.clone(),
                });
            }
        }
        Ok(OutcomeSpace { issues })
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn issue(&self, name: &str) -> Option<&Issue> {
        self.issues.iter().find(|issue| issue.name == name)
    }

    /// Number of distinct outcomes. Saturates instead of overflowing.
    pub fn size(&self) -> u64 {
        self.issues.iter().fold(1u64, |size, issue| {
            size.saturating_mul(issue.values.len() as u64)
        })
    }

    pub fn contains(&self, outcome: &Outcome) -> bool {
        outcome.len() == self.issues.len()
            && self.issues.iter().all(|issue| {
                outcome
                    .get(&issue.name)
                    .map(|value| issue.values.iter().any(|v| v == value))
                    .unwrap_or(false)
            })
    }

    /// Draws every issue value independently and uniformly.
    pub fn random_outcome<R: Rng + ?Sized>(&self, rng: &mut R) -> Outcome {
        self.issues
            .iter()
            .filter_map(|issue| {
                issue
                    .values
                    .choose(rng)
                    .map(|value| (issue.name.clone(), value.clone()))
            })
            .collect()
    }

    /// Infinite stream of independent random outcomes. Dropping the iterator
    /// and calling `sample` again starts a fresh stream.
    pub fn sample<'a, R: Rng + ?Sized>(
        &'a self,
        rng: &'a mut R,
    ) -> impl Iterator<Item = Outcome> + 'a {
        std::iter::repeat_with(move || self.random_outcome(rng))
    }

    /// Lazy Cartesian product of all issue domains.
    pub fn enumerate(&self) -> Enumerate<'_> {
        Enumerate {
            space: self,
            cursor: Some(vec![0; self.issues.len()]),
        }
    }

    /// Materializes the whole space, but only if it has at most `limit` outcomes.
    pub fn all_outcomes(&self, limit: u64) -> Result<Vec<Outcome>, SpaceError> {
        let size = self.size();
        if size > limit {
            return Err(SpaceError::TooLarge { size, limit });
        }
        Ok(self.enumerate().collect())
    }
}

impl TryFrom<Vec<Issue>> for OutcomeSpace {
    type Error = SpaceError;

    fn try_from(issues: Vec<Issue>) -> Result<Self, Self::Error> {
        OutcomeSpace::new(issues)
    }
}

impl From<OutcomeSpace> for Vec<Issue> {
    fn from(space: OutcomeSpace) -> Self {
        space.issues
    }
}

pub struct Enumerate<'a> {
    space: &'a OutcomeSpace,
    /// Value index per issue. `None` after the last outcome was returned.
    cursor: Option<Vec<usize>>,
}

impl<'a> Iterator for Enumerate<'a> {
    type Item = Outcome;

    fn next(&mut self) -> Option<Outcome> {
        let cursor = self.cursor.as_mut()?;
        let issues = &self.space.issues;

        let outcome = issues
            .iter()
            .zip(cursor.iter())
            .map(|(issue, idx)| (issue.name.clone(), issue.values[*idx].clone()))
            .collect();

        // Odometer step, last issue changes fastest.
        let mut exhausted = true;
        for pos in (0..cursor.len()).rev() {
            cursor[pos] += 1;
            if cursor[pos] < issues[pos].values.len() {
                exhausted = false;
                break;
            }
            cursor[pos] = 0;
        }

        if exhausted {
            self.cursor = None;
        }
        Some(outcome)
    }
}
