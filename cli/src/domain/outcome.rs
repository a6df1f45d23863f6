//! Best-effort batch outcomes.
//!
//! Batch stages never abort on the first failure. They thread a
//! [`BatchSummary`] through every item in order and turn it into a
//! [`BatchOutcome`] once the whole batch has been processed.

use serde::Serialize;

/// Ordered names of the items that failed in a batch. Empty means success.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FailureList(Vec<String>);

impl FailureList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>) {
        self.0.push(name.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }
}

impl From<Vec<String>> for FailureList {
    fn from(names: Vec<String>) -> Self {
        Self(names)
    }
}

impl<'a> IntoIterator for &'a FailureList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl std::fmt::Display for FailureList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.join(", "))
    }
}

/// Aggregate result of a best-effort batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "failed", rename_all = "snake_case")]
pub enum BatchOutcome {
    Success,
    Failure(FailureList),
}

impl BatchOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Failed names, empty on success.
    #[must_use]
    pub fn failures(&self) -> &[String] {
        match self {
            Self::Success => &[],
            Self::Failure(list) => list.names(),
        }
    }
}

/// Accumulator folded over a batch: how many items succeeded and which failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failures: FailureList,
}

impl BatchSummary {
    /// Record the result of one item, keeping input order for failures.
    pub fn record<T, E>(&mut self, name: &str, result: &Result<T, E>) {
        match result {
            Ok(_) => self.succeeded += 1,
            Err(_) => self.failures.push(name),
        }
    }

    /// Fold an ordered sequence of `(name, succeeded)` pairs.
    pub fn from_results<'a>(results: impl IntoIterator<Item = (&'a str, bool)>) -> Self {
        results
            .into_iter()
            .fold(Self::default(), |mut acc, (name, ok)| {
                if ok {
                    acc.succeeded += 1;
                } else {
                    acc.failures.push(name);
                }
                acc
            })
    }

    #[must_use]
    pub fn into_outcome(self) -> BatchOutcome {
        if self.failures.is_empty() {
            BatchOutcome::Success
        } else {
            BatchOutcome::Failure(self.failures)
        }
    }
}
