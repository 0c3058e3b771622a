//! Policy exclusion matching
//!
//! A diagnosis is excluded when it and an exclusion term contain one another,
//! ignoring case. Guards name benign phrases that must not trigger a given
//! term, e.g. a pregnancy test is not a pregnancy.

use serde::{Deserialize, Serialize};

use crate::bill::is_placeholder;

/// Conditions the standard policy never covers
pub const STANDARD_EXCLUSIONS: [&str; 8] = [
    "HIV/AIDS",
    "Parkinson's disease",
    "Alzheimer's disease",
    "pregnancy",
    "substance abuse",
    "self-inflicted injuries",
    "sexually transmitted diseases(std)",
    "pre-existing conditions",
];

/// Diagnoses shorter than this are never matched
const MIN_DIAGNOSIS_CHARS: usize = 3;

/// A benign phrase that suppresses one exclusion term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionGuard {
    /// Exclusion term the guard applies to
    pub term: String,
    /// Phrase that, when present in the diagnosis, suppresses the term
    pub benign_phrase: String,
}

impl ExclusionGuard {
    pub fn new(term: impl Into<String>, benign_phrase: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            benign_phrase: benign_phrase.into(),
        }
    }

    fn suppresses(&self, term: &str, diagnosis: &str) -> bool {
        self.term.eq_ignore_ascii_case(term)
            && diagnosis.contains(&self.benign_phrase.to_lowercase())
    }
}

/// Ordered list of excluded conditions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionList {
    terms: Vec<String>,
    guards: Vec<ExclusionGuard>,
}

impl Default for ExclusionList {
    fn default() -> Self {
        Self::standard()
    }
}

impl ExclusionList {
    /// Creates a list from terms, with no guards
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            terms: terms
                .into_iter()
                .map(Into::into)
                .map(|t: String| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
            guards: Vec::new(),
        }
    }

    /// The standard policy list, guarded against pregnancy tests
    pub fn standard() -> Self {
        Self::new(STANDARD_EXCLUSIONS).with_guard(ExclusionGuard::new("pregnancy", "pregnancy test"))
    }

    /// Adds a guard
    pub fn with_guard(mut self, guard: ExclusionGuard) -> Self {
        self.guards.push(guard);
        self
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn guards(&self) -> &[ExclusionGuard] {
        &self.guards
    }

    /// Returns the first term the diagnosis matches, if any
    pub fn matching_term(&self, diagnosis: &str) -> Option<&str> {
        let diagnosis = diagnosis.trim();
        if diagnosis.chars().count() < MIN_DIAGNOSIS_CHARS || is_placeholder(diagnosis) {
            return None;
        }

        let needle = diagnosis.to_lowercase();
        self.terms
            .iter()
            .find(|term| {
                let term_lower = term.to_lowercase();
                let contained = needle.contains(&term_lower) || term_lower.contains(&needle);
                contained && !self.guards.iter().any(|g| g.suppresses(term, &needle))
            })
            .map(String::as_str)
    }
}

/// True if the diagnosis falls under any exclusion
pub fn is_excluded(diagnosis: Option<&str>, exclusions: &ExclusionList) -> bool {
    diagnosis.is_some_and(|d| exclusions.matching_term(d).is_some())
}
