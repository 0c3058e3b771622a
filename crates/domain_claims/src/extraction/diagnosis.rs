//! Diagnosis extraction from bill text

use tracing::debug;

use super::patterns::ExtractionPatterns;

/// Accepted captured phrase length, exclusive on both ends
const MIN_DIAGNOSIS_CHARS: usize = 3;
const MAX_DIAGNOSIS_CHARS: usize = 100;

/// Extracts the treated condition from bill text
///
/// Labeled fields ("Diagnosis:", "Chief Complaint:" ...) are tried in
/// order and the first plausible capture wins. Only when no label matches
/// does the leftmost vocabulary term count, title-cased.
pub fn extract_diagnosis(patterns: &ExtractionPatterns, text: &str) -> Option<String> {
    for (index, regex) in patterns.diagnosis_labels.iter().enumerate() {
        let labeled = regex
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| collapse_whitespace(m.as_str()))
            .find(|phrase| is_plausible(phrase));

        if let Some(diagnosis) = labeled {
            debug!(label_index = index, %diagnosis, "Diagnosis found in labeled field");
            return Some(diagnosis);
        }
    }

    let term = patterns
        .condition_vocabulary
        .find(text)
        .map(|m| title_case(m.as_str()))?;
    debug!(%term, "Diagnosis inferred from condition vocabulary");
    Some(term)
}

fn is_plausible(phrase: &str) -> bool {
    let len = phrase.chars().count();
    len > MIN_DIAGNOSIS_CHARS && len < MAX_DIAGNOSIS_CHARS
}

pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
