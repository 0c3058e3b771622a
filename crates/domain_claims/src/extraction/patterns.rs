//! Pattern tables for bill text extraction
//!
//! All regexes are compiled once into an [`ExtractionPatterns`] value at
//! startup and shared read-only afterwards.

use regex::Regex;

use core_kernel::Currency;

/// Labels that introduce a diagnosis, in order of preference.
/// Each must be followed by a colon.
const DIAGNOSIS_LABELS: &[&str] = &[
    r"(?:final\s+|provisional\s+|primary\s+)?diagnosis",
    r"condition",
    r"reason\s+for\s+visit",
    r"treatment\s+for",
    r"presenting\s+complaints?",
    r"chief\s+complaints?",
];

/// Narrative phrases that introduce a diagnosis without a colon
const DIAGNOSIS_PHRASES: &[&str] = &[r"diagnosed\s+with", r"admitted\s+for"];

/// Condition names searched for when no labeled field exists.
/// Multi-word entries come before their single-word prefixes.
const CONDITION_VOCABULARY: &[&str] = &[
    r"pregnancy\s+test",
    "pregnancy",
    "fever",
    "cancer",
    "diabetes",
    "fracture",
    "injury",
    "infection",
    "bodyache",
    "headache",
    "asthma",
    "hypertension",
    "pneumonia",
    "malaria",
    "dengue",
    "typhoid",
    "tuberculosis",
    "migraine",
    "arthritis",
    "bronchitis",
    "gastritis",
    "appendicitis",
];

/// Phrases naming the amount actually owed after adjustments
const NET_PAYABLE_PHRASES: &[&str] = &[
    r"amount\s+payable",
    r"total\s+payable",
    r"net\s+payable",
    r"net\s+amount",
    r"final\s+amount",
    r"after\s+discount",
    r"balance\s+due",
    r"amount\s+due",
];

/// Phrases naming a gross total
const GROSS_TOTAL_PHRASES: &[&str] = &[
    r"grand\s+total",
    r"total\s+charges?",
    r"total\s+amount",
    r"total\s+bill(?:\s+amount)?",
    r"bill\s+amount",
    r"total",
];

/// Words that mark a line as money-related for the fallback tier
const AMOUNT_LINE_KEYWORDS: &[&str] = &["total", "amount", "due", "bill", "charge", "pay", "fee"];

/// An amount with Western (`1,234,567.89`) or Indian (`1,23,456`) grouping
const NUMBER: &str = r"(\d{1,3}(?:,\d{2,3})+(?:\.\d+)?|\d+(?:\.\d+)?)";

/// Terminates a labeled phrase: `;`, `|`, a sentence-ending dot, or line end
const PHRASE_END: &str = r"\s*(?:[;|]|\.(?:\s|$)|\r?$)";

/// Which family of total phrases produced a priority match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TotalGroup {
    /// Amount payable, net amount, after discount and similar
    NetPayable,
    /// Grand total, total charge and similar
    GrossTotal,
}

/// Compiled regex tables used by the diagnosis and expense extractors
#[derive(Debug, Clone)]
pub struct ExtractionPatterns {
    pub(crate) diagnosis_labels: Vec<Regex>,
    pub(crate) condition_vocabulary: Regex,
    pub(crate) priority_totals: Vec<(TotalGroup, Regex)>,
    pub(crate) fallback_amounts: Vec<Regex>,
    pub(crate) amount_line_keywords: Regex,
}

impl Default for ExtractionPatterns {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractionPatterns {
    /// Compiles the standard pattern tables
    pub fn new() -> Self {
        let diagnosis_labels = DIAGNOSIS_LABELS
            .iter()
            .map(|label| format!(r"(?im)\b{label}\s*:\s*([^\r\n;|]+?){PHRASE_END}"))
            .chain(
                DIAGNOSIS_PHRASES
                    .iter()
                    .map(|phrase| format!(r"(?im)\b{phrase}\s*:?\s+([^\r\n;|]+?){PHRASE_END}")),
            )
            .map(|pattern| compile(&pattern))
            .collect();

        let condition_vocabulary =
            compile(&format!(r"(?i)\b({})\b", CONDITION_VOCABULARY.join("|")));

        let currency = currency_alternation();
        let total_pattern = |phrases: &[&str]| {
            compile(&format!(
                r"(?i)\b(?:{})\b[\s:\-=]*(?:\(?\s*(?:{currency})\s*\)?[\s:\-=]*)?{NUMBER}",
                phrases.join("|"),
            ))
        };
        let priority_totals = vec![
            (TotalGroup::NetPayable, total_pattern(NET_PAYABLE_PHRASES)),
            (TotalGroup::GrossTotal, total_pattern(GROSS_TOTAL_PHRASES)),
        ];

        let fallback_amounts = vec![
            compile(&format!(r"(?:{})\s*{NUMBER}", symbol_alternation())),
            compile(&format!(r"(?i)\b(?:{})\s*{NUMBER}", word_alternation())),
            compile(&format!(r"(?i){NUMBER}\s*(?:{})\b", suffix_alternation())),
            compile(&format!(r"(?:^|[^\d/.\-]){NUMBER}\s*$")),
            compile(r"(?:^|[^\d,.])(\d{1,3}(?:,\d{2,3})+\.\d{2}|\d{2,}\.\d{2})\b"),
        ];

        let amount_line_keywords =
            compile(&format!(r"(?i)(?:{})", AMOUNT_LINE_KEYWORDS.join("|")));

        Self {
            diagnosis_labels,
            condition_vocabulary,
            priority_totals,
            fallback_amounts,
            amount_line_keywords,
        }
    }
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in extraction pattern must compile")
}

/// Escapes tokens and orders them longest first so `Rs.` wins over `Rs`
fn alternation(mut tokens: Vec<&str>) -> String {
    tokens.sort_by_key(|t| std::cmp::Reverse(t.len()));
    tokens
        .into_iter()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join("|")
}

fn symbol_alternation() -> String {
    alternation(Currency::symbol_tokens())
}

fn word_alternation() -> String {
    alternation(Currency::word_tokens())
}

fn currency_alternation() -> String {
    let mut tokens = Currency::symbol_tokens();
    tokens.extend(Currency::word_tokens());
    alternation(tokens)
}

/// Word tokens usable after a number, where a trailing `\b` must hold
fn suffix_alternation() -> String {
    alternation(
        Currency::word_tokens()
            .into_iter()
            .filter(|t| t.chars().last().is_some_and(char::is_alphanumeric))
            .collect(),
    )
}
