use serde::de::IgnoredAny;
use serde::Deserialize;
use std::collections::BTreeMap;

use super::Locale;

/// Question identifiers understood by the quiz scorer
pub mod questions {
    pub const RELATIONSHIP: &str = "relationship";
    pub const INTERESTS: &str = "interests";
    pub const INTEREST: &str = "interest";
    pub const OCCASION: &str = "occasion";
    pub const BUDGET: &str = "budget";
}

/// Answer to a single quiz question
///
/// Single-choice questions send a string, multi-select questions send an array.
/// Any other JSON shape is accepted and contributes nothing to the score.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum AnswerValue {
    Single(String),
    Multi(Vec<String>),
    Unsupported(IgnoredAny),
}

impl AnswerValue {
    /// Trimmed, non-empty values of this answer
    pub fn values(&self) -> Vec<&str> {
        let raw: Vec<&str> = match self {
            AnswerValue::Single(value) => vec![value.as_str()],
            AnswerValue::Multi(values) => values.iter().map(String::as_str).collect(),
            AnswerValue::Unsupported(_) => Vec::new(),
        };
        raw.into_iter()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .collect()
    }
}

/// Quiz answers keyed by question identifier
///
/// Ordered so that iteration (and therefore logging) is deterministic.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct QuizAnswers(BTreeMap<String, AnswerValue>);

impl QuizAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a single-choice answer
    pub fn single(mut self, question: &str, value: &str) -> Self {
        self.0
            .insert(question.to_string(), AnswerValue::Single(value.to_string()));
        self
    }

    /// Adds or replaces a multi-select answer
    pub fn multi(mut self, question: &str, values: &[&str]) -> Self {
        self.0.insert(
            question.to_string(),
            AnswerValue::Multi(values.iter().map(|v| v.to_string()).collect()),
        );
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnswerValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Values answered for `question` (question ids compare case-insensitively)
    pub fn values_for(&self, question: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case(question))
            .flat_map(|(_, v)| v.values())
            .collect()
    }

    /// The selected budget bucket, if the budget question was answered
    pub fn budget(&self) -> Option<&str> {
        self.values_for(questions::BUDGET).into_iter().next()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// What the caller is looking for
#[derive(Debug, Clone, PartialEq)]
pub enum GiftQuery {
    /// Quiz answers scored against weighted tag tables
    Answers(QuizAnswers),
    /// Free-text search with an optional budget bucket
    Keywords { text: String, budget: Option<String> },
}

impl GiftQuery {
    pub fn budget(&self) -> Option<&str> {
        match self {
            GiftQuery::Answers(answers) => answers.budget(),
            GiftQuery::Keywords { budget, .. } => budget
                .as_deref()
                .map(str::trim)
                .filter(|b| !b.is_empty()),
        }
    }
}

/// Body of `POST /api/quiz/submit`
#[derive(Debug, Deserialize)]
pub struct QuizSubmission {
    #[serde(default)]
    pub answers: QuizAnswers,
    pub limit: Option<usize>,
    #[serde(default)]
    pub locale: Locale,
}

/// Query string of `GET /api/search`
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    pub budget: Option<String>,
    pub limit: Option<usize>,
    #[serde(default)]
    pub locale: Locale,
}
