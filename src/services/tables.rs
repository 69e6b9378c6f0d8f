//! Static lookup tables shared by every scoring call.
//!
//! Built once on first use and never mutated afterwards.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Weight applied to answers for questions missing from [`QUESTION_WEIGHTS`]
pub const DEFAULT_QUESTION_WEIGHT: i64 = 5;

/// Upper bound used for the open-ended "100-plus" bucket
pub const OPEN_BUDGET_CEILING: f64 = 1_000_000.0;

/// Inclusive price range of a budget bucket
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetRange {
    pub min: f64,
    pub max: f64,
}

impl BudgetRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// True when `[min, max]` and this range share at least one point
    pub fn overlaps(&self, min: f64, max: f64) -> bool {
        min <= self.max && max >= self.min
    }
}

/// Range used when a bucket label is not recognised
pub const DEFAULT_BUDGET_RANGE: BudgetRange = BudgetRange::new(0.0, 100.0);

pub static QUESTION_WEIGHTS: LazyLock<HashMap<&'static str, i64>> = LazyLock::new(|| {
    HashMap::from([
        ("relationship", 15),
        ("interests", 24),
        ("interest", 24),
        ("occasion", 18),
        ("hobbies", 18),
        ("personality", 14),
        ("budget", 12),
        ("style", 12),
        ("age", 10),
        ("lifestyle", 10),
        ("values", 8),
        ("gender", 6),
        ("experience", 4),
    ])
});

type AliasTable = HashMap<&'static str, HashMap<&'static str, &'static [&'static str]>>;

/// Answer expansions keyed by question, then by selected value
pub static ANSWER_ALIASES: LazyLock<AliasTable> = LazyLock::new(|| {
    let relationship: HashMap<&'static str, &'static [&'static str]> = HashMap::from([
        ("colleague", &["colleague-peer", "coworker-boss"] as &[&str]),
        ("boss", &["coworker-boss"] as &[&str]),
        ("partner", &["partner", "romantic"] as &[&str]),
        ("spouse", &["partner", "romantic"] as &[&str]),
        ("parent", &["parent", "family"] as &[&str]),
        ("sibling", &["sibling", "family"] as &[&str]),
        ("child", &["kids", "family"] as &[&str]),
        ("friend", &["friend", "friend-close"] as &[&str]),
    ]);

    let interests: HashMap<&'static str, &'static [&'static str]> = HashMap::from([
        ("wellness", &["interest-wellness", "self-care"] as &[&str]),
        ("fitness", &["interest-fitness", "interest-wellness"] as &[&str]),
        ("tech", &["tech", "gadgets"] as &[&str]),
        ("gaming", &["gaming", "tech"] as &[&str]),
        ("cooking", &["interest-cooking", "kitchen"] as &[&str]),
        ("coffee", &["interest-coffee", "kitchen"] as &[&str]),
        ("outdoors", &["interest-outdoors", "adventure"] as &[&str]),
        ("travel", &["interest-travel", "adventure"] as &[&str]),
        ("reading", &["interest-reading", "books"] as &[&str]),
        ("art", &["interest-art", "creative"] as &[&str]),
        ("music", &["interest-music"] as &[&str]),
        ("gardening", &["interest-gardening", "eco"] as &[&str]),
        ("home", &["home", "cozy"] as &[&str]),
    ]);

    let occasion: HashMap<&'static str, &'static [&'static str]> = HashMap::from([
        ("birthday", &["birthday"] as &[&str]),
        ("anniversary", &["anniversary", "romantic"] as &[&str]),
        ("holiday", &["holiday", "christmas"] as &[&str]),
        ("thank-you", &["thank-you", "appreciation"] as &[&str]),
        ("housewarming", &["housewarming", "home"] as &[&str]),
        ("wedding", &["wedding", "home"] as &[&str]),
        ("graduation", &["graduation", "milestone"] as &[&str]),
    ]);

    HashMap::from([
        ("relationship", relationship),
        ("interest", interests.clone()),
        ("interests", interests),
        ("occasion", occasion),
    ])
});

/// Search keyword to canonical tag
pub static KEYWORD_ALIASES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("boss", "coworker-boss"),
        ("manager", "coworker-boss"),
        ("coworker", "colleague-peer"),
        ("colleague", "colleague-peer"),
        ("yoga", "interest-wellness"),
        ("meditation", "interest-wellness"),
        ("spa", "interest-wellness"),
        ("gym", "interest-fitness"),
        ("fitness", "interest-fitness"),
        ("running", "interest-fitness"),
        ("mom", "parent"),
        ("mother", "parent"),
        ("dad", "parent"),
        ("father", "parent"),
        ("wife", "partner"),
        ("husband", "partner"),
        ("girlfriend", "partner"),
        ("boyfriend", "partner"),
        ("gadget", "tech"),
        ("gadgets", "tech"),
        ("coffee", "interest-coffee"),
        ("cooking", "interest-cooking"),
        ("chef", "interest-cooking"),
        ("hiking", "interest-outdoors"),
        ("camping", "interest-outdoors"),
        ("book", "interest-reading"),
        ("books", "interest-reading"),
        ("reader", "interest-reading"),
        ("gamer", "gaming"),
        ("plants", "interest-gardening"),
        ("garden", "interest-gardening"),
        ("music", "interest-music"),
        ("travel", "interest-travel"),
    ])
});

pub static BUDGET_BUCKETS: LazyLock<HashMap<&'static str, BudgetRange>> = LazyLock::new(|| {
    HashMap::from([
        ("under-25", BudgetRange::new(0.0, 25.0)),
        ("25-50", BudgetRange::new(25.0, 50.0)),
        ("50-100", BudgetRange::new(50.0, 100.0)),
        ("100-plus", BudgetRange::new(100.0, OPEN_BUDGET_CEILING)),
    ])
});

/// Weight of a quiz question, falling back to [`DEFAULT_QUESTION_WEIGHT`]
pub fn question_weight(question: &str) -> i64 {
    QUESTION_WEIGHTS
        .get(question.to_lowercase().as_str())
        .copied()
        .unwrap_or(DEFAULT_QUESTION_WEIGHT)
}

/// Expands an answer value into the lowercase values matched against tags.
/// Unmapped values expand to themselves.
pub fn expand_answer(question: &str, value: &str) -> Vec<String> {
    let value = value.to_lowercase();
    match ANSWER_ALIASES
        .get(question.to_lowercase().as_str())
        .and_then(|aliases| aliases.get(value.as_str()))
    {
        Some(expanded) => expanded.iter().map(|v| v.to_string()).collect(),
        None => vec![value],
    }
}

/// Canonical tag for a sanitized search keyword
pub fn canonical_keyword(keyword: &str) -> &str {
    KEYWORD_ALIASES.get(keyword).copied().unwrap_or(keyword)
}

/// Price range for a budget bucket label
pub fn budget_range(bucket: &str) -> BudgetRange {
    BUDGET_BUCKETS
        .get(bucket.trim().to_lowercase().as_str())
        .copied()
        .unwrap_or(DEFAULT_BUDGET_RANGE)
}
