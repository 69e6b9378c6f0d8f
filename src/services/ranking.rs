use std::cmp::Ordering;

use crate::models::{GiftItem, GiftQuery, QuizAnswers, ScoredGift};

use super::scoring::{
    clamp_score, keyword_match_points, rating_bonus, sanitize_keywords, score_by_answers,
    score_by_keywords,
};
use super::tables::budget_range;

/// Keeps items whose price range overlaps the bucket's range
///
/// Items without prices are treated as spanning `[0, DEFAULT_MAX_PRICE]`.
pub fn filter_by_budget<'a>(items: &[&'a GiftItem], bucket: &str) -> Vec<&'a GiftItem> {
    let range = budget_range(bucket);
    items
        .iter()
        .copied()
        .filter(|item| {
            let (min, max) = item.price_bounds();
            range.overlaps(min, max)
        })
        .collect()
}

/// Ranks the catalog against a query and returns at most `limit` items
pub fn rank(catalog: &[GiftItem], query: &GiftQuery, limit: usize) -> Vec<ScoredGift> {
    let mut candidates: Vec<&GiftItem> = catalog.iter().filter(|item| item.is_active).collect();
    if let Some(bucket) = query.budget() {
        candidates = filter_by_budget(&candidates, bucket);
    }

    let ranked = match query {
        GiftQuery::Answers(answers) => rank_by_answers(&candidates, answers, limit),
        GiftQuery::Keywords { text, .. } => rank_by_keywords(&candidates, text, limit),
    };

    tracing::debug!(
        catalog_size = catalog.len(),
        candidates = candidates.len(),
        returned = ranked.len(),
        "Ranked catalog"
    );

    ranked
}

fn rank_by_answers(
    candidates: &[&GiftItem],
    answers: &QuizAnswers,
    limit: usize,
) -> Vec<ScoredGift> {
    let mut scored: Vec<ScoredGift> = candidates
        .iter()
        .map(|item| ScoredGift {
            item: (*item).clone(),
            score: score_by_answers(item, answers),
        })
        .collect();

    sort_by_score(&mut scored);
    scored.truncate(limit);
    scored
}

/// Keyword ranking with backfill
///
/// Items with at least one keyword hit come first. When fewer than `limit`
/// items match, the rest of the list is filled with the best-rated remaining
/// items at score 0. A query with no usable keywords falls back to a
/// rating-ordered list scored by rating alone.
fn rank_by_keywords(candidates: &[&GiftItem], text: &str, limit: usize) -> Vec<ScoredGift> {
    let keywords = sanitize_keywords(text);

    if keywords.is_empty() {
        let mut scored: Vec<ScoredGift> = candidates
            .iter()
            .map(|item| ScoredGift {
                item: (*item).clone(),
                score: fallback_score(item),
            })
            .collect();
        sort_by_score(&mut scored);
        scored.truncate(limit);
        return scored;
    }

    let (matched, unmatched): (Vec<&GiftItem>, Vec<&GiftItem>) = candidates
        .iter()
        .copied()
        .partition(|item| keyword_match_points(item, &keywords) > 0);

    let mut ranked: Vec<ScoredGift> = matched
        .into_iter()
        .map(|item| ScoredGift {
            item: item.clone(),
            score: score_by_keywords(item, &keywords),
        })
        .collect();
    sort_by_score(&mut ranked);
    ranked.truncate(limit);

    if ranked.len() < limit {
        let mut backfill = unmatched;
        backfill.sort_by(|a, b| by_quality_desc(a, b));
        ranked.extend(
            backfill
                .into_iter()
                .take(limit - ranked.len())
                .map(|item| ScoredGift {
                    item: item.clone(),
                    score: 0,
                }),
        );
    }

    ranked
}

/// Score descending, then quality descending; stable so catalog order breaks remaining ties
fn sort_by_score(scored: &mut [ScoredGift]) {
    scored.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| by_quality_desc(&a.item, &b.item))
    });
}

fn by_quality_desc(a: &GiftItem, b: &GiftItem) -> Ordering {
    b.quality().total_cmp(&a.quality())
}

/// Deterministic score for an item in the rating-only fallback
pub fn fallback_score(item: &GiftItem) -> u8 {
    clamp_score(rating_bonus(item))
}
