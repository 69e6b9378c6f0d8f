use crate::models::{questions, GiftItem, QuizAnswers};

use super::tables::{canonical_keyword, expand_answer, question_weight};

pub const MAX_SCORE: u8 = 100;

/// Minimum length of a search keyword after sanitizing
pub const MIN_KEYWORD_LEN: usize = 3;

/// Bonus for an answer that names one of the item's relationship or occasion tags
pub const DIRECT_TAG_BONUS: i64 = 20;

pub const TITLE_KEYWORD_POINTS: i64 = 28;
pub const DESCRIPTION_KEYWORD_POINTS: i64 = 18;
pub const TAG_KEYWORD_POINTS: i64 = 32;

pub const MAX_RATING: f64 = 5.0;
pub const MAX_PROFITABILITY: f64 = 1.0;

/// Scores how well an item fits a set of quiz answers
///
/// Each answer value is expanded through the alias table and every item tag
/// containing an expanded value adds the question's weight, so an item with
/// several matching tags scores several times over.
pub fn score_by_answers(item: &GiftItem, answers: &QuizAnswers) -> u8 {
    let mut score: i64 = 0;

    for (question, answer) in answers.iter() {
        let weight = question_weight(question);
        for value in answer.values() {
            for expanded in expand_answer(question, value) {
                let points = weight.saturating_mul(count_tag_matches(item, &expanded));
                score = score.saturating_add(points);
            }
        }
    }

    score = score
        .saturating_add(direct_tag_bonus(
            &item.relationship_tags,
            &answers.values_for(questions::RELATIONSHIP),
        ))
        .saturating_add(direct_tag_bonus(
            &item.occasion_tags,
            &answers.values_for(questions::OCCASION),
        ))
        .saturating_add(quality_bonus(item));

    clamp_score(score)
}

/// Scores an item against sanitized search keywords
pub fn score_by_keywords(item: &GiftItem, keywords: &[String]) -> u8 {
    clamp_score(keyword_match_points(item, keywords).saturating_add(rating_bonus(item)))
}

/// Points earned from title, description and tag hits, without the rating bonus
pub fn keyword_match_points(item: &GiftItem, keywords: &[String]) -> i64 {
    let titles = lowercase_variants(&item.title, item.title_ru.as_deref());
    let descriptions = lowercase_variants(&item.description, item.description_ru.as_deref());

    let mut points = 0;
    for keyword in keywords.iter().filter(|k| !k.is_empty()) {
        let keyword = keyword.to_lowercase();
        let canonical = canonical_keyword(&keyword);

        if titles.iter().any(|t| t.contains(&keyword)) {
            points += TITLE_KEYWORD_POINTS;
        }
        if descriptions.iter().any(|d| d.contains(&keyword)) {
            points += DESCRIPTION_KEYWORD_POINTS;
        }
        if item.tags.iter().any(|t| t.to_lowercase().contains(canonical)) {
            points += TAG_KEYWORD_POINTS;
        }
    }
    points
}

/// Splits a free-text query into lowercase alphanumeric keywords
///
/// Punctuation is removed rather than treated as a separator, and tokens
/// shorter than [`MIN_KEYWORD_LEN`] characters are discarded.
pub fn sanitize_keywords(query: &str) -> Vec<String> {
    let cleaned: String = query
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    cleaned
        .split_whitespace()
        .filter(|word| word.chars().count() >= MIN_KEYWORD_LEN)
        .map(str::to_string)
        .collect()
}

/// Number of item tags (of any kind) containing `value`, case-insensitively
pub fn count_tag_matches(item: &GiftItem, value: &str) -> i64 {
    let value = value.to_lowercase();
    if value.is_empty() {
        return 0;
    }
    item.all_tags()
        .filter(|tag| tag.to_lowercase().contains(&value))
        .count() as i64
}

/// Bonus derived from rating and profitability for quiz scoring
pub fn quality_bonus(item: &GiftItem) -> i64 {
    let rating = bounded_rating(item)
        .map(|r| ((r - 4.0) * 10.0).round().clamp(0.0, 10.0) as i64)
        .unwrap_or(0);
    let profitability = bounded_profitability(item)
        .map(|p| (p * 2.0).round() as i64)
        .unwrap_or(0);
    rating + profitability
}

/// Bonus derived from rating alone for keyword scoring
pub fn rating_bonus(item: &GiftItem) -> i64 {
    bounded_rating(item)
        .map(|r| (r * 3.0).round() as i64)
        .unwrap_or(0)
}

/// Rating limited to `[0, MAX_RATING]`; catalog files are not trusted to stay in range
fn bounded_rating(item: &GiftItem) -> Option<f64> {
    item.rating
        .filter(|r| !r.is_nan())
        .map(|r| r.clamp(0.0, MAX_RATING))
}

fn bounded_profitability(item: &GiftItem) -> Option<f64> {
    item.profitability_score
        .filter(|p| !p.is_nan())
        .map(|p| p.clamp(0.0, MAX_PROFITABILITY))
}

pub fn clamp_score(score: i64) -> u8 {
    score.clamp(0, MAX_SCORE as i64) as u8
}

fn direct_tag_bonus(tags: &[String], values: &[&str]) -> i64 {
    let direct = values
        .iter()
        .any(|value| tags.iter().any(|tag| tag.eq_ignore_ascii_case(value)));
    if direct {
        DIRECT_TAG_BONUS
    } else {
        0
    }
}

fn lowercase_variants(primary: &str, translated: Option<&str>) -> Vec<String> {
    std::iter::once(primary)
        .chain(translated)
        .map(str::to_lowercase)
        .collect()
}
