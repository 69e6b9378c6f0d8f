use serde::{Deserialize, Serialize};

/// Price ceiling assumed for items that do not declare a `maxPrice`
pub const DEFAULT_MAX_PRICE: f64 = 1000.0;

/// A giftable product in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GiftItem {
    /// Opaque identifier, unique per catalog
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_ru: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_ru: Option<String>,
    /// Free-form lowercase attribute tags (e.g. "tech", "interest-wellness")
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub occasion_tags: Vec<String>,
    #[serde(default)]
    pub relationship_tags: Vec<String>,
    #[serde(default)]
    pub min_price: Option<f64>,
    #[serde(default)]
    pub max_price: Option<f64>,
    /// Customer rating in [0, 5]
    #[serde(default)]
    pub rating: Option<f64>,
    /// Merchant margin signal in [0, 1]
    #[serde(default)]
    pub profitability_score: Option<f64>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub product_url: Option<String>,
    #[serde(default)]
    pub merchant: Option<String>,
}

fn default_active() -> bool {
    true
}

/// Display language for recommendation payloads
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ru,
}

impl GiftItem {
    /// Creates an active item with the given tags and no pricing or rating
    pub fn new(id: impl Into<String>, title: impl Into<String>, tags: &[&str]) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            title_ru: None,
            description_ru: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            occasion_tags: Vec::new(),
            relationship_tags: Vec::new(),
            min_price: None,
            max_price: None,
            rating: None,
            profitability_score: None,
            is_active: true,
            image_url: None,
            product_url: None,
            merchant: None,
        }
    }

    /// Lowercases and trims every tag set, dropping empty entries
    pub fn normalize(mut self) -> Self {
        for set in [
            &mut self.tags,
            &mut self.occasion_tags,
            &mut self.relationship_tags,
        ] {
            *set = set
                .iter()
                .map(|t| t.trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect();
        }
        self
    }

    /// Every tag the scorer matches against: general, occasion and relationship tags
    pub fn all_tags(&self) -> impl Iterator<Item = &str> {
        self.tags
            .iter()
            .chain(&self.occasion_tags)
            .chain(&self.relationship_tags)
            .map(String::as_str)
    }

    /// Price range with absent bounds defaulted to `[0, DEFAULT_MAX_PRICE]`
    pub fn price_bounds(&self) -> (f64, f64) {
        (
            self.min_price.unwrap_or(0.0),
            self.max_price.unwrap_or(DEFAULT_MAX_PRICE),
        )
    }

    /// Secondary quality signal on a 0-5 scale, used to break score ties
    pub fn quality(&self) -> f64 {
        match (self.rating, self.profitability_score) {
            (Some(rating), _) => rating,
            (None, Some(profitability)) => profitability * 5.0,
            (None, None) => 0.0,
        }
    }

    pub fn localized_title(&self, locale: Locale) -> &str {
        match (locale, &self.title_ru) {
            (Locale::Ru, Some(title)) if !title.is_empty() => title,
            _ => &self.title,
        }
    }

    pub fn localized_description(&self, locale: Locale) -> &str {
        match (locale, &self.description_ru) {
            (Locale::Ru, Some(description)) if !description.is_empty() => description,
            _ => &self.description,
        }
    }

    /// Human-readable price estimate such as "$20 - $30"
    pub fn price_estimate(&self) -> Option<String> {
        match (self.min_price, self.max_price) {
            (Some(min), Some(max)) if (max - min).abs() < f64::EPSILON => {
                Some(format!("${:.0}", min))
            }
            (Some(min), Some(max)) => Some(format!("${:.0} - ${:.0}", min, max)),
            (Some(min), None) => Some(format!("${:.0}+", min)),
            (None, Some(max)) => Some(format!("up to ${:.0}", max)),
            (None, None) => None,
        }
    }
}

/// A catalog item paired with its compatibility score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredGift {
    pub item: GiftItem,
    /// Compatibility score in [0, 100]
    pub score: u8,
}

/// Recommendation returned to API clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GiftRecommendation {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub product_url: Option<String>,
    pub merchant: Option<String>,
    pub price_estimate: Option<String>,
    pub tags: Vec<String>,
    pub rating: Option<f64>,
    pub score: u8,
}

impl GiftRecommendation {
    pub fn from_scored(scored: &ScoredGift, locale: Locale) -> Self {
        let item = &scored.item;
        Self {
            id: item.id.clone(),
            title: item.localized_title(locale).to_string(),
            description: item.localized_description(locale).to_string(),
            image_url: item.image_url.clone(),
            product_url: item.product_url.clone(),
            merchant: item.merchant.clone(),
            price_estimate: item.price_estimate(),
            tags: item.tags.clone(),
            rating: item.rating,
            score: scored.score,
        }
    }
}
