pub mod gift;
pub mod quiz;

pub use gift::{GiftItem, GiftRecommendation, Locale, ScoredGift, DEFAULT_MAX_PRICE};
pub use quiz::{questions, AnswerValue, GiftQuery, QuizAnswers, QuizSubmission, SearchParams};
