use std::sync::Arc;
use std::time::Instant;

use crate::{
    error::{AppError, AppResult},
    models::{GiftItem, GiftQuery, ScoredGift},
    services::{catalog::CatalogSource, ranking},
};

/// Generates gift recommendations for a quiz submission or keyword search
///
/// Loads the catalog from the configured source, then ranks it in-process.
/// Ranking itself never fails; only catalog loading can.
pub async fn get_recommendations(
    catalog: Arc<dyn CatalogSource>,
    query: GiftQuery,
    limit: usize,
) -> AppResult<Vec<ScoredGift>> {
    let start = Instant::now();

    let items = catalog.load().await?;

    tracing::info!(
        source = catalog.name(),
        catalog_size = items.len(),
        limit,
        "Ranking catalog"
    );

    let ranked = ranking::rank(&items, &query, limit);

    tracing::info!(
        returned = ranked.len(),
        top_score = ranked.first().map(|s| s.score),
        processing_time_ms = start.elapsed().as_millis(),
        "Recommendations ready"
    );

    Ok(ranked)
}

/// Lists every active catalog item in catalog order
pub async fn list_active(catalog: Arc<dyn CatalogSource>) -> AppResult<Vec<GiftItem>> {
    let items = catalog.load().await?;
    Ok(items.into_iter().filter(|item| item.is_active).collect())
}

/// Finds a single active item by id
pub async fn find_gift(catalog: Arc<dyn CatalogSource>, id: &str) -> AppResult<GiftItem> {
    catalog
        .load()
        .await?
        .into_iter()
        .find(|item| item.is_active && item.id == id)
        .ok_or_else(|| AppError::NotFound(format!("Gift {} not found", id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuizAnswers;
    use crate::services::catalog::{MockCatalogSource, StaticCatalog};

    fn catalog() -> Arc<dyn CatalogSource> {
        let mut retired = GiftItem::new("retired", "Retired Gadget", &["tech"]);
        retired.is_active = false;
        Arc::new(StaticCatalog::new(vec![
            GiftItem::new("lamp", "Desk Lamp", &["home", "desk"]),
            GiftItem::new("drone", "Mini Drone", &["tech", "gadgets"]),
            retired,
        ]))
    }

    #[tokio::test]
    async fn test_get_recommendations_ranks_catalog() {
        let query = GiftQuery::Answers(QuizAnswers::new().single("interests", "tech"));
        let ranked = get_recommendations(catalog(), query, 6).await.unwrap();
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].item.id, "drone");
    }

    #[tokio::test]
    async fn test_get_recommendations_propagates_catalog_errors() {
        let mut source = MockCatalogSource::new();
        source
            .expect_load()
            .returning(|| Err(AppError::Catalog("unreachable".to_string())));
        source.expect_name().return_const("mock");

        let query = GiftQuery::Keywords {
            text: "tech".to_string(),
            budget: None,
        };
        let result = get_recommendations(Arc::new(source), query, 6).await;
        assert!(matches!(result, Err(AppError::Catalog(_))));
    }

    #[tokio::test]
    async fn test_list_active_skips_inactive() {
        let items = list_active(catalog()).await.unwrap();
        let ids: Vec<&str> = items.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids, vec!["lamp", "drone"]);
    }

    #[tokio::test]
    async fn test_find_gift() {
        assert_eq!(find_gift(catalog(), "lamp").await.unwrap().title, "Desk Lamp");
        assert!(matches!(
            find_gift(catalog(), "retired").await,
            Err(AppError::NotFound(_))
        ));
    }
}
