//! Waste validation tests
//!
//! Covers:
//! - Over-waste rejection: posting more than produced minus prior waste
//! - Driving a lot's available quantity exactly to zero
//! - No partial record on a rejected posting
//! - Per-lot isolation of the available-quantity computation

use std::sync::Arc;

use uuid::Uuid;

use pwc_backend::config::{Config, DatabaseConfig, LifecycleConfig, ServerConfig};
use pwc_backend::error::AppError;
use pwc_backend::services::production::{ProductionService, RecordProductionInput};
use pwc_backend::services::waste::{validate_waste, RecordWasteInput, WasteService};
use pwc_backend::store::{MemStore, ProductionStore};
use shared::{BatchColor, ProductionLot};

fn test_config() -> Arc<Config> {
    Arc::new(Config {
        environment: "test".to_string(),
        server: ServerConfig {
            port: 0,
            host: "127.0.0.1".to_string(),
        },
        database: DatabaseConfig {
            url: String::new(),
            max_connections: 1,
            min_connections: 1,
        },
        lifecycle: LifecycleConfig::default(),
    })
}

fn lot(quantity: i64) -> ProductionLot {
    ProductionLot {
        id: Uuid::new_v4(),
        product_name: "Brioche".to_string(),
        batch_color: BatchColor::Red,
        produced_quantity: quantity,
        produced_at: "2025-03-13 08:00:00".to_string(),
        expires_at: "2025-03-16".to_string(),
        remarked_at: None,
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_over_waste_rejected() {
        let lot = lot(5);
        let result = validate_waste(&lot, 0, 6, "burnt", "2025-03-14 10:00:00".to_string());
        assert!(matches!(
            result,
            Err(AppError::InsufficientStock {
                requested: 6,
                available: 5
            })
        ));
    }

    #[test]
    fn test_exact_available_drives_stock_to_zero() {
        let lot = lot(5);
        let draft = validate_waste(&lot, 0, 5, "burnt", "2025-03-14 10:00:00".to_string()).unwrap();
        assert_eq!(draft.wasted_quantity, 5);
        // Nothing left afterwards
        let next = validate_waste(&lot, 5, 1, "burnt", "2025-03-14 11:00:00".to_string());
        assert!(matches!(
            next,
            Err(AppError::InsufficientStock {
                requested: 1,
                available: 0
            })
        ));
    }

    #[test]
    fn test_prior_waste_reduces_available() {
        let lot = lot(10);
        assert!(validate_waste(&lot, 7, 4, "stale", "2025-03-14 10:00:00".to_string()).is_err());
        assert!(validate_waste(&lot, 7, 3, "stale", "2025-03-14 10:00:00".to_string()).is_ok());
    }

    #[test]
    fn test_non_positive_quantity_rejected() {
        let lot = lot(5);
        for quantity in [0, -1] {
            let result = validate_waste(
                &lot,
                0,
                quantity,
                "burnt",
                "2025-03-14 10:00:00".to_string(),
            );
            assert!(matches!(result, Err(AppError::Validation { .. })));
        }
    }

    #[test]
    fn test_draft_denormalizes_lot_fields() {
        let lot = lot(5);
        let draft = validate_waste(&lot, 0, 2, "dropped", "2025-03-14 10:00:00".to_string()).unwrap();
        assert_eq!(draft.product_name, lot.product_name);
        assert_eq!(draft.batch_color, lot.batch_color);
        assert_eq!(draft.source_lot_id, lot.id);
        assert_eq!(draft.reason, "dropped");
    }
}

mod service_tests {
    use super::*;

    #[tokio::test]
    async fn test_record_waste_against_unknown_lot() {
        let store = Arc::new(MemStore::new());
        let service = WasteService::new(store);
        let missing = Uuid::new_v4();

        let result = service
            .record_waste(RecordWasteInput {
                lot_id: missing,
                wasted_quantity: 1,
                reason: "burnt".to_string(),
            })
            .await;
        assert!(matches!(result, Err(AppError::LotNotFound(id)) if id == missing));
    }

    #[tokio::test]
    async fn test_rejected_posting_leaves_no_record() {
        let store: Arc<MemStore> = Arc::new(MemStore::new());
        let production = ProductionService::new(store.clone(), test_config());
        let lot = production
            .record_production(RecordProductionInput {
                product_name: "Brioche".to_string(),
                quantity: 5,
            })
            .await
            .unwrap();

        let service = WasteService::new(store.clone());
        let result = service
            .record_waste(RecordWasteInput {
                lot_id: lot.id,
                wasted_quantity: 6,
                reason: "burnt".to_string(),
            })
            .await;
        assert!(matches!(result, Err(AppError::InsufficientStock { .. })));
        assert!(store.list_waste().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_successive_postings_respect_running_total() {
        let store: Arc<MemStore> = Arc::new(MemStore::new());
        let production = ProductionService::new(store.clone(), test_config());
        let lot = production
            .record_production(RecordProductionInput {
                product_name: "Brioche".to_string(),
                quantity: 10,
            })
            .await
            .unwrap();

        let service = WasteService::new(store.clone());
        for quantity in [4, 6] {
            service
                .record_waste(RecordWasteInput {
                    lot_id: lot.id,
                    wasted_quantity: quantity,
                    reason: "stale".to_string(),
                })
                .await
                .unwrap();
        }

        // 4 + 6 exhausted the lot
        let result = service
            .record_waste(RecordWasteInput {
                lot_id: lot.id,
                wasted_quantity: 1,
                reason: "stale".to_string(),
            })
            .await;
        assert!(matches!(
            result,
            Err(AppError::InsufficientStock {
                requested: 1,
                available: 0
            })
        ));
    }

    #[tokio::test]
    async fn test_waste_on_one_lot_does_not_consume_another() {
        let store: Arc<MemStore> = Arc::new(MemStore::new());
        let production = ProductionService::new(store.clone(), test_config());
        let lot_a = production
            .record_production(RecordProductionInput {
                product_name: "Brioche".to_string(),
                quantity: 5,
            })
            .await
            .unwrap();
        let lot_b = production
            .record_production(RecordProductionInput {
                product_name: "Brioche".to_string(),
                quantity: 5,
            })
            .await
            .unwrap();

        let service = WasteService::new(store);
        service
            .record_waste(RecordWasteInput {
                lot_id: lot_a.id,
                wasted_quantity: 5,
                reason: "stale".to_string(),
            })
            .await
            .unwrap();

        // Lot B is untouched by lot A's waste
        let result = service
            .record_waste(RecordWasteInput {
                lot_id: lot_b.id,
                wasted_quantity: 5,
                reason: "stale".to_string(),
            })
            .await;
        assert!(result.is_ok());
    }
}
