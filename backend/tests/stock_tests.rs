//! Stock reconciliation tests
//!
//! Covers:
//! - current_stock == max(0, produced - wasted), never negative
//! - Waste joins on the source lot, not the product name
//! - Idempotence: reconciling twice yields identical output
//! - Stock panel filters (date range, product, search)

use chrono::NaiveDate;
use proptest::prelude::*;
use uuid::Uuid;

use pwc_backend::services::stock::{
    apply_filters, reconcile, summarize_by_product, totals, wasted_by_lot, StockQuery,
};
use shared::{BatchColor, DateRange, ProductionLot, WasteRecord};

const WARNING_WINDOW: i64 = 2;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
}

fn lot(product: &str, quantity: i64, produced_at: &str, expires_at: &str) -> ProductionLot {
    ProductionLot {
        id: Uuid::new_v4(),
        product_name: product.to_string(),
        batch_color: BatchColor::Blue,
        produced_quantity: quantity,
        produced_at: produced_at.to_string(),
        expires_at: expires_at.to_string(),
        remarked_at: None,
    }
}

fn waste(lot: &ProductionLot, quantity: i64) -> WasteRecord {
    WasteRecord {
        id: Uuid::new_v4(),
        product_name: lot.product_name.clone(),
        batch_color: lot.batch_color,
        wasted_quantity: quantity,
        reason: "damaged".to_string(),
        source_lot_id: lot.id,
        recorded_at: "2025-03-14 10:00:00".to_string(),
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_basic_netting() {
        let lot_a = lot("Carrot cake", 100, "2025-03-13 08:00:00", "2025-03-16");
        let records = vec![waste(&lot_a, 30), waste(&lot_a, 10)];

        let stocks = reconcile(&[lot_a], &records, today(), WARNING_WINDOW);
        assert_eq!(stocks.len(), 1);
        assert_eq!(stocks[0].wasted_quantity, 40);
        assert_eq!(stocks[0].current_stock, 60);
        // The lot record itself stays gross production
        assert_eq!(stocks[0].produced_quantity, 100);
    }

    #[test]
    fn test_stock_never_negative() {
        let lot_a = lot("Brioche", 5, "2025-03-13 08:00:00", "2025-03-16");
        // Over-waste can exist in legacy data; display clamps at zero
        let records = vec![waste(&lot_a, 9)];

        let stocks = reconcile(&[lot_a], &records, today(), WARNING_WINDOW);
        assert_eq!(stocks[0].current_stock, 0);
    }

    #[test]
    fn test_waste_joined_per_lot_not_per_product() {
        let lot_a = lot("Brioche", 10, "2025-03-13 08:00:00", "2025-03-16");
        let lot_b = lot("Brioche", 20, "2025-03-13 09:00:00", "2025-03-16");
        let records = vec![waste(&lot_a, 4)];

        let stocks = reconcile(
            &[lot_a.clone(), lot_b.clone()],
            &records,
            today(),
            WARNING_WINDOW,
        );
        let by_id = |id| stocks.iter().find(|s| s.lot_id == id).unwrap();
        assert_eq!(by_id(lot_a.id).current_stock, 6);
        assert_eq!(by_id(lot_b.id).current_stock, 20);
    }

    #[test]
    fn test_product_summary_aggregates_lots() {
        let lot_a = lot("Brioche", 10, "2025-03-13 08:00:00", "2025-03-16");
        let lot_b = lot("Brioche", 20, "2025-03-13 09:00:00", "2025-03-16");
        let lot_c = lot("Carrot cake", 7, "2025-03-13 10:00:00", "2025-03-16");
        let records = vec![waste(&lot_a, 3)];

        let stocks = reconcile(&[lot_a, lot_b, lot_c], &records, today(), WARNING_WINDOW);
        let summary = summarize_by_product(&stocks);

        assert_eq!(summary.len(), 2);
        let brioche = summary.iter().find(|p| p.product_name == "Brioche").unwrap();
        assert_eq!(brioche.produced_quantity, 30);
        assert_eq!(brioche.wasted_quantity, 3);
        assert_eq!(brioche.current_stock, 27);
        assert_eq!(brioche.lot_count, 2);
    }

    #[test]
    fn test_totals() {
        let lot_a = lot("Brioche", 10, "2025-03-13 08:00:00", "2025-03-16");
        let lot_b = lot("Carrot cake", 5, "2025-03-13 09:00:00", "2025-03-16");
        let records = vec![waste(&lot_a, 2)];

        let stocks = reconcile(&[lot_a, lot_b], &records, today(), WARNING_WINDOW);
        let t = totals(&stocks);
        assert_eq!(t.produced_quantity, 15);
        assert_eq!(t.wasted_quantity, 2);
        assert_eq!(t.current_stock, 13);
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let lot_a = lot("Brioche", 10, "2025-03-13 08:00:00", "2025-03-16");
        let lot_b = lot("Carrot cake", 5, "bogus date", "not a date");
        let records = vec![waste(&lot_a, 2)];
        let lots = [lot_a, lot_b];

        let first = reconcile(&lots, &records, today(), WARNING_WINDOW);
        let second = reconcile(&lots, &records, today(), WARNING_WINDOW);
        assert_eq!(
            serde_json::to_value(&first).unwrap(),
            serde_json::to_value(&second).unwrap()
        );
    }

    #[test]
    fn test_wasted_by_lot_sums_per_source() {
        let lot_a = lot("Brioche", 10, "2025-03-13 08:00:00", "2025-03-16");
        let records = vec![waste(&lot_a, 2), waste(&lot_a, 3)];
        let sums = wasted_by_lot(&records);
        assert_eq!(sums.get(&lot_a.id), Some(&5));
    }

    #[test]
    fn test_date_range_filter_drops_unparseable_production_dates() {
        let inside = lot("Brioche", 10, "2025-03-13 08:00:00", "2025-03-16");
        let outside = lot("Brioche", 10, "2025-02-01 08:00:00", "2025-02-04");
        let broken = lot("Brioche", 10, "???", "2025-03-16");
        let query = StockQuery {
            produced: Some(DateRange {
                start: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
                end: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            }),
            ..Default::default()
        };

        let filtered = apply_filters(vec![inside.clone(), outside, broken], &query);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, inside.id);
    }

    #[test]
    fn test_product_and_search_filters() {
        let lots = vec![
            lot("Carrot cake", 10, "2025-03-13 08:00:00", "2025-03-16"),
            lot("Cheese bread", 5, "2025-03-13 08:00:00", "2025-03-16"),
        ];

        let exact = apply_filters(
            lots.clone(),
            &StockQuery {
                product: Some("Cheese bread".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(exact.len(), 1);
        assert_eq!(exact[0].product_name, "Cheese bread");

        let search = apply_filters(
            lots,
            &StockQuery {
                search: Some("CAKE".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(search.len(), 1);
        assert_eq!(search[0].product_name, "Carrot cake");
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// current_stock == max(0, produced - wasted), never negative
        #[test]
        fn prop_stock_is_clamped_difference(
            produced in 0i64..10_000,
            wastes in prop::collection::vec(1i64..500, 0..10)
        ) {
            let lot_a = lot("Brioche", produced, "2025-03-13 08:00:00", "2025-03-16");
            let records: Vec<WasteRecord> = wastes.iter().map(|&q| waste(&lot_a, q)).collect();
            let wasted_total: i64 = wastes.iter().sum();

            let stocks = reconcile(&[lot_a], &records, today(), WARNING_WINDOW);
            prop_assert_eq!(stocks[0].current_stock, (produced - wasted_total).max(0));
            prop_assert!(stocks[0].current_stock >= 0);
        }

        /// Reconciliation never mutates its inputs and repeats exactly
        #[test]
        fn prop_reconcile_idempotent(
            produced in 0i64..10_000,
            wastes in prop::collection::vec(1i64..500, 0..10)
        ) {
            let lot_a = lot("Brioche", produced, "2025-03-13 08:00:00", "2025-03-16");
            let records: Vec<WasteRecord> = wastes.iter().map(|&q| waste(&lot_a, q)).collect();
            let lots = [lot_a];

            let first = reconcile(&lots, &records, today(), WARNING_WINDOW);
            let second = reconcile(&lots, &records, today(), WARNING_WINDOW);
            prop_assert_eq!(
                serde_json::to_value(&first).unwrap(),
                serde_json::to_value(&second).unwrap()
            );
        }

        /// Product totals equal the sum of their lots
        #[test]
        fn prop_product_summary_consistent(
            quantities in prop::collection::vec(0i64..1_000, 1..10)
        ) {
            let lots: Vec<ProductionLot> = quantities
                .iter()
                .map(|&q| lot("Brioche", q, "2025-03-13 08:00:00", "2025-03-16"))
                .collect();

            let stocks = reconcile(&lots, &[], today(), WARNING_WINDOW);
            let summary = summarize_by_product(&stocks);
            prop_assert_eq!(summary.len(), 1);
            prop_assert_eq!(summary[0].produced_quantity, quantities.iter().sum::<i64>());
            prop_assert_eq!(summary[0].lot_count, quantities.len());
        }
    }
}
