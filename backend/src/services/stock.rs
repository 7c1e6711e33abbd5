//! Stock reconciliation: net remaining stock per lot and per product

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use shared::{
    parse_flexible_date, BatchColor, DateRange, FreshnessStatus, ProductionLot, WasteRecord,
};

use crate::config::Config;
use crate::error::AppResult;
use crate::store::ProductionStore;

use super::expiry;

/// Net stock for one lot
#[derive(Debug, Clone, Serialize)]
pub struct LotStock {
    pub lot_id: Uuid,
    pub product_name: String,
    pub batch_color: BatchColor,
    pub produced_quantity: i64,
    pub wasted_quantity: i64,
    pub current_stock: i64,
    pub produced_at: String,
    pub expires_at: String,
    pub days_remaining: Option<i64>,
    pub status: FreshnessStatus,
}

/// Stock aggregated across all lots of one product
#[derive(Debug, Clone, Serialize)]
pub struct ProductStock {
    pub product_name: String,
    pub produced_quantity: i64,
    pub wasted_quantity: i64,
    pub current_stock: i64,
    pub lot_count: usize,
}

/// Grand totals over the reconciled lots
#[derive(Debug, Clone, Serialize)]
pub struct StockTotals {
    pub produced_quantity: i64,
    pub wasted_quantity: i64,
    pub current_stock: i64,
}

/// Stock report for the UI collaborator
#[derive(Debug, Clone, Serialize)]
pub struct StockReport {
    pub lots: Vec<LotStock>,
    pub totals: StockTotals,
}

/// Read-side filters for the stock panel
#[derive(Debug, Clone, Default)]
pub struct StockQuery {
    /// Production-date range; lots with an unparseable production date
    /// are excluded while this filter is active
    pub produced: Option<DateRange>,
    /// Exact product name
    pub product: Option<String>,
    /// Case-insensitive substring search on the product name
    pub search: Option<String>,
}

/// Sum wasted quantities per source lot
pub fn wasted_by_lot(waste: &[WasteRecord]) -> HashMap<Uuid, i64> {
    let mut totals: HashMap<Uuid, i64> = HashMap::new();
    for record in waste {
        *totals.entry(record.source_lot_id).or_insert(0) += record.wasted_quantity;
    }
    totals
}

/// Net remaining stock per lot, floored at zero
///
/// Pure and idempotent; `produced_quantity` always stays gross
/// production, waste is netted at read time only.
pub fn reconcile(
    lots: &[ProductionLot],
    waste: &[WasteRecord],
    today: NaiveDate,
    warning_window_days: i64,
) -> Vec<LotStock> {
    let wasted = wasted_by_lot(waste);
    lots.iter()
        .map(|lot| {
            let wasted_quantity = wasted.get(&lot.id).copied().unwrap_or(0);
            let days = expiry::days_remaining(&lot.expires_at, today);
            LotStock {
                lot_id: lot.id,
                product_name: lot.product_name.clone(),
                batch_color: lot.batch_color,
                produced_quantity: lot.produced_quantity,
                wasted_quantity,
                current_stock: (lot.produced_quantity - wasted_quantity).max(0),
                produced_at: lot.produced_at.clone(),
                expires_at: lot.expires_at.clone(),
                days_remaining: days,
                status: expiry::classify(days, warning_window_days),
            }
        })
        .collect()
}

/// Aggregate lot stocks per product (stable name order)
pub fn summarize_by_product(stocks: &[LotStock]) -> Vec<ProductStock> {
    let mut products: BTreeMap<&str, ProductStock> = BTreeMap::new();
    for stock in stocks {
        let entry = products
            .entry(stock.product_name.as_str())
            .or_insert_with(|| ProductStock {
                product_name: stock.product_name.clone(),
                produced_quantity: 0,
                wasted_quantity: 0,
                current_stock: 0,
                lot_count: 0,
            });
        entry.produced_quantity += stock.produced_quantity;
        entry.wasted_quantity += stock.wasted_quantity;
        entry.current_stock += stock.current_stock;
        entry.lot_count += 1;
    }
    products.into_values().collect()
}

/// Grand totals for the stock panel header
pub fn totals(stocks: &[LotStock]) -> StockTotals {
    StockTotals {
        produced_quantity: stocks.iter().map(|s| s.produced_quantity).sum(),
        wasted_quantity: stocks.iter().map(|s| s.wasted_quantity).sum(),
        current_stock: stocks.iter().map(|s| s.current_stock).sum(),
    }
}

/// Apply the stock panel filters to the raw lot list
pub fn apply_filters(lots: Vec<ProductionLot>, query: &StockQuery) -> Vec<ProductionLot> {
    lots.into_iter()
        .filter(|lot| {
            if let Some(range) = &query.produced {
                match parse_flexible_date(&lot.produced_at) {
                    Some(date) if range.contains(date) => {}
                    _ => return false,
                }
            }
            if let Some(product) = &query.product {
                if &lot.product_name != product {
                    return false;
                }
            }
            if let Some(search) = &query.search {
                if !lot
                    .product_name
                    .to_lowercase()
                    .contains(&search.to_lowercase())
                {
                    return false;
                }
            }
            true
        })
        .collect()
}

/// Stock service for the UI's stock panel
#[derive(Clone)]
pub struct StockService {
    store: Arc<dyn ProductionStore>,
    config: Arc<Config>,
}

impl StockService {
    /// Create a new StockService instance
    pub fn new(store: Arc<dyn ProductionStore>, config: Arc<Config>) -> Self {
        Self { store, config }
    }

    /// Per-lot stock report with grand totals
    pub async fn stock_report(&self, query: &StockQuery) -> AppResult<StockReport> {
        let lots = apply_filters(self.store.list_lots().await?, query);
        let waste = self.store.list_waste().await?;
        let today = Utc::now().date_naive();
        let stocks = reconcile(
            &lots,
            &waste,
            today,
            self.config.lifecycle.warning_window_days,
        );
        let totals = totals(&stocks);
        Ok(StockReport {
            lots: stocks,
            totals,
        })
    }

    /// Stock aggregated per product
    pub async fn product_summary(&self) -> AppResult<Vec<ProductStock>> {
        let report = self.stock_report(&StockQuery::default()).await?;
        Ok(summarize_by_product(&report.lots))
    }
}
