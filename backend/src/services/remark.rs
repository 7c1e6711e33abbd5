//! Remarking: split part of a near-expiry lot into a new lot with
//! extended validity
//!
//! The only multi-record transaction in the system. The planner is pure
//! and produces both records' final state together; the record store
//! persists them atomically or not at all.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared::{
    types::{DATETIME_FORMAT, DATE_FORMAT},
    FreshnessStatus, LotDraft, LotUpdate, ProductionLot,
};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::store::ProductionStore;

use super::{expiry, stock};

/// Input for remarking part of a lot
#[derive(Debug, Deserialize)]
pub struct RemarkInput {
    pub quantity: i64,
    pub extension_days: i64,
}

/// Remark policy knobs, taken from the lifecycle configuration
#[derive(Debug, Clone)]
pub struct RemarkPolicy {
    pub warning_window_days: i64,
    pub allow_expired_remark: bool,
    pub min_extension_days: i64,
}

impl From<&Config> for RemarkPolicy {
    fn from(config: &Config) -> Self {
        Self {
            warning_window_days: config.lifecycle.warning_window_days,
            allow_expired_remark: config.lifecycle.allow_expired_remark,
            min_extension_days: config.lifecycle.min_extension_days,
        }
    }
}

/// Both records' final state for a remark split
#[derive(Debug, Clone)]
pub struct RemarkPlan {
    /// The original lot with its quantity reduced and `remarked_at` set
    pub original: ProductionLot,
    /// The split-off lot with extended validity
    pub new_lot: LotDraft,
}

/// Result of a persisted remark
#[derive(Debug, Clone, Serialize)]
pub struct RemarkOutcome {
    pub original: ProductionLot,
    pub new_lot: ProductionLot,
}

/// Plan a remark split, checking every precondition
///
/// Quantity is conserved by construction: the plan's two quantities
/// always sum to the lot's quantity before the operation.
pub fn plan_remark(
    lot: &ProductionLot,
    already_wasted: i64,
    input: &RemarkInput,
    now: DateTime<Utc>,
    policy: &RemarkPolicy,
) -> AppResult<RemarkPlan> {
    if input.extension_days < policy.min_extension_days {
        return Err(AppError::InvalidExtension(input.extension_days));
    }

    match expiry::classify_lot(lot, now.date_naive(), policy.warning_window_days) {
        FreshnessStatus::NearExpiry => {}
        FreshnessStatus::Expired if policy.allow_expired_remark => {}
        FreshnessStatus::Expired => {
            return Err(AppError::Validation {
                field: "lot_id".to_string(),
                message: "Expired lots cannot be remarked".to_string(),
                message_pt: "Lotes vencidos não podem ser remarcados".to_string(),
            });
        }
        FreshnessStatus::Fresh | FreshnessStatus::Unknown => {
            return Err(AppError::Validation {
                field: "lot_id".to_string(),
                message: "Only lots close to expiry can be remarked".to_string(),
                message_pt: "Apenas lotes próximos do vencimento podem ser remarcados".to_string(),
            });
        }
    }

    if input.quantity <= 0 {
        return Err(AppError::Validation {
            field: "quantity".to_string(),
            message: "Remark quantity must be positive".to_string(),
            message_pt: "A quantidade remarcada deve ser positiva".to_string(),
        });
    }

    // Remarked stock must respect prior waste deductions
    let available = lot.produced_quantity - already_wasted;
    if input.quantity > available {
        return Err(AppError::InsufficientStock {
            requested: input.quantity,
            available,
        });
    }

    let mut original = lot.clone();
    original.produced_quantity -= input.quantity;
    original.remarked_at = Some(now.format(DATETIME_FORMAT).to_string());

    let new_expiry = now.date_naive() + Duration::days(input.extension_days);
    let new_lot = LotDraft {
        product_name: lot.product_name.clone(),
        batch_color: lot.batch_color,
        produced_quantity: input.quantity,
        produced_at: now.format(DATETIME_FORMAT).to_string(),
        expires_at: new_expiry.format(DATE_FORMAT).to_string(),
    };

    Ok(RemarkPlan { original, new_lot })
}

/// Remarking service
#[derive(Clone)]
pub struct RemarkService {
    store: Arc<dyn ProductionStore>,
    config: Arc<Config>,
}

impl RemarkService {
    /// Create a new RemarkService instance
    pub fn new(store: Arc<dyn ProductionStore>, config: Arc<Config>) -> Self {
        Self { store, config }
    }

    /// Plan and persist a remark split for a lot
    ///
    /// Any precondition failure returns before a single write, so a
    /// rejected remark leaves all records unchanged.
    pub async fn remark_lot(&self, lot_id: Uuid, input: RemarkInput) -> AppResult<RemarkOutcome> {
        let lot = self
            .store
            .get_lot(lot_id)
            .await?
            .ok_or(AppError::LotNotFound(lot_id))?;

        let waste = self.store.list_waste().await?;
        let already_wasted = stock::wasted_by_lot(&waste)
            .get(&lot.id)
            .copied()
            .unwrap_or(0);

        let policy = RemarkPolicy::from(self.config.as_ref());
        let plan = plan_remark(&lot, already_wasted, &input, Utc::now(), &policy)?;

        let fields = LotUpdate {
            produced_quantity: Some(plan.original.produced_quantity),
            remarked_at: plan.original.remarked_at.clone(),
        };
        let (original, new_lot) = self.store.apply_remark(lot.id, fields, plan.new_lot).await?;

        tracing::info!(
            lot_id = %original.id,
            new_lot_id = %new_lot.id,
            quantity = new_lot.produced_quantity,
            "Lot remarked"
        );
        Ok(RemarkOutcome { original, new_lot })
    }
}
