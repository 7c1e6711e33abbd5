//! PostgreSQL implementation of the record store

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use shared::{BatchColor, LotDraft, LotUpdate, ProductionLot, WasteDraft, WasteRecord};

use crate::error::{AppError, AppResult};

use super::ProductionStore;

/// sqlx-backed store
///
/// Date columns are TEXT on purpose: the data set was migrated from a
/// spreadsheet-backed system and may hold values the core has to
/// classify as "unknown" rather than reject at decode time.
#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

type LotRow = (Uuid, String, String, i64, String, String, Option<String>);
type WasteRow = (Uuid, String, String, i64, String, Uuid, String);

const LOT_COLUMNS: &str =
    "id, product_name, batch_color, produced_quantity, produced_at, expires_at, remarked_at";
const WASTE_COLUMNS: &str =
    "id, product_name, batch_color, wasted_quantity, reason, source_lot_id, recorded_at";

impl PgStore {
    /// Create a new PgStore instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

fn parse_color(value: &str) -> AppResult<BatchColor> {
    BatchColor::from_str(value)
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("unknown batch color in store: {value}")))
}

fn lot_from_row(row: LotRow) -> AppResult<ProductionLot> {
    Ok(ProductionLot {
        id: row.0,
        product_name: row.1,
        batch_color: parse_color(&row.2)?,
        produced_quantity: row.3,
        produced_at: row.4,
        expires_at: row.5,
        remarked_at: row.6,
    })
}

fn waste_from_row(row: WasteRow) -> AppResult<WasteRecord> {
    Ok(WasteRecord {
        id: row.0,
        product_name: row.1,
        batch_color: parse_color(&row.2)?,
        wasted_quantity: row.3,
        reason: row.4,
        source_lot_id: row.5,
        recorded_at: row.6,
    })
}

#[async_trait]
impl ProductionStore for PgStore {
    async fn list_lots(&self) -> AppResult<Vec<ProductionLot>> {
        let rows = sqlx::query_as::<_, LotRow>(&format!(
            "SELECT {LOT_COLUMNS} FROM production_lots ORDER BY produced_at DESC"
        ))
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(lot_from_row).collect()
    }

    async fn get_lot(&self, id: Uuid) -> AppResult<Option<ProductionLot>> {
        let row = sqlx::query_as::<_, LotRow>(&format!(
            "SELECT {LOT_COLUMNS} FROM production_lots WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        row.map(lot_from_row).transpose()
    }

    async fn create_lot(&self, draft: LotDraft) -> AppResult<ProductionLot> {
        let row = sqlx::query_as::<_, LotRow>(&format!(
            r#"
            INSERT INTO production_lots (product_name, batch_color, produced_quantity, produced_at, expires_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {LOT_COLUMNS}
            "#
        ))
        .bind(&draft.product_name)
        .bind(draft.batch_color.as_str())
        .bind(draft.produced_quantity)
        .bind(&draft.produced_at)
        .bind(&draft.expires_at)
        .fetch_one(&self.db)
        .await?;

        lot_from_row(row)
    }

    async fn update_lot(&self, id: Uuid, fields: LotUpdate) -> AppResult<ProductionLot> {
        let row = sqlx::query_as::<_, LotRow>(&format!(
            r#"
            UPDATE production_lots
            SET produced_quantity = COALESCE($1, produced_quantity),
                remarked_at = COALESCE($2, remarked_at)
            WHERE id = $3
            RETURNING {LOT_COLUMNS}
            "#
        ))
        .bind(fields.produced_quantity)
        .bind(&fields.remarked_at)
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::LotNotFound(id))?;

        lot_from_row(row)
    }

    async fn list_waste(&self) -> AppResult<Vec<WasteRecord>> {
        let rows = sqlx::query_as::<_, WasteRow>(&format!(
            "SELECT {WASTE_COLUMNS} FROM waste_records ORDER BY recorded_at DESC"
        ))
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(waste_from_row).collect()
    }

    async fn create_waste(&self, draft: WasteDraft) -> AppResult<WasteRecord> {
        let row = sqlx::query_as::<_, WasteRow>(&format!(
            r#"
            INSERT INTO waste_records (product_name, batch_color, wasted_quantity, reason, source_lot_id, recorded_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {WASTE_COLUMNS}
            "#
        ))
        .bind(&draft.product_name)
        .bind(draft.batch_color.as_str())
        .bind(draft.wasted_quantity)
        .bind(&draft.reason)
        .bind(draft.source_lot_id)
        .bind(&draft.recorded_at)
        .fetch_one(&self.db)
        .await?;

        waste_from_row(row)
    }

    async fn apply_remark(
        &self,
        original_id: Uuid,
        fields: LotUpdate,
        new_lot: LotDraft,
    ) -> AppResult<(ProductionLot, ProductionLot)> {
        let mut tx = self.db.begin().await?;

        let original = sqlx::query_as::<_, LotRow>(&format!(
            r#"
            UPDATE production_lots
            SET produced_quantity = COALESCE($1, produced_quantity),
                remarked_at = COALESCE($2, remarked_at)
            WHERE id = $3
            RETURNING {LOT_COLUMNS}
            "#
        ))
        .bind(fields.produced_quantity)
        .bind(&fields.remarked_at)
        .bind(original_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(AppError::LotNotFound(original_id))?;

        let created = sqlx::query_as::<_, LotRow>(&format!(
            r#"
            INSERT INTO production_lots (product_name, batch_color, produced_quantity, produced_at, expires_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {LOT_COLUMNS}
            "#
        ))
        .bind(&new_lot.product_name)
        .bind(new_lot.batch_color.as_str())
        .bind(new_lot.produced_quantity)
        .bind(&new_lot.produced_at)
        .bind(&new_lot.expires_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok((lot_from_row(original)?, lot_from_row(created)?))
    }

    async fn reset_all(&self) -> AppResult<()> {
        let mut tx = self.db.begin().await?;
        sqlx::query("DELETE FROM waste_records")
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM production_lots")
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }
}
