//! Production lot model and batch color assignment

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A production lot of a perishable product
///
/// Timestamps are carried as the record store emits them (ISO-like
/// strings); parsing happens lazily so a malformed value degrades to an
/// "unknown" classification instead of failing the whole read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionLot {
    pub id: Uuid,
    pub product_name: String,
    pub batch_color: BatchColor,
    /// Gross produced units; reduced only by remarking, never by waste
    pub produced_quantity: i64,
    pub produced_at: String,
    pub expires_at: String,
    /// Set when part of this lot was split off into a remarked lot
    pub remarked_at: Option<String>,
}

/// Batch color, derived from the weekday of production
///
/// Used for visual lot identification on the floor: every lot produced
/// on the same weekday carries the same color tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchColor {
    Blue,
    Green,
    Yellow,
    Orange,
    Red,
    Silver,
    Gold,
}

impl BatchColor {
    /// Fixed weekday-to-color cycle (Monday = blue ... Sunday = gold)
    pub fn from_weekday(weekday: Weekday) -> Self {
        match weekday.num_days_from_monday() {
            0 => BatchColor::Blue,
            1 => BatchColor::Green,
            2 => BatchColor::Yellow,
            3 => BatchColor::Orange,
            4 => BatchColor::Red,
            5 => BatchColor::Silver,
            _ => BatchColor::Gold,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BatchColor::Blue => "blue",
            BatchColor::Green => "green",
            BatchColor::Yellow => "yellow",
            BatchColor::Orange => "orange",
            BatchColor::Red => "red",
            BatchColor::Silver => "silver",
            BatchColor::Gold => "gold",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "blue" => Some(BatchColor::Blue),
            "green" => Some(BatchColor::Green),
            "yellow" => Some(BatchColor::Yellow),
            "orange" => Some(BatchColor::Orange),
            "red" => Some(BatchColor::Red),
            "silver" => Some(BatchColor::Silver),
            "gold" => Some(BatchColor::Gold),
            _ => None,
        }
    }
}

impl std::fmt::Display for BatchColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Draft of a lot before the record store assigns an id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LotDraft {
    pub product_name: String,
    pub batch_color: BatchColor,
    pub produced_quantity: i64,
    pub produced_at: String,
    pub expires_at: String,
}

/// Field updates applied to an existing lot
///
/// Only remarking mutates lots, so the writable surface is deliberately
/// narrow: quantity reduction and the remark timestamp.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LotUpdate {
    pub produced_quantity: Option<i64>,
    pub remarked_at: Option<String>,
}
