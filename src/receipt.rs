// 🧾 Receipt Model - What a caller submits and what the registry keeps
// Wire format uses camelCase field names (retailer, purchaseDate, ...)

use crate::error::PointsError;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

// ============================================================================
// LINE ITEM
// ============================================================================

/// One purchased product on a receipt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub short_description: String,
    /// Price as submitted, e.g. "10.00"
    pub price: String,
}

impl LineItem {
    pub fn new(short_description: impl Into<String>, price: impl Into<String>) -> Self {
        LineItem {
            short_description: short_description.into(),
            price: price.into(),
        }
    }
}

// ============================================================================
// RECEIPT
// ============================================================================

/// A purchase receipt as submitted.
///
/// Amounts, date and time stay in their textual form; the calculator parses
/// them and reports anything it cannot read as a structural error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub retailer: String,
    /// Calendar date, "YYYY-MM-DD"
    pub purchase_date: String,
    /// Time of day, "HH:MM" (24h), optionally with ":SS"
    pub purchase_time: String,
    pub items: Vec<LineItem>,
    /// Total as submitted, e.g. "35.35"
    pub total: String,
}

impl Receipt {
    /// Create a receipt with no items
    pub fn new(
        retailer: impl Into<String>,
        purchase_date: impl Into<String>,
        purchase_time: impl Into<String>,
        total: impl Into<String>,
    ) -> Self {
        Receipt {
            retailer: retailer.into(),
            purchase_date: purchase_date.into(),
            purchase_time: purchase_time.into(),
            items: Vec::new(),
            total: total.into(),
        }
    }

    /// Builder pattern: append a line item
    pub fn with_item(mut self, short_description: impl Into<String>, price: impl Into<String>) -> Self {
        self.items.push(LineItem::new(short_description, price));
        self
    }

    /// Build a receipt from untyped JSON, naming the first field whose type is wrong.
    pub fn from_json(value: &Value) -> Result<Self, PointsError> {
        let obj = value
            .as_object()
            .ok_or_else(|| PointsError::structural("receipt", "expected a JSON object"))?;

        let string_field = |name: &str| -> Result<String, PointsError> {
            obj.get(name)
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| PointsError::structural(name, "expected a string"))
        };

        let retailer = string_field("retailer")?;
        let total = string_field("total")?;

        let raw_items = obj
            .get("items")
            .and_then(Value::as_array)
            .ok_or_else(|| PointsError::structural("items", "expected an array"))?;

        let mut items = Vec::with_capacity(raw_items.len());
        for (index, raw) in raw_items.iter().enumerate() {
            let description = raw.get("shortDescription").and_then(Value::as_str);
            let price = raw.get("price").and_then(Value::as_str);
            match (description, price) {
                (Some(description), Some(price)) => items.push(LineItem::new(description, price)),
                (None, _) => {
                    return Err(PointsError::structural(
                        format!("items[{}].shortDescription", index),
                        "expected a string",
                    ))
                }
                (_, None) => {
                    return Err(PointsError::structural(
                        format!("items[{}].price", index),
                        "expected a string",
                    ))
                }
            }
        }

        Ok(Receipt {
            retailer,
            purchase_date: string_field("purchaseDate")?,
            purchase_time: string_field("purchaseTime")?,
            items,
            total,
        })
    }

    /// Load a receipt from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read receipt file: {:?}", path.as_ref()))?;

        let value: Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse receipt JSON: {:?}", path.as_ref()))?;

        Receipt::from_json(&value)
            .with_context(|| format!("Malformed receipt: {:?}", path.as_ref()))
    }
}

// ============================================================================
// SCORED RECEIPT
// ============================================================================

/// A receipt together with its points, as stored by the registry.
///
/// Created once at registration and never changed afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredReceipt {
    pub id: String,
    pub receipt: Receipt,
    pub points: u64,
    pub registered_at: DateTime<Utc>,
}

impl ScoredReceipt {
    pub fn new(id: String, receipt: Receipt, points: u64) -> Self {
        ScoredReceipt {
            id,
            receipt,
            points,
            registered_at: Utc::now(),
        }
    }
}
