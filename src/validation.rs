// 📐 Shape Layer - Request Validation
// Checks a raw JSON body field by field before anything reaches the calculator

use crate::calculator::parse_purchase_date;
use crate::money::Cents;
use crate::receipt::{LineItem, Receipt};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// Where the offending value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Body,
    Params,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    pub location: Location,
    /// Field path, e.g. "items[2].price"
    pub path: String,
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl ValidationError {
    pub fn body(path: impl Into<String>, msg: &str, value: Option<&Value>) -> Self {
        ValidationError {
            location: Location::Body,
            path: path.into(),
            msg: msg.to_string(),
            value: value.cloned(),
        }
    }

    pub fn param(path: impl Into<String>, msg: &str, value: &str) -> Self {
        ValidationError {
            location: Location::Params,
            path: path.into(),
            msg: msg.to_string(),
            value: Some(Value::String(value.to_string())),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.msg)
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult<T> = Result<T, Vec<ValidationError>>;

pub const RETAILER_REQUIRED: &str = "retailer is required";
pub const PURCHASE_DATE_INVALID: &str = "purchaseDate must be a valid ISO 8601 date";
pub const PURCHASE_TIME_INVALID: &str = "purchaseTime must be in 24-hour format";
pub const ITEMS_REQUIRED: &str = "At least one item is required";
pub const DESCRIPTION_REQUIRED: &str = "item shortDescription is required";
pub const PRICE_INVALID: &str = "item price must be in the format 0.00";
pub const TOTAL_INVALID: &str = "total must be in the format 0.00";
pub const ID_REQUIRED: &str = "ID is required";

// ============================================================================
// RECEIPT VALIDATION
// ============================================================================

/// Validate a submitted receipt body, collecting every violation.
///
/// On success the typed receipt is returned and is guaranteed to score
/// without a structural error.
pub fn validate_receipt(body: &Value) -> ValidationResult<Receipt> {
    let mut errors = Vec::new();

    let retailer = body.get("retailer");
    let retailer_str = retailer.and_then(Value::as_str).filter(|s| !s.is_empty());
    if retailer_str.is_none() {
        errors.push(ValidationError::body("retailer", RETAILER_REQUIRED, retailer));
    }

    let purchase_date = body.get("purchaseDate");
    let date_str = purchase_date.and_then(Value::as_str).filter(|s| is_iso_date(s));
    if date_str.is_none() {
        errors.push(ValidationError::body("purchaseDate", PURCHASE_DATE_INVALID, purchase_date));
    }

    let purchase_time = body.get("purchaseTime");
    let time_str = purchase_time.and_then(Value::as_str).filter(|s| is_24h_time(s));
    if time_str.is_none() {
        errors.push(ValidationError::body("purchaseTime", PURCHASE_TIME_INVALID, purchase_time));
    }

    let items = validate_items(body.get("items"), &mut errors);

    let total = body.get("total");
    let total_str = total.and_then(Value::as_str).filter(|s| Cents::is_well_formed(s));
    if total_str.is_none() {
        errors.push(ValidationError::body("total", TOTAL_INVALID, total));
    }

    match (retailer_str, date_str, time_str, items, total_str) {
        (Some(retailer), Some(date), Some(time), Some(items), Some(total)) => {
            Ok(Receipt {
                retailer: retailer.to_string(),
                purchase_date: date.to_string(),
                purchase_time: time.to_string(),
                items,
                total: total.to_string(),
            })
        }
        _ => Err(errors),
    }
}

fn validate_items(items: Option<&Value>, errors: &mut Vec<ValidationError>) -> Option<Vec<LineItem>> {
    let list = match items.and_then(Value::as_array) {
        Some(list) if !list.is_empty() => list,
        _ => {
            errors.push(ValidationError::body("items", ITEMS_REQUIRED, items));
            return None;
        }
    };

    let mut parsed = Vec::with_capacity(list.len());
    let mut valid = true;

    for (index, item) in list.iter().enumerate() {
        let description = item.get("shortDescription");
        let description_str = description.and_then(Value::as_str).filter(|s| !s.is_empty());
        if description_str.is_none() {
            errors.push(ValidationError::body(
                format!("items[{}].shortDescription", index),
                DESCRIPTION_REQUIRED,
                description,
            ));
        }

        let price = item.get("price");
        let price_str = price.and_then(Value::as_str).filter(|s| Cents::is_well_formed(s));
        if price_str.is_none() {
            errors.push(ValidationError::body(format!("items[{}].price", index), PRICE_INVALID, price));
        }

        match (description_str, price_str) {
            (Some(description), Some(price)) => parsed.push(LineItem::new(description, price)),
            _ => valid = false,
        }
    }

    valid.then_some(parsed)
}

/// Validate the id path segment of a points lookup
pub fn validate_receipt_id(id: &str) -> ValidationResult<&str> {
    if id.trim().is_empty() {
        Err(vec![ValidationError::param("id", ID_REQUIRED, id)])
    } else {
        Ok(id)
    }
}

// ============================================================================
// FORMAT CHECKS
// ============================================================================

/// Calendar date, "YYYY-MM-DD"
static ISO_DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("Invalid date regex")
});

/// 24-hour "H:MM" or "HH:MM"
static TIME_24H_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-1]?[0-9]|2[0-3]):[0-5][0-9]$").expect("Invalid time regex")
});

/// Strict "YYYY-MM-DD" naming a real calendar day
fn is_iso_date(s: &str) -> bool {
    ISO_DATE_PATTERN.is_match(s) && parse_purchase_date(s).is_some()
}

fn is_24h_time(s: &str) -> bool {
    TIME_24H_PATTERN.is_match(s)
}

// ============================================================================
// TESTS
// ============================================================================
