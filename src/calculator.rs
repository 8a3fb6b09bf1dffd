// 🧮 Points Calculator - Receipt → reward points
// Parses the textual fields once, then sums every scoring rule

use crate::error::PointsError;
use crate::money::Cents;
use crate::receipt::Receipt;
use crate::rules::{ParsedItem, ParsedReceipt, ScoringRule};
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use tracing::debug;

// ============================================================================
// BREAKDOWN
// ============================================================================

/// Points awarded by a single rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleOutcome {
    pub rule: ScoringRule,
    pub points: u64,
}

/// Per-rule contributions for one receipt; `total` is their sum
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PointsBreakdown {
    pub outcomes: Vec<RuleOutcome>,
    pub total: u64,
}

impl PointsBreakdown {
    pub fn points_for(&self, rule: ScoringRule) -> Option<u64> {
        self.outcomes
            .iter()
            .find(|outcome| outcome.rule == rule)
            .map(|outcome| outcome.points)
    }
}

// ============================================================================
// CALCULATOR
// ============================================================================

#[derive(Debug, Clone)]
pub struct PointsCalculator {
    rules: Vec<ScoringRule>,
}

impl PointsCalculator {
    /// Calculator applying every scoring rule
    pub fn new() -> Self {
        PointsCalculator::with_rules(ScoringRule::ALL.to_vec())
    }

    /// Calculator applying only the given rules, in the given order
    pub fn with_rules(rules: Vec<ScoringRule>) -> Self {
        PointsCalculator { rules }
    }

    pub fn rules(&self) -> &[ScoringRule] {
        &self.rules
    }

    /// Total points for a receipt
    pub fn calculate(&self, receipt: &Receipt) -> Result<u64, PointsError> {
        self.breakdown(receipt).map(|breakdown| breakdown.total)
    }

    /// Points per rule for a receipt
    pub fn breakdown(&self, receipt: &Receipt) -> Result<PointsBreakdown, PointsError> {
        let parsed = parse_receipt(receipt)?;

        let mut total = 0u64;
        let mut outcomes = Vec::with_capacity(self.rules.len());

        for rule in &self.rules {
            let points = rule
                .evaluate(&parsed)
                .ok_or_else(|| PointsError::structural("items", format!("{} points overflow", rule.id())))?;
            total = total
                .checked_add(points)
                .ok_or_else(|| PointsError::structural("total", "points overflow"))?;
            debug!(rule = rule.id(), points, running_total = total, "scoring rule applied");
            outcomes.push(RuleOutcome { rule: *rule, points });
        }

        Ok(PointsBreakdown { outcomes, total })
    }
}

impl Default for PointsCalculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Score a receipt with every rule
pub fn calculate_points(receipt: &Receipt) -> Result<u64, PointsError> {
    PointsCalculator::new().calculate(receipt)
}

// ============================================================================
// PARSING
// ============================================================================

fn parse_receipt(receipt: &Receipt) -> Result<ParsedReceipt<'_>, PointsError> {
    let total = Cents::parse(&receipt.total)
        .map_err(|e| PointsError::structural("total", e.to_string()))?;

    let items = receipt
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| -> Result<ParsedItem, PointsError> {
            let price = Cents::parse(&item.price)
                .map_err(|e| PointsError::structural(format!("items[{}].price", index), e.to_string()))?;
            Ok(ParsedItem {
                trimmed_description: item.short_description.trim(),
                price,
            })
        })
        .collect::<Result<Vec<_>, PointsError>>()?;

    let purchase_date = parse_purchase_date(&receipt.purchase_date)
        .ok_or_else(|| PointsError::structural("purchaseDate", format!("not a calendar date: {:?}", receipt.purchase_date)))?;

    let purchase_time = parse_purchase_time(&receipt.purchase_time)
        .ok_or_else(|| PointsError::structural("purchaseTime", format!("not a time of day: {:?}", receipt.purchase_time)))?;

    Ok(ParsedReceipt {
        retailer: &receipt.retailer,
        total,
        items,
        purchase_date,
        purchase_time,
    })
}

/// Parse a "YYYY-MM-DD" calendar date, taken literally (no timezone shift)
pub fn parse_purchase_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d").ok()
}

/// Parse "HH:MM" or "HH:MM:SS"; seconds are accepted but never scored
pub fn parse_purchase_time(input: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(input, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(input, "%H:%M:%S"))
        .ok()
}

// ============================================================================
// TESTS
// ============================================================================
