// 🏷️ Scoring Rules - Rules as Data
// Each rule looks at one aspect of a parsed receipt and awards points on its own

use crate::money::Cents;
use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

// ============================================================================
// PARSED RECEIPT
// ============================================================================

/// A receipt whose amounts, date and time have already been parsed.
///
/// Rules only ever see this form, so none of them can fail.
#[derive(Debug, Clone)]
pub struct ParsedReceipt<'a> {
    pub retailer: &'a str,
    pub total: Cents,
    pub items: Vec<ParsedItem<'a>>,
    pub purchase_date: NaiveDate,
    pub purchase_time: NaiveTime,
}

#[derive(Debug, Clone)]
pub struct ParsedItem<'a> {
    /// Description with leading/trailing whitespace removed
    pub trimmed_description: &'a str,
    pub price: Cents,
}

// ============================================================================
// RULE DEFINITION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringRule {
    /// One point per ASCII letter or digit in the retailer name
    RetailerCharacters,
    /// 50 points if the total has no cents
    RoundDollarTotal,
    /// 25 points if the total is a multiple of 0.25
    QuarterMultipleTotal,
    /// 5 points for every two items
    ItemPairs,
    /// ceil(price * 0.2) for items whose trimmed description length is a multiple of 3
    DescriptionLength,
    /// 6 points if the purchase day is odd
    OddPurchaseDay,
    /// 10 points if purchased from 14:00 up to (not including) 16:00
    AfternoonPurchase,
}

pub const ROUND_DOLLAR_POINTS: u64 = 50;
pub const QUARTER_MULTIPLE_POINTS: u64 = 25;
pub const QUARTER_CENTS: u64 = 25;
pub const POINTS_PER_ITEM_PAIR: u64 = 5;
pub const DESCRIPTION_LENGTH_DIVISOR: usize = 3;
pub const ODD_DAY_POINTS: u64 = 6;
pub const AFTERNOON_POINTS: u64 = 10;
pub const AFTERNOON_START_HOUR: u32 = 14;
pub const AFTERNOON_END_HOUR: u32 = 16;

impl ScoringRule {
    /// Every rule, in evaluation order
    pub const ALL: [ScoringRule; 7] = [
        ScoringRule::RetailerCharacters,
        ScoringRule::RoundDollarTotal,
        ScoringRule::QuarterMultipleTotal,
        ScoringRule::ItemPairs,
        ScoringRule::DescriptionLength,
        ScoringRule::OddPurchaseDay,
        ScoringRule::AfternoonPurchase,
    ];

    /// Stable identifier, used in breakdowns and logs
    pub fn id(&self) -> &'static str {
        match self {
            ScoringRule::RetailerCharacters => "retailer_characters",
            ScoringRule::RoundDollarTotal => "round_dollar_total",
            ScoringRule::QuarterMultipleTotal => "quarter_multiple_total",
            ScoringRule::ItemPairs => "item_pairs",
            ScoringRule::DescriptionLength => "description_length",
            ScoringRule::OddPurchaseDay => "odd_purchase_day",
            ScoringRule::AfternoonPurchase => "afternoon_purchase",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ScoringRule::RetailerCharacters => "1 point for every alphanumeric character in the retailer name",
            ScoringRule::RoundDollarTotal => "50 points if the total is a round dollar amount with no cents",
            ScoringRule::QuarterMultipleTotal => "25 points if the total is a multiple of 0.25",
            ScoringRule::ItemPairs => "5 points for every two items on the receipt",
            ScoringRule::DescriptionLength => {
                "ceil(price * 0.2) for each item whose trimmed description length is a multiple of 3"
            }
            ScoringRule::OddPurchaseDay => "6 points if the day in the purchase date is odd",
            ScoringRule::AfternoonPurchase => "10 points if the time of purchase is from 2:00pm to before 4:00pm",
        }
    }

    pub fn from_id(id: &str) -> Option<ScoringRule> {
        ScoringRule::ALL.iter().copied().find(|rule| rule.id() == id)
    }

    /// Points this rule awards for the receipt, or `None` if they overflow `u64`
    pub fn evaluate(&self, receipt: &ParsedReceipt<'_>) -> Option<u64> {
        match self {
            ScoringRule::RetailerCharacters => Some(
                receipt
                    .retailer
                    .chars()
                    .filter(|c| c.is_ascii_alphanumeric())
                    .count() as u64,
            ),

            ScoringRule::RoundDollarTotal => Some(if receipt.total.is_round_dollar() {
                ROUND_DOLLAR_POINTS
            } else {
                0
            }),

            ScoringRule::QuarterMultipleTotal => Some(if receipt.total.is_multiple_of(QUARTER_CENTS) {
                QUARTER_MULTIPLE_POINTS
            } else {
                0
            }),

            ScoringRule::ItemPairs => ((receipt.items.len() / 2) as u64).checked_mul(POINTS_PER_ITEM_PAIR),

            // Prices are unbounded, so the sum can leave u64
            ScoringRule::DescriptionLength => receipt
                .items
                .iter()
                .filter(|item| description_qualifies(item.trimmed_description))
                .map(|item| item.price.ceil_dollars_of_fraction(1, 5))
                .try_fold(0u64, u64::checked_add),

            ScoringRule::OddPurchaseDay => Some(if receipt.purchase_date.day() % 2 == 1 {
                ODD_DAY_POINTS
            } else {
                0
            }),

            ScoringRule::AfternoonPurchase => {
                let hour = receipt.purchase_time.hour();
                Some(if (AFTERNOON_START_HOUR..AFTERNOON_END_HOUR).contains(&hour) {
                    AFTERNOON_POINTS
                } else {
                    0
                })
            }
        }
    }
}

/// Trimmed length is a multiple of 3 and not zero
fn description_qualifies(trimmed: &str) -> bool {
    let len = trimmed.chars().count();
    len > 0 && len % DESCRIPTION_LENGTH_DIVISOR == 0
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed<'a>(retailer: &'a str, total: &str, items: Vec<(&'a str, &str)>) -> ParsedReceipt<'a> {
        ParsedReceipt {
            retailer,
            total: Cents::parse(total).unwrap(),
            items: items
                .into_iter()
                .map(|(desc, price)| ParsedItem {
                    trimmed_description: desc.trim(),
                    price: Cents::parse(price).unwrap(),
                })
                .collect(),
            purchase_date: NaiveDate::from_ymd_opt(2023, 6, 14).unwrap(),
            purchase_time: NaiveTime::from_hms_opt(13, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_retailer_characters_ignore_punctuation() {
        let receipt = parsed("M&M Corner Market", "1.10", vec![]);
        assert_eq!(ScoringRule::RetailerCharacters.evaluate(&receipt), Some(14));

        let receipt = parsed("  --  ", "1.10", vec![]);
        assert_eq!(ScoringRule::RetailerCharacters.evaluate(&receipt), Some(0));
    }

    #[test]
    fn test_retailer_characters_are_ascii_only() {
        let receipt = parsed("Café 24", "1.10", vec![]);
        // C, a, f, 2, 4 -- 'é' is not ASCII
        assert_eq!(ScoringRule::RetailerCharacters.evaluate(&receipt), Some(5));
    }

    #[test]
    fn test_total_bonuses_are_independent() {
        let round = parsed("x", "60.00", vec![]);
        assert_eq!(ScoringRule::RoundDollarTotal.evaluate(&round), Some(50));
        assert_eq!(ScoringRule::QuarterMultipleTotal.evaluate(&round), Some(25));

        let quarter = parsed("x", "1.25", vec![]);
        assert_eq!(ScoringRule::RoundDollarTotal.evaluate(&quarter), Some(0));
        assert_eq!(ScoringRule::QuarterMultipleTotal.evaluate(&quarter), Some(25));

        let neither = parsed("x", "1.10", vec![]);
        assert_eq!(ScoringRule::RoundDollarTotal.evaluate(&neither), Some(0));
        assert_eq!(ScoringRule::QuarterMultipleTotal.evaluate(&neither), Some(0));
    }

    #[test]
    fn test_item_pairs() {
        let items = vec![("a", "1.00"); 5];
        assert_eq!(ScoringRule::ItemPairs.evaluate(&parsed("x", "1.10", items)), Some(10));
        assert_eq!(ScoringRule::ItemPairs.evaluate(&parsed("x", "1.10", vec![("a", "1.00")])), Some(0));
        assert_eq!(ScoringRule::ItemPairs.evaluate(&parsed("x", "1.10", vec![])), Some(0));
    }

    #[test]
    fn test_description_length_uses_trimmed_length() {
        let receipt = parsed(
            "x",
            "1.10",
            vec![
                ("   Klarbrunn 12-PK 12 FL OZ  ", "12.00"), // 24 chars -> ceil(2.4) = 3
                ("Emils Cheese Pizza", "12.25"),           // 18 chars -> ceil(2.45) = 3
                ("Gatorade", "2.25"),                      // 8 chars -> 0
            ],
        );
        assert_eq!(ScoringRule::DescriptionLength.evaluate(&receipt), Some(6));
    }

    #[test]
    fn test_description_length_skips_empty_trim() {
        let receipt = parsed("x", "1.10", vec![("     ", "100.00")]);
        assert_eq!(ScoringRule::DescriptionLength.evaluate(&receipt), Some(0));
    }

    #[test]
    fn test_description_length_overflow_is_none() {
        let items = vec![("abc", "184467440737095516.15"); 600];
        assert_eq!(ScoringRule::DescriptionLength.evaluate(&parsed("x", "1.10", items)), None);
    }

    #[test]
    fn test_odd_day() {
        let mut receipt = parsed("x", "1.10", vec![]);
        assert_eq!(ScoringRule::OddPurchaseDay.evaluate(&receipt), Some(0));

        receipt.purchase_date = NaiveDate::from_ymd_opt(2023, 6, 15).unwrap();
        assert_eq!(ScoringRule::OddPurchaseDay.evaluate(&receipt), Some(6));

        receipt.purchase_date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(ScoringRule::OddPurchaseDay.evaluate(&receipt), Some(6));
    }

    #[test]
    fn test_afternoon_window_is_half_open() {
        let mut receipt = parsed("x", "1.10", vec![]);
        let cases = [(13, 59, 0), (14, 0, 10), (14, 1, 10), (15, 59, 10), (16, 0, 0), (23, 0, 0)];

        for (hour, minute, expected) in cases {
            receipt.purchase_time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap();
            assert_eq!(
                ScoringRule::AfternoonPurchase.evaluate(&receipt),
                Some(expected),
                "at {:02}:{:02}",
                hour,
                minute
            );
        }
    }

    #[test]
    fn test_rule_ids_round_trip() {
        for rule in ScoringRule::ALL {
            assert_eq!(ScoringRule::from_id(rule.id()), Some(rule));
        }
        assert_eq!(ScoringRule::from_id("unknown"), None);
    }
}
