// Receipt Points - Core Library
// Exposes the scoring engine and registry for the CLI, the API server, and tests

pub mod error;
pub mod money;
pub mod receipt;
pub mod rules;          // Scoring rules as data
pub mod calculator;     // Receipt → points, with per-rule breakdown
pub mod registry;       // id → scored receipt
pub mod validation;     // Request shape checks
pub mod config;

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use error::{PointsError, RegistryError};
pub use money::Cents;
pub use receipt::{LineItem, Receipt, ScoredReceipt};
pub use rules::ScoringRule;
pub use calculator::{
    PointsCalculator, PointsBreakdown, RuleOutcome,
    calculate_points,
};
pub use registry::{IdGenerator, ReceiptRegistry, UuidGenerator};
pub use validation::{
    ValidationError, ValidationResult,
    validate_receipt, validate_receipt_id,
};
pub use config::{RateLimitConfig, ServerConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
