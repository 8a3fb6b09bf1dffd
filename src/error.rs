// ⚠️ Error Types - Calculator and Registry failures
// Validation failures live in validation.rs; these are the core's own errors

use thiserror::Error;

/// Errors raised while scoring a receipt.
///
/// A structural error means the receipt got past request validation but the
/// calculator still cannot read one of its fields. It is never turned into a
/// zero score.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PointsError {
    #[error("invalid receipt structure: {field}: {reason}")]
    Structural { field: String, reason: String },
}

impl PointsError {
    pub fn structural(field: impl Into<String>, reason: impl Into<String>) -> Self {
        PointsError::Structural {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the field that could not be read
    pub fn field(&self) -> &str {
        match self {
            PointsError::Structural { field, .. } => field,
        }
    }
}

/// Errors raised by the receipt registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error(transparent)]
    Points(#[from] PointsError),

    #[error("no receipt found for id {0}")]
    NotFound(String),

    /// The generator handed out an id that is already stored
    #[error("generated id {0} already exists")]
    IdCollision(String),
}

impl RegistryError {
    /// Lookup misses are a normal outcome; everything else is a fault.
    pub fn is_internal(&self) -> bool {
        !matches!(self, RegistryError::NotFound(_))
    }
}
