// 🗂️ Receipt Registry - id → scored receipt, for the life of the process
//
// Receipt id is IDENTITY (opaque, never reused), points are a VALUE computed
// once at registration. Nothing is ever updated or removed.

use crate::calculator::PointsCalculator;
use crate::error::RegistryError;
use crate::receipt::{Receipt, ScoredReceipt};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info};

// ============================================================================
// IDENTIFIER GENERATOR
// ============================================================================

/// Source of opaque receipt identifiers.
///
/// Implementations must be safe to call from many handlers at once without
/// coordinating with each other.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Random 128-bit identifiers (UUID v4)
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

// ============================================================================
// RECEIPT REGISTRY
// ============================================================================

/// Shared handle to the receipt store. Clones see the same entries.
#[derive(Clone)]
pub struct ReceiptRegistry {
    entries: Arc<RwLock<HashMap<String, ScoredReceipt>>>,
    calculator: Arc<PointsCalculator>,
    ids: Arc<dyn IdGenerator>,
}

impl ReceiptRegistry {
    /// Empty registry scoring with every rule and issuing UUIDs
    pub fn new() -> Self {
        ReceiptRegistry::with_parts(PointsCalculator::new(), Arc::new(UuidGenerator))
    }

    pub fn with_parts(calculator: PointsCalculator, ids: Arc<dyn IdGenerator>) -> Self {
        ReceiptRegistry {
            entries: Arc::new(RwLock::new(HashMap::new())),
            calculator: Arc::new(calculator),
            ids,
        }
    }

    /// Score and store a receipt, returning its new id.
    ///
    /// Scoring and id generation happen before the write lock is taken.
    pub fn create(&self, receipt: Receipt) -> Result<String, RegistryError> {
        let points = self.calculator.calculate(&receipt)?;
        let id = self.ids.next_id();

        {
            // Each insert is a single map operation, so a poisoned lock still
            // guards a consistent map.
            let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
            if entries.contains_key(&id) {
                return Err(RegistryError::IdCollision(id));
            }
            entries.insert(id.clone(), ScoredReceipt::new(id.clone(), receipt, points));
        }

        info!(receipt_id = %id, points, "receipt registered");
        Ok(id)
    }

    /// Points stored for `id`
    pub fn get_points(&self, id: &str) -> Result<u64, RegistryError> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        match entries.get(id) {
            Some(entry) => Ok(entry.points),
            None => {
                debug!(receipt_id = %id, "receipt lookup missed");
                Err(RegistryError::NotFound(id.to_string()))
            }
        }
    }

    /// Full stored entry for `id`
    pub fn get(&self, id: &str) -> Option<ScoredReceipt> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// Number of stored receipts
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ReceiptRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
