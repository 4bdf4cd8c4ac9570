use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::import::VerificationType;

const WEIGHT_TOLERANCE: f64 = 0.01;

/// Identity of the checklist being built from a requirement batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistMeta {
    pub name: String,
    pub standard: String,
    pub version: String,
}

impl ChecklistMeta {
    pub fn new(
        name: impl Into<String>,
        standard: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            standard: standard.into(),
            version: version.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checklist {
    pub id: Uuid,
    pub name: String,
    pub standard: String,
    pub version: String,
    pub categories: Vec<ChecklistCategory>,
    pub total_weight: f64,
    pub max_score: f64,
    pub created_at: DateTime<Utc>,
}

impl Checklist {
    /// Whether the weights add up to 100. Advisory only.
    pub fn is_complete(&self) -> bool {
        (self.total_weight - 100.0).abs() <= WEIGHT_TOLERANCE
    }

    pub fn item_count(&self) -> usize {
        self.categories.iter().map(|c| c.items.len()).sum()
    }

    pub fn items(&self) -> impl Iterator<Item = &ChecklistItem> {
        self.categories.iter().flat_map(|c| c.items.iter())
    }
}

/// One chapter of the standard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistCategory {
    pub id: Uuid,
    pub name: String,
    /// 1-based position in the checklist
    pub order: usize,
    pub weight: f64,
    pub items: Vec<ChecklistItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: Uuid,
    pub requirement_id: Uuid,
    pub requirement_code: String,
    pub title: String,
    pub description: String,
    pub evaluation_criteria: String,
    pub verification_type: VerificationType,
    pub max_score: f64,
    /// 1-based position inside its category
    pub order: usize,
    pub evidence_required: bool,
    pub is_required: bool,
    pub observations: Option<String>,
}
