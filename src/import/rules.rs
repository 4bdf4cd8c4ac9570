//! Declarative validation rules and the single function that evaluates them
//!
//! Field rules (required, length, e-mail, select, range) look only at the
//! raw cell text. Reference rules (unique, exists) need the records that
//! already exist plus the rows accepted earlier in the same batch.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::kind::ImportKind;
use super::records::{ExistingRecords, FieldAccess};
use super::sheet::parse_number;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid e-mail regex"));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleKind {
    Required,
    MaxLength { max: usize },
    Email,
    Select { valid_values: Vec<String> },
    Range { min: f64, max: f64 },
    Unique,
    Exists {
        collection: ImportKind,
        reference_field: String,
    },
}

/// One rule applied to one field. Several rules may target the same field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRule {
    pub field: String,
    #[serde(flatten)]
    pub kind: RuleKind,
    pub message: String,
}

impl ValidationRule {
    pub fn new(field: impl Into<String>, kind: RuleKind, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind,
            message: message.into(),
        }
    }

    pub fn required(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, RuleKind::Required, message)
    }

    pub fn max_length(field: impl Into<String>, max: usize, message: impl Into<String>) -> Self {
        Self::new(field, RuleKind::MaxLength { max }, message)
    }

    pub fn email(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, RuleKind::Email, message)
    }

    pub fn select(
        field: impl Into<String>,
        valid_values: &[&str],
        message: impl Into<String>,
    ) -> Self {
        let valid_values = valid_values.iter().map(|v| v.to_string()).collect();
        Self::new(field, RuleKind::Select { valid_values }, message)
    }

    pub fn range(field: impl Into<String>, min: f64, max: f64, message: impl Into<String>) -> Self {
        Self::new(field, RuleKind::Range { min, max }, message)
    }

    pub fn unique(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, RuleKind::Unique, message)
    }

    pub fn exists(
        field: impl Into<String>,
        collection: ImportKind,
        reference_field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(
            field,
            RuleKind::Exists {
                collection,
                reference_field: reference_field.into(),
            },
            message,
        )
    }

    /// Rules that can be decided from the cell text alone
    pub fn is_field_rule(&self) -> bool {
        !self.is_reference_rule()
    }

    /// Rules that need the existing records and the current batch
    pub fn is_reference_rule(&self) -> bool {
        matches!(self.kind, RuleKind::Unique | RuleKind::Exists { .. })
    }
}

/// Where a conflicting unique value was first seen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirstSeen {
    Existing,
    Row(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuleFailure {
    pub message: String,
    /// Set only for failed `unique` rules
    pub first_seen: Option<FirstSeen>,
}

impl RuleFailure {
    fn plain(message: &str) -> Self {
        Self {
            message: message.to_string(),
            first_seen: None,
        }
    }
}

/// Everything a reference rule may look at while one row is validated.
///
/// `batch` holds the rows accepted so far in this import, with their
/// spreadsheet row numbers.
pub struct RuleContext<'a, R> {
    pub kind: ImportKind,
    pub existing: &'a ExistingRecords,
    pub batch: &'a [(usize, R)],
}

impl<'a, R> RuleContext<'a, R> {
    pub fn new(kind: ImportKind, existing: &'a ExistingRecords, batch: &'a [(usize, R)]) -> Self {
        Self {
            kind,
            existing,
            batch,
        }
    }
}

/// Key used for uniqueness and reference comparisons.
///
/// Trimming and case-folding here is a product decision, not something the
/// stored data guarantees.
pub fn comparison_key(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Evaluate one rule against one value.
///
/// Blank handling is the caller's job: a blank optional value should not be
/// passed here at all, and a blank required value only ever fails `Required`.
pub fn evaluate<R: FieldAccess>(
    rule: &ValidationRule,
    value: &str,
    ctx: &RuleContext<'_, R>,
) -> Result<(), RuleFailure> {
    match &rule.kind {
        RuleKind::Required => {
            if value.trim().is_empty() {
                return Err(RuleFailure::plain(&rule.message));
            }
        }
        RuleKind::MaxLength { max } => {
            if value.chars().count() > *max {
                return Err(RuleFailure::plain(&rule.message));
            }
        }
        RuleKind::Email => {
            if !EMAIL_RE.is_match(value.trim()) {
                return Err(RuleFailure::plain(&rule.message));
            }
        }
        RuleKind::Select { valid_values } => {
            if !valid_values.iter().any(|v| v == value) {
                return Err(RuleFailure::plain(&rule.message));
            }
        }
        RuleKind::Range { min, max } => match parse_number(value) {
            Some(n) if n >= *min && n <= *max => {}
            _ => return Err(RuleFailure::plain(&rule.message)),
        },
        RuleKind::Unique => {
            let key = comparison_key(value);
            if ctx.existing.contains_value(ctx.kind, &rule.field, &key) {
                return Err(RuleFailure {
                    message: rule.message.clone(),
                    first_seen: Some(FirstSeen::Existing),
                });
            }
            let earlier = ctx.batch.iter().find(|(_, record)| {
                record
                    .field_value(&rule.field)
                    .map(|v| comparison_key(v) == key)
                    .unwrap_or(false)
            });
            if let Some((row, _)) = earlier {
                return Err(RuleFailure {
                    message: rule.message.clone(),
                    first_seen: Some(FirstSeen::Row(*row)),
                });
            }
        }
        RuleKind::Exists {
            collection,
            reference_field,
        } => {
            if !ctx
                .existing
                .contains_value(*collection, reference_field, &comparison_key(value))
            {
                return Err(RuleFailure::plain(&rule.message));
            }
        }
    }

    Ok(())
}
