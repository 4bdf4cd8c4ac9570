//! Grouping of imported requirements into a weighted checklist

use chrono::Utc;
use log::{debug, info};
use thiserror::Error;
use uuid::Uuid;

use super::model::{Checklist, ChecklistCategory, ChecklistItem, ChecklistMeta};
use crate::import::NormativeRequirement;
use crate::store::{ChecklistStore, StoreError};

const TITLE_DESCRIPTION_CHARS: usize = 100;
const EMPTY_DESCRIPTION: &str = "Sem descrição";

#[derive(Debug, Error, PartialEq)]
pub enum ConversionError {
    #[error("no requirements to convert")]
    EmptyRequirements,

    #[error("requirement '{code}' has no chapter")]
    BlankChapter { code: String },

    #[error("requirement '{code}' has invalid weight {weight}")]
    InvalidWeight { code: String, weight: f64 },

    #[error("checklist name must not be blank")]
    BlankName,
}

/// Build an unsaved checklist from a requirement batch.
///
/// Chapters become categories in the order they first appear. Each item
/// scores up to its requirement's weight.
///
/// # Arguments
/// * `requirements` - Requirements as accepted by the importer
/// * `meta` - Name, standard and version of the new checklist
///
/// # Returns
/// * `Ok(Checklist)` - Preview; nothing is persisted
/// * `Err(ConversionError)` - The batch cannot form a checklist
pub fn build_checklist_preview(
    requirements: &[NormativeRequirement],
    meta: &ChecklistMeta,
) -> Result<Checklist, ConversionError> {
    if meta.name.trim().is_empty() {
        return Err(ConversionError::BlankName);
    }
    if requirements.is_empty() {
        return Err(ConversionError::EmptyRequirements);
    }

    let mut categories: Vec<ChecklistCategory> = Vec::new();

    for requirement in requirements {
        let chapter = requirement.chapter.trim();
        if chapter.is_empty() {
            return Err(ConversionError::BlankChapter {
                code: requirement.requirement_code.clone(),
            });
        }
        if !requirement.weight.is_finite() || requirement.weight < 0.0 {
            return Err(ConversionError::InvalidWeight {
                code: requirement.requirement_code.clone(),
                weight: requirement.weight,
            });
        }

        let index = match categories.iter().position(|c| c.name == chapter) {
            Some(index) => index,
            None => {
                debug!("New category '{}'", chapter);
                categories.push(ChecklistCategory {
                    id: Uuid::new_v4(),
                    name: chapter.to_string(),
                    order: categories.len() + 1,
                    weight: 0.0,
                    items: Vec::new(),
                });
                categories.len() - 1
            }
        };

        let category = &mut categories[index];
        category.weight += requirement.weight;
        let order = category.items.len() + 1;
        category.items.push(item_for(requirement, order));
    }

    let total_weight: f64 = categories.iter().map(|c| c.weight).sum();

    let checklist = Checklist {
        id: Uuid::new_v4(),
        name: meta.name.trim().to_string(),
        standard: meta.standard.clone(),
        version: meta.version.clone(),
        categories,
        total_weight,
        max_score: total_weight,
        created_at: Utc::now(),
    };

    info!(
        "Built checklist '{}' with {} categories, {} items, total weight {}",
        checklist.name,
        checklist.categories.len(),
        checklist.item_count(),
        checklist.total_weight
    );
    Ok(checklist)
}

/// Persist a previewed checklist
pub fn commit_checklist(
    checklist: Checklist,
    store: &mut impl ChecklistStore,
) -> Result<Uuid, StoreError> {
    let name = checklist.name.clone();
    let id = store.save_checklist(checklist)?;
    info!("Committed checklist '{}' as {}", name, id);
    Ok(id)
}

fn item_for(requirement: &NormativeRequirement, order: usize) -> ChecklistItem {
    ChecklistItem {
        id: Uuid::new_v4(),
        requirement_id: requirement.id,
        requirement_code: requirement.requirement_code.clone(),
        title: item_title(&requirement.requirement_code, &requirement.description),
        description: requirement.description.clone(),
        evaluation_criteria: requirement.evaluation_criteria.clone(),
        verification_type: requirement.verification_type,
        max_score: requirement.weight,
        order,
        evidence_required: true,
        is_required: true,
        observations: requirement.observations.clone(),
    }
}

/// `"{code} - {description}"` with the description cut at 100 characters
fn item_title(code: &str, description: &str) -> String {
    let description = description.trim();
    if description.is_empty() {
        return format!("{} - {}", code, EMPTY_DESCRIPTION);
    }
    if description.chars().count() > TITLE_DESCRIPTION_CHARS {
        let cut: String = description.chars().take(TITLE_DESCRIPTION_CHARS).collect();
        format!("{} - {}...", code, cut)
    } else {
        format!("{} - {}", code, description)
    }
}
