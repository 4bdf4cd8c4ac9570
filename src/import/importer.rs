//! The import pipeline: gate, parse, decode, validate, account
//!
//! Nothing here writes to storage. Callers persist `ImportResult::data`
//! themselves once they have looked at the outcome.

use log::{debug, info, warn};
use serde::Serialize;
use serde_json::{Map, Number, Value};

use super::error::ImportFailure;
use super::file::{ImportFile, ImportLimits, check_file};
use super::kind::ImportKind;
use super::records::{
    AnyRecord, AuditType, Auditor, ExistingRecords, ImportRecord, NormativeRequirement, Process,
    Sector, Subprocess,
};
use super::registry::{ColumnType, ImportConfig, ImportRegistry};
use super::result::{DuplicateEntry, ImportError, ImportResult};
use super::rules::{RuleContext, RuleKind, evaluate};
use super::sheet::{CellValue, SheetContents, SheetRow, parse_sheet};

pub struct Importer<'a> {
    registry: &'a ImportRegistry,
    limits: ImportLimits,
}

impl<'a> Importer<'a> {
    pub fn new(registry: &'a ImportRegistry, limits: ImportLimits) -> Self {
        Self { registry, limits }
    }

    /// Import a file as records of `T`.
    ///
    /// File-level problems abort with `Err`; row problems end up in the
    /// returned result.
    pub fn import<T: ImportRecord>(
        &self,
        file: &ImportFile,
        existing: &ExistingRecords,
    ) -> Result<ImportResult<T>, ImportFailure> {
        let config = self.registry.config(T::KIND)?;
        check_file(file, &self.limits)?;

        info!("Importing {} from '{}'", T::KIND, file.name);

        let sheet = match parse_sheet(&file.name, &file.bytes)? {
            SheetContents::Empty { headers } => {
                warn_on_headers(config, &headers);
                info!("'{}' has no data rows", file.name);
                return Ok(ImportResult::no_data());
            }
            SheetContents::Rows(sheet) => sheet,
        };

        warn_on_headers(config, &sheet.headers);
        debug!("Read {} rows from sheet '{}'", sheet.rows.len(), sheet.name);

        let result = validate_rows::<T>(config, &sheet.rows, existing);
        info!(
            "Imported {}: {} processed, {} accepted, {} rejected",
            T::KIND,
            result.total_processed,
            result.total_success,
            result.total_errors
        );
        Ok(result)
    }

    /// Runtime dispatch on the import kind
    pub fn import_any(
        &self,
        kind: ImportKind,
        file: &ImportFile,
        existing: &ExistingRecords,
    ) -> Result<ImportOutcome, ImportFailure> {
        let outcome = match kind {
            ImportKind::Auditors => ImportOutcome::Auditors(self.import(file, existing)?),
            ImportKind::Sectors => ImportOutcome::Sectors(self.import(file, existing)?),
            ImportKind::Subprocesses => ImportOutcome::Subprocesses(self.import(file, existing)?),
            ImportKind::Processes => ImportOutcome::Processes(self.import(file, existing)?),
            ImportKind::AuditTypes => ImportOutcome::AuditTypes(self.import(file, existing)?),
            ImportKind::Requirements => ImportOutcome::Requirements(self.import(file, existing)?),
        };
        Ok(outcome)
    }
}

/// Typed result of [`Importer::import_any`]
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ImportOutcome {
    Auditors(ImportResult<Auditor>),
    Sectors(ImportResult<Sector>),
    Subprocesses(ImportResult<Subprocess>),
    Processes(ImportResult<Process>),
    AuditTypes(ImportResult<AuditType>),
    Requirements(ImportResult<NormativeRequirement>),
}

impl ImportOutcome {
    /// Erase the record type, for storage or display
    pub fn into_any(self) -> ImportResult<AnyRecord> {
        match self {
            ImportOutcome::Auditors(r) => r.map(ImportRecord::into_any),
            ImportOutcome::Sectors(r) => r.map(ImportRecord::into_any),
            ImportOutcome::Subprocesses(r) => r.map(ImportRecord::into_any),
            ImportOutcome::Processes(r) => r.map(ImportRecord::into_any),
            ImportOutcome::AuditTypes(r) => r.map(ImportRecord::into_any),
            ImportOutcome::Requirements(r) => r.map(ImportRecord::into_any),
        }
    }
}

fn warn_on_headers(config: &ImportConfig, headers: &[String]) {
    for column in &config.columns {
        if !headers.iter().any(|h| h == &column.label) {
            if column.required {
                warn!("Required column '{}' is missing from the header row", column.label);
            } else {
                debug!("Optional column '{}' is missing from the header row", column.label);
            }
        }
    }
    for header in headers {
        if !header.is_empty() && !config.columns.iter().any(|c| &c.label == header) {
            warn!("Ignoring unknown column '{}'", header);
        }
    }
}

/// Validate already-parsed rows. Pure relative to its inputs.
///
/// Rows are processed in order because later rows are checked for
/// uniqueness against the rows accepted before them.
pub fn validate_rows<T: ImportRecord>(
    config: &ImportConfig,
    rows: &[SheetRow],
    existing: &ExistingRecords,
) -> ImportResult<T> {
    let mut result = ImportResult::new();
    let mut accepted: Vec<(usize, T)> = Vec::new();

    for row in rows {
        match validate_row::<T>(config, row, existing, &accepted) {
            Ok(record) => {
                debug!("Row {} accepted: {}", row.number, record.label());
                accepted.push((row.number, record.clone()));
                result.record_success(record);
            }
            Err(rejection) => {
                debug!("Row {} rejected with {} errors", row.number, rejection.errors.len());
                result.record_failure(rejection.errors, rejection.duplicates);
            }
        }
    }

    result
}

struct RowRejection {
    errors: Vec<ImportError>,
    duplicates: Vec<DuplicateEntry>,
}

impl RowRejection {
    fn errors(errors: Vec<ImportError>) -> Self {
        Self {
            errors,
            duplicates: Vec::new(),
        }
    }
}

fn validate_row<T: ImportRecord>(
    config: &ImportConfig,
    row: &SheetRow,
    existing: &ExistingRecords,
    accepted: &[(usize, T)],
) -> Result<T, RowRejection> {
    let ctx = RuleContext::new(config.kind, existing, accepted);

    // Phase 1: field rules on the raw cells, every failure collected
    let mut errors = Vec::new();
    for column in &config.columns {
        let cell = row.cell(&column.label);
        let text = cell.as_text();
        let blank = text.trim().is_empty();

        for rule in config.rules_for(&column.key).filter(|r| r.is_field_rule()) {
            if blank && !matches!(rule.kind, RuleKind::Required) {
                continue;
            }
            if let Err(failure) = evaluate(rule, &text, &ctx) {
                errors.push(ImportError {
                    row: row.number,
                    field: column.key.clone(),
                    value: cell.clone(),
                    message: failure.message,
                });
                if blank {
                    break;
                }
            }
        }
    }
    if !errors.is_empty() {
        return Err(RowRejection::errors(errors));
    }

    // Phase 2: typed decode
    let record: T = decode_row(config, row).map_err(RowRejection::errors)?;

    // Phase 3: reference rules against existing records and this batch
    let mut errors = Vec::new();
    let mut duplicates = Vec::new();
    for rule in config.rules.iter().filter(|r| r.is_reference_rule()) {
        let Some(value) = record.field_value(&rule.field) else {
            continue;
        };
        if value.trim().is_empty() {
            continue;
        }
        if let Err(failure) = evaluate(rule, value, &ctx) {
            if let Some(first_seen) = failure.first_seen {
                duplicates.push(DuplicateEntry {
                    row: row.number,
                    field: rule.field.clone(),
                    value: value.to_string(),
                    first_seen,
                });
            }
            errors.push(ImportError {
                row: row.number,
                field: rule.field.clone(),
                value: CellValue::text(value),
                message: failure.message,
            });
        }
    }

    if errors.is_empty() {
        Ok(record)
    } else {
        Err(RowRejection { errors, duplicates })
    }
}

/// Turn a row into a typed record through serde.
///
/// Columns are mapped by exact header label. Blank cells are left out so
/// optional fields decode as `None`.
fn decode_row<T: ImportRecord>(config: &ImportConfig, row: &SheetRow) -> Result<T, Vec<ImportError>> {
    let mut object = Map::new();
    let mut errors = Vec::new();

    for column in &config.columns {
        let cell = row.cell(&column.label);
        if cell.is_blank() {
            continue;
        }
        let value = match column.column_type {
            ColumnType::Number => match cell.as_number().and_then(Number::from_f64) {
                Some(n) => Value::Number(n),
                None => {
                    errors.push(ImportError {
                        row: row.number,
                        field: column.key.clone(),
                        value: cell.clone(),
                        message: format!("{} deve ser um número", column.label),
                    });
                    continue;
                }
            },
            ColumnType::Text | ColumnType::Email | ColumnType::Select => {
                Value::String(cell.as_text())
            }
        };
        object.insert(column.key.clone(), value);
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    serde_json::from_value(Value::Object(object)).map_err(|e| {
        let field = missing_field(&e.to_string()).unwrap_or_else(|| "registro".to_string());
        let value = config
            .column(&field)
            .map(|c| row.cell(&c.label).clone())
            .unwrap_or_default();
        vec![ImportError {
            row: row.number,
            field,
            value,
            message: format!("Registro inválido: {}", e),
        }]
    })
}

/// Extract the field name from serde's "missing field `x`" message
fn missing_field(message: &str) -> Option<String> {
    let rest = message.strip_prefix("missing field `")?;
    rest.split('`').next().map(str::to_string)
}
