//! Spreadsheet import of master data and normative requirements

pub mod error;
pub mod file;
pub mod importer;
pub mod kind;
pub mod records;
pub mod registry;
pub mod result;
pub mod rules;
pub mod sheet;

pub use error::ImportFailure;
pub use file::{ImportFile, ImportLimits, check_file};
pub use importer::{ImportOutcome, Importer, validate_rows};
pub use kind::ImportKind;
pub use records::{
    AnyRecord, AuditType, Auditor, ExistingRecords, FieldAccess, ImportRecord,
    NormativeRequirement, Process, Sector, Subprocess, VerificationType, YesNo,
};
pub use registry::{ColumnType, ImportColumnSpec, ImportConfig, ImportRegistry};
pub use result::{DuplicateEntry, ImportError, ImportResult};
pub use rules::{FirstSeen, RuleKind, ValidationRule, evaluate};
pub use sheet::{CellValue, ParsedSheet, SheetContents, SheetRow, parse_sheet};
