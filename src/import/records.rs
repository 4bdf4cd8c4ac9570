//! Typed records, one per import kind
//!
//! Rows are decoded into these structs with serde, so a row either becomes a
//! fully typed record or produces errors; never something in between. The
//! serde names are the column keys of the registry.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

use super::kind::ImportKind;
use super::rules::comparison_key;

/// Read access to the text fields of a record, by column key
pub trait FieldAccess {
    fn field_value(&self, key: &str) -> Option<&str>;
}

/// A record type the importer can produce
pub trait ImportRecord: FieldAccess + DeserializeOwned + Serialize + Clone {
    const KIND: ImportKind;

    fn into_any(self) -> AnyRecord;

    /// Short label for summaries
    fn label(&self) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YesNo {
    #[serde(rename = "Sim")]
    Sim,
    #[serde(rename = "Não")]
    Nao,
}

impl YesNo {
    pub fn is_yes(&self) -> bool {
        matches!(self, YesNo::Sim)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            YesNo::Sim => "Sim",
            YesNo::Nao => "Não",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Auditor {
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "telefone", default)]
    pub phone: Option<String>,
    #[serde(rename = "especialidade", default)]
    pub specialty: Option<String>,
    #[serde(rename = "ativo")]
    pub active: YesNo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sector {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,
    #[serde(rename = "responsavel", default)]
    pub manager: Option<String>,
    #[serde(rename = "ativo")]
    pub active: YesNo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subprocess {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "setor")]
    pub sector: String,
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,
    #[serde(rename = "ativo")]
    pub active: YesNo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Process {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "setor")]
    pub sector: String,
    #[serde(rename = "subprocesso", default)]
    pub subprocess: Option<String>,
    #[serde(rename = "responsavel", default)]
    pub manager: Option<String>,
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,
    #[serde(rename = "ativo")]
    pub active: YesNo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditType {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,
    #[serde(rename = "ativo")]
    pub active: YesNo,
}

/// How an auditor answers a checklist item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationType {
    YesNo,
    MultipleChoice,
    Text,
    Numeric,
}

impl VerificationType {
    pub const ALL: [&'static str; 4] = ["yes_no", "multiple_choice", "text", "numeric"];

    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationType::YesNo => "yes_no",
            VerificationType::MultipleChoice => "multiple_choice",
            VerificationType::Text => "text",
            VerificationType::Numeric => "numeric",
        }
    }
}

impl fmt::Display for VerificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One normative obligation, as imported from a standards spreadsheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormativeRequirement {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(rename = "norma")]
    pub standard: String,
    #[serde(rename = "versao")]
    pub version: String,
    #[serde(rename = "capitulo")]
    pub chapter: String,
    #[serde(rename = "codigo_requisito")]
    pub requirement_code: String,
    #[serde(rename = "descricao", default)]
    pub description: String,
    #[serde(rename = "criterio_avaliacao")]
    pub evaluation_criteria: String,
    #[serde(rename = "tipo_verificacao")]
    pub verification_type: VerificationType,
    #[serde(rename = "peso")]
    pub weight: f64,
    #[serde(rename = "observacoes", default)]
    pub observations: Option<String>,
}

impl FieldAccess for Auditor {
    fn field_value(&self, key: &str) -> Option<&str> {
        match key {
            "nome" => Some(&self.name),
            "email" => Some(&self.email),
            "telefone" => self.phone.as_deref(),
            "especialidade" => self.specialty.as_deref(),
            "ativo" => Some(self.active.as_str()),
            _ => None,
        }
    }
}

impl FieldAccess for Sector {
    fn field_value(&self, key: &str) -> Option<&str> {
        match key {
            "nome" => Some(&self.name),
            "descricao" => self.description.as_deref(),
            "responsavel" => self.manager.as_deref(),
            "ativo" => Some(self.active.as_str()),
            _ => None,
        }
    }
}

impl FieldAccess for Subprocess {
    fn field_value(&self, key: &str) -> Option<&str> {
        match key {
            "nome" => Some(&self.name),
            "setor" => Some(&self.sector),
            "descricao" => self.description.as_deref(),
            "ativo" => Some(self.active.as_str()),
            _ => None,
        }
    }
}

impl FieldAccess for Process {
    fn field_value(&self, key: &str) -> Option<&str> {
        match key {
            "nome" => Some(&self.name),
            "setor" => Some(&self.sector),
            "subprocesso" => self.subprocess.as_deref(),
            "responsavel" => self.manager.as_deref(),
            "descricao" => self.description.as_deref(),
            "ativo" => Some(self.active.as_str()),
            _ => None,
        }
    }
}

impl FieldAccess for AuditType {
    fn field_value(&self, key: &str) -> Option<&str> {
        match key {
            "nome" => Some(&self.name),
            "categoria" => Some(&self.category),
            "descricao" => self.description.as_deref(),
            "ativo" => Some(self.active.as_str()),
            _ => None,
        }
    }
}

impl FieldAccess for NormativeRequirement {
    fn field_value(&self, key: &str) -> Option<&str> {
        match key {
            "norma" => Some(&self.standard),
            "versao" => Some(&self.version),
            "capitulo" => Some(&self.chapter),
            "codigo_requisito" => Some(&self.requirement_code),
            "descricao" => Some(&self.description),
            "criterio_avaliacao" => Some(&self.evaluation_criteria),
            "tipo_verificacao" => Some(self.verification_type.as_str()),
            "observacoes" => self.observations.as_deref(),
            _ => None,
        }
    }
}

impl ImportRecord for Auditor {
    const KIND: ImportKind = ImportKind::Auditors;

    fn into_any(self) -> AnyRecord {
        AnyRecord::Auditor(self)
    }

    fn label(&self) -> String {
        format!("{} <{}>", self.name, self.email)
    }
}

impl ImportRecord for Sector {
    const KIND: ImportKind = ImportKind::Sectors;

    fn into_any(self) -> AnyRecord {
        AnyRecord::Sector(self)
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}

impl ImportRecord for Subprocess {
    const KIND: ImportKind = ImportKind::Subprocesses;

    fn into_any(self) -> AnyRecord {
        AnyRecord::Subprocess(self)
    }

    fn label(&self) -> String {
        format!("{} ({})", self.name, self.sector)
    }
}

impl ImportRecord for Process {
    const KIND: ImportKind = ImportKind::Processes;

    fn into_any(self) -> AnyRecord {
        AnyRecord::Process(self)
    }

    fn label(&self) -> String {
        format!("{} ({})", self.name, self.sector)
    }
}

impl ImportRecord for AuditType {
    const KIND: ImportKind = ImportKind::AuditTypes;

    fn into_any(self) -> AnyRecord {
        AnyRecord::AuditType(self)
    }

    fn label(&self) -> String {
        format!("{} [{}]", self.name, self.category)
    }
}

impl ImportRecord for NormativeRequirement {
    const KIND: ImportKind = ImportKind::Requirements;

    fn into_any(self) -> AnyRecord {
        AnyRecord::Requirement(self)
    }

    fn label(&self) -> String {
        format!("{} {} {}", self.standard, self.version, self.requirement_code)
    }
}

/// Any imported record, tagged with its kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "record", rename_all = "snake_case")]
pub enum AnyRecord {
    Auditor(Auditor),
    Sector(Sector),
    Subprocess(Subprocess),
    Process(Process),
    AuditType(AuditType),
    Requirement(NormativeRequirement),
}

impl AnyRecord {
    pub fn kind(&self) -> ImportKind {
        match self {
            AnyRecord::Auditor(_) => ImportKind::Auditors,
            AnyRecord::Sector(_) => ImportKind::Sectors,
            AnyRecord::Subprocess(_) => ImportKind::Subprocesses,
            AnyRecord::Process(_) => ImportKind::Processes,
            AnyRecord::AuditType(_) => ImportKind::AuditTypes,
            AnyRecord::Requirement(_) => ImportKind::Requirements,
        }
    }

    pub fn label(&self) -> String {
        match self {
            AnyRecord::Auditor(r) => r.label(),
            AnyRecord::Sector(r) => r.label(),
            AnyRecord::Subprocess(r) => r.label(),
            AnyRecord::Process(r) => r.label(),
            AnyRecord::AuditType(r) => r.label(),
            AnyRecord::Requirement(r) => r.label(),
        }
    }
}

impl FieldAccess for AnyRecord {
    fn field_value(&self, key: &str) -> Option<&str> {
        match self {
            AnyRecord::Auditor(r) => r.field_value(key),
            AnyRecord::Sector(r) => r.field_value(key),
            AnyRecord::Subprocess(r) => r.field_value(key),
            AnyRecord::Process(r) => r.field_value(key),
            AnyRecord::AuditType(r) => r.field_value(key),
            AnyRecord::Requirement(r) => r.field_value(key),
        }
    }
}

/// Records already persisted by the host application.
///
/// Read-only input of an import run: uniqueness is checked against the
/// collection of the imported kind, `exists` rules against any collection.
#[derive(Debug, Clone, Default)]
pub struct ExistingRecords {
    collections: HashMap<ImportKind, Vec<AnyRecord>>,
}

impl ExistingRecords {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: AnyRecord) {
        self.collections.entry(record.kind()).or_default().push(record);
    }

    pub fn extend<I: IntoIterator<Item = AnyRecord>>(&mut self, records: I) {
        for record in records {
            self.insert(record);
        }
    }

    /// Builder-style helper for typed records
    pub fn with<T: ImportRecord>(mut self, records: impl IntoIterator<Item = T>) -> Self {
        self.extend(records.into_iter().map(ImportRecord::into_any));
        self
    }

    pub fn records(&self, kind: ImportKind) -> &[AnyRecord] {
        self.collections
            .get(&kind)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self, kind: ImportKind) -> usize {
        self.records(kind).len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.values().all(Vec::is_empty)
    }

    /// Whether any record of `kind` has `field` equal to `key`.
    /// `key` must already be a comparison key.
    pub fn contains_value(&self, kind: ImportKind, field: &str, key: &str) -> bool {
        self.records(kind).iter().any(|record| {
            record
                .field_value(field)
                .map(|v| comparison_key(v) == key)
                .unwrap_or(false)
        })
    }
}
