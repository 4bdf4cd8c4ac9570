use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The spreadsheet flows the importer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImportKind {
    Auditors,
    Sectors,
    Subprocesses,
    Processes,
    AuditTypes,
    Requirements,
}

impl ImportKind {
    pub const ALL: [ImportKind; 6] = [
        ImportKind::Auditors,
        ImportKind::Sectors,
        ImportKind::Subprocesses,
        ImportKind::Processes,
        ImportKind::AuditTypes,
        ImportKind::Requirements,
    ];

    /// Slug used on the command line and in the store
    pub fn slug(&self) -> &'static str {
        match self {
            ImportKind::Auditors => "auditors",
            ImportKind::Sectors => "sectors",
            ImportKind::Subprocesses => "subprocesses",
            ImportKind::Processes => "processes",
            ImportKind::AuditTypes => "audit-types",
            ImportKind::Requirements => "requirements",
        }
    }

    /// Human readable name, used in templates and reports
    pub fn display_name(&self) -> &'static str {
        match self {
            ImportKind::Auditors => "Auditores",
            ImportKind::Sectors => "Setores",
            ImportKind::Subprocesses => "Subprocessos",
            ImportKind::Processes => "Processos",
            ImportKind::AuditTypes => "Tipos de Auditoria",
            ImportKind::Requirements => "Requisitos Normativos",
        }
    }

    /// Master-data kinds go straight into the store; requirements feed the
    /// checklist converter instead.
    pub fn is_master_data(&self) -> bool {
        !matches!(self, ImportKind::Requirements)
    }
}

impl fmt::Display for ImportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ImportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        ImportKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.slug() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = ImportKind::ALL.iter().map(|k| k.slug()).collect();
                format!("unknown import kind '{}' (expected one of: {})", s, known.join(", "))
            })
    }
}
