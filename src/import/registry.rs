//! Column contracts and rule tables per import kind
//!
//! The registry is a plain value handed to the importer and the template
//! generator, so both sides always agree on header labels.

use serde::Serialize;
use std::collections::BTreeMap;

use super::error::ImportFailure;
use super::kind::ImportKind;
use super::records::VerificationType;
use super::rules::ValidationRule;

pub const YES_NO: [&str; 2] = ["Sim", "Não"];
pub const AUDIT_CATEGORIES: [&str; 4] = ["Interna", "Externa", "Certificação", "Fornecedor"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    Text,
    Email,
    Select,
    Number,
}

/// Contract of one spreadsheet column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportColumnSpec {
    pub key: String,
    pub label: String,
    pub required: bool,
    pub column_type: ColumnType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    pub example: String,
}

impl ImportColumnSpec {
    fn new(key: &str, label: &str, column_type: ColumnType) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            required: false,
            column_type,
            max_length: None,
            options: Vec::new(),
            example: String::new(),
        }
    }

    pub fn text(key: &str, label: &str) -> Self {
        Self::new(key, label, ColumnType::Text)
    }

    pub fn email(key: &str, label: &str) -> Self {
        Self::new(key, label, ColumnType::Email)
    }

    pub fn number(key: &str, label: &str) -> Self {
        Self::new(key, label, ColumnType::Number)
    }

    pub fn select(key: &str, label: &str, options: &[&str]) -> Self {
        let mut spec = Self::new(key, label, ColumnType::Select);
        spec.options = options.iter().map(|o| o.to_string()).collect();
        spec
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn example(mut self, example: &str) -> Self {
        self.example = example.to_string();
        self
    }

    /// Rules implied by the column contract itself
    fn implied_rules(&self) -> Vec<ValidationRule> {
        let mut rules = Vec::new();
        if self.required {
            rules.push(ValidationRule::required(
                &self.key,
                format!("{} é obrigatório", self.label),
            ));
        }
        if let Some(max) = self.max_length {
            rules.push(ValidationRule::max_length(
                &self.key,
                max,
                format!("{} deve ter no máximo {} caracteres", self.label, max),
            ));
        }
        match self.column_type {
            ColumnType::Email => rules.push(ValidationRule::email(
                &self.key,
                format!("{} inválido", self.label),
            )),
            ColumnType::Select => {
                let options: Vec<&str> = self.options.iter().map(String::as_str).collect();
                rules.push(ValidationRule::select(
                    &self.key,
                    &options,
                    format!("{} deve ser um dos valores: {}", self.label, options.join(", ")),
                ));
            }
            ColumnType::Text | ColumnType::Number => {}
        }
        rules
    }
}

/// Everything the importer and template generator need for one kind
#[derive(Debug, Clone, Serialize)]
pub struct ImportConfig {
    pub kind: ImportKind,
    pub sheet_name: String,
    pub columns: Vec<ImportColumnSpec>,
    pub rules: Vec<ValidationRule>,
    /// Literal example rows, aligned with `columns`
    pub example_rows: Vec<Vec<String>>,
}

impl ImportConfig {
    /// Builds the config; the rule table starts with the rules implied by
    /// the columns, in column order.
    pub fn new(kind: ImportKind, columns: Vec<ImportColumnSpec>) -> Self {
        let rules = columns.iter().flat_map(ImportColumnSpec::implied_rules).collect();
        Self {
            kind,
            sheet_name: "Dados".to_string(),
            columns,
            rules,
            example_rows: Vec::new(),
        }
    }

    pub fn rule(mut self, rule: ValidationRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn example_row(mut self, values: &[&str]) -> Self {
        self.example_rows.push(values.iter().map(|v| v.to_string()).collect());
        self
    }

    pub fn column(&self, key: &str) -> Option<&ImportColumnSpec> {
        self.columns.iter().find(|c| c.key == key)
    }

    pub fn rules_for<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a ValidationRule> + 'a {
        self.rules.iter().filter(move |r| r.field == key)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.label.as_str()).collect()
    }
}

/// Lookup table of import configurations, keyed by kind
#[derive(Debug, Clone)]
pub struct ImportRegistry {
    configs: BTreeMap<ImportKind, ImportConfig>,
}

impl ImportRegistry {
    pub fn empty() -> Self {
        Self {
            configs: BTreeMap::new(),
        }
    }

    pub fn register(&mut self, config: ImportConfig) {
        self.configs.insert(config.kind, config);
    }

    pub fn get(&self, kind: ImportKind) -> Option<&ImportConfig> {
        self.configs.get(&kind)
    }

    pub fn config(&self, kind: ImportKind) -> Result<&ImportConfig, ImportFailure> {
        self.get(kind).ok_or(ImportFailure::Unconfigured(kind))
    }

    pub fn kinds(&self) -> impl Iterator<Item = ImportKind> + '_ {
        self.configs.keys().copied()
    }

    /// The catalog shipped with the application
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register(auditors());
        registry.register(sectors());
        registry.register(subprocesses());
        registry.register(processes());
        registry.register(audit_types());
        registry.register(requirements());
        registry
    }
}

impl Default for ImportRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

fn active_column() -> ImportColumnSpec {
    ImportColumnSpec::select("ativo", "Ativo", &YES_NO)
        .required()
        .example("Sim")
}

fn auditors() -> ImportConfig {
    ImportConfig::new(
        ImportKind::Auditors,
        vec![
            ImportColumnSpec::text("nome", "Nome")
                .required()
                .max_length(100)
                .example("Ana Souza"),
            ImportColumnSpec::email("email", "Email")
                .required()
                .max_length(100)
                .example("ana.souza@empresa.com.br"),
            ImportColumnSpec::text("telefone", "Telefone")
                .max_length(20)
                .example("(11) 98765-4321"),
            ImportColumnSpec::text("especialidade", "Especialidade")
                .max_length(100)
                .example("ISO 9001"),
            active_column(),
        ],
    )
    .rule(ValidationRule::unique("email", "Email já cadastrado"))
    .example_row(&["Ana Souza", "ana.souza@empresa.com.br", "(11) 98765-4321", "ISO 9001", "Sim"])
    .example_row(&["Carlos Lima", "carlos.lima@empresa.com.br", "", "ISO 14001", "Não"])
}

fn sectors() -> ImportConfig {
    ImportConfig::new(
        ImportKind::Sectors,
        vec![
            ImportColumnSpec::text("nome", "Nome")
                .required()
                .max_length(100)
                .example("Qualidade"),
            ImportColumnSpec::text("descricao", "Descrição")
                .max_length(500)
                .example("Gestão da qualidade e melhoria contínua"),
            ImportColumnSpec::text("responsavel", "Responsável")
                .max_length(100)
                .example("Mariana Costa"),
            active_column(),
        ],
    )
    .rule(ValidationRule::unique("nome", "Setor já cadastrado"))
    .example_row(&["Qualidade", "Gestão da qualidade e melhoria contínua", "Mariana Costa", "Sim"])
    .example_row(&["Produção", "Fabricação e montagem", "", "Sim"])
}

fn subprocesses() -> ImportConfig {
    ImportConfig::new(
        ImportKind::Subprocesses,
        vec![
            ImportColumnSpec::text("nome", "Nome")
                .required()
                .max_length(100)
                .example("Controle de Documentos"),
            ImportColumnSpec::text("setor", "Setor")
                .required()
                .max_length(100)
                .example("Qualidade"),
            ImportColumnSpec::text("descricao", "Descrição")
                .max_length(500)
                .example("Emissão e revisão de documentos controlados"),
            active_column(),
        ],
    )
    .rule(ValidationRule::unique("nome", "Subprocesso já cadastrado"))
    .rule(ValidationRule::exists(
        "setor",
        ImportKind::Sectors,
        "nome",
        "Setor não encontrado: cadastre o setor antes de importar",
    ))
    .example_row(&["Controle de Documentos", "Qualidade", "Emissão e revisão de documentos controlados", "Sim"])
    .example_row(&["Inspeção Final", "Produção", "", "Sim"])
}

fn processes() -> ImportConfig {
    ImportConfig::new(
        ImportKind::Processes,
        vec![
            ImportColumnSpec::text("nome", "Nome")
                .required()
                .max_length(100)
                .example("Gestão de Não Conformidades"),
            ImportColumnSpec::text("setor", "Setor")
                .required()
                .max_length(100)
                .example("Qualidade"),
            ImportColumnSpec::text("subprocesso", "Subprocesso")
                .max_length(100)
                .example("Controle de Documentos"),
            ImportColumnSpec::text("responsavel", "Responsável")
                .max_length(100)
                .example("Mariana Costa"),
            ImportColumnSpec::text("descricao", "Descrição")
                .max_length(500)
                .example("Registro e tratamento de não conformidades"),
            active_column(),
        ],
    )
    .rule(ValidationRule::unique("nome", "Processo já cadastrado"))
    .rule(ValidationRule::exists(
        "setor",
        ImportKind::Sectors,
        "nome",
        "Setor não encontrado: cadastre o setor antes de importar",
    ))
    .rule(ValidationRule::exists(
        "subprocesso",
        ImportKind::Subprocesses,
        "nome",
        "Subprocesso não encontrado: cadastre o subprocesso antes de importar",
    ))
    .example_row(&[
        "Gestão de Não Conformidades",
        "Qualidade",
        "Controle de Documentos",
        "Mariana Costa",
        "Registro e tratamento de não conformidades",
        "Sim",
    ])
    .example_row(&["Calibração de Instrumentos", "Produção", "", "", "", "Sim"])
}

fn audit_types() -> ImportConfig {
    ImportConfig::new(
        ImportKind::AuditTypes,
        vec![
            ImportColumnSpec::text("nome", "Nome")
                .required()
                .max_length(100)
                .example("Auditoria Interna de Qualidade"),
            ImportColumnSpec::select("categoria", "Categoria", &AUDIT_CATEGORIES)
                .required()
                .example("Interna"),
            ImportColumnSpec::text("descricao", "Descrição")
                .max_length(500)
                .example("Auditoria anual do sistema de gestão"),
            active_column(),
        ],
    )
    .rule(ValidationRule::unique("nome", "Tipo de auditoria já cadastrado"))
    .example_row(&["Auditoria Interna de Qualidade", "Interna", "Auditoria anual do sistema de gestão", "Sim"])
    .example_row(&["Auditoria de Fornecedor", "Fornecedor", "", "Sim"])
}

fn requirements() -> ImportConfig {
    ImportConfig::new(
        ImportKind::Requirements,
        vec![
            ImportColumnSpec::text("norma", "Norma")
                .required()
                .max_length(100)
                .example("ISO 9001"),
            ImportColumnSpec::text("versao", "Versão")
                .required()
                .max_length(20)
                .example("2015"),
            ImportColumnSpec::text("capitulo", "Capítulo")
                .required()
                .max_length(100)
                .example("4 - Contexto da organização"),
            ImportColumnSpec::text("codigo_requisito", "Código do Requisito")
                .required()
                .max_length(50)
                .example("4.1"),
            ImportColumnSpec::text("descricao", "Descrição")
                .required()
                .max_length(2000)
                .example("Entendendo a organização e seu contexto"),
            ImportColumnSpec::text("criterio_avaliacao", "Critério de Avaliação")
                .required()
                .max_length(2000)
                .example("A organização determinou as questões internas e externas pertinentes"),
            ImportColumnSpec::select("tipo_verificacao", "Tipo de Verificação", &VerificationType::ALL)
                .required()
                .example("yes_no"),
            ImportColumnSpec::number("peso", "Peso")
                .required()
                .example("10"),
            ImportColumnSpec::text("observacoes", "Observações")
                .max_length(1000)
                .example("Verificar atas de análise crítica"),
        ],
    )
    .rule(ValidationRule::range("peso", 1.0, 100.0, "Peso deve ser um número entre 1 e 100"))
    .rule(ValidationRule::unique("codigo_requisito", "Código do requisito duplicado"))
    .example_row(&[
        "ISO 9001",
        "2015",
        "4 - Contexto da organização",
        "4.1",
        "Entendendo a organização e seu contexto",
        "A organização determinou as questões internas e externas pertinentes",
        "yes_no",
        "10",
        "Verificar atas de análise crítica",
    ])
    .example_row(&[
        "ISO 9001",
        "2015",
        "4 - Contexto da organização",
        "4.2",
        "Entendendo as necessidades e expectativas de partes interessadas",
        "Partes interessadas e seus requisitos estão identificados",
        "multiple_choice",
        "5",
        "",
    ])
    .example_row(&[
        "ISO 9001",
        "2015",
        "5 - Liderança",
        "5.1",
        "Liderança e comprometimento",
        "A alta direção demonstra liderança com relação ao sistema de gestão",
        "text",
        "15",
        "",
    ])
}
