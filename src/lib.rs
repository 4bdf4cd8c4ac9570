//! Spreadsheet import for an audit management application.
//!
//! Master data (auditors, sectors, subprocesses, processes, audit types) and
//! normative requirements are read from `.xlsx`/`.xls` files, validated
//! row by row against a declarative rule table, and returned as typed
//! records. Requirements can then be grouped into weighted checklists.

pub mod checklist;
pub mod import;
pub mod store;
pub mod template;
