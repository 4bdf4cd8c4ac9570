/// Integration tests for audit-import
///
/// Tests are organized into logical groupings:
/// - import: file gate, row validation and template round trips
/// - checklist: requirement grouping and persistence
/// - template: generated workbooks and error reports
mod common;
mod checklist;
mod import;
mod template;
