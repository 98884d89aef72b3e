//! Import workflow controller.
//!
//! Tracks one upload dialog session:
//!
//! ```text
//! Idle ──begin──▶ Uploading ──finish──▶ ResultShown ──dismiss──▶ Idle
//!                     │
//!                     └──abort (transport failure)──▶ Idle
//! ```
//!
//! Whether the table reloads is decided by the report alone: a report
//! with zero errors reloads, anything else keeps the table and shows the
//! error list. Closing the dialog does not end a running upload; no other
//! upload can start until its report or failure arrives. A report arriving
//! while the dialog is closed is not displayed.

use thiserror::Error;

use crate::config::{IMPORT_ACCEPT, IMPORT_ERROR_PAGE_SIZE};
use crate::types::{ImportOutcome, ImportRowError};

/// Why a file selection was refused.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ImportRejection {
    /// Another upload is still running.
    #[error("An upload is already in progress")]
    Busy,

    /// The file does not have the accepted extension.
    #[error("Unsupported file '{0}': only {accept} files can be imported", accept = IMPORT_ACCEPT)]
    UnsupportedFile(String),
}

/// What the dialog should do once a report arrives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImportExit {
    /// Clean import: refresh the product table.
    ReloadTable,
    /// Rows were rejected: leave the table, show the errors.
    ShowErrors,
}

/// Identifies one upload within the dialog's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UploadTicket(u64);

#[derive(Clone, Debug, Default, PartialEq)]
pub enum ImportPhase {
    #[default]
    Idle,
    Uploading {
        file_name: String,
    },
    ResultShown(ImportOutcome),
}

#[derive(Clone, Debug, Default)]
pub struct ImportWorkflow {
    phase: ImportPhase,
    /// 1-based page of the error table
    error_page: usize,
    uploads: u64,
    /// The dialog was closed while uploading
    detached: bool,
}

impl ImportWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &ImportPhase {
        &self.phase
    }

    pub fn is_uploading(&self) -> bool {
        matches!(self.phase, ImportPhase::Uploading { .. })
    }

    /// The report on display, if any.
    pub fn outcome(&self) -> Option<&ImportOutcome> {
        match &self.phase {
            ImportPhase::ResultShown(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Accepts a file selection and enters `Uploading`.
    ///
    /// Any previously shown report is discarded.
    pub fn begin(&mut self, file_name: &str) -> Result<UploadTicket, ImportRejection> {
        if self.is_uploading() {
            return Err(ImportRejection::Busy);
        }
        if !accepts(file_name) {
            return Err(ImportRejection::UnsupportedFile(file_name.to_string()));
        }
        self.uploads += 1;
        self.phase = ImportPhase::Uploading {
            file_name: file_name.to_string(),
        };
        self.error_page = 1;
        Ok(UploadTicket(self.uploads))
    }

    /// Records the backend report and says what to do next.
    ///
    /// The exit is decided even when the dialog was closed meanwhile, since
    /// the backend has applied the rows either way; only the display is
    /// skipped.
    pub fn finish(&mut self, ticket: UploadTicket, outcome: ImportOutcome) -> ImportExit {
        for problem in outcome.inconsistencies() {
            log::warn!("Import report is inconsistent: {}", problem);
        }
        let exit = if outcome.is_clean() {
            ImportExit::ReloadTable
        } else {
            ImportExit::ShowErrors
        };
        if self.is_current(ticket) {
            self.phase = if self.detached {
                ImportPhase::Idle
            } else {
                ImportPhase::ResultShown(outcome)
            };
            self.error_page = 1;
            self.detached = false;
        }
        exit
    }

    /// The upload failed without a report; go back to `Idle`.
    pub fn abort(&mut self, ticket: UploadTicket) {
        if self.is_current(ticket) {
            self.phase = ImportPhase::Idle;
            self.error_page = 1;
            self.detached = false;
        }
    }

    /// The dialog was closed.
    ///
    /// A shown report is forgotten. A running upload keeps the workflow
    /// busy, but its report will not be displayed unless the dialog is
    /// reopened before it arrives.
    pub fn dismiss(&mut self) {
        self.error_page = 1;
        if self.is_uploading() {
            self.detached = true;
        } else {
            self.phase = ImportPhase::Idle;
        }
    }

    /// The dialog was opened again.
    pub fn resume(&mut self) {
        self.detached = false;
    }

    fn is_current(&self, ticket: UploadTicket) -> bool {
        ticket.0 == self.uploads && self.is_uploading()
    }

    // -------------------------------------------------------------------------
    // Error table pagination
    // -------------------------------------------------------------------------

    fn errors(&self) -> &[ImportRowError] {
        self.outcome().map(|o| o.errors.as_slice()).unwrap_or(&[])
    }

    pub fn error_page(&self) -> usize {
        self.error_page.max(1)
    }

    pub fn error_page_count(&self) -> usize {
        self.errors().len().div_ceil(IMPORT_ERROR_PAGE_SIZE)
    }

    /// Moves the error table to `page`, clamped to the valid range.
    pub fn set_error_page(&mut self, page: usize) {
        self.error_page = page.clamp(1, self.error_page_count().max(1));
    }

    /// Rows of the current error table page.
    pub fn visible_errors(&self) -> &[ImportRowError] {
        let errors = self.errors();
        let start = (self.error_page() - 1) * IMPORT_ERROR_PAGE_SIZE;
        if start >= errors.len() {
            return &[];
        }
        let end = (start + IMPORT_ERROR_PAGE_SIZE).min(errors.len());
        &errors[start..end]
    }
}

/// Case-insensitive check against the accepted extension.
pub fn accepts(file_name: &str) -> bool {
    file_name.to_ascii_lowercase().ends_with(IMPORT_ACCEPT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean_outcome() -> ImportOutcome {
        serde_json::from_str(
            r#"{"totalRows": 10, "insertedCount": 8, "updatedCount": 2, "errorCount": 0, "errors": []}"#,
        )
        .unwrap()
    }

    fn failed_outcome() -> ImportOutcome {
        serde_json::from_str(
            r#"{
                "totalRows": 5, "insertedCount": 3, "updatedCount": 0, "errorCount": 2,
                "errors": [
                    {"row": 2, "field": "price", "message": "must be positive"},
                    {"row": 4, "field": "category", "message": "unknown category"}
                ]
            }"#,
        )
        .unwrap()
    }

    fn outcome_with_errors(count: u32) -> ImportOutcome {
        ImportOutcome {
            success: false,
            total_rows: count,
            inserted_count: 0,
            updated_count: 0,
            error_count: count,
            errors: (1..=count)
                .map(|row| ImportRowError {
                    row,
                    field: "price".to_string(),
                    message: "must be positive".to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_clean_import_reloads_and_stays_open() {
        let mut workflow = ImportWorkflow::new();
        let ticket = workflow.begin("products.xlsx").unwrap();
        assert!(workflow.is_uploading());

        assert_eq!(workflow.finish(ticket, clean_outcome()), ImportExit::ReloadTable);
        assert!(!workflow.is_uploading());
        let outcome = workflow.outcome().unwrap();
        assert_eq!(outcome.inserted_count, 8);
        assert!(workflow.visible_errors().is_empty());
    }

    #[test]
    fn test_failed_import_shows_errors() {
        let mut workflow = ImportWorkflow::new();
        let ticket = workflow.begin("products.xlsx").unwrap();

        assert_eq!(workflow.finish(ticket, failed_outcome()), ImportExit::ShowErrors);
        let visible = workflow.visible_errors();
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0].key(), "2-price");
        assert_eq!(visible[1].key(), "4-category");
        assert_eq!(workflow.error_page_count(), 1);
    }

    #[test]
    fn test_concurrent_upload_rejected() {
        let mut workflow = ImportWorkflow::new();
        workflow.begin("a.xlsx").unwrap();
        assert_eq!(workflow.begin("b.xlsx"), Err(ImportRejection::Busy));
        assert_eq!(
            workflow.phase(),
            &ImportPhase::Uploading {
                file_name: "a.xlsx".to_string()
            }
        );
    }

    #[test]
    fn test_wrong_extension_rejected() {
        let mut workflow = ImportWorkflow::new();
        assert_eq!(
            workflow.begin("products.csv"),
            Err(ImportRejection::UnsupportedFile("products.csv".to_string()))
        );
        assert_eq!(workflow.phase(), &ImportPhase::Idle);
        assert!(accepts("PRODUCTS.XLSX"));
    }

    #[test]
    fn test_new_upload_discards_previous_result() {
        let mut workflow = ImportWorkflow::new();
        let ticket = workflow.begin("first.xlsx").unwrap();
        workflow.finish(ticket, failed_outcome());

        workflow.begin("second.xlsx").unwrap();
        assert!(workflow.outcome().is_none());
    }

    #[test]
    fn test_abort_returns_to_idle() {
        let mut workflow = ImportWorkflow::new();
        let ticket = workflow.begin("products.xlsx").unwrap();
        workflow.abort(ticket);
        assert_eq!(workflow.phase(), &ImportPhase::Idle);
        assert!(workflow.begin("products.xlsx").is_ok());
    }

    #[test]
    fn test_dismiss_resets_everything() {
        let mut workflow = ImportWorkflow::new();
        let ticket = workflow.begin("products.xlsx").unwrap();
        workflow.finish(ticket, outcome_with_errors(25));
        workflow.set_error_page(3);

        workflow.dismiss();
        assert_eq!(workflow.phase(), &ImportPhase::Idle);
        assert_eq!(workflow.error_page(), 1);
        assert_eq!(workflow.error_page_count(), 0);
    }

    #[test]
    fn test_error_table_paginates_by_ten() {
        let mut workflow = ImportWorkflow::new();
        let ticket = workflow.begin("products.xlsx").unwrap();
        workflow.finish(ticket, outcome_with_errors(25));

        assert_eq!(workflow.error_page_count(), 3);
        assert_eq!(workflow.visible_errors().len(), 10);
        assert_eq!(workflow.visible_errors()[0].row, 1);

        workflow.set_error_page(3);
        assert_eq!(workflow.visible_errors().len(), 5);
        assert_eq!(workflow.visible_errors()[0].row, 21);

        workflow.set_error_page(99);
        assert_eq!(workflow.error_page(), 3);
        workflow.set_error_page(0);
        assert_eq!(workflow.error_page(), 1);
    }

    #[test]
    fn test_report_after_dismiss_is_not_shown() {
        let mut workflow = ImportWorkflow::new();
        let ticket = workflow.begin("products.xlsx").unwrap();
        workflow.dismiss();
        assert!(workflow.is_uploading());

        assert_eq!(workflow.finish(ticket, clean_outcome()), ImportExit::ReloadTable);
        assert_eq!(workflow.phase(), &ImportPhase::Idle);
    }

    #[test]
    fn test_dismiss_does_not_allow_second_upload() {
        let mut workflow = ImportWorkflow::new();
        let first = workflow.begin("a.xlsx").unwrap();
        workflow.dismiss();

        assert_eq!(workflow.begin("b.xlsx"), Err(ImportRejection::Busy));

        workflow.abort(first);
        assert!(!workflow.is_uploading());
        assert!(workflow.begin("b.xlsx").is_ok());
    }

    #[test]
    fn test_reopened_dialog_shows_late_report() {
        let mut workflow = ImportWorkflow::new();
        let ticket = workflow.begin("products.xlsx").unwrap();
        workflow.dismiss();
        workflow.resume();

        assert_eq!(workflow.finish(ticket, failed_outcome()), ImportExit::ShowErrors);
        assert_eq!(workflow.visible_errors().len(), 2);
    }

    #[test]
    fn test_old_ticket_is_ignored() {
        let mut workflow = ImportWorkflow::new();
        let first = workflow.begin("first.xlsx").unwrap();
        workflow.abort(first);
        let second = workflow.begin("second.xlsx").unwrap();

        workflow.abort(first);
        assert!(workflow.is_uploading());
        assert_eq!(workflow.finish(first, clean_outcome()), ImportExit::ReloadTable);
        assert!(workflow.is_uploading());

        workflow.finish(second, failed_outcome());
        assert!(workflow.outcome().is_some());
    }
}
