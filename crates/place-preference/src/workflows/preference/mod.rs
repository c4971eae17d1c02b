//! Employee place-preference capture.
//!
//! An employee is looked up, picks places for the domestic and foreign
//! sections (either slot by slot or as a whole option-set), and the finished
//! selection is validated against the department policy and posted to the
//! sheet-backed submission endpoint.

pub mod catalog;
pub mod directory;
pub mod domain;
pub mod form;
pub mod intake;
pub mod notify;
pub mod payload;
pub mod router;
pub mod sheet;
pub mod store;
pub mod submission;
pub mod validation;

#[cfg(test)]
mod tests;

pub use catalog::{expand, option_sets, OptionSet};
pub use directory::{
    DirectoryError, EmployeeDirectory, EmployeeLookupResponse, FixtureDirectory,
    HttpEmployeeDirectory,
};
pub use domain::{
    EmployeeId, EmployeeProfile, InvalidOption, OptionSetId, Place, Section, SelectionEvent, Slot,
    NOT_APPLICABLE,
};
pub use form::{FormError, PreferenceForm};
pub use intake::{IntakeError, SheetIntakeService};
pub use notify::{Notification, NotificationLevel, NotificationSink, RecordingNotifier};
pub use payload::{PayloadRejection, SubmissionPayload};
pub use router::{employee_router, sheet_router};
pub use sheet::{CsvSheet, MemorySheet, SheetError, SheetWriter};
pub use store::{EmployeeRecord, EmployeeRecordStore, SectionSelection, SelectionError, SlotSelections};
pub use submission::{HttpSubmissionClient, SubmissionError, SubmissionGateway};
pub use validation::{
    validate, DepartmentPolicy, IncompleteSelection, ResolvedSection, SectionRequirement,
    ValidatedSelection,
};
