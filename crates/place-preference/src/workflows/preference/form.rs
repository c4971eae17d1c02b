use std::sync::Arc;

use tracing::{error, info, warn};

use super::directory::{DirectoryError, EmployeeDirectory};
use super::domain::{
    EmployeeId, InvalidOption, OptionSetId, Place, Section, SelectionEvent, Slot,
};
use super::notify::{Notification, NotificationSink};
use super::payload::SubmissionPayload;
use super::store::{EmployeeRecord, EmployeeRecordStore, SelectionError};
use super::submission::{SubmissionError, SubmissionGateway};
use super::validation::{self, IncompleteSelection, ValidatedSelection};

pub const LOOKUP_SUCCESS_MESSAGE: &str = "Employee details fetched successfully";
pub const LOOKUP_NOT_FOUND_MESSAGE: &str = "Employee not found. Please check the ID and try again.";
pub const MISSING_ID_MESSAGE: &str = "Please enter an employee ID";
pub const SUBMISSION_SUCCESS_MESSAGE: &str = "Preferences submitted successfully";

/// Form facade sequencing lookup, selection, validation and submission.
///
/// Operations take `&mut self`, so a lookup or submission in flight holds the
/// only handle to the record until it completes.
pub struct PreferenceForm<D, G, N> {
    directory: Arc<D>,
    gateway: Arc<G>,
    notifier: Arc<N>,
    store: EmployeeRecordStore,
}

impl<D, G, N> PreferenceForm<D, G, N>
where
    D: EmployeeDirectory,
    G: SubmissionGateway,
    N: NotificationSink,
{
    pub fn new(directory: Arc<D>, gateway: Arc<G>, notifier: Arc<N>) -> Self {
        Self {
            directory,
            gateway,
            notifier,
            store: EmployeeRecordStore::new(),
        }
    }

    pub fn record(&self) -> Option<&EmployeeRecord> {
        self.store.active()
    }

    /// Looks up an employee, replacing whatever record was loaded before.
    pub async fn load(&mut self, raw_id: &str) -> Result<&EmployeeRecord, FormError> {
        let trimmed = raw_id.trim();
        if trimmed.is_empty() {
            self.notifier.notify(Notification::error(MISSING_ID_MESSAGE));
            return Err(FormError::MissingEmployeeId);
        }

        let id = EmployeeId(trimmed.to_string());
        match self.store.load(self.directory.as_ref(), &id).await {
            Ok(record) => {
                info!(employee = %record.id(), department = record.department(), "employee loaded");
                self.notifier
                    .notify(Notification::success(LOOKUP_SUCCESS_MESSAGE));
                Ok(record)
            }
            Err(err) => {
                warn!(employee = %id, error = %err, "employee lookup failed");
                let err = FormError::from(err);
                self.notifier.notify(Notification::error(err.user_message()));
                Err(err)
            }
        }
    }

    pub fn select(&mut self, event: SelectionEvent) -> Result<(), FormError> {
        let section = event.section();
        self.store.apply(event).map_err(|err| {
            warn!(%section, error = %err, "selection rejected");
            self.reject(err.into())
        })
    }

    pub fn set_slot(&mut self, section: Section, slot: Slot, place: &str) -> Result<Place, FormError> {
        self.store
            .set_slot(section, slot, place)
            .map_err(|err| {
                warn!(%section, %slot, error = %err, "slot selection rejected");
                self.reject(err.into())
            })
    }

    /// Chooses an option-set from its radio value (`option2` or `option2-p1`).
    pub fn choose_option(&mut self, section: Section, raw_option: &str) -> Result<[Place; 3], FormError> {
        let option = OptionSetId::parse(raw_option).map_err(|err| {
            error!(%section, error = %err, "option id outside the fixed catalog");
            self.reject(err.into())
        })?;

        self.store
            .choose_option_set(section, option)
            .map_err(|err| self.reject(err.into()))
    }

    pub fn clear_slot(&mut self, section: Section, slot: Slot) -> Result<(), FormError> {
        self.store
            .clear_slot(section, slot)
            .map_err(|err| self.reject(err.into()))
    }

    /// Drops every selection held for `section`.
    pub fn clear_section(&mut self, section: Section) -> Result<(), FormError> {
        self.store
            .clear_section(section)
            .map_err(|err| self.reject(err.into()))
    }

    pub fn available_choices(&self, section: Section, slot: Slot) -> Vec<Place> {
        self.store.available_choices(section, slot)
    }

    pub fn validate(&self) -> Result<ValidatedSelection, FormError> {
        let record = self.store.active().ok_or(SelectionError::NoActiveRecord)?;
        Ok(validation::validate(record)?)
    }

    /// Builds the payload the next `submit` would send, without sending it.
    pub fn preview(&self) -> Result<SubmissionPayload, FormError> {
        self.build_payload().map_err(|err| self.reject(err))
    }

    /// Builds the payload from the active record and hands it to the gateway.
    pub async fn submit(&mut self) -> Result<SubmissionPayload, FormError> {
        let payload = match self.build_payload() {
            Ok(payload) => payload,
            Err(err) => return Err(self.reject(err)),
        };

        match self.gateway.submit(&payload).await {
            Ok(()) => {
                info!(user = payload.user_id(), "preferences submitted");
                self.notifier
                    .notify(Notification::success(SUBMISSION_SUCCESS_MESSAGE));
                Ok(payload)
            }
            Err(err) => {
                warn!(user = payload.user_id(), error = %err, "submission failed");
                Err(self.reject(err.into()))
            }
        }
    }

    fn build_payload(&self) -> Result<SubmissionPayload, FormError> {
        let record = self.store.active().ok_or(SelectionError::NoActiveRecord)?;
        Ok(SubmissionPayload::build(record)?)
    }

    fn reject(&self, err: FormError) -> FormError {
        self.notifier.notify(Notification::error(err.user_message()));
        err
    }
}

/// Error raised by the preference form.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("no employee ID was entered")]
    MissingEmployeeId,
    #[error(transparent)]
    Lookup(#[from] DirectoryError),
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error(transparent)]
    Incomplete(#[from] IncompleteSelection),
    #[error(transparent)]
    InvalidOption(#[from] InvalidOption),
    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

impl FormError {
    /// Text shown to the person filling in the form.
    pub fn user_message(&self) -> String {
        match self {
            FormError::MissingEmployeeId => MISSING_ID_MESSAGE.to_string(),
            FormError::Lookup(DirectoryError::NotFound(_)) => LOOKUP_NOT_FOUND_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}
