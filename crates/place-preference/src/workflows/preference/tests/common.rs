use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::preference::directory::FixtureDirectory;
use crate::workflows::preference::domain::{EmployeeId, EmployeeProfile, OptionSetId, Section};
use crate::workflows::preference::form::PreferenceForm;
use crate::workflows::preference::notify::RecordingNotifier;
use crate::workflows::preference::payload::SubmissionPayload;
use crate::workflows::preference::store::{EmployeeRecord, EmployeeRecordStore};
use crate::workflows::preference::submission::{SubmissionError, SubmissionGateway};

pub(super) fn profile(id: &str, department: &str) -> EmployeeProfile {
    EmployeeProfile {
        id: EmployeeId(id.to_string()),
        name: format!("Employee {id}"),
        department: department.to_string(),
    }
}

pub(super) fn record(department: &str) -> EmployeeRecord {
    EmployeeRecord::new(profile("E100", department))
}

/// Store holding a freshly loaded record for `department`.
pub(super) async fn loaded_store(department: &str) -> EmployeeRecordStore {
    let mut directory = FixtureDirectory::default();
    directory.insert(profile("E100", department));
    let mut store = EmployeeRecordStore::new();
    store
        .load(&directory, &EmployeeId("E100".to_string()))
        .await
        .expect("fixture employee loads");
    store
}

pub(super) fn option_choice(store: &mut EmployeeRecordStore, section: Section, option: OptionSetId) {
    store
        .choose_option_set(section, option)
        .expect("option-set selection applies");
}

#[derive(Default, Clone)]
pub(super) struct RecordingGateway {
    submitted: Arc<Mutex<Vec<SubmissionPayload>>>,
}

impl RecordingGateway {
    pub(super) fn submitted(&self) -> Vec<SubmissionPayload> {
        self.submitted.lock().expect("gateway mutex poisoned").clone()
    }
}

impl SubmissionGateway for RecordingGateway {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<(), SubmissionError> {
        self.submitted
            .lock()
            .expect("gateway mutex poisoned")
            .push(payload.clone());
        Ok(())
    }
}

pub(super) struct RejectingGateway;

impl SubmissionGateway for RejectingGateway {
    async fn submit(&self, _payload: &SubmissionPayload) -> Result<(), SubmissionError> {
        Err(SubmissionError::Rejected {
            status: 503,
            message: "Sheet is locked for maintenance".to_string(),
        })
    }
}

pub(super) type TestForm<G> = PreferenceForm<FixtureDirectory, G, RecordingNotifier>;

pub(super) fn build_form() -> (
    TestForm<RecordingGateway>,
    Arc<RecordingGateway>,
    Arc<RecordingNotifier>,
) {
    let gateway = Arc::new(RecordingGateway::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let form = PreferenceForm::new(
        Arc::new(FixtureDirectory::standard()),
        gateway.clone(),
        notifier.clone(),
    );
    (form, gateway, notifier)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
