use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use super::domain::{EmployeeId, EmployeeProfile};

/// Path the employee lookup backend serves (`?emp_id=<id>`).
pub const EMPLOYEE_LOOKUP_PATH: &str = "/api/employee";

/// Lookup collaborator producing employee details for an id.
pub trait EmployeeDirectory: Send + Sync {
    fn fetch_employee(
        &self,
        id: &EmployeeId,
    ) -> impl Future<Output = Result<EmployeeProfile, DirectoryError>> + Send;
}

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("employee {0} not found")]
    NotFound(EmployeeId),
    #[error("employee directory unavailable: {0}")]
    Unavailable(String),
}

/// Employee lookup wire format, keyed the way the backend spells its columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeLookupResponse {
    #[serde(rename = "EmpID")]
    pub emp_id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Department")]
    pub department: String,
}

impl From<EmployeeLookupResponse> for EmployeeProfile {
    fn from(value: EmployeeLookupResponse) -> Self {
        Self {
            id: EmployeeId(value.emp_id),
            name: value.name,
            department: value.department,
        }
    }
}

impl From<&EmployeeProfile> for EmployeeLookupResponse {
    fn from(value: &EmployeeProfile) -> Self {
        Self {
            emp_id: value.id.0.clone(),
            name: value.name.clone(),
            department: value.department.clone(),
        }
    }
}

/// In-memory stand-in for the employee backend.
#[derive(Debug, Clone, Default)]
pub struct FixtureDirectory {
    employees: HashMap<EmployeeId, EmployeeProfile>,
    latency: Option<Duration>,
}

impl FixtureDirectory {
    /// The three demo employees the form ships with.
    pub fn standard() -> Self {
        let mut directory = Self::default();
        directory.insert(profile("E001", "John Doe", "Engineering"));
        directory.insert(profile("E002", "Jane Smith", "Marketing"));
        directory.insert(profile("E003", "Robert Johnson", "Technical"));
        directory
    }

    /// Delays every lookup, mimicking a round trip to a real backend.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn insert(&mut self, profile: EmployeeProfile) {
        self.employees.insert(profile.id.clone(), profile);
    }

    pub fn get(&self, id: &EmployeeId) -> Option<&EmployeeProfile> {
        self.employees.get(id)
    }
}

fn profile(id: &str, name: &str, department: &str) -> EmployeeProfile {
    EmployeeProfile {
        id: EmployeeId(id.to_string()),
        name: name.to_string(),
        department: department.to_string(),
    }
}

impl EmployeeDirectory for FixtureDirectory {
    async fn fetch_employee(&self, id: &EmployeeId) -> Result<EmployeeProfile, DirectoryError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        self.get(id)
            .cloned()
            .ok_or_else(|| DirectoryError::NotFound(id.clone()))
    }
}

/// Employee lookup against an HTTP backend.
#[derive(Debug, Clone)]
pub struct HttpEmployeeDirectory {
    client: reqwest::Client,
    base_url: String,
}

impl HttpEmployeeDirectory {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DirectoryError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| {
                DirectoryError::Unavailable(format!("failed to build HTTP client: {err}"))
            })?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }
}

impl EmployeeDirectory for HttpEmployeeDirectory {
    async fn fetch_employee(&self, id: &EmployeeId) -> Result<EmployeeProfile, DirectoryError> {
        let url = format!("{}{}", self.base_url, EMPLOYEE_LOOKUP_PATH);
        let response = self
            .client
            .get(&url)
            .query(&[("emp_id", id.as_str())])
            .send()
            .await
            .map_err(|err| DirectoryError::Unavailable(format!("{url}: {err}")))?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(DirectoryError::NotFound(id.clone())),
            status if status.is_success() => {
                let body: EmployeeLookupResponse = response.json().await.map_err(|err| {
                    DirectoryError::Unavailable(format!("invalid lookup response: {err}"))
                })?;
                Ok(body.into())
            }
            status => Err(DirectoryError::Unavailable(format!("{url}: HTTP {status}"))),
        }
    }
}
