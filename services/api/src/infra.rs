use metrics_exporter_prometheus::PrometheusHandle;
use place_preference::config::{DirectoryConfig, SheetConfig};
use place_preference::workflows::preference::{
    CsvSheet, DirectoryError, EmployeeDirectory, EmployeeId, EmployeeProfile, FixtureDirectory,
    HttpEmployeeDirectory, MemorySheet, SheetError, SheetWriter, SubmissionPayload,
};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Employee lookup chosen by `APP_DIRECTORY_URL`.
pub(crate) enum ConfiguredDirectory {
    Fixture(FixtureDirectory),
    Http(HttpEmployeeDirectory),
}

impl ConfiguredDirectory {
    pub(crate) fn from_config(
        config: &DirectoryConfig,
        timeout: Duration,
    ) -> Result<Self, DirectoryError> {
        match &config.base_url {
            Some(base_url) => Ok(Self::Http(HttpEmployeeDirectory::new(
                base_url.as_str(),
                timeout,
            )?)),
            None => {
                let mut directory = FixtureDirectory::standard();
                if let Some(latency) = config.fixture_latency() {
                    directory = directory.with_latency(latency);
                }
                Ok(Self::Fixture(directory))
            }
        }
    }

    pub(crate) fn describe(&self) -> &'static str {
        match self {
            Self::Fixture(_) => "fixture",
            Self::Http(_) => "http",
        }
    }
}

impl EmployeeDirectory for ConfiguredDirectory {
    async fn fetch_employee(&self, id: &EmployeeId) -> Result<EmployeeProfile, DirectoryError> {
        match self {
            Self::Fixture(directory) => directory.fetch_employee(id).await,
            Self::Http(directory) => directory.fetch_employee(id).await,
        }
    }
}

/// Sheet chosen by `APP_SHEET_PATH`.
pub(crate) enum ConfiguredSheet {
    Csv(CsvSheet),
    Memory(MemorySheet),
}

impl ConfiguredSheet {
    pub(crate) fn from_config(config: &SheetConfig) -> Self {
        match &config.path {
            Some(path) => Self::Csv(CsvSheet::new(path.clone())),
            None => Self::Memory(MemorySheet::default()),
        }
    }

    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Csv(sheet) => sheet.path().display().to_string(),
            Self::Memory(_) => "memory".to_string(),
        }
    }
}

impl SheetWriter for ConfiguredSheet {
    fn append(&self, payload: &SubmissionPayload) -> Result<(), SheetError> {
        match self {
            Self::Csv(sheet) => sheet.append(payload),
            Self::Memory(sheet) => sheet.append(payload),
        }
    }
}
