use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::payload::SubmissionPayload;

/// Header row of the sheet, one column per wire field.
pub const SHEET_COLUMNS: [&str; 11] = [
    "userId",
    "department",
    "section1_option",
    "section1_place1",
    "section1_place2",
    "section1_place3",
    "section2_option",
    "section2_place1",
    "section2_place2",
    "section2_place3",
    "timestamp",
];

/// Append-only destination for accepted payloads.
pub trait SheetWriter: Send + Sync {
    fn append(&self, payload: &SubmissionPayload) -> Result<(), SheetError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    #[error("failed to write sheet: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid sheet data: {0}")]
    Csv(#[from] csv::Error),
    #[error("sheet unavailable: {0}")]
    Unavailable(String),
}

/// Sheet persisted as a CSV file, header written on first append.
#[derive(Debug)]
pub struct CsvSheet {
    path: PathBuf,
    lock: Mutex<()>,
}

impl CsvSheet {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SheetWriter for CsvSheet {
    fn append(&self, payload: &SubmissionPayload) -> Result<(), SheetError> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| SheetError::Unavailable("sheet lock poisoned".to_string()))?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let is_empty = file.metadata()?.len() == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if is_empty {
            writer.write_record(SHEET_COLUMNS)?;
        }
        writer.write_record(payload.sheet_row())?;
        writer.flush()?;
        Ok(())
    }
}

/// Sheet held in memory; rows exclude the header.
#[derive(Debug, Default, Clone)]
pub struct MemorySheet {
    rows: Arc<Mutex<Vec<[String; 11]>>>,
}

impl MemorySheet {
    pub fn rows(&self) -> Vec<[String; 11]> {
        self.rows.lock().expect("sheet mutex poisoned").clone()
    }
}

impl SheetWriter for MemorySheet {
    fn append(&self, payload: &SubmissionPayload) -> Result<(), SheetError> {
        self.rows
            .lock()
            .map_err(|_| SheetError::Unavailable("sheet lock poisoned".to_string()))?
            .push(payload.sheet_row());
        Ok(())
    }
}
