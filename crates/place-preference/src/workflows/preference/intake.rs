use std::sync::Arc;

use tracing::{info, warn};

use super::payload::{PayloadRejection, SubmissionPayload};
use super::sheet::{SheetError, SheetWriter};

/// Receiving side of the submission endpoint: re-validates and appends.
pub struct SheetIntakeService<W> {
    sheet: Arc<W>,
}

impl<W> SheetIntakeService<W>
where
    W: SheetWriter + 'static,
{
    pub fn new(sheet: Arc<W>) -> Self {
        Self { sheet }
    }

    pub fn accept(&self, payload: &SubmissionPayload) -> Result<(), IntakeError> {
        if let Err(rejection) = payload.verify() {
            warn!(user = payload.user_id(), %rejection, "payload rejected");
            return Err(rejection.into());
        }

        self.sheet.append(payload)?;
        info!(
            user = payload.user_id(),
            department = payload.department(),
            "submission appended to sheet"
        );
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error(transparent)]
    Rejected(#[from] PayloadRejection),
    #[error(transparent)]
    Sheet(#[from] SheetError),
}
