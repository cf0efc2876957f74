//! What happens to an intake once it validates

use crate::intake::ValidatedIntake;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Acknowledgement of a validated intake
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub id: Uuid,
    pub validated_at: DateTime<Utc>,
    pub intake: ValidatedIntake,
}

impl SubmissionReceipt {
    pub fn new(intake: ValidatedIntake) -> Self {
        Self {
            id: Uuid::new_v4(),
            validated_at: Utc::now(),
            intake,
        }
    }
}

/// Receives every successfully validated intake, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
pub trait SubmitHandler {
    fn on_validated(&mut self, intake: &ValidatedIntake) -> Result<SubmissionReceipt>;
}

/// Default handler: issues a receipt and records it in the log.
///
/// The intake itself is kept in memory only.
#[derive(Debug, Default)]
pub struct ReceiptHandler;

impl SubmitHandler for ReceiptHandler {
    fn on_validated(&mut self, intake: &ValidatedIntake) -> Result<SubmissionReceipt> {
        let receipt = SubmissionReceipt::new(intake.clone());
        tracing::info!(
            receipt = %receipt.id,
            organs = intake.organ_types.len(),
            "Intake accepted"
        );
        Ok(receipt)
    }
}
