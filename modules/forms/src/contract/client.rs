use async_trait::async_trait;

use crate::contract::{
    error::FormsError,
    model::{ErrorMap, FieldValues, FormKind, SubmitOutcome},
};

/// Public API trait for the forms module that other modules can use
#[async_trait]
pub trait FormsApi: Send + Sync {
    /// Errors a submit attempt would report for `values`. Nothing is sent.
    async fn validate(&self, kind: FormKind, values: FieldValues) -> Result<ErrorMap, FormsError>;

    /// Fill a fresh form with `values` and submit it.
    async fn submit(&self, kind: FormKind, values: FieldValues)
        -> Result<SubmitOutcome, FormsError>;
}
