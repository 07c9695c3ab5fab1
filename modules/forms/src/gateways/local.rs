use async_trait::async_trait;
use std::sync::Arc;

use crate::contract::{
    client::FormsApi,
    error::FormsError,
    model::{ErrorMap, FieldValues, FormKind, SubmitOutcome},
};
use crate::domain::service::Service;
use crate::domain::state::FormState;

/// Local implementation of the FormsApi trait that delegates to the domain service
pub struct FormsLocalClient {
    service: Arc<Service>,
}

impl FormsLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }

    fn fill(&self, kind: FormKind, values: FieldValues) -> Result<FormState, FormsError> {
        values
            .into_iter()
            .try_fold(self.service.new_form(kind), |state, (name, value)| {
                state.set_field(&name, value)
            })
            .map_err(Into::into)
    }
}

#[async_trait]
impl FormsApi for FormsLocalClient {
    async fn validate(&self, kind: FormKind, values: FieldValues) -> Result<ErrorMap, FormsError> {
        Ok(self.fill(kind, values)?.validate_all())
    }

    async fn submit(
        &self,
        kind: FormKind,
        values: FieldValues,
    ) -> Result<SubmitOutcome, FormsError> {
        let state = self.fill(kind, values)?;
        let (_, outcome) = self.service.submit(state).await;
        Ok(outcome)
    }
}
