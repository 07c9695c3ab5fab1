use anyhow::Context;
use async_trait::async_trait;
use tracing::{debug, instrument};
use url::Url;

use crate::contract::model::SubmittedValues;
use crate::domain::error::DomainError;
use crate::domain::ports::SubmissionPort;
use modkit::TracedClient;

/// HTTP adapter implementing the SubmissionPort: one JSON POST of the form
/// values. Any 2xx is success.
pub struct HttpSubmitter {
    client: TracedClient,
    submit_url: Url,
}

impl HttpSubmitter {
    pub fn new(client: TracedClient, submit_url: Url) -> Self {
        Self { client, submit_url }
    }
}

#[async_trait]
impl SubmissionPort for HttpSubmitter {
    #[instrument(
        name = "forms.http.submit",
        skip_all,
        fields(submit_url = %self.submit_url, form = %submission.kind)
    )]
    async fn submit(&self, submission: &SubmittedValues) -> Result<(), DomainError> {
        let status = self
            .client
            .post_json(self.submit_url.as_str(), &submission.values)
            .await
            .with_context(|| format!("POST {} ({} form)", self.submit_url.path(), submission.kind))
            .map_err(|e| DomainError::submission(format!("{:#}", e)))?;
        debug!(status, "submission accepted");
        Ok(())
    }
}
