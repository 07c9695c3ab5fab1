use async_trait::async_trait;

use crate::contract::model::{NavigationRequest, SubmittedValues};
use crate::domain::error::DomainError;

/// Transport-agnostic submission port. The response body is not interpreted.
#[async_trait]
pub trait SubmissionPort: Send + Sync {
    async fn submit(&self, submission: &SubmittedValues) -> Result<(), DomainError>;
}

/// Output port: page transitions. Implementations schedule the change and
/// return without waiting for `request.delay`.
pub trait Navigator: Send + Sync {
    fn navigate(&self, request: NavigationRequest);
}
