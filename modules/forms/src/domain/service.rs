use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use crate::contract::model::{FormKind, NavigationRequest, StatusMessage, SubmitOutcome};
use crate::domain::catalog;
use crate::domain::error::DomainError;
use crate::domain::ports::{Navigator, SubmissionPort};
use crate::domain::schema::FormSchema;
use crate::domain::state::{FormState, SubmitRejection};

pub const LOGIN_SUCCESS: &str = "Login successful! Redirecting...";
pub const LOGIN_FAILURE: &str = "Login failed. Please check your credentials.";
pub const REGISTER_SUCCESS: &str = "Registration successful! Redirecting to login...";
pub const REGISTER_FAILURE: &str = "Registration failed. Please try again.";

/// Domain service gating form submission.
/// Depends only on the submission and navigation ports.
#[derive(Clone)]
pub struct Service {
    submitter: Arc<dyn SubmissionPort>,
    navigator: Arc<dyn Navigator>,
    login: Arc<FormSchema>,
    register: Arc<FormSchema>,
    config: ServiceConfig,
}

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub login_redirect_delay: Duration,
    pub register_redirect_delay: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            login_redirect_delay: Duration::from_secs(2),
            register_redirect_delay: Duration::from_secs(3),
        }
    }
}

impl Service {
    pub fn new(
        submitter: Arc<dyn SubmissionPort>,
        navigator: Arc<dyn Navigator>,
        config: ServiceConfig,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            submitter,
            navigator,
            login: catalog::schema_for(FormKind::Login)?,
            register: catalog::schema_for(FormKind::Register)?,
            config,
        })
    }

    pub fn schema(&self, kind: FormKind) -> Arc<FormSchema> {
        match kind {
            FormKind::Login => Arc::clone(&self.login),
            FormKind::Register => Arc::clone(&self.register),
        }
    }

    /// Empty form as mounted.
    pub fn new_form(&self, kind: FormKind) -> FormState {
        FormState::new(self.schema(kind))
    }

    /// Validate, submit and schedule the redirect.
    ///
    /// A blocked or rejected attempt keeps every entered value. A form
    /// already in flight is returned unchanged.
    #[instrument(name = "forms.service.submit", skip_all, fields(form = %state.schema().kind()))]
    pub async fn submit(&self, state: FormState) -> (FormState, SubmitOutcome) {
        let kind = state.schema().kind();
        let (state, begun) = state.begin_submit();
        let submission = match begun {
            Ok(submission) => submission,
            Err(SubmitRejection::InFlight) => {
                debug!("submit ignored, already in flight");
                return (state, SubmitOutcome::InFlight);
            }
            Err(SubmitRejection::Blocked(blocked)) => {
                debug!(
                    invalid = blocked.errors.len(),
                    pristine = blocked.pristine,
                    "submit blocked"
                );
                return (state, SubmitOutcome::Blocked(blocked));
            }
        };

        match self.submitter.submit(&submission).await {
            Ok(()) => {
                let (message, navigation) = self.success(kind);
                info!(route = %navigation.route, "form submitted");
                self.navigator.navigate(navigation.clone());
                (
                    state.finish_submit(StatusMessage::success(message)),
                    SubmitOutcome::Accepted {
                        message: message.to_string(),
                        navigation,
                    },
                )
            }
            Err(e) => {
                warn!(error = %e, "form submission failed");
                let message = failure_message(kind);
                (
                    state.finish_submit(StatusMessage::error(message)),
                    SubmitOutcome::Rejected {
                        message: message.to_string(),
                    },
                )
            }
        }
    }

    fn success(&self, kind: FormKind) -> (&'static str, NavigationRequest) {
        match kind {
            FormKind::Login => (
                LOGIN_SUCCESS,
                NavigationRequest {
                    route: "/landing".to_string(),
                    delay: self.config.login_redirect_delay,
                },
            ),
            FormKind::Register => (
                REGISTER_SUCCESS,
                NavigationRequest {
                    route: "/login".to_string(),
                    delay: self.config.register_redirect_delay,
                },
            ),
        }
    }
}

fn failure_message(kind: FormKind) -> &'static str {
    match kind {
        FormKind::Login => LOGIN_FAILURE,
        FormKind::Register => REGISTER_FAILURE,
    }
}
