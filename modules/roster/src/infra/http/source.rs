use async_trait::async_trait;
use tracing::{debug, instrument};
use url::Url;

use crate::contract::model::UserRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::RosterSource;
use crate::infra::http::dto::UserDto;
use modkit::TracedClient;

/// HTTP adapter implementing the RosterSource port with a single GET.
pub struct HttpRosterSource {
    client: TracedClient,
    users_url: Url,
}

impl HttpRosterSource {
    pub fn new(client: TracedClient, users_url: Url) -> Self {
        Self { client, users_url }
    }

    pub fn users_url(&self) -> &Url {
        &self.users_url
    }
}

#[async_trait]
impl RosterSource for HttpRosterSource {
    #[instrument(
        name = "roster.http.fetch_users",
        skip_all,
        fields(users_url = %self.users_url)
    )]
    async fn fetch_users(&self) -> Result<Vec<UserRecord>, DomainError> {
        let users: Vec<UserDto> = self.client.get_json(self.users_url.as_str()).await?;
        debug!(count = users.len(), "received roster payload");
        Ok(users.into_iter().map(UserRecord::from).collect())
    }
}
