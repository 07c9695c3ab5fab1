use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument};

use crate::contract::model::{
    DetailField, RecordDetail, RosterDisplay, RosterField, RosterViewState, UserRecord,
    DEFAULT_PAGE_SIZE,
};
use crate::domain::controller::RosterHandle;
use crate::domain::error::DomainError;
use crate::domain::ports::RosterSource;
use crate::domain::view::{RosterView, ViewOptions};

/// Domain service for the roster. Depends only on the source port.
#[derive(Clone)]
pub struct Service {
    source: Arc<dyn RosterSource>,
    config: ServiceConfig,
}

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub refresh_interval: Duration,
    pub default_page_size: NonZeroUsize,
    pub page_size_choices: Vec<NonZeroUsize>,
    pub columns: Vec<RosterField>,
    pub detail_fields: Vec<DetailField>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            refresh_interval: Duration::from_secs(30),
            default_page_size: DEFAULT_PAGE_SIZE,
            page_size_choices: [5, 10, 20].into_iter().filter_map(NonZeroUsize::new).collect(),
            columns: vec![
                RosterField::Id,
                RosterField::Name,
                RosterField::Email,
                RosterField::City,
                RosterField::CompanyName,
            ],
            detail_fields: DetailField::ALL.to_vec(),
        }
    }
}

impl Service {
    pub fn new(source: Arc<dyn RosterSource>, config: ServiceConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// View state a freshly mounted view starts with.
    pub fn initial_state(&self) -> RosterViewState {
        RosterViewState::with_page_size(self.config.default_page_size)
    }

    pub fn new_view(&self) -> RosterView {
        RosterView::new(ViewOptions {
            default_page_size: self.config.default_page_size,
            page_size_choices: self.config.page_size_choices.clone(),
            columns: self.config.columns.clone(),
        })
    }

    /// Mount a live view that refreshes on the configured interval.
    pub fn mount(&self, state: RosterViewState) -> Result<RosterHandle, DomainError> {
        if self.config.refresh_interval.is_zero() {
            return Err(DomainError::validation(
                "refresh_interval",
                "must be greater than zero",
            ));
        }
        let mut view = self.new_view();
        view.restore(state)?;
        info!(
            refresh_interval = ?self.config.refresh_interval,
            "mounting roster view"
        );
        Ok(RosterHandle::spawn(
            Arc::clone(&self.source),
            view,
            self.config.refresh_interval,
        ))
    }

    #[instrument(name = "roster.service.fetch_snapshot", skip(self))]
    pub async fn fetch_snapshot(&self) -> Result<Vec<UserRecord>, DomainError> {
        let records = self.source.fetch_users().await?;
        debug!(count = records.len(), "fetched roster snapshot");
        Ok(records)
    }

    /// One-shot pipeline run over a fresh snapshot.
    #[instrument(
        name = "roster.service.list_page",
        skip(self, state),
        fields(query = %state.query, page_index = state.page_index)
    )]
    pub async fn list_page(&self, state: RosterViewState) -> Result<RosterDisplay, DomainError> {
        let mut view = self.new_view();
        view.restore(state)?;
        let records = self.fetch_snapshot().await?;
        view.apply_fetch(1, Ok(records));
        Ok(view.display())
    }

    #[instrument(name = "roster.service.get_record", skip(self), fields(record_id = id))]
    pub async fn get_record(&self, id: u64) -> Result<RecordDetail, DomainError> {
        let records = self.fetch_snapshot().await?;
        let record = crate::domain::pipeline::select_record(&records, id)
            .ok_or_else(|| DomainError::record_not_found(id))?;
        Ok(self.detail(record))
    }

    /// Labelled detail view of `record` using the configured fields.
    pub fn detail(&self, record: &UserRecord) -> RecordDetail {
        RecordDetail {
            id: record.id,
            fields: self
                .config
                .detail_fields
                .iter()
                .map(|f| (f.label().to_string(), f.value(record)))
                .collect(),
        }
    }
}
