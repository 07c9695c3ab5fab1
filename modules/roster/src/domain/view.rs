use std::num::NonZeroUsize;
use std::sync::Arc;

use listing_core::{clamp_page_index, Page};
use tracing::debug;

use crate::contract::model::{
    DisplayStatus, RosterAction, RosterDisplay, RosterField, RosterViewState, UserRecord,
};
use crate::domain::error::DomainError;
use crate::domain::pipeline;

type Snapshot = Arc<Vec<UserRecord>>;

#[derive(Debug, Clone)]
enum LoadState {
    Loading,
    Loaded(Snapshot),
    Failed {
        message: String,
        stale: Option<Snapshot>,
    },
}

/// Display options a view is built with.
#[derive(Debug, Clone)]
pub struct ViewOptions {
    pub default_page_size: NonZeroUsize,
    /// Allowed page sizes; empty accepts any positive size.
    pub page_size_choices: Vec<NonZeroUsize>,
    pub columns: Vec<RosterField>,
}

/// Single owner of one roster view: the latest snapshot plus the view state.
///
/// Every transition keeps `page_index` inside `1..=page_count` of the
/// filtered list.
#[derive(Debug, Clone)]
pub struct RosterView {
    state: RosterViewState,
    load: LoadState,
    /// Sequence number of the last fetch completion applied.
    applied_seq: u64,
    options: ViewOptions,
}

impl RosterView {
    pub fn new(options: ViewOptions) -> Self {
        Self {
            state: RosterViewState::with_page_size(options.default_page_size),
            load: LoadState::Loading,
            applied_seq: 0,
            options,
        }
    }

    pub fn state(&self) -> &RosterViewState {
        &self.state
    }

    /// Replace the whole view state (e.g. from command-line flags) and clamp.
    pub fn restore(&mut self, state: RosterViewState) -> Result<(), DomainError> {
        self.check_page_size(state.page_size.get())?;
        self.state = state;
        self.clamp();
        Ok(())
    }

    pub fn dispatch(&mut self, action: RosterAction) -> Result<(), DomainError> {
        match action {
            RosterAction::SetQuery(query) => {
                self.state.query = query;
                self.clamp();
            }
            RosterAction::SortBy(field) => {
                self.state.sort = self.state.sort.toggled(field);
            }
            RosterAction::SetPageSize(size) => {
                let size = self.check_page_size(size)?;
                self.state.page_size = size;
                self.clamp();
            }
            RosterAction::NextPage => {
                let (_, page) = self.window();
                if page.page_info.has_next {
                    self.state.page_index += 1;
                }
            }
            RosterAction::PrevPage => {
                if self.state.page_index > 1 {
                    self.state.page_index -= 1;
                }
            }
            RosterAction::GoToPage(index) => {
                self.state.page_index = index;
                self.clamp();
            }
        }
        Ok(())
    }

    /// Apply a fetch completion. Returns `false` when a newer request has
    /// already been applied and this one is discarded.
    pub fn apply_fetch(
        &mut self,
        seq: u64,
        result: Result<Vec<UserRecord>, DomainError>,
    ) -> bool {
        if seq <= self.applied_seq {
            debug!(seq, applied = self.applied_seq, "discarding stale roster response");
            return false;
        }
        self.applied_seq = seq;

        self.load = match result {
            Ok(records) => LoadState::Loaded(Arc::new(records)),
            Err(e) => LoadState::Failed {
                message: e.to_string(),
                stale: self.snapshot().cloned(),
            },
        };
        self.clamp();
        true
    }

    /// Records of the current or, after a failed refresh, the stale snapshot.
    pub fn snapshot(&self) -> Option<&Snapshot> {
        match &self.load {
            LoadState::Loading => None,
            LoadState::Loaded(snapshot) => Some(snapshot),
            LoadState::Failed { stale, .. } => stale.as_ref(),
        }
    }

    pub fn select(&self, id: u64) -> Result<UserRecord, DomainError> {
        self.snapshot()
            .and_then(|records| pipeline::select_record(records, id))
            .cloned()
            .ok_or_else(|| DomainError::record_not_found(id))
    }

    pub fn display(&self) -> RosterDisplay {
        let status = match &self.load {
            LoadState::Loading => DisplayStatus::Loading,
            LoadState::Loaded(_) => DisplayStatus::Ready,
            LoadState::Failed { message, .. } => DisplayStatus::Failed(message.clone()),
        };
        let (filtered_count, page) = self.window();
        RosterDisplay {
            status,
            state: self.state.clone(),
            page,
            filtered_count,
            total_count: self.snapshot().map_or(0, |s| s.len()),
            columns: self.options.columns.clone(),
            stale: matches!(self.load, LoadState::Failed { stale: Some(_), .. }),
        }
    }

    /// Filter, sort and cut the current page.
    fn window(&self) -> (usize, Page<UserRecord>) {
        let Some(records) = self.snapshot() else {
            return (0, Page::empty(self.state.page_size));
        };
        let filtered = pipeline::apply_filter(records, &self.state.query);
        let sorted = pipeline::apply_sort(filtered, &self.state.sort);
        let page = pipeline::paginate(&sorted, self.state.page_index, self.state.page_size);
        (sorted.len(), page)
    }

    fn filtered_count(&self) -> usize {
        self.snapshot().map_or(0, |records| {
            pipeline::apply_filter(records, &self.state.query).len()
        })
    }

    fn clamp(&mut self) {
        let total = self.filtered_count();
        self.state.page_index =
            clamp_page_index(self.state.page_index, total, self.state.page_size);
    }

    fn check_page_size(&self, size: usize) -> Result<NonZeroUsize, DomainError> {
        let size = NonZeroUsize::new(size).ok_or(DomainError::InvalidPageSize)?;
        let choices = &self.options.page_size_choices;
        if !choices.is_empty() && !choices.contains(&size) {
            return Err(DomainError::unsupported_page_size(
                size.get(),
                choices.iter().map(|c| c.get()).collect(),
            ));
        }
        Ok(size)
    }
}
