use std::cmp::Ordering;
use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use listing_core::{Page, SortKey, SortSpec};
use serde::{Deserialize, Serialize};

/// One roster entry, flattened from the upstream user payload.
/// This is a transport-agnostic domain model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: u64,
    pub name: String,
    pub username: String,
    pub email: String,
    pub street: String,
    pub suite: String,
    pub city: String,
    pub zipcode: String,
    pub phone: String,
    pub website: String,
    pub company_name: String,
    pub company_catch_phrase: String,
    pub company_bs: String,
}

/// Table columns. Every column is sortable; all but `Username` are searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RosterField {
    Id,
    Name,
    Username,
    Email,
    City,
    CompanyName,
}

impl RosterField {
    pub const ALL: [RosterField; 6] = [
        RosterField::Id,
        RosterField::Name,
        RosterField::Username,
        RosterField::Email,
        RosterField::City,
        RosterField::CompanyName,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RosterField::Id => "id",
            RosterField::Name => "name",
            RosterField::Username => "username",
            RosterField::Email => "email",
            RosterField::City => "city",
            RosterField::CompanyName => "companyName",
        }
    }

    /// Column header text.
    pub fn label(self) -> &'static str {
        match self {
            RosterField::Id => "User ID",
            RosterField::Name => "Full Name",
            RosterField::Username => "Username",
            RosterField::Email => "Email Address",
            RosterField::City => "Location (City)",
            RosterField::CompanyName => "Company",
        }
    }

    /// Cell text for `record`.
    pub fn value(self, record: &UserRecord) -> String {
        match self {
            RosterField::Id => record.id.to_string(),
            RosterField::Name => record.name.clone(),
            RosterField::Username => record.username.clone(),
            RosterField::Email => record.email.clone(),
            RosterField::City => record.city.clone(),
            RosterField::CompanyName => record.company_name.clone(),
        }
    }
}

impl fmt::Display for RosterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RosterField {
    type Err = listing_core::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" => Ok(RosterField::Id),
            "name" => Ok(RosterField::Name),
            "username" => Ok(RosterField::Username),
            "email" => Ok(RosterField::Email),
            "city" => Ok(RosterField::City),
            "companyname" | "company_name" | "company" => Ok(RosterField::CompanyName),
            other => Err(listing_core::Error::UnknownSortField(other.to_string())),
        }
    }
}

impl SortKey<UserRecord> for RosterField {
    fn compare(&self, a: &UserRecord, b: &UserRecord) -> Ordering {
        match self {
            RosterField::Id => a.id.cmp(&b.id),
            RosterField::Name => a.name.cmp(&b.name),
            RosterField::Username => a.username.cmp(&b.username),
            RosterField::Email => a.email.cmp(&b.email),
            RosterField::City => a.city.cmp(&b.city),
            RosterField::CompanyName => a.company_name.cmp(&b.company_name),
        }
    }
}

/// Fields shown by the detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DetailField {
    Id,
    Name,
    Username,
    Email,
    Phone,
    Website,
    Street,
    Suite,
    City,
    Zipcode,
    CompanyName,
    CatchPhrase,
    Bs,
}

impl DetailField {
    pub const ALL: [DetailField; 13] = [
        DetailField::Id,
        DetailField::Name,
        DetailField::Username,
        DetailField::Email,
        DetailField::Phone,
        DetailField::Website,
        DetailField::Street,
        DetailField::Suite,
        DetailField::City,
        DetailField::Zipcode,
        DetailField::CompanyName,
        DetailField::CatchPhrase,
        DetailField::Bs,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DetailField::Id => "User ID",
            DetailField::Name => "Full Name",
            DetailField::Username => "Username",
            DetailField::Email => "Email Address",
            DetailField::Phone => "Phone",
            DetailField::Website => "Website",
            DetailField::Street => "Street",
            DetailField::Suite => "Suite",
            DetailField::City => "City",
            DetailField::Zipcode => "Zipcode",
            DetailField::CompanyName => "Company",
            DetailField::CatchPhrase => "Catch Phrase",
            DetailField::Bs => "Business",
        }
    }

    pub fn value(self, record: &UserRecord) -> String {
        match self {
            DetailField::Id => record.id.to_string(),
            DetailField::Name => record.name.clone(),
            DetailField::Username => record.username.clone(),
            DetailField::Email => record.email.clone(),
            DetailField::Phone => record.phone.clone(),
            DetailField::Website => record.website.clone(),
            DetailField::Street => record.street.clone(),
            DetailField::Suite => record.suite.clone(),
            DetailField::City => record.city.clone(),
            DetailField::Zipcode => record.zipcode.clone(),
            DetailField::CompanyName => record.company_name.clone(),
            DetailField::CatchPhrase => record.company_catch_phrase.clone(),
            DetailField::Bs => record.company_bs.clone(),
        }
    }
}

pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(5) {
    Some(n) => n,
    None => NonZeroUsize::MIN,
};

/// User-driven display choices of one roster view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterViewState {
    pub query: String,
    pub sort: SortSpec<RosterField>,
    pub page_size: NonZeroUsize,
    /// 1-based.
    pub page_index: usize,
}

impl RosterViewState {
    pub fn with_page_size(page_size: NonZeroUsize) -> Self {
        Self {
            query: String::new(),
            sort: SortSpec::asc(RosterField::Id),
            page_size,
            page_index: 1,
        }
    }
}

impl Default for RosterViewState {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }
}

/// Interactions that change the view state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterAction {
    SetQuery(String),
    /// Header click.
    SortBy(RosterField),
    SetPageSize(usize),
    NextPage,
    PrevPage,
    GoToPage(usize),
}

/// Load status of the view, distinct from "loaded, zero records".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "message")]
pub enum DisplayStatus {
    Loading,
    Ready,
    Failed(String),
}

/// What the render collaborator draws: the visible page plus counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterDisplay {
    pub status: DisplayStatus,
    pub state: RosterViewState,
    pub page: Page<UserRecord>,
    /// Records left after filtering.
    pub filtered_count: usize,
    /// Records in the snapshot.
    pub total_count: usize,
    pub columns: Vec<RosterField>,
    /// True when `page` is cut from a snapshot older than a failed refresh.
    pub stale: bool,
}

/// Labelled fields of one record, in configured order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordDetail {
    pub id: u64,
    pub fields: Vec<(String, String)>,
}
