pub mod dto;
pub mod mapper;
pub mod source;

pub use source::HttpRosterSource;
