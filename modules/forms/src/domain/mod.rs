pub mod catalog;
pub mod error;
pub mod ports;
pub mod rules;
pub mod schema;
pub mod service;
pub mod state;
