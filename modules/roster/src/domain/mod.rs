pub mod controller;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod service;
pub mod view;
