pub mod responses;
pub mod listing;
pub mod service;
