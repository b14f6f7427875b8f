pub mod listing;
pub mod layout;
