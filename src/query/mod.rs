pub mod cache;
pub mod category;
pub mod pagination;
pub mod engine;
