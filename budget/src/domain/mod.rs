pub mod category;
pub mod insights;
pub mod models;
pub mod repository;
