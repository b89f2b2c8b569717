pub mod tip_service;
pub mod user_service;
