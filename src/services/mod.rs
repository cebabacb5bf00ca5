pub mod medicine_service;
pub mod user_service;
