pub mod ai_service;
pub mod quiz_service;
