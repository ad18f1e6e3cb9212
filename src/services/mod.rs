pub mod yahoo;
pub mod gemini;
pub mod db_init;

pub mod json_extract;
pub mod prompts;
pub mod fallback;
pub mod quote_cache;
pub mod user_store;

pub mod auth_service;
pub mod user_service;
pub mod stocks_service;
pub mod analysis_service;
