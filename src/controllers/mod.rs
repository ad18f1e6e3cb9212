pub mod home_controller;
pub mod auth_controller;
pub mod user_controller;
pub mod stocks_controller;
pub mod ai_controller;
