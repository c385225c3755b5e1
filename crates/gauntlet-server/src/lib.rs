pub mod app_state;
pub mod config;
pub mod engine;
pub mod error;
pub mod registry;
pub mod routes;
pub mod selector;
pub mod subscription_manager;
