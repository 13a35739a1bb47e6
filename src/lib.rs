pub mod api;
pub mod error;
pub mod models;
pub mod planner;
pub mod repository;
pub mod services;
pub mod state;
