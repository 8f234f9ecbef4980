// src/services/mod.rs
pub mod dashboard;
pub mod inspect;
pub mod loader;
pub mod metrics;
pub mod presenter;
pub mod store;
pub mod tables;
pub mod window;
