// src/handlers/mod.rs
pub mod dashboard;
pub mod debtors;
pub mod error;
