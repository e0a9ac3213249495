// src/api/handlers/mod.rs
mod health;
mod risk;

pub use health::health_check;
pub use risk::{assess_risk, method_not_allowed, preflight};
