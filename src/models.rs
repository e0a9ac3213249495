// src/models.rs
use serde::{Deserialize, Serialize};

/// Score returned to the dashboard for a single assessment.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct RiskResult {
    pub risk_score: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiError {
    pub error: String,
}
