// src/risk.rs
use log::{debug, warn};
use serde::{Deserialize, Deserializer, de};
use serde_json::Value;
use thiserror::Error;

use crate::models::RiskResult;

pub const BASE_SCORE: f64 = 15.0;
pub const MIN_SCORE: f64 = 5.0;
pub const MAX_SCORE: f64 = 98.8;

/// Score reported whenever the patient record cannot be coerced.
pub const FALLBACK_SCORE: f64 = 45.0;

/// Chest pain category as labelled by the dashboard form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ChestPainType {
    #[default]
    TypicalAngina,
    AtypicalAngina,
    NonAnginalPain,
    Asymptomatic,
    Other(String),
}

impl ChestPainType {
    /// Whether this symptom adds to the risk score.
    pub fn is_symptomatic(&self) -> bool {
        matches!(self, ChestPainType::Asymptomatic | ChestPainType::AtypicalAngina)
    }
}

impl From<String> for ChestPainType {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Typical angina" => ChestPainType::TypicalAngina,
            "Atypical angina" => ChestPainType::AtypicalAngina,
            "Non-anginal pain" => ChestPainType::NonAnginalPain,
            "Asymptomatic" => ChestPainType::Asymptomatic,
            _ => ChestPainType::Other(label),
        }
    }
}

/// Vitals for a single assessment.
///
/// Field names on the wire follow the dashboard form (`trestbps`, `chol`,
/// `Max_heart_rate`, `cp`). Absent fields take the values from [`Default`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PatientInput {
    #[serde(deserialize_with = "lenient_number")]
    pub age: f64,

    #[serde(rename = "trestbps", deserialize_with = "lenient_number")]
    pub resting_blood_pressure: f64,

    #[serde(rename = "chol", deserialize_with = "lenient_number")]
    pub cholesterol: f64,

    #[serde(rename = "Max_heart_rate", deserialize_with = "lenient_number")]
    pub max_heart_rate: f64,

    #[serde(rename = "cp", deserialize_with = "lenient_chest_pain")]
    pub chest_pain_type: ChestPainType,
}

impl Default for PatientInput {
    fn default() -> Self {
        Self {
            age: 45.0,
            resting_blood_pressure: 130.0,
            cholesterol: 200.0,
            max_heart_rate: 150.0,
            chest_pain_type: ChestPainType::TypicalAngina,
        }
    }
}

#[derive(Error, Debug)]
pub enum CoercionError {
    #[error("expected a JSON object, found {0}")]
    NotAnObject(&'static str),

    #[error("invalid field value: {0}")]
    Field(#[from] serde_json::Error),
}

impl PatientInput {
    /// Coerces a decoded request body into typed vitals.
    pub fn from_json(payload: &Value) -> Result<Self, CoercionError> {
        if !payload.is_object() {
            return Err(CoercionError::NotAnObject(json_kind(payload)));
        }
        Ok(PatientInput::deserialize(payload)?)
    }
}

impl RiskResult {
    pub fn fallback() -> Self {
        RiskResult {
            risk_score: FALLBACK_SCORE,
        }
    }
}

/// Additive point score, clamped to `[MIN_SCORE, MAX_SCORE]` and rounded to
/// two decimal places.
pub fn calculate_risk(input: &PatientInput) -> f64 {
    let mut score = BASE_SCORE;

    if input.resting_blood_pressure >= 140.0 {
        score += 30.0 + (input.resting_blood_pressure - 140.0) * 0.5;
    }

    if input.cholesterol >= 240.0 {
        score += 20.0 + (input.cholesterol - 240.0) * 0.1;
    }

    if input.age > 50.0 {
        score += (input.age - 50.0) * 0.8;
    }

    // A low peak heart rate under exercise weighs more than a moderate one.
    if input.max_heart_rate < 100.0 {
        score += 25.0;
    } else if input.max_heart_rate < 130.0 {
        score += 10.0;
    }

    if input.chest_pain_type.is_symptomatic() {
        score += 15.0;
    }

    round_to_hundredths(score.clamp(MIN_SCORE, MAX_SCORE))
}

/// Scores a raw request body. Coercion failures are not surfaced; they
/// yield [`FALLBACK_SCORE`].
pub fn assess(payload: &Value) -> RiskResult {
    match PatientInput::from_json(payload) {
        Ok(input) => {
            let risk_score = calculate_risk(&input);
            debug!("Computed risk score {}", risk_score);
            RiskResult { risk_score }
        }
        Err(e) => {
            warn!("Error calculating risk, reporting {}: {}", FALLBACK_SCORE, e);
            RiskResult::fallback()
        }
    }
}

/// Ties go to the even neighbour, as with decimal formatting.
fn round_to_hundredths(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Accepts numbers, numeric strings (infinities included) and booleans.
/// Anything else, including `null` and NaN, is rejected.
fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    let number = match &raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };

    match number {
        Some(n) if !n.is_nan() => Ok(n),
        _ => Err(de::Error::custom(format!("expected a number, found {}", raw))),
    }
}

/// Non-string labels never match a symptomatic category.
fn lenient_chest_pain<'de, D>(deserializer: D) -> Result<ChestPainType, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(label) => ChestPainType::from(label),
        other => ChestPainType::Other(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn score(payload: Value) -> f64 {
        assess(&payload).risk_score
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        assert_eq!(PatientInput::from_json(&json!({})).unwrap(), PatientInput::default());
        assert_eq!(score(json!({})), 15.0);
    }

    #[test]
    fn test_non_numeric_age_falls_back() {
        assert_eq!(score(json!({"age": "N/A"})), FALLBACK_SCORE);
    }

    #[test]
    fn test_null_and_structured_fields_fall_back() {
        assert_eq!(score(json!({"chol": null})), FALLBACK_SCORE);
        assert_eq!(score(json!({"trestbps": [150]})), FALLBACK_SCORE);
        assert_eq!(score(json!({"Max_heart_rate": {"value": 90}})), FALLBACK_SCORE);
        assert_eq!(score(json!({"age": "nan"})), FALLBACK_SCORE);
    }

    #[test]
    fn test_infinite_values_clamp() {
        assert_eq!(score(json!({"trestbps": "inf"})), MAX_SCORE);
        assert_eq!(score(json!({"chol": "Infinity"})), MAX_SCORE);
        assert_eq!(score(json!({"age": "-inf"})), 15.0);
        assert_eq!(score(json!({"Max_heart_rate": "-inf"})), 40.0);
    }

    #[test]
    fn test_non_object_body_falls_back() {
        assert_eq!(score(json!([60, 150, 250, 90, "Asymptomatic"])), FALLBACK_SCORE);
        assert_eq!(score(json!("age=60")), FALLBACK_SCORE);
        assert_eq!(score(Value::Null), FALLBACK_SCORE);
        assert!(matches!(
            PatientInput::from_json(&json!(42)),
            Err(CoercionError::NotAnObject("a number"))
        ));
    }

    #[test]
    fn test_numeric_strings_and_booleans_are_coerced() {
        let input = PatientInput::from_json(&json!({
            "age": " 60 ",
            "trestbps": "150.5",
            "chol": true,
        }))
        .unwrap();

        assert_eq!(input.age, 60.0);
        assert_eq!(input.resting_blood_pressure, 150.5);
        assert_eq!(input.cholesterol, 1.0);
        assert_eq!(input.max_heart_rate, 150.0);
    }

    #[test]
    fn test_clamps_to_upper_bound() {
        let payload = json!({
            "age": 90,
            "trestbps": 220,
            "chol": 400,
            "Max_heart_rate": 50,
            "cp": "Asymptomatic"
        });
        assert_eq!(score(payload), MAX_SCORE);
    }

    #[test]
    fn test_dashboard_example_is_clamped() {
        // 15 + 35 + 21 + 8 + 25 + 15 = 119
        let payload = json!({
            "trestbps": 150,
            "chol": 250,
            "age": 60,
            "Max_heart_rate": 90,
            "cp": "Asymptomatic"
        });
        assert_eq!(score(payload), 98.8);
    }

    #[test]
    fn test_additive_terms() {
        // 15 + 35 + 21 + 8 + 10 = 89
        let payload = json!({
            "trestbps": 150,
            "chol": 250,
            "age": 60,
            "Max_heart_rate": 120,
            "cp": "Typical angina"
        });
        assert_eq!(score(payload), 89.0);
    }

    #[test]
    fn test_thresholds_are_inclusive_where_expected() {
        assert_eq!(score(json!({"trestbps": 140})), 45.0);
        assert_eq!(score(json!({"trestbps": 139.9})), 15.0);
        assert_eq!(score(json!({"chol": 240})), 35.0);
        assert_eq!(score(json!({"age": 50})), 15.0);
    }

    #[test]
    fn test_heart_rate_tiers_are_exclusive() {
        assert_eq!(score(json!({"Max_heart_rate": 99})), 40.0);
        assert_eq!(score(json!({"Max_heart_rate": 100})), 25.0);
        assert_eq!(score(json!({"Max_heart_rate": 129})), 25.0);
        assert_eq!(score(json!({"Max_heart_rate": 130})), 15.0);
    }

    #[test]
    fn test_chest_pain_symptoms() {
        assert_eq!(score(json!({"cp": "Asymptomatic"})), 30.0);
        assert_eq!(score(json!({"cp": "Atypical angina"})), 30.0);
        assert_eq!(score(json!({"cp": "Non-anginal pain"})), 15.0);
        assert_eq!(score(json!({"cp": "asymptomatic"})), 15.0);
        assert_eq!(score(json!({"cp": 3})), 15.0);
        assert_eq!(score(json!({"cp": null})), 15.0);
    }

    #[test]
    fn test_rounds_to_two_decimals() {
        // 15 + 1.333 * 0.8 = 16.0664
        assert_eq!(score(json!({"age": 51.333})), 16.07);
    }

    #[test]
    fn test_exact_ties_round_to_even() {
        // 15 + 30 + 0.125 = 45.125 exactly
        assert_eq!(score(json!({"trestbps": 140.25})), 45.12);
        // 15 + 30 + 0.375 = 45.375 exactly
        assert_eq!(score(json!({"trestbps": 140.75})), 45.38);
    }

    #[test]
    fn test_score_stays_in_bounds() {
        for age in [0.0, 30.0, 55.5, 80.0, 120.0] {
            for bp in [90.0, 140.0, 171.3, 260.0] {
                for mhr in [60.0, 115.0, 180.0] {
                    let input = PatientInput {
                        age,
                        resting_blood_pressure: bp,
                        max_heart_rate: mhr,
                        ..PatientInput::default()
                    };
                    let risk = calculate_risk(&input);
                    assert!((MIN_SCORE..=MAX_SCORE).contains(&risk));
                    assert_eq!(risk, round_to_hundredths(risk));
                }
            }
        }
    }

    #[test]
    fn test_blood_pressure_is_monotonic() {
        let mut previous = 0.0;
        for bp in (140..=260).step_by(5) {
            let input = PatientInput {
                resting_blood_pressure: bp as f64,
                age: 62.0,
                ..PatientInput::default()
            };
            let risk = calculate_risk(&input);
            assert!(risk >= previous, "score dropped at bp={}", bp);
            previous = risk;
        }
        assert_eq!(previous, MAX_SCORE);
    }

    #[test]
    fn test_identical_input_gives_identical_output() {
        let payload = json!({"age": 67, "trestbps": 145, "chol": 233, "cp": "Atypical angina"});
        assert_eq!(assess(&payload), assess(&payload));
    }
}
