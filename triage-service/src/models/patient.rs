use serde::{de, Deserialize, Deserializer, Serialize};
use validator::Validate;

/// Patient attributes submitted to `POST /recommend`.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct PatientInput {
    pub gender: String,
    #[serde(deserialize_with = "lax_integer")]
    #[validate(range(min = 0, max = 150, message = "Age must be between 0 and 150"))]
    pub age: i64,
    pub symptoms: Vec<String>,
}

impl PatientInput {
    /// Symptoms as a single `", "`-separated string, in submission order.
    pub fn symptoms_text(&self) -> String {
        self.symptoms.join(", ")
    }
}

/// Accept `34`, `34.0` and `"34"` as the integer 34; reject fractions and other text.
fn lax_integer<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lax {
        Int(i64),
        Float(f64),
        Text(String),
    }

    match Lax::deserialize(deserializer)? {
        Lax::Int(n) => Ok(n),
        Lax::Float(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
            Ok(f as i64)
        }
        Lax::Float(f) => Err(de::Error::custom(format!(
            "expected a whole number, got {}",
            f
        ))),
        Lax::Text(s) => s.trim().parse().map_err(|_| {
            de::Error::custom(format!("expected an integer, got \"{}\"", s))
        }),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TriageResponse {
    pub recommended_department: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: String,
}
