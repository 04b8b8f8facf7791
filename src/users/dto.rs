use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Request body for `POST /register`, JSON or form-encoded.
///
/// Every field is optional on the wire; presence is checked by validation.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    #[serde(default, deserialize_with = "text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub password: Option<String>,
}

/// Body of every `/register` response.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub success: bool,
    pub message: String,
}

impl StatusResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

// Strings and non-zero numbers count as text (a phone sent as 5551234); zero and
// everything else is absent.
fn text<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(de)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_null_fields_are_none() {
        let req: RegisterRequest =
            serde_json::from_str(r#"{"name":"Ann","email":null}"#).unwrap();
        assert_eq!(req.name.as_deref(), Some("Ann"));
        assert!(req.email.is_none());
        assert!(req.phone.is_none());
        assert!(req.password.is_none());
    }

    #[test]
    fn numeric_phone_is_text() {
        let req: RegisterRequest = serde_json::from_str(r#"{"phone":5551234}"#).unwrap();
        assert_eq!(req.phone.as_deref(), Some("5551234"));
    }

    #[test]
    fn numeric_zero_is_absent() {
        let req: RegisterRequest =
            serde_json::from_str(r#"{"phone":0,"password":0.0,"name":-0}"#).unwrap();
        assert!(req.phone.is_none());
        assert!(req.password.is_none());
        assert!(req.name.is_none());
    }

    #[test]
    fn non_scalar_values_are_absent() {
        let req: RegisterRequest =
            serde_json::from_str(r#"{"name":["Ann"],"password":{"x":1},"phone":true}"#).unwrap();
        assert!(req.name.is_none());
        assert!(req.password.is_none());
        assert!(req.phone.is_none());
    }

    #[test]
    fn status_response_shape() {
        let json = serde_json::to_value(StatusResponse::failure("Provide valid name")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": false, "message": "Provide valid name"})
        );
    }
}
