use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// JSON envelope returned by every API endpoint.
///
/// `code` mirrors the HTTP status code so clients that only look at the body
/// can still branch on it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { code: 200, message: "success".into(), data: Some(data) }
    }

    pub fn created(data: T) -> Self {
        Self { code: 201, message: "created".into(), data: Some(data) }
    }

    pub fn error(code: u16, message: impl Into<String>) -> Self {
        Self { code, message: message.into(), data: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_envelope_serializes_with_data() {
        let v = serde_json::to_value(ApiResponse::ok(vec![1, 2])).unwrap();
        assert_eq!(v["code"], 200);
        assert_eq!(v["message"], "success");
        assert_eq!(v["data"], serde_json::json!([1, 2]));
    }

    #[test]
    fn error_envelope_has_null_data() {
        let v = serde_json::to_value(ApiResponse::<()>::error(404, "product not found")).unwrap();
        assert_eq!(v["code"], 404);
        assert!(v["data"].is_null());
    }
}
