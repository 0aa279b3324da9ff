pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn error_body_shape() {
        let body = serde_json::to_value(types::ErrorBody::new("Not Found")).unwrap();
        assert_eq!(body, serde_json::json!({"error": "Not Found"}));
    }
}
