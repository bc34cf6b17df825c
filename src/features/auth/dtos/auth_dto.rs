use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request DTO for admin login
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequestDto {
    #[validate(length(min = 1, message = "اسم المستخدم مطلوب"))]
    #[serde(default)]
    pub username: String,

    #[validate(length(min = 1, message = "كلمة المرور مطلوبة"))]
    #[serde(default)]
    pub password: String,
}

/// Whether the caller currently holds an admin session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthStatusDto {
    pub is_admin: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_requires_both_fields() {
        let dto: LoginRequestDto = serde_json::from_str(r#"{"username": "admin"}"#).unwrap();
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
        assert!(!errors.field_errors().contains_key("username"));
    }

    #[test]
    fn test_status_is_camel_case() {
        let value = serde_json::to_value(AuthStatusDto { is_admin: true }).unwrap();
        assert_eq!(value, serde_json::json!({"isAdmin": true}));
    }
}
