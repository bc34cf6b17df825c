use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The administrator behind a valid session cookie
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AdminIdentity {
    pub username: String,
}
