use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::context::Role;

#[derive(Debug, Serialize, Deserialize)]
pub struct JwtHeader {
    pub alg: String,
    pub typ: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    pub sid: Uuid,
    pub name: String,
    pub role: Role,
    pub exp: Option<u64>,
    pub iat: Option<u64>,
}

/// The authenticated caller, attached to requests by the auth middleware.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub session_id: Uuid,
}

impl User {
    pub fn is_agent(&self) -> bool {
        self.role == Role::Agent
    }

    pub fn is_patient(&self) -> bool {
        self.role == Role::Patient
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub valid: bool,
    pub user_id: String,
    pub role: Role,
    pub session_id: Uuid,
}
