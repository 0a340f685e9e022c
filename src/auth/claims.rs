use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Access-token payload as the hosted auth service issues it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,               // user ID
    pub exp: usize,              // expires at (unix timestamp)
    pub aud: String,             // audience
    #[serde(default)]
    pub iss: Option<String>,     // issuer
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}
