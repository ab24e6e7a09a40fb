use serde::{Deserialize, Serialize};

/// Access level asserted by the token's `role` claim.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[serde(alias = "ADMIN")]
    Admin,
    #[serde(alias = "FELDSHER", alias = "DISTRICT_DOCTOR", alias = "district_doctor")]
    Feldsher,
    #[serde(alias = "SURGEON")]
    Surgeon,
    #[serde(alias = "PATIENT")]
    Patient,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::Feldsher, Role::Surgeon, Role::Patient];

    /// Default page a user of this role lands on.
    pub fn landing_path(self) -> &'static str {
        match self {
            Role::Admin | Role::Feldsher | Role::Surgeon => "/app/dashboard",
            Role::Patient => "/patient",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Feldsher => "feldsher",
            Role::Surgeon => "surgeon",
            Role::Patient => "patient",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::Feldsher => "Feldsher",
            Role::Surgeon => "Surgeon",
            Role::Patient => "Patient",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token payload. Decoded client-side only, never verified.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject; the backend puts the user's email here.
    pub sub: String,
    pub role: Role,
    #[serde(default)]
    pub exp: i64,
    #[serde(default)]
    pub iat: Option<i64>,
}

/// What the UI learns about the signed-in user from the token alone.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SessionInfo {
    pub subject: String,
    pub role: Role,
    pub expires_at: i64,
    pub landing: String,
}

impl From<Claims> for SessionInfo {
    fn from(claims: Claims) -> Self {
        Self {
            landing: claims.role.landing_path().to_string(),
            subject: claims.sub,
            role: claims.role,
            expires_at: claims.exp,
        }
    }
}

/// `/auth/me` response.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CurrentUser {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    #[serde(default)]
    pub organization_id: Option<i64>,
}

/// `/auth/login` response.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".into()
}

/// Returned to the browser after a successful sign-in.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LoginOutcome {
    pub access_token: String,
    pub landing: String,
}
