//! Bearer-token helpers for HTTP-level tests.
//!
//! Services resolve every bearer token to a live account, so tests sign real
//! tokens with [`TEST_JWT_SECRET`] and inject them as `Authorization` headers.

use axum::http::{HeaderMap, HeaderValue, header::AUTHORIZATION};
use uuid::Uuid;

use ritmofit_auth_types::token::issue_access_token;
use ritmofit_domain::user::Role;

/// Secret used by test app states and by [`MockAuth`] when signing tokens.
pub const TEST_JWT_SECRET: &str = "test-jwt-secret-for-unit-tests-only";

/// Configurable identity injected into test requests.
pub struct MockAuth {
    pub user_id: Uuid,
    pub role: Role,
}

impl MockAuth {
    pub fn new(user_id: Uuid, role: Role) -> Self {
        Self { user_id, role }
    }

    /// A signed bearer token for this identity, valid for one hour.
    pub fn token(&self) -> String {
        let (token, _) = issue_access_token(self.user_id, self.role, TEST_JWT_SECRET, 3600)
            .expect("sign test token");
        token
    }

    /// Return headers carrying `Authorization: Bearer <token>`.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.token())).unwrap(),
        );
        map
    }
}
