//! Bearer credential verification for HTTP handlers.
//!
//! Tokens are HS256 JWTs carrying the caller's user id and role. Issuance
//! is out of scope for this service; handlers only verify and extract. The
//! verification secret comes from the server bootstrap.

use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, FromRequest, HttpRequest};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ids::UserId;
use crate::domain::user::{Role, Viewer};
use crate::domain::Error;

/// JWT claims accepted by this service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the caller's user id.
    pub sub: Uuid,
    /// Caller role.
    pub role: Role,
    /// Expiry as a Unix timestamp.
    pub exp: u64,
}

/// Verifies bearer tokens against the configured secret.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding: DecodingKey,
    encoding: EncodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// Build a verifier from a shared HS256 secret.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            decoding: DecodingKey::from_secret(secret),
            encoding: EncodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Verify a bearer token and return its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, Error> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| Error::unauthorized("Invalid or expired token"))
    }

    /// Sign a token for the given claims.
    ///
    /// Kept for tests and operational tooling; the service itself never
    /// issues credentials.
    pub fn issue(&self, claims: &Claims) -> Result<String, Error> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|err| Error::internal(format!("failed to sign token: {err}")))
    }
}

/// The verified caller, extracted from the `Authorization` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    /// The caller's user id.
    pub user_id: UserId,
    /// The caller's role.
    pub role: Role,
}

impl Identity {
    /// The caller as a domain viewer.
    pub fn viewer(&self) -> Viewer {
        Viewer {
            user_id: self.user_id,
            role: self.role,
        }
    }

    /// Whether the caller holds the admin role.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Refuse non-admin callers.
    pub fn require_admin(&self) -> Result<(), Error> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(Error::forbidden("Admin access required"))
        }
    }
}

fn bearer_token(req: &HttpRequest) -> Result<&str, Error> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("Missing Authorization header"))?;
    let value = header
        .to_str()
        .map_err(|_| Error::unauthorized("Malformed Authorization header"))?;
    value
        .strip_prefix("Bearer ")
        .ok_or_else(|| Error::unauthorized("Expected a bearer token"))
}

fn identity_from_request(req: &HttpRequest) -> Result<Identity, Error> {
    let verifier = req
        .app_data::<web::Data<TokenVerifier>>()
        .ok_or_else(|| Error::internal("token verifier not configured"))?;
    let claims = verifier.verify(bearer_token(req)?)?;
    Ok(Identity {
        user_id: UserId::from_uuid(claims.sub),
        role: claims.role,
    })
}

impl FromRequest for Identity {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(identity_from_request(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn expiry(offset_secs: i64) -> u64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock after epoch")
            .as_secs();
        now.saturating_add_signed(offset_secs)
    }

    fn verifier() -> TokenVerifier {
        TokenVerifier::new(b"test-secret")
    }

    #[test]
    fn verify_round_trips_issued_claims() {
        let verifier = verifier();
        let user_id = Uuid::new_v4();
        let token = verifier
            .issue(&Claims {
                sub: user_id,
                role: Role::Student,
                exp: expiry(3600),
            })
            .expect("issue token");
        let claims = verifier.verify(&token).expect("verify token");
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.role, Role::Student);
    }

    #[test]
    fn expired_token_is_rejected() {
        let verifier = verifier();
        let token = verifier
            .issue(&Claims {
                sub: Uuid::new_v4(),
                role: Role::Admin,
                exp: expiry(-3600),
            })
            .expect("issue token");
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = TokenVerifier::new(b"other-secret")
            .issue(&Claims {
                sub: Uuid::new_v4(),
                role: Role::Admin,
                exp: expiry(3600),
            })
            .expect("issue token");
        assert!(verifier().verify(&token).is_err());
    }

    #[actix_web::test]
    async fn extraction_requires_a_bearer_header() {
        let req = TestRequest::default()
            .app_data(web::Data::new(verifier()))
            .to_http_request();
        let err = identity_from_request(&req).expect_err("no header");
        assert_eq!(err.code(), crate::domain::ErrorCode::Unauthorized);
    }

    #[actix_web::test]
    async fn extraction_parses_a_valid_token() {
        let verifier = verifier();
        let user_id = Uuid::new_v4();
        let token = verifier
            .issue(&Claims {
                sub: user_id,
                role: Role::Admin,
                exp: expiry(3600),
            })
            .expect("issue token");
        let req = TestRequest::default()
            .app_data(web::Data::new(verifier))
            .insert_header((AUTHORIZATION, format!("Bearer {token}")))
            .to_http_request();
        let identity = identity_from_request(&req).expect("identity");
        assert_eq!(identity.user_id.as_uuid(), user_id);
        assert!(identity.is_admin());
    }

    #[test]
    fn require_admin_refuses_students() {
        let identity = Identity {
            user_id: UserId::random(),
            role: Role::Student,
        };
        let err = identity.require_admin().expect_err("student");
        assert_eq!(err.code(), crate::domain::ErrorCode::Forbidden);
    }
}
