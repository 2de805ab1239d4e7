//! Identity claims carried by access tokens.

use std::fmt;
use std::str::FromStr;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::AppError;

/// Closed set of subject roles. Attached at account creation and carried
/// unchanged inside every token issued to that subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Doctor,
    Receptionist,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Doctor => "doctor",
            Role::Receptionist => "receptionist",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    /// Exact, case-sensitive match only.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "doctor" => Ok(Role::Doctor),
            "receptionist" => Ok(Role::Receptionist),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

/// Claims verified by the token gate and attached to request extensions.
///
/// The expiry is stripped during verification; it has already served its
/// purpose and downstream code must not depend on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject identifier (users.user_id)
    pub sub: String,
    pub role: Role,
}

/// Read the claims the token gate attached to this request.
///
/// Fails closed: if the gate never ran for this route (configuration or
/// routing bug), handlers relying on this accessor reject the request.
pub fn extract_claims(req: &HttpRequest) -> Result<AccessClaims, AppError> {
    req.extensions().get::<AccessClaims>().cloned().ok_or_else(|| {
        warn!(
            path = %req.path(),
            "handler ran without verified claims; route should be behind the token gate"
        );
        AppError::unauthorized()
    })
}

impl FromRequest for AccessClaims {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract_claims(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_str() {
        assert_eq!("doctor".parse::<Role>().unwrap(), Role::Doctor);
        assert_eq!("receptionist".parse::<Role>().unwrap(), Role::Receptionist);
        assert_eq!(Role::Doctor.as_str(), "doctor");
        assert_eq!(Role::Receptionist.to_string(), "receptionist");
    }

    #[test]
    fn role_match_is_case_sensitive() {
        assert!("Doctor".parse::<Role>().is_err());
        assert!("RECEPTIONIST".parse::<Role>().is_err());
        assert!("nurse".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn role_serializes_as_lowercase_string() {
        assert_eq!(serde_json::to_string(&Role::Doctor).unwrap(), "\"doctor\"");
        let role: Role = serde_json::from_str("\"receptionist\"").unwrap();
        assert_eq!(role, Role::Receptionist);
    }
}
