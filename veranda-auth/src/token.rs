// OAuth token model

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// An OAuth token pair with its expiry metadata, as issued by the vendor's
/// token endpoint.
///
/// Expiries are lifetimes in seconds counted from `issued_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OAuthToken {
    pub access_token: String,
    pub access_expiry: i64,
    pub refresh_token: String,
    pub refresh_expiry: i64,
    pub token_type: String,
    pub user: String,
    pub issued_at: DateTime<Utc>,
}

impl OAuthToken {
    /// True while the access token can still be used for an upstream call
    pub fn is_access_valid(&self, now: DateTime<Utc>) -> bool {
        self.issued_at + Duration::seconds(self.access_expiry) > now
    }

    /// True while the refresh token is still accepted by the vendor
    pub fn is_refresh_valid(&self, now: DateTime<Utc>) -> bool {
        self.issued_at + Duration::seconds(self.refresh_expiry) > now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(issued_at: DateTime<Utc>) -> OAuthToken {
        OAuthToken {
            access_token: "aaa".to_string(),
            access_expiry: 3600,
            refresh_token: "rrr".to_string(),
            refresh_expiry: 86400,
            token_type: "Bearer".to_string(),
            user: "ops@example.com".to_string(),
            issued_at,
        }
    }

    #[test]
    fn test_fresh_token_is_valid() {
        let now = Utc::now();
        assert!(token(now).is_access_valid(now));
    }

    #[test]
    fn test_token_expires_after_lifetime() {
        let issued = Utc::now();
        let token = token(issued);

        assert!(token.is_access_valid(issued + Duration::seconds(3599)));
        assert!(!token.is_access_valid(issued + Duration::seconds(3600)));
        assert!(!token.is_access_valid(issued + Duration::seconds(7200)));
    }

    #[test]
    fn test_refresh_outlives_access() {
        let issued = Utc::now();
        let token = token(issued);
        let later = issued + Duration::seconds(7200);

        assert!(!token.is_access_valid(later));
        assert!(token.is_refresh_valid(later));
    }

    #[test]
    fn test_serde_roundtrip() {
        let original = token(Utc::now());
        let json = serde_json::to_string(&original).unwrap();
        let restored: OAuthToken = serde_json::from_str(&json).unwrap();
        assert_eq!(original, restored);
    }
}
