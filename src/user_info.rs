//! Fetching the authenticated user's profile.

use serde::{Deserialize, Serialize};

use crate::{
    config::{Config, UserInfoEndPoint},
    token::AccessToken,
};

/// Profile record returned by the user-info endpoint. An immutable snapshot
/// of the account at fetch time; persisting it is the caller's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub verified_email: bool,
    pub name: String,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub picture: Option<String>,
    pub locale: Option<String>,
    pub hd: Option<String>,
}

/// A bearer-authenticated GET against the user-info endpoint.
#[derive(Debug, Clone)]
pub struct UserInfoRequest {
    pub(crate) end_point: UserInfoEndPoint,
    pub(crate) access_token: AccessToken,
}

impl UserInfoRequest {
    pub fn new(config: &Config, access_token: &AccessToken) -> Self {
        Self {
            end_point: config.user_info_endpoint.to_owned(),
            access_token: access_token.to_owned(),
        }
    }

    pub fn end_point(&self) -> &str {
        &self.end_point.0
    }

    pub fn access_token(&self) -> &str {
        &self.access_token.0
    }
}

// ==========Tests==========
#[cfg(test)]
mod tests {
    use crate::{config::Config, token::AccessToken};

    use super::{UserInfo, UserInfoRequest};

    #[test]
    fn test_user_info_request_new() {
        let config = Config::builder()
            .user_info_endpoint("https://userinfo.example.com/me")
            .build();
        let request = UserInfoRequest::new(&config, &AccessToken::new("my_access_token"));

        assert_eq!(request.end_point(), "https://userinfo.example.com/me");
        assert_eq!(request.access_token(), "my_access_token");
    }

    #[test]
    fn test_user_info_deserialize() {
        let body = r#"{
            "id": "1234567890",
            "email": "user@example.com",
            "verified_email": true,
            "name": "Test User",
            "given_name": "Test",
            "family_name": "User",
            "picture": "https://picture.example.com/p.png"
        }"#;
        let user: UserInfo = serde_json::from_str(body).unwrap();

        assert_eq!(user.id, "1234567890");
        assert_eq!(user.email, "user@example.com");
        assert!(user.verified_email);
        assert_eq!(user.name, "Test User");
        assert!(user.locale.is_none());
        assert!(user.hd.is_none());
    }
}
