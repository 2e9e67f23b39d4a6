//! Cookie transport for access and refresh tokens

use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use chrono::{DateTime, Utc};
use kg_core::domain::entities::token::{IssuedToken, TokenPair};
use kg_shared::config::CookieConfig;

pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";
/// Readable by client scripts; carries no authority
pub const LOGGED_IN_COOKIE: &str = "logged_in";

/// Attributes shared by every cookie the API sets
#[derive(Debug, Clone)]
pub struct CookieSettings {
    domain: Option<String>,
    secure: bool,
    same_site: SameSite,
}

impl Default for CookieSettings {
    fn default() -> Self {
        Self::from_config(&CookieConfig::default())
    }
}

impl CookieSettings {
    pub fn from_config(config: &CookieConfig) -> Self {
        let same_site = match config.same_site.to_ascii_lowercase().as_str() {
            "strict" => SameSite::Strict,
            "none" => SameSite::None,
            _ => SameSite::Lax,
        };

        Self {
            domain: config.domain.clone(),
            // Browsers drop SameSite=None cookies that are not Secure
            secure: config.secure || same_site == SameSite::None,
            same_site,
        }
    }

    /// Cookies for a freshly issued pair, each living as long as its token
    pub fn issue(&self, tokens: &TokenPair, now: DateTime<Utc>) -> Vec<Cookie<'static>> {
        let access_age = max_age(&tokens.access, now);
        vec![
            self.build(ACCESS_TOKEN_COOKIE, tokens.access.token.clone(), true, access_age),
            self.build(
                REFRESH_TOKEN_COOKIE,
                tokens.refresh.token.clone(),
                true,
                max_age(&tokens.refresh, now),
            ),
            self.build(LOGGED_IN_COOKIE, "true".to_string(), false, access_age),
        ]
    }

    /// Expired replacements for all session cookies
    pub fn clear(&self) -> Vec<Cookie<'static>> {
        let expired = CookieDuration::seconds(-1);
        vec![
            self.build(ACCESS_TOKEN_COOKIE, String::new(), true, expired),
            self.build(REFRESH_TOKEN_COOKIE, String::new(), true, expired),
            self.build(LOGGED_IN_COOKIE, String::new(), false, expired),
        ]
    }

    fn build(
        &self,
        name: &'static str,
        value: String,
        http_only: bool,
        max_age: CookieDuration,
    ) -> Cookie<'static> {
        let mut builder = Cookie::build(name, value)
            .path("/")
            .http_only(http_only)
            .secure(self.secure)
            .same_site(self.same_site)
            .max_age(max_age);

        if let Some(domain) = &self.domain {
            builder = builder.domain(domain.clone());
        }

        builder.finish()
    }
}

fn max_age(token: &IssuedToken, now: DateTime<Utc>) -> CookieDuration {
    CookieDuration::seconds((token.expires_at - now).num_seconds().max(0))
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use uuid::Uuid;

    use super::*;

    fn pair(now: DateTime<Utc>) -> TokenPair {
        TokenPair {
            access: IssuedToken {
                token: "access-jwt".to_string(),
                session_id: Uuid::new_v4(),
                expires_at: now + Duration::minutes(15),
            },
            refresh: IssuedToken {
                token: "refresh-jwt".to_string(),
                session_id: Uuid::new_v4(),
                expires_at: now + Duration::days(7),
            },
        }
    }

    #[test]
    fn test_issue_sets_three_cookies() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let cookies = CookieSettings::default().issue(&pair(now), now);

        let access = &cookies[0];
        assert_eq!(access.name(), ACCESS_TOKEN_COOKIE);
        assert_eq!(access.value(), "access-jwt");
        assert_eq!(access.path(), Some("/"));
        assert_eq!(access.http_only(), Some(true));
        assert_eq!(access.max_age(), Some(CookieDuration::seconds(900)));

        let refresh = &cookies[1];
        assert_eq!(refresh.name(), REFRESH_TOKEN_COOKIE);
        assert_eq!(refresh.max_age(), Some(CookieDuration::seconds(604_800)));

        let flag = &cookies[2];
        assert_eq!(flag.name(), LOGGED_IN_COOKIE);
        assert_eq!(flag.value(), "true");
        assert_eq!(flag.http_only(), Some(false));
    }

    #[test]
    fn test_clear_uses_negative_max_age() {
        for cookie in CookieSettings::default().clear() {
            assert_eq!(cookie.value(), "");
            assert_eq!(cookie.max_age(), Some(CookieDuration::seconds(-1)));
        }
    }

    #[test]
    fn test_same_site_none_forces_secure() {
        let config = CookieConfig {
            domain: Some("example.com".to_string()),
            secure: false,
            same_site: "None".to_string(),
        };
        let now = Utc::now();
        let cookie = CookieSettings::from_config(&config)
            .issue(&pair(now), now)
            .remove(0);

        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::None));
        assert_eq!(cookie.domain(), Some("example.com"));
    }
}
