//! Flash alerts carried between requests in short-lived cookies.

use axum::http::StatusCode;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::CookieJar;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::middleware::expired_cookie;

const LEVEL_COOKIE: &str = "alert_level";
const MESSAGE_COOKIE: &str = "alert_msg";
const ALERT_MINUTES: i64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Success,
    Info,
    Warning,
    Danger,
}

impl AlertLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertLevel::Success => "success",
            AlertLevel::Info => "info",
            AlertLevel::Warning => "warning",
            AlertLevel::Danger => "danger",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "success" => Some(AlertLevel::Success),
            "info" => Some(AlertLevel::Info),
            "warning" => Some(AlertLevel::Warning),
            "danger" => Some(AlertLevel::Danger),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub level: AlertLevel,
    pub message: String,
}

impl Alert {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: AlertLevel::Success,
            message: message.into(),
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            level: AlertLevel::Danger,
            message: message.into(),
        }
    }
}

fn alert_cookie(name: &'static str, value: String) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .max_age(time::Duration::minutes(ALERT_MINUTES))
        .build()
}

/// Store an alert for the next request.
pub fn persist_alert(jar: CookieJar, alert: Alert) -> CookieJar {
    let message = URL_SAFE_NO_PAD.encode(alert.message.as_bytes());
    jar.add(alert_cookie(LEVEL_COOKIE, alert.level.as_str().to_string()))
        .add(alert_cookie(MESSAGE_COOKIE, message))
}

/// Read the pending alert and clear its cookies.
pub fn take_alert(jar: CookieJar) -> (CookieJar, Option<Alert>) {
    let alert = read_alert(&jar);
    let jar = jar
        .add(expired_cookie(LEVEL_COOKIE))
        .add(expired_cookie(MESSAGE_COOKIE));
    (jar, alert)
}

fn read_alert(jar: &CookieJar) -> Option<Alert> {
    let level = AlertLevel::parse(jar.get(LEVEL_COOKIE)?.value())?;
    let bytes = URL_SAFE_NO_PAD
        .decode(jar.get(MESSAGE_COOKIE)?.value())
        .ok()?;
    let message = String::from_utf8(bytes).ok()?;

    Some(Alert { level, message })
}

pub async fn get_alert(jar: CookieJar) -> (CookieJar, ApiSuccess<Option<Alert>>) {
    let (jar, alert) = take_alert(jar);
    (jar, ApiSuccess::new(StatusCode::OK, alert))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persisted_alert_reads_back() {
        let jar = persist_alert(
            CookieJar::new(),
            Alert::success("Welcome, your account is ready!"),
        );

        assert_eq!(
            read_alert(&jar),
            Some(Alert::success("Welcome, your account is ready!"))
        );
    }

    #[test]
    fn test_unknown_level_ignored() {
        let jar = CookieJar::new()
            .add(Cookie::new(LEVEL_COOKIE, "shout"))
            .add(Cookie::new(MESSAGE_COOKIE, URL_SAFE_NO_PAD.encode("hi")));

        assert_eq!(read_alert(&jar), None);
    }

    #[test]
    fn test_take_alert_clears_cookies() {
        let jar = persist_alert(CookieJar::new(), Alert::danger("Nope"));

        let (jar, alert) = take_alert(jar);

        assert_eq!(alert, Some(Alert::danger("Nope")));
        assert_eq!(jar.get(LEVEL_COOKIE).map(|c| c.value()), Some(""));
    }
}
