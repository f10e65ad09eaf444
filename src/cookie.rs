//! Theme cookie codec and the cookie store seam.
//!
//! Reading works on the `document.cookie` view (`a=1; b=2`), writing produces
//! one `Set-Cookie`-style assignment per call, exactly what a browser accepts
//! through `document.cookie = ...`.

use chrono::{DateTime, Duration, Utc};
use cookie::{Cookie, SameSite};
use time::OffsetDateTime;

use crate::error::Result;

/// Latest expiry ever written: 9999-12-31T23:59:59Z.
pub const MAX_EXPIRY_TIMESTAMP: i64 = 253_402_300_799;

/// Access to the page's cookie jar.
pub trait CookieStore {
    /// Current cookies as a `name=value; name=value` header.
    fn read(&self) -> Result<String>;

    /// Apply a single serialized assignment.
    fn write(&mut self, assignment: &str) -> Result<()>;
}

/// Look up `name` in a `document.cookie` style header. The first match wins.
pub fn find_cookie(header: &str, name: &str) -> Option<String> {
    Cookie::split_parse(header)
        .filter_map(|c| c.ok())
        .find(|c| c.name() == name)
        .map(|c| c.value().to_string())
}

/// Expiry `ttl_days` after `now`, clamped to `[epoch, MAX_EXPIRY_TIMESTAMP]`.
///
/// Out-of-range TTLs saturate instead of failing: a huge TTL keeps the cookie
/// as long as a browser can represent, a hugely negative one deletes it.
pub fn expiry_after(now: DateTime<Utc>, ttl_days: i64) -> OffsetDateTime {
    let saturated = if ttl_days < 0 { 0 } else { MAX_EXPIRY_TIMESTAMP };
    let timestamp = Duration::try_days(ttl_days)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .map_or(saturated, |at| at.timestamp())
        .clamp(0, MAX_EXPIRY_TIMESTAMP);
    OffsetDateTime::from_unix_timestamp(timestamp).unwrap_or(OffsetDateTime::UNIX_EPOCH)
}

/// Site-wide strict theme cookie expiring `ttl_days` after `now`.
///
/// A negative TTL yields an expiry in the past, which deletes the cookie.
pub fn theme_cookie(
    name: &str,
    value: &str,
    path: &str,
    ttl_days: i64,
    now: DateTime<Utc>,
) -> Cookie<'static> {
    Cookie::build((name.to_string(), value.to_string()))
        .path(path.to_string())
        .same_site(SameSite::Strict)
        .expires(expiry_after(now, ttl_days))
        .build()
}

/// Absolute expiry of a parsed cookie as seen at `now`.
///
/// `Max-Age` wins over `Expires`, as in browsers; `None` means a session cookie.
pub fn cookie_expiry(cookie: &Cookie<'_>, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    if let Some(max_age) = cookie.max_age() {
        let seconds = max_age.whole_seconds();
        return Some(
            Duration::try_seconds(seconds)
                .and_then(|age| now.checked_add_signed(age))
                .unwrap_or(if seconds < 0 {
                    DateTime::<Utc>::MIN_UTC
                } else {
                    DateTime::<Utc>::MAX_UTC
                }),
        );
    }
    cookie
        .expires_datetime()
        .and_then(|at| DateTime::from_timestamp(at.unix_timestamp(), 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 20, 34, 0).unwrap()
    }

    #[test]
    fn finds_cookie_at_any_position() {
        assert_eq!(find_cookie("theme=dark", "theme").as_deref(), Some("dark"));
        assert_eq!(
            find_cookie("sid=abc; theme=light", "theme").as_deref(),
            Some("light")
        );
        assert_eq!(
            find_cookie("theme=dark; sid=abc", "theme").as_deref(),
            Some("dark")
        );
        assert_eq!(find_cookie("", "theme"), None);
    }

    #[test]
    fn does_not_match_name_suffixes() {
        assert_eq!(find_cookie("mytheme=dark", "theme"), None);
        assert_eq!(
            find_cookie("mytheme=dark; theme=light", "theme").as_deref(),
            Some("light")
        );
    }

    #[test]
    fn skips_malformed_pairs() {
        assert_eq!(
            find_cookie("garbage; =x; theme=dark", "theme").as_deref(),
            Some("dark")
        );
    }

    #[test]
    fn theme_cookie_carries_browser_attributes() {
        let rendered = theme_cookie("theme", "dark", "/", 1, fixed_now()).to_string();
        let parsed = Cookie::parse(rendered.clone()).expect("rendered cookie should parse");

        assert_eq!(parsed.name(), "theme");
        assert_eq!(parsed.value(), "dark");
        assert_eq!(parsed.path(), Some("/"));
        assert_eq!(parsed.same_site(), Some(SameSite::Strict));
        assert!(
            rendered.contains("Expires=Mon, 19 Oct 2026 20:34:00 GMT"),
            "unexpected expiry in {}",
            rendered
        );
    }

    #[test]
    fn expiry_round_trips_through_parse() {
        let rendered = theme_cookie("theme", "dark", "/", 1, fixed_now()).to_string();
        let parsed = Cookie::parse(rendered).unwrap();
        assert_eq!(
            cookie_expiry(&parsed, fixed_now()),
            Some(fixed_now() + Duration::days(1))
        );
    }

    #[test]
    fn negative_ttl_expires_in_the_past() {
        let expiry = expiry_after(fixed_now(), -1);
        assert!(expiry.unix_timestamp() < fixed_now().timestamp());
    }

    #[test]
    fn huge_ttls_saturate_instead_of_panicking() {
        assert_eq!(
            expiry_after(fixed_now(), i64::MAX).unix_timestamp(),
            MAX_EXPIRY_TIMESTAMP
        );
        assert_eq!(
            expiry_after(fixed_now(), 9_000_000_000_000).unix_timestamp(),
            MAX_EXPIRY_TIMESTAMP
        );
        assert_eq!(expiry_after(fixed_now(), i64::MIN).unix_timestamp(), 0);
    }

    #[test]
    fn max_age_overrides_expires() {
        let parsed = Cookie::parse("theme=dark; Max-Age=60; Expires=Mon, 19 Oct 2026 20:34:00 GMT")
            .unwrap();
        assert_eq!(
            cookie_expiry(&parsed, fixed_now()),
            Some(fixed_now() + Duration::seconds(60))
        );
    }

    #[test]
    fn session_cookie_has_no_expiry() {
        let parsed = Cookie::parse("theme=dark; Path=/").unwrap();
        assert_eq!(cookie_expiry(&parsed, fixed_now()), None);
    }
}
