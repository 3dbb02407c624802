use std::borrow::Cow;

use axum::http::{header::COOKIE, HeaderMap};

use super::subject::SubjectId;

/// The single cookie consulted for identity.
pub const IDENTITY_COOKIE: &str = "factory_user_id";

/// Raw cookie string for the request. Several `Cookie` lines are joined with `"; "`
/// the same way HTTP/2 splits them apart. Non-ASCII bytes are decoded lossily so an
/// unrelated cookie cannot hide the identity cookie sharing its line.
pub fn cookie_header(headers: &HeaderMap) -> Option<String> {
    let lines: Vec<Cow<'_, str>> = headers
        .get_all(COOKIE)
        .iter()
        .map(|v| String::from_utf8_lossy(v.as_bytes()))
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("; "))
    }
}

/// Trimmed raw value of the first `name=value` pair named `name`.
/// Pairs without `=` or with an empty name never match.
pub fn find_cookie<'a>(raw: &'a str, name: &str) -> Option<&'a str> {
    raw.split(';').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        let key = key.trim();
        if key.is_empty() || key != name {
            return None;
        }
        Some(value.trim())
    })
}

/// Strict percent-decoding: any `%` not followed by two hex digits, or a decoded
/// byte sequence that is not UTF-8, is an error.
fn percent_decode(raw: &str) -> Option<Cow<'_, str>> {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let well_formed = bytes
                .get(i + 1..i + 3)
                .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
            if !well_formed {
                return None;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    urlencoding::decode(raw).ok()
}

/// Identity from the `factory_user_id` cookie, falling back to the undecoded value
/// when percent-decoding fails.
pub fn read_cookies(raw_cookie: Option<&str>) -> Option<SubjectId> {
    let value = find_cookie(raw_cookie?, IDENTITY_COOKIE)?;
    match percent_decode(value) {
        Some(decoded) => SubjectId::normalize(&decoded),
        None => SubjectId::normalize(value),
    }
}
