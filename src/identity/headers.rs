use axum::http::HeaderMap;

use super::subject::SubjectId;

/// Identity headers in trust order. Earlier names win even when a later header
/// arrived first on the wire.
pub const IDENTITY_HEADERS: [&str; 3] = ["x-user-id", "x-userid", "x-factory-user-id"];

/// Values carried by one header name, as the transport presented them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderCandidates<'a> {
    Single(Option<&'a str>),
    Multiple(Vec<Option<&'a str>>),
}

impl<'a> HeaderCandidates<'a> {
    /// Collect every occurrence of `name`. Values that are not visible ASCII text
    /// become `None` so they are skipped like any other non-string candidate.
    pub fn collect(headers: &'a HeaderMap, name: &str) -> Option<Self> {
        let mut values: Vec<Option<&'a str>> = headers
            .get_all(name)
            .iter()
            .map(|v| v.to_str().ok())
            .collect();

        match values.len() {
            0 => None,
            1 => Some(Self::Single(values.remove(0))),
            _ => Some(Self::Multiple(values)),
        }
    }

    /// Flatten into received order.
    pub fn into_ordered(self) -> Vec<Option<&'a str>> {
        match self {
            Self::Single(value) => vec![value],
            Self::Multiple(values) => values,
        }
    }
}

/// First header value that normalizes, probing names in [`IDENTITY_HEADERS`] order.
pub fn read_headers(headers: &HeaderMap) -> Option<SubjectId> {
    IDENTITY_HEADERS.iter().find_map(|name| {
        HeaderCandidates::collect(headers, name)?
            .into_ordered()
            .into_iter()
            .flatten()
            .find_map(SubjectId::normalize)
    })
}
