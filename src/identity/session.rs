use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::subject::SubjectId;

/// Read-only view of an already-authenticated session attached to a request.
///
/// Any session representation can take part in identity resolution as long as it
/// can hand out its `id`, `sub` and `userId` fields as untyped values.
pub trait SessionClaims {
    fn id(&self) -> Option<&Value>;
    fn sub(&self) -> Option<&Value>;
    fn user_id(&self) -> Option<&Value>;
}

/// Session object attached to request extensions by the bearer-session layer
/// (or by any upstream middleware that authenticates the caller).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<Value>,
    #[serde(default, rename = "userId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Value>,
}

impl SessionClaims for SessionUser {
    fn id(&self) -> Option<&Value> {
        self.id.as_ref()
    }

    fn sub(&self) -> Option<&Value> {
        self.sub.as_ref()
    }

    fn user_id(&self) -> Option<&Value> {
        self.user_id.as_ref()
    }
}

impl SessionClaims for Map<String, Value> {
    fn id(&self) -> Option<&Value> {
        self.get("id")
    }

    fn sub(&self) -> Option<&Value> {
        self.get("sub")
    }

    fn user_id(&self) -> Option<&Value> {
        self.get("userId")
    }
}

impl SessionClaims for Value {
    fn id(&self) -> Option<&Value> {
        self.as_object().and_then(|o| o.id())
    }

    fn sub(&self) -> Option<&Value> {
        self.as_object().and_then(|o| o.sub())
    }

    fn user_id(&self) -> Option<&Value> {
        self.as_object().and_then(|o| o.user_id())
    }
}

/// Probe `id`, `sub`, then `userId`; first field that normalizes wins.
pub fn read_session(session: Option<&dyn SessionClaims>) -> Option<SubjectId> {
    let session = session?;
    [session.id(), session.sub(), session.user_id()]
        .into_iter()
        .flatten()
        .find_map(SubjectId::from_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn read(value: Value) -> Option<String> {
        read_session(Some(&value)).map(SubjectId::into_inner)
    }

    #[test]
    fn no_session_is_absent() {
        assert_eq!(read_session(None), None);
    }

    #[test]
    fn id_takes_precedence_over_sub_and_user_id() {
        let found = read(json!({"id": "by-id", "sub": "by-sub", "userId": "by-user-id"}));
        assert_eq!(found.as_deref(), Some("by-id"));
    }

    #[test]
    fn falls_through_invalid_fields_in_order() {
        let found = read(json!({"id": "no spaces allowed", "sub": "x", "userId": "legacy_7"}));
        assert_eq!(found.as_deref(), Some("legacy_7"));

        let found = read(json!({"sub": "oidc|abc", "userId": "legacy_7"}));
        assert_eq!(found.as_deref(), Some("legacy_7"));

        let found = read(json!({"sub": " oidc:abc "}));
        assert_eq!(found.as_deref(), Some("oidc:abc"));
    }

    #[test]
    fn numeric_id_is_not_coerced() {
        assert_eq!(read(json!({"id": 12345})), None);
        assert_eq!(read(json!({"id": 12345, "sub": "subject-1"})).as_deref(), Some("subject-1"));
    }

    #[test]
    fn non_object_session_yields_nothing() {
        assert_eq!(read(json!("user-1")), None);
        assert_eq!(read(json!(null)), None);
    }

    #[test]
    fn session_user_deserializes_camel_case_user_id() {
        let user: SessionUser = serde_json::from_value(json!({"userId": "legacy-9"})).unwrap();
        assert_eq!(user.user_id, Some(json!("legacy-9")));
        assert_eq!(
            read_session(Some(&user)).map(SubjectId::into_inner).as_deref(),
            Some("legacy-9")
        );
    }
}
