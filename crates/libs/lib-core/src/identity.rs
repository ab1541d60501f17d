//! Best-effort user correlation from the cached bearer credential.

use crate::store::{KeyValueStore, CREDENTIAL_KEY};
use crate::INTERNAL_TARGET;

/// Subject of the credential cached under [`CREDENTIAL_KEY`], if any.
///
/// Read on every call so a credential rotated mid-session shows up on the
/// next record. Missing, unreadable or malformed credentials all yield `None`.
pub fn extract_user_id(store: &dyn KeyValueStore) -> Option<String> {
    let token = match store.get(CREDENTIAL_KEY) {
        Ok(Some(token)) => token,
        Ok(None) => return None,
        Err(e) => {
            tracing::debug!(target: INTERNAL_TARGET, error = %e, "Credential lookup failed");
            return None;
        }
    };

    match lib_auth::user_id_from_token(&token) {
        Ok(user_id) => user_id,
        Err(e) => {
            tracing::debug!(target: INTERNAL_TARGET, error = %e, "Ignoring unreadable credential");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use lib_utils::b64u_encode;

    fn token_for(payload: &str) -> String {
        format!("eyJhbGciOiJIUzI1NiJ9.{}.sig", b64u_encode(payload))
    }

    #[test]
    fn test_absent_credential() {
        assert_eq!(extract_user_id(&MemoryStore::new()), None);
    }

    #[test]
    fn test_reads_subject() {
        let store = MemoryStore::new();
        store.set(CREDENTIAL_KEY, &token_for(r#"{"sub":"user-9"}"#)).unwrap();
        assert_eq!(extract_user_id(&store), Some("user-9".to_string()));
    }

    #[test]
    fn test_numeric_subject_and_missing_subject() {
        let store = MemoryStore::new();
        store.set(CREDENTIAL_KEY, &token_for(r#"{"sub":1042}"#)).unwrap();
        assert_eq!(extract_user_id(&store), Some("1042".to_string()));

        store.set(CREDENTIAL_KEY, &token_for(r#"{"username":"sam"}"#)).unwrap();
        assert_eq!(extract_user_id(&store), None);
    }

    #[test]
    fn test_malformed_credential_is_absent() {
        let store = MemoryStore::new();
        for bad in ["garbage", "a.%%%.c", "", "a.b"] {
            store.set(CREDENTIAL_KEY, bad).unwrap();
            assert_eq!(extract_user_id(&store), None, "credential {bad:?}");
        }
    }
}
