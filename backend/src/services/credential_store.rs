use std::collections::HashMap;
use std::sync::Mutex;

/// Per-session ordered API key lists. The search pipeline never reads this
/// store; the request shell resolves a session's list and passes it down.
pub struct CredentialStore {
    sessions: Mutex<HashMap<String, Vec<String>>>,
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStore {
    pub fn new() -> Self {
        CredentialStore {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Replaces the session's list wholesale; an empty list clears the entry.
    pub fn replace(&self, session_id: &str, keys: Vec<String>) {
        if let Ok(mut sessions) = self.sessions.lock() {
            if keys.is_empty() {
                sessions.remove(session_id);
            } else {
                sessions.insert(session_id.to_string(), keys);
            }
        }
    }

    pub fn credentials_for(&self, session_id: &str) -> Vec<String> {
        if let Ok(sessions) = self.sessions.lock() {
            sessions.get(session_id).cloned().unwrap_or_default()
        } else {
            Vec::new()
        }
    }

    pub fn count(&self, session_id: &str) -> usize {
        if let Ok(sessions) = self.sessions.lock() {
            sessions.get(session_id).map(Vec::len).unwrap_or(0)
        } else {
            0
        }
    }
}

/// Splits a pasted blob of keys on commas, whitespace and newlines, keeping
/// the order the user wrote them in. Order is trial order during rotation.
pub fn parse_credential_list(input: &str) -> Vec<String> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsing_splits_on_commas_whitespace_and_newlines() {
        let keys = parse_credential_list("key-one, key-two\nkey-three\t key-four,,\n");
        assert_eq!(keys, vec!["key-one", "key-two", "key-three", "key-four"]);
    }

    #[test]
    fn parsing_preserves_user_order() {
        let keys = parse_credential_list("zzz aaa mmm");
        assert_eq!(keys, vec!["zzz", "aaa", "mmm"]);
    }

    #[test]
    fn replace_discards_the_previous_list() {
        let store = CredentialStore::new();
        store.replace("s1", vec!["old-a".into(), "old-b".into()]);
        store.replace("s1", vec!["new".into()]);

        assert_eq!(store.credentials_for("s1"), vec!["new".to_string()]);
        assert_eq!(store.count("s1"), 1);
    }

    #[test]
    fn sessions_are_isolated_from_each_other() {
        let store = CredentialStore::new();
        store.replace("s1", vec!["k1".into()]);

        assert!(store.credentials_for("s2").is_empty());
        assert_eq!(store.count("s2"), 0);
    }

    #[test]
    fn replacing_with_an_empty_list_clears_the_session() {
        let store = CredentialStore::new();
        store.replace("s1", vec!["k1".into()]);
        store.replace("s1", Vec::new());

        assert!(store.credentials_for("s1").is_empty());
    }
}
