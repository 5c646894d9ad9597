//! Storage for the single bearer token used to authenticate requests.
//!
//! The client reads the store before every request, so a token published by
//! one task is seen by the next request of any other task.

use std::sync::{Arc, RwLock};

/// Key/value store holding at most one bearer token.
pub trait CredentialStore: Send + Sync {
    /// Current token, or `None` when logged out.
    fn get(&self) -> Option<String>;

    /// Replace the stored token.
    fn set(&self, token: &str);

    fn clear(&self);
}

/// Process-local store. Cloning shares the underlying slot.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentialStore {
    token: Arc<RwLock<Option<String>>>,
}

impl InMemoryCredentialStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Arc::new(RwLock::new(Some(token.into()))),
        }
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn get(&self) -> Option<String> {
        // A poisoned lock still holds a whole value; writes are single assignments
        let guard = self.token.read().unwrap_or_else(|e| e.into_inner());
        guard.clone()
    }

    fn set(&self, token: &str) {
        let mut guard = self.token.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(token.to_string());
    }

    fn clear(&self) {
        let mut guard = self.token.write().unwrap_or_else(|e| e.into_inner());
        *guard = None;
    }
}

impl<S: CredentialStore + ?Sized> CredentialStore for Arc<S> {
    fn get(&self) -> Option<String> {
        (**self).get()
    }

    fn set(&self, token: &str) {
        (**self).set(token)
    }

    fn clear(&self) {
        (**self).clear()
    }
}

/// Mask a token for logs, keeping the first and last four characters.
pub(crate) fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_lifecycle() {
        let store = InMemoryCredentialStore::new();
        assert_eq!(store.get(), None);

        store.set("first");
        store.set("second");
        assert_eq!(store.get().as_deref(), Some("second"));

        store.clear();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_clones_share_the_slot() {
        let store = InMemoryCredentialStore::with_token("seed");
        let other = store.clone();
        other.set("rotated");
        assert_eq!(store.get().as_deref(), Some("rotated"));
    }

    #[test]
    fn test_concurrent_writers_publish_whole_values() {
        let store = InMemoryCredentialStore::new();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || store.set(&format!("token-{}", i)))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let token = store.get().unwrap();
        assert!(token.starts_with("token-"));
        assert!(token["token-".len()..].parse::<u32>().unwrap() < 8);
    }

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("abcd1234efgh5678"), "abcd...5678");
        assert_eq!(mask_token("short"), "*****");
        assert_eq!(mask_token(""), "");
    }
}
