//! In-memory model of the runtime handler registry.
//!
//! The generated entrypoint fills `edgeRegistry` at runtime with one `set` call
//! per handler. [`HandlerRegistry`] records the same calls on the Rust side so
//! callers can see which key ends up bound to which handler without executing
//! the bundle.

use rustc_hash::FxHashMap;
use serde::Serialize;

/// One `edgeRegistry.set(key, alias)` statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    /// Registry key (handler file name without its extension).
    pub key: String,
    /// Import alias bound to the handler's module namespace.
    pub alias: String,
    /// Handler file the alias was imported from.
    pub file_name: String,
}

/// Ordered handler registrations, keyed like a JavaScript `Map`.
///
/// Registering an existing key keeps the earlier registration in
/// [`registrations`](Self::registrations) but [`get`](Self::get) resolves to the
/// newest one, matching the runtime's silent overwrite.
#[derive(Debug, Clone, Default)]
pub struct HandlerRegistry {
    registrations: Vec<Registration>,
    latest: FxHashMap<String, usize>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a registration. Returns the registration it shadows, if any.
    pub fn register(
        &mut self,
        key: impl Into<String>,
        alias: impl Into<String>,
        file_name: impl Into<String>,
    ) -> Option<&Registration> {
        let key = key.into();
        let index = self.registrations.len();
        self.registrations.push(Registration {
            key: key.clone(),
            alias: alias.into(),
            file_name: file_name.into(),
        });

        let shadowed = self.latest.insert(key, index);
        shadowed.map(|i| &self.registrations[i])
    }

    /// The registration the runtime will see for `key`.
    pub fn get(&self, key: &str) -> Option<&Registration> {
        self.latest.get(key).map(|&i| &self.registrations[i])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.latest.contains_key(key)
    }

    /// Every registration in emission order, shadowed ones included.
    pub fn registrations(&self) -> &[Registration] {
        &self.registrations
    }

    /// Distinct keys in order of first registration.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.registrations
            .iter()
            .enumerate()
            .filter(|(i, r)| {
                self.registrations[..*i]
                    .iter()
                    .all(|earlier| earlier.key != r.key)
            })
            .map(|(_, r)| r.key.as_str())
    }

    /// Registrations that a later one with the same key overwrites.
    pub fn shadowed(&self) -> impl Iterator<Item = &Registration> {
        self.registrations
            .iter()
            .enumerate()
            .filter(|(i, r)| self.latest.get(&r.key) != Some(i))
            .map(|(_, r)| r)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.latest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.latest.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_get() {
        let mut registry = HandlerRegistry::new();
        assert!(registry.register("hello", "func0", "hello.js").is_none());

        let entry = registry.get("hello").unwrap();
        assert_eq!(entry.alias, "func0");
        assert_eq!(entry.file_name, "hello.js");
        assert_eq!(registry.len(), 1);
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_duplicate_key_overwrites_silently() {
        let mut registry = HandlerRegistry::new();
        registry.register("auth", "func0", "auth.js");
        let shadowed = registry.register("auth", "func1", "auth.ts").cloned();

        assert_eq!(shadowed.unwrap().file_name, "auth.js");
        assert_eq!(registry.get("auth").unwrap().file_name, "auth.ts");
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.registrations().len(), 2);

        let shadowed: Vec<_> = registry.shadowed().map(|r| r.alias.as_str()).collect();
        assert_eq!(shadowed, vec!["func0"]);
    }

    #[test]
    fn test_keys_keep_first_registration_order() {
        let mut registry = HandlerRegistry::new();
        registry.register("b", "func0", "b.js");
        registry.register("a", "func1", "a.js");
        registry.register("b", "func2", "b.ts");

        let keys: Vec<_> = registry.keys().collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_empty_registry() {
        let registry = HandlerRegistry::default();
        assert!(registry.is_empty());
        assert_eq!(registry.keys().count(), 0);
    }
}
