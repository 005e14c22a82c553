use std::collections::HashMap;

const DEFAULT_VERBS: &[(&str, &str)] = &[
    ("developing", "Development"),
    ("coding", "Development"),
    ("testing", "Testing"),
    ("waiting", "User Acceptance"),
    ("finishing", "Done"),
    ("finished", "Done"),
];

/// Maps a leading action word to the list a card should move to.
///
/// List names are not checked here; an unknown list only surfaces when the
/// board service is asked to resolve it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerbRegistry {
    verbs: HashMap<String, String>,
}

impl VerbRegistry {
    pub fn new<I, K, V>(verbs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut registry = Self {
            verbs: HashMap::new(),
        };
        registry.set_verbs(verbs);
        registry
    }

    /// 整組替換，不做合併
    pub fn set_verbs<I, K, V>(&mut self, verbs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        self.verbs = verbs
            .into_iter()
            .map(|(verb, list)| (verb.as_ref().to_lowercase(), list.into()))
            .collect();
    }

    pub fn lookup(&self, word: &str) -> Option<&str> {
        self.verbs.get(&word.to_lowercase()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.verbs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }
}

impl Default for VerbRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_VERBS.iter().copied())
    }
}
