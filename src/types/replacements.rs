use std::collections::HashMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Mapping from font name to replacement font name.
///
/// Keys compare case-insensitively. Definition order is kept for display and
/// serialization. Inserting a key that already exists (in any letter case)
/// overwrites the earlier entry in place, so the last definition wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Replacements {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl Replacements {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a replacement, builder style.
    #[must_use]
    pub fn with(mut self, font: &str, replacement: &str) -> Self {
        self.insert(font, replacement);
        self
    }

    pub fn insert(&mut self, font: &str, replacement: &str) {
        let key = font.to_lowercase();
        match self.index.get(&key) {
            Some(&slot) => {
                self.entries[slot] = (font.to_owned(), replacement.to_owned());
            }
            None => {
                self.index.insert(key, self.entries.len());
                self.entries.push((font.to_owned(), replacement.to_owned()));
            }
        }
    }

    /// Look up the replacement for a normalized (unquoted, trimmed) font name.
    #[must_use]
    pub fn get(&self, font: &str) -> Option<&str> {
        self.index
            .get(&font.to_lowercase())
            .map(|&slot| self.entries[slot].1.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for Replacements {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut replacements = Replacements::new();
        for (k, v) in iter {
            replacements.insert(k.as_ref(), v.as_ref());
        }
        replacements
    }
}

impl fmt::Display for Replacements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs: Vec<String> = self.iter().map(|(k, v)| format!("{k} -> {v}")).collect();
        write!(f, "{{{}}}", pairs.join(", "))
    }
}

impl Serialize for Replacements {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

struct ReplacementsVisitor;

impl<'de> Visitor<'de> for ReplacementsVisitor {
    type Value = Replacements;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object mapping font names to replacement font names")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut replacements = Replacements::new();
        while let Some((font, replacement)) = access.next_entry::<String, String>()? {
            replacements.insert(&font, &replacement);
        }
        Ok(replacements)
    }
}

impl<'de> Deserialize<'de> for Replacements {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ReplacementsVisitor)
    }
}
