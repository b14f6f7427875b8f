use std::borrow::Cow;
use std::fmt;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Serialize, Deserialize};

/// Named grouping of files rooted at a fixed path prefix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub prefix: String,
    /// Display name shown by the presentation layer
    #[serde(default)]
    pub label: String,
}

/// Static `{key: prefix}` table, passed into each engine at construction.
///
/// Keys iterate in registration order, which is also the order of a
/// deserialized JSON table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRegistry {
    categories: Vec<(String, Category)>,
}

impl CategoryRegistry {
    pub fn empty() -> Self {
        CategoryRegistry { categories: Vec::new() }
    }

    pub fn with(mut self, key: &str, prefix: &str, label: &str) -> Self {
        self.insert(key, prefix, label);
        self
    }

    pub fn insert(&mut self, key: &str, prefix: &str, label: &str) {
        self.put(
            key.to_string(),
            Category {
                prefix: prefix.to_string(),
                label: label.to_string(),
            },
        );
    }

    // Re-registering a key replaces it in place
    fn put(&mut self, key: String, category: Category) {
        match self.categories.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = category,
            None => self.categories.push((key, category)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Category> {
        self.categories
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, category)| category)
    }

    /// Prefix for `key`; unregistered keys map to `images/<key>/`
    pub fn resolve<'a>(&'a self, key: &str) -> Cow<'a, str> {
        match self.get(key) {
            Some(category) => Cow::Borrowed(category.prefix.as_str()),
            None => Cow::Owned(format!("images/{}/", key)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Category)> {
        self.categories.iter().map(|(k, c)| (k.as_str(), c))
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        CategoryRegistry::empty()
            .with("home", "images/home/", "Home images")
            .with("faces", "images/demo-faces/", "Demo faces")
            .with("backdrops", "images/options/backdrops/", "Backdrops")
            .with("poses", "images/options/poses/", "Poses")
            .with("outfits", "images/options/outfits/", "Outfits")
            .with("hairstyles", "images/options/hairstyles/", "Hairstyles")
            .with("expressions", "images/options/expressions/", "Expressions")
            .with("glasses", "images/options/glasses/", "Glasses")
    }
}

impl Serialize for CategoryRegistry {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, category) in self.iter() {
            map.serialize_entry(key, category)?;
        }
        map.end()
    }
}

struct CategoryRegistryVisitor;

impl<'de> Visitor<'de> for CategoryRegistryVisitor {
    type Value = CategoryRegistry;

    fn expecting(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "a map of category key to prefix")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut registry = CategoryRegistry {
            categories: Vec::with_capacity(map.size_hint().unwrap_or_default()),
        };
        while let Some((key, category)) = map.next_entry::<String, Category>()? {
            registry.put(key, category);
        }
        Ok(registry)
    }
}

impl<'de> Deserialize<'de> for CategoryRegistry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(CategoryRegistryVisitor)
    }
}
