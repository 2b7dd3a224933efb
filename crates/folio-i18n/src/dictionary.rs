//! Typed nested translation dictionaries and path lookup

use crate::error::{I18nError, I18nResult};
use crate::Locale;
use serde::Deserialize;
use std::collections::BTreeMap;

/// A node in a translation tree
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TranslationNode {
    /// Leaf string
    Text(String),
    /// Nested mapping of key segments to nodes
    Branch(BTreeMap<String, TranslationNode>),
}

/// Outcome of walking a dot path through a dictionary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    /// The path ends at a text leaf (possibly empty)
    Found(&'a str),
    /// The path resolves, but to a nested mapping rather than text
    NotALeaf,
    /// A segment is absent, or a segment tries to descend into a leaf
    Missing {
        /// Index of the first segment that could not be followed
        segment: usize,
    },
}

impl<'a> Lookup<'a> {
    /// The resolved text, if any
    pub fn text(self) -> Option<&'a str> {
        match self {
            Self::Found(text) => Some(text),
            _ => None,
        }
    }
}

/// The complete translation tree for one locale
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    root: BTreeMap<String, TranslationNode>,
}

impl Dictionary {
    /// Build a dictionary from an already parsed root mapping
    pub fn new(root: BTreeMap<String, TranslationNode>) -> Self {
        Self { root }
    }

    /// Parse `locale`'s dictionary from JSON text; the root must be an object
    pub fn from_json(locale: Locale, text: &str) -> I18nResult<Self> {
        let root: BTreeMap<String, TranslationNode> =
            serde_json::from_str(text).map_err(|e| I18nError::Parse {
                locale: locale.code().to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self { root })
    }

    /// Walk `key` segment by segment
    pub fn lookup(&self, key: &str) -> Lookup<'_> {
        let mut segments = key.split('.').enumerate();
        let Some((_, first)) = segments.next() else {
            return Lookup::Missing { segment: 0 };
        };
        match self.root.get(first) {
            Some(node) => descend(node, segments),
            None => Lookup::Missing { segment: 0 },
        }
    }

    /// Every dot path that ends at a text leaf, in sorted order
    pub fn leaf_keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        for (name, node) in &self.root {
            collect_leaves(name, node, &mut keys);
        }
        keys
    }

    /// Number of text leaves
    pub fn len(&self) -> usize {
        self.leaf_keys().len()
    }

    /// Whether the dictionary holds no text at all
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn descend<'a, 'k>(
    node: &'a TranslationNode,
    mut rest: impl Iterator<Item = (usize, &'k str)>,
) -> Lookup<'a> {
    match (node, rest.next()) {
        (TranslationNode::Text(text), None) => Lookup::Found(text),
        (TranslationNode::Branch(_), None) => Lookup::NotALeaf,
        (TranslationNode::Text(_), Some((index, _))) => Lookup::Missing { segment: index },
        (TranslationNode::Branch(children), Some((index, segment))) => match children.get(segment) {
            Some(child) => descend(child, rest),
            None => Lookup::Missing { segment: index },
        },
    }
}

fn collect_leaves(prefix: &str, node: &TranslationNode, out: &mut Vec<String>) {
    match node {
        TranslationNode::Text(_) => out.push(prefix.to_string()),
        TranslationNode::Branch(children) => {
            for (name, child) in children {
                collect_leaves(&format!("{prefix}.{name}"), child, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dictionary {
        Dictionary::from_json(
            Locale::Spanish,
            r#"{
                "navigation": { "home": "Inicio", "empty": "" },
                "contact": { "modal": { "title": "Enviar un mensaje" } }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_found_leaf() {
        let dict = sample();
        assert_eq!(dict.lookup("navigation.home"), Lookup::Found("Inicio"));
        assert_eq!(dict.lookup("contact.modal.title").text(), Some("Enviar un mensaje"));
    }

    #[test]
    fn test_empty_leaf_is_not_missing() {
        assert_eq!(sample().lookup("navigation.empty"), Lookup::Found(""));
    }

    #[test]
    fn test_branch_is_not_a_leaf() {
        assert_eq!(sample().lookup("contact.modal"), Lookup::NotALeaf);
        assert_eq!(sample().lookup("contact").text(), None);
    }

    #[test]
    fn test_missing_segments() {
        let dict = sample();
        assert_eq!(dict.lookup("footer.madeWith"), Lookup::Missing { segment: 0 });
        assert_eq!(dict.lookup("contact.modal.subtitle"), Lookup::Missing { segment: 2 });
        assert_eq!(dict.lookup("navigation.home.deeper"), Lookup::Missing { segment: 2 });
        assert_eq!(dict.lookup(""), Lookup::Missing { segment: 0 });
        assert_eq!(dict.lookup("navigation..home"), Lookup::Missing { segment: 1 });
    }

    #[test]
    fn test_leaf_keys() {
        assert_eq!(
            sample().leaf_keys(),
            vec!["contact.modal.title", "navigation.empty", "navigation.home"]
        );
        assert_eq!(sample().len(), 3);
        assert!(Dictionary::default().is_empty());
    }

    #[test]
    fn test_rejects_non_object_root() {
        assert!(Dictionary::from_json(Locale::Spanish, "[\"a\"]").is_err());
        assert!(Dictionary::from_json(Locale::Spanish, "\"text\"").is_err());
        assert!(matches!(
            Dictionary::from_json(Locale::English, "{\"count\": 3}"),
            Err(I18nError::Parse { locale, .. }) if locale == "en"
        ));
    }
}
