//! Serialization implementations for package autoload blocks
//!
//! The manifest format is a map keyed by rule kind (`psr-0`, `classmap`).
//! Namespace prefixes are read with a map visitor so that declaration order
//! survives deserialization.

use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::AutoloadRule;

const NAMESPACE_KEY: &str = "psr-0";
const CLASSMAP_KEY: &str = "classmap";

/// A prefix value is either a single path or a list of paths
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl From<OneOrMany> for Vec<String> {
    fn from(value: OneOrMany) -> Self {
        match value {
            OneOrMany::One(path) => vec![path],
            OneOrMany::Many(paths) => paths,
        }
    }
}

/// Ordered `prefix => paths` entries of a `psr-0` block
struct NamespacePrefixes(Vec<(String, Vec<String>)>);

impl<'de> Deserialize<'de> for NamespacePrefixes {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PrefixVisitor;

        impl<'de> Visitor<'de> for PrefixVisitor {
            type Value = NamespacePrefixes;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of namespace prefixes to paths")
            }

            fn visit_map<M>(self, mut map: M) -> std::result::Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut entries = Vec::new();
                while let Some(prefix) = map.next_key::<String>()? {
                    let paths: OneOrMany = map.next_value()?;
                    entries.push((prefix, paths.into()));
                }
                Ok(NamespacePrefixes(entries))
            }

            fn visit_seq<A>(self, seq: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                expect_empty_seq(seq)?;
                Ok(NamespacePrefixes(Vec::new()))
            }
        }

        deserializer.deserialize_any(PrefixVisitor)
    }
}

/// Serializes the paths of one prefix, collapsing single paths to a string
struct PrefixPaths<'a>(&'a [String]);

impl Serialize for PrefixPaths<'_> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.0 {
            [single] => serializer.serialize_str(single),
            paths => paths.serialize(serializer),
        }
    }
}

struct NamespaceMap<'a>(Vec<(&'a str, &'a [String])>);

impl Serialize for NamespaceMap<'_> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (prefix, paths) in &self.0 {
            map.serialize_entry(prefix, &PrefixPaths(paths))?;
        }
        map.end()
    }
}

/// PHP encodes empty maps as `[]`, accept that in place of `{}`
fn expect_empty_seq<'de, A>(mut seq: A) -> std::result::Result<(), A::Error>
where
    A: SeqAccess<'de>,
{
    if seq.next_element::<IgnoredAny>()?.is_some() {
        return Err(de::Error::custom("expected a map, found a non-empty list"));
    }
    Ok(())
}

/// `#[serde(with = ...)]` adapter for `Package::autoload`
pub mod autoload {
    use super::{
        AutoloadRule, CLASSMAP_KEY, IgnoredAny, MapAccess, NAMESPACE_KEY, NamespaceMap,
        NamespacePrefixes, SeqAccess, SerializeMap, Visitor, expect_empty_seq, fmt,
    };
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(
        rules: &[AutoloadRule],
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut namespaces = Vec::new();
        let mut classmap: Vec<&String> = Vec::new();
        for rule in rules {
            match rule {
                AutoloadRule::Namespace { prefix, paths } => {
                    namespaces.push((prefix.as_str(), paths.as_slice()));
                }
                AutoloadRule::Classmap { paths } => classmap.extend(paths),
            }
        }

        let mut map = serializer.serialize_map(None)?;
        if !namespaces.is_empty() {
            map.serialize_entry(NAMESPACE_KEY, &NamespaceMap(namespaces))?;
        }
        if !classmap.is_empty() {
            map.serialize_entry(CLASSMAP_KEY, &classmap)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<Vec<AutoloadRule>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct AutoloadVisitor;

        impl<'de> Visitor<'de> for AutoloadVisitor {
            type Value = Vec<AutoloadRule>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an autoload map")
            }

            fn visit_map<M>(self, mut map: M) -> std::result::Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut rules = Vec::new();
                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        NAMESPACE_KEY => {
                            let prefixes: NamespacePrefixes = map.next_value()?;
                            rules.extend(prefixes.0.into_iter().map(|(prefix, paths)| {
                                AutoloadRule::Namespace { prefix, paths }
                            }));
                        }
                        CLASSMAP_KEY => {
                            let paths: Vec<String> = map.next_value()?;
                            rules.push(AutoloadRule::Classmap { paths });
                        }
                        _ => {
                            map.next_value::<IgnoredAny>()?;
                        }
                    }
                }
                Ok(rules)
            }

            fn visit_seq<A>(self, seq: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                expect_empty_seq(seq)?;
                Ok(Vec::new())
            }
        }

        deserializer.deserialize_any(AutoloadVisitor)
    }
}
