//! Query string parsing, merging and serialization
//!
//! [`Query`] keeps keys in insertion order so that a serialized URL reads the
//! way its route was declared: inherited keys first, then the child's own,
//! then any extra parameters appended while building.

use std::fmt;

/// Insertion-ordered `key → value` mapping of a query string
///
/// Setting an existing key overwrites its value in place (the key keeps its
/// original position).
///
/// # Examples
///
/// ```
/// use shrinkroute::query::Query;
///
/// let mut query = Query::parse("page=2&sort=asc");
/// query.insert("page", "3");
/// assert_eq!(query.to_string(), "page=3&sort=asc");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    /// Creates an empty query
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a query string (without the leading `?`)
    ///
    /// Keys and values are percent-decoded and `+` is read as a space. A
    /// key without `=` maps to the empty string. Repeated keys keep the last
    /// value.
    ///
    /// # Examples
    ///
    /// ```
    /// use shrinkroute::query::Query;
    ///
    /// let query = Query::parse("q=hello+world&flag");
    /// assert_eq!(query.get("q"), Some("hello world"));
    /// assert_eq!(query.get("flag"), Some(""));
    /// ```
    pub fn parse(raw: &str) -> Self {
        raw.trim_start_matches('?')
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| match pair.split_once('=') {
                Some((key, value)) => (decode(key), decode(value)),
                None => (decode(pair), String::new()),
            })
            .collect()
    }

    /// Sets `key` to `value`, overwriting any previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.pairs.push((key, value)),
        }
    }

    /// Gets the value for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterates over `(key, value)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Merges `overrides` into `self` (overrides win on key collision)
    ///
    /// Keys only present in `self` are preserved, new keys are appended.
    ///
    /// # Examples
    ///
    /// ```
    /// use shrinkroute::query::Query;
    ///
    /// let parent = Query::parse("lang=en&page=1");
    /// let child = Query::parse("page=2&tab=info");
    ///
    /// assert_eq!(parent.merge(&child).to_string(), "lang=en&page=2&tab=info");
    /// ```
    pub fn merge(mut self, overrides: &Query) -> Self {
        for (key, value) in overrides.iter() {
            self.insert(key, value);
        }
        self
    }
}

/// Serializes to `k=v&k2=v2`; an empty query serializes to the empty string
impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, (key, value)) in self.pairs.iter().enumerate() {
            if idx > 0 {
                f.write_str("&")?;
            }
            write!(f, "{}={}", encode(key), encode(value))?;
        }
        Ok(())
    }
}

impl<K, V> FromIterator<(K, V)> for Query
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut query = Query::new();
        for (key, value) in iter {
            query.insert(key, value);
        }
        query
    }
}

// `:` stays literal so query templates like `q=:term` keep their tokens
fn encode(raw: &str) -> String {
    urlencoding::encode(raw).replace("%3A", ":")
}

fn decode(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .unwrap_or(spaced)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_empty() {
        assert!(Query::parse("").is_empty());
        assert!(Query::parse("?").is_empty());
        assert!(Query::parse("&&").is_empty());
    }

    #[test]
    fn test_parse_repeated_key_keeps_last() {
        let query = Query::parse("a=1&b=2&a=3");
        assert_eq!(query.len(), 2);
        assert_eq!(query.get("a"), Some("3"));
        assert_eq!(query.to_string(), "a=3&b=2");
    }

    #[test]
    fn test_serialize_empty_is_empty_string() {
        assert_eq!(Query::new().to_string(), "");
    }

    #[test]
    fn test_serialize_encodes() {
        let query: Query = [("q", "a b&c"), ("é", "=")].into_iter().collect();
        assert_eq!(query.to_string(), "q=a%20b%26c&%C3%A9=%3D");
    }

    #[test]
    fn test_serialize_keeps_colon() {
        let query: Query = [("q", ":term"), ("at", "10:30")].into_iter().collect();
        assert_eq!(query.to_string(), "q=:term&at=10:30");
    }

    #[test]
    fn test_round_trip() {
        let query: Query = [
            ("name", "foo bar"),
            ("empty", ""),
            ("symbols", "?&=+/#%:"),
            ("unicode", "ünï"),
        ]
        .into_iter()
        .collect();

        assert_eq!(Query::parse(&query.to_string()), query);
    }

    #[test]
    fn test_merge_keeps_parent_only_keys() {
        let base = Query::parse("a=1&b=2");
        let merged = base.merge(&Query::parse("b=3"));
        assert_eq!(merged.get("a"), Some("1"));
        assert_eq!(merged.get("b"), Some("3"));
    }
}
