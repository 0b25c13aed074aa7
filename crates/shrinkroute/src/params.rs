//! Route parameters and `:param` substitution
//!
//! A parameter token is `:` followed by one or more word characters, with an
//! optional trailing `?` marking it optional: `/users/:id`, `/posts/:slug?`.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::fmt::Display;

static PARAM_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r":([A-Za-z0-9_]+)(\?)?").expect("valid param token regex"));

/// Ordered set of parameter values for URL building
///
/// A value is either present (any [`Display`] value, stored as its string
/// form) or explicitly missing. Missing and absent are treated the same when
/// substituting; a missing parameter that is not a path token is still
/// appended to the query string with an empty value.
///
/// # Examples
///
/// ```
/// use shrinkroute::Params;
///
/// let params = Params::new()
///     .with("id", 1)
///     .with("action", "edit")
///     .with_missing("ref");
///
/// assert_eq!(params.get("id"), Some("1"));
/// assert_eq!(params.get("ref"), None);
/// assert!(params.contains_key("ref"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, Option<String>)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a present value (builder style)
    pub fn with(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.set(name, Some(value.to_string()));
        self
    }

    /// Adds a value that may be missing (builder style)
    pub fn with_opt<V: Display>(mut self, name: impl Into<String>, value: Option<V>) -> Self {
        self.set(name, value.map(|v| v.to_string()));
        self
    }

    /// Adds an explicitly missing value (builder style)
    pub fn with_missing(mut self, name: impl Into<String>) -> Self {
        self.set(name, None);
        self
    }

    /// Sets a value, replacing a previous entry with the same name in place
    pub fn set(&mut self, name: impl Into<String>, value: Option<String>) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Gets a present value; missing and absent both yield `None`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, v)| v.as_deref())
    }

    /// Whether `name` was supplied at all (present or explicitly missing)
    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Display,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Params::new(), |params, (name, value)| params.with(name, value))
    }
}

/// Outcome of substituting parameters into a template
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitution {
    /// Template with every token replaced
    pub result: String,
    /// Names that received a value, in first-occurrence order
    pub consumed: Vec<String>,
    /// Required names that had no value, in first-occurrence order
    pub missing: Vec<String>,
}

impl Substitution {
    /// Whether a required parameter was left unresolved
    pub fn failed(&self) -> bool {
        !self.missing.is_empty()
    }

    /// Continues substitution on another piece of the same template
    ///
    /// `consumed` and `missing` accumulate across pieces, so a route's
    /// pathname and query values can be substituted as one template.
    pub fn substitute_next(&mut self, template: &str, params: &Params) -> String {
        PARAM_TOKEN
            .replace_all(template, |caps: &Captures| {
                let name = &caps[1];
                let optional = caps.get(2).is_some();

                match params.get(name) {
                    Some(value) => {
                        push_unique(&mut self.consumed, name);
                        value.to_string()
                    }
                    None => {
                        if !optional {
                            push_unique(&mut self.missing, name);
                        }
                        String::new()
                    }
                }
            })
            .into_owned()
    }
}

/// Replaces every `:name` / `:name?` token in `template` (pure function)
///
/// Tokens are scanned left to right. A required token without a value marks
/// the substitution as failed but scanning continues, so every missing name
/// is reported. Optional tokens without a value become the empty string.
///
/// # Examples
///
/// ```
/// use shrinkroute::{params::substitute, Params};
///
/// let sub = substitute("/article/:slug?", &Params::new());
/// assert_eq!(sub.result, "/article/");
/// assert!(!sub.failed());
///
/// let sub = substitute("/user/:id", &Params::new());
/// assert!(sub.failed());
/// assert_eq!(sub.missing, vec!["id"]);
/// ```
pub fn substitute(template: &str, params: &Params) -> Substitution {
    let mut sub = Substitution::default();
    sub.result = sub.substitute_next(template, params);
    sub
}

/// Every concrete pattern a pathname template can produce
///
/// Each optional token appears once with its `?` dropped and once removed
/// entirely, matching what URL building emits when the value is omitted.
/// Routers without optional segments register every variant.
///
/// # Examples
///
/// ```
/// use shrinkroute::params::expand_optional;
///
/// assert_eq!(expand_optional("/article/:slug?"), vec!["/article/:slug", "/article/"]);
/// assert_eq!(expand_optional("/user/:id"), vec!["/user/:id"]);
/// ```
pub fn expand_optional(pathname: &str) -> Vec<String> {
    let mut variants = vec![String::new()];
    let mut rest = 0;

    for token in PARAM_TOKEN.find_iter(pathname) {
        let literal = &pathname[rest..token.start()];
        rest = token.end();

        match token.as_str().strip_suffix('?') {
            Some(required) => {
                variants = variants
                    .into_iter()
                    .flat_map(|v| [format!("{v}{literal}{required}"), format!("{v}{literal}")])
                    .collect();
            }
            None => {
                for v in variants.iter_mut() {
                    v.push_str(literal);
                    v.push_str(token.as_str());
                }
            }
        }
    }

    for v in variants.iter_mut() {
        v.push_str(&pathname[rest..]);
    }
    variants
}

/// Byte offsets of every `?` that terminates an optional token in `template`
pub(crate) fn optional_markers(template: &str) -> Vec<usize> {
    PARAM_TOKEN
        .captures_iter(template)
        .filter_map(|caps| caps.get(2).map(|m| m.start()))
        .collect()
}

fn push_unique(names: &mut Vec<String>, name: &str) {
    if !names.iter().any(|n| n == name) {
        names.push(name.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_substitute_required_and_optional() {
        let params = Params::new().with("id", 42);
        let sub = substitute("/users/:id/:tab?", &params);
        assert_eq!(sub.result, "/users/42/");
        assert_eq!(sub.consumed, vec!["id"]);
        assert!(!sub.failed());
    }

    #[test]
    fn test_substitute_reports_every_missing_name() {
        let sub = substitute("/:year/:month/:slug?", &Params::new().with("month", 5));
        assert_eq!(sub.missing, vec!["year"]);
        assert_eq!(sub.consumed, vec!["month"]);
    }

    #[test]
    fn test_falsy_values_are_present() {
        let params = Params::new().with("page", 0).with("q", "");
        let sub = substitute("/list/:page/:q", &params);
        assert!(!sub.failed());
        assert_eq!(sub.result, "/list/0/");
    }

    #[test]
    fn test_explicit_missing_counts_as_missing() {
        let params = Params::new().with_missing("id");
        assert!(substitute("/user/:id", &params).failed());
    }

    #[test]
    fn test_repeated_token_gets_same_value() {
        let sub = substitute("/:lang/docs/:lang", &Params::new().with("lang", "en"));
        assert_eq!(sub.result, "/en/docs/en");
        assert_eq!(sub.consumed, vec!["lang"]);
    }

    #[test]
    fn test_colon_without_word_is_literal() {
        let sub = substitute("/time/10:-30", &Params::new());
        assert_eq!(sub.result, "/time/10:-30");
    }

    #[test]
    fn test_optional_markers() {
        assert_eq!(optional_markers("/a/:b?"), vec![5]);
        assert!(optional_markers("/a/:b?x=1").len() == 1);
        assert!(optional_markers("/a?x=:v").is_empty());
    }

    #[test]
    fn test_expand_optional_combinations() {
        assert_eq!(
            expand_optional("/:lang?/docs/:page?"),
            vec!["/:lang/docs/:page", "/:lang/docs/", "//docs/:page", "//docs/"]
        );
        assert_eq!(expand_optional("/u/:id/x"), vec!["/u/:id/x"]);
    }

    #[test]
    fn test_params_set_replaces_in_place() {
        let params: Params = [("a", 1), ("b", 2), ("a", 3)].into_iter().collect();
        let names: Vec<_> = params.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(params.get("a"), Some("3"));
    }
}
