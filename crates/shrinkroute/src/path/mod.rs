//! Path template utilities
//!
//! All functions are **pure**: given same input, always produce same output with no side effects.

use std::borrow::Cow;
use std::fmt;

use crate::params::optional_markers;
use crate::query::Query;

pub mod hierarchy;
pub use hierarchy::{is_ancestor, parent_name, NameHierarchy};

/// A resolved path: pathname plus query
///
/// Renders as `pathname?query`, omitting the `?` when the query is empty.
///
/// # Examples
///
/// ```
/// use shrinkroute::path::RoutePath;
///
/// let path = RoutePath::from_template("/search?q=:term&page=1");
/// assert_eq!(path.pathname, "/search");
/// assert_eq!(path.query.get("q"), Some(":term"));
/// assert_eq!(path.to_string(), "/search?q=:term&page=1");
///
/// assert_eq!(RoutePath::from_template("/article/:slug?").to_string(), "/article/:slug?");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutePath {
    pub pathname: String,
    pub query: Query,
}

impl RoutePath {
    pub fn new(pathname: impl Into<String>, query: Query) -> Self {
        Self {
            pathname: pathname.into(),
            query,
        }
    }

    /// Splits a raw template into pathname and parsed query
    pub fn from_template(template: &str) -> Self {
        let (pathname, query) = split_template(template);
        Self::new(pathname, query.map(Query::parse).unwrap_or_default())
    }

    /// Appends a child path: pathnames are concatenated with runs of `/`
    /// collapsed, queries merged with the child winning
    ///
    /// # Examples
    ///
    /// ```
    /// use shrinkroute::path::RoutePath;
    ///
    /// let parent = RoutePath::from_template("/users/?tab=all&page=1");
    /// let child = RoutePath::from_template("/:id/edit?tab=info");
    ///
    /// assert_eq!(parent.join(&child).to_string(), "/users/:id/edit?tab=info&page=1");
    /// ```
    pub fn join(&self, child: &RoutePath) -> Self {
        let concatenated = format!("{}{}", self.pathname, child.pathname);
        Self {
            pathname: collapse_slashes(&concatenated).into_owned(),
            query: self.query.clone().merge(&child.query),
        }
    }
}

impl fmt::Display for RoutePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pathname)?;
        if !self.query.is_empty() {
            write!(f, "?{}", self.query)?;
        }
        Ok(())
    }
}

/// Splits a template at its query separator
///
/// The separator is the first `?` that does not close an optional
/// parameter token, so `/article/:slug?` has no query while
/// `/x/:id??q=1` has pathname `/x/:id?` and query `q=1`.
///
/// # Examples
///
/// ```
/// use shrinkroute::path::split_template;
///
/// assert_eq!(split_template("/users?sort=asc"), ("/users", Some("sort=asc")));
/// assert_eq!(split_template("/article/:slug?"), ("/article/:slug?", None));
/// ```
pub fn split_template(template: &str) -> (&str, Option<&str>) {
    let markers = optional_markers(template);

    template
        .match_indices('?')
        .map(|(idx, _)| idx)
        .find(|idx| !markers.contains(idx))
        .map(|idx| (&template[..idx], Some(&template[idx + 1..])))
        .unwrap_or((template, None))
}

/// Collapses every run of consecutive `/` into one
///
/// Returns `Cow::Borrowed` when there is nothing to collapse.
///
/// # Examples
///
/// ```
/// use shrinkroute::path::collapse_slashes;
/// use std::borrow::Cow;
///
/// assert!(matches!(collapse_slashes("/users/1"), Cow::Borrowed("/users/1")));
/// assert_eq!(collapse_slashes("/users//1///edit"), "/users/1/edit");
/// ```
pub fn collapse_slashes(path: &str) -> Cow<'_, str> {
    if !path.contains("//") {
        return Cow::Borrowed(path);
    }

    let mut collapsed = String::with_capacity(path.len());
    let mut previous_slash = false;
    for ch in path.chars() {
        let is_slash = ch == '/';
        if !(is_slash && previous_slash) {
            collapsed.push(ch);
        }
        previous_slash = is_slash;
    }
    Cow::Owned(collapsed)
}
