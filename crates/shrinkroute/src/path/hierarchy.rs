/// Lazy iterator over a route name and its ancestor names
///
/// For name `a.b.c` with separator `.`, yields: `a.b.c` → `a.b` → `a`
///
/// Only borrows from the input string; each step is a `rfind` of the
/// separator, so walking a chain is O(depth).
///
/// # Examples
///
/// ```
/// use shrinkroute::path::NameHierarchy;
///
/// let names: Vec<&str> = NameHierarchy::new("users.posts.show", ".").collect();
/// assert_eq!(names, vec!["users.posts.show", "users.posts", "users"]);
///
/// let names: Vec<&str> = NameHierarchy::new("admin::users", "::").collect();
/// assert_eq!(names, vec!["admin::users", "admin"]);
/// ```
#[derive(Debug, Clone)]
pub struct NameHierarchy<'a> {
    current: Option<&'a str>,
    separator: &'a str,
}

impl<'a> NameHierarchy<'a> {
    pub fn new(name: &'a str, separator: &'a str) -> Self {
        Self {
            current: Some(name),
            separator,
        }
    }
}

impl<'a> Iterator for NameHierarchy<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        self.current = parent_name(current, self.separator);
        Some(current)
    }
}

/// Name of the direct parent: everything before the last separator
///
/// Returns `None` for top-level names (no separator) and for an empty
/// separator.
///
/// # Examples
///
/// ```
/// use shrinkroute::path::parent_name;
///
/// assert_eq!(parent_name("users.show", "."), Some("users"));
/// assert_eq!(parent_name("users", "."), None);
/// ```
pub fn parent_name<'a>(name: &'a str, separator: &str) -> Option<&'a str> {
    if separator.is_empty() {
        return None;
    }
    name.rfind(separator).map(|pos| &name[..pos])
}

/// Whether `ancestor` is a proper ancestor of `name` under `separator`
///
/// Matching is done on whole segments: `user` is an ancestor of
/// `user.edit` but not of `users.edit`.
pub fn is_ancestor(ancestor: &str, name: &str, separator: &str) -> bool {
    NameHierarchy::new(name, separator)
        .skip(1)
        .any(|candidate| candidate == ancestor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_top_level_name() {
        let names: Vec<&str> = NameHierarchy::new("home", ".").collect();
        assert_eq!(names, vec!["home"]);
    }

    #[test]
    fn test_empty_segments_are_kept() {
        assert_eq!(parent_name("a..b", "."), Some("a."));
        assert_eq!(parent_name(".a", "."), Some(""));
    }

    #[test]
    fn test_is_ancestor() {
        assert!(is_ancestor("user", "user.edit", "."));
        assert!(is_ancestor("a", "a.b.c", "."));
        assert!(!is_ancestor("user", "users.edit", "."));
        assert!(!is_ancestor("user.edit", "user.edit", "."));
        assert!(!is_ancestor("user", "user-edit", "."));
    }
}
