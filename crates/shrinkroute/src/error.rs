// File: src/error.rs
// Purpose: Error taxonomy for registration and URL building

use thiserror::Error;

/// Errors raised by the registry and by full-path resolution
///
/// URL building collapses every variant into an empty string (see
/// [`RouteTable::url`](crate::RouteTable::url)); the `try_*` variants hand
/// the precise kind back to callers that need it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShrinkrouteError {
    /// Handlers were supplied for a route without a path
    #[error("route path not given for `{name}`")]
    MissingPath { name: String },

    /// A nested route name references an ancestor that was never registered
    #[error("parent route `{parent}` not found for `{name}`")]
    MissingParent { name: String, parent: String },

    /// A required `:param` token had no value
    #[error("missing required parameters for `{name}`: {}", .params.join(", "))]
    UnresolvedRequiredParam { name: String, params: Vec<String> },

    /// No route is registered under this name
    #[error("route `{name}` is not registered")]
    UnknownRoute { name: String },
}

pub type Result<T> = std::result::Result<T, ShrinkrouteError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_messages() {
        let err = ShrinkrouteError::MissingParent {
            name: "users.show".into(),
            parent: "users".into(),
        };
        assert_eq!(err.to_string(), "parent route `users` not found for `users.show`");

        let err = ShrinkrouteError::UnresolvedRequiredParam {
            name: "post".into(),
            params: vec!["year".into(), "slug".into()],
        };
        assert_eq!(
            err.to_string(),
            "missing required parameters for `post`: year, slug"
        );
    }
}
