// File: src/route.rs
// Purpose: A single named route and its full-path resolution

use std::collections::BTreeMap;

use crate::error::{Result, ShrinkrouteError};
use crate::method::Method;
use crate::path::{is_ancestor, parent_name, RoutePath};
use crate::table::RouteTable;

/// One named endpoint
///
/// A route owns its own path template and handlers. It never points at its
/// parent: the parent is found by name through the [`RouteTable`] when the
/// full path is resolved, so routes can be registered and looked up in any
/// order.
#[derive(Debug, Clone)]
pub struct Route<H> {
    name: String,
    separator: String,
    template: String,
    own: RoutePath,
    handlers: BTreeMap<Method, H>,
}

impl<H> Route<H> {
    pub(crate) fn new(
        name: impl Into<String>,
        separator: impl Into<String>,
        template: impl Into<String>,
        handlers: BTreeMap<Method, H>,
    ) -> Self {
        let template = template.into();
        Self {
            name: name.into(),
            separator: separator.into(),
            own: RoutePath::from_template(&template),
            template,
            handlers,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The path template exactly as registered
    pub fn path(&self) -> &str {
        &self.template
    }

    /// This route's own segment, split into pathname and query
    pub fn own_path(&self) -> &RoutePath {
        &self.own
    }

    pub fn handler(&self, method: Method) -> Option<&H> {
        self.handlers.get(&method)
    }

    pub fn handlers(&self) -> &BTreeMap<Method, H> {
        &self.handlers
    }

    /// Name of the direct parent, `None` for top-level routes
    pub fn parent_name(&self) -> Option<&str> {
        parent_name(&self.name, &self.separator)
    }

    pub fn is_top_level(&self) -> bool {
        self.parent_name().is_none()
    }

    /// Whether this route's name is a proper ancestor of `name`
    pub fn is_ancestor_of(&self, name: &str) -> bool {
        is_ancestor(&self.name, name, &self.separator)
    }

    /// Resolves the full path by walking the ancestor chain
    ///
    /// Top-level routes return their own path unchanged. Nested routes
    /// concatenate the parent's full pathname with their own (runs of `/`
    /// collapsed) and merge queries, the child winning on key collisions.
    ///
    /// # Errors
    ///
    /// [`ShrinkrouteError::MissingParent`] when any ancestor is not
    /// registered in `table`.
    ///
    /// # Examples
    ///
    /// ```
    /// use shrinkroute::Shrinkroute;
    /// # use shrinkroute::{Collaborator, Method};
    /// # struct Noop;
    /// # impl Collaborator for Noop {
    /// #     type Handler = ();
    /// #     fn bind_handler(&mut self, _: Method, _: &str, _: ()) {}
    /// # }
    ///
    /// let mut shrinkr = Shrinkroute::with_collaborator(Noop);
    /// shrinkr.register("users", "/users?sort=name").unwrap();
    /// shrinkr.register("users.show", "/:id/?tab=profile").unwrap();
    ///
    /// let table = shrinkr.table();
    /// let full = table.route("users.show").unwrap().full_path(table).unwrap();
    /// assert_eq!(full.to_string(), "/users/:id/?sort=name&tab=profile");
    /// ```
    pub fn full_path(&self, table: &RouteTable<H>) -> Result<RoutePath> {
        let Some(parent) = self.parent_name() else {
            return Ok(self.own.clone());
        };

        let parent_route = table
            .route(parent)
            .ok_or_else(|| ShrinkrouteError::MissingParent {
                name: self.name.clone(),
                parent: parent.to_string(),
            })?;

        Ok(parent_route.full_path(table)?.join(&self.own))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn route(name: &str, template: &str) -> Route<()> {
        Route::new(name, ".", template, BTreeMap::new())
    }

    #[test]
    fn test_top_level_keeps_template() {
        let r = route("home", "/?lang=en");
        assert!(r.is_top_level());
        assert_eq!(r.path(), "/?lang=en");
        assert_eq!(r.own_path().pathname, "/");
        assert_eq!(r.own_path().query.get("lang"), Some("en"));
    }

    #[test]
    fn test_parent_name_uses_route_separator() {
        let r: Route<()> = Route::new("admin/users", "/", "/users", BTreeMap::new());
        assert_eq!(r.parent_name(), Some("admin"));
        assert!(route("admin", "/admin").parent_name().is_none());
    }

    #[test]
    fn test_is_ancestor_of() {
        let r = route("users", "/users");
        assert!(r.is_ancestor_of("users.show"));
        assert!(r.is_ancestor_of("users.show.edit"));
        assert!(!r.is_ancestor_of("users"));
        assert!(!r.is_ancestor_of("usersx.show"));
    }
}
