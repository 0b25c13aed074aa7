// File: src/registry.rs
// Purpose: Route registration and handler binding on the host collaborator

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::collaborator::Collaborator;
use crate::error::{Result, ShrinkrouteError};
use crate::helper::HostSource;
use crate::method::Method;
use crate::params::Params;
use crate::path::RoutePath;
use crate::route::Route;
use crate::table::RouteTable;

/// One entry of a registration call: a path template and handlers
///
/// `handlers: None` means no handler set was given at all. `Some` (even
/// empty) means one was given explicitly, which makes a missing path an
/// error instead of a silent skip.
///
/// # Examples
///
/// ```
/// use shrinkroute::RouteDef;
///
/// let def: RouteDef<&str> = RouteDef::new("/users").get("list").post("create");
/// assert_eq!(def.path.as_deref(), Some("/users"));
/// assert_eq!(def.handlers.as_ref().map(Vec::len), Some(2));
/// ```
#[derive(Debug, Clone)]
pub struct RouteDef<H> {
    pub path: Option<String>,
    pub handlers: Option<Vec<(String, H)>>,
}

impl<H> RouteDef<H> {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            handlers: None,
        }
    }

    /// Definition with neither path nor handlers
    pub fn empty() -> Self {
        Self {
            path: None,
            handlers: None,
        }
    }

    /// Adds a handler under a method token (`"get"`, `"post"`, `"all"`, ...)
    ///
    /// Tokens that are not a recognized [`Method`] are ignored at
    /// registration.
    pub fn handler(mut self, token: impl Into<String>, handler: H) -> Self {
        self.handlers
            .get_or_insert_with(Vec::new)
            .push((token.into(), handler));
        self
    }

    pub fn get(self, handler: H) -> Self {
        self.method(Method::Get, handler)
    }

    pub fn post(self, handler: H) -> Self {
        self.method(Method::Post, handler)
    }

    pub fn put(self, handler: H) -> Self {
        self.method(Method::Put, handler)
    }

    pub fn delete(self, handler: H) -> Self {
        self.method(Method::Delete, handler)
    }

    pub fn patch(self, handler: H) -> Self {
        self.method(Method::Patch, handler)
    }

    pub fn all(self, handler: H) -> Self {
        self.method(Method::All, handler)
    }

    pub fn method(self, method: Method, handler: H) -> Self {
        self.handler(method.as_str(), handler)
    }
}

impl<H> From<&str> for RouteDef<H> {
    fn from(path: &str) -> Self {
        RouteDef::new(path)
    }
}

impl<H> From<String> for RouteDef<H> {
    fn from(path: String) -> Self {
        RouteDef::new(path)
    }
}

/// Named route registry
///
/// Owns the [`RouteTable`] and, once attached, the host framework
/// [`Collaborator`] that receives handler bindings.
///
/// Registration mutates and is meant for startup; once done, split the
/// registry with [`into_parts`](Shrinkroute::into_parts) and share the table.
///
/// # Examples
///
/// ```
/// use shrinkroute::{Params, Shrinkroute};
/// # use shrinkroute::{Collaborator, Method};
/// # struct Noop;
/// # impl Collaborator for Noop {
/// #     type Handler = ();
/// #     fn bind_handler(&mut self, _: Method, _: &str, _: ()) {}
/// # }
///
/// let mut shrinkr = Shrinkroute::with_collaborator(Noop);
/// shrinkr.register("users", "/users").unwrap();
/// shrinkr.register("users.show", "/:id").unwrap();
///
/// let params = Params::new().with("id", 5).with("tab", "posts");
/// assert_eq!(shrinkr.url("users.show", &params), "/users/5?tab=posts");
/// assert_eq!(shrinkr.url_with("users.show", &params, false), "/users/5");
/// ```
pub struct Shrinkroute<C: Collaborator> {
    table: RouteTable<C::Handler>,
    collaborator: Option<C>,
}

impl<C: Collaborator> Default for Shrinkroute<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Collaborator> Shrinkroute<C> {
    /// Registry without a collaborator; registrations are dropped until one
    /// is attached
    pub fn new() -> Self {
        Self {
            table: RouteTable::new(),
            collaborator: None,
        }
    }

    pub fn with_collaborator(collaborator: C) -> Self {
        Self {
            table: RouteTable::new(),
            collaborator: Some(collaborator),
        }
    }

    /// Attaches a collaborator, returning the previous one
    pub fn attach(&mut self, collaborator: C) -> Option<C> {
        self.collaborator.replace(collaborator)
    }

    pub fn detach(&mut self) -> Option<C> {
        self.collaborator.take()
    }

    pub fn collaborator(&self) -> Option<&C> {
        self.collaborator.as_ref()
    }

    pub fn collaborator_mut(&mut self) -> Option<&mut C> {
        self.collaborator.as_mut()
    }

    pub fn separator(&self) -> &str {
        self.table.separator()
    }

    /// Sets the name separator; empty input is ignored
    ///
    /// Routes already registered keep the separator they were created with.
    pub fn set_separator(&mut self, separator: &str) {
        if !self.table.set_separator(separator) {
            debug!("ignoring empty route separator");
        }
    }

    /// Default for appending unused parameters to the query string
    pub fn set_append_extra(&mut self, append_extra: bool) {
        self.table.set_append_extra(append_extra);
    }

    /// Registers one route
    ///
    /// - No collaborator attached: the route is dropped.
    /// - No path and no handler set: the call is a no-op.
    /// - No path but an explicit handler set: [`ShrinkrouteError::MissingPath`].
    /// - Name already registered: the existing route is kept.
    ///
    /// Handlers under recognized method tokens that the collaborator
    /// supports are bound at the route's full path, which must then be
    /// resolvable ([`ShrinkrouteError::MissingParent`] otherwise, and the
    /// route is not stored).
    pub fn register(&mut self, name: &str, def: impl Into<RouteDef<C::Handler>>) -> Result<()> {
        let def = def.into();

        let Some(collaborator) = self.collaborator.as_mut() else {
            warn!(route = name, "no collaborator attached, dropping route");
            return Ok(());
        };

        let path = match def.path.filter(|path| !path.is_empty()) {
            Some(path) => path,
            None if def.handlers.is_some() => {
                return Err(ShrinkrouteError::MissingPath {
                    name: name.to_string(),
                })
            }
            None => {
                debug!(route = name, "no path given, skipping");
                return Ok(());
            }
        };

        if self.table.contains(name) {
            debug!(route = name, "route already registered, keeping existing");
            return Ok(());
        }

        let handlers: BTreeMap<Method, C::Handler> = def
            .handlers
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(token, handler)| match token.parse::<Method>() {
                Ok(method) => Some((method, handler)),
                Err(err) => {
                    debug!(route = name, %err, "skipping handler");
                    None
                }
            })
            .collect();

        let route = Route::new(name, self.table.separator(), path, handlers);

        let bindable: Vec<(Method, C::Handler)> = route
            .handlers()
            .iter()
            .filter(|(method, _)| collaborator.supports(**method))
            .map(|(method, handler)| (*method, handler.clone()))
            .collect();

        if !bindable.is_empty() {
            let full = route.full_path(&self.table)?;
            for (method, handler) in bindable {
                debug!(route = name, %method, path = %full.pathname, "binding handler");
                collaborator.bind_handler(method, &full.pathname, handler);
            }
        }

        debug!(route = name, path = route.path(), "registered route");
        self.table.insert(route);
        Ok(())
    }

    /// Registers many routes
    ///
    /// Entries are processed in name order, so every ancestor is registered
    /// before its descendants. A name given twice in one batch keeps its
    /// first entry, like repeated [`register`](Shrinkroute::register) calls.
    /// Entries without a path are skipped; a
    /// [`ShrinkrouteError::MissingPath`] stops the batch, keeping the entries
    /// registered before it.
    pub fn register_all<I, N, D>(&mut self, routes: I) -> Result<()>
    where
        I: IntoIterator<Item = (N, D)>,
        N: Into<String>,
        D: Into<RouteDef<C::Handler>>,
    {
        let mut ordered: BTreeMap<String, RouteDef<C::Handler>> = BTreeMap::new();
        for (name, def) in routes {
            let name: String = name.into();
            if ordered.contains_key(&name) {
                debug!(route = %name, "duplicate name in batch, keeping first");
                continue;
            }
            ordered.insert(name, def.into());
        }

        for (name, def) in ordered {
            self.register(&name, def)?;
        }
        Ok(())
    }

    pub fn table(&self) -> &RouteTable<C::Handler> {
        &self.table
    }

    /// Splits into the route table and the collaborator
    pub fn into_parts(self) -> (RouteTable<C::Handler>, Option<C>) {
        (self.table, self.collaborator)
    }

    /// See [`RouteTable::route`]
    pub fn route(&self, name: &str) -> Option<&Route<C::Handler>> {
        self.table.route(name)
    }

    /// See [`RouteTable::full_path`]
    pub fn full_path(&self, name: &str) -> Result<RoutePath> {
        self.table.full_path(name)
    }

    /// See [`RouteTable::url`]
    pub fn url(&self, name: &str, params: &Params) -> String {
        self.table.url(name, params)
    }

    /// See [`RouteTable::url_with`]
    pub fn url_with(&self, name: &str, params: &Params, append_extra: bool) -> String {
        self.table.url_with(name, params, append_extra)
    }

    /// See [`RouteTable::try_url`]
    pub fn try_url(&self, name: &str, params: &Params, append_extra: bool) -> Result<String> {
        self.table.try_url(name, params, append_extra)
    }

    /// See [`RouteTable::full_url`]
    pub fn full_url<'a>(
        &self,
        source: impl Into<HostSource<'a>>,
        name: &str,
        params: &Params,
        append_extra: bool,
    ) -> String {
        self.table.full_url(source, name, params, append_extra)
    }

    /// See [`RouteTable::name_for_path`]
    pub fn name_for_path(&self, path: &str) -> Option<&str> {
        self.table.name_for_path(path)
    }

    /// See [`RouteTable::routes`]
    pub fn routes(&self) -> BTreeMap<String, Route<C::Handler>> {
        self.table.routes()
    }
}
