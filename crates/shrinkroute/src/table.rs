// File: src/table.rs
// Purpose: Read-only route table: lookups, full paths and URL building

use std::collections::BTreeMap;

use crate::error::{Result, ShrinkrouteError};
use crate::helper::HostSource;
use crate::params::{Params, Substitution};
use crate::path::RoutePath;
use crate::query::Query;
use crate::route::Route;

/// Default separator between route name segments
pub const DEFAULT_SEPARATOR: &str = ".";

/// The name → route map and the URL building settings
///
/// A table is filled through [`Shrinkroute`](crate::Shrinkroute) during
/// startup. Everything here takes `&self`, so once registration is finished
/// the table can be frozen in an `Arc` and shared by every request.
#[derive(Debug, Clone)]
pub struct RouteTable<H> {
    separator: String,
    append_extra: bool,
    routes: BTreeMap<String, Route<H>>,
}

impl<H> Default for RouteTable<H> {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            append_extra: true,
            routes: BTreeMap::new(),
        }
    }
}

impl<H> RouteTable<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Whether `url` appends unused parameters to the query string
    pub fn append_extra(&self) -> bool {
        self.append_extra
    }

    pub(crate) fn set_separator(&mut self, separator: &str) -> bool {
        if separator.is_empty() {
            return false;
        }
        self.separator = separator.to_string();
        true
    }

    pub(crate) fn set_append_extra(&mut self, append_extra: bool) {
        self.append_extra = append_extra;
    }

    /// Inserts a route unless its name is taken; returns whether it was stored
    pub(crate) fn insert(&mut self, route: Route<H>) -> bool {
        if self.routes.contains_key(route.name()) {
            return false;
        }
        self.routes.insert(route.name().to_string(), route);
        true
    }

    /// Gets the route registered under exactly `name`
    pub fn route(&self, name: &str) -> Option<&Route<H>> {
        self.routes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.routes.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Iterates over routes in name order
    pub fn iter(&self) -> impl Iterator<Item = &Route<H>> {
        self.routes.values()
    }

    /// Full path of the route called `name`
    pub fn full_path(&self, name: &str) -> Result<RoutePath> {
        self.route(name)
            .ok_or_else(|| ShrinkrouteError::UnknownRoute {
                name: name.to_string(),
            })?
            .full_path(self)
    }

    /// Builds the URL of `name`, reporting why it failed
    ///
    /// Tokens are substituted left to right through the pathname and then the
    /// query, keys and values alike. When `append_extra` is set, every
    /// parameter that did not fill a token is added to the query (explicitly
    /// missing ones with an empty value), overriding template query keys of
    /// the same name.
    ///
    /// # Errors
    ///
    /// - [`ShrinkrouteError::UnknownRoute`] if `name` is not registered
    /// - [`ShrinkrouteError::MissingParent`] if an ancestor is not registered
    /// - [`ShrinkrouteError::UnresolvedRequiredParam`] if a required token
    ///   has no value
    pub fn try_url(&self, name: &str, params: &Params, append_extra: bool) -> Result<String> {
        let RoutePath { pathname, query } = self.full_path(name)?;

        let mut sub = Substitution::default();
        let pathname = sub.substitute_next(&pathname, params);
        let mut query: Query = query
            .iter()
            .map(|(key, value)| {
                let key = sub.substitute_next(key, params);
                (key, sub.substitute_next(value, params))
            })
            .collect();

        if sub.failed() {
            return Err(ShrinkrouteError::UnresolvedRequiredParam {
                name: name.to_string(),
                params: sub.missing,
            });
        }

        if append_extra {
            params
                .iter()
                .filter(|(param, _)| !sub.consumed.iter().any(|used| used.as_str() == *param))
                .for_each(|(param, value)| query.insert(param, value.unwrap_or_default()));
        }

        Ok(RoutePath::new(pathname, query).to_string())
    }

    /// Builds the URL of `name` with the table's default append setting
    ///
    /// Returns the empty string when the route is unknown, an ancestor is
    /// missing or a required parameter has no value, so it is safe to call
    /// from templates.
    ///
    /// # Examples
    ///
    /// ```
    /// use shrinkroute::Params;
    /// # use shrinkroute::{Collaborator, Method, Shrinkroute};
    /// # struct Noop;
    /// # impl Collaborator for Noop {
    /// #     type Handler = ();
    /// #     fn bind_handler(&mut self, _: Method, _: &str, _: ()) {}
    /// # }
    ///
    /// let mut shrinkr = Shrinkroute::with_collaborator(Noop);
    /// shrinkr.register("user", "/user/:id").unwrap();
    /// let table = shrinkr.table();
    ///
    /// assert_eq!(table.url("user", &Params::new()), "");
    /// assert_eq!(table.url("user", &Params::new().with("id", 1)), "/user/1");
    /// assert_eq!(
    ///     table.url("user", &Params::new().with("id", 1).with("tab", "posts")),
    ///     "/user/1?tab=posts"
    /// );
    /// ```
    pub fn url(&self, name: &str, params: &Params) -> String {
        self.url_with(name, params, self.append_extra)
    }

    /// Builds the URL of `name`; empty string on any failure
    pub fn url_with(&self, name: &str, params: &Params, append_extra: bool) -> String {
        match self.try_url(name, params, append_extra) {
            Ok(url) => url,
            Err(err) => {
                tracing::debug!(route = name, error = %err, "url building failed");
                String::new()
            }
        }
    }

    /// Builds an absolute URL, taking scheme and host from `source`
    ///
    /// When `source` yields no host the relative URL is returned.
    pub fn try_full_url<'a>(
        &self,
        source: impl Into<HostSource<'a>>,
        name: &str,
        params: &Params,
        append_extra: bool,
    ) -> Result<String> {
        let path = self.try_url(name, params, append_extra)?;
        Ok(match source.into().origin() {
            Some(origin) => format!("{}{}", origin, path),
            None => path,
        })
    }

    /// Builds an absolute URL; empty string on any failure
    ///
    /// # Examples
    ///
    /// ```
    /// use shrinkroute::Params;
    /// # use shrinkroute::{Collaborator, Method, Shrinkroute};
    /// # struct Noop;
    /// # impl Collaborator for Noop {
    /// #     type Handler = ();
    /// #     fn bind_handler(&mut self, _: Method, _: &str, _: ()) {}
    /// # }
    ///
    /// let mut shrinkr = Shrinkroute::with_collaborator(Noop);
    /// shrinkr.register("home", "/").unwrap();
    ///
    /// let url = shrinkr.table().full_url("https://example.com/anything", "home", &Params::new(), true);
    /// assert_eq!(url, "https://example.com/");
    /// ```
    pub fn full_url<'a>(
        &self,
        source: impl Into<HostSource<'a>>,
        name: &str,
        params: &Params,
        append_extra: bool,
    ) -> String {
        self.try_full_url(source, name, params, append_extra)
            .unwrap_or_default()
    }

    /// Reverse lookup: the first route (in name order) whose full pathname
    /// equals `path`
    ///
    /// Comparison is literal; `:param` tokens are not matched against
    /// values. Host frameworks use this to annotate a matched request with
    /// its route name.
    pub fn name_for_path(&self, path: &str) -> Option<&str> {
        self.routes
            .values()
            .find(|route| {
                route
                    .full_path(self)
                    .map(|full| full.pathname == path)
                    .unwrap_or(false)
            })
            .map(Route::name)
    }
}

impl<H: Clone> RouteTable<H> {
    /// Copy of every registered route, keyed by name
    pub fn routes(&self) -> BTreeMap<String, Route<H>> {
        self.routes.clone()
    }
}
