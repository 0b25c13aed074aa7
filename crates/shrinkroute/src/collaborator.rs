// File: src/collaborator.rs
// Purpose: Contracts the host web framework implements for the registry

use crate::method::Method;

/// The host framework the registry binds handlers on
///
/// The registry only ever calls `supports` and `bind_handler`; it performs
/// no request dispatch itself.
///
/// # Examples
///
/// ```
/// use shrinkroute::{Collaborator, Method, RouteDef, Shrinkroute};
///
/// #[derive(Default)]
/// struct Recorder(Vec<(Method, String)>);
///
/// impl Collaborator for Recorder {
///     type Handler = fn() -> &'static str;
///
///     fn bind_handler(&mut self, method: Method, path: &str, _handler: Self::Handler) {
///         self.0.push((method, path.to_string()));
///     }
/// }
///
/// fn index() -> &'static str { "users" }
///
/// let mut shrinkr = Shrinkroute::with_collaborator(Recorder::default());
/// shrinkr
///     .register("users", RouteDef::new("/users").get(index as fn() -> &'static str))
///     .unwrap();
///
/// let bound = &shrinkr.collaborator().unwrap().0;
/// assert_eq!(bound, &vec![(Method::Get, "/users".to_string())]);
/// ```
pub trait Collaborator {
    /// Handler type stored on routes and handed to `bind_handler`
    type Handler: Clone;

    /// Whether the framework can bind handlers for `method`
    ///
    /// Handlers for unsupported methods stay on the route but are not bound.
    fn supports(&self, method: Method) -> bool {
        let _ = method;
        true
    }

    /// Registers `handler` for `method` at the exact full `path`
    fn bind_handler(&mut self, method: Method, path: &str, handler: Self::Handler);
}

/// Scheme and host of an inbound request
///
/// Used to make absolute URLs for the request being served.
pub trait RequestInfo {
    /// Scheme, with or without a trailing `:` (`"https"`, `"http:"`)
    fn protocol(&self) -> &str;

    /// Host header value, including the port if any
    fn host(&self) -> Option<&str>;
}
