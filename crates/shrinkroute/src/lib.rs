//! # Shrinkroute
//!
//! Named, nested routes with reverse URL building:
//! - Hierarchical route names (`users`, `users.show`, `users.show.edit`)
//! - Full paths resolved through the ancestor chain (`/users` + `/:id`)
//! - Required (`:id`) and optional (`:slug?`) parameters
//! - Query strings inherited from ancestors, child keys winning
//! - Unused parameters appended to the query string
//! - Absolute URLs from a host string or the current request
//!
//! The registry does not dispatch requests. It binds handlers on a host
//! framework through the [`Collaborator`] trait and answers "what is the URL
//! of route X?" (and, for annotation, "which route has path Y?").
//!
//! ## Failure Contract
//!
//! URL building never panics and never returns a half-built path. Unknown
//! routes, missing ancestors and missing required parameters all produce an
//! empty string from [`RouteTable::url`], which keeps it safe to call from
//! templates. [`RouteTable::try_url`] reports the precise
//! [`ShrinkrouteError`] instead.
//!
//! ## Example
//!
//! ```
//! use shrinkroute::{Collaborator, Method, Params, RouteDef, Shrinkroute};
//!
//! #[derive(Default)]
//! struct Bindings(Vec<String>);
//!
//! impl Collaborator for Bindings {
//!     type Handler = &'static str;
//!
//!     fn bind_handler(&mut self, method: Method, path: &str, handler: &'static str) {
//!         self.0.push(format!("{} {} -> {}", method, path, handler));
//!     }
//! }
//!
//! let mut shrinkr = Shrinkroute::with_collaborator(Bindings::default());
//! shrinkr
//!     .register_all([
//!         ("users", RouteDef::new("/users").get("list")),
//!         ("users.show", RouteDef::new("/:id").get("show").put("update")),
//!     ])
//!     .unwrap();
//!
//! assert_eq!(
//!     shrinkr.collaborator().unwrap().0,
//!     vec!["get /users -> list", "get /users/:id -> show", "put /users/:id -> update"]
//! );
//!
//! let params = Params::new().with("id", 42).with("tab", "posts");
//! assert_eq!(shrinkr.url("users.show", &params), "/users/42?tab=posts");
//! assert_eq!(shrinkr.url("users.show", &Params::new()), "");
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

mod collaborator;
mod config;
mod error;
mod helper;
mod method;
pub mod params;
pub mod path;
pub mod query;
mod registry;
mod route;
mod table;

pub use collaborator::{Collaborator, RequestInfo};
pub use config::{RouteConfig, ShrinkrouteConfig};
pub use error::{Result, ShrinkrouteError};
pub use helper::{HostSource, Origin, UrlHelper};
pub use method::{Method, UnknownMethod};
pub use params::Params;
pub use path::RoutePath;
pub use query::Query;
pub use registry::{RouteDef, Shrinkroute};
pub use route::Route;
pub use table::{RouteTable, DEFAULT_SEPARATOR};
