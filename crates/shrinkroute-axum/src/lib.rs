//! # Shrinkroute for Axum
//!
//! Registers shrinkroute named routes as axum routes and makes URL building
//! available inside handlers.
//!
//! ```no_run
//! use shrinkroute::{Params, RouteDef};
//! use shrinkroute_axum::{handler, into_router, AxumCollaborator, AxumShrinkroute, Urls};
//!
//! # async fn run() {
//! let mut shrinkr = AxumShrinkroute::with_collaborator(AxumCollaborator::new());
//! shrinkr
//!     .register_all([
//!         ("users", RouteDef::new("/users").get(handler(|req: axum::extract::Request| async move {
//!             let urls = req.extensions().get::<Urls>().cloned();
//!             urls.map(|u| u.full_url("users.show", &Params::new().with("id", 1)))
//!                 .unwrap_or_default()
//!         }))),
//!         ("users.show", RouteDef::new("/:id")),
//!     ])
//!     .unwrap();
//!
//! let app = into_router(shrinkr);
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await.unwrap();
//! axum::serve(listener, app).await.unwrap();
//! # }
//! ```

mod collaborator;
mod extract;
mod router;

pub use collaborator::{handler, AxumCollaborator, BoxedHandler, HandlerFuture};
pub use extract::{RouteName, Urls};
pub use router::{into_router, AxumShrinkroute};
