//! `routerify-regex` provides an ordered, regex-pattern request router for the Rust HTTP library [hyper](https://hyper.rs/).
//!
//! Core features:
//!
//! - Routes are plain [`regex`](https://docs.rs/regex) patterns; named capture groups become route parameters.
//!
//! - Per-method handlers with a wildcard fallback for any method.
//!
//! - First match wins: registration order, not specificity, decides which route serves a request.
//!
//! - Distinct `404 Not Found` (no pattern matched) and `405 Method Not Allowed` (a pattern matched but has no handler
//!   for the method) outcomes.
//!
//! ## Basic Example
//!
//! ```no_run
//! use http_body_util::Full;
//! use hyper::body::{Bytes, Incoming};
//! use hyper::service::Service;
//! use hyper::{Method, Request, Response};
//! use hyper_util::rt::{TokioExecutor, TokioIo};
//! use hyper_util::server::conn::auto::Builder;
//! // Import the prelude traits.
//! use routerify_regex::prelude::*;
//! use routerify_regex::{Handlers, Router, RouterService};
//! use std::sync::Arc;
//! use std::{convert::Infallible, net::SocketAddr};
//! use tokio::net::TcpListener;
//!
//! // A handler for "/" page.
//! async fn home_handler(_: Request<Incoming>) -> Result<Response<Full<Bytes>>, Infallible> {
//!     Ok(Response::new(Full::new(Bytes::from("Home page"))))
//! }
//!
//! // A handler for "/users/<id>" page.
//! async fn user_handler(req: Request<Incoming>) -> Result<Response<Full<Bytes>>, Infallible> {
//!     let user_id = req.param("id").unwrap();
//!     Ok(Response::new(Full::new(Bytes::from(format!("Hello {}", user_id)))))
//! }
//!
//! fn router() -> Router<Incoming, Infallible> {
//!     Router::builder()
//!         .register("^/$", Handlers::new().on(Method::GET, home_handler))
//!         .register(r"^/users/(?P<id>[0-9]+)$", Handlers::new().on(Method::GET, user_handler))
//!         .build()
//!         .unwrap()
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let router_service = Arc::new(RouterService::new(router()));
//!
//!     let addr = SocketAddr::from(([127, 0, 0, 1], 3001));
//!     let listener = TcpListener::bind(addr).await?;
//!
//!     loop {
//!         let (stream, _) = listener.accept().await?;
//!         let router_service = router_service.clone();
//!
//!         tokio::spawn(async move {
//!             let request_service = router_service.call(&stream).await.unwrap();
//!
//!             let io = TokioIo::new(stream);
//!             let builder = Builder::new(TokioExecutor::new());
//!             if let Err(err) = builder.serve_connection(io, request_service).await {
//!                 eprintln!("Error serving connection: {:?}", err);
//!             }
//!         });
//!     }
//! }
//! ```
//!
//! ## Routing
//!
//! ### Route Patterns
//!
//! A route pattern is a regular expression tested against the percent-decoded request path. The router does **not**
//! anchor patterns: `"/users"` matches `/users`, `/users/42` and `/api/users` alike. Write `^` and `$` to match a whole
//! path.
//!
//! ### Match Order
//!
//! Routes are tried in the order they were registered and the first route whose pattern matches is the only route
//! considered for the request. If that route has no handler for the request method and no wildcard handler, the
//! response is `405 Method Not Allowed` even if a later route would accept the method. Register the same pattern once
//! with all its methods:
//!
//! ```
//! use http_body_util::Full;
//! use hyper::{body::Bytes, Method, Request, Response};
//! use routerify_regex::{Handlers, Router};
//! use std::convert::Infallible;
//!
//! async fn list(_: Request<Full<Bytes>>) -> Result<Response<Full<Bytes>>, Infallible> {
//!     Ok(Response::new(Full::new(Bytes::from("List"))))
//! }
//!
//! async fn create(_: Request<Full<Bytes>>) -> Result<Response<Full<Bytes>>, Infallible> {
//!     Ok(Response::new(Full::new(Bytes::from("Created"))))
//! }
//!
//! # fn run() -> Router<Full<Bytes>, Infallible> {
//! let router = Router::builder()
//!     .register("^/books$", Handlers::new().on(Method::GET, list).on(Method::POST, create))
//!     .build()
//!     .unwrap();
//! # router
//! # }
//! # run();
//! ```
//!
//! ### Route Parameters
//!
//! Every named capture group of the matched pattern is exposed to the handler under its name through
//! [`RequestExt::param`](./ext/trait.RequestExt.html#tymethod.param). Unnamed groups are ignored, and a named group
//! that did not take part in the match has no value.
//!
//! ```txt
//! Route pattern: ^/users/(?P<userName>[^/]+)/books/(?P<bookName>[^/]+)$
//! Request URL: http://localhost:3000/users/alice/books/HarryPotter
//! req.params() returns a map: { "userName": "alice", "bookName": "HarryPotter" }
//! ```
//!
//! ### Any Method
//!
//! [`register_any`](./struct.RouterBuilder.html#method.register_any) registers a handler under the wildcard key. It is
//! used for every method, including extension methods, unless the route also has a dedicated handler for the method.
//!
//! ## Observability
//!
//! Outcomes are reported as [`tracing`](https://docs.rs/tracing) events at the `DEBUG` and `TRACE` levels. The
//! captured parameters of each request are only reported when a hook is installed with
//! [`RouterBuilder::on_params`](./struct.RouterBuilder.html#method.on_params) or
//! [`RouterBuilder::log_params`](./struct.RouterBuilder.html#method.log_params).
//!
//! ## Error Handling
//!
//! An invalid pattern is reported by [`Router::register`](./struct.Router.html#method.register), or by
//! [`RouterBuilder::build`](./struct.RouterBuilder.html#method.build), as
//! [`Error::InvalidPattern`](./enum.Error.html#variant.InvalidPattern). Handler errors are never inspected: they are
//! returned from [`Router::serve`](./struct.Router.html#method.serve) as
//! [`Error::Handler`](./enum.Error.html#variant.Handler).

pub use self::error::{Error, RouteError};
pub use self::route::{Handlers, Route};
pub use self::router::{Lookup, RouteMatch, Router, RouterBuilder};
#[doc(hidden)]
pub use self::service::RequestService;
pub use self::service::RequestServiceBuilder;
pub use self::service::RouterService;
pub use self::types::{MethodKey, RouteParams};

mod error;
pub mod ext;
mod helpers;
pub mod prelude;
mod route;
mod router;
mod service;
mod types;

/// A Result type often returned from methods that can have routerify-regex errors.
pub type Result<T> = std::result::Result<T, Error>;
