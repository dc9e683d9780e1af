use crate::route::{Handlers, Route};
use crate::router::{ParamsHook, Router};
use crate::types::RouteParams;
use crate::RouteError;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::fmt::{self, Debug, Formatter};
use std::future::Future;

/// Builder for the [Router](./struct.Router.html) type.
///
/// This `RouterBuilder<T, E>` type accepts two type parameters: `T` and `E`.
///
/// * The `T` represents the request body type the handlers receive.
/// * The `E` represents any error type which will be used by route handlers. This error type must be convertible into
///   a [`RouteError`](./type.RouteError.html).
///
/// Routes keep the order in which they are registered. The first invalid pattern stops the builder and is returned by
/// [`build`](#method.build).
///
/// # Examples
///
/// ```
/// use http_body_util::Full;
/// use hyper::{body::Bytes, Method, Request, Response};
/// use routerify_regex::{Handlers, Router, RouterBuilder};
/// use std::convert::Infallible;
///
/// async fn home_handler(_: Request<Full<Bytes>>) -> Result<Response<Full<Bytes>>, Infallible> {
///     Ok(Response::new(Full::new(Bytes::from("home"))))
/// }
///
/// # fn run() -> Router<Full<Bytes>, Infallible> {
/// // Create a builder instance.
/// let builder: RouterBuilder<Full<Bytes>, Infallible> = Router::builder();
///
/// // Fill the builder with the routes and build a router.
/// let router = builder
///     .register("^/$", Handlers::new().on(Method::GET, home_handler))
///     .register_any("^/ping$", |_| async { Ok(Response::new(Full::new(Bytes::from("pong")))) })
///     .build()
///     .unwrap();
/// # router
/// # }
/// # run();
/// ```
pub struct RouterBuilder<T, E> {
    inner: crate::Result<BuilderInner<T, E>>,
}

struct BuilderInner<T, E> {
    routes: Vec<Route<T, E>>,
    params_hook: Option<ParamsHook>,
}

impl<T, E> RouterBuilder<T, E> {
    /// Creates a new `RouterBuilder` instance with default options.
    pub fn new() -> RouterBuilder<T, E> {
        RouterBuilder::default()
    }

    /// Creates a new [Router](./struct.Router.html) instance from the added configuration.
    pub fn build(self) -> crate::Result<Router<T, E>> {
        self.inner
            .map(|inner| Router::new_with_hook(inner.routes, inner.params_hook))
    }

    /// Appends a route with a per-method handler mapping. See [`Router::register`](./struct.Router.html#method.register).
    pub fn register<P: Into<String>>(self, pattern: P, handlers: Handlers<T, E>) -> Self {
        self.and_then(move |mut inner| {
            inner.routes.push(Route::new(pattern, handlers)?);
            Ok(inner)
        })
    }

    /// Installs a hook called after every successful match with the request method, the decoded path and the
    /// captured route parameters, before the handler runs. A later call replaces the hook.
    ///
    /// No hook is installed by default.
    pub fn on_params<F>(self, hook: F) -> Self
    where
        F: Fn(&Method, &str, &RouteParams) + Send + Sync + 'static,
    {
        self.and_then(move |mut inner| {
            inner.params_hook = Some(Box::new(hook));
            Ok(inner)
        })
    }

    /// Installs a [params hook](#method.on_params) that emits a `tracing` event at the `DEBUG` level for each match.
    pub fn log_params(self) -> Self {
        self.on_params(|method, path, params| {
            tracing::debug!(%method, path, params = ?params, "extracted route params");
        })
    }

    fn and_then<F>(self, func: F) -> Self
    where
        F: FnOnce(BuilderInner<T, E>) -> crate::Result<BuilderInner<T, E>>,
    {
        RouterBuilder {
            inner: self.inner.and_then(func),
        }
    }
}

impl<T: Send + 'static, E: Into<RouteError> + 'static> RouterBuilder<T, E> {
    /// Appends a route whose handler serves every HTTP method. See
    /// [`Router::register_any`](./struct.Router.html#method.register_any).
    pub fn register_any<P, H, R>(self, pattern: P, handler: H) -> Self
    where
        P: Into<String>,
        H: Fn(Request<T>) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Response<Full<Bytes>>, E>> + Send + 'static,
    {
        self.register(pattern, Handlers::new().any(handler))
    }
}

impl<T, E> Default for RouterBuilder<T, E> {
    fn default() -> RouterBuilder<T, E> {
        RouterBuilder {
            inner: Ok(BuilderInner {
                routes: Vec::new(),
                params_hook: None,
            }),
        }
    }
}

impl<T, E> Debug for RouterBuilder<T, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.inner {
            Ok(inner) => write!(f, "{{ routes: {:?} }}", inner.routes),
            Err(err) => write!(f, "{{ error: {} }}", err),
        }
    }
}
