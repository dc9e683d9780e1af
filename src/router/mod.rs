use crate::helpers;
use crate::route::{Handlers, Route};
use crate::types::{RequestMeta, RouteParams};
use crate::{Error, RouteError};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{self, HeaderValue};
use hyper::{Method, Request, Response, StatusCode};
use std::fmt::{self, Debug, Formatter};
use std::future::Future;
use std::pin::Pin;

pub use self::builder::RouterBuilder;
pub use self::lookup::{Lookup, RouteMatch};

mod builder;
mod lookup;

pub(crate) type ParamsHook = Box<dyn Fn(&Method, &str, &RouteParams) + Send + Sync + 'static>;

const NOT_FOUND_BODY: &str = "404 page not found\n";

/// Represents a modular, ordered table of regex routes.
///
/// Routes are matched in registration order and the first route whose pattern matches the request path wins, even
/// when a later route would be more specific or would have a handler for the request method. The router never adds
/// anchors to a pattern: `"/users"` also matches `/api/users/42`, so an unanchored pattern registered early can shadow
/// every route after it. Use `^` and `$` to match whole paths.
///
/// This `Router<T, E>` type accepts two type parameters: `T` and `E`.
///
/// * The `T` represents the request body type the handlers receive. A router installed on a hyper connection through
///   [`RouterService`](./struct.RouterService.html) uses [hyper::body::Incoming](https://docs.rs/hyper/1/hyper/body/struct.Incoming.html).
/// * The `E` represents any error type which will be used by route handlers. This error type must be convertible into
///   a [`RouteError`](./type.RouteError.html).
///
/// # Examples
///
/// ```
/// use http_body_util::Full;
/// use hyper::{body::Bytes, Request, Response};
/// use routerify_regex::prelude::*;
/// use routerify_regex::{Handlers, Router};
/// use std::convert::Infallible;
///
/// async fn user_handler(req: Request<Full<Bytes>>) -> Result<Response<Full<Bytes>>, Infallible> {
///     let id = req.param("id").unwrap();
///     Ok(Response::new(Full::new(Bytes::from(format!("User {}", id)))))
/// }
///
/// # fn run() -> Router<Full<Bytes>, Infallible> {
/// let router = Router::builder()
///     .register(r"^/users/(?P<id>[0-9]+)$", Handlers::new().on(hyper::Method::GET, user_handler))
///     .build()
///     .unwrap();
/// # router
/// # }
/// # run();
/// ```
pub struct Router<T, E> {
    pub(crate) routes: Vec<Route<T, E>>,
    pub(crate) params_hook: Option<ParamsHook>,
}

impl<T, E> Router<T, E> {
    /// Creates an empty router. Every request answers `404 Not Found` until routes are registered.
    pub fn new() -> Router<T, E> {
        Router {
            routes: Vec::new(),
            params_hook: None,
        }
    }

    pub(crate) fn new_with_hook(routes: Vec<Route<T, E>>, params_hook: Option<ParamsHook>) -> Router<T, E> {
        Router { routes, params_hook }
    }

    /// Returns a [RouterBuilder](./struct.RouterBuilder.html) to create a router with the fluent API.
    pub fn builder() -> RouterBuilder<T, E> {
        RouterBuilder::new()
    }

    /// Compiles `pattern` and appends a route with the given handlers to the end of the table.
    ///
    /// An invalid pattern is returned as [`Error::InvalidPattern`](./enum.Error.html#variant.InvalidPattern) and the
    /// table is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use http_body_util::Full;
    /// use hyper::{body::Bytes, Method, Response};
    /// use routerify_regex::{Handlers, Router};
    /// use std::convert::Infallible;
    ///
    /// let mut router: Router<Full<Bytes>, Infallible> = Router::new();
    ///
    /// router
    ///     .register("^/health$", Handlers::new().on(Method::GET, |_| async {
    ///         Ok(Response::new(Full::new(Bytes::from("OK"))))
    ///     }))
    ///     .unwrap();
    ///
    /// assert!(router.register("^/broken(", Handlers::new()).is_err());
    /// assert_eq!(router.len(), 1);
    /// ```
    pub fn register<P: Into<String>>(&mut self, pattern: P, handlers: Handlers<T, E>) -> crate::Result<()> {
        let route = Route::new(pattern, handlers)?;
        self.routes.push(route);
        Ok(())
    }

    /// Returns the number of registered routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Returns the registered routes in match priority order.
    pub fn routes(&self) -> &[Route<T, E>] {
        &self.routes
    }

    /// Returns the pattern sources in match priority order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> + '_ {
        self.routes.iter().map(Route::pattern)
    }

    /// Finds the route for a method and an already decoded path without invoking anything.
    ///
    /// The table is scanned in registration order and the scan stops at the first pattern that matches. Method
    /// resolution is then scoped to that route: the exact method is tried first, then the wildcard.
    pub fn lookup(&self, method: &Method, target_path: &str) -> Lookup<'_, T, E> {
        let matched = self
            .routes
            .iter()
            .enumerate()
            .find(|(_, route)| route.is_match(target_path));

        let (route_index, route) = match matched {
            Some(matched) => matched,
            None => return Lookup::NotFound,
        };

        tracing::trace!(route_index, pattern = route.pattern(), path = target_path, "route matched");

        match route.handlers.resolve(method) {
            Some((method_key, handler)) => Lookup::Found(RouteMatch {
                route_index,
                route,
                method_key,
                handler,
                params: route.generate_route_params(target_path),
            }),
            None => Lookup::MethodNotAllowed {
                route_index,
                allowed: route.handlers.allowed_methods(),
            },
        }
    }
}

impl<T: Send + 'static, E: Into<RouteError> + 'static> Router<T, E> {
    /// Appends a route whose handler serves every HTTP method.
    ///
    /// It is the same as registering [`Handlers::new().any(handler)`](./struct.Handlers.html#method.any).
    pub fn register_any<P, H, R>(&mut self, pattern: P, handler: H) -> crate::Result<()>
    where
        P: Into<String>,
        H: Fn(Request<T>) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Response<Full<Bytes>>, E>> + Send + 'static,
    {
        self.register(pattern, Handlers::new().any(handler))
    }

    /// Dispatches one request.
    ///
    /// The path is percent-decoded before matching. When a handler is found, the captured route parameters are
    /// attached to the request extensions (see [`RequestExt::param`](./ext/trait.RequestExt.html#tymethod.param)) and
    /// the handler's response is returned as it is. Otherwise a `404 Not Found` or `405 Method Not Allowed` response is
    /// generated. A handler error is returned as [`Error::Handler`](./enum.Error.html#variant.Handler).
    pub async fn serve(&self, mut req: Request<T>) -> crate::Result<Response<Full<Bytes>>> {
        let uri = req.uri().clone();
        let target_path = helpers::percent_decode_request_path(uri.path());
        let method = req.method().clone();

        match self.lookup(&method, &target_path) {
            Lookup::Found(RouteMatch { handler, params, .. }) => {
                if let Some(hook) = self.params_hook.as_ref() {
                    hook(&method, &target_path, &params);
                }

                if !params.is_empty() {
                    helpers::update_req_meta_in_extensions(req.extensions_mut(), RequestMeta::with_route_params(params));
                }

                Pin::from((**handler)(req))
                    .await
                    .map_err(|e| Error::Handler(e.into()))
            }
            Lookup::MethodNotAllowed { route_index, allowed } => {
                tracing::debug!(%method, path = %target_path, route_index, "method not allowed");
                Ok(method_not_allowed_response(&allowed))
            }
            Lookup::NotFound => {
                tracing::debug!(%method, path = %target_path, "no route matched");
                Ok(not_found_response())
            }
        }
    }
}

fn not_found_response() -> Response<Full<Bytes>> {
    let mut res = Response::new(Full::new(Bytes::from_static(NOT_FOUND_BODY.as_bytes())));
    *res.status_mut() = StatusCode::NOT_FOUND;
    res.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    res.headers_mut()
        .insert(header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    res
}

fn method_not_allowed_response(allowed: &[Method]) -> Response<Full<Bytes>> {
    let mut res = Response::new(Full::new(Bytes::new()));
    *res.status_mut() = StatusCode::METHOD_NOT_ALLOWED;

    // An empty value still tells the client that no method is accepted.
    let allow = allowed.iter().map(Method::as_str).collect::<Vec<_>>().join(", ");
    let value = HeaderValue::from_str(&allow).unwrap_or_else(|_| HeaderValue::from_static(""));
    res.headers_mut().insert(header::ALLOW, value);

    res
}

impl<T, E> Default for Router<T, E> {
    fn default() -> Self {
        Router::new()
    }
}

impl<T, E> Debug for Router<T, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ routes: {:?}, params_hook: {} }}",
            self.routes,
            if self.params_hook.is_some() { "Some" } else { "None" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;
    use crate::types::MethodKey;
    use http_body_util::BodyExt;
    use std::convert::Infallible;
    use std::sync::{Arc, Mutex};

    type TestRouter = Router<Full<Bytes>, Infallible>;

    fn text<S: Into<String>>(body: S) -> Response<Full<Bytes>> {
        Response::new(Full::new(Bytes::from(body.into())))
    }

    fn request(method: Method, uri: &str) -> Request<Full<Bytes>> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Full::new(Bytes::new()))
            .unwrap()
    }

    async fn into_text(res: Response<Full<Bytes>>) -> String {
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    // Every handler answers with its name and the captured parameters, sorted.
    fn echo(name: &'static str) -> impl Fn(Request<Full<Bytes>>) -> std::future::Ready<Result<Response<Full<Bytes>>, Infallible>> {
        move |req| {
            let mut params: Vec<String> = req.params().iter().map(|(k, v)| format!("{}={}", k, v)).collect();
            params.sort();
            std::future::ready(Ok(text(format!("{}[{}]", name, params.join(",")))))
        }
    }

    fn users_router() -> TestRouter {
        Router::builder()
            .register(r"^/users/(?P<id>[0-9]+)$", Handlers::new().on(Method::GET, echo("h1")))
            .register(r"^/users/.*$", Handlers::new().on(Method::GET, echo("h2")))
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn should_route_by_first_match() {
        let router = users_router();

        let res = router.serve(request(Method::GET, "/users/42")).await.unwrap();
        assert_eq!(into_text(res).await, "h1[id=42]");

        let res = router.serve(request(Method::GET, "/users/abc")).await.unwrap();
        assert_eq!(into_text(res).await, "h2[]");
    }

    #[test]
    fn should_not_prefer_more_specific_later_route() {
        let router: TestRouter = Router::builder()
            .register(r"^/files/", Handlers::new().on(Method::GET, echo("broad")))
            .register(r"^/files/(?P<name>[a-z]+)\.txt$", Handlers::new().on(Method::GET, echo("narrow")))
            .build()
            .unwrap();

        let lookup = router.lookup(&Method::GET, "/files/notes.txt");
        let found = lookup.found().unwrap();
        assert_eq!(found.route_index(), 0);
        assert!(found.params().is_empty());
    }

    #[tokio::test]
    async fn should_not_fall_through_on_method_mismatch() {
        let router: TestRouter = Router::builder()
            .register(r"^/items$", Handlers::new().on(Method::GET, echo("get")))
            .register(r"^/items$", Handlers::new().on(Method::POST, echo("post")))
            .build()
            .unwrap();

        let lookup = router.lookup(&Method::POST, "/items");
        match lookup {
            Lookup::MethodNotAllowed { route_index, ref allowed } => {
                assert_eq!(route_index, 0);
                assert_eq!(allowed, &vec![Method::GET]);
            }
            other => panic!("unexpected lookup: {:?}", other),
        }

        let res = router.serve(request(Method::POST, "/items")).await.unwrap();
        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(res.headers()[header::ALLOW], "GET");
        assert_eq!(into_text(res).await, "");
    }

    #[tokio::test]
    async fn should_answer_405_for_empty_handlers() {
        let router: TestRouter = Router::builder()
            .register(r"^/a$", Handlers::new().on(Method::GET, echo("a")))
            .register(r"^/nothing$", Handlers::new())
            .register(r"^/b$", Handlers::new().on(Method::GET, echo("b")))
            .build()
            .unwrap();

        for method in [Method::GET, Method::POST, Method::OPTIONS] {
            let res = router.serve(request(method, "/nothing")).await.unwrap();
            assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
            assert_eq!(res.headers()[header::ALLOW], "");
        }

        assert!(router.lookup(&Method::GET, "/nothing").is_method_not_allowed());
    }

    #[tokio::test]
    async fn should_answer_404_when_nothing_matches() {
        let router = users_router();

        assert!(router.lookup(&Method::GET, "/accounts/1").is_not_found());

        let res = router.serve(request(Method::GET, "/accounts/1")).await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(res.headers()[header::CONTENT_TYPE], "text/plain; charset=utf-8");
        assert_eq!(into_text(res).await, "404 page not found\n");

        let empty = TestRouter::new();
        let res = empty.serve(request(Method::GET, "/")).await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_treat_register_any_as_wildcard_for_every_method() {
        let mut with_any = TestRouter::new();
        with_any.register_any(r"^/anything$", echo("any")).unwrap();

        let mut with_wildcard = TestRouter::new();
        with_wildcard
            .register(r"^/anything$", Handlers::new().any(echo("any")))
            .unwrap();

        let methods = vec![
            Method::GET,
            Method::HEAD,
            Method::POST,
            Method::DELETE,
            Method::from_bytes(b"PURGE").unwrap(),
        ];
        for method in methods {
            let a = with_any.lookup(&method, "/anything");
            let b = with_wildcard.lookup(&method, "/anything");
            assert!(a.found().unwrap().method_key().is_any());
            assert_eq!(b.found().unwrap().method_key(), &MethodKey::Any);

            let res = with_any.serve(request(method.clone(), "/anything")).await.unwrap();
            assert_eq!(res.status(), StatusCode::OK);
            assert_eq!(into_text(res).await, "any[]");
        }
    }

    #[tokio::test]
    async fn should_prefer_method_handler_over_wildcard() {
        let router: TestRouter = Router::builder()
            .register(
                r"^/posts/(?P<slug>[a-z-]+)$",
                Handlers::new().on(Method::DELETE, echo("delete")).any(echo("any")),
            )
            .build()
            .unwrap();

        let res = router.serve(request(Method::DELETE, "/posts/hello-world")).await.unwrap();
        assert_eq!(into_text(res).await, "delete[slug=hello-world]");

        let res = router.serve(request(Method::GET, "/posts/hello-world")).await.unwrap();
        assert_eq!(into_text(res).await, "any[slug=hello-world]");
    }

    #[test]
    fn should_lookup_idempotently() {
        let router = users_router();

        let first = router.lookup(&Method::GET, "/users/42");
        let second = router.lookup(&Method::GET, "/users/42");

        let (first, second) = (first.found().unwrap(), second.found().unwrap());
        assert_eq!(first.route_index(), second.route_index());
        assert_eq!(first.method_key(), second.method_key());
        assert_eq!(first.params(), second.params());
        assert!(std::ptr::eq(first.handler, second.handler));

        let params = match router.lookup(&Method::GET, "/users/42") {
            Lookup::Found(m) => m.into_params(),
            other => panic!("unexpected lookup: {:?}", other),
        };
        assert_eq!(params.get("id"), Some(&"42".to_owned()));
    }

    #[tokio::test]
    async fn should_decode_path_before_matching() {
        let router: TestRouter = Router::builder()
            .register(r"^/users/(?P<name>[^/]+)$", Handlers::new().on(Method::GET, echo("user")))
            .build()
            .unwrap();

        let res = router.serve(request(Method::GET, "/users/john%20doe")).await.unwrap();
        assert_eq!(into_text(res).await, "user[name=john doe]");
    }

    #[tokio::test]
    async fn should_match_unanchored_pattern_anywhere() {
        let router: TestRouter = Router::builder()
            .register("users", Handlers::new().on(Method::GET, echo("shadow")))
            .register(r"^/api/users/(?P<id>[0-9]+)$", Handlers::new().on(Method::GET, echo("api")))
            .build()
            .unwrap();

        let res = router.serve(request(Method::GET, "/api/users/7")).await.unwrap();
        assert_eq!(into_text(res).await, "shadow[]");
    }

    #[tokio::test]
    async fn should_call_params_hook() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen2 = seen.clone();

        let router: TestRouter = Router::builder()
            .register(r"^/users/(?P<id>[0-9]+)$", Handlers::new().on(Method::GET, echo("h1")))
            .register_any(r"^/health$", echo("health"))
            .on_params(move |method, path, params| {
                seen2
                    .lock()
                    .unwrap()
                    .push(format!("{} {} {} {:?}", method, path, params.len(), params.get("id")));
            })
            .build()
            .unwrap();

        router.serve(request(Method::GET, "/users/9")).await.unwrap();
        router.serve(request(Method::HEAD, "/health")).await.unwrap();
        router.serve(request(Method::GET, "/missing")).await.unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![r#"GET /users/9 1 Some("9")"#.to_owned(), "HEAD /health 0 None".to_owned()]
        );
    }

    #[tokio::test]
    async fn should_pass_handler_errors_through() {
        let mut router: Router<Full<Bytes>, std::io::Error> = Router::new();
        router
            .register_any(r"^/fail$", |_| async {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "handler exploded"))
            })
            .unwrap();

        let err = router.serve(request(Method::GET, "/fail")).await.unwrap_err();
        assert!(matches!(err, Error::Handler(_)));
        assert_eq!(err.to_string(), "handler exploded");
    }

    #[test]
    fn should_reject_invalid_pattern_without_mutating_table() {
        let mut router = users_router();
        let err = router.register(r"^/(?P<id>[0-9]+$", Handlers::new()).unwrap_err();

        assert!(err.is_invalid_pattern());
        assert_eq!(router.len(), 2);
        assert_eq!(router.routes()[0].param_names(), &["id".to_owned()]);
        assert!(router.routes()[1].param_names().is_empty());
        assert_eq!(
            router.patterns().collect::<Vec<_>>(),
            vec![r"^/users/(?P<id>[0-9]+)$", r"^/users/.*$"]
        );
    }
}
