use crate::types::MethodKey;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::collections::HashMap;
use std::fmt::{self, Debug, Formatter};
use std::future::Future;
use std::sync::Arc;

pub(crate) type Handler<T, E> = Arc<dyn Fn(Request<T>) -> HandlerReturn<E> + Send + Sync + 'static>;
pub(crate) type HandlerReturn<E> = Box<dyn Future<Output = Result<Response<Full<Bytes>>, E>> + Send + 'static>;

/// The per-method handler mapping of a single route.
///
/// A handler can be registered for any number of HTTP methods and, optionally, under the wildcard key which is used
/// for every method the route has no dedicated handler for.
///
/// This `Handlers<T, E>` type accepts two type parameters: `T` and `E`.
///
/// * The `T` represents the request body type the handlers receive, e.g. [hyper::body::Incoming](https://docs.rs/hyper/1/hyper/body/struct.Incoming.html).
/// * The `E` represents any error type which will be used by the handlers. This error type must be convertible into
///   a [`RouteError`](./type.RouteError.html).
///
/// # Examples
///
/// ```
/// use http_body_util::Full;
/// use hyper::{body::Bytes, Method, Request, Response};
/// use routerify_regex::{Handlers, Router};
/// use std::convert::Infallible;
///
/// async fn list_books(_: Request<Full<Bytes>>) -> Result<Response<Full<Bytes>>, Infallible> {
///     Ok(Response::new(Full::new(Bytes::from("All books"))))
/// }
///
/// async fn create_book(_: Request<Full<Bytes>>) -> Result<Response<Full<Bytes>>, Infallible> {
///     Ok(Response::new(Full::new(Bytes::from("Created"))))
/// }
///
/// # fn run() -> Router<Full<Bytes>, Infallible> {
/// let router = Router::builder()
///     .register(
///         "^/books$",
///         Handlers::new().on(Method::GET, list_books).on(Method::POST, create_book),
///     )
///     .build()
///     .unwrap();
/// # router
/// # }
/// # run();
/// ```
pub struct Handlers<T, E> {
    methods: HashMap<Method, Handler<T, E>>,
    any: Option<Handler<T, E>>,
}

impl<T, E> Handlers<T, E> {
    /// Creates an empty handler mapping.
    ///
    /// A route registered with an empty mapping answers `405 Method Not Allowed` to every request it matches.
    pub fn new() -> Handlers<T, E> {
        Handlers {
            methods: HashMap::new(),
            any: None,
        }
    }

    /// Returns the number of registered keys, the wildcard included.
    pub fn len(&self) -> usize {
        self.methods.len() + usize::from(self.any.is_some())
    }

    /// Returns `true` if no handler is registered at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if a handler is registered under the given key.
    pub fn contains(&self, key: &MethodKey) -> bool {
        match key {
            MethodKey::Method(method) => self.methods.contains_key(method),
            MethodKey::Any => self.any.is_some(),
        }
    }

    /// Returns the methods that have a dedicated handler, sorted by name. The wildcard is not included.
    pub fn allowed_methods(&self) -> Vec<Method> {
        let mut methods: Vec<Method> = self.methods.keys().cloned().collect();
        methods.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        methods
    }

    /// Exact method first, then the wildcard.
    pub(crate) fn resolve(&self, method: &Method) -> Option<(MethodKey, &Handler<T, E>)> {
        if let Some(handler) = self.methods.get(method) {
            return Some((MethodKey::Method(method.clone()), handler));
        }
        self.any.as_ref().map(|handler| (MethodKey::Any, handler))
    }

    fn insert(mut self, key: MethodKey, handler: Handler<T, E>) -> Handlers<T, E> {
        match key {
            MethodKey::Method(method) => {
                self.methods.insert(method, handler);
            }
            MethodKey::Any => self.any = Some(handler),
        }
        self
    }
}

impl<T: 'static, E: 'static> Handlers<T, E> {
    /// Registers a handler for one HTTP method, replacing any handler previously registered for it.
    pub fn on<H, R>(self, method: Method, handler: H) -> Handlers<T, E>
    where
        H: Fn(Request<T>) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Response<Full<Bytes>>, E>> + Send + 'static,
    {
        self.insert(MethodKey::Method(method), boxed(handler))
    }

    /// Registers one handler for several HTTP methods.
    ///
    /// # Examples
    ///
    /// ```
    /// use http_body_util::Full;
    /// use hyper::{body::Bytes, Method, Response};
    /// use routerify_regex::Handlers;
    /// use std::convert::Infallible;
    ///
    /// let handlers: Handlers<Full<Bytes>, Infallible> = Handlers::new().on_many(&[Method::PUT, Method::PATCH], |_| async {
    ///     Ok(Response::new(Full::new(Bytes::from("Updated"))))
    /// });
    ///
    /// assert_eq!(handlers.len(), 2);
    /// ```
    pub fn on_many<H, R>(mut self, methods: &[Method], handler: H) -> Handlers<T, E>
    where
        H: Fn(Request<T>) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Response<Full<Bytes>>, E>> + Send + 'static,
    {
        let handler = boxed(handler);
        for method in methods {
            self = self.insert(MethodKey::Method(method.clone()), Arc::clone(&handler));
        }
        self
    }

    /// Registers the wildcard handler, used for every method that has no dedicated handler.
    pub fn any<H, R>(self, handler: H) -> Handlers<T, E>
    where
        H: Fn(Request<T>) -> R + Send + Sync + 'static,
        R: Future<Output = Result<Response<Full<Bytes>>, E>> + Send + 'static,
    {
        self.insert(MethodKey::Any, boxed(handler))
    }
}

fn boxed<T, E, H, R>(handler: H) -> Handler<T, E>
where
    H: Fn(Request<T>) -> R + Send + Sync + 'static,
    R: Future<Output = Result<Response<Full<Bytes>>, E>> + Send + 'static,
    T: 'static,
    E: 'static,
{
    Arc::new(move |req: Request<T>| -> HandlerReturn<E> { Box::new(handler(req)) })
}

impl<T, E> Default for Handlers<T, E> {
    fn default() -> Self {
        Handlers::new()
    }
}

impl<T, E> Debug for Handlers<T, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<MethodKey> = self.allowed_methods().into_iter().map(MethodKey::Method).collect();
        if self.any.is_some() {
            keys.push(MethodKey::Any);
        }
        f.debug_set().entries(keys.iter().map(|key| key.to_string())).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;
    use std::pin::Pin;

    type TestHandlers = Handlers<Full<Bytes>, Infallible>;

    fn text(body: &'static str) -> Response<Full<Bytes>> {
        Response::new(Full::new(Bytes::from_static(body.as_bytes())))
    }

    async fn body_of(handler: &Handler<Full<Bytes>, Infallible>, method: Method) -> String {
        let req = Request::builder()
            .method(method)
            .uri("/")
            .body(Full::new(Bytes::new()))
            .unwrap();
        let res = Pin::from((**handler)(req)).await.unwrap();
        let bytes = http_body_util::BodyExt::collect(res.into_body()).await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn should_start_empty() {
        let handlers = TestHandlers::new();
        assert!(handlers.is_empty());
        assert!(handlers.resolve(&Method::GET).is_none());
        assert!(handlers.allowed_methods().is_empty());
    }

    #[tokio::test]
    async fn should_prefer_exact_method_over_wildcard() {
        let handlers = TestHandlers::new()
            .any(|_| async { Ok(text("any")) })
            .on(Method::GET, |_| async { Ok(text("get")) });

        let (key, handler) = handlers.resolve(&Method::GET).unwrap();
        assert_eq!(key, MethodKey::Method(Method::GET));
        assert_eq!(body_of(handler, Method::GET).await, "get");

        let (key, handler) = handlers.resolve(&Method::DELETE).unwrap();
        assert_eq!(key, MethodKey::Any);
        assert_eq!(body_of(handler, Method::DELETE).await, "any");
    }

    #[test]
    fn should_resolve_extension_methods() {
        let purge = Method::from_bytes(b"PURGE").unwrap();
        let handlers = TestHandlers::new().on(purge.clone(), |_| async { Ok(text("purged")) });

        assert!(handlers.resolve(&purge).is_some());
        assert!(handlers.resolve(&Method::GET).is_none());
    }

    #[test]
    fn should_share_handler_across_methods() {
        let handlers = TestHandlers::new().on_many(&[Method::PUT, Method::PATCH], |_| async { Ok(text("update")) });

        let (_, put) = handlers.resolve(&Method::PUT).unwrap();
        let (_, patch) = handlers.resolve(&Method::PATCH).unwrap();
        assert!(Arc::ptr_eq(put, patch));
        assert_eq!(handlers.allowed_methods(), vec![Method::PATCH, Method::PUT]);
    }

    #[test]
    fn should_replace_handler_for_same_method() {
        let handlers = TestHandlers::new()
            .on(Method::GET, |_| async { Ok(text("first")) })
            .on(Method::GET, |_| async { Ok(text("second")) });

        assert_eq!(handlers.len(), 1);
        assert!(handlers.contains(&MethodKey::Method(Method::GET)));
        assert!(!handlers.contains(&MethodKey::Any));
    }

    #[test]
    fn should_format_keys() {
        let handlers = TestHandlers::new()
            .on(Method::POST, |_| async { Ok(text("post")) })
            .any(|_| async { Ok(text("any")) });

        assert_eq!(format!("{:?}", handlers), r#"{"POST", "*"}"#);
    }
}
