use crate::types::{RequestMeta, RouteParams};
use hyper::Request;
use lazy_static::lazy_static;
use std::net::SocketAddr;

lazy_static! {
    static ref EMPTY_ROUTE_PARAMS: RouteParams = RouteParams::new();
}

/// A extension trait which extends the [`hyper::Request`](https://docs.rs/hyper/1/hyper/struct.Request.html) type
/// with some helpful methods.
pub trait RequestExt {
    /// It returns the route parameters captured by the named groups of the matched route pattern.
    ///
    /// A route without named groups yields an empty map.
    ///
    /// # Examples
    ///
    /// ```
    /// use http_body_util::Full;
    /// use hyper::{body::Bytes, Method, Request, Response};
    /// use routerify_regex::prelude::*;
    /// use routerify_regex::{Handlers, Router};
    /// use std::convert::Infallible;
    ///
    /// # fn run() -> Router<Full<Bytes>, Infallible> {
    /// let router = Router::builder()
    ///     .register(
    ///         r"^/users/(?P<userName>[^/]+)/books/(?P<bookName>[^/]+)$",
    ///         Handlers::new().on(Method::GET, |req: Request<Full<Bytes>>| async move {
    ///             let params = req.params();
    ///             let user_name = params.get("userName").unwrap();
    ///             let book_name = params.get("bookName").unwrap();
    ///
    ///             Ok(Response::new(Full::new(Bytes::from(format!(
    ///                 "Username: {}, Book Name: {}",
    ///                 user_name, book_name
    ///             )))))
    ///         }),
    ///     )
    ///     .build()
    ///     .unwrap();
    /// # router
    /// # }
    /// # run();
    /// ```
    fn params(&self) -> &RouteParams;

    /// It returns the route parameter value by the name of the named group.
    ///
    /// # Examples
    ///
    /// ```
    /// use http_body_util::Full;
    /// use hyper::{body::Bytes, Request, Response};
    /// use routerify_regex::prelude::*;
    /// use routerify_regex::Router;
    /// use std::convert::Infallible;
    ///
    /// # fn run() -> Router<Full<Bytes>, Infallible> {
    /// let router = Router::builder()
    ///     .register_any(r"^/users/(?P<userId>[0-9]+)$", |req: Request<Full<Bytes>>| async move {
    ///         let user_id = req.param("userId").unwrap();
    ///         Ok(Response::new(Full::new(Bytes::from(format!("User {}", user_id)))))
    ///     })
    ///     .build()
    ///     .unwrap();
    /// # router
    /// # }
    /// # run();
    /// ```
    fn param<P: AsRef<str>>(&self, param_name: P) -> Option<&String>;

    /// It returns the remote address of the incoming request, when the request was received through a
    /// [`RouterService`](../struct.RouterService.html).
    fn remote_addr(&self) -> Option<SocketAddr>;
}

impl<T> RequestExt for Request<T> {
    fn params(&self) -> &RouteParams {
        self.extensions()
            .get::<RequestMeta>()
            .and_then(RequestMeta::route_params)
            .unwrap_or(&EMPTY_ROUTE_PARAMS)
    }

    fn param<P: AsRef<str>>(&self, param_name: P) -> Option<&String> {
        self.params().get(param_name)
    }

    fn remote_addr(&self) -> Option<SocketAddr> {
        self.extensions()
            .get::<RequestMeta>()
            .and_then(RequestMeta::remote_addr)
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::update_req_meta_in_extensions;

    #[test]
    fn should_return_empty_params_without_meta() {
        let req = Request::new(());
        assert!(req.params().is_empty());
        assert_eq!(req.param("id"), None);
        assert_eq!(req.remote_addr(), None);
    }

    #[test]
    fn should_read_params_and_remote_addr() {
        let addr: SocketAddr = "10.0.0.1:5555".parse().unwrap();
        let mut params = RouteParams::new();
        params.set("id", "42");

        let mut req = Request::new(());
        update_req_meta_in_extensions(req.extensions_mut(), RequestMeta::with_remote_addr(addr));
        update_req_meta_in_extensions(req.extensions_mut(), RequestMeta::with_route_params(params));

        assert_eq!(req.param("id"), Some(&"42".to_owned()));
        assert_eq!(req.params().len(), 1);
        assert_eq!(req.remote_addr(), Some(addr));
    }
}
