use crate::helpers;
use crate::router::Router;
use crate::types::RequestMeta;
use crate::RouteError;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{service::Service, Request, Response};
use std::fmt::{self, Debug, Formatter};
use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;

/// A hyper [`Service`](https://docs.rs/hyper/1/hyper/service/trait.Service.html) that dispatches the requests of one
/// connection through a shared [Router](./struct.Router.html).
pub struct RequestService<T, E> {
    pub(crate) router: Arc<Router<T, E>>,
    pub(crate) remote_addr: SocketAddr,
}

impl<T, E> Service<Request<T>> for RequestService<T, E>
where
    T: Send + 'static,
    E: Into<RouteError> + 'static,
{
    type Response = Response<Full<Bytes>>;
    type Error = crate::Error;
    #[allow(clippy::type_complexity)]
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send + 'static>>;

    fn call(&self, mut req: Request<T>) -> Self::Future {
        let router = Arc::clone(&self.router);
        let remote_addr = self.remote_addr;

        let fut = async move {
            helpers::update_req_meta_in_extensions(req.extensions_mut(), RequestMeta::with_remote_addr(remote_addr));
            router.serve(req).await
        };

        Box::pin(fut)
    }
}

impl<T, E> Debug for RequestService<T, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{{ remote_addr: {}, router: {:?} }}", self.remote_addr, self.router)
    }
}

/// Owns the one shared handle to a router and hands out a [RequestService](./struct.RequestService.html) per
/// connection.
pub struct RequestServiceBuilder<T, E> {
    router: Arc<Router<T, E>>,
}

impl<T, E> RequestServiceBuilder<T, E> {
    pub fn new(router: Router<T, E>) -> Self {
        Self {
            router: Arc::new(router),
        }
    }

    pub fn build(&self, remote_addr: SocketAddr) -> RequestService<T, E> {
        RequestService {
            router: Arc::clone(&self.router),
            remote_addr,
        }
    }
}

impl<T, E> Debug for RequestServiceBuilder<T, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{{ router: {:?} }}", self.router)
    }
}
