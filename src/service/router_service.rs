use crate::router::Router;
use crate::service::request_service::{RequestService, RequestServiceBuilder};
use crate::RouteError;
use hyper::body::Incoming;
use hyper::service::Service;
use std::convert::Infallible;
use std::future::{ready, Ready};
use tokio::net::TcpStream;

/// A [`Service`](https://docs.rs/hyper/1/hyper/service/trait.Service.html) that creates a
/// [RequestService](./struct.RequestService.html) for each accepted connection.
///
/// This `RouterService<E>` type accepts a single type parameter: `E`, the error type of the route handlers. The
/// requests of a connection are [hyper::body::Incoming](https://docs.rs/hyper/1/hyper/body/struct.Incoming.html).
///
/// # Examples
///
/// ```no_run
/// use http_body_util::Full;
/// use hyper::body::{Bytes, Incoming};
/// use hyper::service::Service;
/// use hyper::{Request, Response};
/// use hyper_util::rt::{TokioExecutor, TokioIo};
/// use hyper_util::server::conn::auto::Builder;
/// use routerify_regex::{Router, RouterService};
/// use std::convert::Infallible;
/// use std::net::SocketAddr;
/// use std::sync::Arc;
/// use tokio::net::TcpListener;
///
/// async fn home(_: Request<Incoming>) -> Result<Response<Full<Bytes>>, Infallible> {
///     Ok(Response::new(Full::new(Bytes::from("Home page"))))
/// }
///
/// fn router() -> Router<Incoming, Infallible> {
///     Router::builder().register_any("^/$", home).build().unwrap()
/// }
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
///     let service = Arc::new(RouterService::new(router()));
///
///     let addr: SocketAddr = SocketAddr::from(([127, 0, 0, 1], 3001));
///     let listener = TcpListener::bind(addr).await?;
///
///     loop {
///         let (stream, _) = listener.accept().await?;
///         let router_service = service.clone();
///
///         tokio::spawn(async move {
///             let request_service = router_service.call(&stream).await.unwrap();
///             let io = TokioIo::new(stream);
///
///             let builder = Builder::new(TokioExecutor::new());
///             if let Err(err) = builder.serve_connection(io, request_service).await {
///                 eprintln!("Error serving connection: {:?}", err);
///             }
///         });
///     }
/// }
/// ```
#[derive(Debug)]
pub struct RouterService<E> {
    builder: RequestServiceBuilder<Incoming, E>,
}

impl<E: Into<RouteError> + 'static> RouterService<E> {
    /// Creates a new service with the provided router, ready to be called once per accepted connection.
    pub fn new(router: Router<Incoming, E>) -> RouterService<E> {
        let builder = RequestServiceBuilder::new(router);
        RouterService { builder }
    }
}

impl<E: Into<RouteError> + 'static> Service<&TcpStream> for RouterService<E> {
    type Response = RequestService<Incoming, E>;
    type Error = Infallible;
    type Future = Ready<Result<Self::Response, Self::Error>>;

    fn call(&self, conn: &TcpStream) -> Self::Future {
        let addr = match conn.peer_addr() {
            Ok(addr) => addr,
            Err(_) => std::net::SocketAddr::from(([0, 0, 0, 0], 0)),
        };
        let req_service = self.builder.build(addr);

        ready(Ok(req_service))
    }
}
