use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::service::Service;
use hyper::{Request, Response};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder;
use routerify_regex::{RouteError, Router, RouterService};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot::{self, Sender};

pub struct Serve {
    addr: SocketAddr,
    tx: Sender<()>,
    client: Client<HttpConnector, Full<Bytes>>,
}

impl Serve {
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn new_request(&self, method: &str, route: &str) -> http::request::Builder {
        http::request::Request::builder()
            .method(method.to_ascii_uppercase().as_str())
            .uri(format!("http://{}{}", self.addr(), route))
    }

    pub async fn send(&self, method: &str, route: &str) -> Response<Incoming> {
        let req: Request<Full<Bytes>> = self.new_request(method, route).body(Full::new(Bytes::new())).unwrap();
        self.client.request(req).await.unwrap()
    }

    pub fn shutdown(self) {
        self.tx.send(()).unwrap();
    }
}

pub async fn serve<E>(router: Router<Incoming, E>) -> Serve
where
    E: Into<RouteError> + 'static,
{
    // Bind a TCP listener to an available port.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router_service = Arc::new(RouterService::new(router));
    let (tx, mut rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        loop {
            let stream = tokio::select! {
                _ = &mut rx => break,
                accepted = listener.accept() => accepted.unwrap().0,
            };

            let router_service = Arc::clone(&router_service);
            tokio::spawn(async move {
                let request_service = router_service.call(&stream).await.unwrap();
                let io = TokioIo::new(stream);
                let builder = Builder::new(TokioExecutor::new());
                let _ = builder.serve_connection(io, request_service).await;
            });
        }
    });

    let client = Client::builder(TokioExecutor::new()).build_http();

    Serve { addr, tx, client }
}

pub async fn into_text<B>(body: B) -> String
where
    B: hyper::body::Body<Data = Bytes> + Send,
    B::Error: std::error::Error + Send + Sync + 'static,
{
    use http_body_util::BodyExt;
    String::from_utf8_lossy(&body.collect().await.unwrap().to_bytes()).to_string()
}
