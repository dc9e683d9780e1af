use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::service::Service;
use hyper::{Method, Request, Response};
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder;
// Import the prelude traits.
use routerify_regex::prelude::*;
use routerify_regex::{Handlers, Router, RouterService};
use std::sync::Arc;
use std::{convert::Infallible, net::SocketAddr};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

const DEFAULT_ADDR: &str = "127.0.0.1:3000";

// A handler for "/" page.
async fn home_handler(_: Request<Incoming>) -> Result<Response<Full<Bytes>>, Infallible> {
    Ok(Response::new(Full::new(Bytes::from("Home page"))))
}

// A handler for "/users/<id>" page.
async fn user_handler(req: Request<Incoming>) -> Result<Response<Full<Bytes>>, Infallible> {
    let user_id = req.param("id").map(String::as_str).unwrap_or_default();
    Ok(Response::new(Full::new(Bytes::from(format!("Hello user {}", user_id)))))
}

async fn delete_user_handler(req: Request<Incoming>) -> Result<Response<Full<Bytes>>, Infallible> {
    let user_id = req.param("id").map(String::as_str).unwrap_or_default();
    Ok(Response::new(Full::new(Bytes::from(format!("Deleted user {}", user_id)))))
}

// Answers every method, e.g. for health checks.
async fn health_handler(req: Request<Incoming>) -> Result<Response<Full<Bytes>>, Infallible> {
    Ok(Response::new(Full::new(Bytes::from(format!("OK ({})", req.method())))))
}

fn router() -> routerify_regex::Result<Router<Incoming, Infallible>> {
    Router::builder()
        .register("^/$", Handlers::new().on(Method::GET, home_handler))
        .register(
            r"^/users/(?P<id>[0-9]+)$",
            Handlers::new()
                .on(Method::GET, user_handler)
                .on(Method::DELETE, delete_user_handler),
        )
        .register_any("^/health$", health_handler)
        .log_params()
        .build()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let router_service = Arc::new(RouterService::new(router()?));

    let addr: SocketAddr = std::env::var("ROUTER_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_owned())
        .parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "App is running");

    loop {
        let (stream, _) = match listener.accept().await {
            Ok(conn) => conn,
            Err(err) => {
                tracing::warn!(error = %err, "Error accepting connection");
                continue;
            }
        };

        let router_service = Arc::clone(&router_service);

        tokio::spawn(async move {
            let request_service = match router_service.call(&stream).await {
                Ok(service) => service,
                Err(never) => match never {},
            };

            let io = TokioIo::new(stream);
            let builder = Builder::new(TokioExecutor::new());
            if let Err(err) = builder.serve_connection(io, request_service).await {
                tracing::warn!(error = ?err, "Error serving connection");
            }
        });
    }
}
