use crate::types::RouteParams;
use std::net::SocketAddr;

/// Per-request data this crate stores in the request extensions.
#[derive(Debug, Clone, Default)]
pub(crate) struct RequestMeta {
    route_params: Option<RouteParams>,
    remote_addr: Option<SocketAddr>,
}

impl RequestMeta {
    pub fn with_route_params(route_params: RouteParams) -> RequestMeta {
        RequestMeta {
            route_params: Some(route_params),
            remote_addr: None,
        }
    }

    pub fn with_remote_addr(remote_addr: SocketAddr) -> RequestMeta {
        RequestMeta {
            route_params: None,
            remote_addr: Some(remote_addr),
        }
    }

    pub fn route_params(&self) -> Option<&RouteParams> {
        self.route_params.as_ref()
    }

    pub fn remote_addr(&self) -> Option<&SocketAddr> {
        self.remote_addr.as_ref()
    }

    // Fields set in `other` win.
    pub fn extend(&mut self, other: RequestMeta) {
        if let Some(route_params) = other.route_params {
            self.route_params = Some(route_params);
        }
        if let Some(remote_addr) = other.remote_addr {
            self.remote_addr = Some(remote_addr);
        }
    }
}
