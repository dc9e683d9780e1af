use crate::route::{Handler, Route};
use crate::types::{MethodKey, RouteParams};
use hyper::Method;
use std::fmt::{self, Debug, Formatter};

/// The outcome of matching a request method and path against the route table.
///
/// Exactly one of three things happens for every request: the first route whose pattern matches the path has a
/// handler for the method ([`Found`](#variant.Found)), it has none ([`MethodNotAllowed`](#variant.MethodNotAllowed)),
/// or no pattern matches at all ([`NotFound`](#variant.NotFound)).
pub enum Lookup<'r, T, E> {
    /// A route matched and resolved a handler.
    Found(RouteMatch<'r, T, E>),

    /// A route matched but has neither a handler for the method nor a wildcard handler. Later routes are not
    /// consulted.
    MethodNotAllowed {
        /// Position of the matched route in registration order.
        route_index: usize,
        /// The methods the matched route has dedicated handlers for.
        allowed: Vec<Method>,
    },

    /// No route pattern matched the path.
    NotFound,
}

impl<'r, T, E> Lookup<'r, T, E> {
    /// Returns the matched route, if the lookup found a handler.
    pub fn found(&self) -> Option<&RouteMatch<'r, T, E>> {
        match self {
            Lookup::Found(m) => Some(m),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn is_method_not_allowed(&self) -> bool {
        matches!(self, Lookup::MethodNotAllowed { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Lookup::NotFound)
    }
}

impl<'r, T, E> Debug for Lookup<'r, T, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Lookup::Found(m) => f.debug_tuple("Found").field(m).finish(),
            Lookup::MethodNotAllowed { route_index, allowed } => f
                .debug_struct("MethodNotAllowed")
                .field("route_index", route_index)
                .field("allowed", allowed)
                .finish(),
            Lookup::NotFound => f.write_str("NotFound"),
        }
    }
}

/// A route that matched a request, with the handler resolved for the request method and the parameters captured by
/// the named groups of its pattern.
pub struct RouteMatch<'r, T, E> {
    pub(crate) route_index: usize,
    pub(crate) route: &'r Route<T, E>,
    pub(crate) method_key: MethodKey,
    pub(crate) handler: &'r Handler<T, E>,
    pub(crate) params: RouteParams,
}

impl<'r, T, E> RouteMatch<'r, T, E> {
    /// Position of the matched route in registration order.
    pub fn route_index(&self) -> usize {
        self.route_index
    }

    /// Source of the matched route pattern.
    pub fn pattern(&self) -> &'r str {
        self.route.pattern()
    }

    /// The key the handler was resolved under: the request method, or [`MethodKey::Any`](./enum.MethodKey.html#variant.Any)
    /// when the wildcard handler was used.
    pub fn method_key(&self) -> &MethodKey {
        &self.method_key
    }

    pub fn params(&self) -> &RouteParams {
        &self.params
    }

    pub fn into_params(self) -> RouteParams {
        self.params
    }
}

impl<'r, T, E> Debug for RouteMatch<'r, T, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteMatch")
            .field("route_index", &self.route_index)
            .field("pattern", &self.route.pattern())
            .field("method_key", &self.method_key)
            .field("params", &self.params)
            .finish()
    }
}
