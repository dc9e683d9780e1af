use crate::types::RouteParams;
use crate::Error;
use regex::Regex;
use std::fmt::{self, Debug, Formatter};

pub use self::handlers::Handlers;
pub(crate) use self::handlers::Handler;

mod handlers;

/// Represents a single route.
///
/// A route consists of a compiled regex pattern and a per-method [handler mapping](./struct.Handlers.html). It
/// shouldn't be created directly, use [`Router::register`](./struct.Router.html#method.register) or the
/// [RouterBuilder](./struct.RouterBuilder.html) methods to create a route.
///
/// The pattern is used as written: a pattern without `^` and `$` anchors matches any path that merely contains it.
pub struct Route<T, E> {
    pub(crate) regex: Regex,
    param_names: Vec<String>,
    pub(crate) handlers: Handlers<T, E>,
}

impl<T, E> Route<T, E> {
    pub(crate) fn new<P: Into<String>>(pattern: P, handlers: Handlers<T, E>) -> crate::Result<Route<T, E>> {
        let pattern = pattern.into();
        let regex = Regex::new(&pattern).map_err(|e| Error::invalid_pattern(pattern.as_str(), e))?;
        let param_names = regex.capture_names().flatten().map(str::to_owned).collect();

        Ok(Route {
            regex,
            param_names,
            handlers,
        })
    }

    /// Returns the source of the route pattern.
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// Returns the names of the named capture groups of the pattern, in the order they appear.
    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }

    /// Returns the handler mapping of the route.
    pub fn handlers(&self) -> &Handlers<T, E> {
        &self.handlers
    }

    pub(crate) fn is_match(&self, target_path: &str) -> bool {
        self.regex.is_match(target_path)
    }

    pub(crate) fn generate_route_params(&self, target_path: &str) -> RouteParams {
        if self.param_names.is_empty() {
            return RouteParams::new();
        }

        let mut route_params = RouteParams::with_capacity(self.param_names.len());
        if let Some(caps) = self.regex.captures(target_path) {
            for name in &self.param_names {
                // A group that sits in an untaken branch has no capture.
                if let Some(m) = caps.name(name) {
                    route_params.set(name.as_str(), m.as_str());
                }
            }
        }

        route_params
    }
}

impl<T, E> Debug for Route<T, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ pattern: {:?}, param_names: {:?}, handlers: {:?} }}",
            self.regex.as_str(),
            self.param_names,
            self.handlers
        )
    }
}
