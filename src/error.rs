use thiserror::Error;

/// The error type returned by a route handler, boxed so that every handler of a router can surface its own error
/// type through a single [`Error::Handler`](./enum.Error.html#variant.Handler).
pub type RouteError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The error type used by this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// A route pattern could not be compiled into a regular expression.
    ///
    /// This is a configuration error: it is returned by the registration call that received the pattern and the route
    /// is never added to the table.
    #[error("could not compile the route pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The error returned by a route handler, passed through untouched.
    #[error(transparent)]
    Handler(RouteError),
}

impl Error {
    pub(crate) fn invalid_pattern<P: Into<String>>(pattern: P, source: regex::Error) -> Error {
        Error::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }

    /// Returns `true` if the error was raised while registering a route.
    pub fn is_invalid_pattern(&self) -> bool {
        matches!(self, Error::InvalidPattern { .. })
    }
}
