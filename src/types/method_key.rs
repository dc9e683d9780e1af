use hyper::Method;
use std::fmt::{self, Display, Formatter};

/// The key a route handler is registered under: either one HTTP method or the wildcard that stands for any method.
///
/// During dispatch the handler registered under the exact request method is preferred; the [`Any`](#variant.Any)
/// handler is only used when the route has no handler for that method.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MethodKey {
    /// A single HTTP method token, including extension methods.
    Method(Method),

    /// Any HTTP method.
    Any,
}

impl MethodKey {
    /// Returns `true` for the wildcard key.
    pub fn is_any(&self) -> bool {
        matches!(self, MethodKey::Any)
    }
}

impl From<Method> for MethodKey {
    fn from(method: Method) -> Self {
        MethodKey::Method(method)
    }
}

impl From<&Method> for MethodKey {
    fn from(method: &Method) -> Self {
        MethodKey::Method(method.clone())
    }
}

impl Display for MethodKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            MethodKey::Method(method) => f.write_str(method.as_str()),
            MethodKey::Any => f.write_str("*"),
        }
    }
}
