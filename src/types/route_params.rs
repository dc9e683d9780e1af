use std::collections::HashMap;

/// Represents a map of the route parameters captured by the named groups of a route pattern.
///
/// A route registered with the pattern `^/users/(?P<userName>[^/]+)/books/(?P<bookName>[^/]+)$` that matches
/// `/users/alice/books/HarryPotter` produces `{ "userName": "alice", "bookName": "HarryPotter" }`.
///
/// Named groups that did not take part in the match have no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams(HashMap<String, String>);

impl RouteParams {
    /// Creates an empty route parameters map.
    pub fn new() -> RouteParams {
        RouteParams(HashMap::new())
    }

    /// Creates an empty route parameters map with the specified capacity.
    pub fn with_capacity(capacity: usize) -> RouteParams {
        RouteParams(HashMap::with_capacity(capacity))
    }

    /// Sets a new parameter entry with the specified key and the value.
    pub fn set<N: Into<String>, V: Into<String>>(&mut self, param_name: N, param_val: V) {
        self.0.insert(param_name.into(), param_val.into());
    }

    /// Returns the route parameter value mapped with the specified key.
    ///
    /// # Examples
    ///
    /// ```
    /// use routerify_regex::RouteParams;
    ///
    /// let mut params = RouteParams::new();
    /// params.set("id", "42");
    ///
    /// assert_eq!(params.get("id"), Some(&"42".to_owned()));
    /// assert_eq!(params.get("name"), None);
    /// ```
    pub fn get<N: AsRef<str>>(&self, param_name: N) -> Option<&String> {
        self.0.get(param_name.as_ref())
    }

    /// Checks if a route parameter exists.
    pub fn has<N: AsRef<str>>(&self, param_name: N) -> bool {
        self.0.contains_key(param_name.as_ref())
    }

    /// Returns the length of the route parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no parameter was captured.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an [`Iterator`](https://doc.rust-lang.org/std/collections/hash_map/struct.Iter.html) over the parameter
    /// names and values, in no particular order.
    pub fn iter(&self) -> std::collections::hash_map::Iter<'_, String, String> {
        self.0.iter()
    }

    /// Returns an [`Iterator`](https://doc.rust-lang.org/std/collections/hash_map/struct.Keys.html) over the parameter
    /// names.
    pub fn params_names(&self) -> std::collections::hash_map::Keys<'_, String, String> {
        self.0.keys()
    }
}

impl<'a> IntoIterator for &'a RouteParams {
    type Item = (&'a String, &'a String);
    type IntoIter = std::collections::hash_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
