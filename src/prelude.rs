//! Re-exports the extension traits, import them with `use routerify_regex::prelude::*`.

pub use crate::ext::RequestExt;
