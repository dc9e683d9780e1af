//! Extension traits that give handlers access to the data attached to a request during dispatch.

pub use self::request::RequestExt;

mod request;
