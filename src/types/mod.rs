pub use self::method_key::MethodKey;
pub(crate) use self::request_meta::RequestMeta;
pub use self::route_params::RouteParams;

mod method_key;
mod request_meta;
mod route_params;
