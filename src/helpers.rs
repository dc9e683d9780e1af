use crate::types::RequestMeta;
use hyper::http::Extensions;
use percent_encoding::percent_decode_str;
use std::borrow::Cow;

pub(crate) fn update_req_meta_in_extensions(ext: &mut Extensions, new_req_meta: RequestMeta) {
    if let Some(existing_req_meta) = ext.get_mut::<RequestMeta>() {
        existing_req_meta.extend(new_req_meta);
    } else {
        ext.insert(new_req_meta);
    }
}

// Invalid UTF-8 sequences are replaced rather than rejected, so every request reaches route matching.
pub(crate) fn percent_decode_request_path(val: &str) -> Cow<'_, str> {
    percent_decode_str(val).decode_utf8_lossy()
}
