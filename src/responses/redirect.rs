use crate::errors::{ResultResp, ServerError};
use astra::{Body, ResponseBuilder};
use http::header::LOCATION;

/// `303 See Other`, for sending a form POST back to a page.
pub fn see_other(location: &str) -> ResultResp {
    ResponseBuilder::new()
        .status(303)
        .header(LOCATION, location)
        .body(Body::empty())
        .map_err(|_| ServerError::InternalError)
}
