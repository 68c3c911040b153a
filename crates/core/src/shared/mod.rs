mod http_errors;
pub use http_errors::{bad_request, HttpError};
