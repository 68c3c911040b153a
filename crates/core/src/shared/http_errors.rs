use axum::http::StatusCode;

pub type HttpError = (StatusCode, String);

pub fn bad_request(message: String) -> HttpError {
    (StatusCode::BAD_REQUEST, message)
}
