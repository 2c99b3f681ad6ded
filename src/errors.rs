use std::error::Error;
use std::fmt;

use iron::headers::ContentType;
use iron::modifiers::Header;
use iron::status::Status;
use iron::Response;

/// An error that already knows which HTTP status it maps to. Raised through
/// `IronError` so the error middleware turns it into a `{"msg": ...}` body.
#[derive(Debug)]
pub struct ApiError {
    status: Status,
    msg: String,
}

impl ApiError {
    pub fn not_found(msg: &str) -> ApiError {
        ApiError {
            status: Status::NotFound,
            msg: msg.to_string(),
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.msg)
    }
}

impl Error for ApiError {}

/// Build a `{"msg": ...}` response with the given status.
pub fn error_response(status: Status, msg: &str) -> Response {
    let body = json!({ "msg": msg }).to_string();
    Response::with((status, Header(ContentType::json()), body))
}
