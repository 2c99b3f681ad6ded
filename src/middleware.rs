use iron::headers::{AccessControlAllowOrigin, ContentType};
use iron::method::Method;
use iron::{status, AfterMiddleware, BeforeMiddleware, IronError, IronResult, Request, Response};
use owo_colors::OwoColorize;
use router::NoRoute;

use errors::{error_response, ApiError};

/// Logs one line per request, colored by method like the usual dev-server
/// consoles: GET green, POST blue, PUT yellow, DELETE red.
pub struct RequestLogger;

impl BeforeMiddleware for RequestLogger {
    fn before(&self, req: &mut Request) -> IronResult<()> {
        let line = format!("{} {}", req.method, req.url);
        match req.method {
            Method::Get => info!("{}", line.green()),
            Method::Post => info!("{}", line.blue()),
            Method::Put => info!("{}", line.yellow()),
            Method::Delete => info!("{}", line.red()),
            _ => info!("{}", line),
        }
        Ok(())
    }
}

/// Default API responses to JSON. Static files already carry their own
/// content type, so only fill it in when the handler left it unset.
pub struct JsonAfterMiddleware;

impl AfterMiddleware for JsonAfterMiddleware {
    fn after(&self, _: &mut Request, mut res: Response) -> IronResult<Response> {
        if res.headers.get::<ContentType>().is_none() {
            res.headers.set(ContentType::json());
        }
        Ok(res)
    }
}

/// Rewrites "nothing matched" errors to the canonical Page Not Found error
/// before the generic translator renders them. Covers both router misses
/// (`NoRoute`) and files missing from the static mount.
pub struct NotFound;

impl AfterMiddleware for NotFound {
    fn catch(&self, _: &mut Request, err: IronError) -> IronResult<Response> {
        let already_api = err.error.downcast_ref::<ApiError>().is_some();
        let unmatched = err.error.downcast_ref::<NoRoute>().is_some()
            || err.response.status == Some(status::NotFound);
        if !already_api && unmatched {
            return Err(IronError::new(
                ApiError::not_found("Page Not Found"),
                status::NotFound,
            ));
        }
        Err(err)
    }
}

/// Terminal translator: any error still in flight becomes a `{"msg": ...}`
/// body, with the status taken from the error or defaulting to 501.
pub struct ErrorHandler;

impl AfterMiddleware for ErrorHandler {
    fn catch(&self, _: &mut Request, err: IronError) -> IronResult<Response> {
        let status = match err.error.downcast_ref::<ApiError>() {
            Some(api) => api.status(),
            None => err.response.status.unwrap_or(status::NotImplemented),
        };
        Ok(error_response(status, &err.error.to_string()))
    }
}

/// The static client fetches the API cross-origin during development.
pub struct Cors;

impl AfterMiddleware for Cors {
    fn after(&self, _: &mut Request, mut res: Response) -> IronResult<Response> {
        res.headers.set(AccessControlAllowOrigin::Any);
        Ok(res)
    }
}
