use std::sync::{Arc, Mutex};

use bodyparser;
use iron::{status, Handler, IronError, IronResult, Plugin, Request, Response};
use router::Router;
use serde_json;
use urlencoded::UrlEncodedQuery;

use database::Database;
use errors::{error_response, ApiError};
use model::{Deletion, Post, PostPayload};

/// Match a `Result` into its inner value or
/// return `500 Internal Server Error`.
macro_rules! try_handler {
    ( $e:expr ) => {
        match $e {
            Ok(x) => x,
            Err(e) => return Ok(Response::with((status::InternalServerError, e.to_string())))
        }
    }
}

/// Lock a `Mutex`. This macro simply calls `m.lock().unwrap()`,
/// because the thread should panic if the lock can not be obtained:
/// we cannot recover from that.
macro_rules! lock {
    ( $e:expr ) => { $e.lock().unwrap() }
}

/// Get the value of a parameter in the URI.
/// If the parameter was absent, return `400 Bad Request`.
/// If we could not obtain the parameter list, return `500 Internal Server Error`.
macro_rules! get_http_param {
    ( $r:expr, $e:expr ) => {
        match $r.extensions.get::<Router>() {
            Some(router) => {
                match router.find($e) {
                    Some(val) => val,
                    None => return Ok(Response::with(status::BadRequest)),
                }
            }
            None => return Ok(Response::with(status::InternalServerError)),
        }
    }
}

pub struct Handlers {
    pub list_posts: ListPostsHandler,
    pub post: PostHandler,
    pub make_post: MakePostHandler,
    pub update_post: UpdatePostHandler,
    pub delete_post: DeletePostHandler,
}

impl Handlers {
    pub fn new(database: Database) -> Handlers {
        let database = Arc::new(Mutex::new(database));
        Handlers {
            list_posts: ListPostsHandler::new(database.clone()),
            post: PostHandler::new(database.clone()),
            make_post: MakePostHandler::new(database.clone()),
            update_post: UpdatePostHandler::new(database.clone()),
            delete_post: DeletePostHandler::new(database.clone()),
        }
    }
}

pub struct ListPostsHandler {
    database: Arc<Mutex<Database>>,
}

impl ListPostsHandler {
    fn new(database: Arc<Mutex<Database>>) -> ListPostsHandler {
        ListPostsHandler { database: database }
    }
}

impl Handler for ListPostsHandler {
    fn handle(&self, req: &mut Request) -> IronResult<Response> {
        // An unparsable, zero or negative limit means "no limit".
        let limit = match req.get_ref::<UrlEncodedQuery>() {
            Ok(params) => params
                .get("limit")
                .and_then(|values| values.first())
                .and_then(|raw| raw.parse::<usize>().ok()),
            Err(_) => None,
        };

        let database = lock!(self.database);
        let posts = database.posts();
        let payload = match limit {
            Some(n) if n > 0 => {
                try_handler!(serde_json::to_string(&posts[..n.min(posts.len())]))
            }
            _ => try_handler!(serde_json::to_string(posts)),
        };
        Ok(Response::with((status::Ok, payload)))
    }
}

pub struct PostHandler {
    database: Arc<Mutex<Database>>,
}

impl PostHandler {
    fn new(database: Arc<Mutex<Database>>) -> PostHandler {
        PostHandler { database: database }
    }

    fn find_post(&self, id: u32) -> Option<Post> {
        lock!(self.database).find_post(id).cloned()
    }
}

impl Handler for PostHandler {
    fn handle(&self, req: &mut Request) -> IronResult<Response> {
        let id = {
            let ref post_id = get_http_param!(req, "id");
            post_id.parse::<u32>().ok()
        };

        // A non-numeric id can never match, same as NaN against the list.
        match id.and_then(|id| self.find_post(id)) {
            Some(post) => {
                let payload = try_handler!(serde_json::to_string(&post));
                Ok(Response::with((status::Ok, payload)))
            }
            None => Err(IronError::new(
                ApiError::not_found("post not found"),
                status::NotFound,
            )),
        }
    }
}

pub struct MakePostHandler {
    database: Arc<Mutex<Database>>,
}

impl MakePostHandler {
    fn new(database: Arc<Mutex<Database>>) -> MakePostHandler {
        MakePostHandler { database: database }
    }
}

impl Handler for MakePostHandler {
    fn handle(&self, req: &mut Request) -> IronResult<Response> {
        let parsed = match req.get::<bodyparser::Struct<PostPayload>>() {
            Ok(Some(parsed)) => parsed,
            _ => return Ok(error_response(status::BadRequest, "what a stupid request")),
        };

        let title = match parsed.title {
            Some(ref title) if !title.is_empty() => title.clone(),
            _ => return Ok(error_response(status::BadRequest, "Post must have a title")),
        };

        let mut database = lock!(self.database);
        database.add_post(&title);
        let payload = try_handler!(serde_json::to_string(database.posts()));
        Ok(Response::with((status::Created, payload)))
    }
}

pub struct UpdatePostHandler {
    database: Arc<Mutex<Database>>,
}

impl UpdatePostHandler {
    fn new(database: Arc<Mutex<Database>>) -> UpdatePostHandler {
        UpdatePostHandler { database: database }
    }
}

impl Handler for UpdatePostHandler {
    fn handle(&self, req: &mut Request) -> IronResult<Response> {
        // The body has to be read before the router params borrow the request,
        // but the existence check still answers first.
        let parsed = req.get::<bodyparser::Struct<PostPayload>>();

        let id = {
            let ref post_id = get_http_param!(req, "id");
            post_id.parse::<u32>().ok()
        };

        let mut database = lock!(self.database);
        let id = match id {
            Some(id) if database.find_post(id).is_some() => id,
            _ => return Ok(error_response(status::NotFound, "Post not found")),
        };

        let parsed = match parsed {
            Ok(Some(parsed)) => parsed,
            _ => return Ok(error_response(status::BadRequest, "Provide the needed data")),
        };

        let title = match parsed.title {
            Some(ref title) if !title.is_empty() => title,
            _ => return Ok(error_response(status::BadRequest, "Post must have a title")),
        };

        database.update_title(id, title);
        let payload = try_handler!(serde_json::to_string(database.posts()));
        Ok(Response::with((status::Ok, payload)))
    }
}

pub struct DeletePostHandler {
    database: Arc<Mutex<Database>>,
}

impl DeletePostHandler {
    fn new(database: Arc<Mutex<Database>>) -> DeletePostHandler {
        DeletePostHandler { database: database }
    }
}

impl Handler for DeletePostHandler {
    fn handle(&self, req: &mut Request) -> IronResult<Response> {
        let id = {
            let ref post_id = get_http_param!(req, "id");
            post_id.parse::<u32>().ok()
        };

        let mut database = lock!(self.database);
        match id.and_then(|id| database.remove_post(id)) {
            Some(post) => {
                let deletion = Deletion {
                    posts: database.posts().clone(),
                    deleted_post: post,
                };
                let payload = try_handler!(serde_json::to_string(&deletion));
                Ok(Response::with((status::Ok, payload)))
            }
            None => Ok(error_response(status::NotFound, "Post not found")),
        }
    }
}
