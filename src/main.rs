extern crate bodyparser;
extern crate env_logger;
extern crate iron;
#[macro_use]
extern crate log;
extern crate logger;
extern crate mount;
extern crate owo_colors;
extern crate router;
extern crate serde;
#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate serde_json;
extern crate staticfile;
extern crate urlencoded;

#[cfg(test)]
extern crate iron_test;

mod database;
mod errors;
mod handlers;
mod middleware;
mod model;

use std::env;
use std::path::Path;

use iron::prelude::Chain;
use iron::Iron;
use logger::Logger;
use mount::Mount;
use router::Router;
use staticfile::Static;

use database::Database;
use handlers::Handlers;
use middleware::{Cors, ErrorHandler, JsonAfterMiddleware, NotFound, RequestLogger};

/// Assemble the full middleware chain around an injected store, so tests can
/// run the exact production stack against their own fixtures.
fn app(database: Database) -> Chain {
    let (logger_before, logger_after) = Logger::new(None);

    let handlers = Handlers::new(database);

    let mut router = Router::new();
    router.get("/", handlers.list_posts, "list_posts");
    router.get("/:id", handlers.post, "show_post");
    router.post("/", handlers.make_post, "make_post");
    router.put("/:id", handlers.update_post, "update_post");
    router.delete("/:id", handlers.delete_post, "delete_post");

    let mut mount = Mount::new();
    mount.mount("/api/posts", router);
    mount.mount("/", Static::new(Path::new("public")));

    let mut chain = Chain::new(mount);
    chain.link_before(logger_before); // Should be first!
    chain.link_before(RequestLogger);
    chain.link_after(NotFound);
    chain.link_after(ErrorHandler);
    chain.link_after(JsonAfterMiddleware);
    chain.link_after(Cors);
    chain.link_after(logger_after); // Should be last!
    chain
}

// RUST_LOG=info calliope_backend
fn main() {
    env_logger::init();

    let mut database = Database::new();
    database.add_post("Post One");
    database.add_post("Post Two");
    database.add_post("Post Three");

    let port = env::var("PORT")
        .ok()
        .and_then(|raw| raw.parse::<u16>().ok())
        .unwrap_or(8080);

    println!("server running at {}", port);
    Iron::new(app(database)).http(("0.0.0.0", port)).unwrap();
}
