#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Post {
    id: u32,
    title: String,
}

impl Post {
    pub fn new(id: u32, title: &str) -> Post {
        Post {
            id: id,
            title: title.to_string(),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }
}

/// Request body for create and update. `title` stays optional so a body
/// without it still parses and can be answered with a 400.
#[derive(Clone, Debug, Deserialize)]
pub struct PostPayload {
    pub title: Option<String>,
}

/// Response body for a delete: the remaining posts plus the removed one.
#[derive(Debug, Serialize)]
pub struct Deletion {
    pub posts: Vec<Post>,
    #[serde(rename = "deletedPost")]
    pub deleted_post: Post,
}
