use model::Post;

#[derive(Clone, Debug)]
pub struct Database {
    posts: Vec<Post>,
}

impl Database {
    pub fn new() -> Database {
        Database { posts: vec![] }
    }

    pub fn posts(&self) -> &Vec<Post> {
        &self.posts
    }

    pub fn find_post(&self, id: u32) -> Option<&Post> {
        self.posts.iter().find(|post| post.id() == id)
    }

    /// Ids are derived from the current length, so a delete followed by an
    /// add can mint an id that is already taken.
    pub fn add_post(&mut self, title: &str) -> u32 {
        let id = self.posts.len() as u32 + 1;
        self.posts.push(Post::new(id, title));
        id
    }

    pub fn update_title(&mut self, id: u32, title: &str) -> bool {
        match self.posts.iter_mut().find(|post| post.id() == id) {
            Some(post) => {
                post.set_title(title);
                true
            }
            None => false,
        }
    }

    pub fn remove_post(&mut self, id: u32) -> Option<Post> {
        self.posts
            .iter()
            .position(|post| post.id() == id)
            .map(|index| self.posts.remove(index))
    }
}
