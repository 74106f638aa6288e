use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::post::Post;

/// Category name that matches every post
pub const ALL_CATEGORIES: &str = "All";

/// The set of blog posts, newest first
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    posts: Vec<Post>,
}

impl Catalog {
    pub fn new(mut posts: Vec<Post>) -> Self {
        // Stable sort keeps input order for posts on the same day
        posts.sort_by(|a, b| b.meta.published_at.cmp(&a.meta.published_at));
        Self { posts }
    }

    /// Load every `*.md` file in `dir` (not recursive).
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let read_err = |source| Error::Read {
            path: dir.to_path_buf(),
            source,
        };

        let mut paths = Vec::new();
        for entry in fs::read_dir(dir).map_err(read_err)? {
            let path = entry.map_err(read_err)?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "md") {
                paths.push(path);
            }
        }
        // read_dir order is platform dependent
        paths.sort();

        let mut posts = Vec::with_capacity(paths.len());
        for path in paths {
            let source = fs::read_to_string(&path).map_err(|source| Error::Read {
                path: path.clone(),
                source,
            })?;
            let post = Post::parse(&source).map_err(|source| Error::Post {
                path: path.clone(),
                source: Box::new(source),
            })?;
            tracing::debug!(path = %path.display(), slug = %post.meta.slug, "loaded post");
            posts.push(post);
        }

        tracing::info!(count = posts.len(), dir = %dir.display(), "loaded posts");
        Ok(Self::new(posts))
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn get(&self, slug: &str) -> Option<&Post> {
        self.posts.iter().find(|post| post.meta.slug == slug)
    }

    /// The newest post flagged `featured`.
    pub fn featured(&self) -> Option<&Post> {
        self.posts.iter().find(|post| post.meta.featured)
    }

    /// Up to `limit` other posts in the same category.
    pub fn related<'a>(&'a self, post: &'a Post, limit: usize) -> impl Iterator<Item = &'a Post> {
        self.posts
            .iter()
            .filter(move |other| {
                other.meta.category == post.meta.category && other.meta.slug != post.meta.slug
            })
            .take(limit)
    }

    /// `"All"` followed by each distinct category in post order.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories = vec![ALL_CATEGORIES];
        for post in &self.posts {
            let category = post.meta.category.as_str();
            if !category.is_empty() && !categories.contains(&category) {
                categories.push(category);
            }
        }
        categories
    }

    pub fn in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Post> {
        self.posts
            .iter()
            .filter(move |post| category == ALL_CATEGORIES || post.meta.category == category)
    }
}
