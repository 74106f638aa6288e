use serde::{Deserialize, Serialize};

use crate::block::Block;
use crate::error::{Error, Result};
use crate::parser;

const WORDS_PER_MINUTE: usize = 200;
const FRONT_MATTER_FENCE: &str = "+++";

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Author {
    pub name: String,
    pub role: String,
    pub avatar: String,
}

/// Metadata from a post's TOML front matter.
///
/// `slug` and `read_time` are filled in by [`Post::parse`] when absent.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct PostMeta {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub author: Author,
    pub category: String,
    /// `YYYY-MM-DD`, so plain string order is date order
    pub published_at: String,
    pub read_time: String,
    pub cover_image: String,
    pub featured: bool,
}

/// A blog post: front matter plus a markdown-subset body
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Post {
    pub meta: PostMeta,
    pub body: String,
}

impl Post {
    /// Parse a post source with an optional leading `+++` TOML block.
    pub fn parse(source: &str) -> Result<Self> {
        let (front_matter, body) = split_front_matter(source)?;
        let mut meta: PostMeta = match front_matter {
            Some(toml_src) => toml::from_str(toml_src)?,
            None => PostMeta::default(),
        };
        let body = body.trim().to_string();

        if meta.slug.is_empty() {
            meta.slug = slugify(&meta.title);
        }
        if meta.read_time.is_empty() {
            meta.read_time = estimate_read_time(&body);
        }

        Ok(Self { meta, body })
    }

    /// Parse the body into blocks.
    pub fn blocks(&self) -> Vec<Block> {
        parser::parse(&self.body)
    }
}

fn split_front_matter(source: &str) -> Result<(Option<&str>, &str)> {
    let Some(rest) = source.strip_prefix(FRONT_MATTER_FENCE) else {
        return Ok((None, source));
    };
    let Some(rest) = rest
        .strip_prefix('\n')
        .or_else(|| rest.strip_prefix("\r\n"))
    else {
        return Ok((None, source));
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FRONT_MATTER_FENCE {
            return Ok((Some(&rest[..offset]), &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    Err(Error::UnclosedFrontMatter)
}

/// Lowercase ASCII alphanumerics joined by single dashes.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    if slug.ends_with('-') {
        slug.pop();
    }
    slug
}

pub fn estimate_read_time(body: &str) -> String {
    let words = body.split_whitespace().count();
    let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
    format!("{minutes} min read")
}
