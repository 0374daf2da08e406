//! Defines the [`Router`], which maps tags and post names onto the site's
//! fixed route layout: tag listings live under `{site_root}tags/` and posts
//! under `{site_root}posts/`.

use crate::tag::slugify;
use url::{ParseError, Url};

const TAGS_SECTION: &str = "tags";
const POSTS_SECTION: &str = "posts";

/// Resolves the URLs of tag listings and post pages.
#[derive(Clone, Debug)]
pub struct Router {
    site_root: Url,
}

impl Router {
    /// Constructs a new `Router` for a site rooted at `site_root`.
    ///
    /// A trailing slash is significant to [`Url::join`]: without it, the last
    /// path component is considered to be a "file" name and is dropped when
    /// joining. The root is always a directory, so a missing trailing slash is
    /// added here.
    pub fn new(mut site_root: Url) -> Router {
        if !site_root.path().ends_with('/') {
            let path = format!("{}/", site_root.path());
            site_root.set_path(&path);
        }
        Router { site_root }
    }

    pub fn site_root(&self) -> &Url {
        &self.site_root
    }

    /// Returns the root-relative path of the listing page for `tag`. The tag
    /// is normalized with [`slugify`] and embedded as-is; nothing is
    /// validated, so an empty tag yields `{root}tags/`.
    pub fn tag_path(&self, tag: &str) -> String {
        format!("{}{}/{}", self.site_root.path(), TAGS_SECTION, slugify(tag))
    }

    /// Returns the root-relative path of the page for the post named `name`.
    /// The name is used verbatim.
    pub fn post_path(&self, name: &str) -> String {
        format!("{}{}/{}", self.site_root.path(), POSTS_SECTION, name)
    }

    /// Resolves a root-relative `path` (as returned by [`Router::tag_path`]
    /// or [`Router::post_path`]) against the site root.
    pub fn absolute(&self, path: &str) -> Result<Url> {
        self.site_root.join(path)
    }
}

type Result<T> = std::result::Result<T, ParseError>;
