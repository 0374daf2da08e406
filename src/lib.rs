//! The library code behind my blog. A post is a markdown file with YAML front
//! matter ([`crate::post`]); the site's views link posts together with two
//! helpers ([`crate::helpers`]):
//!
//! 1. Tag buttons, which link to the listing of every post carrying a tag and
//!    show how many posts that is
//! 2. Post links, which link to a post's page by its source file name
//!
//! Both resolve their URLs through the [`crate::url::Router`], which knows the
//! fixed route layout (`tags/{tag}` and `posts/{name}` under the site root),
//! and the tag buttons are built with the fluent builder in
//! [`crate::bootstrap`]. The remaining modules load the project
//! configuration ([`crate::config`]), count tags across posts
//! ([`crate::tag`]), and produce the Atom feed ([`crate::feed`]).

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod bootstrap;
pub mod config;
pub mod feed;
pub mod helpers;
pub mod post;
pub mod tag;
pub mod url;
mod util;
