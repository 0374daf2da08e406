//! Defines the [`Tag`] type, which represents a [`crate::post::Post`] tag, and
//! [`TagCounts`], which tallies tags across a collection of posts.

use crate::post::Post;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

/// Normalizes a tag name into the form used in tag URLs: lower-cased with
/// every space replaced by a hyphen. Nothing else is stripped or validated,
/// so `"Method Chaining"` becomes `"method-chaining"` and `"C#"` becomes
/// `"c#"`.
pub fn slugify(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

/// Represents a [`crate::post::Post`] tag.
#[derive(Clone, Debug)]
pub struct Tag {
    /// The tag's name as written in the post's front matter.
    pub name: String,

    /// The normalized name (see [`slugify`]). This is what goes into the tag's
    /// URL, and it's what determines equality, so e.g. `macOS` and `MacOS`
    /// resolve to the same tag.
    pub slug: String,
}

impl Tag {
    pub fn new(name: &str) -> Tag {
        Tag {
            name: name.to_owned(),
            slug: slugify(name),
        }
    }
}

impl Hash for Tag {
    /// Implements [`Hash`] for [`Tag`] by delegating directly to the `slug`
    /// field.
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.slug.hash(state)
    }
}

impl PartialEq for Tag {
    /// Implements [`PartialEq`] and [`Eq`] for [`Tag`] by delegating directly
    /// to the `slug` field.
    fn eq(&self, other: &Self) -> bool {
        self.slug == other.slug
    }
}
impl Eq for Tag {}

/// The number of posts carrying each tag. Tags are grouped by slug; the
/// display name is whichever spelling was seen first.
#[derive(Debug, Default)]
pub struct TagCounts {
    counts: HashMap<Tag, usize>,
}

impl TagCounts {
    /// Tallies the tags of `posts`. A post that lists the same tag twice
    /// (possibly spelled differently) only counts once.
    pub fn from_posts(posts: &[Post]) -> TagCounts {
        let mut counts: HashMap<Tag, usize> = HashMap::new();
        for post in posts {
            let mut seen: Vec<String> = Vec::with_capacity(post.tags.len());
            for name in &post.tags {
                let tag = Tag::new(name);
                if seen.contains(&tag.slug) {
                    continue;
                }
                seen.push(tag.slug.clone());
                *counts.entry(tag).or_insert(0) += 1;
            }
        }
        TagCounts { counts }
    }

    /// Returns the count for `name`, matched by slug.
    pub fn get(&self, name: &str) -> Option<usize> {
        self.counts.get(&Tag::new(name)).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Returns the tags with their counts, most used first. Ties are broken by
    /// slug so the order is stable.
    pub fn sorted(&self) -> Vec<(&Tag, usize)> {
        let mut v: Vec<(&Tag, usize)> =
            self.counts.iter().map(|(tag, n)| (tag, *n)).collect();
        v.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.slug.cmp(&b.0.slug)));
        v
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn post(name: &str, tags: &[&str]) -> Post {
        Post {
            name: name.to_owned(),
            source: PathBuf::from(format!("{}.md", name)),
            title: name.to_owned(),
            lead: String::new(),
            published: NaiveDate::from_ymd_opt(2014, 3, 2).unwrap(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            body: String::new(),
        }
    }

    #[test]
    fn test_slugify() {
        assert_eq!("method-chaining", slugify("Method Chaining"));
        assert_eq!("asp.net-mvc", slugify("ASP.NET MVC"));
        assert_eq!("", slugify(""));
        assert_eq!("--", slugify("  "));
    }

    #[test]
    fn test_tag_equality_uses_slug() {
        assert_eq!(Tag::new("MacOS"), Tag::new("macOS"));
        assert_ne!(Tag::new("mac os"), Tag::new("macos"));
    }

    #[test]
    fn test_counts() {
        let posts = vec![
            post("a", &["Rust", "Testing"]),
            post("b", &["rust"]),
            post("c", &["Testing", "testing", "Method Chaining"]),
        ];
        let counts = TagCounts::from_posts(&posts);

        assert_eq!(3, counts.len());
        assert_eq!(Some(2), counts.get("RUST"));
        assert_eq!(Some(2), counts.get("testing"));
        assert_eq!(Some(1), counts.get("method chaining"));
        assert_eq!(None, counts.get("go"));

        let sorted: Vec<(&str, usize)> = counts
            .sorted()
            .into_iter()
            .map(|(tag, n)| (tag.slug.as_str(), n))
            .collect();
        assert_eq!(
            vec![("rust", 2), ("testing", 2), ("method-chaining", 1)],
            sorted
        );
    }

    #[test]
    fn test_counts_keep_first_spelling() {
        let posts = vec![post("a", &["Rust"]), post("b", &["rust"])];
        let counts = TagCounts::from_posts(&posts);
        let (tag, n) = counts.sorted()[0];
        assert_eq!("Rust", tag.name);
        assert_eq!(2, n);
    }
}
