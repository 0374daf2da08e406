//! HTML helpers for the blog's views: tag-filter buttons ([`tag_button`]) and
//! links to posts ([`post_link`]). Both are pure string and URL formatting;
//! neither checks that the link it produces leads anywhere.

use crate::bootstrap::{Button, ButtonSize, ButtonStyle};
use crate::post::is_post_file;
use crate::url::Router;
use log::debug;
use maud::{html, Markup, PreEscaped, Render};
use std::path::{Path, PathBuf};

/// The CSS classes every tag button carries.
pub const TAG_BUTTON_CLASSES: [&str; 2] = ["tag-button", "post-tag"];

/// Renders the label of a tag button: the (escaped) tag name, followed by a
/// badge with `count` if there is one.
pub fn tag_label(tag: &str, count: Option<usize>) -> Markup {
    html! {
        (tag)
        @if let Some(count) = count {
            " " (PreEscaped(format!("<span class='badge'>{}</span>", count)))
        }
    }
}

/// Renders a small button linking to the listing of posts tagged `tag`. The
/// label shows `count` in a badge when given.
pub fn tag_button(router: &Router, tag: &str, count: Option<usize>, style: ButtonStyle) -> Markup {
    let [first, second] = TAG_BUTTON_CLASSES;
    Button::link(tag_label(tag, count), router.tag_path(tag))
        .size(ButtonSize::Small)
        .style(style)
        .class(first)
        .class(second)
        .render()
}

/// Renders a link with the given `text` to the post chosen by `select`. The
/// selected view's file name, less its extension, is the route argument.
pub fn post_link<'v, F>(router: &Router, views: &'v ViewRegistry, text: &str, select: F) -> Markup
where
    F: FnOnce(&'v ViewRegistry) -> &'v Path,
{
    let view = select(views);
    let name = view.file_stem().map(|stem| stem.to_string_lossy()).unwrap_or_default();
    html! {
        a href=(router.post_path(&name)) { (text) }
    }
}

/// The known post views, i.e. the source files a [`post_link`] can point at.
#[derive(Clone, Debug, Default)]
pub struct ViewRegistry {
    views: Vec<PathBuf>,
}

impl ViewRegistry {
    pub fn new<I, P>(views: I) -> ViewRegistry
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut views: Vec<PathBuf> = views.into_iter().map(Into::into).collect();
        views.sort();
        ViewRegistry { views }
    }

    /// Registers every post source file (extension `.md`) under `dir`.
    pub fn from_directory(dir: &Path) -> Result<ViewRegistry, walkdir::Error> {
        use walkdir::WalkDir;

        let mut views = Vec::new();
        for result in WalkDir::new(dir) {
            let entry = result?;
            if entry.file_type().is_file() && is_post_file(entry.path()) {
                views.push(entry.into_path());
            }
        }
        debug!("registered {} views under {}", views.len(), dir.display());
        Ok(ViewRegistry::new(views))
    }

    /// Looks up a view by name (its file name less extension).
    pub fn get(&self, name: &str) -> Option<&Path> {
        self.views
            .iter()
            .find(|view| view.file_stem().map_or(false, |stem| stem == name))
            .map(PathBuf::as_path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.views.iter().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use url::Url;

    fn router() -> Router {
        Router::new(Url::parse("https://example.org/").unwrap())
    }

    fn views() -> ViewRegistry {
        ViewRegistry::new(vec![
            "posts/method-chaining.md",
            "posts/fluent-helpers.cshtml",
            "posts/archive/release.notes.md",
            "posts/README",
        ])
    }

    #[test]
    fn test_tag_button() {
        assert_eq!(
            concat!(
                r#"<a class="btn btn-info btn-small tag-button post-tag" href="/tags/method-chaining">"#,
                "Method Chaining <span class='badge'>3</span></a>",
            ),
            tag_button(&router(), "Method Chaining", Some(3), ButtonStyle::Info).into_string()
        );
    }

    #[test]
    fn test_tag_button_without_count() {
        let html = tag_button(&router(), "Rust", None, ButtonStyle::Default).into_string();
        assert_eq!(
            r#"<a class="btn btn-small tag-button post-tag" href="/tags/rust">Rust</a>"#,
            html
        );
        assert!(!html.contains("badge"));
    }

    #[test]
    fn test_tag_button_zero_count_still_has_badge() {
        let html = tag_button(&router(), "Rust", Some(0), ButtonStyle::Info).into_string();
        assert!(html.contains("<span class='badge'>0</span>"));
    }

    #[test]
    fn test_tag_button_escapes_label() {
        let html = tag_button(&router(), "<script>", None, ButtonStyle::Info).into_string();
        assert!(html.contains(">&lt;script&gt;</a>"));
        assert!(html.contains(r#"href="/tags/&lt;script&gt;""#));
    }

    #[test]
    fn test_tag_button_empty_tag() {
        let html = tag_button(&router(), "", Some(1), ButtonStyle::Info).into_string();
        assert!(html.contains(r#"href="/tags/""#));
        assert!(html.contains("> <span class='badge'>1</span></a>"));
    }

    #[test]
    fn test_tag_url_segment_is_lowercase_hyphenated() {
        for (tag, wanted) in &[
            ("Method Chaining", "/tags/method-chaining"),
            ("ASP.NET MVC 4", "/tags/asp.net-mvc-4"),
            ("already-slugged", "/tags/already-slugged"),
        ] {
            let html = tag_button(&router(), tag, None, ButtonStyle::Info).into_string();
            assert!(html.contains(&format!(r#"href="{}""#, wanted)), "{}", html);
        }
    }

    #[test]
    fn test_post_link() {
        let views = views();
        assert_eq!(
            r#"<a href="/posts/method-chaining">Method chaining in C#</a>"#,
            post_link(&router(), &views, "Method chaining in C#", |v| v
                .get("method-chaining")
                .unwrap())
            .into_string()
        );
    }

    #[test]
    fn test_post_link_strips_any_extension() {
        let views = views();
        for (name, wanted) in &[
            ("fluent-helpers", "/posts/fluent-helpers"),
            ("release.notes", "/posts/release.notes"),
            ("README", "/posts/README"),
        ] {
            let html = post_link(&router(), &views, "x", |v| v.get(name).unwrap()).into_string();
            assert!(html.contains(&format!(r#"href="{}""#, wanted)), "{}", html);
        }
    }

    #[test]
    fn test_post_link_escapes_text() {
        let views = views();
        let html = post_link(&router(), &views, "Tom & Jerry", |_| Path::new("a.md")).into_string();
        assert_eq!(r#"<a href="/posts/a">Tom &amp; Jerry</a>"#, html);
    }

    #[test]
    fn test_registry_lookup() {
        let views = views();
        assert_eq!(4, views.len());
        assert_eq!(Some(Path::new("posts/README")), views.get("README"));
        assert_eq!(None, views.get("missing"));
    }

    #[test]
    fn test_registry_from_directory() -> Result<(), walkdir::Error> {
        let views = ViewRegistry::from_directory(Path::new("./testdata/posts"))?;
        let names: Vec<String> = views
            .iter()
            .map(|p| p.file_stem().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(vec!["fluent-helpers", "hello-world", "method-chaining"], names);
        Ok(())
    }
}
