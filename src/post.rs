//! Defines the [`Post`] and [`Error`] types and the logic for parsing posts
//! from the file system into memory.

use crate::tag::slugify;
use chrono::{NaiveDate, NaiveDateTime};
use log::{debug, info};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// The extension of post source files.
pub const MARKDOWN_EXTENSION: &str = "md";

/// A blog post. Posts are authored once and never change after they're
/// parsed.
#[derive(Clone, Debug, PartialEq)]
pub struct Post {
    /// The source file name less its extension. This is the route argument
    /// for the post's page.
    pub name: String,

    /// The path of the source file.
    pub source: PathBuf,

    pub title: String,

    /// A short teaser shown in listings and used as the feed summary. Empty
    /// if the front matter doesn't have one.
    pub lead: String,

    pub published: NaiveDate,

    /// The tags in the order they were written.
    pub tags: Vec<String>,

    /// The post body, verbatim (markdown and inline HTML).
    pub body: String,
}

impl Post {
    /// Returns `true` if the post carries `tag`. Tags are compared by slug, so
    /// `has_tag("method chaining")` matches a post tagged `Method Chaining`.
    pub fn has_tag(&self, tag: &str) -> bool {
        let wanted = slugify(tag);
        self.tags.iter().any(|t| slugify(t) == wanted)
    }
}

/// Returns the posts carrying `tag`, preserving their order. This is the
/// listing behind a tag button.
pub fn tagged<'a>(posts: &'a [Post], tag: &str) -> Vec<&'a Post> {
    posts.iter().filter(|p| p.has_tag(tag)).collect()
}

#[derive(Deserialize)]
struct Frontmatter {
    #[serde(rename = "Title")]
    title: String,

    #[serde(default, rename = "Lead")]
    lead: String,

    #[serde(rename = "Published", deserialize_with = "deserialize_published")]
    published: NaiveDate,

    #[serde(default, rename = "Tags")]
    tags: Vec<String>,
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

const DATE_TIME_FORMATS: &[&str] =
    &["%Y-%m-%d %H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parses a `Published` value. Only the date is kept; a time of day, if
/// present, is dropped.
pub fn parse_published(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
        .or_else(|| {
            DATE_TIME_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
                .map(|dt| dt.date())
        })
}

fn deserialize_published<'de, D>(deserializer: D) -> std::result::Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_published(&s).ok_or_else(|| D::Error::custom(format!("invalid `Published` date: {:?}", s)))
}

/// Parses a single [`Post`] from its source text. `name` is the route name
/// (the file name less extension) and `source` is the path it was read from.
/// The input must be structured as follows:
///
/// 1. Initial frontmatter fence (`---`)
/// 2. YAML frontmatter with fields `Title`, `Published`, and optionally
///    `Lead` and `Tags`
/// 3. Terminal frontmatter fence (`---`) on its own line
/// 4. Post body
///
/// For example:
///
/// ```md
/// ---
/// Title: Hello, world!
/// Lead: Saying hi.
/// Published: 2014-03-02
/// Tags: [greet]
/// ---
/// # Hello
///
/// World
/// ```
pub fn parse_post(name: &str, source: &Path, input: &str) -> Result<Post> {
    fn frontmatter_indices(input: &str) -> Result<(usize, usize, usize)> {
        const FENCE: &str = "---";
        const CLOSING_FENCE: &str = "\n---";
        if !input.starts_with(FENCE) {
            return Err(Error::FrontmatterMissingStartFence);
        }
        // The closing fence must be a whole line; `----` or `--- x` don't
        // count.
        input[FENCE.len()..]
            .match_indices(CLOSING_FENCE)
            .map(|(offset, _)| FENCE.len() + offset)
            .find(|&yaml_stop| {
                let rest = &input[yaml_stop + CLOSING_FENCE.len()..];
                rest.is_empty() || rest.starts_with('\n') || rest.starts_with("\r\n")
            })
            .map(|yaml_stop| {
                (
                    FENCE.len(),                      // yaml_start
                    yaml_stop,                        // yaml_stop
                    yaml_stop + CLOSING_FENCE.len(), // body_start
                )
            })
            .ok_or(Error::FrontmatterMissingEndFence)
    }

    // Files written on Windows often start with a byte order mark.
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let (yaml_start, yaml_stop, body_start) = frontmatter_indices(input)?;
    let frontmatter: Frontmatter = serde_yaml::from_str(&input[yaml_start..yaml_stop])?;
    let body = &input[body_start..];
    let body = body
        .strip_prefix("\r\n")
        .or_else(|| body.strip_prefix('\n'))
        .unwrap_or(body);

    Ok(Post {
        name: name.to_owned(),
        source: source.to_owned(),
        title: frontmatter.title,
        lead: frontmatter.lead,
        published: frontmatter.published,
        tags: frontmatter.tags,
        body: body.to_owned(),
    })
}

/// Reads and parses a post from `path`. The post's name is the file stem.
pub fn parse_file(path: &Path) -> Result<Post> {
    match _parse_file(path) {
        Ok(p) => Ok(p),
        Err(e) => Err(Error::Annotated(
            format!("parsing post `{}`", path.display()),
            Box::new(e),
        )),
    }
}

fn _parse_file(path: &Path) -> Result<Post> {
    let name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| Error::InvalidFileName(path.to_owned()))?;

    let mut contents = String::new();
    File::open(path)?.read_to_string(&mut contents)?;
    parse_post(name, path, &contents)
}

/// Walks `dir` for post files (extension `.md`) and returns them sorted by
/// publish date, most recent first. Posts published on the same day are
/// ordered by name.
pub fn parse_posts(dir: &Path) -> Result<Vec<Post>> {
    use walkdir::WalkDir;

    let mut posts = Vec::new();
    for result in WalkDir::new(dir).sort_by_file_name() {
        let entry = result?;
        if entry.file_type().is_file() && is_post_file(entry.path()) {
            debug!("parsing post {}", entry.path().display());
            posts.push(parse_file(entry.path())?);
        }
    }

    posts.sort_by(|a, b| b.published.cmp(&a.published).then_with(|| a.name.cmp(&b.name)));
    info!("parsed {} posts from {}", posts.len(), dir.display());
    Ok(posts)
}

/// Returns `true` if `path` has the post source extension.
pub fn is_post_file(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == MARKDOWN_EXTENSION)
}

/// Represents the result of a [`Post`]-parse operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error parsing a [`Post`] object.
#[derive(Debug)]
pub enum Error {
    /// Returned when a post source file is missing its starting frontmatter
    /// fence (`---`).
    FrontmatterMissingStartFence,

    /// Returned when a post source file is missing its terminal frontmatter
    /// fence (`---` i.e., the starting fence was found but the ending one was
    /// missing).
    FrontmatterMissingEndFence,

    /// Returned when there was an error parsing the frontmatter as YAML,
    /// including missing required fields and unparseable dates.
    DeserializeYaml(serde_yaml::Error),

    /// Returned when a source file name isn't valid UTF-8.
    InvalidFileName(PathBuf),

    /// Returned for other I/O errors.
    Io(std::io::Error),

    /// Returned for WalkDir I/O errors.
    WalkDir(walkdir::Error),

    /// An error with an annotation.
    Annotated(String, Box<Error>),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::FrontmatterMissingStartFence => {
                write!(f, "Post must begin with `---`")
            }
            Error::FrontmatterMissingEndFence => {
                write!(f, "Missing closing `---`")
            }
            Error::DeserializeYaml(err) => err.fmt(f),
            Error::InvalidFileName(path) => {
                write!(f, "invalid file name: {:?}", path)
            }
            Error::Io(err) => err.fmt(f),
            Error::WalkDir(err) => err.fmt(f),
            Error::Annotated(annotation, err) => {
                write!(f, "{}: {}", &annotation, err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::FrontmatterMissingStartFence => None,
            Error::FrontmatterMissingEndFence => None,
            Error::DeserializeYaml(err) => Some(err),
            Error::InvalidFileName(_) => None,
            Error::Io(err) => Some(err),
            Error::WalkDir(err) => Some(err),
            Error::Annotated(_, err) => Some(err),
        }
    }
}

impl From<serde_yaml::Error> for Error {
    /// Converts a [`serde_yaml::Error`] into an [`Error`]. It allows us to use
    /// the `?` operator for [`serde_yaml`] deserialization functions.
    fn from(err: serde_yaml::Error) -> Error {
        Error::DeserializeYaml(err)
    }
}

impl From<walkdir::Error> for Error {
    /// Converts a [`walkdir::Error`] into an [`Error`].
    fn from(err: walkdir::Error) -> Error {
        Error::WalkDir(err)
    }
}

impl From<std::io::Error> for Error {
    /// Converts a [`std::io::Error`] into an [`Error`]. It allows us to
    /// use the `?` operator for fallible I/O functions.
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}
