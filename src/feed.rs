//! Support for creating Atom feeds from a list of posts.

use crate::config::Author;
use crate::post::Post;
use crate::tag::Tag;
use crate::url::Router;
use atom_syndication::{Category, Entry, Error as AtomError, Feed, Link, Person, Text};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Offset, TimeZone, Utc};
use std::fmt;
use std::io::Write;
use url::ParseError;

/// Bundled configuration for creating a feed.
pub struct FeedConfig<'a> {
    pub title: String,
    pub author: Option<Author>,
    pub router: &'a Router,
}

/// Creates a feed from some configuration ([`FeedConfig`]) and a list of
/// [`Post`]s (newest first) and writes the result to a [`std::io::Write`].
pub fn write_feed<W: Write>(config: FeedConfig, posts: &[Post], w: W) -> Result<()> {
    feed(config, posts)?.write_to(w)?;
    Ok(())
}

fn feed(config: FeedConfig, posts: &[Post]) -> Result<Feed> {
    let home_page = config.router.site_root().to_string();
    let mut feed = Feed::default();
    feed.set_entries(feed_entries(&config, posts)?);
    feed.set_id(home_page.clone());
    feed.set_updated(match posts.iter().map(|p| p.published).max() {
        Some(date) => midnight_utc(date),
        None => Utc::now().with_timezone(&Utc.fix()),
    });
    feed.set_authors(author_to_people(config.author.clone()));
    feed.set_links(vec![alternate_link(home_page)]);
    feed.set_title(config.title);
    Ok(feed)
}

fn feed_entries(config: &FeedConfig, posts: &[Post]) -> Result<Vec<Entry>> {
    let mut entries: Vec<Entry> = Vec::with_capacity(posts.len());

    for post in posts {
        let url = config
            .router
            .absolute(&config.router.post_path(&post.name))?
            .to_string();
        let date = midnight_utc(post.published);

        let mut entry = Entry::default();
        entry.set_id(url.clone());
        entry.set_title(post.title.clone());
        entry.set_updated(date);
        entry.set_published(Some(date));
        entry.set_authors(author_to_people(config.author.clone()));
        entry.set_links(vec![alternate_link(url)]);
        if !post.lead.is_empty() {
            entry.set_summary(Some(Text::from(post.lead.clone())));
        }
        entry.set_categories(post.tags.iter().map(|t| tag_to_category(t)).collect::<Vec<_>>());
        entries.push(entry);
    }
    Ok(entries)
}

/// Posts only carry a date, so entries are stamped at the start of the day in
/// UTC.
fn midnight_utc(date: NaiveDate) -> DateTime<FixedOffset> {
    Utc.fix().from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

fn alternate_link(href: String) -> Link {
    let mut link = Link::default();
    link.set_href(href);
    link.set_rel("alternate");
    link
}

fn tag_to_category(name: &str) -> Category {
    let tag = Tag::new(name);
    let mut category = Category::default();
    category.set_term(tag.slug);
    category.set_label(Some(tag.name));
    category
}

fn author_to_people(author: Option<Author>) -> Vec<Person> {
    match author {
        Some(author) => {
            let mut person = Person::default();
            person.set_name(author.name);
            person.set_email(author.email);
            vec![person]
        }
        None => Vec::new(),
    }
}

type Result<T> = std::result::Result<T, Error>;

/// Represents a problem creating a feed. Variants include I/O, Atom, and URL
/// issues.
#[derive(Debug)]
pub enum Error {
    /// Returned when there is a generic I/O error.
    Io(std::io::Error),

    /// Returned when there is an Atom-related error.
    Atom(AtomError),

    /// Returned when a post URL can't be resolved against the site root.
    UrlParse(ParseError),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(err) => err.fmt(f),
            Error::Atom(err) => err.fmt(f),
            Error::UrlParse(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Atom(err) => Some(err),
            Error::UrlParse(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    /// Converts [`std::io::Error`]s into [`Error`]. This allows us to use the
    /// `?` operator in fallible feed operations.
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<AtomError> for Error {
    /// Converts [`AtomError`]s into [`Error`]. This allows us to use the `?`
    /// operator in fallible feed operations.
    fn from(err: AtomError) -> Error {
        Error::Atom(err)
    }
}

impl From<ParseError> for Error {
    /// Converts [`ParseError`]s into [`Error`].
    fn from(err: ParseError) -> Error {
        Error::UrlParse(err)
    }
}
