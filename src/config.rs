//! Loads the project configuration from a `blotter.yaml` file.

use crate::bootstrap::ButtonStyle;
use crate::util::open;
use anyhow::{anyhow, Context, Result};
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use url::Url;

/// The name of the project file.
pub const PROJECT_FILE: &str = "blotter.yaml";

fn default_posts_directory() -> PathBuf {
    PathBuf::from("posts")
}

fn default_tag_style() -> ButtonStyle {
    ButtonStyle::Info
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Author {
    pub name: String,
    pub email: Option<String>,
}

#[derive(Deserialize)]
struct Project {
    title: String,
    site_root: Url,
    author: Option<Author>,

    #[serde(default = "default_posts_directory")]
    posts_directory: PathBuf,

    #[serde(default = "default_tag_style")]
    tag_style: ButtonStyle,
}

#[derive(Debug)]
pub struct Config {
    pub title: String,
    pub site_root: Url,
    pub author: Option<Author>,

    /// Where the post source files live. Relative paths in the project file
    /// are resolved against the project file's directory.
    pub posts_directory: PathBuf,

    /// The style applied to tag buttons.
    pub tag_style: ButtonStyle,
}

impl Config {
    /// Searches `dir` and then each of its ancestors for a project file and
    /// loads the first one found. A relative `dir` is resolved against the
    /// current directory first, so `.` searches the real parents.
    pub fn from_directory(dir: &Path) -> Result<Config> {
        let cwd = std::env::current_dir().context("Getting the current directory")?;
        Config::from_directory_in(&cwd, dir)
    }

    fn from_directory_in(cwd: &Path, dir: &Path) -> Result<Config> {
        Config::search(&cwd.join(dir))
    }

    fn search(dir: &Path) -> Result<Config> {
        let path = dir.join(PROJECT_FILE);
        if path.exists() {
            Config::from_project_file(&path).context("Loading configuration")
        } else {
            match dir.parent() {
                Some(parent) => Config::search(parent),
                None => Err(anyhow!(
                    "Could not find `{}` in any parent directory",
                    PROJECT_FILE
                )),
            }
        }
    }

    pub fn from_project_file(path: &Path) -> Result<Config> {
        debug!("loading project file {}", path.display());
        let project: Project = serde_yaml::from_reader(open(path, "project")?)
            .with_context(|| format!("Parsing project file `{}`", path.display()))?;
        let project_root = path.parent().ok_or_else(|| {
            anyhow!(
                "Can't get parent directory for provided project file path '{:?}'",
                path
            )
        })?;
        Ok(Config {
            title: project.title,
            site_root: project.site_root,
            author: project.author,
            posts_directory: project_root.join(project.posts_directory),
            tag_style: project.tag_style,
        })
    }
}
