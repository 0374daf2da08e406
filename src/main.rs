use anyhow::{anyhow, Context, Result};
use blotter::bootstrap::ButtonStyle;
use blotter::config::Config;
use blotter::feed::{write_feed, FeedConfig};
use blotter::helpers::{post_link, tag_button, ViewRegistry};
use blotter::post::{parse_posts, tagged, Post};
use blotter::tag::TagCounts;
use blotter::url::Router;
use clap::{crate_version, App, AppSettings, Arg, ArgMatches, SubCommand};
use log::info;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

fn main() -> Result<()> {
    env_logger::init();

    let matches = App::new("blotter")
        .version(crate_version!())
        .about("Tag buttons, post links, and feeds for the blog")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("project")
                .long("project")
                .short("p")
                .takes_value(true)
                .default_value(".")
                .help("Directory to search (along with its parents) for blotter.yaml"),
        )
        .subcommand(SubCommand::with_name("check").about("Parses every post and reports the count"))
        .subcommand(
            SubCommand::with_name("tags")
                .about("Prints a tag button for each tag")
                .arg(
                    Arg::with_name("style")
                        .long("style")
                        .takes_value(true)
                        .help("Button style; overrides `tag_style` from the project file"),
                ),
        )
        .subcommand(
            SubCommand::with_name("posts")
                .about("Prints a link to each post")
                .arg(
                    Arg::with_name("tag")
                        .long("tag")
                        .takes_value(true)
                        .help("Only link posts carrying this tag"),
                ),
        )
        .subcommand(
            SubCommand::with_name("feed").about("Writes the Atom feed").arg(
                Arg::with_name("output")
                    .long("output")
                    .short("o")
                    .takes_value(true)
                    .help("Output file (defaults to stdout)"),
            ),
        )
        .get_matches();

    let project = matches.value_of("project").unwrap_or(".");
    let config = Config::from_directory(Path::new(project))?;
    let posts = parse_posts(&config.posts_directory)?;
    let router = Router::new(config.site_root.clone());

    match matches.subcommand() {
        ("check", Some(_)) => {
            println!("{} posts OK", posts.len());
            Ok(())
        }
        ("tags", Some(sub)) => tags(&config, &router, &posts, sub),
        ("posts", Some(sub)) => links(&config, &router, &posts, sub),
        ("feed", Some(sub)) => feed(config, &router, &posts, sub),
        (other, _) => Err(anyhow!("Unknown command `{}`", other)),
    }
}

fn tags(config: &Config, router: &Router, posts: &[Post], matches: &ArgMatches) -> Result<()> {
    let style = match matches.value_of("style") {
        Some(style) => style.parse::<ButtonStyle>()?,
        None => config.tag_style,
    };
    let counts = TagCounts::from_posts(posts);
    info!("rendering {} tag buttons", counts.len());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (tag, count) in counts.sorted() {
        writeln!(out, "{}", tag_button(router, &tag.name, Some(count), style).into_string())?;
    }
    Ok(())
}

fn links(config: &Config, router: &Router, posts: &[Post], matches: &ArgMatches) -> Result<()> {
    let views = ViewRegistry::from_directory(&config.posts_directory)?;
    let selected: Vec<&Post> = match matches.value_of("tag") {
        Some(tag) => tagged(posts, tag),
        None => posts.iter().collect(),
    };
    info!("rendering {} of {} post links", selected.len(), views.len());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for post in selected {
        let link = post_link(router, &views, &post.title, |v| {
            v.get(&post.name).unwrap_or_else(|| post.source.as_path())
        });
        writeln!(out, "{}", link.into_string())?;
    }
    Ok(())
}

fn feed(config: Config, router: &Router, posts: &[Post], matches: &ArgMatches) -> Result<()> {
    let feed_config = FeedConfig {
        title: config.title,
        author: config.author,
        router,
    };
    match matches.value_of("output") {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("Creating feed file `{}`", path))?;
            write_feed(feed_config, posts, file)?;
            info!("wrote feed to {}", path);
        }
        None => write_feed(feed_config, posts, io::stdout())?,
    }
    Ok(())
}
