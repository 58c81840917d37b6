//! Command-line interface for brainly.
//!
//! Each command loads the brain snapshot, applies one operation to the
//! in-memory store, and saves the snapshot back when something changed.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use crate::config;
use crate::domain::{parse_tag_list, ContentId, ContentItem, ContentType, NewContent};
use crate::library::{demo_content, ContentStore, Query, ShareState, Snapshot, TagSelection};

/// brainly - capture, tag, search and share bookmarked content
#[derive(Parser, Debug)]
#[command(name = "brainly")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Snapshot file (defaults to $BRAINLY_HOME/brain.json)
    #[arg(long, global = true, env = "BRAINLY_SNAPSHOT")]
    pub snapshot: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add content to the brain
    Add {
        /// Display title
        #[arg(long)]
        title: String,

        /// Content type (detected from the link if not specified)
        #[arg(short = 't', long = "type", value_enum)]
        content_type: Option<ContentTypeArg>,

        /// URL of the content (required except for documents)
        #[arg(short, long)]
        link: Option<String>,

        /// Markdown body (documents only)
        #[arg(short, long, conflicts_with = "body_file")]
        body: Option<String>,

        /// Read the document body from a file
        #[arg(long)]
        body_file: Option<PathBuf>,

        /// Tags to apply (comma-separated)
        #[arg(long)]
        tags: Option<String>,

        /// Explicit id (assigned automatically if not specified)
        #[arg(long)]
        id: Option<ContentId>,
    },

    /// Remove content by id (no-op if the id does not exist)
    #[command(alias = "remove")]
    Rm {
        /// Content ID
        id: ContentId,
    },

    /// List all content
    List {
        /// Only show items carrying any of these tags
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Search content by title
    Search {
        /// Search query (case-insensitive substring)
        #[arg(default_value = "")]
        query: String,

        /// Only show items carrying any of these tags
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Also match the query against tags
        #[arg(long)]
        match_tags: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List all distinct tags
    Tags,

    /// Show details of one item
    Show {
        /// Content ID
        id: ContentId,
    },

    /// Manage the public share link
    Share {
        #[command(subcommand)]
        command: ShareCommands,
    },

    /// Add the demo content
    Seed,

    /// Show resolved configuration (debug)
    Config,
}

#[derive(Subcommand, Debug)]
pub enum ShareCommands {
    /// Generate a new share link
    Enable,

    /// Disable sharing
    Disable,

    /// Show the current share link
    Status,
}

/// Content type for CLI (maps to ContentType)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ContentTypeArg {
    Document,
    Tweet,
    Youtube,
    Link,
}

impl From<ContentTypeArg> for ContentType {
    fn from(t: ContentTypeArg) -> Self {
        match t {
            ContentTypeArg::Document => ContentType::Document,
            ContentTypeArg::Tweet => ContentType::Tweet,
            ContentTypeArg::Youtube => ContentType::YouTube,
            ContentTypeArg::Link => ContentType::Link,
        }
    }
}

/// A loaded brain plus where it came from
struct Brain {
    path: PathBuf,
    store: ContentStore,
    share: ShareState,
}

impl Brain {
    async fn open(path: PathBuf) -> Result<Self> {
        let (store, share) = Snapshot::load(&path).await?.into_store()?;
        Ok(Self { path, store, share })
    }

    async fn save(&self) -> Result<()> {
        Snapshot::from_store(&self.store, self.share.clone())
            .save(&self.path)
            .await?;
        info!(path = %self.path.display(), items = self.store.len(), "Saved brain");
        Ok(())
    }
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let snapshot_path = match self.snapshot {
            Some(path) => path,
            None => config::snapshot_path()?,
        };

        match self.command {
            Commands::Add {
                title,
                content_type,
                link,
                body,
                body_file,
                tags,
                id,
            } => {
                let body = match body_file {
                    Some(path) => Some(read_body(&path)?),
                    None => body,
                };
                let ct = content_type
                    .map(ContentType::from)
                    .unwrap_or_else(|| infer_type(link.as_deref()));

                let mut candidate = NewContent::new(ct, title);
                candidate.id = id;
                candidate.link = link;
                candidate.body = body;
                if let Some(tags_str) = tags {
                    candidate.tags = parse_tag_list(&tags_str);
                }

                add_content(&snapshot_path, candidate).await
            }
            Commands::Rm { id } => remove_content(&snapshot_path, id).await,
            Commands::List { tags, json } => {
                let query = Query::all().with_tags(tags.iter().collect::<TagSelection>());
                search_content(&snapshot_path, query, false, json).await
            }
            Commands::Search {
                query,
                tags,
                match_tags,
                json,
            } => {
                let query = Query::new(query).with_tags(tags.iter().collect::<TagSelection>());
                search_content(&snapshot_path, query, match_tags, json).await
            }
            Commands::Tags => list_tags(&snapshot_path).await,
            Commands::Show { id } => show_content(&snapshot_path, id).await,
            Commands::Share { command } => share(&snapshot_path, command).await,
            Commands::Seed => seed(&snapshot_path).await,
            Commands::Config => show_config(&snapshot_path),
        }
    }
}

/// Pick a content type when none was given
fn infer_type(link: Option<&str>) -> ContentType {
    match link.map(str::trim).filter(|l| !l.is_empty()) {
        Some(link) => ContentType::detect(link),
        None => ContentType::Document,
    }
}

fn read_body(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read body file: {}", path.display()))
}

/// Add a single item
async fn add_content(path: &Path, candidate: NewContent) -> Result<()> {
    let mut brain = Brain::open(path.to_path_buf()).await?;

    let item = brain.store.add(candidate)?;
    brain.save().await?;

    eprintln!("Added {} content", item.content_type());
    eprintln!("   ID: {}", item.id);
    eprintln!("   Title: {}", item.title);
    if !item.tags.is_empty() {
        eprintln!("   Tags: {}", item.tags.join(", "));
    }

    Ok(())
}

/// Remove an item by id
async fn remove_content(path: &Path, id: ContentId) -> Result<()> {
    let mut brain = Brain::open(path.to_path_buf()).await?;

    match brain.store.remove(id) {
        Some(item) => {
            brain.save().await?;
            eprintln!("Removed {}: {}", item.id, item.title);
        }
        None => {
            eprintln!("No content with id {}", id);
        }
    }

    Ok(())
}

/// List or search items
async fn search_content(path: &Path, query: Query, match_tags: bool, json: bool) -> Result<()> {
    let brain = Brain::open(path.to_path_buf()).await?;

    let mut options = config::config()?.search;
    if match_tags {
        options.match_tags = true;
    }

    let results = brain.store.query(&query, options);

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if brain.store.is_empty() {
        println!("Brain is empty. Use 'brainly add' or 'brainly seed' to add content.");
        return Ok(());
    }

    if results.is_empty() {
        println!("No content found. Try changing your search or filters.");
        return Ok(());
    }

    print_table(&results);
    println!("\nShowing {} of {} items", results.len(), brain.store.len());

    Ok(())
}

fn print_table(items: &[&ContentItem]) {
    println!("{:<6} {:<10} {:<50} {}", "ID", "TYPE", "TITLE", "TAGS");
    println!("{}", "-".repeat(90));

    for item in items {
        println!(
            "{:<6} {:<10} {:<50} {}",
            item.id,
            item.content_type(),
            truncate(&item.title, 47),
            item.tags.join(", ")
        );
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let head: String = s.chars().take(max_chars).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}

/// List all distinct tags with their item counts
async fn list_tags(path: &Path) -> Result<()> {
    let brain = Brain::open(path.to_path_buf()).await?;
    let index = brain.store.tag_index();

    if index.is_empty() {
        println!("No tags available");
        return Ok(());
    }

    for tag in index.tags() {
        println!("{:<30} {}", tag, index.count(tag));
    }

    Ok(())
}

/// Show details of one item
async fn show_content(path: &Path, id: ContentId) -> Result<()> {
    let brain = Brain::open(path.to_path_buf()).await?;

    let item = brain
        .store
        .get(id)
        .ok_or_else(|| anyhow::anyhow!("Content not found: {}", id))?;

    println!("ID: {}", item.id);
    println!("Title: {}", item.title);
    println!("Type: {}", item.content_type());
    if let Some(link) = item.link() {
        println!("Link: {}", link);
    }
    if let Some(embed) = item.embed_url() {
        println!("Embed: {}", embed);
    }
    println!("Added: {}", item.added_at);
    if !item.tags.is_empty() {
        println!("Tags: {}", item.tags.join(", "));
    }
    if let Some(body) = item.body() {
        println!("\n{}", body);
    }

    Ok(())
}

/// Manage the share link
async fn share(path: &Path, command: ShareCommands) -> Result<()> {
    let mut brain = Brain::open(path.to_path_buf()).await?;

    match command {
        ShareCommands::Enable => {
            let base_url = &config::config()?.share_base_url;
            let link = brain.share.enable(base_url).to_string();
            brain.save().await?;
            info!("Sharing enabled");
            println!("{}", link);
        }
        ShareCommands::Disable => {
            if brain.share.disable().is_some() {
                brain.save().await?;
                info!("Sharing disabled");
            }
            eprintln!("Sharing is off");
        }
        ShareCommands::Status => match brain.share.link() {
            Some(link) => {
                println!("{}", link);
                if let Some(since) = brain.share.enabled_at() {
                    eprintln!("Shared since {}", since);
                }
            }
            None => eprintln!("Sharing is off"),
        },
    }

    Ok(())
}

/// Add the demo items
async fn seed(path: &Path) -> Result<()> {
    let mut brain = Brain::open(path.to_path_buf()).await?;

    for candidate in demo_content() {
        let item = brain.store.add(candidate)?;
        eprintln!("Added {}: {}", item.id, item.title);
    }

    brain.save().await
}

/// Show the resolved configuration (for debugging)
fn show_config(snapshot_path: &Path) -> Result<()> {
    let cfg = config::config()?;

    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!("Home:        {}", cfg.home.display());
    println!("Snapshot:    {}", snapshot_path.display());
    println!("Match tags:  {}", cfg.search.match_tags);
    println!("Share base:  {}", cfg.share_base_url);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_type() {
        assert_eq!(infer_type(None), ContentType::Document);
        assert_eq!(infer_type(Some("  ")), ContentType::Document);
        assert_eq!(infer_type(Some("https://youtu.be/abc")), ContentType::YouTube);
        assert_eq!(infer_type(Some("https://example.com")), ContentType::Link);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("ééééé", 3), "ééé...");
    }

    #[test]
    fn test_parse_add_command() {
        let cli = Cli::try_parse_from([
            "brainly",
            "add",
            "--title",
            "Video",
            "--link",
            "https://youtu.be/abc",
            "--tags",
            "a,b",
        ])
        .unwrap();

        match cli.command {
            Commands::Add {
                title, link, tags, ..
            } => {
                assert_eq!(title, "Video");
                assert_eq!(link.as_deref(), Some("https://youtu.be/abc"));
                assert_eq!(tags.as_deref(), Some("a,b"));
            }
            other => panic!("Expected Add, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_search_with_tags() {
        let cli = Cli::try_parse_from([
            "brainly", "search", "notes", "--tag", "x", "--tag", "y", "--match-tags",
        ])
        .unwrap();

        match cli.command {
            Commands::Search {
                query,
                tags,
                match_tags,
                json,
            } => {
                assert_eq!(query, "notes");
                assert_eq!(tags, vec!["x", "y"]);
                assert!(match_tags);
                assert!(!json);
            }
            other => panic!("Expected Search, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_bad_id() {
        assert!(Cli::try_parse_from(["brainly", "rm", "zero"]).is_err());
    }
}
