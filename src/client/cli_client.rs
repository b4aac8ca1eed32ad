// Terminal front-end for the blog: stands in for the view layer and renders what the
// blog service hands back, placeholders included.
use crate::client::config::ClientConfig;
use crate::client::services::blog_service::BlogService;
use crate::common::models::{BlogEntry, BlogSection};
use clap::{Parser, Subcommand};
use std::fmt::Write;

#[derive(Parser, Debug)]
#[command(name = "jutzo")]
#[command(about = "Read the architecture academy blog from the terminal")]
pub struct Args {
    /// Base address of the content service (overrides JUTZO_API_URL)
    #[arg(long)]
    pub api_url: Option<String>,
    /// Print the raw JSON instead of rendered text
    #[arg(long)]
    pub json: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the newest entries
    Newest,
    /// Show one entry
    Entry { id: String },
}

/// Fetch and print. Returns `false` when what got printed is a placeholder.
pub async fn run(args: Args, config: ClientConfig) -> anyhow::Result<bool> {
    let api_url = args.api_url.unwrap_or(config.api_url);
    let blog = BlogService::new(&api_url)?;
    log::info!("[CLIENT] Using content service at {}", blog.api_url());

    let (output, fetched) = match args.command {
        Command::Newest => {
            let entries = blog.newest().await;
            let fetched = !entries.iter().any(BlogEntry::is_placeholder);
            let output = if args.json {
                serde_json::to_string_pretty(&entries)?
            } else {
                render_summaries(&entries)
            };
            (output, fetched)
        }
        Command::Entry { id } => {
            let entry = blog.blog_entry(&id).await;
            let fetched = !entry.is_placeholder();
            let output = if args.json {
                serde_json::to_string_pretty(&entry)?
            } else {
                render_entry(&entry)
            };
            (output, fetched)
        }
    };

    println!("{}", output);
    Ok(fetched)
}

pub fn render_entry(entry: &BlogEntry) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", entry.title);
    let _ = writeln!(out, "{}", entry.publication_date.format("%B %d, %Y"));
    let _ = writeln!(out);

    let mut sections: Vec<&BlogSection> = entry.body.iter().collect();
    sections.sort_by_key(|s| s.ordinal());
    for section in sections {
        match section {
            BlogSection::Header { level, header, .. } => {
                let _ = writeln!(out, "{} {}", "#".repeat(usize::from(*level).max(1)), header);
            }
            BlogSection::Image { src, alt, .. } => {
                let _ = writeln!(out, "[image: {}] ({})", alt, src);
            }
            BlogSection::Text { text, .. } => {
                let _ = writeln!(out, "{}", text);
            }
        }
        let _ = writeln!(out);
    }
    out.trim_end().to_string()
}

pub fn render_summaries(entries: &[BlogEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        let _ = writeln!(
            out,
            "{}  {}\n  {}\n  id: {}\n",
            entry.publication_date.format("%Y-%m-%d"),
            entry.title,
            entry.teaser,
            entry.id
        );
    }
    out.trim_end().to_string()
}
