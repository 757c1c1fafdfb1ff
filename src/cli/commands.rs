use chrono::{DateTime, Utc};
use html_escape::decode_html_entities;

use crate::app::{AppContext, FeedError, Result};
use crate::domain::{Item, Page};
use crate::feed::FeedSession;
use crate::fetcher::Fetcher;

pub async fn show_top(
    ctx: &AppContext,
    limit: Option<usize>,
    cursor: Option<usize>,
    pages: usize,
    json: bool,
) -> Result<()> {
    let mut session = ctx.session(limit, cursor)?;

    let mut loaded = Ok(());
    for _ in 0..pages.max(1) {
        match session.load_next().await {
            Ok(Some(_)) => {}
            Ok(None) => break,
            Err(e) => {
                loaded = Err(e);
                break;
            }
        }
    }

    // Whatever loaded before a failure is still shown.
    if json {
        for page in session.pages() {
            print_json(page)?;
        }
    } else {
        print!("{}", format_listing(&session, cursor.unwrap_or(0), Utc::now()));
    }

    loaded
}

/// Ranked stories of a session, numbered from `offset + 1`, followed by the
/// cursor to continue from.
pub fn format_listing(session: &FeedSession, offset: usize, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    for (rank, story) in session.stories() {
        out.push_str(&format_story(offset + rank, story, now));
        out.push('\n');
    }

    if session.story_count() == 0 && !session.pages().is_empty() {
        out.push_str("No stories on this page\n");
    }
    match session.cursor() {
        Some(next) => out.push_str(&format!("\nMore stories: --cursor {}\n", next)),
        None if !session.has_next_page() => out.push_str("\nEnd of stories\n"),
        None => {}
    }

    out
}

pub async fn show_item(ctx: &AppContext, id: u64) -> Result<()> {
    let Some(raw) = ctx.fetcher.fetch_item(id).await? else {
        println!("No item with id {}", id);
        return Ok(());
    };

    match Item::parse(&raw) {
        Some(item) => print!("{}", format_item(&item, Utc::now())),
        None => println!("{}", serde_json::to_string_pretty(&raw).unwrap_or_default()),
    }

    Ok(())
}

fn print_json(page: &Page) -> Result<()> {
    let line = serde_json::to_string(page)
        .map_err(|e| FeedError::Other(format!("Failed to encode page: {}", e)))?;
    println!("{}", line);
    Ok(())
}

/// Two-line listing entry, e.g.
///
/// ```text
/// 01 My YC app: Dropbox (getdropbox.com)
///    111 points | 71 comments | by dhouston | 3 hours ago
/// ```
pub fn format_story(rank: usize, story: &Item, now: DateTime<Utc>) -> String {
    let mut line = format!("{:02} {}", rank, story.display_title());
    if let Some(domain) = story.domain() {
        line.push_str(&format!(" ({})", domain));
    }

    let mut meta = format!(
        "{} points | {} comments",
        story.score_or_zero(),
        story.comment_count()
    );
    if let Some(author) = &story.author {
        meta.push_str(&format!(" | by {}", author));
    }
    let age = story.age(now);
    if !age.is_empty() {
        meta.push_str(&format!(" | {}", age));
    }

    format!("{}\n   {}", line, meta)
}

pub fn format_item(item: &Item, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", item.display_title()));

    if let Some(url) = &item.url {
        out.push_str(&format!("{}\n", url));
    }
    if let Some(author) = &item.author {
        out.push_str(&format!("by {} {}\n", author, item.age(now)));
    }
    out.push_str(&format!(
        "{} points | {} comments\n",
        item.score_or_zero(),
        item.comment_count()
    ));
    if let Some(text) = &item.text {
        out.push('\n');
        out.push_str(&html_to_text(text));
        out.push('\n');
    }

    out
}

/// Item bodies are HTML fragments with `<p>` paragraph breaks.
fn html_to_text(html: &str) -> String {
    let with_breaks = html.replace("<p>", "\n\n");
    let mut text = String::with_capacity(with_breaks.len());
    let mut in_tag = false;

    for c in with_breaks.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }

    decode_html_entities(&text).trim().to_string()
}
