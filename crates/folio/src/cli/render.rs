//! Terminal rendering.
//!
//! Every function here takes library data and returns a `String`; printing is
//! left to `commands.rs`. Styling goes through [`super::styles`].

use super::styles;
use chrono::{TimeZone, Utc};
use folioapp::api::CmdMessage;
use folioapp::forest::TreeNode;
use folioapp::model::{Document, DocumentId, Timestamp, TrashedDocument};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 80;
pub const STAR_MARKER: &str = "★";
pub const DEFAULT_ICON: &str = "📄";

const EXPANDED_MARKER: &str = "▾";
const COLLAPSED_MARKER: &str = "▸";
const LEAF_MARKER: &str = " ";
const INDENT: &str = "  ";
const ELLIPSIS: char = '…';

pub fn render_tree(nodes: &[TreeNode<'_>], active: Option<&DocumentId>) -> String {
    if nodes.is_empty() {
        return format!(
            "{}\n",
            styles::muted().apply_to("No documents yet. Create one with `folio create <title>`.")
        );
    }
    let mut out = String::new();
    for node in nodes {
        push_tree_node(&mut out, node, active);
    }
    out
}

fn push_tree_node(out: &mut String, node: &TreeNode<'_>, active: Option<&DocumentId>) {
    let doc = node.document;
    let marker = if !node.has_children() {
        LEAF_MARKER
    } else if node.expanded {
        EXPANDED_MARKER
    } else {
        COLLAPSED_MARKER
    };
    let indent = INDENT.repeat(node.depth);
    let star = if doc.starred { STAR_MARKER } else { "" };

    // indent + marker + space + icon + space + id column
    let fixed = indent.width() + 2 + icon_of(doc).width() + 1 + star.width() + doc.id.width() + 2;
    let title = truncate_to_width(&doc.title, LINE_WIDTH.saturating_sub(fixed));
    let title = if active == Some(&doc.id) {
        styles::active().apply_to(title).to_string()
    } else {
        title
    };

    out.push_str(&format!(
        "{}{} {} {}{}  {}\n",
        indent,
        styles::faint().apply_to(marker),
        icon_of(doc),
        title,
        styles::star().apply_to(star),
        styles::id().apply_to(&doc.id)
    ));

    if node.expanded {
        for child in &node.children {
            push_tree_node(out, child, active);
        }
    }
}

/// A document page: breadcrumbs, heading, metadata and the content as plain text.
pub fn render_document(doc: &Document, crumbs: &[&Document]) -> String {
    let mut out = String::new();

    let trail: Vec<&str> = crumbs.iter().map(|d| d.title.as_str()).collect();
    if trail.len() > 1 {
        out.push_str(&format!("{}\n", styles::muted().apply_to(trail.join(" / "))));
    }

    let star = if doc.starred {
        format!(" {}", styles::star().apply_to(STAR_MARKER))
    } else {
        String::new()
    };
    out.push_str(&format!(
        "{} {}{}\n",
        icon_of(doc),
        styles::title().apply_to(&doc.title),
        star
    ));
    out.push_str(&format!(
        "{}  {}\n",
        styles::id().apply_to(&doc.id),
        styles::time().apply_to(format!("edited {}", format_time_ago(doc.updated_at)))
    ));

    let body = plain_text(&doc.content);
    if !body.is_empty() {
        out.push('\n');
        out.push_str(&body);
        out.push('\n');
    }
    out
}

pub fn render_not_found(id: &DocumentId) -> String {
    format!(
        "{}\n",
        styles::message(&folioapp::api::MessageLevel::Warning)
            .apply_to(format!("Document {} does not exist (it may have been archived)", id))
    )
}

pub fn render_no_active() -> String {
    format!(
        "{}\n",
        styles::muted().apply_to("No document is open. Use `folio open <id>` or `folio show <id>`.")
    )
}

pub fn render_trash(items: &[&TrashedDocument]) -> String {
    if items.is_empty() {
        return format!("{}\n", styles::muted().apply_to("Trash is empty."));
    }
    let mut out = String::new();
    for item in items {
        let origin = match &item.original_parent_id {
            Some(parent) => format!("from {}", parent),
            None => "from root".to_string(),
        };
        let time = format_time_ago(item.archived_at);
        let fixed = item.id().width() + 2 + origin.width() + 2 + time.width() + 2;
        let title = truncate_to_width(item.title(), LINE_WIDTH.saturating_sub(fixed));
        out.push_str(&format!(
            "{}  {}  {}  {}\n",
            styles::trashed().apply_to(item.id()),
            title,
            styles::muted().apply_to(origin),
            styles::time().apply_to(time)
        ));
    }
    out
}

pub fn render_favorites(docs: &[&Document]) -> String {
    if docs.is_empty() {
        return format!("{}\n", styles::muted().apply_to("No starred documents."));
    }
    let mut out = String::new();
    for doc in docs {
        out.push_str(&format!(
            "{} {} {}  {}\n",
            styles::star().apply_to(STAR_MARKER),
            icon_of(doc),
            doc.title,
            styles::id().apply_to(&doc.id)
        ));
    }
    out
}

pub fn render_messages(messages: &[CmdMessage]) -> String {
    messages
        .iter()
        .map(|msg| format!("{}\n", styles::message(&msg.level).apply_to(&msg.content)))
        .collect()
}

fn icon_of(doc: &Document) -> &str {
    doc.icon.as_deref().unwrap_or(DEFAULT_ICON)
}

/// Truncates to at most `max_width` terminal columns, ending with an ellipsis
/// when something was cut.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let budget = max_width - 1;
    let mut used = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push(ELLIPSIS);
    out
}

/// Flattens stored rich text to readable lines: block tags become line breaks,
/// other tags are dropped and the common entities decoded.
pub fn plain_text(html: &str) -> String {
    let mut out = String::new();
    let mut tag = String::new();
    let mut in_tag = false;

    for c in html.chars() {
        match (in_tag, c) {
            (false, '<') => {
                in_tag = true;
                tag.clear();
            }
            (true, '>') => {
                in_tag = false;
                let name = tag
                    .trim_start_matches('/')
                    .split(|c: char| c.is_whitespace() || c == '/')
                    .next()
                    .unwrap_or("")
                    .to_ascii_lowercase();
                if matches!(
                    name.as_str(),
                    "p" | "div" | "br" | "li" | "h1" | "h2" | "h3" | "h4" | "ul" | "ol" | "pre"
                ) && !out.ends_with('\n')
                    && !out.is_empty()
                {
                    out.push('\n');
                }
                if name == "li" && !tag.starts_with('/') {
                    out.push_str("- ");
                }
            }
            (true, c) => tag.push(c),
            (false, c) => out.push(c),
        }
    }

    let decoded = out
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    decoded.trim().to_string()
}

pub fn format_time_ago(timestamp: Timestamp) -> String {
    let Some(then) = Utc.timestamp_millis_opt(timestamp).single() else {
        return "some time ago".to_string();
    };
    let duration = Utc::now().signed_duration_since(then);
    let formatter = timeago::Formatter::new();
    formatter.convert(duration.to_std().unwrap_or_default())
}
