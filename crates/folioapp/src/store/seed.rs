//! Starter forest used for a fresh install and for recovery from a corrupt snapshot.
//!
//! ```text
//! 📄 Welcome
//! Guides ★
//! ├── 🧰 Project Setup
//! └── Performance
//! ```

use crate::forest::Forest;
use crate::model::{Document, DocumentId, Timestamp};

/// Document a host opens when it has no route of its own.
pub const LANDING_ID: &str = "welcome";

const HOUR: Timestamp = 3_600_000;

struct SeedDoc {
    id: &'static str,
    title: &'static str,
    icon: Option<&'static str>,
    parent: Option<&'static str>,
    content: &'static str,
    starred: bool,
    order: f64,
    created_ago: Timestamp,
    updated_ago: Timestamp,
}

const SEED: [SeedDoc; 4] = [
    SeedDoc {
        id: "welcome",
        title: "Welcome",
        icon: Some("📄"),
        parent: None,
        content: "<p>Your first page. Add, remove and reorder pages in the tree.</p>",
        starred: false,
        order: 0.0,
        created_ago: 24 * HOUR,
        updated_ago: HOUR,
    },
    SeedDoc {
        id: "guides",
        title: "Guides",
        icon: None,
        parent: None,
        content: "<h2>Guide Index</h2><ul><li>Project Setup</li><li>Performance</li></ul>",
        starred: true,
        order: 1.0,
        created_ago: 84_000_000,
        updated_ago: 4_200_000,
    },
    SeedDoc {
        id: "setup",
        title: "Project Setup",
        icon: Some("🧰"),
        parent: Some("guides"),
        content: "<h1>Setup</h1><p>Package manager, bundler, dev server.</p>",
        starred: false,
        order: 0.0,
        created_ago: 82_000_000,
        updated_ago: 4_000_000,
    },
    SeedDoc {
        id: "perf",
        title: "Performance",
        icon: None,
        parent: Some("guides"),
        content: "<p>Critical rendering path, LCP and FCP, image and font loading.</p>",
        starred: false,
        order: 1.0,
        created_ago: 80_000_000,
        updated_ago: 3_800_000,
    },
];

/// The seed documents, with timestamps relative to `now`.
pub fn seed_documents(now: Timestamp) -> Vec<Document> {
    SEED.iter()
        .map(|s| {
            let mut doc = Document::new(
                DocumentId::from(s.id),
                s.title,
                s.parent.map(DocumentId::from),
                s.order,
                now - s.created_ago,
            );
            doc.icon = s.icon.map(str::to_string);
            doc.content = s.content.to_string();
            doc.starred = s.starred;
            doc.updated_at = now - s.updated_ago;
            doc
        })
        .collect()
}

pub fn seed_forest(now: Timestamp) -> Forest {
    let mut forest = Forest::new();
    for doc in seed_documents(now) {
        forest.insert_live(doc);
    }
    forest
}
