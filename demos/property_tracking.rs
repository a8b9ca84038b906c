//! Example demonstrating property change notification.
//!
//! This example shows how to:
//! - Register struct and closure listeners
//! - Mutate tracked fields with `set_property` / `set_optional_property`
//! - Keep dispatching when a listener fails
//!
//! Run with: cargo run --example property_tracking

use change_notifier::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug)]
struct Document {
    title: String,
    owner: Option<String>,
    revision: u32,
}

/// Rejects changes to the revision number past a limit.
struct RevisionGuard {
    limit: u32,
}

impl ChangeListener for RevisionGuard {
    fn on_change(&self, change: &PropertyChange<'_>) -> std::result::Result<(), ListenerError> {
        match change.new_value::<u32>() {
            Some(rev) if change.property() == "revision" && *rev > self.limit => Err(
                ListenerError::new(format!("revision {} exceeds limit {}", rev, self.limit)),
            ),
            _ => Ok(()),
        }
    }
}

fn main() -> Result<()> {
    println!("=== Property Tracking Example ===\n");

    let changes = Arc::new(AtomicUsize::new(0));

    let notifier = ChangeNotifier::builder()
        .with_name("documents")
        .on_listener_failure(|failure| {
            println!("[failure hook] {}", failure);
        })
        .build()?;

    // Listener 1: prints every change it can describe
    notifier.register_fn(|change| {
        let title = change
            .target::<Document>()
            .map(|d| d.title.as_str())
            .unwrap_or("?");
        println!("[printer] '{}' changed on {}", change.property(), title);
    });

    // Listener 2: fails for large revisions
    notifier.register(RevisionGuard { limit: 2 });

    // Listener 3: counts every change, even after listener 2 fails
    let changes_clone = Arc::clone(&changes);
    notifier.register_fn(move |_| {
        changes_clone.fetch_add(1, Ordering::SeqCst);
    });

    println!("Registered {} listeners\n", notifier.listener_count());

    let mut doc = Document {
        title: "Draft".to_string(),
        owner: None,
        revision: 1,
    };

    let old_title = set_property(&notifier, &mut doc, "title", |d| &mut d.title, "Report".to_string());
    println!("  title: {} -> {}\n", old_title, doc.title);

    let old_owner = set_optional_property(
        &notifier,
        &mut doc,
        "owner",
        |d| &mut d.owner,
        Some("grace".to_string()),
    );
    println!("  owner: {:?} -> {:?}\n", old_owner, doc.owner);

    for revision in 2..=4 {
        set_property(&notifier, &mut doc, "revision", |d| &mut d.revision, revision);
    }
    println!();

    println!(
        "Counter listener saw {} changes (listener failures did not stop delivery)",
        changes.load(Ordering::SeqCst)
    );
    println!("\n=== Example Complete ===");

    Ok(())
}
