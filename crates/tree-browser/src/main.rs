//! Print a directory as an expandable tree
//!
//! Usage: `tree-browser [PATH] [DEPTH]`
//!
//! The directory is loaded into a tree controller, then rescanned once the
//! way a file browser refreshes after a change: the old listing is archived,
//! the directory is listed again, and only entries that vanished are
//! destroyed.

mod console_view;
mod directory;

use anyhow::{Context, Result};
use log::{debug, info};
use std::collections::BTreeMap;
use std::env;
use std::time::SystemTime;
use tree_controller::{NodeId, TreeConfig, TreeController};

use crate::console_view::ConsoleView;
use crate::directory::{DirectorySource, FileEntry};

type Browser = TreeController<FileEntry, ConsoleView>;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Use current directory if no path provided
    let path = env::args().nth(1).unwrap_or_else(|| ".".to_string());
    let depth = match env::args().nth(2) {
        Some(depth) => depth
            .parse::<usize>()
            .with_context(|| format!("Invalid depth {depth:?}"))?,
        None => 2,
    };

    let mut source = DirectorySource::new(&path)?;
    let mut tree = TreeController::new(
        TreeConfig::file_tree().start_expanded(true),
        ConsoleView::default(),
    );

    let root = tree.add_node(source.root_entry()?)?;
    let loaded = populate(&mut tree, &mut source, root, depth)?;
    info!("Loaded {loaded} entries from {}", source.root_path().display());

    tree.view_mut().reset_counts();
    rescan(&mut tree, &mut source, root, depth)?;
    let counts = tree.view().counts();
    info!(
        "Rescan reused {} views, created {}, destroyed {}",
        counts.reused, counts.created, counts.destroyed
    );

    summarize(&tree);
    tree.select_first_node();
    print!("{}", tree.dump_structure());
    Ok(())
}

/// Add the listing of `id` and, while `depth` allows, of its sub-directories
fn populate(
    tree: &mut Browser,
    source: &mut DirectorySource,
    id: NodeId,
    depth: usize,
) -> Result<usize> {
    if depth == 0 {
        return Ok(0);
    }
    let added = tree.add_nodes(source.list(id)?);
    let mut count = added.len();
    for child in added {
        if tree.node(child).map_or(false, |node| node.is_container()) {
            count += populate(tree, source, child, depth - 1)?;
        }
    }
    Ok(count)
}

/// Relist everything below `root`, keeping views of entries that still exist
fn rescan(
    tree: &mut Browser,
    source: &mut DirectorySource,
    root: NodeId,
    depth: usize,
) -> Result<()> {
    tree.archive_sub_items_of_item(root);
    populate(tree, source, root, depth)?;
    tree.empty_archive();
    Ok(())
}

/// Log totals over the loaded entries
fn summarize(tree: &Browser) {
    let mut bytes = 0;
    let mut extensions: BTreeMap<&str, usize> = BTreeMap::new();
    let mut newest: Option<SystemTime> = None;
    let mut largest: Option<NodeId> = None;
    for &id in tree.ordered_ids() {
        let Some(node) = tree.node(id) else {
            continue;
        };
        bytes += node.data.size;
        if let Some(extension) = node.data.extension.as_deref() {
            *extensions.entry(extension).or_default() += 1;
        }
        newest = newest.max(node.data.modified);
        let size_of = |id: NodeId| tree.node(id).map_or(0, |node| node.data.size);
        if largest.map_or(true, |current| node.data.size > size_of(current)) {
            largest = Some(id);
        }
    }
    info!("{} entries, {bytes} bytes", tree.len());
    debug!("files by extension: {extensions:?}");
    if let Some(node) = largest.and_then(|id| tree.node(id)) {
        debug!("largest entry {}: {}", node.title, node.data);
    }
    if let Some(age) = newest.and_then(|modified| modified.elapsed().ok()) {
        debug!("newest change {}s ago", age.as_secs());
    }
}
