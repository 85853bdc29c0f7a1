//! The tree navigation engine.
//!
//! A [`Tree`] owns one lazily-materialized [`PathNode`] hierarchy plus a
//! single [`NavState`] context shared by every operation: the expanded set,
//! the insertion-ordered picked list, the size cache, the cursor and the
//! hidden-files flag. `flatten` re-walks the hierarchy depth-first on every
//! cycle and yields the currently visible `(path, depth)` rows; that row
//! sequence is the single source of truth for rendering and for every
//! line-jumping operation.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use crate::fs::size;

// ── Path nodes ───────────────────────────────────────────────────────────────

/// Outcome of listing a directory's children.
#[derive(Debug, Clone)]
pub enum ChildListing {
    /// Not listed yet (lazy).
    Unloaded,
    /// Listing failed, e.g. permission denied. Distinct from an empty
    /// directory and rendered with its own marker.
    Unknown,
    /// Materialized child nodes, sorted by name.
    Loaded(Vec<PathNode>),
}

/// One filesystem entry and its lazily-resolved children.
#[derive(Debug, Clone)]
pub struct PathNode {
    /// Absolute path; the node's identity key.
    pub path: PathBuf,
    /// Directory vs. leaf, determined structurally at creation.
    pub is_dir: bool,
    pub children: ChildListing,
}

impl PathNode {
    pub fn new(path: PathBuf) -> Self {
        let is_dir = path.is_dir();
        Self {
            path,
            is_dir,
            children: ChildListing::Unloaded,
        }
    }

    /// List directory entries, filter dot-prefixed names when `hidden` is
    /// set, sort lexicographically, and build child nodes with absolute
    /// paths. A failed listing yields [`ChildListing::Unknown`].
    fn list_children(path: &Path, hidden: bool) -> ChildListing {
        let entries = match fs::read_dir(path) {
            Ok(entries) => entries,
            Err(_) => return ChildListing::Unknown,
        };
        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .filter(|name| !(hidden && name.starts_with('.')))
            .collect();
        names.sort();
        ChildListing::Loaded(
            names
                .into_iter()
                .map(|name| PathNode::new(path.join(name)))
                .collect(),
        )
    }

    /// Materialize children on first access. Cached until [`invalidate`]d.
    pub fn ensure_children(&mut self, hidden: bool) {
        if matches!(self.children, ChildListing::Unloaded) {
            self.children = if self.is_dir {
                Self::list_children(&self.path, hidden)
            } else {
                ChildListing::Unknown
            };
        }
    }

    /// Discard the (sub)tree below this node so it is re-listed lazily.
    pub fn invalidate(&mut self) {
        self.children = ChildListing::Unloaded;
    }

    /// Number of loaded immediate children; 0 for files and failed listings.
    pub fn child_count(&self) -> usize {
        match &self.children {
            ChildListing::Loaded(children) => children.len(),
            _ => 0,
        }
    }
}

// ── Flattened rows ───────────────────────────────────────────────────────────

/// Expansion marker rendered in front of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// Non-directory: no marker.
    File,
    /// Expanded directory: `[-]`.
    Expanded,
    /// Collapsed directory with children: `[+]`.
    Collapsed,
    /// Collapsed directory whose listing failed: `[?]`.
    Unknown,
    /// Collapsed empty directory: `[ ]`.
    Empty,
}

impl Marker {
    pub fn glyph(self) -> &'static str {
        match self {
            Marker::File => "    ",
            Marker::Expanded => "[-] ",
            Marker::Collapsed => "[+] ",
            Marker::Unknown => "[?] ",
            Marker::Empty => "[ ] ",
        }
    }
}

/// One visible line of the flattened traversal.
///
/// The synthetic root is never yielded; its direct children sit at depth 1,
/// so the cursor indexes this sequence directly.
#[derive(Debug, Clone)]
pub struct FlatRow {
    pub path: PathBuf,
    /// Basename, used for display and substring search.
    pub name: String,
    pub depth: usize,
    pub is_dir: bool,
    pub marker: Marker,
    /// Immediate child count of the node, for the footer.
    pub child_count: usize,
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ── Navigation state ─────────────────────────────────────────────────────────

/// Cursor, pick, expansion and size state shared across the whole tree.
///
/// Owned once by the [`Tree`] and passed by reference into every operation —
/// there are no per-node copies of these collections.
#[derive(Debug, Default)]
pub struct NavState {
    /// Paths whose children are included in the flattened traversal.
    pub expanded: HashSet<PathBuf>,
    /// Paths the user marked, in pick order. Membership toggles.
    pub picked: Vec<PathBuf>,
    /// Size cache: `None` is a placeholder filled at most once per path by
    /// the sizing collaborator on the next render cycle, then never touched
    /// again.
    pub sized: HashMap<PathBuf, Option<String>>,
    /// Zero-based index into the flattened visible rows.
    pub cursor: usize,
    /// When set, dot-prefixed entries are filtered from listings.
    pub hidden: bool,
    /// Row indices of the last substring search.
    pub matches: Vec<usize>,
    /// Cursor path remembered while hidden entries were visible.
    last_while_shown: Option<PathBuf>,
    /// Cursor path remembered while hidden entries were suppressed.
    last_while_suppressed: Option<PathBuf>,
}

impl NavState {
    /// Step down one line. Wraps past the end via [`clamp_cursor`].
    pub fn move_down(&mut self) {
        self.cursor += 1;
    }

    /// Step up one line, wrapping to the last line at the top.
    pub fn move_up(&mut self, lines: usize) {
        if self.cursor == 0 {
            self.cursor = lines.saturating_sub(1);
        } else {
            self.cursor -= 1;
        }
    }

    /// Jump down a page, clamped to the last line.
    pub fn page_down(&mut self, lines: usize, page: usize) {
        self.cursor = (self.cursor + page).min(lines.saturating_sub(1));
    }

    /// Jump up a page, clamped to the first line.
    pub fn page_up(&mut self, page: usize) {
        self.cursor = self.cursor.saturating_sub(page);
    }

    pub fn top(&mut self) {
        self.cursor = 0;
    }

    pub fn bottom(&mut self, lines: usize) {
        self.cursor = lines.saturating_sub(1);
    }

    /// Wrap the cursor into `[0, lines - 1]`. Applied after every mutation.
    pub fn clamp_cursor(&mut self, lines: usize) {
        if lines == 0 {
            self.cursor = 0;
        } else {
            self.cursor %= lines;
        }
    }

    /// Toggle `path`'s membership in the picked list, preserving the order of
    /// the remaining entries.
    pub fn toggle_pick(&mut self, path: &Path) {
        if let Some(pos) = self.picked.iter().position(|picked| picked == path) {
            self.picked.remove(pos);
        } else {
            self.picked.push(path.to_path_buf());
        }
    }
}

// ── The tree ─────────────────────────────────────────────────────────────────

/// Root node plus the shared navigation state.
pub struct Tree {
    pub root: PathNode,
    pub nav: NavState,
}

impl Tree {
    /// Build a tree rooted at `root` (expected to be canonical). The root is
    /// expanded from the start.
    pub fn new(root: PathBuf, show_hidden: bool) -> Self {
        let mut nav = NavState {
            hidden: !show_hidden,
            ..NavState::default()
        };
        nav.expanded.insert(root.clone());
        Self {
            root: PathNode::new(root),
            nav,
        }
    }

    // ── Traversal ────────────────────────────────────────────────────────────

    /// Depth-first re-walk of the visible tree.
    ///
    /// Restartable and lazy: each call walks from scratch, descends only into
    /// expanded directories, and materializes children on demand — one level
    /// per visible directory, never a whole subtree. Markers for collapsed
    /// directories cost exactly one listing of that directory.
    pub fn flatten(&mut self) -> Vec<FlatRow> {
        let mut rows = Vec::new();
        Self::walk(
            &mut self.root,
            &self.nav.expanded,
            self.nav.hidden,
            0,
            &mut rows,
        );
        rows
    }

    fn walk(
        node: &mut PathNode,
        expanded: &HashSet<PathBuf>,
        hidden: bool,
        depth: usize,
        rows: &mut Vec<FlatRow>,
    ) {
        let is_expanded = expanded.contains(&node.path);
        if depth > 0 {
            let marker = if !node.is_dir {
                Marker::File
            } else {
                node.ensure_children(hidden);
                if is_expanded {
                    Marker::Expanded
                } else {
                    match &node.children {
                        ChildListing::Unknown => Marker::Unknown,
                        ChildListing::Loaded(children) if children.is_empty() => Marker::Empty,
                        _ => Marker::Collapsed,
                    }
                }
            };
            rows.push(FlatRow {
                path: node.path.clone(),
                name: display_name(&node.path),
                depth,
                is_dir: node.is_dir,
                marker,
                child_count: node.child_count(),
            });
        } else {
            node.ensure_children(hidden);
        }

        if node.is_dir && is_expanded {
            if let ChildListing::Loaded(children) = &mut node.children {
                for child in children.iter_mut() {
                    Self::walk(child, expanded, hidden, depth + 1, rows);
                }
            }
        }
    }

    /// Find a mutable reference to a loaded node by path.
    fn find_node_mut<'a>(node: &'a mut PathNode, target: &Path) -> Option<&'a mut PathNode> {
        if node.path == target {
            return Some(node);
        }
        if let ChildListing::Loaded(children) = &mut node.children {
            for child in children.iter_mut() {
                if let Some(found) = Self::find_node_mut(child, target) {
                    return Some(found);
                }
            }
        }
        None
    }

    // ── Expansion ────────────────────────────────────────────────────────────

    /// Expand the directory under the cursor and step onto its first child.
    ///
    /// A no-op on files, empty directories and unlistable directories —
    /// there is nothing to expand into.
    pub fn expand(&mut self, rows: &[FlatRow]) {
        let Some(row) = rows.get(self.nav.cursor) else {
            return;
        };
        if matches!(row.marker, Marker::Expanded | Marker::Collapsed) {
            self.nav.expanded.insert(row.path.clone());
            self.nav.cursor += 1;
        }
    }

    /// Expand the directory under the cursor together with its immediate
    /// child directories (one level down, not recursive).
    pub fn expand_all(&mut self, rows: &[FlatRow]) {
        let Some(row) = rows.get(self.nav.cursor) else {
            return;
        };
        if !matches!(row.marker, Marker::Expanded | Marker::Collapsed) {
            return;
        }
        let path = row.path.clone();
        let hidden = self.nav.hidden;
        let mut to_expand = vec![path.clone()];
        if let Some(node) = Self::find_node_mut(&mut self.root, &path) {
            node.ensure_children(hidden);
            if let ChildListing::Loaded(children) = &mut node.children {
                for child in children.iter_mut() {
                    if child.is_dir {
                        child.ensure_children(hidden);
                        if child.child_count() > 0 {
                            to_expand.push(child.path.clone());
                        }
                    }
                }
            }
        }
        self.nav.expanded.extend(to_expand);
        self.nav.cursor += 1;
    }

    /// Toggle expansion of the directory under the cursor in place.
    pub fn toggle_expand(&mut self, rows: &[FlatRow]) {
        let Some(row) = rows.get(self.nav.cursor) else {
            return;
        };
        match row.marker {
            Marker::Expanded => {
                self.nav.expanded.remove(&row.path);
            }
            Marker::Collapsed => {
                self.nav.expanded.insert(row.path.clone());
            }
            _ => {}
        }
    }

    /// Collapse the node under the cursor.
    pub fn collapse(&mut self, rows: &[FlatRow]) {
        if let Some(row) = rows.get(self.nav.cursor) {
            self.nav.expanded.remove(&row.path);
        }
    }

    /// Jump to the structural parent and collapse it along with every
    /// expanded path underneath it. At the top level there is no grandparent
    /// scope to use as a boundary, so this degrades to a plain collapse.
    pub fn collapse_all(&mut self, rows: &[FlatRow]) {
        let Some(row) = rows.get(self.nav.cursor) else {
            return;
        };
        if row.depth > 1 {
            if let Some(pdir) = self.prev_parent(rows) {
                self.nav.expanded.retain(|path| !path.starts_with(&pdir));
            }
        } else {
            self.collapse(rows);
        }
    }

    // ── Parent jumps ─────────────────────────────────────────────────────────

    /// Advance the cursor to the line following the current node's parent
    /// subtree — the next sibling-or-ancestor directory. At depth 1 this
    /// walks forward to the next top-level directory line instead, since
    /// there is no grandparent prefix to bound the scan.
    pub fn next_parent(&mut self, rows: &[FlatRow]) {
        let Some(row) = rows.get(self.nav.cursor) else {
            return;
        };
        if row.depth > 1 {
            let Some(pdir) = row.path.parent().map(Path::to_path_buf) else {
                return;
            };
            let mut cursor = self.nav.cursor;
            for (idx, r) in rows.iter().enumerate() {
                if idx >= cursor && r.path.starts_with(&pdir) {
                    cursor += 1;
                }
            }
            self.nav.cursor = cursor;
        } else {
            let mut cursor = self.nav.cursor;
            for (idx, r) in rows.iter().enumerate() {
                if idx > cursor {
                    cursor += 1;
                    if r.is_dir && r.depth == 1 {
                        break;
                    }
                }
            }
            self.nav.cursor = cursor;
        }
    }

    /// Retreat the cursor to the current node's parent directory line and
    /// return the parent path. At depth 1 the cursor moves to the previous
    /// top-level directory line and the current path itself is returned as
    /// the boundary.
    pub fn prev_parent(&mut self, rows: &[FlatRow]) -> Option<PathBuf> {
        let row = rows.get(self.nav.cursor)?;
        let cur_path = row.path.clone();
        if row.depth > 1 {
            let pdir = cur_path.parent()?.to_path_buf();
            let mut cursor = self.nav.cursor;
            for r in rows {
                if r.path == cur_path {
                    break;
                }
                if r.path.starts_with(&pdir) {
                    cursor = cursor.saturating_sub(1);
                }
            }
            self.nav.cursor = cursor;
            Some(pdir)
        } else {
            for (idx, r) in rows.iter().enumerate() {
                if r.path == cur_path {
                    break;
                }
                if r.is_dir && r.depth == 1 {
                    self.nav.cursor = idx;
                }
            }
            Some(cur_path)
        }
    }

    // ── Picking ──────────────────────────────────────────────────────────────

    /// Toggle the pick mark on the current line and step down.
    pub fn pick(&mut self, rows: &[FlatRow]) {
        if let Some(row) = rows.get(self.nav.cursor) {
            let path = row.path.clone();
            self.nav.toggle_pick(&path);
            self.nav.cursor += 1;
        }
    }

    /// Toggle the pick mark on every currently visible line.
    pub fn pick_all(&mut self, rows: &[FlatRow]) {
        for row in rows {
            let path = row.path.clone();
            self.nav.toggle_pick(&path);
        }
    }

    /// Toggle the pick mark on every visible line whose full path or
    /// basename matches any of the given glob patterns.
    pub fn pick_globs(&mut self, rows: &[FlatRow], patterns: &[glob::Pattern]) {
        for row in rows {
            let hit = patterns
                .iter()
                .any(|pattern| pattern.matches_path(&row.path) || pattern.matches(&row.name));
            if hit {
                let path = row.path.clone();
                self.nav.toggle_pick(&path);
            }
        }
    }

    // ── Searching ────────────────────────────────────────────────────────────

    /// Record every line whose basename contains `query`, then jump to the
    /// first match after the cursor.
    pub fn find(&mut self, rows: &[FlatRow], query: &str) {
        self.nav.matches = rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.name.contains(query))
            .map(|(idx, _)| idx)
            .collect();
        if !self.nav.matches.is_empty() {
            self.find_next();
        }
    }

    /// Jump to the smallest match index greater than the cursor, wrapping to
    /// the first match when the cursor is at or past the last one.
    pub fn find_next(&mut self) {
        let Some(&first) = self.nav.matches.first() else {
            return;
        };
        let cursor = self.nav.cursor;
        self.nav.cursor = self
            .nav
            .matches
            .iter()
            .copied()
            .find(|&idx| idx > cursor)
            .unwrap_or(first);
    }

    /// Jump to the largest match index less than the cursor, wrapping to the
    /// last match when the cursor is at or before the first one.
    pub fn find_prev(&mut self) {
        let Some(&last) = self.nav.matches.last() else {
            return;
        };
        let cursor = self.nav.cursor;
        self.nav.cursor = self
            .nav
            .matches
            .iter()
            .rev()
            .copied()
            .find(|&idx| idx < cursor)
            .unwrap_or(last);
    }

    // ── Sizing ───────────────────────────────────────────────────────────────

    /// Request a size annotation for the current line and step down. The
    /// placeholder is filled on the next render cycle.
    pub fn get_size(&mut self, rows: &[FlatRow]) {
        if let Some(row) = rows.get(self.nav.cursor) {
            self.nav.sized.entry(row.path.clone()).or_insert(None);
            self.nav.cursor += 1;
        }
    }

    /// Request size annotations for every visible line.
    pub fn get_size_all(&mut self, rows: &[FlatRow]) {
        for row in rows {
            self.nav.sized.entry(row.path.clone()).or_insert(None);
        }
    }

    /// Fill pending size placeholders for the given rows by invoking the
    /// sizing collaborator. Each path is computed at most once; a filled
    /// entry is never recomputed.
    pub fn fill_pending_sizes(&mut self, rows: &[FlatRow]) {
        for row in rows {
            if let Some(entry) = self.nav.sized.get_mut(&row.path) {
                if entry.is_none() {
                    *entry = Some(size::size_label(&row.path));
                }
            }
        }
    }

    // ── Hidden-file toggle ───────────────────────────────────────────────────

    /// Flip the hidden-files filter, drop the materialized tree so listings
    /// are recomputed, and try to keep the cursor on the same logical entry
    /// by remembering its path across the two filter states. If the
    /// remembered path is gone the cursor stays where it was.
    pub fn toggle_hidden(&mut self) {
        let rows = self.flatten();
        let current = rows.get(self.nav.cursor).map(|row| row.path.clone());
        if self.nav.hidden {
            self.nav.last_while_suppressed = current;
        } else {
            self.nav.last_while_shown = current;
        }
        self.nav.hidden = !self.nav.hidden;
        self.root.invalidate();

        let rows = self.flatten();
        let locate = |remembered: &Option<PathBuf>| {
            remembered
                .as_ref()
                .and_then(|path| rows.iter().position(|row| &row.path == path))
        };
        if let Some(idx) = locate(&self.nav.last_while_shown) {
            self.nav.cursor = idx;
        } else if let Some(idx) = locate(&self.nav.last_while_suppressed) {
            self.nav.cursor = idx;
        }
    }

    // ── Resets ───────────────────────────────────────────────────────────────

    /// Clear the picked list only.
    pub fn reset_picked(&mut self) {
        self.nav.picked.clear();
    }

    /// Clear picks, expansion (except the root) and the size cache, and home
    /// the cursor.
    pub fn reset_all(&mut self) {
        self.nav.cursor = 0;
        self.nav.picked.clear();
        self.nav.sized.clear();
        self.nav.expanded.clear();
        self.nav.expanded.insert(self.root.path.clone());
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::TempDir;

    /// root/
    ///   .hidden
    ///   alpha/
    ///     inner.txt
    ///     nested/
    ///       deep.txt
    ///   beta/          (empty)
    ///   file_a.txt
    ///   file_b.rs
    fn setup() -> (TempDir, Tree) {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("alpha")).unwrap();
        fs::create_dir(dir.path().join("alpha").join("nested")).unwrap();
        File::create(dir.path().join("alpha").join("inner.txt")).unwrap();
        File::create(dir.path().join("alpha").join("nested").join("deep.txt")).unwrap();
        fs::create_dir(dir.path().join("beta")).unwrap();
        File::create(dir.path().join("file_a.txt")).unwrap();
        File::create(dir.path().join("file_b.rs")).unwrap();
        File::create(dir.path().join(".hidden")).unwrap();
        let root = dir.path().canonicalize().unwrap();
        let tree = Tree::new(root, true);
        (dir, tree)
    }

    fn names(rows: &[FlatRow]) -> Vec<&str> {
        rows.iter().map(|row| row.name.as_str()).collect()
    }

    #[test]
    fn flatten_excludes_root_and_sorts_lexicographically() {
        let (_dir, mut tree) = setup();
        let rows = tree.flatten();
        assert_eq!(
            names(&rows),
            vec![".hidden", "alpha", "beta", "file_a.txt", "file_b.rs"]
        );
        assert!(rows.iter().all(|row| row.depth == 1));
    }

    #[test]
    fn markers_reflect_listing_outcome() {
        let (_dir, mut tree) = setup();
        let rows = tree.flatten();
        assert_eq!(rows[0].marker, Marker::File);
        assert_eq!(rows[1].marker, Marker::Collapsed); // alpha has children
        assert_eq!(rows[2].marker, Marker::Empty); // beta is empty
        assert_eq!(rows[3].marker, Marker::File);
    }

    #[test]
    fn listing_a_file_is_unknown() {
        let dir = TempDir::new().unwrap();
        File::create(dir.path().join("plain")).unwrap();
        let mut node = PathNode::new(dir.path().join("plain"));
        node.ensure_children(false);
        assert!(matches!(node.children, ChildListing::Unknown));
        assert_eq!(node.child_count(), 0);
    }

    #[test]
    fn expand_descends_only_into_expanded_dirs() {
        let (_dir, mut tree) = setup();
        let rows = tree.flatten();
        tree.nav.cursor = 1; // alpha
        tree.expand(&rows);
        let rows = tree.flatten();
        assert_eq!(
            names(&rows),
            vec![
                ".hidden",
                "alpha",
                "inner.txt",
                "nested",
                "beta",
                "file_a.txt",
                "file_b.rs"
            ]
        );
        // nested stays collapsed: deep.txt is not yielded
        assert_eq!(rows[3].marker, Marker::Collapsed);
        // expand stepped onto the first child
        assert_eq!(tree.nav.cursor, 2);
    }

    #[test]
    fn expand_on_empty_directory_is_noop() {
        let (_dir, mut tree) = setup();
        let rows = tree.flatten();
        tree.nav.cursor = 2; // beta (empty)
        tree.expand(&rows);
        assert_eq!(tree.nav.cursor, 2);
        assert!(!tree.nav.expanded.contains(&rows[2].path));
        assert_eq!(tree.flatten().len(), rows.len());
    }

    #[test]
    fn expand_on_file_is_noop() {
        let (_dir, mut tree) = setup();
        let rows = tree.flatten();
        tree.nav.cursor = 3; // file_a.txt
        tree.expand(&rows);
        assert_eq!(tree.nav.cursor, 3);
        assert_eq!(tree.flatten().len(), rows.len());
    }

    #[test]
    fn toggle_expand_twice_restores_line_count_and_cursor() {
        let (_dir, mut tree) = setup();
        let rows = tree.flatten();
        let before = rows.len();
        tree.nav.cursor = 1; // alpha
        tree.toggle_expand(&rows);
        let rows = tree.flatten();
        assert!(rows.len() > before);
        tree.toggle_expand(&rows);
        let rows = tree.flatten();
        assert_eq!(rows.len(), before);
        assert_eq!(tree.nav.cursor, 1);
    }

    #[test]
    fn expand_all_covers_one_level_of_child_dirs() {
        let (dir, mut tree) = setup();
        let rows = tree.flatten();
        tree.nav.cursor = 1; // alpha
        tree.expand_all(&rows);
        let root = dir.path().canonicalize().unwrap();
        assert!(tree.nav.expanded.contains(&root.join("alpha")));
        assert!(tree.nav.expanded.contains(&root.join("alpha").join("nested")));
        let rows = tree.flatten();
        assert!(names(&rows).contains(&"deep.txt"));
    }

    #[test]
    fn collapse_all_from_deep_jumps_to_parent_and_collapses_subtree() {
        let (dir, mut tree) = setup();
        let root = dir.path().canonicalize().unwrap();
        tree.nav.expanded.insert(root.join("alpha"));
        tree.nav.expanded.insert(root.join("alpha").join("nested"));
        let rows = tree.flatten();
        // [.hidden, alpha, inner.txt, nested, deep.txt, beta, file_a, file_b]
        tree.nav.cursor = 4; // deep.txt, depth 3
        tree.collapse_all(&rows);
        assert_eq!(tree.nav.cursor, 3); // nested
        assert!(!tree.nav.expanded.contains(&root.join("alpha").join("nested")));
        assert!(tree.nav.expanded.contains(&root.join("alpha")));
    }

    #[test]
    fn collapse_all_at_top_level_is_plain_collapse() {
        let (dir, mut tree) = setup();
        let root = dir.path().canonicalize().unwrap();
        tree.nav.expanded.insert(root.join("alpha"));
        let rows = tree.flatten();
        tree.nav.cursor = 1; // alpha, depth 1
        tree.collapse_all(&rows);
        assert_eq!(tree.nav.cursor, 1);
        assert!(!tree.nav.expanded.contains(&root.join("alpha")));
    }

    #[test]
    fn next_parent_from_nested_file_lands_on_next_top_level_dir() {
        let (dir, mut tree) = setup();
        let root = dir.path().canonicalize().unwrap();
        tree.nav.expanded.insert(root.join("alpha"));
        tree.nav.expanded.insert(root.join("alpha").join("nested"));
        let rows = tree.flatten();
        // [.hidden, alpha, inner.txt, nested, deep.txt, beta, file_a, file_b]
        tree.nav.cursor = 2; // inner.txt, depth 2
        tree.next_parent(&rows);
        assert_eq!(tree.nav.cursor, 5);
        assert_eq!(rows[5].name, "beta");
    }

    #[test]
    fn next_parent_at_top_level_hops_to_next_dir() {
        let (_dir, mut tree) = setup();
        let rows = tree.flatten();
        tree.nav.cursor = 0; // .hidden
        tree.next_parent(&rows);
        assert_eq!(tree.nav.cursor, 1); // alpha
    }

    #[test]
    fn prev_parent_from_nested_file_lands_on_parent_dir() {
        let (dir, mut tree) = setup();
        let root = dir.path().canonicalize().unwrap();
        tree.nav.expanded.insert(root.join("alpha"));
        let rows = tree.flatten();
        // [.hidden, alpha, inner.txt, nested, beta, file_a, file_b]
        tree.nav.cursor = 2; // inner.txt
        let pdir = tree.prev_parent(&rows);
        assert_eq!(tree.nav.cursor, 1); // alpha
        assert_eq!(pdir, Some(root.join("alpha")));
    }

    #[test]
    fn prev_parent_at_top_level_hops_to_previous_dir() {
        let (_dir, mut tree) = setup();
        let rows = tree.flatten();
        tree.nav.cursor = 3; // file_a.txt
        tree.prev_parent(&rows);
        assert_eq!(tree.nav.cursor, 2); // beta
    }

    #[test]
    fn pick_toggles_and_advances() {
        let (dir, mut tree) = setup();
        let root = dir.path().canonicalize().unwrap();
        let rows = tree.flatten();
        tree.nav.cursor = 3; // file_a.txt
        tree.pick(&rows);
        assert_eq!(tree.nav.picked, vec![root.join("file_a.txt")]);
        assert_eq!(tree.nav.cursor, 4);
    }

    #[test]
    fn pick_twice_is_idempotent_and_preserves_order() {
        let (dir, mut tree) = setup();
        let root = dir.path().canonicalize().unwrap();
        tree.nav.picked.push(root.join("file_b.rs"));
        let rows = tree.flatten();
        tree.nav.cursor = 3;
        tree.pick(&rows);
        tree.nav.cursor = 3;
        tree.pick(&rows);
        assert_eq!(tree.nav.picked, vec![root.join("file_b.rs")]);
    }

    #[test]
    fn pick_all_toggles_every_visible_line() {
        let (_dir, mut tree) = setup();
        let rows = tree.flatten();
        tree.pick_all(&rows);
        assert_eq!(tree.nav.picked.len(), rows.len());
        tree.pick_all(&rows);
        assert!(tree.nav.picked.is_empty());
    }

    #[test]
    fn glob_picking_matches_basename_patterns() {
        let dir = TempDir::new().unwrap();
        File::create(dir.path().join("x.txt")).unwrap();
        File::create(dir.path().join("y.md")).unwrap();
        let root = dir.path().canonicalize().unwrap();
        let mut tree = Tree::new(root.clone(), true);
        let rows = tree.flatten();
        let patterns = vec![glob::Pattern::new("*.txt").unwrap()];
        tree.pick_globs(&rows, &patterns);
        assert_eq!(tree.nav.picked, vec![root.join("x.txt")]);
    }

    #[test]
    fn find_records_basename_substring_matches() {
        let (_dir, mut tree) = setup();
        let rows = tree.flatten();
        tree.find(&rows, "file");
        assert_eq!(tree.nav.matches, vec![3, 4]);
        assert_eq!(tree.nav.cursor, 3); // jumped to first match
    }

    #[test]
    fn find_next_wraps_circularly() {
        let (_dir, mut tree) = setup();
        tree.nav.matches = vec![2, 5, 9];
        tree.nav.cursor = 9;
        tree.find_next();
        assert_eq!(tree.nav.cursor, 2);
        tree.nav.cursor = 3;
        tree.find_next();
        assert_eq!(tree.nav.cursor, 5);
    }

    #[test]
    fn find_prev_wraps_circularly() {
        let (_dir, mut tree) = setup();
        tree.nav.matches = vec![2, 5, 9];
        tree.nav.cursor = 2;
        tree.find_prev();
        assert_eq!(tree.nav.cursor, 9);
        tree.nav.cursor = 7;
        tree.find_prev();
        assert_eq!(tree.nav.cursor, 5);
    }

    #[test]
    fn get_size_inserts_placeholder_and_advances() {
        let (dir, mut tree) = setup();
        let root = dir.path().canonicalize().unwrap();
        let rows = tree.flatten();
        tree.nav.cursor = 3;
        tree.get_size(&rows);
        assert_eq!(tree.nav.sized.get(&root.join("file_a.txt")), Some(&None));
        assert_eq!(tree.nav.cursor, 4);
    }

    #[test]
    fn filled_size_is_never_recomputed() {
        let (dir, mut tree) = setup();
        let root = dir.path().canonicalize().unwrap();
        let rows = tree.flatten();
        tree.nav.cursor = 3;
        tree.get_size(&rows);
        tree.fill_pending_sizes(&rows);
        let first = tree.nav.sized.get(&root.join("file_a.txt")).cloned();
        assert!(matches!(first, Some(Some(_))));

        // Grow the file; the cached label must not change.
        fs::write(root.join("file_a.txt"), [0u8; 4096]).unwrap();
        tree.fill_pending_sizes(&rows);
        assert_eq!(tree.nav.sized.get(&root.join("file_a.txt")).cloned(), first);
    }

    #[test]
    fn get_size_all_covers_every_visible_line() {
        let (_dir, mut tree) = setup();
        let rows = tree.flatten();
        tree.get_size_all(&rows);
        assert_eq!(tree.nav.sized.len(), rows.len());
    }

    #[test]
    fn hidden_toggle_is_a_pure_filter() {
        let (_dir, mut tree) = setup();
        let shown: Vec<String> = tree.flatten().iter().map(|r| r.name.clone()).collect();
        tree.toggle_hidden();
        let suppressed: Vec<String> = tree.flatten().iter().map(|r| r.name.clone()).collect();
        assert!(suppressed.iter().all(|name| shown.contains(name)));
        let diff: Vec<&String> = shown.iter().filter(|n| !suppressed.contains(n)).collect();
        assert!(diff.iter().all(|name| name.starts_with('.')));
    }

    #[test]
    fn hidden_toggle_restores_cursor_to_same_entry() {
        let (_dir, mut tree) = setup();
        tree.nav.cursor = 2; // beta (index shifts once .hidden is filtered)
        tree.toggle_hidden();
        let rows = tree.flatten();
        assert_eq!(rows[tree.nav.cursor].name, "beta");
        tree.toggle_hidden();
        let rows = tree.flatten();
        assert_eq!(rows[tree.nav.cursor].name, "beta");
        assert_eq!(tree.nav.cursor, 2);
    }

    #[test]
    fn hidden_toggle_leaves_cursor_when_entry_disappears() {
        let (_dir, mut tree) = setup();
        tree.nav.cursor = 0; // .hidden itself
        tree.toggle_hidden();
        assert_eq!(tree.nav.cursor, 0);
    }

    #[test]
    fn cursor_movement_wraps_and_pages_clamp() {
        let (_dir, mut tree) = setup();
        let lines = tree.flatten().len();
        tree.nav.bottom(lines);
        tree.nav.move_down();
        tree.nav.clamp_cursor(lines);
        assert_eq!(tree.nav.cursor, 0);

        tree.nav.move_up(lines);
        assert_eq!(tree.nav.cursor, lines - 1);

        tree.nav.page_down(lines, 100);
        assert_eq!(tree.nav.cursor, lines - 1);
        tree.nav.page_up(100);
        assert_eq!(tree.nav.cursor, 0);
    }

    #[test]
    fn cursor_stays_in_range_after_action_sequences() {
        let (_dir, mut tree) = setup();
        for _ in 0..3 {
            let rows = tree.flatten();
            tree.nav.cursor = 1;
            tree.expand(&rows);
            let rows = tree.flatten();
            tree.pick(&rows);
            tree.nav.clamp_cursor(rows.len());
            assert!(tree.nav.cursor < rows.len());
            tree.collapse_all(&rows);
            let rows = tree.flatten();
            tree.nav.clamp_cursor(rows.len());
            assert!(tree.nav.cursor < rows.len());
        }
    }

    #[test]
    fn spec_scenario_empty_dir_and_single_file() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("dir1")).unwrap();
        File::create(dir.path().join("file1")).unwrap();
        let root = dir.path().canonicalize().unwrap();
        let mut tree = Tree::new(root.clone(), true);

        let rows = tree.flatten();
        assert_eq!(names(&rows), vec!["dir1", "file1"]);
        assert_eq!(rows[0].marker, Marker::Empty);
        assert_eq!(tree.nav.cursor, 0);

        tree.expand(&rows); // no children: complete no-op
        assert_eq!(tree.nav.cursor, 0);
        assert_eq!(tree.flatten().len(), 2);

        tree.nav.move_down();
        let rows = tree.flatten();
        tree.pick(&rows);
        assert_eq!(tree.nav.picked, vec![root.join("file1")]);

        tree.nav.cursor = 1;
        let rows = tree.flatten();
        tree.pick(&rows);
        assert!(tree.nav.picked.is_empty());
    }

    #[test]
    fn reset_all_keeps_only_root_expanded() {
        let (dir, mut tree) = setup();
        let root = dir.path().canonicalize().unwrap();
        tree.nav.expanded.insert(root.join("alpha"));
        tree.nav.picked.push(root.join("file_a.txt"));
        tree.nav.sized.insert(root.join("file_a.txt"), None);
        tree.nav.cursor = 4;
        tree.reset_all();
        assert_eq!(tree.nav.cursor, 0);
        assert!(tree.nav.picked.is_empty());
        assert!(tree.nav.sized.is_empty());
        assert_eq!(tree.nav.expanded.len(), 1);
        assert!(tree.nav.expanded.contains(&root));
    }

    #[test]
    fn reset_picked_clears_picks_only() {
        let (dir, mut tree) = setup();
        let root = dir.path().canonicalize().unwrap();
        tree.nav.expanded.insert(root.join("alpha"));
        tree.nav.picked.push(root.join("file_a.txt"));
        tree.reset_picked();
        assert!(tree.nav.picked.is_empty());
        assert!(tree.nav.expanded.contains(&root.join("alpha")));
    }
}
