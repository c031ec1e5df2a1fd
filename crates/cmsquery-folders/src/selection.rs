//! Staged and finalized path selections

use std::collections::{BTreeSet, HashSet};

/// Paths ticked in the current folder (staged) and paths committed to the
/// final selection. Finalized paths are kept sorted.
#[derive(Debug, Default)]
pub struct Selection {
    staged: HashSet<String>,
    finalized: BTreeSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&mut self, path: impl Into<String>, checked: bool) {
        let path = path.into();
        if checked {
            self.staged.insert(path);
        } else {
            self.staged.remove(&path);
        }
    }

    pub fn is_staged(&self, path: &str) -> bool {
        self.staged.contains(path)
    }

    /// Commit every staged path. Staged paths stay staged.
    pub fn add_staged(&mut self) -> usize {
        let before = self.finalized.len();
        self.finalized.extend(self.staged.iter().cloned());
        self.finalized.len() - before
    }

    /// Drop `path` from both sets.
    pub fn remove(&mut self, path: &str) -> bool {
        let staged = self.staged.remove(path);
        let finalized = self.finalized.remove(path);
        staged || finalized
    }

    pub fn clear_staged(&mut self) {
        self.staged.clear();
    }

    pub fn staged_len(&self) -> usize {
        self.staged.len()
    }

    pub fn finalized(&self) -> impl Iterator<Item = &str> {
        self.finalized.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.finalized.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_and_commit() {
        let mut sel = Selection::new();
        sel.stage("root/b/", true);
        sel.stage("root/a.rpt", true);
        sel.stage("root/c", true);
        sel.stage("root/c", false);
        assert_eq!(sel.add_staged(), 2);
        assert_eq!(sel.finalized().collect::<Vec<_>>(), vec!["root/a.rpt", "root/b/"]);
        assert_eq!(sel.add_staged(), 0);
    }

    #[test]
    fn remove_clears_both_sets() {
        let mut sel = Selection::new();
        sel.stage("p", true);
        sel.add_staged();
        assert!(sel.remove("p"));
        assert!(!sel.is_staged("p"));
        assert!(sel.is_empty());
        assert!(!sel.remove("p"));
    }

    #[test]
    fn clearing_staged_keeps_finalized() {
        let mut sel = Selection::new();
        sel.stage("p", true);
        sel.add_staged();
        sel.clear_staged();
        assert_eq!(sel.staged_len(), 0);
        assert_eq!(sel.finalized().count(), 1);
    }
}
