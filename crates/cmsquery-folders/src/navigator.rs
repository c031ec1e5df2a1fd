//! Folder navigation stack

use crate::client::FolderEntry;

/// Path prefix under which top-level folders are opened.
pub const ROOT_PATH: &str = "root/";

const NO_FOLDER: &str = "Select a folder";

/// An opened folder. `path` always ends with `/`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FolderLocation {
    pub id: String,
    pub name: String,
    pub parent_path: String,
    pub path: String,
}

#[derive(Debug, Default)]
pub struct Navigator {
    stack: Vec<FolderLocation>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push `entry` as the current folder, located under `parent_path`.
    pub fn open(&mut self, entry: &FolderEntry, parent_path: &str) -> &FolderLocation {
        let location = FolderLocation {
            id: entry.id.clone(),
            name: entry.name.clone(),
            parent_path: parent_path.to_string(),
            path: format!("{}{}/", parent_path, entry.name),
        };
        self.stack.push(location);
        &self.stack[self.stack.len() - 1]
    }

    /// Open a top-level folder.
    pub fn open_root(&mut self, entry: &FolderEntry) -> &FolderLocation {
        self.open(entry, ROOT_PATH)
    }

    /// Open a child of the current folder.
    pub fn open_child(&mut self, entry: &FolderEntry) -> &FolderLocation {
        let parent = self
            .current()
            .map(|c| c.path.clone())
            .unwrap_or_else(|| ROOT_PATH.to_string());
        self.open(entry, &parent)
    }

    pub fn current(&self) -> Option<&FolderLocation> {
        self.stack.last()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn breadcrumb(&self) -> &str {
        self.current().map(|c| c.path.as_str()).unwrap_or(NO_FOLDER)
    }

    pub fn can_go_up(&self) -> bool {
        self.stack.len() > 1
    }

    /// Leave the current folder. Returns the folder now current, or `None`
    /// (and changes nothing) when already at the first opened folder.
    pub fn go_up(&mut self) -> Option<&FolderLocation> {
        if !self.can_go_up() {
            return None;
        }
        self.stack.pop();
        self.current()
    }

    /// Display path of `entry` inside the current folder. Folders get a
    /// trailing `/`.
    pub fn entry_path(&self, entry: &FolderEntry) -> String {
        let base = self.current().map(|c| c.path.as_str()).unwrap_or(ROOT_PATH);
        if entry.is_folder() {
            format!("{}{}/", base, entry.name)
        } else {
            format!("{}{}", base, entry.name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn folder(id: &str, name: &str) -> FolderEntry {
        FolderEntry {
            id: id.into(),
            name: name.into(),
            kind: "Folder".into(),
        }
    }

    #[test]
    fn empty_navigator() {
        let nav = Navigator::new();
        assert_eq!(nav.breadcrumb(), "Select a folder");
        assert!(!nav.can_go_up());
        assert!(nav.current().is_none());
    }

    #[test]
    fn open_builds_paths() {
        let mut nav = Navigator::new();
        assert_eq!(nav.open_root(&folder("1", "Sales")).path, "root/Sales/");
        assert_eq!(nav.open_child(&folder("2", "Q1")).path, "root/Sales/Q1/");
        assert_eq!(nav.current().unwrap().parent_path, "root/Sales/");
        assert_eq!(nav.breadcrumb(), "root/Sales/Q1/");
    }

    #[test]
    fn go_up_stops_at_first_folder() {
        let mut nav = Navigator::new();
        nav.open_root(&folder("1", "Sales"));
        nav.open_child(&folder("2", "Sales"));
        assert!(nav.can_go_up());
        assert_eq!(nav.go_up().unwrap().path, "root/Sales/");
        assert!(nav.go_up().is_none());
        assert_eq!(nav.depth(), 1);
    }
}
