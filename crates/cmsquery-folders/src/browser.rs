//! Browse session: client, navigation stack, current listing and selection.

use crate::client::{FolderClient, FolderEntry, FolderError, FolderResult};
use crate::navigator::Navigator;
use crate::selection::Selection;
use tracing::info;

pub struct FolderBrowser {
    client: FolderClient,
    nav: Navigator,
    selection: Selection,
    listing: Vec<FolderEntry>,
}

impl FolderBrowser {
    pub fn new(client: FolderClient) -> Self {
        Self {
            client,
            nav: Navigator::new(),
            selection: Selection::new(),
            listing: Vec::new(),
        }
    }

    pub async fn roots(&self) -> FolderResult<Vec<FolderEntry>> {
        self.client.list_roots().await
    }

    /// Open the top-level folder called `name`.
    pub async fn open_root(&mut self, name: &str) -> FolderResult<&[FolderEntry]> {
        let roots = self.client.list_roots().await?;
        let entry = find_folder(&roots, name)?;
        self.nav.open_root(&entry);
        self.reload().await
    }

    /// Open the sub-folder called `name` of the current folder.
    pub async fn open_child(&mut self, name: &str) -> FolderResult<&[FolderEntry]> {
        let entry = find_folder(&self.listing, name)?;
        self.nav.open_child(&entry);
        self.reload().await
    }

    /// Open a `/`-separated chain of folder names starting at the roots,
    /// replacing the navigation history. A leading `root/` is ignored.
    pub async fn open_path(&mut self, path: &str) -> FolderResult<&[FolderEntry]> {
        let mut names = path
            .trim_start_matches(crate::navigator::ROOT_PATH)
            .split('/')
            .filter(|s| !s.is_empty());
        let Some(first) = names.next() else {
            return Err(FolderError::NotFound(path.to_string()));
        };
        self.nav = Navigator::new();
        self.open_root(first).await?;
        for name in names {
            self.open_child(name).await?;
        }
        Ok(self.listing.as_slice())
    }

    /// Return to the parent folder. `false` when already at the top.
    pub async fn go_up(&mut self) -> FolderResult<bool> {
        if self.nav.go_up().is_none() {
            return Ok(false);
        }
        self.reload().await?;
        Ok(true)
    }

    /// Tick or untick the entry called `name` in the current listing.
    pub fn stage(&mut self, name: &str, checked: bool) -> FolderResult<String> {
        let entry = self
            .listing
            .iter()
            .find(|e| e.name == name)
            .ok_or_else(|| FolderError::NotFound(name.to_string()))?;
        let path = self.nav.entry_path(entry);
        self.selection.stage(path.clone(), checked);
        Ok(path)
    }

    pub fn listing(&self) -> &[FolderEntry] {
        &self.listing
    }

    /// Current listing paired with each entry's display path.
    pub fn entry_paths(&self) -> Vec<(String, &FolderEntry)> {
        self.listing
            .iter()
            .map(|e| (self.nav.entry_path(e), e))
            .collect()
    }

    pub fn navigator(&self) -> &Navigator {
        &self.nav
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut Selection {
        &mut self.selection
    }

    async fn reload(&mut self) -> FolderResult<&[FolderEntry]> {
        self.selection.clear_staged();
        let Some(current) = self.nav.current() else {
            self.listing.clear();
            return Ok(self.listing.as_slice());
        };
        let id = current.id.clone();
        self.listing = self.client.list_children(&id).await?;
        info!("{}: {} entries", self.nav.breadcrumb(), self.listing.len());
        Ok(self.listing.as_slice())
    }
}

fn find_folder(entries: &[FolderEntry], name: &str) -> FolderResult<FolderEntry> {
    entries
        .iter()
        .find(|e| e.is_folder() && e.name == name)
        .cloned()
        .ok_or_else(|| FolderError::NotFound(name.to_string()))
}
