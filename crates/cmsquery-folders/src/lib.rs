//! cmsquery folders - folder listing client with navigation and selection state
//!
//! Independent of the query service and the descendant crawl.

pub mod browser;
pub mod client;
pub mod navigator;
pub mod selection;

pub use browser::FolderBrowser;
pub use client::{FolderClient, FolderEntry, FolderError, FolderResult};
pub use navigator::{FolderLocation, Navigator, ROOT_PATH};
pub use selection::Selection;
