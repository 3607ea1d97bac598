use std::path::PathBuf;

use crate::page::Page;

/// Errors that can occur in the site layer.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// No page is currently open.
    #[error("no page is currently open")]
    NoActivePage,

    /// The page has no filterable collection.
    #[error("page '{page}' has no filterable collection")]
    NotFilterable { page: Page },

    /// A route name did not match any page.
    #[error("unknown page '{name}'")]
    UnknownPage { name: String },

    /// Failed to load content from the content directory.
    #[error("data load error in {dir}: {source}")]
    DataLoad {
        dir: PathBuf,
        source: folio_data::DataLoadError,
    },
}
