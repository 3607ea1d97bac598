//! Page-level session layer for the folio portfolio site.
//!
//! Wires loaded content to per-page filter views and the reveal scheduler.
//! A renderer drives a [`SiteSession`] with page changes, filter events and
//! clock updates, then reads back the visible items and reveal progress.
//!
//! # Usage
//!
//! ```rust,ignore
//! use folio_site::{FilterEvent, Page, SiteSession};
//!
//! let mut site = SiteSession::load("content/".as_ref())?;
//! site.open_page(Page::Projects);
//! site.dispatch(FilterEvent::QueryChanged("xss".into()))?;
//! for project in site.projects().visible() {
//!     println!("{}", project.title);
//! }
//! ```

pub mod error;
pub mod page;
pub mod session;
pub mod view;

pub use error::SiteError;
pub use page::Page;
pub use session::SiteSession;
pub use view::{CollectionView, FilterEvent};
