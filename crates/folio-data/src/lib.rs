//! Loading of site content and configuration from data files.
//!
//! A content directory holds one file per collection, each in RON, JSON or
//! TOML (detected by extension):
//!
//! | Base name  | Contents                 | Required |
//! |------------|--------------------------|----------|
//! | `profile`  | [`Profile`] record       | yes      |
//! | `projects` | list of [`Project`]      | no       |
//! | `blog`     | list of [`BlogPost`]     | no       |
//! | `skills`   | list of [`Skill`]        | no       |
//! | `site`     | [`SiteConfig`] overrides | no       |
//!
//! [`Profile`]: folio_core::content::Profile
//! [`Project`]: folio_core::content::Project
//! [`BlogPost`]: folio_core::content::BlogPost
//! [`Skill`]: folio_core::content::Skill

pub mod config;
pub mod loader;
pub mod schema;

pub use config::{FillTiming, SiteConfig, TypewriterTiming};
pub use loader::{DataLoadError, SiteContent, load_site_content};
