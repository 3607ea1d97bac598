//! Content directory loading.
//!
//! Each collection lives in one file named after it, in whichever of RON,
//! TOML or JSON the author prefers. The extension picks the parser. Two files
//! for the same collection are rejected rather than silently preferring one.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use folio_core::content::{BlogPost, ContentItem, Profile, Project, Skill};
use folio_core::id::ContentId;

use crate::config::{SiteConfig, load_site_config};

// ===========================================================================
// Errors
// ===========================================================================

/// Errors raised while reading a content directory.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// A file the site cannot render without is absent.
    #[error("no '{file}' data file in {dir}")]
    MissingRequired { file: String, dir: PathBuf },

    /// The extension is not one of `.ron`, `.toml`, `.json`.
    #[error("{file} is not a .ron, .toml or .json file")]
    UnsupportedFormat { file: PathBuf },

    /// The same collection exists in two formats.
    #[error("both {a} and {b} exist, keep only one")]
    ConflictingFormats { a: PathBuf, b: PathBuf },

    /// The file could not be deserialized.
    #[error("could not parse {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// Two records in one collection share an id.
    #[error("duplicate id {id} in {file}")]
    DuplicateId { file: PathBuf, id: ContentId },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Formats
// ===========================================================================

/// Data file format, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

impl Format {
    /// Lookup order when searching a directory.
    pub const ALL: [Format; 3] = [Format::Ron, Format::Toml, Format::Json];

    pub fn extension(self) -> &'static str {
        match self {
            Format::Ron => "ron",
            Format::Toml => "toml",
            Format::Json => "json",
        }
    }

    fn parse<T: DeserializeOwned>(self, path: &Path, text: &str) -> Result<T, DataLoadError> {
        match self {
            Format::Ron => ron::from_str(text).map_err(|e| parse_error(path, e)),
            Format::Toml => toml::from_str(text).map_err(|e| parse_error(path, e)),
            Format::Json => serde_json::from_str(text).map_err(|e| parse_error(path, e)),
        }
    }
}

/// The format of `path`, from its extension.
pub fn detect_format(path: &Path) -> Result<Format, DataLoadError> {
    let ext = path.extension().and_then(|e| e.to_str());
    Format::ALL
        .into_iter()
        .find(|f| Some(f.extension()) == ext)
        .ok_or_else(|| DataLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        })
}

fn parse_error(path: &Path, e: impl std::fmt::Display) -> DataLoadError {
    DataLoadError::Parse {
        file: path.to_path_buf(),
        detail: e.to_string(),
    }
}

// ===========================================================================
// Discovery
// ===========================================================================

/// The data file for `base_name` in `dir`, if any.
///
/// Fails with [`DataLoadError::ConflictingFormats`] when more than one
/// format is present.
pub fn find_data_file(dir: &Path, base_name: &str) -> Result<Option<PathBuf>, DataLoadError> {
    let mut present = Format::ALL
        .into_iter()
        .map(|f| dir.join(format!("{base_name}.{}", f.extension())))
        .filter(|p| p.is_file());

    let Some(first) = present.next() else {
        return Ok(None);
    };
    match present.next() {
        Some(second) => Err(DataLoadError::ConflictingFormats {
            a: first,
            b: second,
        }),
        None => Ok(Some(first)),
    }
}

/// [`find_data_file`] for files that must exist.
pub fn require_data_file(dir: &Path, base_name: &str) -> Result<PathBuf, DataLoadError> {
    find_data_file(dir, base_name)?.ok_or_else(|| DataLoadError::MissingRequired {
        file: base_name.to_string(),
        dir: dir.to_path_buf(),
    })
}

// ===========================================================================
// Deserialization
// ===========================================================================

/// Deserialize a single record.
pub fn deserialize_file<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let format = detect_format(path)?;
    let text = std::fs::read_to_string(path)?;
    format.parse(path, &text)
}

/// Deserialize a list of records.
///
/// TOML documents cannot be a bare array, so a TOML list is read from the
/// array-of-tables under `toml_key` (`[[projects]]`, `[[posts]]`, ...).
pub fn deserialize_list<T: DeserializeOwned>(
    path: &Path,
    toml_key: &str,
) -> Result<Vec<T>, DataLoadError> {
    let format = detect_format(path)?;
    let text = std::fs::read_to_string(path)?;
    if format != Format::Toml {
        return format.parse(path, &text);
    }

    let mut table: toml::Table = toml::from_str(&text).map_err(|e| parse_error(path, e))?;
    let list = table
        .remove(toml_key)
        .ok_or_else(|| parse_error(path, format!("expected a [[{toml_key}]] array")))?;
    list.try_into()
        .map_err(|e: toml::de::Error| parse_error(path, e))
}

/// Fail on the first id that appears twice.
pub fn check_unique_ids<T: ContentItem>(items: &[T], file: &Path) -> Result<(), DataLoadError> {
    let mut seen = HashSet::with_capacity(items.len());
    match items.iter().map(ContentItem::id).find(|id| !seen.insert(*id)) {
        Some(id) => Err(DataLoadError::DuplicateId {
            file: file.to_path_buf(),
            id,
        }),
        None => Ok(()),
    }
}

fn load_collection<T: ContentItem + DeserializeOwned>(
    dir: &Path,
    base_name: &str,
    toml_key: &str,
) -> Result<Vec<T>, DataLoadError> {
    let Some(path) = find_data_file(dir, base_name)? else {
        tracing::debug!(collection = base_name, "no data file, collection is empty");
        return Ok(Vec::new());
    };
    let items: Vec<T> = deserialize_list(&path, toml_key)?;
    check_unique_ids(&items, &path)?;
    tracing::debug!(
        collection = base_name,
        count = items.len(),
        file = %path.display(),
        "loaded collection"
    );
    Ok(items)
}

// ===========================================================================
// Site content
// ===========================================================================

/// Every collection of a content directory plus the site configuration.
/// Read-only once loaded.
#[derive(Debug, Clone)]
pub struct SiteContent {
    pub profile: Profile,
    pub projects: Vec<Project>,
    pub posts: Vec<BlogPost>,
    pub skills: Vec<Skill>,
    pub config: SiteConfig,
}

/// Load a content directory. Only the profile is required; a missing
/// collection file is an empty collection.
pub fn load_site_content(dir: &Path) -> Result<SiteContent, DataLoadError> {
    let profile: Profile = deserialize_file(&require_data_file(dir, "profile")?)?;

    let projects: Vec<Project> = load_collection(dir, "projects", "projects")?;
    let posts: Vec<BlogPost> = load_collection(dir, "blog", "posts")?;
    let mut skills: Vec<Skill> = load_collection(dir, "skills", "skills")?;
    for skill in skills.iter_mut().filter(|s| s.level > 100) {
        tracing::warn!(skill = %skill.name, level = skill.level, "skill level above 100, clamping");
        skill.level = 100;
    }

    Ok(SiteContent {
        profile,
        projects,
        posts,
        skills,
        config: load_site_config(dir)?,
    })
}
