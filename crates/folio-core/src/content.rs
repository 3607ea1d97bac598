//! Content records supplied by the site's data files.
//!
//! Every record is immutable once loaded. Filtering and facet derivation only
//! ever see records through the [`ContentItem`] trait, which exposes a title,
//! the searchable text fields, and the record's facet field.

use serde::{Deserialize, Serialize};

use crate::fixed::{Ratio, ratio_from_percent};
use crate::id::ContentId;

// ---------------------------------------------------------------------------
// Facet field
// ---------------------------------------------------------------------------

/// The facet-bearing field of a content item.
///
/// Tag lists match a selection by containment; single categories match by
/// equality. The two are kept apart because a category is not a one-element
/// tag list: categories come from a closed vocabulary per content kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacetField<'a> {
    /// The item carries no facet (missing or empty field).
    None,
    /// An ordered list of tags.
    Tags(&'a [String]),
    /// A single category or status string.
    Category(&'a str),
}

impl<'a> FacetField<'a> {
    /// Iterate the facet values in declaration order.
    pub fn values(self) -> impl Iterator<Item = &'a str> {
        let (tags, category): (&'a [String], Option<&'a str>) = match self {
            FacetField::None => (&[], None),
            FacetField::Tags(tags) => (tags, None),
            FacetField::Category(c) => (&[], Some(c)),
        };
        tags.iter().map(String::as_str).chain(category)
    }

    /// Whether this field matches a selected facet value.
    pub fn matches(self, selected: &str) -> bool {
        match self {
            FacetField::None => false,
            FacetField::Tags(tags) => tags.iter().any(|t| t == selected),
            FacetField::Category(c) => c == selected,
        }
    }
}

// ---------------------------------------------------------------------------
// ContentItem trait
// ---------------------------------------------------------------------------

/// A filterable content record.
pub trait ContentItem {
    /// Stable identifier.
    fn id(&self) -> ContentId;

    /// Human-readable title or name.
    fn title(&self) -> &str;

    /// Additional searchable text (description, excerpt, ...). Fields that are
    /// absent are simply not yielded.
    fn search_fields(&self) -> impl Iterator<Item = &str>;

    /// The facet-bearing field.
    fn facet_field(&self) -> FacetField<'_>;
}

impl<T: ContentItem> ContentItem for &T {
    fn id(&self) -> ContentId {
        (**self).id()
    }

    fn title(&self) -> &str {
        (**self).title()
    }

    fn search_fields(&self) -> impl Iterator<Item = &str> {
        (**self).search_fields()
    }

    fn facet_field(&self) -> FacetField<'_> {
        (**self).facet_field()
    }
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

/// A portfolio project. Faceted by its technology tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ContentId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl ContentItem for Project {
    fn id(&self) -> ContentId {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn search_fields(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.description.as_str())
    }

    fn facet_field(&self) -> FacetField<'_> {
        FacetField::Tags(&self.tags)
    }
}

// ---------------------------------------------------------------------------
// Blog posts
// ---------------------------------------------------------------------------

/// A blog post summary. Faceted by tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: ContentId,
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    /// Publication date as written in the data file (ISO-8601 by convention).
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub read_minutes: Option<u32>,
}

impl ContentItem for BlogPost {
    fn id(&self) -> ContentId {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn search_fields(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.excerpt.as_str())
    }

    fn facet_field(&self) -> FacetField<'_> {
        FacetField::Tags(&self.tags)
    }
}

// ---------------------------------------------------------------------------
// Skills
// ---------------------------------------------------------------------------

/// A skill entry with a proficiency level rendered as an animated bar.
/// Faceted by a single category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: ContentId,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    /// Proficiency, 0..=100.
    pub level: u8,
    #[serde(default)]
    pub summary: Option<String>,
}

impl Skill {
    /// The bar fill ratio this skill reveals to.
    pub fn level_ratio(&self) -> Ratio {
        ratio_from_percent(self.level)
    }
}

impl ContentItem for Skill {
    fn id(&self) -> ContentId {
        self.id
    }

    fn title(&self) -> &str {
        &self.name
    }

    fn search_fields(&self) -> impl Iterator<Item = &str> {
        self.summary.as_deref().into_iter()
    }

    fn facet_field(&self) -> FacetField<'_> {
        match self.category.as_deref() {
            Some(c) if !c.is_empty() => FacetField::Category(c),
            _ => FacetField::None,
        }
    }
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// An outbound link shown on the profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileLink {
    pub label: String,
    pub url: String,
}

/// The site owner's profile. Not filterable; supplies the tagline that is
/// revealed character by character on the home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub links: Vec<ProfileLink>,
}
