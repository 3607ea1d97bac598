use std::fmt;
use std::str::FromStr;

use crate::error::SiteError;

/// The pages of the site. Each open page is one view that owns its reveals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    /// Profile and typewriter tagline.
    Home,
    /// Filterable project list.
    Projects,
    /// Filterable blog post list.
    Blog,
    /// Filterable skill list with animated bars.
    Skills,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Home, Page::Projects, Page::Blog, Page::Skills];

    /// Route name.
    pub fn name(self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Projects => "projects",
            Page::Blog => "blog",
            Page::Skills => "skills",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Page {
    type Err = SiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Page::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| SiteError::UnknownPage {
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_names_round_trip() {
        for page in Page::ALL {
            assert_eq!(page.name().parse::<Page>().unwrap(), page);
        }
    }

    #[test]
    fn unknown_route_is_an_error() {
        let err = "contact".parse::<Page>().unwrap_err();
        assert!(matches!(err, SiteError::UnknownPage { ref name } if name == "contact"));
        assert!(format!("{err}").contains("contact"));
    }
}
