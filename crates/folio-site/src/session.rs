use std::path::Path;

use slotmap::SlotMap;

use folio_core::content::{BlogPost, ContentItem, Profile, Project, Skill};
use folio_core::event::RevealEvent;
use folio_core::fixed::{Ratio, Ticks};
use folio_core::id::{ContentId, RevealId, ViewId};
use folio_core::reveal::{RevealScheduler, RevealStatus};
use folio_data::{SiteConfig, SiteContent, load_site_content};

use crate::error::SiteError;
use crate::page::Page;
use crate::view::{CollectionView, FilterEvent};

/// The page currently on screen and the reveals it owns.
#[derive(Debug)]
struct ActivePage {
    page: Page,
    view: ViewId,
    tagline: Option<RevealId>,
    skill_bars: Vec<(ContentId, RevealId)>,
}

/// One visitor's session: content, per-page filter state, and the reveal
/// scheduler.
///
/// Exactly one page is open at a time. Opening a page tears down the
/// previous one, which cancels every reveal it owned, and resets the new
/// page's filter state.
pub struct SiteSession {
    profile: Profile,
    config: SiteConfig,
    projects: CollectionView<Project>,
    posts: CollectionView<BlogPost>,
    skills: CollectionView<Skill>,
    scheduler: RevealScheduler,
    views: SlotMap<ViewId, Page>,
    active: Option<ActivePage>,
}

impl SiteSession {
    /// Create a session from loaded content. No page is open.
    pub fn new(content: SiteContent) -> Self {
        let SiteContent {
            profile,
            projects,
            posts,
            skills,
            config,
        } = content;
        let memoize = config.memoize;
        Self {
            profile,
            projects: CollectionView::new(projects, memoize),
            posts: CollectionView::new(posts, memoize),
            skills: CollectionView::new(skills, memoize),
            scheduler: RevealScheduler::new(config.event_capacity),
            config,
            views: SlotMap::with_key(),
            active: None,
        }
    }

    /// Load a content directory and create a session from it.
    pub fn load(dir: &Path) -> Result<Self, SiteError> {
        let content = load_site_content(dir).map_err(|source| SiteError::DataLoad {
            dir: dir.to_path_buf(),
            source,
        })?;
        Ok(Self::new(content))
    }

    // -- Page lifecycle ----------------------------------------------------

    /// Open a page, tearing down the current one first. Returns the new view.
    pub fn open_page(&mut self, page: Page) -> ViewId {
        self.close();

        let view = self.views.insert(page);
        let mut active = ActivePage {
            page,
            view,
            tagline: None,
            skill_bars: Vec::new(),
        };

        match page {
            Page::Home => {
                let spec = self.config.tagline_spec(&self.profile.tagline);
                active.tagline = Some(self.scheduler.request(view, spec));
            }
            Page::Projects => {
                self.projects.dispatch(FilterEvent::Reset);
            }
            Page::Blog => {
                self.posts.dispatch(FilterEvent::Reset);
            }
            Page::Skills => {
                self.skills.dispatch(FilterEvent::Reset);
                for skill in self.skills.items() {
                    let spec = self.config.skill_bar_spec(skill.level_ratio());
                    let reveal = self.scheduler.request(view, spec);
                    active.skill_bars.push((skill.id(), reveal));
                }
            }
        }

        tracing::info!(page = %page, now = self.scheduler.now(), "page opened");
        self.active = Some(active);
        view
    }

    /// Tear down the open page, if any. Its reveals stop immediately.
    pub fn close(&mut self) {
        if let Some(active) = self.active.take() {
            let cancelled = self.scheduler.teardown(active.view);
            self.views.remove(active.view);
            tracing::info!(page = %active.page, cancelled, "page closed");
        }
    }

    pub fn active_page(&self) -> Option<Page> {
        self.active.as_ref().map(|a| a.page)
    }

    pub fn active_view(&self) -> Option<ViewId> {
        self.active.as_ref().map(|a| a.view)
    }

    // -- Filtering ---------------------------------------------------------

    /// Route a filter event to the open page's collection.
    pub fn dispatch(&mut self, event: FilterEvent) -> Result<bool, SiteError> {
        let page = self.active_page().ok_or(SiteError::NoActivePage)?;
        match page {
            Page::Projects => Ok(self.projects.dispatch(event)),
            Page::Blog => Ok(self.posts.dispatch(event)),
            Page::Skills => Ok(self.skills.dispatch(event)),
            Page::Home => Err(SiteError::NotFilterable { page }),
        }
    }

    pub fn projects(&self) -> &CollectionView<Project> {
        &self.projects
    }

    pub fn posts(&self) -> &CollectionView<BlogPost> {
        &self.posts
    }

    pub fn skills(&self) -> &CollectionView<Skill> {
        &self.skills
    }

    pub fn visible_projects(&self) -> impl Iterator<Item = &Project> {
        self.projects.visible()
    }

    pub fn visible_posts(&self) -> impl Iterator<Item = &BlogPost> {
        self.posts.visible()
    }

    pub fn visible_skills(&self) -> impl Iterator<Item = &Skill> {
        self.skills.visible()
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    // -- Reveals -----------------------------------------------------------

    /// Replace the tagline and restart its reveal if the home page is open.
    pub fn set_tagline(&mut self, tagline: impl Into<String>) {
        self.profile.tagline = tagline.into();
        let Some(id) = self.active.as_ref().and_then(|a| a.tagline) else {
            return;
        };
        let spec = self.config.tagline_spec(&self.profile.tagline);
        self.scheduler.retarget(id, spec);
    }

    /// The visible part of the tagline, if the home page is open.
    pub fn tagline(&self) -> Option<String> {
        let id = self.active.as_ref()?.tagline?;
        self.scheduler.visible_text(id)
    }

    pub fn tagline_status(&self) -> Option<RevealStatus> {
        let id = self.active.as_ref()?.tagline?;
        self.scheduler.status(id)
    }

    /// Current fill of a skill's bar, if the skills page is open.
    pub fn skill_bar(&self, skill: ContentId) -> Option<Ratio> {
        let active = self.active.as_ref()?;
        let (_, reveal) = active.skill_bars.iter().find(|(id, _)| *id == skill)?;
        self.scheduler.ratio(*reveal)
    }

    /// Bars of the currently visible skills, in display order.
    pub fn visible_skill_bars(&self) -> Vec<(ContentId, Ratio)> {
        self.visible_skills()
            .filter_map(|s| self.skill_bar(s.id()).map(|r| (s.id(), r)))
            .collect()
    }

    /// Show every running reveal of the open page at its final value.
    pub fn skip_animations(&mut self) {
        let Some(active) = self.active.as_ref() else {
            return;
        };
        for id in self.scheduler.reveals_of(active.view) {
            self.scheduler.complete_now(id);
        }
    }

    /// Whether any reveal of the open page is still running.
    pub fn is_animating(&self) -> bool {
        self.active.as_ref().is_some_and(|a| {
            self.scheduler
                .reveals_of(a.view)
                .into_iter()
                .any(|id| self.scheduler.status(id) == Some(RevealStatus::Revealing))
        })
    }

    // -- Clock -------------------------------------------------------------

    pub fn now(&self) -> Ticks {
        self.scheduler.now()
    }

    /// Advance by `dt` milliseconds. Returns the number of reveal steps applied.
    pub fn advance_by(&mut self, dt: Ticks) -> usize {
        self.scheduler.advance_by(dt)
    }

    /// Advance to absolute time `t`. Returns the number of reveal steps applied.
    pub fn advance_to(&mut self, t: Ticks) -> usize {
        self.scheduler.advance_to(t)
    }

    /// When the next reveal step is due, for scheduling the next frame.
    pub fn next_due(&self) -> Option<Ticks> {
        self.scheduler.next_due()
    }

    /// Remove and return buffered reveal events, oldest first.
    pub fn drain_reveal_events(&mut self) -> Vec<RevealEvent> {
        self.scheduler.drain_events()
    }

    pub fn scheduler(&self) -> &RevealScheduler {
        &self.scheduler
    }
}
