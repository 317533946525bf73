//! @acp:module "Session"
//! @acp:summary "Per-interaction view of one user's projects"
//! @acp:domain cli
//! @acp:layer service
//!
//! A session is rebuilt at the start of every interaction. It mirrors the
//! store for the current interaction only; the store stays the source of
//! truth.

use crate::project::{Project, ProjectDraft, UserId};
use crate::rank::{self, Breakdown, Summary};
use crate::store::{ProjectStore, StoreOutcome};

#[derive(Debug)]
pub struct Session {
    user: UserId,
    projects: Vec<Project>,
    /// Set when the last load or save was not durable
    warning: Option<String>,
}

impl Session {
    /// Load the user's projects for a new interaction
    pub fn begin(store: &ProjectStore, user: UserId) -> Self {
        let mut session = Self {
            user,
            projects: Vec::new(),
            warning: None,
        };
        session.reload(store);
        session
    }

    /// Replace the cached list with the store's current contents
    ///
    /// Returns false when the load failed; the list is then empty.
    pub fn reload(&mut self, store: &ProjectStore) -> bool {
        let outcome = store.load(&self.user);
        self.warning = outcome_warning(&outcome);
        let loaded = outcome.is_success();
        self.projects = outcome.into_projects();
        loaded
    }

    /// Score `draft`, append it and save the whole list
    ///
    /// Nothing is written when the current list cannot be read, so a read
    /// error never overwrites stored projects. A failed save leaves the
    /// appended project in this session.
    pub fn add(&mut self, store: &ProjectStore, draft: ProjectDraft) -> StoreOutcome<Project> {
        match store.load(&self.user) {
            StoreOutcome::Failed(err) => {
                self.warning = Some(err.to_string());
                return StoreOutcome::Failed(err);
            }
            loaded => self.projects = loaded.into_projects(),
        }
        let project = Project::from_draft(draft);
        self.projects.push(project.clone());
        let outcome = store.save(&self.user, &self.projects);
        self.warning = outcome_warning(&outcome);
        outcome.map(|()| project)
    }

    /// Empty the user's list, keeping the worksheet header
    pub fn clear(&mut self, store: &ProjectStore) -> StoreOutcome<()> {
        let outcome = store.clear(&self.user);
        self.warning = outcome_warning(&outcome);
        if outcome.is_success() {
            self.projects.clear();
        }
        outcome
    }

    pub fn user(&self) -> &UserId {
        &self.user
    }

    /// Projects in stored order
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    pub fn ranked(&self) -> Vec<Project> {
        rank::rank(&self.projects)
    }

    pub fn summary(&self) -> Option<Summary> {
        rank::summarize(&self.projects)
    }

    pub fn breakdown(&self) -> Option<Breakdown> {
        rank::top_breakdown(&self.ranked())
    }
}

fn outcome_warning<T>(outcome: &StoreOutcome<T>) -> Option<String> {
    match outcome {
        StoreOutcome::Durable(_) => None,
        StoreOutcome::Ephemeral { reason, .. } => Some(format!(
            "Store not configured ({}). Projects will only be saved for this session.",
            reason
        )),
        StoreOutcome::Failed(err) => Some(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, StoreConfig};
    use crate::project::Impact;

    fn draft(name: &str, reach: u8, impact: Impact, confidence: u8, effort: f64) -> ProjectDraft {
        ProjectDraft::new(name, reach, impact, confidence, effort).unwrap()
    }

    #[test]
    fn test_add_persists_and_ranks() {
        let store = ProjectStore::new(StoreConfig::memory());
        let user = Config::default().user("Jonas").unwrap();

        let mut session = Session::begin(&store, user.clone());
        assert!(session.is_empty());
        let added = session.add(&store, draft("Dark Mode", 40, Impact::Medium, 90, 1.0));
        assert!(added.is_durable());
        session.add(&store, draft("Push Notifications", 70, Impact::High, 95, 2.0));

        let fresh = Session::begin(&store, user);
        assert_eq!(fresh.projects().len(), 2);
        assert_eq!(fresh.ranked()[0].name, "Push Notifications");
        assert_eq!(fresh.summary().unwrap().count, 2);
        assert_eq!(fresh.breakdown().unwrap().project, "Push Notifications");
        assert!(fresh.warning().is_none());
    }

    #[test]
    fn test_add_reports_scored_project() {
        let store = ProjectStore::new(StoreConfig::memory());
        let user = Config::default().user("Hanne").unwrap();
        let mut session = Session::begin(&store, user);
        let project = session
            .add(&store, draft("Example", 80, Impact::High, 90, 3.0))
            .into_value()
            .unwrap();
        assert!((project.score - 48.0).abs() < 1e-9);
    }

    #[test]
    fn test_clear_empties_list() {
        let store = ProjectStore::new(StoreConfig::memory());
        let user = Config::default().user("Rolf").unwrap();
        let mut session = Session::begin(&store, user.clone());
        session.add(&store, draft("a", 10, Impact::Low, 50, 1.0));
        assert!(session.clear(&store).is_success());
        assert!(session.is_empty());
        assert!(Session::begin(&store, user).is_empty());
    }

    #[test]
    fn test_unavailable_store_warns() {
        let store = ProjectStore::new(StoreConfig::default());
        let user = Config::default().user("Ferenc").unwrap();
        let mut session = Session::begin(&store, user);
        assert!(session.warning().is_some());
        let outcome = session.add(&store, draft("a", 10, Impact::Low, 50, 1.0));
        assert!(outcome.is_success());
        assert!(!outcome.is_durable());
        assert_eq!(session.projects().len(), 1);
    }
}
