use chrono::{DateTime, Utc};
use shared::{catalog::find_exhibitor, domain::Exhibitor};

/// Login state of the dashboard. The pending selection and the authenticated
/// exhibitor are tracked separately so that picking another company while
/// signed in has no effect until the login is confirmed again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    selected: Option<&'static Exhibitor>,
    authenticated_as: Option<&'static Exhibitor>,
    last_sync: Option<DateTime<Utc>>,
}

impl SessionState {
    /// Unknown and empty ids clear the selection.
    pub fn select(&mut self, exhibitor_id: &str) -> Option<&'static Exhibitor> {
        self.selected = find_exhibitor(exhibitor_id.trim());
        self.selected
    }

    /// Promotes the pending selection to the authenticated exhibitor.
    /// Returns `None` and leaves the state untouched when nothing is selected.
    pub fn authenticate(&mut self) -> Option<&'static Exhibitor> {
        let exhibitor = self.selected?;
        self.authenticated_as = Some(exhibitor);
        self.last_sync = None;
        Some(exhibitor)
    }

    pub fn sign_out(&mut self) {
        *self = Self::default();
    }

    pub fn record_sync(&mut self, at: DateTime<Utc>) {
        self.last_sync = Some(at);
    }

    pub fn selected_exhibitor(&self) -> Option<&'static Exhibitor> {
        self.selected
    }

    pub fn authenticated_exhibitor(&self) -> Option<&'static Exhibitor> {
        self.authenticated_as
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated_as.is_some()
    }

    pub fn last_sync(&self) -> Option<DateTime<Utc>> {
        self.last_sync
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unauthenticated_without_selection() {
        let session = SessionState::default();
        assert!(!session.is_authenticated());
        assert!(session.selected_exhibitor().is_none());
        assert!(session.last_sync().is_none());
    }

    #[test]
    fn authenticate_requires_selection() {
        let mut session = SessionState::default();
        assert!(session.authenticate().is_none());
        assert!(!session.is_authenticated());

        session.select("dominica");
        let exhibitor = session.authenticate().expect("selected");
        assert_eq!(exhibitor.display_name, "Discover Dominica Authority");
        assert!(session.is_authenticated());
    }

    #[test]
    fn unknown_or_empty_selection_clears() {
        let mut session = SessionState::default();
        session.select("costa-rica");
        assert_eq!(session.selected_exhibitor().map(|e| e.id), Some("costa-rica"));

        assert!(session.select("nowhere").is_none());
        assert!(session.selected_exhibitor().is_none());

        session.select("costa-rica");
        assert!(session.select("").is_none());
        assert!(session.selected_exhibitor().is_none());
    }

    #[test]
    fn reselecting_while_signed_in_keeps_active_exhibitor() {
        let mut session = SessionState::default();
        session.select("quench-usa");
        session.authenticate();
        session.select("nevetal");

        assert_eq!(
            session.authenticated_exhibitor().map(|e| e.id),
            Some("quench-usa")
        );
        assert_eq!(session.selected_exhibitor().map(|e| e.id), Some("nevetal"));
    }

    #[test]
    fn sign_out_resets_everything() {
        let mut session = SessionState::default();
        session.select("italy-tour");
        session.authenticate();
        session.record_sync(Utc::now());

        session.sign_out();
        assert_eq!(session, SessionState::default());
    }
}
