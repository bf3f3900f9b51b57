//! Navigable views and the session redirect rules between them.

use crate::session::SessionState;
use crate::types::EntityId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Root,
    Login,
    Dashboard,
    TicketDetail(EntityId),
    CustomerProfile(EntityId),
    Reporting,
}

impl View {
    pub fn path(&self) -> String {
        match self {
            Self::Root => "/".into(),
            Self::Login => "/login".into(),
            Self::Dashboard => "/dashboard".into(),
            Self::TicketDetail(id) => format!("/ticket/{id}"),
            Self::CustomerProfile(id) => format!("/customer/{id}"),
            Self::Reporting => "/reporting".into(),
        }
    }

    /// Map a request path to the view it belongs to.
    ///
    /// Sub-paths resolve to their parent view, so `/ticket/4/notes` is the
    /// ticket detail view. Paths outside the view tree return `None`.
    pub fn from_path(path: &str) -> Option<Self> {
        let mut segments = path.trim_matches('/').split('/');
        match segments.next()? {
            "" => Some(Self::Root),
            "login" => Some(Self::Login),
            "dashboard" => Some(Self::Dashboard),
            "reporting" => Some(Self::Reporting),
            "ticket" => segments.next()?.parse().ok().map(Self::TicketDetail),
            "customer" => segments.next()?.parse().ok().map(Self::CustomerProfile),
            _ => None,
        }
    }
}

/// Outcome of navigating to a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Render(View),
    Redirect(View),
}

/// Where a request for `path` must be redirected, if anywhere.
///
/// Paths under `/ticket/` and `/customer/` are guarded even when their id does
/// not parse, so an anonymous client never reaches the handler's rejection.
/// Paths outside the view tree are never redirected.
pub fn redirect_for(path: &str, state: SessionState) -> Option<View> {
    let view = match View::from_path(path) {
        Some(view) => view,
        None if state == SessionState::Anonymous && is_entity_path(path) => {
            return Some(View::Login)
        }
        None => return None,
    };
    match resolve(view, state) {
        Navigation::Redirect(target) => Some(target),
        Navigation::Render(_) => None,
    }
}

fn is_entity_path(path: &str) -> bool {
    matches!(
        path.trim_start_matches('/').split('/').next(),
        Some("ticket" | "customer")
    )
}

/// Apply the session rules to a requested view.
///
/// - anonymous on any view but login -> login
/// - authenticated on login -> dashboard
/// - root -> dashboard, or login when anonymous
pub fn resolve(view: View, state: SessionState) -> Navigation {
    match (view, state) {
        (View::Login, SessionState::Anonymous) => Navigation::Render(View::Login),
        (View::Login | View::Root, SessionState::Authenticated) => {
            Navigation::Redirect(View::Dashboard)
        }
        (_, SessionState::Anonymous) => Navigation::Redirect(View::Login),
        (view, SessionState::Authenticated) => Navigation::Render(view),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_is_sent_to_login() {
        for view in [
            View::Root,
            View::Dashboard,
            View::TicketDetail(1),
            View::CustomerProfile(2),
            View::Reporting,
        ] {
            assert_eq!(
                resolve(view, SessionState::Anonymous),
                Navigation::Redirect(View::Login),
                "{view:?}"
            );
        }
        assert_eq!(
            resolve(View::Login, SessionState::Anonymous),
            Navigation::Render(View::Login)
        );
    }

    #[test]
    fn authenticated_login_goes_to_dashboard() {
        assert_eq!(
            resolve(View::Login, SessionState::Authenticated),
            Navigation::Redirect(View::Dashboard)
        );
        assert_eq!(
            resolve(View::Root, SessionState::Authenticated),
            Navigation::Redirect(View::Dashboard)
        );
        assert_eq!(
            resolve(View::TicketDetail(3), SessionState::Authenticated),
            Navigation::Render(View::TicketDetail(3))
        );
    }

    #[test]
    fn paths_map_to_views() {
        assert_eq!(View::from_path("/"), Some(View::Root));
        assert_eq!(View::from_path("/login"), Some(View::Login));
        assert_eq!(View::from_path("/ticket/12"), Some(View::TicketDetail(12)));
        assert_eq!(View::from_path("/ticket/12/notes"), Some(View::TicketDetail(12)));
        assert_eq!(View::from_path("/customer/7/"), Some(View::CustomerProfile(7)));
        assert_eq!(View::from_path("/ticket/abc"), None);
        assert_eq!(View::from_path("/health"), None);
    }

    #[test]
    fn malformed_entity_paths_stay_guarded() {
        for path in ["/ticket/abc", "/customer/x", "/ticket/99999999999999999999", "/ticket"] {
            assert_eq!(
                redirect_for(path, SessionState::Anonymous),
                Some(View::Login),
                "{path}"
            );
            assert_eq!(redirect_for(path, SessionState::Authenticated), None, "{path}");
        }
    }

    #[test]
    fn redirects_follow_the_session_rules() {
        assert_eq!(redirect_for("/dashboard", SessionState::Anonymous), Some(View::Login));
        assert_eq!(redirect_for("/dashboard", SessionState::Authenticated), None);
        assert_eq!(
            redirect_for("/login", SessionState::Authenticated),
            Some(View::Dashboard)
        );
        assert_eq!(redirect_for("/health", SessionState::Anonymous), None);
        assert_eq!(redirect_for("/logout", SessionState::Anonymous), None);
    }

    #[test]
    fn path_round_trips_through_from_path() {
        let view = View::CustomerProfile(42);
        assert_eq!(View::from_path(&view.path()), Some(view));
    }
}
