//! Client-side routes and the session gate in front of them.

use std::fmt;

use crate::{error::Result, session::Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Register,
    Dashboard,
    VideoAnalysis,
    History,
    Settings,
}

impl Route {
    pub const ALL: [Route; 7] = [
        Route::Home,
        Route::Login,
        Route::Register,
        Route::Dashboard,
        Route::VideoAnalysis,
        Route::History,
        Route::Settings,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Dashboard => "/dashboard",
            Route::VideoAnalysis => "/video-analysis",
            Route::History => "/history",
            Route::Settings => "/settings",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "VideoTag AI",
            Route::Login => "Sign in",
            Route::Register => "Create account",
            Route::Dashboard => "Dashboard",
            Route::VideoAnalysis => "Video Analysis",
            Route::History => "Video Analytics Dashboard",
            Route::Settings => "Account Settings",
        }
    }

    pub fn from_path(path: &str) -> Option<Route> {
        let trimmed = path.trim();
        let normalized = match trimmed.trim_end_matches('/') {
            "" => "/",
            p => p,
        };
        Route::ALL.into_iter().find(|r| r.path() == normalized)
    }

    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Route::Dashboard | Route::VideoAnalysis | Route::History | Route::Settings
        )
    }

    /// Entry views that a signed-in user is sent away from.
    fn is_entry(&self) -> bool {
        matches!(self, Route::Home | Route::Login | Route::Register)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Render(Route),
    Redirect { from: Route, to: Route },
    NotFound(String),
}

pub struct SessionGate {
    session: Session,
}

impl SessionGate {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    pub fn resolve(&self, path: &str) -> Result<Navigation> {
        let Some(route) = Route::from_path(path) else {
            return Ok(Navigation::NotFound(path.to_string()));
        };

        let authenticated = self.session.is_authenticated()?;
        let navigation = match (authenticated, route) {
            (false, r) if r.requires_auth() => Navigation::Redirect {
                from: r,
                to: Route::Login,
            },
            (true, r) if r.is_entry() => Navigation::Redirect {
                from: r,
                to: Route::Dashboard,
            },
            (_, r) => Navigation::Render(r),
        };

        tracing::debug!(path, authenticated, ?navigation, "route resolved");
        Ok(navigation)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{session::SessionMarker, storage::MemoryStorage};

    fn gate(signed_in: bool) -> SessionGate {
        let session = Session::new(Arc::new(MemoryStorage::new()));
        if signed_in {
            session
                .store(&SessionMarker {
                    email: "demo@example.com".into(),
                    name: "Demo User".into(),
                })
                .unwrap();
        }
        SessionGate::new(session)
    }

    #[test]
    fn test_from_path() {
        assert_eq!(Route::from_path("/"), Some(Route::Home));
        assert_eq!(Route::from_path(""), Some(Route::Home));
        assert_eq!(Route::from_path("/history/"), Some(Route::History));
        assert_eq!(Route::from_path("/video-analysis"), Some(Route::VideoAnalysis));
        assert_eq!(Route::from_path("/admin"), None);
    }

    #[test]
    fn test_gated_routes_redirect_to_login_without_marker() {
        let gate = gate(false);
        for route in Route::ALL.into_iter().filter(Route::requires_auth) {
            assert_eq!(
                gate.resolve(route.path()).unwrap(),
                Navigation::Redirect {
                    from: route,
                    to: Route::Login
                }
            );
        }
    }

    #[test]
    fn test_entry_routes_render_without_marker() {
        let gate = gate(false);
        for route in [Route::Home, Route::Login, Route::Register] {
            assert_eq!(gate.resolve(route.path()).unwrap(), Navigation::Render(route));
        }
    }

    #[test]
    fn test_home_redirects_to_dashboard_with_marker() {
        let gate = gate(true);
        assert_eq!(
            gate.resolve("/").unwrap(),
            Navigation::Redirect {
                from: Route::Home,
                to: Route::Dashboard
            }
        );
        assert_eq!(
            gate.resolve("/settings").unwrap(),
            Navigation::Render(Route::Settings)
        );
    }

    #[test]
    fn test_unknown_path_is_not_found() {
        assert_eq!(
            gate(true).resolve("/nope").unwrap(),
            Navigation::NotFound("/nope".into())
        );
    }
}
