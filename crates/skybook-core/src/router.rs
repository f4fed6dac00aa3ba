//! Route table with an authentication guard.

use crate::auth::Session;
use crate::nav::{LOGIN_ROUTE, ROOT_ROUTE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Root,
    Login,
    Dashboard,
    Flights,
    Orders,
}

impl Route {
    pub const ALL: [Route; 5] = [
        Route::Root,
        Route::Login,
        Route::Dashboard,
        Route::Flights,
        Route::Orders,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Root => ROOT_ROUTE,
            Route::Login => LOGIN_ROUTE,
            Route::Dashboard => "/dashboard",
            Route::Flights => "/flights",
            Route::Orders => "/orders",
        }
    }

    /// Match a location, ignoring trailing slashes
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { ROOT_ROUTE } else { trimmed };
        Self::ALL.into_iter().find(|route| route.path() == normalized)
    }

    pub fn requires_auth(&self) -> bool {
        matches!(self, Route::Dashboard | Route::Flights | Route::Orders)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Render(Route),
    Redirect(&'static str),
    NotFound,
}

/// Decide what to show for `path` given the current session.
///
/// The root always forwards to the login view; protected routes forward
/// there too while no token is stored. A store that cannot be read counts
/// as signed out.
pub fn resolve(path: &str, session: &Session) -> Resolution {
    let Some(route) = Route::from_path(path) else {
        return Resolution::NotFound;
    };
    if route == Route::Root {
        return Resolution::Redirect(LOGIN_ROUTE);
    }
    if route.requires_auth() && !session.is_authenticated() {
        return Resolution::Redirect(LOGIN_ROUTE);
    }
    Resolution::Render(route)
}
