//! Navigation port between the client and its host application.
//!
//! The client never touches a UI directly. When a request fails with 401 it
//! consults the host's [`Navigator`] for the current location and, unless
//! the user is already on the login or root route, asks it to navigate to
//! the login route.

use std::sync::RwLock;

use tokio::sync::mpsc;
use tracing::warn;

pub const LOGIN_ROUTE: &str = "/login";
pub const ROOT_ROUTE: &str = "/";

pub trait Navigator: Send + Sync {
    /// Path of the view currently shown by the host
    fn location(&self) -> String;

    /// Switch the host to `path`
    fn navigate(&self, path: &str);
}

/// A navigation performed through [`ChannelNavigator`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub from: String,
    pub to: String,
}

/// Navigator that records the host's location and reports every
/// navigation on an unbounded channel.
#[derive(Debug)]
pub struct ChannelNavigator {
    location: RwLock<String>,
    tx: mpsc::UnboundedSender<Redirect>,
}

impl ChannelNavigator {
    pub fn new(initial: impl Into<String>) -> (Self, mpsc::UnboundedReceiver<Redirect>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let navigator = Self {
            location: RwLock::new(initial.into()),
            tx,
        };
        (navigator, rx)
    }

    /// Record a view change made by the host itself
    pub fn set_location(&self, path: impl Into<String>) {
        match self.location.write() {
            Ok(mut location) => *location = path.into(),
            Err(poisoned) => *poisoned.into_inner() = path.into(),
        }
    }
}

impl Navigator for ChannelNavigator {
    fn location(&self) -> String {
        match self.location.read() {
            Ok(location) => location.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn navigate(&self, path: &str) {
        let from = self.location();
        self.set_location(path);
        let redirect = Redirect {
            from,
            to: path.to_string(),
        };
        if self.tx.send(redirect).is_err() {
            warn!(to = path, "Navigation receiver dropped");
        }
    }
}

/// Whether a 401 seen at `location` should send the user to the login route
pub fn should_redirect_to_login(location: &str) -> bool {
    location != LOGIN_ROUTE && location != ROOT_ROUTE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_redirect_to_login() {
        assert!(!should_redirect_to_login("/login"));
        assert!(!should_redirect_to_login("/"));
        assert!(should_redirect_to_login("/orders"));
        assert!(should_redirect_to_login("/flights"));
        assert!(should_redirect_to_login("/dashboard"));
    }

    #[test]
    fn test_channel_navigator_reports_redirects() {
        let (navigator, mut rx) = ChannelNavigator::new("/orders");
        assert_eq!(navigator.location(), "/orders");

        navigator.navigate(LOGIN_ROUTE);
        assert_eq!(navigator.location(), LOGIN_ROUTE);
        assert_eq!(
            rx.try_recv().unwrap(),
            Redirect { from: "/orders".into(), to: "/login".into() }
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_set_location_does_not_notify() {
        let (navigator, mut rx) = ChannelNavigator::new(ROOT_ROUTE);
        navigator.set_location("/flights");
        assert_eq!(navigator.location(), "/flights");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_navigate_survives_dropped_receiver() {
        let (navigator, rx) = ChannelNavigator::new("/orders");
        drop(rx);
        navigator.navigate(LOGIN_ROUTE);
        assert_eq!(navigator.location(), LOGIN_ROUTE);
    }
}
