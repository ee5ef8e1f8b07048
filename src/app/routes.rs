use crate::wizard::ExternalFlow;
use std::fmt;

/// Top-level screens a path can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Dashboard,
    Tasks,
    Alerts,
    ExhibitWizard,
    DiscoveryWizard,
    RequestWizard,
    FileMotion,
}

impl Screen {
    pub fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Case dashboard",
            Self::Tasks => "Tasks",
            Self::Alerts => "Alerts",
            Self::ExhibitWizard => "Submit an exhibit",
            Self::DiscoveryWizard => "File discovery",
            Self::RequestWizard => "File a request",
            Self::FileMotion => "File a motion",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl From<ExternalFlow> for Screen {
    fn from(flow: ExternalFlow) -> Self {
        match flow {
            ExternalFlow::FileMotion => Self::FileMotion,
        }
    }
}

/// Path-to-screen table. Wizards are mounted inside screens; they never own
/// routes themselves.
#[derive(Debug, Clone)]
pub struct Router {
    routes: Vec<(&'static str, Screen)>,
}

impl Router {
    pub fn standard() -> Self {
        Self {
            routes: vec![
                ("/", Screen::Dashboard),
                ("/dashboard", Screen::Dashboard),
                ("/tasks", Screen::Tasks),
                ("/alerts", Screen::Alerts),
                ("/exhibits/new", Screen::ExhibitWizard),
                ("/discovery/new", Screen::DiscoveryWizard),
                ("/requests/new", Screen::RequestWizard),
                ("/motions/new", Screen::FileMotion),
            ],
        }
    }

    pub fn resolve(&self, path: &str) -> Option<Screen> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        self.routes
            .iter()
            .find(|(route, _)| *route == normalized)
            .map(|(_, screen)| *screen)
    }

    /// Canonical path for a screen: the first route registered for it.
    pub fn path_for(&self, screen: Screen) -> Option<&'static str> {
        self.routes
            .iter()
            .find(|(_, candidate)| *candidate == screen)
            .map(|(route, _)| *route)
    }

    pub fn redirect_target(&self, flow: ExternalFlow) -> Option<&'static str> {
        self.path_for(Screen::from(flow))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Screen)> + '_ {
        self.routes.iter().copied()
    }
}
