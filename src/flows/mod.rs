pub mod discovery;
pub mod exhibit;
pub mod request;

pub use discovery::DiscoveryStep;
pub use exhibit::ExhibitStep;
pub use request::RequestStep;

use crate::app::routes::Screen;
use crate::config::SubmissionConfig;
use std::fmt;

/// The wizards the portal mounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowKind {
    Exhibit,
    Discovery,
    Request,
}

impl FlowKind {
    pub const ALL: &'static [Self] = &[Self::Exhibit, Self::Discovery, Self::Request];

    pub fn key(self) -> &'static str {
        match self {
            Self::Exhibit => "exhibit",
            Self::Discovery => "discovery",
            Self::Request => "request",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.key() == key)
    }

    pub fn from_screen(screen: Screen) -> Option<Self> {
        match screen {
            Screen::ExhibitWizard => Some(Self::Exhibit),
            Screen::DiscoveryWizard => Some(Self::Discovery),
            Screen::RequestWizard => Some(Self::Request),
            Screen::Dashboard | Screen::Tasks | Screen::Alerts | Screen::FileMotion => None,
        }
    }

    /// Reference-number prefix for submissions of this kind.
    pub fn prefix(self, config: &SubmissionConfig) -> &str {
        match self {
            Self::Exhibit => &config.exhibit_prefix,
            Self::Discovery => &config.discovery_prefix,
            Self::Request => &config.request_prefix,
        }
    }
}

impl fmt::Display for FlowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::FlowKind;
    use crate::app::routes::Screen;
    use crate::config::SubmissionConfig;

    #[test]
    fn keys_and_prefixes() {
        let config = SubmissionConfig::default();
        assert_eq!(FlowKind::from_key("discovery"), Some(FlowKind::Discovery));
        assert_eq!(FlowKind::from_key("motion"), None);
        assert_eq!(FlowKind::Request.prefix(&config), "REQ");
        assert_eq!(FlowKind::from_screen(Screen::Tasks), None);
    }
}
