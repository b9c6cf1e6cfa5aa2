//! Tagged outcome of a sign-in or sign-up attempt.

use crate::auth::identity::Identity;

/// Reserved marker prefix identifying a control-flow redirect signal.
pub const REDIRECT_MARKER_PREFIX: &str = "REDIRECT";

/// Non-local control transfer raised by the provider during cookie
/// handling. Not an error: classification keys on structure, never on
/// message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectSignal {
    location: String,
}

impl RedirectSignal {
    #[must_use]
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }

    /// Parse a provider marker of the form `REDIRECT;<location>`.
    ///
    /// Anything starting with the reserved prefix is a signal; a marker
    /// without a location falls back to the application root.
    #[must_use]
    pub fn from_marker(marker: &str) -> Option<Self> {
        let rest = marker.strip_prefix(REDIRECT_MARKER_PREFIX)?;

        let location = match rest.strip_prefix(';') {
            Some(tail) => match tail.split(';').next() {
                Some(first) if !first.is_empty() => first,
                _ => "/",
            },
            None => "/",
        };

        Some(Self::new(location))
    }

    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }
}

impl std::fmt::Display for RedirectSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{REDIRECT_MARKER_PREFIX};{}", self.location)
    }
}

/// One outcome per attempt; consumed immediately, never persisted.
#[derive(Debug)]
pub enum AuthOutcome {
    Success {
        user: Option<Identity>,
        destination: Option<&'static str>,
        set_cookies: Vec<String>,
    },
    ValidationFailure(String),
    ProviderFailure(String),
    Redirect(RedirectSignal),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_with_location_parses() {
        let signal = RedirectSignal::from_marker("REDIRECT;/find-services").expect("signal");
        assert_eq!(signal.location(), "/find-services");
    }

    #[test]
    fn marker_keeps_only_the_first_segment() {
        let signal = RedirectSignal::from_marker("REDIRECT;/admin/dashboard;303").expect("signal");
        assert_eq!(signal.location(), "/admin/dashboard");
    }

    #[test]
    fn bare_prefix_falls_back_to_root() {
        let signal = RedirectSignal::from_marker("REDIRECT").expect("signal");
        assert_eq!(signal.location(), "/");
    }

    #[test]
    fn unrelated_markers_are_not_signals() {
        assert_eq!(RedirectSignal::from_marker("PROVIDER_DOWN"), None);
        assert_eq!(RedirectSignal::from_marker("INVALID_CREDENTIALS"), None);
        assert_eq!(RedirectSignal::from_marker(""), None);
    }

    #[test]
    fn display_round_trips_through_from_marker() {
        let signal = RedirectSignal::new("/provider/dashboard");
        let parsed = RedirectSignal::from_marker(&signal.to_string()).expect("signal");
        assert_eq!(parsed, signal);
    }
}
