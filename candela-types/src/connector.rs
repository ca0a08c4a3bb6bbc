//! Provider identity.

use serde::Serialize;

/// Name of the page provider that served a request.
///
/// Every `PageProvider` reports one, and the synchronizer stamps it on each
/// `PageFetched` event so observers can tell sources apart when several
/// synchronizers share a sink. It serializes as the bare name.
///
/// ```
/// use candela_types::ConnectorKey;
///
/// const TWELVE: ConnectorKey = ConnectorKey::new("candela-twelvedata");
/// assert_eq!(TWELVE, "candela-twelvedata");
/// assert_eq!(TWELVE.to_string(), "candela-twelvedata");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ConnectorKey(&'static str);

impl ConnectorKey {
    /// Key for a provider called `name`.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Provider name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl AsRef<str> for ConnectorKey {
    fn as_ref(&self) -> &str {
        self.0
    }
}

impl PartialEq<&str> for ConnectorKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl std::fmt::Display for ConnectorKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}
