//! Static capability-to-path registry.

use crate::{Error, Result};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::str::FromStr;

/// Analysis capabilities offered by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Sentiment,
    KeyPhrases,
    Vision,
    Entities,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sentiment => "sentiment",
            Self::KeyPhrases => "keyPhrases",
            Self::Vision => "vision",
            Self::Entities => "entities",
        }
    }
}

impl FromStr for Capability {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sentiment" => Ok(Self::Sentiment),
            "keyPhrases" | "key_phrases" => Ok(Self::KeyPhrases),
            "vision" => Ok(Self::Vision),
            "entities" => Ok(Self::Entities),
            other => Err(Error::UnknownEndpoint {
                capability: other.to_string(),
            }),
        }
    }
}

/// Read-only path table, built once per process.
static ENDPOINTS: Lazy<HashMap<Capability, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (Capability::Sentiment, "/text/analytics/v2.1/sentiment"),
        (Capability::KeyPhrases, "/text/analytics/v2.1/keyPhrases"),
        (Capability::Vision, "/vision/v2.1/analyze"),
        (Capability::Entities, "/text/analytics/v2.1/entities"),
    ])
});

/// Resolve a capability to its service path.
///
/// The enum is closed, so the miss arm is a defensive contract rather than
/// an expected runtime path.
pub fn resolve(capability: Capability) -> Result<&'static str> {
    ENDPOINTS
        .get(&capability)
        .copied()
        .ok_or_else(|| Error::UnknownEndpoint {
            capability: capability.as_str().to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_all_capabilities() {
        assert_eq!(
            resolve(Capability::Sentiment).unwrap(),
            "/text/analytics/v2.1/sentiment"
        );
        assert_eq!(
            resolve(Capability::KeyPhrases).unwrap(),
            "/text/analytics/v2.1/keyPhrases"
        );
        assert_eq!(resolve(Capability::Vision).unwrap(), "/vision/v2.1/analyze");
        assert_eq!(
            resolve(Capability::Entities).unwrap(),
            "/text/analytics/v2.1/entities"
        );
    }

    #[test]
    fn parses_known_names() {
        assert_eq!("sentiment".parse::<Capability>().unwrap(), Capability::Sentiment);
        assert_eq!("keyPhrases".parse::<Capability>().unwrap(), Capability::KeyPhrases);
        assert_eq!("key_phrases".parse::<Capability>().unwrap(), Capability::KeyPhrases);
    }

    #[test]
    fn unknown_name_is_unknown_endpoint() {
        let err = "summarize".parse::<Capability>().unwrap_err();
        assert!(matches!(
            err,
            crate::Error::UnknownEndpoint { ref capability } if capability == "summarize"
        ));
    }
}
