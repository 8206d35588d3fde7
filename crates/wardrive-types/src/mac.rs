use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

static MAC_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9A-F]{2}(:[0-9A-F]{2}){5}$").expect("valid MAC pattern"));

/// Normalized 48-bit hardware address in uppercase colon-separated form.
///
/// Construction always goes through [`Mac::parse`], so every value of this
/// type is syntactically valid. The string form is the canonical identity
/// used for deduplication across sessions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mac(String);

impl Mac {
    /// Parse and normalize MAC text.
    ///
    /// Accepts colon or hyphen separators; output is always uppercase
    /// colon-separated. Anything else is an `InvalidMac` error.
    pub fn parse(text: &str) -> Result<Self> {
        let normalized = text.trim().to_uppercase().replace('-', ":");
        if !MAC_PATTERN.is_match(&normalized) {
            return Err(Error::InvalidMac(text.to_string()));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Organizational prefix (first 3 octets), e.g. "C0:A3:6E".
    pub fn oui_prefix(&self) -> &str {
        &self.0[..8]
    }

    /// Whether the locally-administered bit (0x02 of the first octet) is set.
    ///
    /// Such addresses are software-assigned (privacy randomization) and by
    /// construction never correspond to a registered manufacturer.
    pub fn is_locally_administered(&self) -> bool {
        u8::from_str_radix(&self.0[..2], 16)
            .map(|first_octet| first_octet & 0x02 != 0)
            .unwrap_or(false)
    }
}

impl std::fmt::Display for Mac {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
