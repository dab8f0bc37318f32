// Advertising platforms a campaign can run on.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A supported ad platform.
///
/// Ordering follows declaration order, which keeps every map keyed by
/// platform deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Facebook,
    Instagram,
    Google,
    Microsoft,
    Tiktok,
    Twitter,
}

impl Platform {
    pub const ALL: [Platform; 6] = [
        Platform::Facebook,
        Platform::Instagram,
        Platform::Google,
        Platform::Microsoft,
        Platform::Tiktok,
        Platform::Twitter,
    ];

    /// The wire identifier (`"facebook"`, `"google"`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Facebook => "facebook",
            Platform::Instagram => "instagram",
            Platform::Google => "google",
            Platform::Microsoft => "microsoft",
            Platform::Tiktok => "tiktok",
            Platform::Twitter => "twitter",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Facebook => "Facebook",
            Platform::Instagram => "Instagram",
            Platform::Google => "Google Ads",
            Platform::Microsoft => "Microsoft Ads",
            Platform::Tiktok => "TikTok",
            Platform::Twitter => "X (Twitter)",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Platform {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Platform::ALL
            .into_iter()
            .find(|p| p.as_str() == wanted)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown platform '{}'. Expected one of: facebook, instagram, google, \
                     microsoft, tiktok, twitter",
                    s.trim()
                )
            })
    }
}

/// Parse a comma-separated platform list (`"facebook, google"`).
///
/// Empty segments are skipped, so an empty string yields an empty list.
pub fn parse_platform_list(raw: &str) -> anyhow::Result<Vec<Platform>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(Platform::from_str)
        .collect()
}
