//! Admin API version selection.
//!
//! The REST Admin API is versioned by quarter (`YYYY-MM`). Known releases get
//! their own variant; any other well-formed version is accepted as
//! [`ApiVersion::Custom`] so a newer release can be used without a rebuild.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// An Admin API version, rendered into `/admin/api/{version}/`.
///
/// # Example
///
/// ```rust
/// use catalog_bridge::ApiVersion;
///
/// let version: ApiVersion = "2025-01".parse().unwrap();
/// assert_eq!(version, ApiVersion::V2025_01);
/// assert_eq!(version.to_string(), "2025-01");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    /// 2024-10 release.
    V2024_10,
    /// 2025-01 release.
    V2025_01,
    /// 2025-04 release.
    V2025_04,
    /// 2025-07 release.
    V2025_07,
    /// 2025-10 release.
    V2025_10,
    /// The unstable channel.
    Unstable,
    /// Any other `YYYY-MM` version.
    Custom(String),
}

impl ApiVersion {
    /// The version used when none is configured.
    #[must_use]
    pub const fn latest() -> Self {
        Self::V2025_10
    }

    /// The oldest release still served by the platform.
    #[must_use]
    pub const fn minimum_supported() -> Self {
        Self::V2025_01
    }

    /// Whether requests against this version will hit a retired release.
    #[must_use]
    pub fn is_deprecated(&self) -> bool {
        match self {
            Self::Unstable | Self::Custom(_) => false,
            _ => *self < Self::minimum_supported(),
        }
    }

    const fn ordinal(&self) -> u32 {
        match self {
            Self::V2024_10 => 1,
            Self::V2025_01 => 2,
            Self::V2025_04 => 3,
            Self::V2025_07 => 4,
            Self::V2025_10 => 5,
            Self::Unstable => 100,
            Self::Custom(_) => 101,
        }
    }

    fn is_valid_version_format(s: &str) -> bool {
        let Some((year, month)) = s.split_once('-') else {
            return false;
        };
        year.len() == 4
            && year.chars().all(|c| c.is_ascii_digit())
            && month.len() == 2
            && month
                .parse::<u8>()
                .is_ok_and(|m| (1..=12).contains(&m))
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self::latest()
    }
}

impl PartialOrd for ApiVersion {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ApiVersion {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match (self, other) {
            (Self::Custom(a), Self::Custom(b)) => a.cmp(b),
            _ => self.ordinal().cmp(&other.ordinal()),
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let version_str = match self {
            Self::V2024_10 => "2024-10",
            Self::V2025_01 => "2025-01",
            Self::V2025_04 => "2025-04",
            Self::V2025_07 => "2025-07",
            Self::V2025_10 => "2025-10",
            Self::Unstable => "unstable",
            Self::Custom(s) => s,
        };
        f.write_str(version_str)
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();

        match s.as_str() {
            "2024-10" => Ok(Self::V2024_10),
            "2025-01" => Ok(Self::V2025_01),
            "2025-04" => Ok(Self::V2025_04),
            "2025-07" => Ok(Self::V2025_07),
            "2025-10" => Ok(Self::V2025_10),
            "unstable" => Ok(Self::Unstable),
            _ if Self::is_valid_version_format(&s) => Ok(Self::Custom(s)),
            _ => Err(ConfigError::InvalidApiVersion { version: s }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_version_parses_known_versions() {
        assert_eq!("2025-01".parse::<ApiVersion>().unwrap(), ApiVersion::V2025_01);
        assert_eq!(" 2025-10 ".parse::<ApiVersion>().unwrap(), ApiVersion::V2025_10);
        assert_eq!("UNSTABLE".parse::<ApiVersion>().unwrap(), ApiVersion::Unstable);
    }

    #[test]
    fn test_api_version_parses_future_versions() {
        let version: ApiVersion = "2026-04".parse().unwrap();
        assert_eq!(version, ApiVersion::Custom("2026-04".to_string()));
        assert_eq!(version.to_string(), "2026-04");
    }

    #[test]
    fn test_api_version_rejects_invalid() {
        assert!("2025".parse::<ApiVersion>().is_err());
        assert!("2025-13".parse::<ApiVersion>().is_err());
        assert!("25-01".parse::<ApiVersion>().is_err());
        assert!("latest".parse::<ApiVersion>().is_err());
    }

    #[test]
    fn test_is_deprecated_for_old_versions() {
        assert!(ApiVersion::V2024_10.is_deprecated());
        assert!(!ApiVersion::V2025_01.is_deprecated());
        assert!(!ApiVersion::Unstable.is_deprecated());
        assert!(!ApiVersion::latest().is_deprecated());
    }

    #[test]
    fn test_version_ordering() {
        assert!(ApiVersion::V2024_10 < ApiVersion::V2025_10);
        assert!(ApiVersion::V2025_10 < ApiVersion::Unstable);
    }
}
