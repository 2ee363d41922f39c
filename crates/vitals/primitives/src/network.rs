use core::fmt;
use core::str::FromStr;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The sub-network a node instance reports.
///
/// The same identity may run one instance on each sub-network at once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(strum::IntoStaticStr)] // Network::as_str
#[derive(strum::EnumString)] // FromStr
#[derive(strum::EnumIter)] // Network::iter
#[derive(strum::EnumCount)] // Network::COUNT
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Network {
    Mainnet,
    Devnet,
    #[default]
    Unknown,
}

impl Network {
    /// Returns the wire form (`MAINNET`, `DEVNET`, `UNKNOWN`).
    #[inline]
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// Lenient parse: anything unrecognized is [`Network::Unknown`].
    pub fn parse_lossy(s: &str) -> Self {
        Self::from_str(s.trim()).unwrap_or_default()
    }

    pub const fn is_mainnet(&self) -> bool {
        matches!(self, Self::Mainnet)
    }

    pub const fn is_devnet(&self) -> bool {
        matches!(self, Self::Devnet)
    }
}

impl fmt::Display for Network {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_str().fmt(f)
    }
}

impl Serialize for Network {
    #[inline]
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Network {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Other(IgnoredAny),
        }

        match Option::<Raw>::deserialize(d)? {
            Some(Raw::Text(s)) => Ok(Self::parse_lossy(&s)),
            Some(Raw::Other(_)) | None => Ok(Self::Unknown),
        }
    }
}
