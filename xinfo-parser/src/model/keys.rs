use std::{fmt, str::FromStr};

use serde::{Serialize, Serializer};

/// Response statuses counted by the `dirreq-v2-resp` and `dirreq-v3-resp` lines.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DirResponse {
    /// Requests that were answered successfully.
    Ok,
    /// Consensus requests refused because the signatures were insufficient.
    NotEnoughSigs,
    /// Requests for a document that was not available.
    Unavailable,
    /// Requests for a document that was not found.
    NotFound,
    /// Conditional requests for a document that had not changed.
    NotModified,
    /// Requests refused because the relay was busy.
    Busy,
}

impl FromStr for DirResponse {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ok" => Ok(Self::Ok),
            "not-enough-sigs" => Ok(Self::NotEnoughSigs),
            "unavailable" => Ok(Self::Unavailable),
            "not-found" => Ok(Self::NotFound),
            "not-modified" => Ok(Self::NotModified),
            "busy" => Ok(Self::Busy),
            _ => Err(format!("unknown directory response: '{s}'")),
        }
    }
}

/// Statistics of directory downloads, used by the `dirreq-v{2,3}-{direct,tunneled}-dl`
/// lines.
///
/// `D1`..`D9` are deciles of download rates, `Q1` and `Q3` are the quartiles and `Md`
/// the median.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DirStat {
    Complete,
    Timeout,
    Running,
    Min,
    Max,
    D1,
    D2,
    D3,
    D4,
    Md,
    D6,
    D7,
    D8,
    D9,
    Q1,
    Q3,
}

impl FromStr for DirStat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "complete" => Ok(Self::Complete),
            "timeout" => Ok(Self::Timeout),
            "running" => Ok(Self::Running),
            "min" => Ok(Self::Min),
            "max" => Ok(Self::Max),
            "d1" => Ok(Self::D1),
            "d2" => Ok(Self::D2),
            "d3" => Ok(Self::D3),
            "d4" => Ok(Self::D4),
            "md" => Ok(Self::Md),
            "d6" => Ok(Self::D6),
            "d7" => Ok(Self::D7),
            "d8" => Ok(Self::D8),
            "d9" => Ok(Self::D9),
            "q1" => Ok(Self::Q1),
            "q3" => Ok(Self::Q3),
            _ => Err(format!("unknown directory download statistic: '{s}'")),
        }
    }
}

/// Key of the exit port histograms: either a port number or the `other` bucket.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum PortKey {
    Port(u16),
    Other,
}

impl fmt::Display for PortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Port(port) => write!(f, "{port}"),
            Self::Other => write!(f, "other"),
        }
    }
}

// JSON object keys have to be strings, so ports serialize through `Display`.
impl Serialize for PortKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
