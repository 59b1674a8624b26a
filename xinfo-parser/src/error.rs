use std::fmt;

use crate::model::Location;

/// Why a descriptor was rejected.
///
/// Only strict parsing ever returns one of these: lenient parsing keeps going and
/// leaves the affected attributes at their defaults.
#[non_exhaustive]
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("content before the 'extra-info' line: {1}, position: {0}")]
    LeadingContent(Detail, String),

    #[error("content after the 'router-signature' line: {1}, position: {0}")]
    TrailingContent(Detail, String),

    #[error("malformed 'extra-info' line: {1}, position: {0}")]
    MalformedIdentity(Detail, String),

    #[error("invalid '{1}' line: {2}, position: {0}")]
    InvalidField(Detail, String, String),

    #[error("missing mandatory '{0}' line")]
    MissingKeyword(String),

    #[error("'router-signature' is not followed by a signature block, position: {0}")]
    MissingSignature(Detail),

    #[error("signature block has no '-----END' marker, position: {0}")]
    UnterminatedSignature(Detail),

    #[error("blank line, position: {0}")]
    BlankLine(Detail),
}

impl Error {
    /// Extract location information from this error if available.
    #[must_use]
    pub fn location(&self) -> Option<&Location> {
        match self {
            Self::LeadingContent(detail, ..)
            | Self::TrailingContent(detail, ..)
            | Self::MalformedIdentity(detail, ..)
            | Self::InvalidField(detail, ..)
            | Self::MissingSignature(detail)
            | Self::UnterminatedSignature(detail)
            | Self::BlankLine(detail) => Some(&detail.location),
            Self::MissingKeyword(_) => None,
        }
    }

    /// The keyword of the offending line, if the error is tied to one.
    #[must_use]
    pub fn keyword(&self) -> Option<&str> {
        match self {
            Self::InvalidField(_, keyword, _) | Self::MissingKeyword(keyword) => Some(keyword),
            Self::MalformedIdentity(..) => Some(crate::constants::FIRST_KEYWORD),
            Self::MissingSignature(_) | Self::UnterminatedSignature(_) => {
                Some(crate::constants::LAST_KEYWORD)
            }
            Self::LeadingContent(..) | Self::TrailingContent(..) | Self::BlankLine(_) => None,
        }
    }

    /// Get advice for this error if available.
    #[must_use]
    pub fn advice(&self) -> Option<&'static str> {
        match self {
            Self::LeadingContent(..) => {
                Some("An extra-info descriptor must start with its 'extra-info' line")
            }
            Self::TrailingContent(..) => Some(
                "Nothing may follow the 'router-signature' line and its signature block",
            ),
            Self::MalformedIdentity(..) => Some(
                "The 'extra-info' line must hold a nickname (1-19 alphanumerics) and a 40 character hex fingerprint",
            ),
            Self::MissingSignature(..) | Self::UnterminatedSignature(..) => Some(
                "The signature block must follow 'router-signature', enclosed by '-----BEGIN SIGNATURE-----' and '-----END SIGNATURE-----'",
            ),
            Self::InvalidField(..) | Self::MissingKeyword(..) | Self::BlankLine(..) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Detail {
    pub location: Location,
}

impl Detail {
    #[must_use]
    pub(crate) fn at(location: Location) -> Self {
        Self { location }
    }
}

impl fmt::Display for Detail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Location {
            line,
            absolute_start,
            absolute_end,
            ..
        } = self.location;

        write!(
            f,
            "line: {line}, start: {absolute_start}, end: {absolute_end}"
        )
    }
}
