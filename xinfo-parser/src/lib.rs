//! Parser and validator for Tor extra-info descriptors.
//!
//! An extra-info descriptor is a list of `<keyword> <value>` lines opened by an
//! `extra-info` line and closed by a `router-signature` line plus its signature block.
//! Every optional keyword has its own value grammar, and this crate turns all of them
//! into typed attributes of an [`ExtraInfo`].
//!
//! Two validation modes are available:
//!
//! * [`Validation::Strict`] rejects the descriptor at the first problem found.
//! * [`Validation::Lenient`] never rejects, attributes that fail to parse keep their
//!   defaults.
//!
//! ```
//! use xinfo_parser::{Options, parse};
//!
//! let descriptor = "extra-info ninja B2289C3EAB83ECD6EB916A2F481A02E6B76A0A48
//! published 2012-05-05 17:03:50
//! router-signature
//! -----BEGIN SIGNATURE-----
//! 7LZqklu+gVvhMKREpchVqlAwXkWR44VENm24Hs+mT3M=
//! -----END SIGNATURE-----";
//!
//! let record = parse(descriptor, &Options::default())?;
//! assert_eq!(record.nickname.as_deref(), Some("ninja"));
//! # Ok::<(), xinfo_parser::Error>(())
//! ```
use std::str::FromStr;

use tracing::instrument;

mod constants;
mod document;
mod error;
mod grammar;
mod model;
mod options;

#[cfg(test)]
mod test_support;

pub use constants::{FIRST_KEYWORD, LAST_KEYWORD};
pub use error::{Detail as ErrorDetail, Error};
pub use model::{DirResponse, DirStat, ExtraInfo, LocaleCounts, Location, PortCounts, PortKey};
pub use options::{Options, OptionsBuilder, Validation};

/// Parse an extra-info descriptor.
///
/// With [`Validation::Strict`] the first violation, in document order, is returned as
/// the error. With [`Validation::Lenient`] this never fails.
///
/// # Errors
///
/// Returns an [`Error`] describing the first violation when validation is strict.
#[instrument(level = "trace", skip(input))]
pub fn parse(input: &str, options: &Options) -> Result<ExtraInfo, Error> {
    let document::Assembly { record, violations } = document::assemble(input);

    match options.validation {
        Validation::Strict => match violations.into_iter().next() {
            Some(violation) => {
                tracing::debug!(%violation, "rejecting descriptor");
                Err(violation)
            }
            None => Ok(record),
        },
        Validation::Lenient => {
            for violation in &violations {
                tracing::debug!(%violation, "ignoring violation");
            }
            Ok(record)
        }
    }
}

/// Parse `input` with strict validation.
///
/// # Errors
///
/// Returns the first violation found in the descriptor.
pub fn parse_strict(input: &str) -> Result<ExtraInfo, Error> {
    parse(input, &Options::new())
}

/// Parse `input` without validation. Attributes that do not parse keep their defaults.
#[must_use]
pub fn parse_lenient(input: &str) -> ExtraInfo {
    let document::Assembly { record, .. } = document::assemble(input);
    record
}

impl FromStr for ExtraInfo {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_strict(s)
    }
}
