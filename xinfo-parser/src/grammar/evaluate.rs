use std::{collections::BTreeMap, fmt::Display, str::FromStr};

use chrono::NaiveDateTime;

use crate::{
    LocaleCounts, PortCounts,
    grammar::fields::{ConnCounts, Interval, field_parser},
};

/// The outcome of running one field grammar over a raw value.
///
/// `value` and `problem` are independent: a ratio of `100.1%` parses fine and is still
/// a problem, while a number list can drop some tokens and keep the rest.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Evaluation<T> {
    /// What gets stored, `None` when nothing could be parsed.
    pub(crate) value: Option<T>,
    /// Why strict validation rejects the line.
    pub(crate) problem: Option<String>,
}

impl<T> Evaluation<T> {
    fn valid(value: T) -> Self {
        Self {
            value: Some(value),
            problem: None,
        }
    }

    fn unparsed(problem: impl Display) -> Self {
        Self {
            value: None,
            problem: Some(problem.to_string()),
        }
    }

    /// Hands the parsed value (if any) to `assign` and returns the problem, if any.
    pub(crate) fn store(self, assign: impl FnOnce(T)) -> Result<(), String> {
        if let Some(value) = self.value {
            assign(value);
        }
        self.problem.map_or(Ok(()), Err)
    }
}

impl<T, E: Display> From<Result<T, E>> for Evaluation<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::valid(value),
            Err(e) => Self::unparsed(e),
        }
    }
}

/// Fixed shapes an identity value has to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Pattern {
    HexDigest,
    Nickname,
}

impl Pattern {
    fn check(self, raw: &str) -> Result<(), String> {
        let result = match self {
            Self::HexDigest => field_parser::hex_digest(raw),
            Self::Nickname => field_parser::nickname(raw),
        };
        result.map_err(|e| format!("'{raw}' is not a valid {}: {e}", self.name()))
    }

    fn name(self) -> &'static str {
        match self {
            Self::HexDigest => "digest",
            Self::Nickname => "nickname",
        }
    }
}

/// The raw text is always kept, the pattern only decides validity.
pub(crate) fn identity(raw: &str, pattern: Pattern) -> Evaluation<String> {
    Evaluation {
        value: Some(raw.to_string()),
        problem: pattern.check(raw).err(),
    }
}

pub(crate) fn count(raw: &str) -> Evaluation<u64> {
    field_parser::count(raw).into()
}

pub(crate) fn ratio(raw: &str) -> Evaluation<f64> {
    match field_parser::ratio(raw) {
        Ok(ratio) if (0.0..=1.0).contains(&ratio) => Evaluation::valid(ratio),
        Ok(ratio) => Evaluation {
            value: Some(ratio),
            problem: Some(format!("ratio {ratio} is outside [0, 1]")),
        },
        Err(e) => Evaluation::unparsed(e),
    }
}

/// Each comma separated token is converted on its own. Tokens that are not numbers are
/// dropped, and dropping any of them is a problem.
pub(crate) fn number_list(raw: &str) -> Evaluation<Vec<f64>> {
    if raw.trim().is_empty() {
        return Evaluation::valid(Vec::new());
    }

    let mut dropped = Vec::new();
    let numbers = raw
        .split(',')
        .filter_map(|token| match token.trim().parse::<f64>() {
            Ok(number) if number.is_finite() => Some(number),
            Ok(_) | Err(_) => {
                dropped.push(token);
                None
            }
        })
        .collect();

    let problem = if dropped.is_empty() {
        None
    } else {
        Some(format!("entries that are not numbers: {dropped:?}"))
    };
    Evaluation {
        value: Some(numbers),
        problem,
    }
}

/// Known keys go to the first map, anything `K` does not recognize to the second.
pub(crate) fn bucketed_counts<K: FromStr + Ord>(
    raw: &str,
) -> Evaluation<(BTreeMap<K, u64>, BTreeMap<String, u64>)> {
    field_parser::keyed_counts(raw)
        .map(|pairs| {
            let mut known = BTreeMap::new();
            let mut unknown = BTreeMap::new();
            for (key, count) in pairs {
                if let Ok(known_key) = key.parse::<K>() {
                    known.insert(known_key, count);
                } else {
                    unknown.insert(key.to_string(), count);
                }
            }
            (known, unknown)
        })
        .into()
}

pub(crate) fn port_counts(raw: &str) -> Evaluation<PortCounts> {
    field_parser::port_counts(raw)
        .map(|pairs| pairs.into_iter().collect())
        .into()
}

pub(crate) fn locale_counts(raw: &str) -> Evaluation<LocaleCounts> {
    field_parser::locale_counts(raw)
        .map(owned_keys)
        .into()
}

pub(crate) fn label_counts(raw: &str) -> Evaluation<BTreeMap<String, u64>> {
    field_parser::label_counts(raw).map(owned_keys).into()
}

fn owned_keys(pairs: Vec<(&str, u64)>) -> BTreeMap<String, u64> {
    pairs
        .into_iter()
        .map(|(key, count)| (key.to_string(), count))
        .collect()
}

pub(crate) fn timestamp(raw: &str) -> Evaluation<NaiveDateTime> {
    field_parser::timestamp(raw).into()
}

pub(crate) fn interval(raw: &str) -> Evaluation<Interval> {
    field_parser::interval(raw).into()
}

pub(crate) fn history(raw: &str) -> Evaluation<(Interval, Vec<u64>)> {
    field_parser::history(raw).into()
}

pub(crate) fn conn_bi_direct(raw: &str) -> Evaluation<(Interval, ConnCounts)> {
    field_parser::conn_bi_direct(raw).into()
}
