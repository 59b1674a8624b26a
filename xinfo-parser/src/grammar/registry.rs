use std::{collections::BTreeMap, sync::LazyLock};

use chrono::NaiveDateTime;
use rustc_hash::FxHashMap;

use crate::{
    DirResponse, DirStat, ExtraInfo, LocaleCounts, PortCounts,
    grammar::evaluate::{self, Pattern},
};

type Slot<T> = fn(&mut ExtraInfo) -> &mut T;
type Pair<A, B> = fn(&mut ExtraInfo) -> (&mut A, &mut B);
type Triple<A, B, C> = fn(&mut ExtraInfo) -> (&mut A, &mut B, &mut C);
type Bucketed<K> = Pair<BTreeMap<K, u64>, BTreeMap<String, u64>>;

type Stamp = Option<NaiveDateTime>;

/// How a family copes with a value that is partly malformed.
///
/// This describes what the family's evaluator already does, it does not change what
/// gets stored. It is reported alongside field failures in the logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tolerance {
    /// The raw text is stored whatever it looks like.
    Verbatim,
    /// Each token stands on its own, bad ones are dropped.
    PerToken,
    /// All parts parse or none of them is stored.
    Atomic,
}

/// A value grammar together with the record attributes it writes.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Family {
    Identity(Pattern, Slot<Option<String>>),
    Count(Slot<Option<u64>>),
    Ratio(Slot<Option<f64>>),
    NumberList(Slot<Vec<f64>>),
    Responses(Bucketed<DirResponse>),
    DownloadStats(Bucketed<DirStat>),
    Ports(Slot<PortCounts>),
    Locales(Slot<LocaleCounts>),
    Labels(Slot<BTreeMap<String, u64>>),
    Timestamp(Slot<Stamp>),
    Interval(Pair<Stamp, Option<u64>>),
    History(Triple<Stamp, Option<u64>, Option<Vec<u64>>>),
    ConnBiDirect,
}

impl Family {
    pub(crate) fn tolerance(&self) -> Tolerance {
        match self {
            Self::Identity(..) => Tolerance::Verbatim,
            Self::NumberList(_) => Tolerance::PerToken,
            Self::Count(_)
            | Self::Ratio(_)
            | Self::Responses(_)
            | Self::DownloadStats(_)
            | Self::Ports(_)
            | Self::Locales(_)
            | Self::Labels(_)
            | Self::Timestamp(_)
            | Self::Interval(_)
            | Self::History(_)
            | Self::ConnBiDirect => Tolerance::Atomic,
        }
    }

    /// Evaluates `raw` and writes whatever parsed into `record`.
    ///
    /// Returns the reason strict validation rejects the value. The record is updated
    /// either way, so lenient parsing simply ignores the error.
    pub(crate) fn apply(&self, raw: &str, record: &mut ExtraInfo) -> Result<(), String> {
        match *self {
            Self::Identity(pattern, slot) => {
                evaluate::identity(raw, pattern).store(|value| *slot(record) = Some(value))
            }
            Self::Count(slot) => evaluate::count(raw).store(|value| *slot(record) = Some(value)),
            Self::Ratio(slot) => evaluate::ratio(raw).store(|value| *slot(record) = Some(value)),
            Self::NumberList(slot) => evaluate::number_list(raw).store(|value| *slot(record) = value),
            Self::Responses(slot) => {
                evaluate::bucketed_counts::<DirResponse>(raw).store(|(known, unknown)| {
                    let (known_slot, unknown_slot) = slot(record);
                    *known_slot = known;
                    *unknown_slot = unknown;
                })
            }
            Self::DownloadStats(slot) => {
                evaluate::bucketed_counts::<DirStat>(raw).store(|(known, unknown)| {
                    let (known_slot, unknown_slot) = slot(record);
                    *known_slot = known;
                    *unknown_slot = unknown;
                })
            }
            Self::Ports(slot) => evaluate::port_counts(raw).store(|value| *slot(record) = value),
            Self::Locales(slot) => {
                evaluate::locale_counts(raw).store(|value| *slot(record) = value)
            }
            Self::Labels(slot) => evaluate::label_counts(raw).store(|value| *slot(record) = value),
            Self::Timestamp(slot) => {
                evaluate::timestamp(raw).store(|value| *slot(record) = Some(value))
            }
            Self::Interval(slot) => evaluate::interval(raw).store(|interval| {
                let (end, seconds) = slot(record);
                *end = Some(interval.end);
                *seconds = Some(interval.seconds);
            }),
            Self::History(slot) => evaluate::history(raw).store(|(interval, values)| {
                let (end, seconds, values_slot) = slot(record);
                *end = Some(interval.end);
                *seconds = Some(interval.seconds);
                *values_slot = Some(values);
            }),
            Self::ConnBiDirect => evaluate::conn_bi_direct(raw).store(|(interval, counts)| {
                record.conn_bi_direct_end = Some(interval.end);
                record.conn_bi_direct_interval = Some(interval.seconds);
                record.conn_bi_direct_below = Some(counts.below);
                record.conn_bi_direct_read = Some(counts.read);
                record.conn_bi_direct_write = Some(counts.write);
                record.conn_bi_direct_both = Some(counts.both);
            }),
        }
    }
}

static REGISTRY: LazyLock<FxHashMap<&'static str, Family>> =
    LazyLock::new(|| fields().into_iter().collect());

/// Looks up the grammar of an optional keyword.
///
/// `extra-info` and `router-signature` are structural and handled by the document
/// assembler, they are not part of the registry.
pub(crate) fn lookup(keyword: &str) -> Option<Family> {
    REGISTRY.get(keyword).copied()
}

#[allow(clippy::too_many_lines)]
fn fields() -> Vec<(&'static str, Family)> {
    vec![
        ("published", Family::Timestamp(|d| &mut d.published)),
        (
            "geoip-db-digest",
            Family::Identity(Pattern::HexDigest, |d| &mut d.geoip_db_digest),
        ),
        (
            "geoip6-db-digest",
            Family::Identity(Pattern::HexDigest, |d| &mut d.geoip6_db_digest),
        ),
        ("geoip-start-time", Family::Timestamp(|d| &mut d.geoip_start_time)),
        (
            "geoip-client-origins",
            Family::Locales(|d| &mut d.geoip_client_origins),
        ),
        // bandwidth histories
        (
            "read-history",
            Family::History(|d| {
                (
                    &mut d.read_history_end,
                    &mut d.read_history_interval,
                    &mut d.read_history_values,
                )
            }),
        ),
        (
            "write-history",
            Family::History(|d| {
                (
                    &mut d.write_history_end,
                    &mut d.write_history_interval,
                    &mut d.write_history_values,
                )
            }),
        ),
        (
            "dirreq-read-history",
            Family::History(|d| {
                (
                    &mut d.dir_read_history_end,
                    &mut d.dir_read_history_interval,
                    &mut d.dir_read_history_values,
                )
            }),
        ),
        (
            "dirreq-write-history",
            Family::History(|d| {
                (
                    &mut d.dir_write_history_end,
                    &mut d.dir_write_history_interval,
                    &mut d.dir_write_history_values,
                )
            }),
        ),
        // cell statistics
        (
            "cell-stats-end",
            Family::Interval(|d| (&mut d.cell_stats_end, &mut d.cell_stats_interval)),
        ),
        (
            "cell-processed-cells",
            Family::NumberList(|d| &mut d.cell_processed_cells),
        ),
        (
            "cell-queued-cells",
            Family::NumberList(|d| &mut d.cell_queued_cells),
        ),
        (
            "cell-time-in-queue",
            Family::NumberList(|d| &mut d.cell_time_in_queue),
        ),
        (
            "cell-circuits-per-decile",
            Family::Count(|d| &mut d.cell_circuits_per_decile),
        ),
        // directory request statistics
        (
            "dirreq-stats-end",
            Family::Interval(|d| (&mut d.dir_stats_end, &mut d.dir_stats_interval)),
        ),
        ("dirreq-v2-ips", Family::Locales(|d| &mut d.dir_v2_ips)),
        ("dirreq-v3-ips", Family::Locales(|d| &mut d.dir_v3_ips)),
        ("dirreq-v2-reqs", Family::Locales(|d| &mut d.dir_v2_requests)),
        ("dirreq-v3-reqs", Family::Locales(|d| &mut d.dir_v3_requests)),
        ("dirreq-v2-share", Family::Ratio(|d| &mut d.dir_v2_share)),
        ("dirreq-v3-share", Family::Ratio(|d| &mut d.dir_v3_share)),
        (
            "dirreq-v2-resp",
            Family::Responses(|d| (&mut d.dir_v2_responses, &mut d.dir_v2_responses_unknown)),
        ),
        (
            "dirreq-v3-resp",
            Family::Responses(|d| (&mut d.dir_v3_responses, &mut d.dir_v3_responses_unknown)),
        ),
        (
            "dirreq-v2-direct-dl",
            Family::DownloadStats(|d| (&mut d.dir_v2_direct_dl, &mut d.dir_v2_direct_dl_unknown)),
        ),
        (
            "dirreq-v3-direct-dl",
            Family::DownloadStats(|d| (&mut d.dir_v3_direct_dl, &mut d.dir_v3_direct_dl_unknown)),
        ),
        (
            "dirreq-v2-tunneled-dl",
            Family::DownloadStats(|d| {
                (&mut d.dir_v2_tunneled_dl, &mut d.dir_v2_tunneled_dl_unknown)
            }),
        ),
        (
            "dirreq-v3-tunneled-dl",
            Family::DownloadStats(|d| {
                (&mut d.dir_v3_tunneled_dl, &mut d.dir_v3_tunneled_dl_unknown)
            }),
        ),
        // entry, exit and bridge statistics
        (
            "entry-stats-end",
            Family::Interval(|d| (&mut d.entry_stats_end, &mut d.entry_stats_interval)),
        ),
        ("entry-ips", Family::Locales(|d| &mut d.entry_ips)),
        (
            "exit-stats-end",
            Family::Interval(|d| (&mut d.exit_stats_end, &mut d.exit_stats_interval)),
        ),
        (
            "exit-kibibytes-written",
            Family::Ports(|d| &mut d.exit_kibibytes_written),
        ),
        ("exit-kibibytes-read", Family::Ports(|d| &mut d.exit_kibibytes_read)),
        ("exit-streams-opened", Family::Ports(|d| &mut d.exit_streams_opened)),
        (
            "bridge-stats-end",
            Family::Interval(|d| (&mut d.bridge_stats_end, &mut d.bridge_stats_interval)),
        ),
        ("bridge-ips", Family::Locales(|d| &mut d.bridge_ips)),
        ("bridge-ip-versions", Family::Labels(|d| &mut d.bridge_ip_versions)),
        (
            "bridge-ip-transports",
            Family::Labels(|d| &mut d.bridge_ip_transports),
        ),
        ("conn-bi-direct", Family::ConnBiDirect),
    ]
}
