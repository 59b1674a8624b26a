//! The types produced by parsing an extra-info descriptor.
mod keys;
mod location;

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Serialize;

pub use keys::{DirResponse, DirStat, PortKey};
pub use location::Location;

/// Counts keyed by two-letter country codes (`??` for unresolved addresses).
pub type LocaleCounts = BTreeMap<String, u64>;

/// Counts keyed by exit port.
pub type PortCounts = BTreeMap<PortKey, u64>;

/// A parsed extra-info descriptor.
///
/// Every attribute starts out as `None` (or an empty collection) and is only replaced
/// when a line for it parses. In lenient mode a `None` therefore means "absent or
/// malformed".
///
/// Attributes of composite lines are published as `<line>_<part>`, e.g. the
/// `read-history` line sets `read_history_end`, `read_history_interval` and
/// `read_history_values`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[non_exhaustive]
pub struct ExtraInfo {
    pub nickname: Option<String>,
    pub fingerprint: Option<String>,
    pub published: Option<NaiveDateTime>,

    pub geoip_db_digest: Option<String>,
    pub geoip6_db_digest: Option<String>,
    pub geoip_start_time: Option<NaiveDateTime>,
    pub geoip_client_origins: LocaleCounts,

    pub read_history_end: Option<NaiveDateTime>,
    pub read_history_interval: Option<u64>,
    pub read_history_values: Option<Vec<u64>>,
    pub write_history_end: Option<NaiveDateTime>,
    pub write_history_interval: Option<u64>,
    pub write_history_values: Option<Vec<u64>>,
    pub dir_read_history_end: Option<NaiveDateTime>,
    pub dir_read_history_interval: Option<u64>,
    pub dir_read_history_values: Option<Vec<u64>>,
    pub dir_write_history_end: Option<NaiveDateTime>,
    pub dir_write_history_interval: Option<u64>,
    pub dir_write_history_values: Option<Vec<u64>>,

    pub cell_stats_end: Option<NaiveDateTime>,
    pub cell_stats_interval: Option<u64>,
    pub cell_processed_cells: Vec<f64>,
    pub cell_queued_cells: Vec<f64>,
    pub cell_time_in_queue: Vec<f64>,
    pub cell_circuits_per_decile: Option<u64>,

    pub dir_stats_end: Option<NaiveDateTime>,
    pub dir_stats_interval: Option<u64>,
    pub dir_v2_ips: LocaleCounts,
    pub dir_v3_ips: LocaleCounts,
    pub dir_v2_requests: LocaleCounts,
    pub dir_v3_requests: LocaleCounts,
    pub dir_v2_share: Option<f64>,
    pub dir_v3_share: Option<f64>,
    pub dir_v2_responses: BTreeMap<DirResponse, u64>,
    pub dir_v2_responses_unknown: BTreeMap<String, u64>,
    pub dir_v3_responses: BTreeMap<DirResponse, u64>,
    pub dir_v3_responses_unknown: BTreeMap<String, u64>,
    pub dir_v2_direct_dl: BTreeMap<DirStat, u64>,
    pub dir_v2_direct_dl_unknown: BTreeMap<String, u64>,
    pub dir_v3_direct_dl: BTreeMap<DirStat, u64>,
    pub dir_v3_direct_dl_unknown: BTreeMap<String, u64>,
    pub dir_v2_tunneled_dl: BTreeMap<DirStat, u64>,
    pub dir_v2_tunneled_dl_unknown: BTreeMap<String, u64>,
    pub dir_v3_tunneled_dl: BTreeMap<DirStat, u64>,
    pub dir_v3_tunneled_dl_unknown: BTreeMap<String, u64>,

    pub entry_stats_end: Option<NaiveDateTime>,
    pub entry_stats_interval: Option<u64>,
    pub entry_ips: LocaleCounts,

    pub exit_stats_end: Option<NaiveDateTime>,
    pub exit_stats_interval: Option<u64>,
    pub exit_kibibytes_written: PortCounts,
    pub exit_kibibytes_read: PortCounts,
    pub exit_streams_opened: PortCounts,

    pub bridge_stats_end: Option<NaiveDateTime>,
    pub bridge_stats_interval: Option<u64>,
    pub bridge_ips: LocaleCounts,
    pub bridge_ip_versions: BTreeMap<String, u64>,
    pub bridge_ip_transports: BTreeMap<String, u64>,

    pub conn_bi_direct_end: Option<NaiveDateTime>,
    pub conn_bi_direct_interval: Option<u64>,
    pub conn_bi_direct_below: Option<u64>,
    pub conn_bi_direct_read: Option<u64>,
    pub conn_bi_direct_write: Option<u64>,
    pub conn_bi_direct_both: Option<u64>,

    /// The `router-signature` block, `-----BEGIN`/`-----END` markers included.
    pub signature: Option<String>,

    /// Lines whose keyword is not known, verbatim and in document order.
    pub unrecognized_lines: Vec<String>,
}

impl ExtraInfo {
    /// Lines whose keyword is not known, verbatim and in document order.
    #[must_use]
    pub fn unrecognized_lines(&self) -> &[String] {
        &self.unrecognized_lines
    }
}
