// ── Device fact types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Sentinel for a field the CLI extraction could not determine.
pub const N_A: &str = "N/A";

/// Sentinel for a field a controller lookup could not determine.
pub const UNKNOWN: &str = "Unknown";

/// Canonical platform identifier -- normalized from testbed OS strings
/// and controller families.
///
/// The set is closed: extraction dispatches over it exhaustively, so a
/// new platform cannot be added without the compiler pointing at every
/// match that needs a branch.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[non_exhaustive]
pub enum Platform {
    #[strum(serialize = "iosxr")]
    #[serde(rename = "iosxr")]
    IosXr,
    #[strum(serialize = "iosxe")]
    #[serde(rename = "iosxe")]
    IosXe,
    #[strum(serialize = "nxos")]
    #[serde(rename = "nxos")]
    Nxos,
    #[strum(serialize = "asa")]
    #[serde(rename = "asa")]
    Asa,
    #[strum(serialize = "ios")]
    #[serde(rename = "ios")]
    Ios,
    #[strum(serialize = "controller-fabric")]
    #[serde(rename = "controller-fabric")]
    FabricController,
    #[strum(serialize = "controller-sdwan")]
    #[serde(rename = "controller-sdwan")]
    SdwanController,
    #[strum(serialize = "unknown")]
    #[serde(rename = "unknown")]
    Unknown,
}

impl Platform {
    /// Map a testbed OS string to a platform, falling back to `Unknown`
    /// (which extraction treats as a skip, never a crash).
    pub fn from_os(os: &str) -> Self {
        os.parse().unwrap_or(Self::Unknown)
    }

    /// Platforms whose facts come from a controller API rather than
    /// per-device commands.
    pub fn is_controller(self) -> bool {
        matches!(self, Self::FabricController | Self::SdwanController)
    }
}

/// Normalized device uptime.
///
/// Platforms disagree wildly here: some report a free-text duration
/// (passed through unchanged), some a component breakdown, one a
/// colon-delimited triplet, one a boot timestamp in epoch milliseconds.
/// Everything except free text renders into the canonical
/// `"{days} days, {hours} hours, {minutes} minutes"` form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Uptime(String);

impl Uptime {
    /// A free-text duration, kept verbatim.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Canonical rendering of a component breakdown. Seconds are
    /// reported by some platforms but not rendered.
    pub fn from_components(days: u64, hours: u64, minutes: u64) -> Self {
        Self(format!("{days} days, {hours} hours, {minutes} minutes"))
    }

    /// Parse a colon-delimited `days:hours:minutes[:...]` string.
    ///
    /// Trailing segments (seconds, fractions) are ignored; fewer than
    /// three segments or a non-numeric segment yields `None`.
    pub fn from_colon_triplet(raw: &str) -> Option<Self> {
        let mut parts = raw.split(':');
        let days: u64 = parts.next()?.parse().ok()?;
        let hours: u64 = parts.next()?.parse().ok()?;
        let minutes: u64 = parts.next()?.parse().ok()?;
        Some(Self::from_components(days, hours, minutes))
    }

    /// Elapsed time since a boot timestamp in epoch milliseconds.
    ///
    /// `now` is injected so the conversion stays a pure function; a
    /// timestamp in the future (clock skew) yields `None`.
    pub fn from_epoch_millis(millis: i64, now: DateTime<Utc>) -> Option<Self> {
        let booted = DateTime::from_timestamp_millis(millis)?;
        let delta = now.signed_duration_since(booted);
        if delta < chrono::Duration::zero() {
            return None;
        }

        let days = u64::try_from(delta.num_days()).ok()?;
        let hours = u64::try_from(delta.num_hours() % 24).ok()?;
        let minutes = u64::try_from(delta.num_minutes() % 60).ok()?;
        Some(Self::from_components(days, hours, minutes))
    }

    /// The "N/A" sentinel (CLI extraction could not determine uptime).
    pub fn not_available() -> Self {
        Self(N_A.to_owned())
    }

    /// The "Unknown" sentinel (controller lookup failed for this node).
    pub fn unknown() -> Self {
        Self(UNKNOWN.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Uptime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The canonical fact record for one managed device.
///
/// Created once per device per run -- by [`crate::extract::extract`] for
/// CLI devices or [`crate::convert`] for controller nodes -- and
/// immutable thereafter; the aggregator only collects them into the
/// report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceFact {
    pub hostname: String,
    pub platform: Platform,
    /// `None` when the platform output carried no recognizable version.
    pub software_version: Option<String>,
    pub uptime: Uptime,
    /// Serial number, or the `"N/A"` / `"Unknown"` sentinel.
    pub serial_number: String,
}

impl DeviceFact {
    /// The version column value, with the `"N/A"` sentinel applied.
    pub fn version_or_na(&self) -> &str {
        self.software_version.as_deref().unwrap_or(N_A)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_from_os_known_values() {
        assert_eq!(Platform::from_os("iosxr"), Platform::IosXr);
        assert_eq!(Platform::from_os("iosxe"), Platform::IosXe);
        assert_eq!(Platform::from_os("nxos"), Platform::Nxos);
        assert_eq!(Platform::from_os("asa"), Platform::Asa);
        assert_eq!(Platform::from_os("ios"), Platform::Ios);
    }

    #[test]
    fn platform_from_os_unrecognized_is_unknown() {
        assert_eq!(Platform::from_os("junos"), Platform::Unknown);
        assert_eq!(Platform::from_os(""), Platform::Unknown);
    }

    #[test]
    fn uptime_components_render_canonically() {
        // NX-OS kernel_uptime example: seconds present but not rendered.
        let up = Uptime::from_components(0, 0, 24);
        assert_eq!(up.as_str(), "0 days, 0 hours, 24 minutes");
    }

    #[test]
    fn uptime_colon_triplet_parses_fixed_split() {
        let up = Uptime::from_colon_triplet("2:03:15").expect("three segments");
        assert_eq!(up.as_str(), "2 days, 3 hours, 15 minutes");
    }

    #[test]
    fn uptime_colon_triplet_ignores_trailing_seconds() {
        let up = Uptime::from_colon_triplet("05:22:31:15").expect("extra segments ok");
        assert_eq!(up.as_str(), "5 days, 22 hours, 31 minutes");
    }

    #[test]
    fn uptime_colon_triplet_rejects_short_input() {
        assert_eq!(Uptime::from_colon_triplet("2:03"), None);
        assert_eq!(Uptime::from_colon_triplet("garbage"), None);
    }

    #[test]
    fn uptime_epoch_millis_one_hour_ago() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).expect("valid timestamp");
        let booted_ms = (1_700_000_000 - 3600) * 1000;
        let up = Uptime::from_epoch_millis(booted_ms, now).expect("in the past");
        assert_eq!(up.as_str(), "0 days, 1 hours, 0 minutes");
    }

    #[test]
    fn uptime_epoch_millis_in_future_is_none() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).expect("valid timestamp");
        let booted_ms = (1_700_000_000 + 60) * 1000;
        assert_eq!(Uptime::from_epoch_millis(booted_ms, now), None);
    }
}
