//! Turn per-state instance counts into a Nagios verdict
//!
//! The load balancer check gets back a list of instance states (`InService`,
//! `OutOfService`, ...). Health is judged on two independent axes, the
//! percentage of instances in the healthy state and the absolute number of
//! them, each with its own warning and critical threshold. Being *at or
//! below* a threshold trips it.
//!
//! [`classify`] does no I/O and keeps no state between calls, so it is safe to
//! call from anywhere with any data:
//!
//! ```rust
//! use nrpe_plugins::health::{classify, StateCounts, ThresholdConfig};
//! use nrpe_plugins::Status;
//!
//! let counts = StateCounts::from_states("InService", vec!["InService", "OutOfService"]);
//! let config = ThresholdConfig::new(99.0, 50.0, 1, 0).unwrap();
//! let verdict = classify(&counts, &config);
//! assert_eq!(verdict.severity, Status::Critical);
//! assert_eq!(verdict.display_summary, "Total: 2; InService: 1; OutOfService: 1");
//! ```

use itertools::Itertools;

use crate::error::PluginError;
use crate::Status;

pub const DEFAULT_HEALTHY_STATE: &str = "InService";
const TOTAL_KEY: &str = "Total";

/// Warning and critical levels for both health axes
///
/// Construct with [`ThresholdConfig::new`] to get the ordering checked. The
/// fields are public so callers that already validated can build one
/// directly; `classify` trusts whatever it is given.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThresholdConfig {
    /// Healthy percentage (0-100) at or below which we warn
    pub percent_warning: f64,
    /// Healthy percentage (0-100) at or below which we go critical
    pub percent_critical: f64,
    pub count_warning: u64,
    pub count_critical: u64,
}

impl ThresholdConfig {
    pub fn new(
        percent_warning: f64,
        percent_critical: f64,
        count_warning: u64,
        count_critical: u64,
    ) -> Result<ThresholdConfig, PluginError> {
        for &(flag, value) in &[("warning", percent_warning), ("critical", percent_critical)] {
            if !(0.0..=100.0).contains(&value) {
                return Err(PluginError::PercentOutOfRange { flag, value });
            }
        }
        if percent_warning < percent_critical {
            return Err(PluginError::PercentThresholds {
                warning: percent_warning,
                critical: percent_critical,
            });
        }
        if count_warning < count_critical {
            return Err(PluginError::CountThresholds {
                warning: count_warning,
                critical: count_critical,
            });
        }
        Ok(ThresholdConfig {
            percent_warning,
            percent_critical,
            count_warning,
            count_critical,
        })
    }
}

/// How many instances were seen in each state
///
/// States keep the order they were first seen in, which is the order they
/// get displayed in after `Total` and the healthy state.
#[derive(Clone, Debug, PartialEq)]
pub struct StateCounts {
    healthy_state: String,
    states: Vec<(String, u64)>,
}

impl StateCounts {
    pub fn new<S: Into<String>>(healthy_state: S) -> StateCounts {
        StateCounts {
            healthy_state: healthy_state.into(),
            states: Vec::new(),
        }
    }

    /// Count every observed state, one instance each
    pub fn from_states<S, I>(healthy_state: &str, observed: I) -> StateCounts
    where
        S: AsRef<str>,
        I: IntoIterator<Item = S>,
    {
        let mut counts = StateCounts::new(healthy_state);
        for state in observed {
            counts.record(state.as_ref());
        }
        counts
    }

    /// Record a single instance in `state`
    pub fn record(&mut self, state: &str) {
        self.insert(state, 1);
    }

    /// Add `n` instances to `state`. Surrounding whitespace is not part of
    /// the state name.
    pub fn insert(&mut self, state: &str, n: u64) {
        let state = state.trim();
        match self.states.iter_mut().find(|(name, _)| name == state) {
            Some(entry) => entry.1 += n,
            None => self.states.push((state.to_owned(), n)),
        }
    }

    pub fn healthy_state(&self) -> &str {
        &self.healthy_state
    }

    pub fn get(&self, state: &str) -> Option<u64> {
        self.states
            .iter()
            .find(|(name, _)| name == state)
            .map(|&(_, count)| count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.states.iter().map(|(name, count)| (name.as_str(), *count))
    }

    pub fn total(&self) -> u64 {
        self.states.iter().map(|&(_, count)| count).sum()
    }

    /// Instances in the healthy state, zero if none were seen
    pub fn healthy(&self) -> u64 {
        self.get(&self.healthy_state).unwrap_or(0)
    }

    /// Percent of instances that are healthy. Zero when there are no
    /// instances at all.
    pub fn healthy_percent(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.healthy() as f64 * 100.0 / total as f64
        }
    }

    /// `Total: n; <healthy>: n; <other>: n; ...`
    ///
    /// The healthy state is always shown, even when no instance was in it.
    pub fn display_summary(&self) -> String {
        let leading = vec![
            (TOTAL_KEY, self.total()),
            (self.healthy_state.as_str(), self.healthy()),
        ];
        leading
            .into_iter()
            .chain(self.iter())
            .unique_by(|&(name, _)| name)
            .map(|(name, count)| format!("{}: {}", name, count))
            .join("; ")
    }
}

/// The outcome of a single classification
#[derive(Clone, Debug, PartialEq)]
pub struct Verdict {
    pub severity: Status,
    /// One entry per tripped threshold, percentage checks first
    pub reasons: Vec<String>,
    pub healthy_percent: f64,
    pub display_summary: String,
    /// `inservice=<percent>%;<warning>;<critical>`
    pub perf_data: String,
}

/// Judge `counts` against `config`
///
/// The percentage check runs first, then the count check. Severity only
/// ever moves up within one call, so a count warning after a percentage
/// critical adds a reason but leaves the verdict critical.
pub fn classify(counts: &StateCounts, config: &ThresholdConfig) -> Verdict {
    let state = counts.healthy_state();
    let healthy = counts.healthy();
    let healthy_percent = counts.healthy_percent();

    let mut severity = Status::Ok;
    let mut reasons = Vec::new();

    if healthy_percent <= config.percent_critical {
        severity = severity.escalate(Status::Critical);
        reasons.push(format!("{} count <= {}% (CR)", state, config.percent_critical));
    } else if healthy_percent <= config.percent_warning {
        severity = severity.escalate(Status::Warning);
        reasons.push(format!("{} count <= {}% (WR)", state, config.percent_warning));
    }

    if healthy <= config.count_critical {
        severity = severity.escalate(Status::Critical);
        reasons.push(format!("{} count <= {}(CR)", state, config.count_critical));
    } else if healthy <= config.count_warning {
        severity = severity.escalate(Status::Warning);
        reasons.push(format!("{} count <= {}(WR)", state, config.count_warning));
    }

    Verdict {
        severity,
        reasons,
        healthy_percent,
        display_summary: counts.display_summary(),
        perf_data: format!(
            "inservice={}%;{};{}",
            healthy_percent, config.percent_warning, config.percent_critical
        ),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn config() -> ThresholdConfig {
        ThresholdConfig::new(99.0, 50.0, 1, 0).unwrap()
    }

    fn counts(states: &[(&str, u64)]) -> StateCounts {
        let mut counts = StateCounts::new(DEFAULT_HEALTHY_STATE);
        for &(state, n) in states {
            counts.insert(state, n);
        }
        counts
    }

    #[test]
    fn threshold_ordering_is_validated() {
        match ThresholdConfig::new(40.0, 50.0, 1, 0) {
            Err(PluginError::PercentThresholds { warning, critical }) => {
                assert_eq!((warning, critical), (40.0, 50.0))
            }
            other => panic!("expected a percent error, got {:?}", other),
        }
        match ThresholdConfig::new(99.0, 50.0, 0, 1) {
            Err(e @ PluginError::CountThresholds { .. }) => assert_eq!(
                e.to_string(),
                "option --warningcount(0) must be greater than --criticalcount(1)"
            ),
            other => panic!("expected a count error, got {:?}", other),
        }
        assert!(ThresholdConfig::new(50.0, 50.0, 1, 1).is_ok());
    }

    #[test]
    fn percent_thresholds_must_be_percentages() {
        assert!(ThresholdConfig::new(101.0, 50.0, 1, 0).is_err());
        assert!(ThresholdConfig::new(99.0, -1.0, 1, 0).is_err());
        assert!(ThresholdConfig::new(std::f64::NAN, 50.0, 1, 0).is_err());
    }

    #[test]
    fn record_trims_and_accumulates() {
        let counts = StateCounts::from_states(
            "InService",
            vec!["InService ", "OutOfService", " InService", "Unknown"],
        );
        assert_eq!(counts.get("InService"), Some(2));
        assert_eq!(counts.total(), 4);
        assert_eq!(counts.healthy(), 2);
        let order: Vec<_> = counts.iter().map(|(name, _)| name).collect();
        assert_eq!(order, ["InService", "OutOfService", "Unknown"]);
    }

    #[test]
    fn summary_puts_total_and_healthy_first() {
        let c = counts(&[("OutOfService", 2), ("Unknown", 1), ("InService", 4)]);
        assert_eq!(
            c.display_summary(),
            "Total: 7; InService: 4; OutOfService: 2; Unknown: 1"
        );
    }

    #[test]
    fn summary_shows_missing_healthy_state_as_zero() {
        let c = counts(&[("OutOfService", 2)]);
        assert_eq!(c.display_summary(), "Total: 2; InService: 0; OutOfService: 2");
        assert_eq!(counts(&[]).display_summary(), "Total: 0; InService: 0");
    }

    #[test]
    fn all_healthy_is_ok() {
        let verdict = classify(&counts(&[("InService", 3), ("OutOfService", 0)]), &config());
        assert_eq!(verdict.severity, Status::Ok);
        assert_eq!(verdict.healthy_percent, 100.0);
        assert!(verdict.reasons.is_empty());
        assert_eq!(verdict.display_summary, "Total: 3; InService: 3; OutOfService: 0");
        assert_eq!(verdict.perf_data, "inservice=100%;99;50");
    }

    #[test]
    fn percent_warning_alone() {
        let verdict = classify(&counts(&[("InService", 99), ("OutOfService", 1)]), &config());
        assert_eq!(verdict.severity, Status::Warning);
        assert_eq!(verdict.reasons, ["InService count <= 99% (WR)"]);
    }

    #[test]
    fn count_critical_with_percent_warning_is_critical() {
        let config = ThresholdConfig::new(99.0, 10.0, 5, 2).unwrap();
        let verdict = classify(&counts(&[("InService", 2), ("OutOfService", 1)]), &config);
        assert_eq!(verdict.severity, Status::Critical);
        assert_eq!(
            verdict.reasons,
            ["InService count <= 99% (WR)", "InService count <= 2(CR)"]
        );
    }

    #[test]
    fn custom_healthy_state_names_reasons() {
        let mut c = StateCounts::new("healthy");
        c.insert("healthy", 1);
        c.insert("unhealthy", 3);
        let verdict = classify(&c, &config());
        assert_eq!(verdict.reasons[0], "healthy count <= 50% (CR)");
        assert_eq!(verdict.display_summary, "Total: 4; healthy: 1; unhealthy: 3");
    }

    #[test]
    fn fractional_percent_in_perf_data() {
        let verdict = classify(&counts(&[("InService", 1), ("OutOfService", 2)]), &config());
        assert_eq!(
            verdict.perf_data,
            format!("inservice={}%;99;50", 100.0_f64 / 3.0)
        );
    }
}
