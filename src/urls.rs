//! Probe a list of URLs and report which ones are down
//!
//! Each URL gets a blocking GET with a timeout. Anything but a `200` is a
//! failure. Network errors are retried, and just seeing one is enough to
//! downgrade an otherwise clean run to a warning.

use std::thread::sleep;
use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, warn};

use crate::error::PluginError;
use crate::Status;

/// How many attempts each URL gets before it counts as unreachable
pub const MAX_RETRIES: u32 = 1;
pub const DEFAULT_TIMEOUT_SECS: f64 = 5.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Target {
    /// The host part of the url, used when listing what was tested
    pub name: String,
    pub url: String,
}

impl Target {
    pub fn new(url: &str) -> Target {
        let url = url.trim();
        let name = url
            .replace("http://", "")
            .replace("https://", "")
            .split('/')
            .next()
            .unwrap_or("")
            .to_owned();
        Target {
            name,
            url: url.to_owned(),
        }
    }
}

/// Split a comma separated list of urls, ignoring blank entries
pub fn parse_targets(hostnames: &str) -> Vec<Target> {
    hostnames
        .split(',')
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(Target::new)
        .collect()
}

#[derive(Clone, Debug, PartialEq)]
pub enum ProbeOutcome {
    /// We got a response with this status code
    Response(u16),
    /// Every attempt failed before a response arrived
    Unreachable,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Probe {
    pub target: Target,
    pub outcome: ProbeOutcome,
    /// Network errors seen across all attempts
    pub errors: u32,
}

/// Build the HTTP client shared by every probe
pub fn client(timeout_secs: f64) -> Result<Client, PluginError> {
    if !timeout_secs.is_finite() || timeout_secs <= 0.0 {
        return Err(PluginError::InvalidTimeout(timeout_secs));
    }
    Ok(Client::builder()
        .timeout(Duration::from_secs_f64(timeout_secs))
        .build()?)
}

/// GET `target`, trying up to `attempts` times on network errors
pub fn probe(client: &Client, target: Target, attempts: u32, pause: Duration) -> Probe {
    let mut errors = 0;
    for attempt in 1..=attempts.max(1) {
        match client.get(&target.url).send() {
            Ok(response) => {
                let code = response.status().as_u16();
                debug!(url = %target.url, code, "probed");
                return Probe {
                    target,
                    outcome: ProbeOutcome::Response(code),
                    errors,
                };
            }
            Err(e) => {
                errors += 1;
                warn!(url = %target.url, attempt, "request failed: {}", e);
                if attempt < attempts {
                    sleep(pause);
                }
            }
        }
    }
    Probe {
        target,
        outcome: ProbeOutcome::Unreachable,
        errors,
    }
}

/// The combined result of probing every target
#[derive(Clone, Debug, PartialEq)]
pub struct UrlReport {
    pub status: Status,
    /// Why each failing url failed, in probe order
    pub reasons: Vec<String>,
    /// Whether any network error happened, even if a retry succeeded
    pub exceptions: bool,
    pub names: Vec<String>,
}

impl UrlReport {
    pub fn from_probes(probes: &[Probe]) -> UrlReport {
        let mut status = Status::Ok;
        let mut reasons = Vec::new();
        let mut exceptions = false;
        for probe in probes {
            let Target { ref name, ref url } = probe.target;
            if probe.errors > 0 {
                exceptions = true;
                status = status.escalate(Status::Warning);
            }
            match probe.outcome {
                ProbeOutcome::Unreachable => {
                    status = status.escalate(Status::Critical);
                    reasons.push(format!("Exception occured: {} ({})", url, name));
                }
                ProbeOutcome::Response(200) => {}
                ProbeOutcome::Response(code) => {
                    status = status.escalate(Status::Critical);
                    reasons.push(format!(
                        "Response status code: {} for URL: {} ({})",
                        code, url, name
                    ));
                }
            }
        }
        UrlReport {
            status,
            reasons,
            exceptions,
            names: probes.iter().map(|p| p.target.name.clone()).collect(),
        }
    }

    /// The single line to print
    pub fn message(&self) -> String {
        if !self.reasons.is_empty() {
            return format!("CRITICAL - {}", self.reasons.join("; "));
        }
        let exceptions = if self.exceptions {
            "[EXCEPTIONS OCCURED]"
        } else {
            ""
        };
        let names = self.names.join(", ");
        match self.status {
            Status::Ok => format!("OK - {}{} tested successfully", exceptions, names),
            Status::Warning => format!(
                "WARNING - {}{} tested successfully with warnings",
                exceptions, names
            ),
            Status::Critical => format!("CRITICAL - {}{} test Failed", exceptions, names),
            Status::Unknown => format!("UNKNOWN - {}{} test unknown result", exceptions, names),
        }
    }
}

/// Probe every url in `hostnames` and summarize
pub fn check(client: &Client, hostnames: &str) -> UrlReport {
    let probes: Vec<Probe> = parse_targets(hostnames)
        .into_iter()
        .map(|target| probe(client, target, MAX_RETRIES, Duration::from_secs(1)))
        .collect();
    UrlReport::from_probes(&probes)
}
