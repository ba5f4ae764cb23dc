//! Fetch instance health for a classic Elastic Load Balancer
//!
//! This shells out to `aws elb describe-instance-health` and only cares about
//! the `State` of each instance. Judging the result is left to
//! [`crate::health::classify`].

use serde::Deserialize;

use crate::aws::{self, AwsCredentials};
use crate::error::PluginError;
use crate::health::{StateCounts, Verdict};

/// The response body of `describe-instance-health`
#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct InstanceHealth {
    #[serde(default)]
    pub instance_states: Vec<InstanceState>,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct InstanceState {
    #[serde(default)]
    pub instance_id: String,
    pub state: String,
    #[serde(default)]
    pub reason_code: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl InstanceHealth {
    pub fn parse(json: &str) -> Result<InstanceHealth, PluginError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Tally the instances by state
    pub fn counts(&self, healthy_state: &str) -> StateCounts {
        StateCounts::from_states(healthy_state, self.instance_states.iter().map(|i| &i.state))
    }
}

/// Ask AWS for the health of every instance behind `load_balancer`
pub fn fetch_instance_health(
    aws_cli: &str,
    load_balancer: &str,
    region: &str,
    credentials: &AwsCredentials,
) -> Result<InstanceHealth, PluginError> {
    let body = aws::call(
        aws_cli,
        region,
        credentials,
        &[
            "elb",
            "describe-instance-health",
            "--load-balancer-name",
            load_balancer,
        ],
    )?;
    InstanceHealth::parse(&body)
}

/// `<STATUS> - ELB: <name>. <summary>[. Reason: ...] | <perf data>`
pub fn status_line(load_balancer: &str, verdict: &Verdict) -> String {
    let reason = if verdict.reasons.is_empty() {
        String::new()
    } else {
        format!(". Reason: {}", verdict.reasons.join(", "))
    };
    format!(
        "{} - ELB: {}. {}{} | {}",
        verdict.severity, load_balancer, verdict.display_summary, reason, verdict.perf_data
    )
}

pub fn fetch_error_line(load_balancer: &str, region: &str, err: &PluginError) -> String {
    format!(
        "Exception occured while fetching AWS ELB: {}, region: {}. Message: {}",
        load_balancer, region, err
    )
}
