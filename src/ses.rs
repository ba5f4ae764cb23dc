//! Send alert emails through Amazon SES
//!
//! Meant to be wired up as a notification command in Nagios or Shinken. The
//! monitoring data arrives as flags, gets tidied up into a [`Prepared`]
//! notification, and is rendered into a plain-text email. Sending picks a
//! random region from the configured list and fails over to the others.

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use structopt::StructOpt;
use tracing::{info, warn};

use crate::aws::{self, AwsCredentials, DEFAULT_REGION};
use crate::error::PluginError;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NotificationKind {
    Host,
    Service,
}

impl FromStr for NotificationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<NotificationKind, String> {
        match s.to_ascii_lowercase().as_ref() {
            "host" => Ok(NotificationKind::Host),
            "service" => Ok(NotificationKind::Service),
            _ => Err(format!("expected 'host' or 'service', got {:?}", s)),
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            NotificationKind::Host => write!(f, "Host"),
            NotificationKind::Service => write!(f, "Service"),
        }
    }
}

/// The monitoring data an alert is about, as handed over by the monitoring
/// system's notification macros
#[derive(Clone, Debug, Default, StructOpt)]
pub struct Notification {
    #[structopt(long = "attempt-no", alias = "attempt_no", help = "Host/service check attempt number")]
    pub attempt_no: Option<String>,
    #[structopt(long, help = "Duration of current state")]
    pub duration: Option<String>,
    #[structopt(long = "full-message", alias = "full_message", help = "Host/service check full output")]
    pub full_message: Option<String>,
    #[structopt(long = "host-address", alias = "host_address", help = "Host address")]
    pub host_address: Option<String>,
    #[structopt(long = "host-alias", alias = "host_alias", help = "Host alias")]
    pub host_alias: Option<String>,
    #[structopt(long = "host-group", alias = "host_group", help = "Hostgroup name")]
    pub host_group: Option<String>,
    #[structopt(long = "host-group-names", alias = "host_group_names", help = "Current host hostgroup names")]
    pub host_group_names: Option<String>,
    #[structopt(long = "host-name", alias = "host_name", help = "Host Name")]
    pub host_name: Option<String>,
    #[structopt(
        long = "host-private-address",
        alias = "host_private_address",
        help = "Host private ip, if configured"
    )]
    pub host_private_address: Option<String>,
    #[structopt(long = "last-check", alias = "last_check", help = "Last check epoch timestamp")]
    pub last_check: Option<String>,
    #[structopt(long = "long-date-time", alias = "long_date_time", help = "Date time in long format")]
    pub long_date_time: Option<String>,
    #[structopt(long = "max-attempt", alias = "max_attempt", help = "Max check attempt")]
    pub max_attempt: Option<String>,
    #[structopt(long, help = "First line of check output")]
    pub message: Option<String>,
    #[structopt(long = "notification-type", alias = "notification_type", help = "Notification type")]
    pub notification_type: Option<String>,
    #[structopt(
        long = "percent-changes",
        alias = "percent_changes",
        help = "Percent change indicating state change frequency"
    )]
    pub percent_changes: Option<String>,
    #[structopt(
        long = "scheduled-downtime",
        alias = "scheduled_downtime",
        help = "A number indicating the depth of current downtime"
    )]
    pub scheduled_downtime: Option<String>,
    #[structopt(long = "service-name", alias = "service_name", help = "Service check name")]
    pub service_name: Option<String>,
    #[structopt(long, help = "Current state/status")]
    pub state: Option<String>,
    #[structopt(long = "state-type", alias = "state_type", help = "Hard or Soft state")]
    pub state_type: Option<String>,
}

/// Notification data cleaned up for display. Missing values are `-`.
#[derive(Clone, Debug, PartialEq)]
pub struct Prepared {
    pub kind: NotificationKind,
    /// Greeting name, derived from the recipient address
    pub name: String,
    pub attempt_no: String,
    pub duration: String,
    pub full_message: String,
    pub host_address: String,
    pub host_alias: String,
    pub host_group: String,
    pub host_group_names: String,
    pub host_name: String,
    pub host_private_address: String,
    /// Seconds since the last check ran
    pub last_check: String,
    pub long_date_time: String,
    pub max_attempt: String,
    pub message: String,
    pub notification_type: String,
    pub percent_changes: String,
    pub scheduled_downtime: String,
    pub service_name: String,
    pub state: String,
    pub state_type: String,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn or_dash(value: Option<&str>) -> String {
    value.map_or_else(|| "-".to_owned(), |v| v.trim().to_owned())
}

/// Capitalize the first letter of every word, lowercase the rest
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut start_of_word = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if start_of_word {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            start_of_word = false;
        } else {
            out.push(c);
            start_of_word = true;
        }
    }
    out
}

impl Notification {
    /// Tidy the raw data up for display
    ///
    /// `now` is the current unix time, used to turn `last_check` into an age.
    pub fn prepare(&self, kind: NotificationKind, to: &str, now: i64) -> Result<Prepared, PluginError> {
        let name = to
            .split(',')
            .next()
            .and_then(|first| first.split('@').next())
            .map(title_case)
            .filter(|n| !n.trim().is_empty());

        let last_check = match present(&self.last_check) {
            Some(raw) => {
                let then: f64 = raw
                    .parse()
                    .map_err(|_| PluginError::Email(format!("invalid --last-check {:?}", raw)))?;
                Some((now as f64 - then) as i64)
            }
            None => None,
        };

        let scheduled_downtime = match present(&self.scheduled_downtime) {
            Some(raw) if raw.parse::<f64>().map_or(true, |depth| depth != 0.0) => {
                format!("Yes. {} seconds inside downtime window", raw)
            }
            _ => "No".to_owned(),
        };

        let message = present(&self.message);
        let full_message = match (message, present(&self.full_message)) {
            (Some(first), Some(rest)) => Some(format!("{}\n{}", first, rest)),
            (first, None) => first.map(str::to_owned),
            (None, Some(rest)) => Some(rest.to_owned()),
        };

        let percent_changes = match present(&self.percent_changes) {
            Some(raw) => {
                let pct: f64 = raw
                    .parse()
                    .map_err(|_| PluginError::Email(format!("invalid --percent-changes {:?}", raw)))?;
                Some(((pct * 100.0).round() / 100.0).to_string())
            }
            None => None,
        };

        Ok(Prepared {
            kind,
            name: or_dash(name.as_deref()),
            attempt_no: or_dash(present(&self.attempt_no)),
            duration: or_dash(present(&self.duration)),
            full_message: or_dash(full_message.as_deref()),
            host_address: or_dash(present(&self.host_address)),
            host_alias: or_dash(present(&self.host_alias)),
            host_group: or_dash(present(&self.host_group)),
            host_group_names: or_dash(present(&self.host_group_names)),
            host_name: or_dash(present(&self.host_name)),
            host_private_address: or_dash(present(&self.host_private_address)),
            last_check: or_dash(last_check.map(|age| age.to_string()).as_deref()),
            long_date_time: or_dash(present(&self.long_date_time)),
            max_attempt: or_dash(present(&self.max_attempt)),
            message: or_dash(message),
            notification_type: or_dash(present(&self.notification_type)),
            percent_changes: or_dash(percent_changes.as_deref()),
            scheduled_downtime,
            service_name: or_dash(present(&self.service_name)),
            state: or_dash(present(&self.state)),
            state_type: or_dash(present(&self.state_type)),
        })
    }
}

impl Prepared {
    pub fn subject(&self) -> String {
        match self.kind {
            NotificationKind::Host => format!(
                "** {} Host Alert: {} is {} **",
                self.notification_type, self.host_name, self.state
            ),
            NotificationKind::Service => format!(
                "** {} Service Alert: {}/{} is {} **",
                self.notification_type, self.host_name, self.service_name, self.state
            ),
        }
    }

    pub fn body(&self) -> String {
        let mut fields = vec![("Notification Type", &self.notification_type)];
        if self.kind == NotificationKind::Service {
            fields.push(("Service", &self.service_name));
        }
        fields.extend(vec![
            ("Host", &self.host_name),
            ("Alias", &self.host_alias),
            ("Address", &self.host_address),
            ("Private Address", &self.host_private_address),
            ("Host Group", &self.host_group),
            ("Host Groups", &self.host_group_names),
            ("State", &self.state),
            ("State Type", &self.state_type),
            ("Attempt", &self.attempt_no),
            ("Max Attempts", &self.max_attempt),
            ("Duration", &self.duration),
            ("Last Check (seconds ago)", &self.last_check),
            ("Percent State Change", &self.percent_changes),
            ("Scheduled Downtime", &self.scheduled_downtime),
            ("Date/Time", &self.long_date_time),
        ]);

        let mut body = format!("Hi {},\n\n{} {} alert.\n\n", self.name, self.kind, self.notification_type);
        for (key, value) in fields {
            body.push_str(&format!("{}: {}\n", key, value));
        }
        body.push_str(&format!("\nOutput:\n{}\n", self.full_message));
        body
    }
}

/// A rendered email, ready to hand to SES
#[derive(Clone, Debug, PartialEq)]
pub struct Email {
    pub from: String,
    pub to: Vec<String>,
    pub reply_to: Vec<String>,
    pub subject: String,
    pub body: String,
}

fn split_addresses(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(str::to_owned)
        .collect()
}

impl Email {
    pub fn new(from: &str, to: &str, reply_to: Option<&str>, prepared: &Prepared) -> Result<Email, PluginError> {
        let from = from.trim();
        if from.is_empty() {
            return Err(PluginError::Email("Source email address not defined".to_owned()));
        }
        let to = split_addresses(to);
        if to.is_empty() {
            return Err(PluginError::Email("No destination specified".to_owned()));
        }
        Ok(Email {
            from: from.to_owned(),
            to,
            reply_to: reply_to.map(split_addresses).unwrap_or_default(),
            subject: prepared.subject(),
            body: prepared.body(),
        })
    }
}

/// Something that can put an email on the wire in a given region
pub trait Mailer {
    fn send(&mut self, region: &str, email: &Email) -> Result<(), PluginError>;
}

/// Sends through `aws ses send-email`
pub struct AwsCliMailer {
    pub aws_cli: String,
    pub credentials: AwsCredentials,
}

impl Mailer for AwsCliMailer {
    fn send(&mut self, region: &str, email: &Email) -> Result<(), PluginError> {
        let mut args = vec!["ses", "send-email", "--from", email.from.as_str(), "--to"];
        args.extend(email.to.iter().map(String::as_str));
        args.extend(vec!["--subject", email.subject.as_str(), "--text", email.body.as_str()]);
        if !email.reply_to.is_empty() {
            args.push("--reply-to-addresses");
            args.extend(email.reply_to.iter().map(String::as_str));
        }
        aws::call(&self.aws_cli, region, &self.credentials, &args).map(|_| ())
    }
}

/// Pick a region at random from a comma separated list, skipping `failed`
///
/// An empty list means the default region. Returns `None` once every
/// region has failed.
pub fn select_region<R: Rng>(regions: &str, failed: &[String], rng: &mut R) -> Option<String> {
    let mut candidates: Vec<&str> = regions
        .split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .collect();
    if candidates.is_empty() {
        candidates.push(DEFAULT_REGION);
    }
    candidates.retain(|r| !failed.iter().any(|f| f.as_str() == *r));
    candidates.choose(rng).map(|r| (*r).to_owned())
}

/// Send `email`, failing over between regions until one works
///
/// Returns the region that accepted the email.
pub fn deliver<M: Mailer, R: Rng>(
    mailer: &mut M,
    regions: &str,
    email: &Email,
    rng: &mut R,
) -> Result<String, PluginError> {
    let mut failed = Vec::new();
    while let Some(region) = select_region(regions, &failed, rng) {
        match mailer.send(&region, email) {
            Ok(()) => {
                info!(%region, to = ?email.to, subject = %email.subject, "email sent");
                return Ok(region);
            }
            Err(e) => {
                warn!(%region, "email failed, trying another SES region: {}", e);
                failed.push(region);
            }
        }
    }
    Err(PluginError::Email("Cannot send email. All regions failed".to_owned()))
}
