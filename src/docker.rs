//! Find running docker containers for an image and how old they are

use chrono::{NaiveDateTime, Utc};

use crate::command;
use crate::error::PluginError;
use crate::Status;

#[derive(Clone, Debug, PartialEq)]
pub struct Container {
    pub id: String,
    pub image: String,
}

impl Container {
    /// Containers count for `image_name` when they run any tag of it
    pub fn runs_image(&self, image_name: &str) -> bool {
        self.image.starts_with(&format!("{}:", image_name))
    }
}

/// Parse `docker ps --format '{{.ID}}\t{{.Image}}'` output
pub fn parse_ps(output: &str) -> Vec<Container> {
    output
        .lines()
        .filter_map(|line| {
            let mut parts = line.trim().splitn(2, '\t');
            match (parts.next(), parts.next()) {
                (Some(id), Some(image)) if !id.is_empty() => Some(Container {
                    id: id.to_owned(),
                    image: image.trim().to_owned(),
                }),
                _ => None,
            }
        })
        .collect()
}

/// Running containers whose image is some tag of `image_name`
pub fn running_containers(docker: &str, image_name: &str) -> Result<Vec<Container>, PluginError> {
    let out = command::run(
        docker,
        &["ps", "--no-trunc", "--format", "{{.ID}}\t{{.Image}}"],
        &[],
    )?;
    Ok(parse_ps(&out)
        .into_iter()
        .filter(|c| c.runs_image(image_name))
        .collect())
}

/// Creation time of each container, in the order given
pub fn creation_times(docker: &str, containers: &[Container]) -> Result<Vec<NaiveDateTime>, PluginError> {
    if containers.is_empty() {
        return Ok(Vec::new());
    }
    let mut args = vec!["inspect", "--format", "{{.Created}}"];
    args.extend(containers.iter().map(|c| c.id.as_str()));
    command::run(docker, &args, &[])?
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_created)
        .collect()
}

/// Parse docker's `Created` field, dropping fractional seconds and zone
///
/// Docker always reports these in UTC.
pub fn parse_created(raw: &str) -> Result<NaiveDateTime, PluginError> {
    let whole_seconds = raw
        .trim()
        .split(|c: char| c == '.' || c == 'Z' || c == '+')
        .next()
        .unwrap_or("");
    NaiveDateTime::parse_from_str(whole_seconds, "%Y-%m-%dT%H:%M:%S").map_err(|source| {
        PluginError::Timestamp {
            raw: raw.to_owned(),
            source,
        }
    })
}

/// Say how long ago `then` was, like "3 minutes ago" or "Yesterday"
///
/// Times in the future give an empty string.
pub fn pretty_date(then: NaiveDateTime, now: NaiveDateTime) -> String {
    let diff = (now - then).num_seconds();
    let day_diff = diff.div_euclid(86_400);
    let second_diff = diff.rem_euclid(86_400);

    if day_diff < 0 {
        return String::new();
    }
    if day_diff == 0 {
        return match second_diff {
            s if s < 10 => "just now".to_owned(),
            s if s < 60 => format!("{} seconds ago", s),
            s if s < 120 => "a minute ago".to_owned(),
            s if s < 3600 => format!("{} minutes ago", s / 60),
            s if s < 7200 => "an hour ago".to_owned(),
            s => format!("{} hours ago", s / 3600),
        };
    }
    match day_diff {
        1 => "Yesterday".to_owned(),
        d if d < 7 => format!("{} days ago", d),
        d if d < 31 => format!("{} weeks ago", d / 7),
        d if d < 365 => format!("{} months ago", d / 30),
        d => format!("{} years ago", d / 365),
    }
}

/// The status and output line for a set of container creation times
pub fn summarize(created: &[NaiveDateTime], now: NaiveDateTime) -> (Status, String) {
    let newest = match created.iter().max() {
        Some(newest) => *newest,
        None => {
            return (
                Status::Critical,
                "CRITICAL: No running containers | containers=0".to_owned(),
            )
        }
    };
    let count = created.len();
    let started = pretty_date(newest, now);
    let line = if count == 1 {
        format!(
            "OK: {} running container, started: {} | containers={}",
            count, started, count
        )
    } else {
        format!(
            "OK: {} running containers, newest one started: {} | containers={}",
            count, started, count
        )
    };
    (Status::Ok, line)
}

/// Everything `check-docker-containers` does short of printing and exiting
pub fn check(docker: &str, image_name: &str) -> Result<(Status, String), PluginError> {
    let containers = running_containers(docker, image_name)?;
    let created = creation_times(docker, &containers)?;
    Ok(summarize(&created, Utc::now().naive_utc()))
}
