//! Send a host or service alert email through Amazon SES

use std::process;

use chrono::Utc;
use structopt::StructOpt;
use tracing::error;

use nrpe_plugins::aws::AwsCredentials;
use nrpe_plugins::ses::{deliver, AwsCliMailer, Email, Notification, NotificationKind};
use nrpe_plugins::{logging, PluginError};

/// Send email notifications using Amazon SES.
///
/// Regions are tried in random order until one accepts the email.
#[derive(StructOpt, Debug)]
#[structopt(
    name = "notify-ses (part of nrpe-plugins)",
    setting = structopt::clap::AppSettings::ColoredHelp
)]
struct Args {
    #[structopt(
        long = "aws-region",
        alias = "aws_region",
        default_value = "us-east-1",
        help = "Comma separated AWS region names to send through. One is picked at \
                random, the others are used on failure."
    )]
    aws_region: String,
    #[structopt(
        long = "aws-access-key-id",
        alias = "aws_access_key_id",
        env = "AWS_ACCESS_KEY_ID",
        hide_env_values = true,
        help = "AWS access key"
    )]
    aws_access_key_id: Option<String>,
    #[structopt(
        long = "aws-secret-access-key",
        alias = "aws_secret_access_key",
        env = "AWS_SECRET_ACCESS_KEY",
        hide_env_values = true,
        help = "AWS secret key"
    )]
    aws_secret_access_key: Option<String>,
    #[structopt(long = "notification-for", alias = "notification_for", help = "host or service")]
    notification_for: NotificationKind,
    #[structopt(long, help = "To email address, comma separated for several")]
    to: Option<String>,
    #[structopt(long = "from-address", alias = "from_address", help = "From email address")]
    from_address: Option<String>,
    #[structopt(long = "reply-to", alias = "reply_to", help = "reply-to email address")]
    reply_to: Option<String>,
    #[structopt(long = "aws-cli", default_value = "aws", help = "The aws command line tool to use")]
    aws_cli: String,
    #[structopt(flatten)]
    notification: Notification,
}

/// Check the sender side and render the email, in that order
fn prepare(args: &Args, now: i64) -> Result<(AwsCredentials, Email), PluginError> {
    let credentials = AwsCredentials::new(
        args.aws_access_key_id.as_deref().unwrap_or(""),
        args.aws_secret_access_key.as_deref().unwrap_or(""),
    )?;
    let to = args.to.as_deref().unwrap_or("");
    let prepared = args.notification.prepare(args.notification_for, to, now)?;
    let email = Email::new(
        args.from_address.as_deref().unwrap_or(""),
        to,
        args.reply_to.as_deref(),
        &prepared,
    )?;
    Ok((credentials, email))
}

fn send(args: &Args) -> Result<(), PluginError> {
    let (credentials, email) = prepare(args, Utc::now().timestamp())?;
    let mut mailer = AwsCliMailer {
        aws_cli: args.aws_cli.clone(),
        credentials,
    };
    deliver(&mut mailer, &args.aws_region, &email, &mut rand::thread_rng())?;
    Ok(())
}

#[cfg_attr(test, allow(dead_code))]
fn main() {
    logging::init();
    let args: Args = nrpe_plugins::try_parse_args().unwrap_or_else(|summary| {
        println!("{}", summary);
        process::exit(1);
    });
    if let Err(e) = send(&args) {
        error!("notify-ses to {:?}: {}", args.to, e);
        println!("{}", e);
        process::exit(1);
    }
}
