//! Check the instance health of a classic Elastic Load Balancer

use structopt::StructOpt;
use tracing::error;

use nrpe_plugins::aws::AwsCredentials;
use nrpe_plugins::elb::{fetch_error_line, fetch_instance_health, status_line};
use nrpe_plugins::health::{classify, ThresholdConfig};
use nrpe_plugins::{logging, PluginError, Status};

/// Check the instance health of an AWS Elastic Load Balancer.
///
/// Alerts when the percentage or the number of instances in the healthy
/// state drops to or below the given levels.
#[derive(StructOpt, Debug)]
#[structopt(
    name = "check-elb-health (part of nrpe-plugins)",
    setting = structopt::clap::AppSettings::ColoredHelp
)]
struct Args {
    #[structopt(
        long = "aws-access-key",
        alias = "aws_access_key",
        env = "AWS_ACCESS_KEY_ID",
        hide_env_values = true,
        help = "AWS access key"
    )]
    aws_access_key: String,
    #[structopt(
        long = "aws-secret-access",
        alias = "aws_secret_access",
        env = "AWS_SECRET_ACCESS_KEY",
        hide_env_values = true,
        help = "AWS secret key"
    )]
    aws_secret_access: String,
    #[structopt(long, help = "AWS Elastic Load Balancer name to be checked")]
    loadbalancer: String,
    #[structopt(
        long,
        default_value = "us-east-1",
        help = "AWS region name in which load balancer is hosted"
    )]
    region: String,
    #[structopt(short = "w", long, default_value = "99", help = "Health warning level (in %)")]
    warning: f64,
    #[structopt(short = "c", long, default_value = "50", help = "Health critical level (in %)")]
    critical: f64,
    #[structopt(long, default_value = "1", help = "Healthy instance count warning level")]
    warningcount: u64,
    #[structopt(long, default_value = "0", help = "Healthy instance count critical level")]
    criticalcount: u64,
    #[structopt(
        long = "healthy-state",
        default_value = "InService",
        help = "The instance state that counts as healthy"
    )]
    healthy_state: String,
    #[structopt(
        long = "fetch-error",
        default_value = "critical",
        possible_values = &Status::str_values(),
        help = "Status to exit with when the load balancer can't be queried"
    )]
    fetch_error: Status,
    #[structopt(long = "aws-cli", default_value = "aws", help = "The aws command line tool to use")]
    aws_cli: String,
}

/// Validate everything the user gave us before talking to AWS
fn validate(args: &Args) -> Result<(ThresholdConfig, AwsCredentials), PluginError> {
    let config = ThresholdConfig::new(args.warning, args.critical, args.warningcount, args.criticalcount)?;
    let credentials = AwsCredentials::new(&args.aws_access_key, &args.aws_secret_access)?;
    Ok((config, credentials))
}

#[cfg_attr(test, allow(dead_code))]
fn main() {
    logging::init();
    let args: Args = nrpe_plugins::parse_args();
    let (config, credentials) = validate(&args).unwrap_or_else(|e| {
        println!("{}", e);
        Status::Unknown.exit();
    });

    let health = fetch_instance_health(&args.aws_cli, &args.loadbalancer, &args.region, &credentials)
        .unwrap_or_else(|e| {
            error!("ELB health check: {}", e);
            println!("{}", fetch_error_line(&args.loadbalancer, &args.region, &e));
            args.fetch_error.exit();
        });

    let verdict = classify(&health.counts(&args.healthy_state), &config);
    println!("{}", status_line(&args.loadbalancer, &verdict));
    verdict.severity.exit();
}

#[cfg(test)]
mod test {
    use structopt::StructOpt;

    use super::{validate, Args};
    use nrpe_plugins::Status;

    fn build_args(argv: Vec<&str>) -> Args {
        Args::from_iter(argv.into_iter())
    }

    #[test]
    fn defaults() {
        let args = build_args(vec![
            "check-elb-health",
            "--aws-access-key=key",
            "--aws-secret-access=secret",
            "--loadbalancer=frontend",
        ]);
        assert_eq!(args.region, "us-east-1");
        assert_eq!((args.warning, args.critical), (99.0, 50.0));
        assert_eq!((args.warningcount, args.criticalcount), (1, 0));
        assert_eq!(args.healthy_state, "InService");
        assert_eq!(args.fetch_error, Status::Critical);
        assert!(validate(&args).is_ok());
    }

    #[test]
    fn underscore_flags_still_work() {
        let args = build_args(vec![
            "check-elb-health",
            "--aws_access_key",
            "key",
            "--aws_secret_access",
            "secret",
            "--loadbalancer",
            "frontend",
            "--warning",
            "80",
            "--criticalcount",
            "2",
            "--warningcount",
            "3",
        ]);
        assert_eq!(args.aws_access_key, "key");
        assert_eq!(args.warning, 80.0);
        assert_eq!(args.criticalcount, 2);
    }

    #[test]
    fn inverted_thresholds_are_rejected() {
        let args = build_args(vec![
            "check-elb-health",
            "--aws-access-key=key",
            "--aws-secret-access=secret",
            "--loadbalancer=frontend",
            "-w",
            "40",
            "-c",
            "60",
        ]);
        match validate(&args) {
            Err(e) => assert_eq!(e.to_string(), "option --warning(40) must be greater than --critical(60)"),
            Ok(_) => panic!("warning below critical should not validate"),
        }
    }

    #[test]
    fn fetch_error_status_is_configurable() {
        let args = build_args(vec![
            "check-elb-health",
            "--aws-access-key=key",
            "--aws-secret-access=secret",
            "--loadbalancer=frontend",
            "--fetch-error=unknown",
        ]);
        assert_eq!(args.fetch_error, Status::Unknown);
    }
}
