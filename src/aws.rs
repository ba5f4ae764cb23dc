//! Call the AWS command line tool with explicit credentials

use crate::command;
use crate::error::PluginError;

pub const DEFAULT_REGION: &str = "us-east-1";

#[derive(Clone, Debug, PartialEq)]
pub struct AwsCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl AwsCredentials {
    pub fn new(access_key_id: &str, secret_access_key: &str) -> Result<AwsCredentials, PluginError> {
        let (access_key_id, secret_access_key) = (access_key_id.trim(), secret_access_key.trim());
        if access_key_id.is_empty() || secret_access_key.is_empty() {
            return Err(PluginError::MissingCredentials);
        }
        Ok(AwsCredentials {
            access_key_id: access_key_id.to_owned(),
            secret_access_key: secret_access_key.to_owned(),
        })
    }
}

/// `aws <args...> --region <region> --output json`, returning stdout
pub fn call(
    aws_cli: &str,
    region: &str,
    credentials: &AwsCredentials,
    args: &[&str],
) -> Result<String, PluginError> {
    let full_args = args
        .iter()
        .cloned()
        .chain(vec!["--region", region, "--output", "json"]);
    command::run(
        aws_cli,
        full_args,
        &[
            ("AWS_ACCESS_KEY_ID", credentials.access_key_id.as_str()),
            ("AWS_SECRET_ACCESS_KEY", credentials.secret_access_key.as_str()),
        ],
    )
}
