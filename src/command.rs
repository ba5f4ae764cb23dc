//! Run the external tools the checks lean on (`aws`, `docker`)

use std::ffi::{OsStr, OsString};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::PluginError;

/// Run `program` to completion and return its stdout
///
/// `envs` are added to the child's environment only, and never logged. A
/// non-zero exit is an error carrying whatever the program wrote to stderr.
pub fn run<I, S>(program: &str, args: I, envs: &[(&str, &str)]) -> Result<String, PluginError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let args: Vec<OsString> = args.into_iter().map(|a| a.as_ref().to_owned()).collect();
    debug!(program, ?args, "running");
    let output = Command::new(program)
        .args(&args)
        .envs(envs.iter().cloned())
        .stdin(Stdio::null())
        .output()
        .map_err(|source| PluginError::Spawn {
            program: program.to_owned(),
            source,
        })?;
    if !output.status.success() {
        return Err(PluginError::CommandFailed {
            program: program.to_owned(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Write an executable shell script named `name` into `dir`, for tests
/// that need a stand-in for `aws` or `docker`
#[cfg(test)]
pub fn stub_program(dir: &std::path::Path, name: &str, body: &str) -> String {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path.to_string_lossy().into_owned()
}

#[cfg(test)]
mod test {
    use super::{run, stub_program};
    use crate::error::PluginError;

    #[test]
    fn returns_stdout() {
        assert_eq!(run("echo", &["hello", "there"], &[]).unwrap(), "hello there\n");
    }

    #[test]
    fn passes_extra_env() {
        let out = run("sh", &["-c", "echo $NRPE_TEST_VAR"], &[("NRPE_TEST_VAR", "set")]).unwrap();
        assert_eq!(out.trim(), "set");
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        match run("nrpe-plugins-no-such-program", &["x"], &[]) {
            Err(PluginError::Spawn { program, .. }) => {
                assert_eq!(program, "nrpe-plugins-no-such-program")
            }
            other => panic!("expected spawn error, got {:?}", other),
        }
    }

    #[test]
    fn failure_keeps_stderr() {
        match run("sh", &["-c", "echo broken >&2; exit 3"], &[]) {
            Err(PluginError::CommandFailed { stderr, status, .. }) => {
                assert_eq!(stderr, "broken");
                assert_eq!(status.code(), Some(3));
            }
            other => panic!("expected command failure, got {:?}", other),
        }
    }

    #[test]
    fn stubs_are_runnable() {
        let dir = tempfile::tempdir().unwrap();
        let stub = stub_program(dir.path(), "fake", r#"echo "got $#: $*""#);
        assert_eq!(run(&stub, &["a", "b c"], &[]).unwrap(), "got 2: a b c\n");
    }
}
