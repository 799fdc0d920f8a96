//! Container lifecycle for one-shot `OpenFOAM` commands.
//!
//! # Design
//!
//! - Every command runs in a fresh detached container with the case mounted at
//!   the configured working directory.
//! - Container output is streamed to `debug` logs while the command runs.
//! - The container is removed whether the command succeeds or not.

use std::io;
use std::path::{Path, PathBuf};

use foamkit_config::DockerSettings;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{RunnerError, RunnerResult};
use crate::executor::{CommandExecutor, DockerCli, ProcessOutput};

const IMAGE_MISSING_MARKERS: [&str; 4] = [
    "manifest unknown",
    "pull access denied",
    "No such image",
    "not found: manifest",
];

/// Runs `OpenFOAM` commands inside Docker containers.
#[derive(Debug, Clone)]
pub struct FoamRunner<E = DockerCli> {
    settings: DockerSettings,
    executor: E,
}

impl FoamRunner<DockerCli> {
    /// Runner talking to the local `docker` binary.
    #[must_use]
    pub fn from_settings(settings: DockerSettings) -> Self {
        Self::new(settings, DockerCli::default())
    }
}

impl<E: CommandExecutor> FoamRunner<E> {
    /// Runner using a custom executor.
    #[must_use]
    pub const fn new(settings: DockerSettings, executor: E) -> Self {
        Self { settings, executor }
    }

    /// Image used for new containers.
    #[must_use]
    pub fn image(&self) -> &str {
        &self.settings.image
    }

    /// Shell line executed in the container: the `OpenFOAM` environment is
    /// sourced before `command`.
    #[must_use]
    pub fn command_line(&self, command: &str) -> String {
        format!("source {} && {}", self.settings.bashrc, command.trim())
    }

    /// Run `command` against the case at `case_path`.
    ///
    /// `user` is passed to `docker run --user`; it defaults to the calling
    /// user so files written into the case keep host ownership.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::InvalidCase`] or [`RunnerError::InvalidCommand`]
    /// for bad input, [`RunnerError::CommandFailed`] for a non-zero exit, and
    /// Docker/IO variants when the container cannot be managed.
    pub fn run(&self, case_path: &Path, command: &str, user: Option<&str>) -> RunnerResult<()> {
        if command.trim().is_empty() {
            return Err(RunnerError::InvalidCommand {
                reason: "command must not be empty",
            });
        }
        let case_dir = resolve_case(case_path)?;
        let user = user.map(str::to_string).or_else(host_user);

        let mut args = vec!["run".to_string(), "-d".to_string()];
        if let Some(user) = &user {
            args.extend(["--user".to_string(), user.clone()]);
        }
        args.extend([
            "-v".to_string(),
            format!("{}:{}", case_dir.display(), self.settings.workdir),
            "-w".to_string(),
            self.settings.workdir.clone(),
            self.settings.image.clone(),
            "/bin/bash".to_string(),
            "-c".to_string(),
            self.command_line(command),
        ]);

        info!(
            image = %self.settings.image,
            case = %case_dir.display(),
            command = command.trim(),
            user = user.as_deref().unwrap_or("image default"),
            "starting container"
        );
        let created = self.invoke("run", &args)?;
        let container_id = created.stdout.trim().to_string();
        if container_id.is_empty() {
            return Err(RunnerError::Docker {
                operation: "run",
                detail: "no container id returned".to_string(),
            });
        }

        let outcome = self.follow(&container_id);
        self.remove(&container_id);
        outcome
    }

    /// Pull the configured image.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::ImageNotFound`] when the registry does not know
    /// the image, or another Docker/IO variant on failure.
    pub fn pull_image(&self) -> RunnerResult<()> {
        info!(image = %self.settings.image, "pulling image");
        self.invoke("pull", &["pull".to_string(), self.settings.image.clone()])?;
        info!(image = %self.settings.image, "image ready");
        Ok(())
    }

    /// Point-in-time resource statistics for a running container.
    ///
    /// # Errors
    ///
    /// Returns a Docker/IO variant if the container is unknown, or
    /// [`RunnerError::Stats`] if the output is not JSON.
    pub fn container_stats(&self, container_id: &str) -> RunnerResult<Value> {
        let output = self.invoke(
            "stats",
            &[
                "stats".to_string(),
                "--no-stream".to_string(),
                "--format".to_string(),
                "{{json .}}".to_string(),
                container_id.to_string(),
            ],
        )?;
        serde_json::from_str(output.stdout.trim()).map_err(|source| RunnerError::Stats {
            container_id: container_id.to_string(),
            source,
        })
    }

    fn follow(&self, container_id: &str) -> RunnerResult<()> {
        let logs = [
            "logs".to_string(),
            "-f".to_string(),
            container_id.to_string(),
        ];
        let mut forward = |line: &str| debug!(container = container_id, "{line}");
        if let Err(err) = self.executor.stream(&logs, &mut forward) {
            warn!(container = container_id, error = %err, "failed to stream container logs");
        }

        let waited = self.invoke("wait", &["wait".to_string(), container_id.to_string()])?;
        let status = waited
            .stdout
            .trim()
            .parse::<i64>()
            .map_err(|err| RunnerError::Docker {
                operation: "wait",
                detail: format!("unexpected exit status {:?}: {err}", waited.stdout.trim()),
            })?;
        if status == 0 {
            info!(container = container_id, "command completed");
            Ok(())
        } else {
            warn!(container = container_id, status, "command failed");
            Err(RunnerError::CommandFailed { status })
        }
    }

    fn remove(&self, container_id: &str) {
        let args = ["rm".to_string(), "-f".to_string(), container_id.to_string()];
        match self.executor.output(&args) {
            Ok(output) if output.success() => {
                debug!(container = container_id, "container removed");
            }
            Ok(output) => {
                warn!(
                    container = container_id,
                    detail = output.stderr.trim(),
                    "failed to remove container"
                );
            }
            Err(err) => {
                warn!(container = container_id, error = %err, "failed to remove container");
            }
        }
    }

    fn invoke(&self, operation: &'static str, args: &[String]) -> RunnerResult<ProcessOutput> {
        let output = self.executor.output(args).map_err(|source| {
            warn!(operation, error = %source, "failed to launch docker");
            if source.kind() == io::ErrorKind::NotFound {
                RunnerError::Docker {
                    operation,
                    detail: "docker binary not found".to_string(),
                }
            } else {
                RunnerError::Io { operation, source }
            }
        })?;
        if output.success() {
            return Ok(output);
        }
        let err = self.classify(operation, &output);
        warn!(operation, status = ?output.status, detail = %err.detail(), "{err}");
        Err(err)
    }

    fn classify(&self, operation: &'static str, output: &ProcessOutput) -> RunnerError {
        let detail = output.stderr.trim().to_string();
        if IMAGE_MISSING_MARKERS
            .iter()
            .any(|marker| detail.contains(marker))
        {
            RunnerError::ImageNotFound {
                image: self.settings.image.clone(),
                detail,
            }
        } else {
            RunnerError::Docker { operation, detail }
        }
    }
}

fn resolve_case(case_path: &Path) -> RunnerResult<PathBuf> {
    if !case_path.is_dir() {
        return Err(RunnerError::InvalidCase {
            path: case_path.to_path_buf(),
        });
    }
    case_path
        .canonicalize()
        .map_err(|source| RunnerError::Io {
            operation: "canonicalize case path",
            source,
        })
}

#[cfg(unix)]
#[allow(clippy::unnecessary_wraps)]
fn host_user() -> Option<String> {
    use nix::unistd::{getgid, getuid};
    Some(format!("{}:{}", getuid(), getgid()))
}

#[cfg(not(unix))]
const fn host_user() -> Option<String> {
    None
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::io;

    use tempfile::TempDir;

    use super::*;

    #[derive(Default)]
    struct FakeExecutor {
        calls: RefCell<Vec<Vec<String>>>,
        replies: RefCell<VecDeque<ProcessOutput>>,
        log_lines: Vec<&'static str>,
    }

    impl FakeExecutor {
        fn reply(self, status: i32, stdout: &str, stderr: &str) -> Self {
            self.replies.borrow_mut().push_back(ProcessOutput {
                status: Some(status),
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
            });
            self
        }

        fn subcommands(&self) -> Vec<String> {
            self.calls
                .borrow()
                .iter()
                .filter_map(|call| call.first().cloned())
                .collect()
        }
    }

    impl CommandExecutor for FakeExecutor {
        fn output(&self, args: &[String]) -> io::Result<ProcessOutput> {
            self.calls.borrow_mut().push(args.to_vec());
            self.replies
                .borrow_mut()
                .pop_front()
                .ok_or_else(|| io::Error::other("no scripted reply"))
        }

        fn stream(
            &self,
            args: &[String],
            on_line: &mut dyn FnMut(&str),
        ) -> io::Result<ProcessOutput> {
            self.calls.borrow_mut().push(args.to_vec());
            for line in &self.log_lines {
                on_line(line);
            }
            Ok(ProcessOutput {
                status: Some(0),
                ..ProcessOutput::default()
            })
        }
    }

    fn runner(executor: FakeExecutor) -> FoamRunner<FakeExecutor> {
        FoamRunner::new(DockerSettings::default(), executor)
    }

    #[test]
    fn command_line_sources_environment_first() {
        let runner = runner(FakeExecutor::default());
        assert_eq!(
            runner.command_line(" blockMesh "),
            "source /usr/lib/openfoam/openfoam*/etc/bashrc && blockMesh"
        );
    }

    #[test]
    fn run_mounts_case_and_removes_container() -> anyhow::Result<()> {
        let case = TempDir::new()?;
        let executor = FakeExecutor {
            log_lines: vec!["Create time", "End"],
            ..FakeExecutor::default()
        }
        .reply(0, "abc123\n", "")
        .reply(0, "0\n", "")
        .reply(0, "abc123\n", "");
        let runner = runner(executor);

        runner.run(case.path(), "blockMesh", Some("1000:1000"))?;

        let calls = runner.executor.calls.borrow();
        let run = &calls[0];
        let mount = format!("{}:/home/openfoam/project", case.path().canonicalize()?.display());
        assert!(run.windows(2).any(|pair| pair[0] == "--user" && pair[1] == "1000:1000"));
        assert!(run.windows(2).any(|pair| pair[0] == "-v" && pair[1] == mount));
        assert_eq!(run.iter().rev().nth(1).map(String::as_str), Some("-c"));
        drop(calls);
        assert_eq!(runner.executor.subcommands(), ["run", "logs", "wait", "rm"]);
        Ok(())
    }

    #[test]
    fn non_zero_exit_is_reported_and_container_still_removed() -> anyhow::Result<()> {
        let case = TempDir::new()?;
        let executor = FakeExecutor::default()
            .reply(0, "abc123\n", "")
            .reply(0, "1\n", "")
            .reply(0, "abc123\n", "");
        let runner = runner(executor);

        let err = runner.run(case.path(), "icoFoam", None).err();

        assert!(matches!(err, Some(RunnerError::CommandFailed { status: 1 })));
        assert_eq!(runner.executor.subcommands(), ["run", "logs", "wait", "rm"]);
        Ok(())
    }

    #[test]
    fn missing_image_is_classified() -> anyhow::Result<()> {
        let case = TempDir::new()?;
        let executor = FakeExecutor::default().reply(
            125,
            "",
            "docker: Error response from daemon: manifest unknown: manifest unknown.\n",
        );
        let runner = runner(executor);

        let err = runner.run(case.path(), "blockMesh", None).err();

        assert!(matches!(err, Some(RunnerError::ImageNotFound { .. })));
        assert_eq!(runner.executor.subcommands(), ["run"]);
        Ok(())
    }

    #[test]
    fn invalid_input_is_rejected_before_docker() -> anyhow::Result<()> {
        let temp = TempDir::new()?;
        let runner = runner(FakeExecutor::default());

        let missing = runner.run(&temp.path().join("missing"), "blockMesh", None).err();
        let blank = runner.run(temp.path(), "   ", None).err();

        assert!(matches!(missing, Some(RunnerError::InvalidCase { .. })));
        assert!(matches!(blank, Some(RunnerError::InvalidCommand { .. })));
        assert!(runner.executor.calls.borrow().is_empty());
        Ok(())
    }

    #[test]
    fn stats_are_parsed_as_json() -> anyhow::Result<()> {
        let executor = FakeExecutor::default()
            .reply(0, "{\"CPUPerc\":\"12.5%\",\"MemUsage\":\"10MiB / 1GiB\"}\n", "")
            .reply(0, "not json\n", "");
        let runner = runner(executor);

        let stats = runner.container_stats("abc123")?;
        let broken = runner.container_stats("abc123").err();

        assert_eq!(stats["CPUPerc"], "12.5%");
        assert!(matches!(broken, Some(RunnerError::Stats { .. })));
        Ok(())
    }

    #[test]
    fn missing_docker_binary_is_a_docker_error() {
        let runner = FoamRunner::new(
            DockerSettings::default(),
            DockerCli::with_program("/nonexistent/docker"),
        );

        let err = runner.pull_image().err();

        assert!(matches!(
            err,
            Some(RunnerError::Docker {
                operation: "pull",
                ref detail,
            }) if detail == "docker binary not found"
        ));
    }

    #[test]
    fn pull_failure_without_marker_is_generic() {
        let executor = FakeExecutor::default().reply(1, "", "Cannot connect to the Docker daemon");
        let runner = runner(executor);

        let err = runner.pull_image().err();

        assert!(matches!(
            err,
            Some(RunnerError::Docker {
                operation: "pull",
                ..
            })
        ));
    }
}
