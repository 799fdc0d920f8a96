//! Environment probes for tests that need external services.

use std::path::{Path, PathBuf};
use std::process::Command;

/// Where a Docker daemon was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DockerEndpoint {
    /// A local unix socket.
    UnixSocket(PathBuf),
    /// A non-socket `DOCKER_HOST` such as `tcp://`.
    Remote(String),
    /// No socket was visible but `docker info` succeeded.
    Cli,
}

/// Locate a reachable Docker daemon for integration tests.
#[must_use]
pub fn docker_endpoint() -> Option<DockerEndpoint> {
    resolve_endpoint(std::env::var("DOCKER_HOST").ok(), || {
        Command::new("docker")
            .arg("info")
            .output()
            .is_ok_and(|output| output.status.success())
    })
}

/// Returns `true` if a Docker daemon is reachable for integration tests.
#[must_use]
pub fn docker_available() -> bool {
    docker_endpoint().is_some()
}

fn resolve_endpoint(
    host: Option<String>,
    cli_probe: impl FnOnce() -> bool,
) -> Option<DockerEndpoint> {
    if let Some(host) = host {
        return match host.strip_prefix("unix://") {
            Some(path) if Path::new(path).exists() => {
                Some(DockerEndpoint::UnixSocket(PathBuf::from(path)))
            }
            Some(_) => None,
            None => Some(DockerEndpoint::Remote(host)),
        };
    }

    let default_socket = Path::new("/var/run/docker.sock");
    if default_socket.exists() {
        return Some(DockerEndpoint::UnixSocket(default_socket.to_path_buf()));
    }
    cli_probe().then_some(DockerEndpoint::Cli)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_unix_socket_is_unavailable() {
        assert_eq!(
            resolve_endpoint(Some("unix:///definitely/missing.sock".into()), || true),
            None
        );
    }

    #[test]
    fn tcp_host_is_treated_as_remote() {
        assert_eq!(
            resolve_endpoint(Some("tcp://127.0.0.1:2375".into()), || false),
            Some(DockerEndpoint::Remote("tcp://127.0.0.1:2375".into()))
        );
    }

    #[test]
    fn cli_probe_runs_only_without_host_or_socket() {
        let resolved = resolve_endpoint(None, || true);
        assert!(resolved.is_some());
        if !Path::new("/var/run/docker.sock").exists() {
            assert_eq!(resolve_endpoint(None, || false), None);
        }
    }
}
