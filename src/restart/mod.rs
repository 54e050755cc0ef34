use crate::config::RestartConfig;
use crate::source::SourceType;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum RestartError {
    #[error("Failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("`{command}` exited with status {status}")]
    Failed { command: String, status: i32 },
}

/// Triggers process restarts after a successful pull.
///
/// Dispatch is explicitly fire-and-forget: `notify` spawns a detached task
/// and returns immediately; failures are logged and never reach the caller,
/// because the pull that triggered the restart already succeeded.
#[derive(Debug, Clone)]
pub struct RestartDispatcher {
    config: RestartConfig,
    sibling_dir: Option<PathBuf>,
}

impl RestartDispatcher {
    #[must_use]
    pub fn new(config: RestartConfig, app_root: &Path) -> Self {
        let sibling_dir = if config.sibling_name.is_empty() {
            None
        } else {
            app_root.parent().map(|p| p.join(&config.sibling_name))
        };
        Self {
            config,
            sibling_dir,
        }
    }

    /// A dispatcher that performs no restarts at all
    #[must_use]
    pub fn inert() -> Self {
        Self {
            config: RestartConfig::disabled(),
            sibling_dir: None,
        }
    }

    /// Non-blocking restart trigger for the given source type.
    pub fn notify(&self, source_type: SourceType) {
        let dispatcher = self.clone();
        tokio::spawn(async move {
            if let Err(err) = dispatcher.trigger(source_type).await {
                warn!("Service restart after sync failed: {err}");
            }
        });
    }

    /// Run the restart sequence for a source type. Self sources restart the
    /// local service, sibling sources rebuild and restart the sibling, and
    /// plugins restart both in sequence.
    pub async fn trigger(&self, source_type: SourceType) -> Result<(), RestartError> {
        match source_type {
            SourceType::SelfApplication => self.restart_self().await,
            SourceType::SiblingApplication => self.restart_sibling().await,
            SourceType::Plugin => {
                self.restart_sibling().await?;
                self.restart_self().await
            }
        }
    }

    async fn restart_self(&self) -> Result<(), RestartError> {
        if self.config.self_restart_command.is_empty() {
            debug!("Self restart command not configured, skipping");
            return Ok(());
        }
        info!("Restarting service after sync");
        self.settle().await;
        run_command(&self.config.self_restart_command, None).await
    }

    async fn restart_sibling(&self) -> Result<(), RestartError> {
        let Some(sibling_dir) = &self.sibling_dir else {
            debug!("No sibling application configured, skipping restart");
            return Ok(());
        };
        info!("Building and restarting sibling application");
        self.settle().await;
        if !self.config.sibling_build_command.is_empty() {
            run_command(&self.config.sibling_build_command, Some(sibling_dir)).await?;
        }
        if !self.config.sibling_restart_command.is_empty() {
            run_command(&self.config.sibling_restart_command, None).await?;
        }
        Ok(())
    }

    /// Wait for in-flight writes to settle before restarting anything
    async fn settle(&self) {
        if self.config.settle_secs > 0 {
            tokio::time::sleep(std::time::Duration::from_secs(self.config.settle_secs)).await;
        }
    }
}

async fn run_command(command: &str, cwd: Option<&Path>) -> Result<(), RestartError> {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }
    let status = cmd.status().await.map_err(|source| RestartError::Spawn {
        command: command.to_string(),
        source,
    })?;
    if status.success() {
        Ok(())
    } else {
        Err(RestartError::Failed {
            command: command.to_string(),
            status: status.code().unwrap_or(-1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_inert_dispatcher_is_a_no_op() {
        let dispatcher = RestartDispatcher::inert();
        dispatcher
            .trigger(SourceType::Plugin)
            .await
            .expect("Inert dispatcher should never fail");
    }

    #[tokio::test]
    async fn test_run_command_reports_exit_status() {
        let ok = run_command("true", None).await;
        assert!(ok.is_ok());

        let failed = run_command("exit 3", None).await;
        assert!(matches!(
            failed,
            Err(RestartError::Failed { status: 3, .. })
        ));
    }

    #[test]
    fn test_sibling_dir_derived_from_app_root_parent() {
        let config = RestartConfig::default();
        let dispatcher = RestartDispatcher::new(config, Path::new("/srv/node-api"));
        assert_eq!(dispatcher.sibling_dir, Some(PathBuf::from("/srv/admin")));
    }
}
