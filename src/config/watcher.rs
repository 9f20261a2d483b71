//! Descriptor file watcher for redeploy on change.

use std::path::{Path, PathBuf};
use std::time::Duration;
use notify::{Watcher, RecursiveMode, Event, RecommendedWatcher, Config};
use tokio::sync::mpsc;
use crate::config::schema::{DeploymentConfig, WatchConfig};
use crate::deployment::{DescriptorPipeline, DeploymentUnit};

/// A watcher that re-processes a descriptor whenever it, or a standalone
/// section file in the config dir, changes.
pub struct DescriptorWatcher {
    path: PathBuf,
    name: String,
    config_dir: Option<PathBuf>,
    pipeline: DescriptorPipeline,
    poll_interval: Duration,
    update_tx: mpsc::UnboundedSender<DeploymentUnit>,
}

impl DescriptorWatcher {
    /// Create a new DescriptorWatcher that redeploys `path` as unit `name`.
    ///
    /// Returns the watcher and a receiver for freshly processed units.
    pub fn new(
        path: &Path,
        name: &str,
        deployment: &DeploymentConfig,
        watch: &WatchConfig,
    ) -> (Self, mpsc::UnboundedReceiver<DeploymentUnit>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (Self {
            path: path.to_path_buf(),
            name: name.to_string(),
            config_dir: deployment.config_dir.clone(),
            pipeline: DescriptorPipeline::new(deployment),
            poll_interval: Duration::from_secs(watch.poll_interval_secs),
            update_tx,
        }, update_rx)
    }

    /// Paths handed to the file watcher: the descriptor, then the config dir.
    pub fn watched_paths(&self) -> Vec<PathBuf> {
        let mut paths = vec![self.path.clone()];
        paths.extend(self.config_dir.iter().cloned());
        paths
    }

    /// Re-run the pipeline once and publish the unit.
    ///
    /// A descriptor that fails to process is logged and skipped; the last
    /// good unit stays current on the receiving side.
    fn redeploy(&self) {
        tracing::info!(path = ?self.path, unit = %self.name, "Descriptor change detected, redeploying");
        match self.pipeline.deploy_path(&self.name, &self.path) {
            Ok(unit) => {
                let _ = self.update_tx.send(unit);
            }
            Err(e) => {
                tracing::error!("Failed to process descriptor: {}. Keeping previous deployment.", e);
            }
        }
    }

    /// Start watching in a background thread.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let watched = self.watched_paths();
        let poll_interval = self.poll_interval;

        let mut watcher = RecommendedWatcher::new(move |res: notify::Result<Event>| {
            match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        self.redeploy();
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            }
        }, Config::default().with_poll_interval(poll_interval))?;

        for path in &watched {
            watcher.watch(path, RecursiveMode::NonRecursive)?;
        }

        tracing::info!(paths = ?watched, "Descriptor watcher started");
        Ok(watcher)
    }
}
