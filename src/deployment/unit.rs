//! In-memory deployment unit.
//!
//! Holds the metadata produced for one deployment: the application
//! descriptor, subscriptions, pool specs and declared scheduled jobs.

use serde::Serialize;

use crate::descriptor::AppDescriptor;
use crate::messaging::Subscription;
use crate::pools::PoolSpec;

/// Metadata attached to a single deployment.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeploymentUnit {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    application: Option<AppDescriptor>,
    #[serde(skip)]
    development_mode: Option<bool>,
    subscriptions: Vec<Subscription>,
    pools: Vec<PoolSpec>,
    scheduled_jobs: Vec<String>,
}

impl DeploymentUnit {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_application(&mut self, application: AppDescriptor) {
        self.application = Some(application);
    }

    pub fn application(&self) -> Option<&AppDescriptor> {
        self.application.as_ref()
    }

    /// Force development mode on or off regardless of the application env.
    pub fn override_development_mode(&mut self, development_mode: bool) {
        self.development_mode = Some(development_mode);
    }

    /// Development mode: the override if set, else the application env.
    /// A unit without an application is never in development mode.
    pub fn is_development_mode(&self) -> bool {
        self.development_mode.unwrap_or_else(|| {
            self.application
                .as_ref()
                .is_some_and(AppDescriptor::is_development_mode)
        })
    }

    /// Attach a whole batch of subscriptions at once.
    pub fn attach_subscriptions(&mut self, subscriptions: Vec<Subscription>) {
        tracing::debug!(
            unit = %self.name,
            count = subscriptions.len(),
            "Attaching subscriptions"
        );
        self.subscriptions.extend(subscriptions);
    }

    pub fn subscriptions(&self) -> &[Subscription] {
        &self.subscriptions
    }

    /// Register a pool. Returns `false` if a pool with that name exists.
    pub fn add_pool(&mut self, pool: PoolSpec) -> bool {
        if PoolSpec::find_named(&self.pools, &pool.name).is_some() {
            tracing::debug!(unit = %self.name, pool = %pool.name, "Pool already registered");
            return false;
        }
        self.pools.push(pool);
        true
    }

    pub fn pools(&self) -> &[PoolSpec] {
        &self.pools
    }

    pub fn pool(&self, name: &str) -> Option<&PoolSpec> {
        PoolSpec::find_named(&self.pools, name)
    }

    pub fn declare_jobs<I, S>(&mut self, jobs: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scheduled_jobs.extend(jobs.into_iter().map(Into::into));
    }

    pub fn scheduled_jobs(&self) -> &[String] {
        &self.scheduled_jobs
    }

    pub fn has_scheduled_jobs(&self) -> bool {
        !self.scheduled_jobs.is_empty()
    }
}
