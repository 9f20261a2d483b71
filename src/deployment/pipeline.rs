//! Ordered descriptor processing.

use std::path::Path;

use crate::config::schema::DeploymentConfig;
use crate::deployment::error::PipelineResult;
use crate::deployment::processors::{
    ApplicationProcessor, DeploymentProcessor, JobsPoolProcessor, JobsProcessor, MessagingProcessor,
    PoolingProcessor,
};
use crate::deployment::unit::DeploymentUnit;
use crate::descriptor::Descriptor;

/// Runs every processor over a descriptor, in order.
#[derive(Debug)]
pub struct DescriptorPipeline {
    processors: Vec<Box<dyn DeploymentProcessor>>,
    development_mode: Option<bool>,
}

impl DescriptorPipeline {
    /// Standard processor order: application, messaging, jobs, explicit
    /// pools, then the jobs pool default.
    pub fn new(config: &DeploymentConfig) -> Self {
        let processors: Vec<Box<dyn DeploymentProcessor>> = vec![
            Box::new(ApplicationProcessor),
            Box::new(MessagingProcessor::new(
                config.messaging_section.clone(),
                config.config_dir.clone(),
            )),
            Box::new(JobsProcessor::new(config.config_dir.clone())),
            Box::new(PoolingProcessor::new(config.config_dir.clone())),
            Box::new(JobsPoolProcessor::new(config.jobs_pool_name.clone())),
        ];
        Self {
            processors,
            development_mode: config.development_mode,
        }
    }

    /// Build a unit named `name` from `descriptor`.
    ///
    /// The first failing processor aborts the deployment.
    pub fn deploy(&self, name: &str, descriptor: &Descriptor) -> PipelineResult<DeploymentUnit> {
        let mut unit = DeploymentUnit::new(name);
        if let Some(development_mode) = self.development_mode {
            unit.override_development_mode(development_mode);
        }

        for processor in &self.processors {
            tracing::debug!(unit = %name, processor = processor.name(), "Running processor");
            processor.process(&mut unit, descriptor)?;
        }

        tracing::info!(
            unit = %name,
            subscriptions = unit.subscriptions().len(),
            pools = unit.pools().len(),
            development_mode = unit.is_development_mode(),
            "Deployment processed"
        );
        Ok(unit)
    }

    /// Load a descriptor file and deploy it, naming the unit after the file.
    pub fn deploy_file(&self, path: &Path) -> PipelineResult<DeploymentUnit> {
        self.deploy_path(unit_name_for(path), path)
    }

    /// Load a descriptor file and deploy it as `name`.
    pub fn deploy_path(&self, name: &str, path: &Path) -> PipelineResult<DeploymentUnit> {
        let descriptor = Descriptor::load(path)?;
        self.deploy(name, &descriptor)
    }
}

/// Default unit name for a descriptor file: its stem.
pub fn unit_name_for(path: &Path) -> &str {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("deployment")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pools::PoolSpec;

    const DESCRIPTOR: &str = "\
application:
  RACK_ROOT: /srv/shop
messaging:
  /queues/orders: OrderHandler
jobs:
  nightly: {}
";

    #[test]
    fn test_deploy_development() {
        let pipeline = DescriptorPipeline::new(&DeploymentConfig::default());
        let unit = pipeline.deploy("shop", &Descriptor::parse(DESCRIPTOR).unwrap()).unwrap();

        assert!(unit.is_development_mode());
        assert_eq!(unit.subscriptions().len(), 1);
        assert_eq!(unit.pool("jobs"), Some(&PoolSpec::bounded("jobs", 1, 2)));
    }

    #[test]
    fn test_unit_name_for() {
        assert_eq!(unit_name_for(Path::new("/srv/deploy/shop.yml")), "shop");
        assert_eq!(unit_name_for(Path::new("/")), "deployment");
    }

    #[test]
    fn test_development_override() {
        let config = DeploymentConfig {
            development_mode: Some(false),
            ..DeploymentConfig::default()
        };
        let unit = DescriptorPipeline::new(&config)
            .deploy("shop", &Descriptor::parse(DESCRIPTOR).unwrap())
            .unwrap();
        assert!(unit.pool("jobs").unwrap().is_host_default());
    }
}
