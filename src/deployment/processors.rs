//! Deployment processors.
//!
//! Each processor reads what it needs from the descriptor and attaches its
//! output to the unit. Processors run in a fixed order (see
//! [`DescriptorPipeline`](crate::deployment::DescriptorPipeline)), so later
//! ones may rely on what earlier ones attached.

use std::path::PathBuf;

use crate::deployment::error::{PipelineError, PipelineResult};
use crate::deployment::unit::DeploymentUnit;
use crate::descriptor::sections::expect_mapping;
use crate::descriptor::{AppDescriptor, Descriptor, DescriptorError};
use crate::messaging;
use crate::pools::{ensure_pool, PoolSpec};

const JOBS_SECTION: &str = "jobs";
const POOLING_SECTION: &str = "pooling";

/// A single stage of descriptor processing.
pub trait DeploymentProcessor: Send + Sync + std::fmt::Debug {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Read from `descriptor` and attach results to `unit`.
    fn process(&self, unit: &mut DeploymentUnit, descriptor: &Descriptor) -> PipelineResult<()>;
}

/// Attaches the application descriptor when an `application` section exists.
#[derive(Debug, Default)]
pub struct ApplicationProcessor;

impl DeploymentProcessor for ApplicationProcessor {
    fn name(&self) -> &'static str {
        "application"
    }

    fn process(&self, unit: &mut DeploymentUnit, descriptor: &Descriptor) -> PipelineResult<()> {
        if descriptor.section(crate::descriptor::application::APPLICATION_SECTION).is_none() {
            return Ok(());
        }
        let application = AppDescriptor::parse(descriptor)?;
        tracing::info!(
            unit = %unit.name(),
            root = ?application.root,
            environment = %application.environment,
            "Application descriptor attached"
        );
        unit.set_application(application);
        Ok(())
    }
}

/// Normalizes the messaging section and attaches all subscriptions at once.
#[derive(Debug)]
pub struct MessagingProcessor {
    section: String,
    config_dir: Option<PathBuf>,
}

impl MessagingProcessor {
    pub fn new(section: impl Into<String>, config_dir: Option<PathBuf>) -> Self {
        Self {
            section: section.into(),
            config_dir,
        }
    }
}

impl DeploymentProcessor for MessagingProcessor {
    fn name(&self) -> &'static str {
        "messaging"
    }

    fn process(&self, unit: &mut DeploymentUnit, descriptor: &Descriptor) -> PipelineResult<()> {
        let Some(data) = descriptor.resolve_section(self.config_dir.as_deref(), &self.section)? else {
            return Ok(());
        };

        let subscriptions = messaging::parse(&data).map_err(|source| PipelineError::Parse {
            unit: unit.name().to_string(),
            section: self.section.clone(),
            source,
        })?;

        tracing::info!(
            unit = %unit.name(),
            subscriptions = subscriptions.len(),
            "Messaging section normalized"
        );
        unit.attach_subscriptions(subscriptions);
        Ok(())
    }
}

/// Declares scheduled jobs from the keys of the `jobs` section.
#[derive(Debug, Default)]
pub struct JobsProcessor {
    config_dir: Option<PathBuf>,
}

impl JobsProcessor {
    pub fn new(config_dir: Option<PathBuf>) -> Self {
        Self { config_dir }
    }
}

impl DeploymentProcessor for JobsProcessor {
    fn name(&self) -> &'static str {
        "jobs"
    }

    fn process(&self, unit: &mut DeploymentUnit, descriptor: &Descriptor) -> PipelineResult<()> {
        let Some(section) = descriptor.resolve_decoded_section(self.config_dir.as_deref(), JOBS_SECTION)? else {
            return Ok(());
        };
        let Some(jobs) = expect_mapping(JOBS_SECTION, &section)? else {
            return Ok(());
        };

        let mut names = Vec::with_capacity(jobs.len());
        for key in jobs.keys() {
            let name = key.as_str().ok_or_else(|| DescriptorError::InvalidValue {
                section: JOBS_SECTION.to_string(),
                key: format!("{:?}", key),
                expected: "a string job name",
            })?;
            names.push(name.to_string());
        }
        unit.declare_jobs(names);
        Ok(())
    }
}

/// Registers explicitly configured pools from the `pooling` section.
#[derive(Debug, Default)]
pub struct PoolingProcessor {
    config_dir: Option<PathBuf>,
}

impl PoolingProcessor {
    pub fn new(config_dir: Option<PathBuf>) -> Self {
        Self { config_dir }
    }
}

impl DeploymentProcessor for PoolingProcessor {
    fn name(&self) -> &'static str {
        "pooling"
    }

    fn process(&self, unit: &mut DeploymentUnit, descriptor: &Descriptor) -> PipelineResult<()> {
        let Some(section) = descriptor.resolve_decoded_section(self.config_dir.as_deref(), POOLING_SECTION)? else {
            return Ok(());
        };
        for pool in PoolSpec::parse_section(&section)? {
            unit.add_pool(pool);
        }
        Ok(())
    }
}

/// Ensures a pool exists for scheduled jobs when the unit declares any.
#[derive(Debug)]
pub struct JobsPoolProcessor {
    pool_name: String,
}

impl JobsPoolProcessor {
    pub fn new(pool_name: impl Into<String>) -> Self {
        Self {
            pool_name: pool_name.into(),
        }
    }
}

impl DeploymentProcessor for JobsPoolProcessor {
    fn name(&self) -> &'static str {
        "jobs-pool"
    }

    fn process(&self, unit: &mut DeploymentUnit, _descriptor: &Descriptor) -> PipelineResult<()> {
        if !unit.has_scheduled_jobs() {
            return Ok(());
        }

        if unit.pool(&self.pool_name).is_some() {
            return Ok(());
        }

        let pool = ensure_pool(None, unit.is_development_mode(), &self.pool_name);

        tracing::info!(
            unit = %unit.name(),
            pool = %pool.name,
            min_size = ?pool.min_size,
            max_size = ?pool.max_size,
            "Defaulted jobs pool"
        );
        unit.add_pool(pool);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(yaml: &str) -> Descriptor {
        Descriptor::parse(yaml).unwrap()
    }

    #[test]
    fn test_messaging_processor_attaches_in_bulk() {
        let mut unit = DeploymentUnit::new("shop");
        let processor = MessagingProcessor::new("messaging", None);
        processor
            .process(&mut unit, &descriptor("messaging:\n  orders: [A, B]\n"))
            .unwrap();
        assert_eq!(unit.subscriptions().len(), 2);
    }

    #[test]
    fn test_messaging_processor_error_leaves_unit_untouched() {
        let mut unit = DeploymentUnit::new("shop");
        let processor = MessagingProcessor::new("messaging", None);
        let err = processor
            .process(&mut unit, &descriptor("messaging:\n  a: A\n  b: 3\n"))
            .unwrap_err();
        assert!(matches!(err, PipelineError::Parse { ref section, .. } if section == "messaging"));
        assert!(unit.subscriptions().is_empty());
    }

    #[test]
    fn test_messaging_processor_without_section() {
        let mut unit = DeploymentUnit::new("shop");
        MessagingProcessor::new("messaging", None)
            .process(&mut unit, &descriptor("web: {}"))
            .unwrap();
        assert!(unit.subscriptions().is_empty());
    }

    #[test]
    fn test_jobs_pool_only_with_jobs() {
        let mut unit = DeploymentUnit::new("shop");
        unit.override_development_mode(true);
        let processor = JobsPoolProcessor::new("jobs");

        processor.process(&mut unit, &Descriptor::default()).unwrap();
        assert!(unit.pools().is_empty());

        unit.declare_jobs(["cleanup"]);
        processor.process(&mut unit, &Descriptor::default()).unwrap();
        assert_eq!(unit.pool("jobs"), Some(&PoolSpec::bounded("jobs", 1, 2)));
    }

    #[test]
    fn test_jobs_pool_keeps_explicit_pool() {
        let mut unit = DeploymentUnit::new("shop");
        unit.override_development_mode(true);
        unit.declare_jobs(["cleanup"]);
        unit.add_pool(PoolSpec::bounded("jobs", 4, 8));

        JobsPoolProcessor::new("jobs")
            .process(&mut unit, &Descriptor::default())
            .unwrap();
        assert_eq!(unit.pools(), &[PoolSpec::bounded("jobs", 4, 8)]);
    }

    #[test]
    fn test_jobs_processor_declares_names() {
        let mut unit = DeploymentUnit::new("shop");
        JobsProcessor::default()
            .process(&mut unit, &descriptor("jobs:\n  nightly: { cron: '0 0 * * *' }\n  hourly: {}\n"))
            .unwrap();
        assert_eq!(unit.scheduled_jobs(), &["nightly".to_string(), "hourly".to_string()]);
    }

    #[test]
    fn test_jobs_and_pooling_read_standalone_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("jobs.yml"), "nightly: {}\n").unwrap();
        std::fs::write(dir.path().join("pooling.yml"), "jobs: { min: 7, max: 9 }\n").unwrap();
        let combined = descriptor("jobs:\n  hourly: {}\npooling:\n  jobs: { min: 1, max: 1 }\n");

        let mut unit = DeploymentUnit::new("shop");
        JobsProcessor::new(Some(dir.path().to_path_buf()))
            .process(&mut unit, &combined)
            .unwrap();
        PoolingProcessor::new(Some(dir.path().to_path_buf()))
            .process(&mut unit, &combined)
            .unwrap();

        assert_eq!(unit.scheduled_jobs(), &["nightly".to_string()]);
        assert_eq!(unit.pools(), &[PoolSpec::bounded("jobs", 7, 9)]);
    }

    #[test]
    fn test_jobs_section_must_be_mapping() {
        let mut unit = DeploymentUnit::new("shop");
        let err = JobsProcessor::default()
            .process(&mut unit, &descriptor("jobs: [nightly]\n"))
            .unwrap_err();
        assert!(matches!(err, PipelineError::Descriptor(DescriptorError::InvalidValue { .. })));
    }
}
