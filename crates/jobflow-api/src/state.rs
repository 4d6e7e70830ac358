//! Application state wiring the services to concrete adapters.
//!
//! The services are generic over the capability ports; AppState pins them to
//! the Dataform, Cloud Tasks and AppSheet implementations.

use std::sync::Arc;

use jobflow_core::service::{JobOrchestrator, JobPoller};
use jobflow_infra::appsheet::AppSheetRecordStore;
use jobflow_infra::auth::MetadataTokenSource;
use jobflow_infra::config::Config;
use jobflow_infra::dataform::DataformRunner;
use jobflow_infra::secret::appsheet_api_key;
use jobflow_infra::tasks::CloudTasksScheduler;

/// Concrete type aliases for the service generics pinned to infra adapters.
pub type ConcreteOrchestrator = JobOrchestrator<
    DataformRunner<MetadataTokenSource>,
    CloudTasksScheduler<MetadataTokenSource>,
>;

pub type ConcretePoller = JobPoller<
    DataformRunner<MetadataTokenSource>,
    AppSheetRecordStore,
    CloudTasksScheduler<MetadataTokenSource>,
>;

/// Shared application state holding both services.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<ConcreteOrchestrator>,
    pub poller: Arc<ConcretePoller>,
}

impl AppState {
    /// Initialize the application state: load config and secrets, wire
    /// the adapters into the services.
    pub fn init() -> anyhow::Result<Self> {
        let config = Config::from_env()?;
        let api_key = appsheet_api_key()?;
        let client = reqwest::Client::new();

        // Each service owns its adapters; the underlying reqwest client
        // shares one connection pool across all of them.
        let orchestrator = JobOrchestrator::new(
            DataformRunner::new(client.clone(), MetadataTokenSource::new(client.clone())),
            CloudTasksScheduler::new(
                client.clone(),
                MetadataTokenSource::new(client.clone()),
                config.queue_path(),
                config.poll_url.clone(),
            ),
        )
        .with_poll_delay(config.poll_delay);

        let poller = JobPoller::new(
            DataformRunner::new(client.clone(), MetadataTokenSource::new(client.clone())),
            AppSheetRecordStore::new(client.clone(), api_key, config.appsheet_app_id.clone()),
            CloudTasksScheduler::new(
                client.clone(),
                MetadataTokenSource::new(client),
                config.queue_path(),
                config.poll_url.clone(),
            ),
        )
        .with_reschedule_on_pending(config.reschedule_on_pending)
        .with_poll_delay(config.poll_delay);

        Ok(Self {
            orchestrator: Arc::new(orchestrator),
            poller: Arc::new(poller),
        })
    }
}
