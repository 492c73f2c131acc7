use {
    super::{
        reconciler::Reconciler,
        repository::Repository,
        source::TimeSource,
    },
    std::{
        sync::Arc,
        time::Duration,
    },
};

pub mod get_trusted_time;

mod query_time_sources;

pub struct Config {
    /// Upper bound for a single source query.
    pub query_timeout: Duration,
}

pub struct ServiceInner {
    config:     Config,
    sources:    Vec<Arc<dyn TimeSource>>,
    reconciler: Arc<dyn Reconciler>,
    repo:       Repository,
}

#[derive(Clone)]
pub struct Service(Arc<ServiceInner>);
impl std::ops::Deref for Service {
    type Target = ServiceInner;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Service {
    pub fn new(
        config: Config,
        sources: Vec<Arc<dyn TimeSource>>,
        reconciler: Arc<dyn Reconciler>,
    ) -> Self {
        Self(Arc::new(ServiceInner {
            config,
            sources,
            reconciler,
            repo: Repository::new(),
        }))
    }
}
