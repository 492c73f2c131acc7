#[cfg(test)]
use mockall::automock;
use {
    super::entities::OrgId,
    axum::async_trait,
};

/// Capability requests to the platform's endorsement policy engine.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait EndorsementPolicy: Send + Sync {
    /// Makes `orgs` the only organizations whose endorsement can change `record_id`.
    async fn grant_mutation_rights(&self, record_id: &str, orgs: &[OrgId]) -> anyhow::Result<()>;
}
