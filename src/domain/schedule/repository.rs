//! Provider schedule repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::model::WeeklySchedule;
use crate::domain::DomainResult;

#[async_trait]
pub trait ProviderScheduleRepository: Send + Sync {
    /// Look up a provider's weekly schedule; `None` when the provider has
    /// no schedule configured at all.
    async fn find_for_provider(&self, provider_id: Uuid) -> DomainResult<Option<WeeklySchedule>>;

    /// Replace the provider's weekly schedule.
    async fn save_for_provider(
        &self,
        provider_id: Uuid,
        schedule: WeeklySchedule,
    ) -> DomainResult<()>;
}
