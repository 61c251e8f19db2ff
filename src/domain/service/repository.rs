//! Service catalog repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::model::Service;
use crate::domain::DomainResult;

#[async_trait]
pub trait ServiceRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Service>>;

    async fn save(&self, service: Service) -> DomainResult<()>;
}
