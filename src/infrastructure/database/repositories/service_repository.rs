//! SeaORM implementation of ServiceRepository

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use super::{cents_to_decimal, db_err, decimal_to_cents};
use crate::domain::service::{Service, ServiceRepository};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::service;

pub struct SeaOrmServiceRepository {
    db: DatabaseConnection,
}

impl SeaOrmServiceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: service::Model) -> Service {
    Service {
        id: m.id,
        name: m.name,
        duration_minutes: i64::from(m.duration_minutes),
        price: cents_to_decimal(m.price_cents),
        is_active: m.is_active,
        created_at: m.created_at,
    }
}

#[async_trait]
impl ServiceRepository for SeaOrmServiceRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Service>> {
        let model = service::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn save(&self, s: Service) -> DomainResult<()> {
        let model = service::ActiveModel {
            id: Set(s.id),
            name: Set(s.name),
            duration_minutes: Set(s.duration_minutes as i32),
            price_cents: Set(decimal_to_cents(s.price)?),
            is_active: Set(s.is_active),
            created_at: Set(s.created_at),
        };
        model.insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }
}
