//! SeaORM implementation of BaseFeeRuleRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::info;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use crate::domain::{BaseFeeRule, BaseFeeRuleRepository, City, VehicleType};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::regional_base_fee;

use super::db_err;

fn entity_to_domain(model: regional_base_fee::Model) -> DomainResult<BaseFeeRule> {
    Ok(BaseFeeRule {
        id: model.id,
        city: model.city.parse().map_err(DomainError::Validation)?,
        vehicle_type: model.vehicle_type.parse().map_err(DomainError::Validation)?,
        fee: model.fee,
        valid_from: model.valid_from,
        valid_to: model.valid_to,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

/// Active-at-`at` filter: valid_from <= at AND (valid_to IS NULL OR valid_to > at)
fn active_condition(at: DateTime<Utc>) -> Condition {
    Condition::all()
        .add(regional_base_fee::Column::ValidFrom.lte(at))
        .add(
            Condition::any()
                .add(regional_base_fee::Column::ValidTo.is_null())
                .add(regional_base_fee::Column::ValidTo.gt(at)),
        )
}

pub struct SeaOrmBaseFeeRepository {
    db: DatabaseConnection,
}

impl SeaOrmBaseFeeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BaseFeeRuleRepository for SeaOrmBaseFeeRepository {
    async fn find_active(
        &self,
        city: City,
        vehicle_type: VehicleType,
        at: DateTime<Utc>,
    ) -> DomainResult<Option<BaseFeeRule>> {
        let model = regional_base_fee::Entity::find()
            .filter(regional_base_fee::Column::City.eq(city.to_string()))
            .filter(regional_base_fee::Column::VehicleType.eq(vehicle_type.to_string()))
            .filter(active_condition(at))
            .order_by_desc(regional_base_fee::Column::ValidFrom)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        model.map(entity_to_domain).transpose()
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<BaseFeeRule>> {
        let model = regional_base_fee::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(entity_to_domain).transpose()
    }

    async fn find_all(&self) -> DomainResult<Vec<BaseFeeRule>> {
        let models = regional_base_fee::Entity::find()
            .order_by_asc(regional_base_fee::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(entity_to_domain).collect()
    }

    async fn save(&self, rule: BaseFeeRule) -> DomainResult<BaseFeeRule> {
        let now = Utc::now();
        let model = regional_base_fee::ActiveModel {
            id: NotSet,
            city: Set(rule.city.to_string()),
            vehicle_type: Set(rule.vehicle_type.to_string()),
            fee: Set(rule.fee),
            valid_from: Set(rule.valid_from),
            valid_to: Set(rule.valid_to),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let saved = model.insert(&self.db).await.map_err(db_err)?;
        info!("Saved base fee rule {}", saved.id);
        entity_to_domain(saved)
    }

    async fn update(&self, rule: BaseFeeRule) -> DomainResult<()> {
        let existing = regional_base_fee::Entity::find_by_id(rule.id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(DomainError::NotFound {
                entity: "BaseFeeRule",
                field: "id",
                value: rule.id.to_string(),
            })?;

        let mut model: regional_base_fee::ActiveModel = existing.into();
        model.city = Set(rule.city.to_string());
        model.vehicle_type = Set(rule.vehicle_type.to_string());
        model.fee = Set(rule.fee);
        model.valid_from = Set(rule.valid_from);
        model.valid_to = Set(rule.valid_to);
        model.updated_at = Set(Utc::now());

        model.update(&self.db).await.map_err(db_err)?;
        info!("Updated base fee rule {}", rule.id);
        Ok(())
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let result = regional_base_fee::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound {
                entity: "BaseFeeRule",
                field: "id",
                value: id.to_string(),
            });
        }
        info!("Deleted base fee rule {}", id);
        Ok(())
    }
}
