//! SeaORM implementation of ExtraFeeRuleRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::info;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use crate::domain::{
    ExtraFeeRule, ExtraFeeRuleRepository, FeeKind, PhenomenonCategory, VehicleType,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::weather_extra_fee;

use super::db_err;

fn entity_to_domain(model: weather_extra_fee::Model) -> DomainResult<ExtraFeeRule> {
    Ok(ExtraFeeRule {
        id: model.id,
        kind: model.fee_kind.parse().map_err(DomainError::Validation)?,
        vehicle_type: model.vehicle_type.parse().map_err(DomainError::Validation)?,
        min_value: model.min_value,
        max_value: model.max_value,
        phenomenon_category: model
            .phenomenon_category
            .as_deref()
            .map(str::parse)
            .transpose()
            .map_err(DomainError::Validation)?,
        fee: model.fee,
        valid_from: model.valid_from,
        valid_to: model.valid_to,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

fn active_condition(at: DateTime<Utc>) -> Condition {
    Condition::all()
        .add(weather_extra_fee::Column::ValidFrom.lte(at))
        .add(
            Condition::any()
                .add(weather_extra_fee::Column::ValidTo.is_null())
                .add(weather_extra_fee::Column::ValidTo.gt(at)),
        )
}

pub struct SeaOrmExtraFeeRepository {
    db: DatabaseConnection,
}

impl SeaOrmExtraFeeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ExtraFeeRuleRepository for SeaOrmExtraFeeRepository {
    async fn find_active_for_value(
        &self,
        kind: FeeKind,
        vehicle_type: VehicleType,
        value: f64,
        at: DateTime<Utc>,
    ) -> DomainResult<Option<ExtraFeeRule>> {
        // Band bounds are optional: a missing bound is unbounded on that side
        let model = weather_extra_fee::Entity::find()
            .filter(weather_extra_fee::Column::FeeKind.eq(kind.to_string()))
            .filter(weather_extra_fee::Column::VehicleType.eq(vehicle_type.to_string()))
            .filter(
                Condition::any()
                    .add(weather_extra_fee::Column::MinValue.is_null())
                    .add(weather_extra_fee::Column::MinValue.lte(value)),
            )
            .filter(
                Condition::any()
                    .add(weather_extra_fee::Column::MaxValue.is_null())
                    .add(weather_extra_fee::Column::MaxValue.gt(value)),
            )
            .filter(active_condition(at))
            .order_by_desc(weather_extra_fee::Column::ValidFrom)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        model.map(entity_to_domain).transpose()
    }

    async fn find_active_for_category(
        &self,
        vehicle_type: VehicleType,
        category: PhenomenonCategory,
        at: DateTime<Utc>,
    ) -> DomainResult<Option<ExtraFeeRule>> {
        let model = weather_extra_fee::Entity::find()
            .filter(weather_extra_fee::Column::FeeKind.eq(FeeKind::Phenomenon.to_string()))
            .filter(weather_extra_fee::Column::VehicleType.eq(vehicle_type.to_string()))
            .filter(weather_extra_fee::Column::PhenomenonCategory.eq(category.to_string()))
            .filter(active_condition(at))
            .order_by_desc(weather_extra_fee::Column::ValidFrom)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        model.map(entity_to_domain).transpose()
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<ExtraFeeRule>> {
        let model = weather_extra_fee::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(entity_to_domain).transpose()
    }

    async fn find_all(&self) -> DomainResult<Vec<ExtraFeeRule>> {
        let models = weather_extra_fee::Entity::find()
            .order_by_asc(weather_extra_fee::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(entity_to_domain).collect()
    }

    async fn save(&self, rule: ExtraFeeRule) -> DomainResult<ExtraFeeRule> {
        let now = Utc::now();
        let model = weather_extra_fee::ActiveModel {
            id: NotSet,
            fee_kind: Set(rule.kind.to_string()),
            vehicle_type: Set(rule.vehicle_type.to_string()),
            min_value: Set(rule.min_value),
            max_value: Set(rule.max_value),
            phenomenon_category: Set(rule.phenomenon_category.map(|c| c.to_string())),
            fee: Set(rule.fee),
            valid_from: Set(rule.valid_from),
            valid_to: Set(rule.valid_to),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let saved = model.insert(&self.db).await.map_err(db_err)?;
        info!("Saved extra fee rule {}", saved.id);
        entity_to_domain(saved)
    }

    async fn update(&self, rule: ExtraFeeRule) -> DomainResult<()> {
        let existing = weather_extra_fee::Entity::find_by_id(rule.id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(DomainError::NotFound {
                entity: "ExtraFeeRule",
                field: "id",
                value: rule.id.to_string(),
            })?;

        let mut model: weather_extra_fee::ActiveModel = existing.into();
        model.fee_kind = Set(rule.kind.to_string());
        model.vehicle_type = Set(rule.vehicle_type.to_string());
        model.min_value = Set(rule.min_value);
        model.max_value = Set(rule.max_value);
        model.phenomenon_category = Set(rule.phenomenon_category.map(|c| c.to_string()));
        model.fee = Set(rule.fee);
        model.valid_from = Set(rule.valid_from);
        model.valid_to = Set(rule.valid_to);
        model.updated_at = Set(Utc::now());

        model.update(&self.db).await.map_err(db_err)?;
        info!("Updated extra fee rule {}", rule.id);
        Ok(())
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let result = weather_extra_fee::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound {
                entity: "ExtraFeeRule",
                field: "id",
                value: id.to_string(),
            });
        }
        info!("Deleted extra fee rule {}", id);
        Ok(())
    }
}
