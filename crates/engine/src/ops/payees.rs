use chrono::Utc;
use sea_orm::{ActiveValue, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, prelude::*};

use crate::{EngineError, ResultEngine, payees};

use super::{Engine, Page, normalize_required_name};

#[derive(Clone, Debug)]
pub struct PayeeDraft {
    pub payee_name: String,
    pub default_category_id: Option<i32>,
    pub notes: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Clone, Debug, Default)]
pub struct PayeePatch {
    pub payee_name: Option<String>,
    pub default_category_id: Option<Option<i32>>,
    pub notes: Option<Option<String>>,
    pub is_active: Option<bool>,
}

#[derive(Clone, Debug, Default)]
pub struct PayeeFilter {
    pub is_active: Option<bool>,
}

impl Engine {
    pub async fn create_payee(&self, draft: PayeeDraft) -> ResultEngine<payees::Model> {
        let name = normalize_required_name(&draft.payee_name, "payee")?;
        let now = Utc::now();

        let model = payees::ActiveModel {
            payee_id: ActiveValue::NotSet,
            payee_name: ActiveValue::Set(name),
            default_category_id: ActiveValue::Set(draft.default_category_id),
            notes: ActiveValue::Set(draft.notes),
            is_active: ActiveValue::Set(draft.is_active.unwrap_or(true)),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db())
        .await
        .map_err(|err| EngineError::from_write(err, "default_category_id does not exist"))?;

        tracing::debug!(payee_id = model.payee_id, "created payee");
        Ok(model)
    }

    pub async fn payee(&self, payee_id: i32) -> ResultEngine<payees::Model> {
        payees::Entity::find_by_id(payee_id)
            .one(self.db())
            .await?
            .ok_or_else(|| EngineError::KeyNotFound(format!("payee {payee_id}")))
    }

    pub async fn list_payees(
        &self,
        filter: &PayeeFilter,
        page: Page,
    ) -> ResultEngine<(Vec<payees::Model>, u64)> {
        let mut query = payees::Entity::find();
        if let Some(active) = filter.is_active {
            query = query.filter(payees::Column::IsActive.eq(active));
        }

        let total = query.clone().count(self.db()).await?;
        let items = query
            .order_by_asc(payees::Column::PayeeName)
            .offset(page.offset)
            .limit(page.limit)
            .all(self.db())
            .await?;

        Ok((items, total))
    }

    pub async fn update_payee(
        &self,
        payee_id: i32,
        patch: PayeePatch,
    ) -> ResultEngine<payees::Model> {
        self.payee(payee_id).await?;

        let mut active = payees::ActiveModel {
            payee_id: ActiveValue::Unchanged(payee_id),
            ..Default::default()
        };
        if let Some(name) = patch.payee_name {
            active.payee_name = ActiveValue::Set(normalize_required_name(&name, "payee")?);
        }
        if let Some(category_id) = patch.default_category_id {
            active.default_category_id = ActiveValue::Set(category_id);
        }
        if let Some(notes) = patch.notes {
            active.notes = ActiveValue::Set(notes);
        }
        if let Some(is_active) = patch.is_active {
            active.is_active = ActiveValue::Set(is_active);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        active
            .update(self.db())
            .await
            .map_err(|err| EngineError::from_write(err, "default_category_id does not exist"))
    }

    pub async fn delete_payee(&self, payee_id: i32) -> ResultEngine<()> {
        let model = self.payee(payee_id).await?;
        model.delete(self.db()).await.map_err(|err| {
            EngineError::from_write(err, "payee is referenced by transactions")
        })?;
        tracing::debug!(payee_id, "deleted payee");
        Ok(())
    }
}
