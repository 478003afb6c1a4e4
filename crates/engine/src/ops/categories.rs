use chrono::Utc;
use sea_orm::{ActiveValue, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, prelude::*};

use crate::{CategoryKind, EngineError, ResultEngine, categories};

use super::{Engine, Page, normalize_required_name};

#[derive(Clone, Debug)]
pub struct CategoryDraft {
    pub category_name: String,
    pub kind: CategoryKind,
    pub category_group: Option<String>,
    pub color_code: Option<String>,
    pub icon_name: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Clone, Debug, Default)]
pub struct CategoryPatch {
    pub category_name: Option<String>,
    pub kind: Option<CategoryKind>,
    pub category_group: Option<Option<String>>,
    pub color_code: Option<Option<String>>,
    pub icon_name: Option<Option<String>>,
    pub is_active: Option<bool>,
}

#[derive(Clone, Debug, Default)]
pub struct CategoryFilter {
    pub kind: Option<CategoryKind>,
    pub category_group: Option<String>,
    pub is_active: Option<bool>,
}

impl Engine {
    pub async fn create_category(&self, draft: CategoryDraft) -> ResultEngine<categories::Model> {
        let name = normalize_required_name(&draft.category_name, "category")?;

        let model = categories::ActiveModel {
            category_id: ActiveValue::NotSet,
            category_name: ActiveValue::Set(name),
            category_type: ActiveValue::Set(draft.kind.as_str().to_string()),
            category_group: ActiveValue::Set(draft.category_group),
            color_code: ActiveValue::Set(draft.color_code),
            icon_name: ActiveValue::Set(draft.icon_name),
            is_active: ActiveValue::Set(draft.is_active.unwrap_or(true)),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db())
        .await
        .map_err(|err| EngineError::from_write(err, "duplicate category name"))?;

        tracing::debug!(category_id = model.category_id, "created category");
        Ok(model)
    }

    pub async fn category(&self, category_id: i32) -> ResultEngine<categories::Model> {
        categories::Entity::find_by_id(category_id)
            .one(self.db())
            .await?
            .ok_or_else(|| EngineError::KeyNotFound(format!("category {category_id}")))
    }

    /// List categories sorted by group then name, the order the
    /// reference data is meant to be displayed in.
    pub async fn list_categories(
        &self,
        filter: &CategoryFilter,
        page: Page,
    ) -> ResultEngine<(Vec<categories::Model>, u64)> {
        let mut query = categories::Entity::find();
        if let Some(kind) = filter.kind {
            query = query.filter(categories::Column::CategoryType.eq(kind.as_str()));
        }
        if let Some(group) = &filter.category_group {
            query = query.filter(categories::Column::CategoryGroup.eq(group.clone()));
        }
        if let Some(active) = filter.is_active {
            query = query.filter(categories::Column::IsActive.eq(active));
        }

        let total = query.clone().count(self.db()).await?;
        let items = query
            .order_by_asc(categories::Column::CategoryGroup)
            .order_by_asc(categories::Column::CategoryName)
            .offset(page.offset)
            .limit(page.limit)
            .all(self.db())
            .await?;

        Ok((items, total))
    }

    pub async fn update_category(
        &self,
        category_id: i32,
        patch: CategoryPatch,
    ) -> ResultEngine<categories::Model> {
        self.category(category_id).await?;

        let mut active = categories::ActiveModel {
            category_id: ActiveValue::Unchanged(category_id),
            ..Default::default()
        };
        if let Some(name) = patch.category_name {
            active.category_name = ActiveValue::Set(normalize_required_name(&name, "category")?);
        }
        if let Some(kind) = patch.kind {
            active.category_type = ActiveValue::Set(kind.as_str().to_string());
        }
        if let Some(group) = patch.category_group {
            active.category_group = ActiveValue::Set(group);
        }
        if let Some(color) = patch.color_code {
            active.color_code = ActiveValue::Set(color);
        }
        if let Some(icon) = patch.icon_name {
            active.icon_name = ActiveValue::Set(icon);
        }
        if let Some(is_active) = patch.is_active {
            active.is_active = ActiveValue::Set(is_active);
        }

        active
            .update(self.db())
            .await
            .map_err(|err| EngineError::from_write(err, "duplicate category name"))
    }

    /// Delete a category. Payees and transactions referencing it block
    /// the delete with an invalid-reference error.
    pub async fn delete_category(&self, category_id: i32) -> ResultEngine<()> {
        let model = self.category(category_id).await?;
        model.delete(self.db()).await.map_err(|err| {
            EngineError::from_write(err, "category is referenced by payees or transactions")
        })?;
        tracing::debug!(category_id, "deleted category");
        Ok(())
    }
}
