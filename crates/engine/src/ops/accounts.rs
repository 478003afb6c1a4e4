use chrono::Utc;
use sea_orm::{ActiveValue, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, prelude::*};

use crate::{EngineError, ResultEngine, accounts};

use super::{Engine, Page, normalize_required_name};

/// Fields accepted when creating an account. Optional fields fall back
/// to the same defaults the database schema declares.
#[derive(Clone, Debug)]
pub struct AccountDraft {
    pub account_type_id: i32,
    pub account_name: String,
    pub currency_code: Option<String>,
    pub opening_balance_minor: Option<i64>,
    pub opening_balance_date: Option<chrono::NaiveDate>,
    pub account_number: Option<String>,
    pub institution_name: Option<String>,
    pub credit_limit_minor: Option<i64>,
    pub is_closed: Option<bool>,
    pub notes: Option<String>,
}

/// Partial update. `None` leaves the field unchanged; the opening
/// balance and its date are immutable after creation.
#[derive(Clone, Debug, Default)]
pub struct AccountPatch {
    pub account_type_id: Option<i32>,
    pub account_name: Option<String>,
    pub currency_code: Option<String>,
    pub account_number: Option<Option<String>>,
    pub institution_name: Option<Option<String>>,
    pub credit_limit_minor: Option<Option<i64>>,
    pub is_closed: Option<bool>,
    pub notes: Option<Option<String>>,
}

#[derive(Clone, Debug, Default)]
pub struct AccountFilter {
    pub account_type_id: Option<i32>,
    pub currency_code: Option<String>,
    pub is_closed: Option<bool>,
}

impl Engine {
    /// Create a new account. The current balance starts at the opening
    /// balance and is never recomputed by this service.
    pub async fn create_account(&self, draft: AccountDraft) -> ResultEngine<accounts::Model> {
        let name = normalize_required_name(&draft.account_name, "account")?;
        let now = Utc::now();
        let opening = draft.opening_balance_minor.unwrap_or(0);

        let model = accounts::ActiveModel {
            account_id: ActiveValue::NotSet,
            account_type_id: ActiveValue::Set(draft.account_type_id),
            account_name: ActiveValue::Set(name),
            account_number: ActiveValue::Set(draft.account_number),
            institution_name: ActiveValue::Set(draft.institution_name),
            currency_code: ActiveValue::Set(
                draft.currency_code.unwrap_or_else(|| "USD".to_string()),
            ),
            opening_balance_minor: ActiveValue::Set(opening),
            current_balance_minor: ActiveValue::Set(opening),
            credit_limit_minor: ActiveValue::Set(draft.credit_limit_minor),
            is_closed: ActiveValue::Set(draft.is_closed.unwrap_or(false)),
            notes: ActiveValue::Set(draft.notes),
            opening_balance_date: ActiveValue::Set(
                draft.opening_balance_date.unwrap_or_else(|| now.date_naive()),
            ),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db())
        .await
        .map_err(|err| {
            EngineError::from_write(err, "account_type_id or currency_code does not exist")
        })?;

        tracing::debug!(account_id = model.account_id, "created account");
        Ok(model)
    }

    pub async fn account(&self, account_id: i32) -> ResultEngine<accounts::Model> {
        accounts::Entity::find_by_id(account_id)
            .one(self.db())
            .await?
            .ok_or_else(|| EngineError::KeyNotFound(format!("account {account_id}")))
    }

    /// List accounts with optional filters; returns the page plus the
    /// total row count before pagination.
    pub async fn list_accounts(
        &self,
        filter: &AccountFilter,
        page: Page,
    ) -> ResultEngine<(Vec<accounts::Model>, u64)> {
        let mut query = accounts::Entity::find();
        if let Some(type_id) = filter.account_type_id {
            query = query.filter(accounts::Column::AccountTypeId.eq(type_id));
        }
        if let Some(code) = &filter.currency_code {
            query = query.filter(accounts::Column::CurrencyCode.eq(code.clone()));
        }
        if let Some(closed) = filter.is_closed {
            query = query.filter(accounts::Column::IsClosed.eq(closed));
        }

        let total = query.clone().count(self.db()).await?;
        let items = query
            .order_by_asc(accounts::Column::AccountId)
            .offset(page.offset)
            .limit(page.limit)
            .all(self.db())
            .await?;

        Ok((items, total))
    }

    pub async fn update_account(
        &self,
        account_id: i32,
        patch: AccountPatch,
    ) -> ResultEngine<accounts::Model> {
        // Existence first, so callers can tell 404 from 422.
        self.account(account_id).await?;

        let mut active = accounts::ActiveModel {
            account_id: ActiveValue::Unchanged(account_id),
            ..Default::default()
        };
        if let Some(type_id) = patch.account_type_id {
            active.account_type_id = ActiveValue::Set(type_id);
        }
        if let Some(name) = patch.account_name {
            active.account_name = ActiveValue::Set(normalize_required_name(&name, "account")?);
        }
        if let Some(code) = patch.currency_code {
            active.currency_code = ActiveValue::Set(code);
        }
        if let Some(number) = patch.account_number {
            active.account_number = ActiveValue::Set(number);
        }
        if let Some(institution) = patch.institution_name {
            active.institution_name = ActiveValue::Set(institution);
        }
        if let Some(limit) = patch.credit_limit_minor {
            active.credit_limit_minor = ActiveValue::Set(limit);
        }
        if let Some(closed) = patch.is_closed {
            active.is_closed = ActiveValue::Set(closed);
        }
        if let Some(notes) = patch.notes {
            active.notes = ActiveValue::Set(notes);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        active.update(self.db()).await.map_err(|err| {
            EngineError::from_write(err, "account_type_id or currency_code does not exist")
        })
    }

    /// Delete an account. Fails with an invalid-reference error when
    /// transactions still point at it.
    pub async fn delete_account(&self, account_id: i32) -> ResultEngine<()> {
        let model = self.account(account_id).await?;
        model.delete(self.db()).await.map_err(|err| {
            EngineError::from_write(err, "account has existing transactions")
        })?;
        tracing::debug!(account_id, "deleted account");
        Ok(())
    }
}
