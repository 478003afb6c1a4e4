use chrono::Utc;
use sea_orm::{ActiveValue, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, prelude::*};

use crate::{
    EngineError, ResultEngine, TransactionKind, TransactionStatus, transactions,
};

use super::{Engine, Page};

/// Fields accepted when recording a transaction. Transfers are out of
/// scope; only income and expense kinds exist here.
#[derive(Clone, Debug)]
pub struct TransactionDraft {
    pub account_id: i32,
    pub kind: TransactionKind,
    pub amount_minor: i64,
    pub currency_code: String,
    pub transaction_date: chrono::NaiveDate,
    pub status: Option<TransactionStatus>,
    pub payee_id: Option<i32>,
    pub category_id: Option<i32>,
    pub description: Option<String>,
    pub reference_number: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct TransactionPatch {
    pub account_id: Option<i32>,
    pub kind: Option<TransactionKind>,
    pub amount_minor: Option<i64>,
    pub currency_code: Option<String>,
    pub transaction_date: Option<chrono::NaiveDate>,
    pub status: Option<TransactionStatus>,
    pub payee_id: Option<Option<i32>>,
    pub category_id: Option<Option<i32>>,
    pub description: Option<Option<String>>,
    pub reference_number: Option<Option<String>>,
    pub location: Option<Option<String>>,
    pub notes: Option<Option<String>>,
}

#[derive(Clone, Debug, Default)]
pub struct TransactionFilter {
    pub account_id: Option<i32>,
    pub kind: Option<TransactionKind>,
    pub status: Option<TransactionStatus>,
    pub category_id: Option<i32>,
    pub payee_id: Option<i32>,
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
}

const FK_CONTEXT: &str = "account_id, category_id, payee_id, or currency_code does not exist";

impl Engine {
    pub async fn create_transaction(
        &self,
        draft: TransactionDraft,
    ) -> ResultEngine<transactions::Model> {
        if draft.amount_minor <= 0 {
            return Err(EngineError::InvalidParameter(
                "amount_minor must be > 0".to_string(),
            ));
        }
        let now = Utc::now();

        let model = transactions::ActiveModel {
            transaction_id: ActiveValue::NotSet,
            account_id: ActiveValue::Set(draft.account_id),
            transaction_type: ActiveValue::Set(draft.kind.as_str().to_string()),
            amount_minor: ActiveValue::Set(draft.amount_minor),
            currency_code: ActiveValue::Set(draft.currency_code),
            transaction_date: ActiveValue::Set(draft.transaction_date),
            status: ActiveValue::Set(
                draft.status.unwrap_or(TransactionStatus::Cleared).as_str().to_string(),
            ),
            payee_id: ActiveValue::Set(draft.payee_id),
            category_id: ActiveValue::Set(draft.category_id),
            description: ActiveValue::Set(draft.description),
            reference_number: ActiveValue::Set(draft.reference_number),
            location: ActiveValue::Set(draft.location),
            notes: ActiveValue::Set(draft.notes),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db())
        .await
        .map_err(|err| EngineError::from_write(err, FK_CONTEXT))?;

        tracing::debug!(transaction_id = model.transaction_id, "created transaction");
        Ok(model)
    }

    /// List transactions newest first, with the total row count before
    /// pagination.
    pub async fn list_transactions(
        &self,
        filter: &TransactionFilter,
        page: Page,
    ) -> ResultEngine<(Vec<transactions::Model>, u64)> {
        let mut query = transactions::Entity::find();
        if let Some(account_id) = filter.account_id {
            query = query.filter(transactions::Column::AccountId.eq(account_id));
        }
        if let Some(kind) = filter.kind {
            query = query.filter(transactions::Column::TransactionType.eq(kind.as_str()));
        }
        if let Some(status) = filter.status {
            query = query.filter(transactions::Column::Status.eq(status.as_str()));
        }
        if let Some(category_id) = filter.category_id {
            query = query.filter(transactions::Column::CategoryId.eq(category_id));
        }
        if let Some(payee_id) = filter.payee_id {
            query = query.filter(transactions::Column::PayeeId.eq(payee_id));
        }
        if let Some(start) = filter.start_date {
            query = query.filter(transactions::Column::TransactionDate.gte(start));
        }
        if let Some(end) = filter.end_date {
            query = query.filter(transactions::Column::TransactionDate.lte(end));
        }

        let total = query.clone().count(self.db()).await?;
        let items = query
            .order_by_desc(transactions::Column::TransactionDate)
            .order_by_desc(transactions::Column::TransactionId)
            .offset(page.offset)
            .limit(page.limit)
            .all(self.db())
            .await?;

        Ok((items, total))
    }

    pub async fn transaction(&self, transaction_id: i32) -> ResultEngine<transactions::Model> {
        transactions::Entity::find_by_id(transaction_id)
            .one(self.db())
            .await?
            .ok_or_else(|| EngineError::KeyNotFound(format!("transaction {transaction_id}")))
    }

    pub async fn update_transaction(
        &self,
        transaction_id: i32,
        patch: TransactionPatch,
    ) -> ResultEngine<transactions::Model> {
        self.transaction(transaction_id).await?;

        if let Some(amount) = patch.amount_minor {
            if amount <= 0 {
                return Err(EngineError::InvalidParameter(
                    "amount_minor must be > 0".to_string(),
                ));
            }
        }

        let mut active = transactions::ActiveModel {
            transaction_id: ActiveValue::Unchanged(transaction_id),
            ..Default::default()
        };
        if let Some(account_id) = patch.account_id {
            active.account_id = ActiveValue::Set(account_id);
        }
        if let Some(kind) = patch.kind {
            active.transaction_type = ActiveValue::Set(kind.as_str().to_string());
        }
        if let Some(amount) = patch.amount_minor {
            active.amount_minor = ActiveValue::Set(amount);
        }
        if let Some(code) = patch.currency_code {
            active.currency_code = ActiveValue::Set(code);
        }
        if let Some(date) = patch.transaction_date {
            active.transaction_date = ActiveValue::Set(date);
        }
        if let Some(status) = patch.status {
            active.status = ActiveValue::Set(status.as_str().to_string());
        }
        if let Some(payee_id) = patch.payee_id {
            active.payee_id = ActiveValue::Set(payee_id);
        }
        if let Some(category_id) = patch.category_id {
            active.category_id = ActiveValue::Set(category_id);
        }
        if let Some(description) = patch.description {
            active.description = ActiveValue::Set(description);
        }
        if let Some(reference) = patch.reference_number {
            active.reference_number = ActiveValue::Set(reference);
        }
        if let Some(location) = patch.location {
            active.location = ActiveValue::Set(location);
        }
        if let Some(notes) = patch.notes {
            active.notes = ActiveValue::Set(notes);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        active
            .update(self.db())
            .await
            .map_err(|err| EngineError::from_write(err, FK_CONTEXT))
    }

    pub async fn delete_transaction(&self, transaction_id: i32) -> ResultEngine<()> {
        let model = self.transaction(transaction_id).await?;
        model.delete(self.db()).await?;
        tracing::debug!(transaction_id, "deleted transaction");
        Ok(())
    }
}
