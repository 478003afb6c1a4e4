//! `accounts` table.
//!
//! Money amounts are stored as integer minor units (cents for
//! two-decimal currencies). `current_balance_minor` is carried but
//! never recomputed here; balance maintenance lives outside this
//! service.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub account_id: i32,
    pub account_type_id: i32,
    pub account_name: String,
    pub account_number: Option<String>,
    pub institution_name: Option<String>,
    pub currency_code: String,
    pub opening_balance_minor: i64,
    pub current_balance_minor: i64,
    pub credit_limit_minor: Option<i64>,
    pub is_closed: bool,
    pub notes: Option<String>,
    pub opening_balance_date: chrono::NaiveDate,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::account_types::Entity",
        from = "Column::AccountTypeId",
        to = "super::account_types::Column::AccountTypeId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    AccountTypes,
    #[sea_orm(
        belongs_to = "super::currencies::Entity",
        from = "Column::CurrencyCode",
        to = "super::currencies::Column::CurrencyCode",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Currencies,
    #[sea_orm(has_many = "super::transactions::Entity")]
    Transactions,
}

impl Related<super::account_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccountTypes.def()
    }
}

impl Related<super::currencies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Currencies.def()
    }
}

impl Related<super::transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
