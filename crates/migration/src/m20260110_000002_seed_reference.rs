//! Seeds the read-only reference tables.
//!
//! Currencies and account types are reference data the API only ever
//! reads; they are loaded once here so a fresh database is immediately
//! usable.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Currencies {
    Table,
    CurrencyCode,
    CurrencyName,
    CurrencySymbol,
    DecimalPlaces,
    IsActive,
}

#[derive(Iden)]
enum AccountTypes {
    Table,
    TypeName,
    Description,
    IsAsset,
}

const CURRENCIES: &[(&str, &str, &str, i32)] = &[
    ("CAD", "Canadian Dollar", "$", 2),
    ("EUR", "Euro", "€", 2),
    ("GBP", "Pound Sterling", "£", 2),
    ("JPY", "Japanese Yen", "¥", 0),
    ("USD", "US Dollar", "$", 2),
];

const ACCOUNT_TYPES: &[(&str, &str, bool)] = &[
    ("cash", "Physical cash on hand", true),
    ("checking", "Day-to-day checking account", true),
    ("credit_card", "Revolving credit card account", false),
    ("investment", "Brokerage or retirement account", true),
    ("savings", "Interest-bearing savings account", true),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (code, name, symbol, decimals) in CURRENCIES {
            manager
                .exec_stmt(
                    Query::insert()
                        .into_table(Currencies::Table)
                        .columns([
                            Currencies::CurrencyCode,
                            Currencies::CurrencyName,
                            Currencies::CurrencySymbol,
                            Currencies::DecimalPlaces,
                            Currencies::IsActive,
                        ])
                        .values_panic([
                            (*code).into(),
                            (*name).into(),
                            (*symbol).into(),
                            (*decimals).into(),
                            true.into(),
                        ])
                        .to_owned(),
                )
                .await?;
        }

        for (name, description, is_asset) in ACCOUNT_TYPES {
            manager
                .exec_stmt(
                    Query::insert()
                        .into_table(AccountTypes::Table)
                        .columns([
                            AccountTypes::TypeName,
                            AccountTypes::Description,
                            AccountTypes::IsAsset,
                        ])
                        .values_panic([(*name).into(), (*description).into(), (*is_asset).into()])
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .exec_stmt(Query::delete().from_table(AccountTypes::Table).to_owned())
            .await?;
        manager
            .exec_stmt(Query::delete().from_table(Currencies::Table).to_owned())
            .await?;
        Ok(())
    }
}
