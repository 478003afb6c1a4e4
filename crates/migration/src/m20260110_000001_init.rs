//! Initial schema migration - creates all tables from scratch.
//!
//! The fixed expense-tracking schema:
//!
//! - `currencies`: ISO currency reference data
//! - `account_types`: account kind reference data (checking, savings, ...)
//! - `categories`: income/expense/transfer categories
//! - `payees`: transaction counterparties
//! - `accounts`: financial accounts
//! - `transactions`: individual income/expense records

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

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
    AccountTypeId,
    TypeName,
    Description,
    IsAsset,
}

#[derive(Iden)]
enum Categories {
    Table,
    CategoryId,
    CategoryName,
    CategoryType,
    CategoryGroup,
    ColorCode,
    IconName,
    IsActive,
    CreatedAt,
}

#[derive(Iden)]
enum Payees {
    Table,
    PayeeId,
    PayeeName,
    DefaultCategoryId,
    Notes,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Accounts {
    Table,
    AccountId,
    AccountTypeId,
    AccountName,
    AccountNumber,
    InstitutionName,
    CurrencyCode,
    OpeningBalanceMinor,
    CurrentBalanceMinor,
    CreditLimitMinor,
    IsClosed,
    Notes,
    OpeningBalanceDate,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Transactions {
    Table,
    TransactionId,
    AccountId,
    TransactionType,
    AmountMinor,
    CurrencyCode,
    TransactionDate,
    Status,
    PayeeId,
    CategoryId,
    Description,
    ReferenceNumber,
    Location,
    Notes,
    CreatedAt,
    UpdatedAt,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Currencies
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Currencies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Currencies::CurrencyCode)
                            .string_len(3)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Currencies::CurrencyName)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Currencies::CurrencySymbol).string_len(10))
                    .col(
                        ColumnDef::new(Currencies::DecimalPlaces)
                            .integer()
                            .not_null()
                            .default(2),
                    )
                    .col(
                        ColumnDef::new(Currencies::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Account types
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(AccountTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AccountTypes::AccountTypeId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AccountTypes::TypeName)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(AccountTypes::Description).text())
                    .col(
                        ColumnDef::new(AccountTypes::IsAsset)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Categories
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Categories::CategoryId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Categories::CategoryName)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Categories::CategoryType)
                            .string_len(20)
                            .not_null()
                            .check(
                                Expr::col(Categories::CategoryType)
                                    .is_in(["income", "expense", "transfer"]),
                            ),
                    )
                    .col(ColumnDef::new(Categories::CategoryGroup).string_len(50))
                    .col(ColumnDef::new(Categories::ColorCode).string_len(7))
                    .col(ColumnDef::new(Categories::IconName).string_len(50))
                    .col(
                        ColumnDef::new(Categories::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Categories::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Payees
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Payees::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Payees::PayeeId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Payees::PayeeName).string_len(100).not_null())
                    .col(ColumnDef::new(Payees::DefaultCategoryId).integer())
                    .col(ColumnDef::new(Payees::Notes).text())
                    .col(
                        ColumnDef::new(Payees::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Payees::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Payees::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-payees-default_category_id")
                            .from(Payees::Table, Payees::DefaultCategoryId)
                            .to(Categories::Table, Categories::CategoryId),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 5. Accounts
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Accounts::AccountId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Accounts::AccountTypeId).integer().not_null())
                    .col(
                        ColumnDef::new(Accounts::AccountName)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Accounts::AccountNumber).string_len(50))
                    .col(ColumnDef::new(Accounts::InstitutionName).string_len(100))
                    .col(
                        ColumnDef::new(Accounts::CurrencyCode)
                            .string_len(3)
                            .not_null()
                            .default("USD"),
                    )
                    .col(
                        ColumnDef::new(Accounts::OpeningBalanceMinor)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Accounts::CurrentBalanceMinor)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Accounts::CreditLimitMinor).big_integer())
                    .col(
                        ColumnDef::new(Accounts::IsClosed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Accounts::Notes).text())
                    .col(ColumnDef::new(Accounts::OpeningBalanceDate).date().not_null())
                    .col(
                        ColumnDef::new(Accounts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Accounts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-accounts-account_type_id")
                            .from(Accounts::Table, Accounts::AccountTypeId)
                            .to(AccountTypes::Table, AccountTypes::AccountTypeId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-accounts-currency_code")
                            .from(Accounts::Table, Accounts::CurrencyCode)
                            .to(Currencies::Table, Currencies::CurrencyCode),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 6. Transactions
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transactions::TransactionId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Transactions::AccountId).integer().not_null())
                    .col(
                        ColumnDef::new(Transactions::TransactionType)
                            .string_len(20)
                            .not_null()
                            .check(
                                Expr::col(Transactions::TransactionType)
                                    .is_in(["income", "expense", "transfer"]),
                            ),
                    )
                    .col(
                        ColumnDef::new(Transactions::AmountMinor)
                            .big_integer()
                            .not_null()
                            .check(Expr::col(Transactions::AmountMinor).gt(0)),
                    )
                    .col(
                        ColumnDef::new(Transactions::CurrencyCode)
                            .string_len(3)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::TransactionDate)
                            .date()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::Status)
                            .string_len(20)
                            .not_null()
                            .default("cleared")
                            .check(
                                Expr::col(Transactions::Status)
                                    .is_in(["pending", "cleared", "reconciled", "void"]),
                            ),
                    )
                    .col(ColumnDef::new(Transactions::PayeeId).integer())
                    .col(ColumnDef::new(Transactions::CategoryId).integer())
                    .col(ColumnDef::new(Transactions::Description).string_len(255))
                    .col(ColumnDef::new(Transactions::ReferenceNumber).string_len(50))
                    .col(ColumnDef::new(Transactions::Location).string_len(255))
                    .col(ColumnDef::new(Transactions::Notes).text())
                    .col(
                        ColumnDef::new(Transactions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-transactions-account_id")
                            .from(Transactions::Table, Transactions::AccountId)
                            .to(Accounts::Table, Accounts::AccountId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-transactions-currency_code")
                            .from(Transactions::Table, Transactions::CurrencyCode)
                            .to(Currencies::Table, Currencies::CurrencyCode),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-transactions-payee_id")
                            .from(Transactions::Table, Transactions::PayeeId)
                            .to(Payees::Table, Payees::PayeeId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-transactions-category_id")
                            .from(Transactions::Table, Transactions::CategoryId)
                            .to(Categories::Table, Categories::CategoryId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-transactions-account_id-date")
                    .table(Transactions::Table)
                    .col(Transactions::AccountId)
                    .col(Transactions::TransactionDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Accounts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Payees::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AccountTypes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Currencies::Table).to_owned())
            .await?;
        Ok(())
    }
}
