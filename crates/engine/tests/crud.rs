use chrono::NaiveDate;
use sea_orm::Database;

use engine::{
    AccountDraft, AccountFilter, AccountPatch, CategoryDraft, CategoryKind, Engine, EngineError,
    Page, PayeeDraft, PayeeFilter, PayeePatch, TransactionDraft, TransactionFilter,
    TransactionKind, TransactionStatus,
};
use migration::MigratorTrait;

async fn engine_with_db() -> Engine {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    Engine::builder().database(db).build()
}

fn account_draft(name: &str) -> AccountDraft {
    AccountDraft {
        account_type_id: 2,
        account_name: name.to_string(),
        currency_code: None,
        opening_balance_minor: None,
        opening_balance_date: None,
        account_number: None,
        institution_name: None,
        credit_limit_minor: None,
        is_closed: None,
        notes: None,
    }
}

fn expense_draft(account_id: i32, amount_minor: i64, date: &str) -> TransactionDraft {
    TransactionDraft {
        account_id,
        kind: TransactionKind::Expense,
        amount_minor,
        currency_code: "USD".to_string(),
        transaction_date: date.parse::<NaiveDate>().unwrap(),
        status: None,
        payee_id: None,
        category_id: None,
        description: None,
        reference_number: None,
        location: None,
        notes: None,
    }
}

const FIRST_PAGE: Page = Page {
    limit: 50,
    offset: 0,
};

#[tokio::test]
async fn new_account_gets_schema_defaults() {
    let engine = engine_with_db().await;

    let account = engine.create_account(account_draft("Everyday")).await.unwrap();

    assert_eq!(account.currency_code, "USD");
    assert_eq!(account.opening_balance_minor, 0);
    assert_eq!(account.current_balance_minor, 0);
    assert!(!account.is_closed);
}

#[tokio::test]
async fn opening_balance_seeds_current_balance() {
    let engine = engine_with_db().await;

    let mut draft = account_draft("Savings");
    draft.opening_balance_minor = Some(250_00);
    draft.opening_balance_date = Some("2026-01-01".parse().unwrap());
    let account = engine.create_account(draft).await.unwrap();

    assert_eq!(account.opening_balance_minor, 25000);
    assert_eq!(account.current_balance_minor, 25000);
    assert_eq!(
        account.opening_balance_date,
        "2026-01-01".parse::<NaiveDate>().unwrap()
    );
}

#[tokio::test]
async fn missing_account_is_key_not_found() {
    let engine = engine_with_db().await;

    let err = engine.account(42).await.unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("account 42".to_string()));
}

#[tokio::test]
async fn account_with_unknown_type_is_invalid_reference() {
    let engine = engine_with_db().await;

    let mut draft = account_draft("Ghost");
    draft.account_type_id = 999;
    let err = engine.create_account(draft).await.unwrap_err();

    assert!(matches!(err, EngineError::InvalidReference(_)));
}

#[tokio::test]
async fn blank_account_name_is_rejected() {
    let engine = engine_with_db().await;

    let err = engine.create_account(account_draft("   ")).await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidParameter(_)));
}

#[tokio::test]
async fn account_list_pages_and_reports_total() {
    let engine = engine_with_db().await;

    for name in ["A", "B", "C"] {
        engine.create_account(account_draft(name)).await.unwrap();
    }

    let (items, total) = engine
        .list_accounts(
            &AccountFilter::default(),
            Page {
                limit: 2,
                offset: 0,
            },
        )
        .await
        .unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(total, 3);

    let (rest, total) = engine
        .list_accounts(
            &AccountFilter::default(),
            Page {
                limit: 2,
                offset: 2,
            },
        )
        .await
        .unwrap();
    assert_eq!(rest.len(), 1);
    assert_eq!(total, 3);
    assert_eq!(rest[0].account_name, "C");
}

#[tokio::test]
async fn account_list_filters_by_closed_flag() {
    let engine = engine_with_db().await;

    engine.create_account(account_draft("Open")).await.unwrap();
    let mut closed = account_draft("Closed");
    closed.is_closed = Some(true);
    engine.create_account(closed).await.unwrap();

    let filter = AccountFilter {
        is_closed: Some(true),
        ..Default::default()
    };
    let (items, total) = engine.list_accounts(&filter, FIRST_PAGE).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].account_name, "Closed");
}

#[tokio::test]
async fn account_patch_touches_only_given_fields() {
    let engine = engine_with_db().await;

    let mut draft = account_draft("Main");
    draft.opening_balance_minor = Some(10_00);
    let account = engine.create_account(draft).await.unwrap();

    let patch = AccountPatch {
        institution_name: Some(Some("First National".to_string())),
        ..Default::default()
    };
    let updated = engine.update_account(account.account_id, patch).await.unwrap();

    assert_eq!(updated.institution_name.as_deref(), Some("First National"));
    assert_eq!(updated.account_name, "Main");
    assert_eq!(updated.opening_balance_minor, 1000);
    assert!(updated.updated_at >= account.updated_at);
}

#[tokio::test]
async fn account_with_transactions_cannot_be_deleted() {
    let engine = engine_with_db().await;

    let account = engine.create_account(account_draft("Main")).await.unwrap();
    engine
        .create_transaction(expense_draft(account.account_id, 4_50, "2026-01-15"))
        .await
        .unwrap();

    let err = engine.delete_account(account.account_id).await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidReference(_)));

    // Still there.
    assert!(engine.account(account.account_id).await.is_ok());
}

#[tokio::test]
async fn transaction_status_defaults_to_cleared() {
    let engine = engine_with_db().await;

    let account = engine.create_account(account_draft("Main")).await.unwrap();
    let tx = engine
        .create_transaction(expense_draft(account.account_id, 4_50, "2026-01-15"))
        .await
        .unwrap();

    assert_eq!(tx.status, "cleared");
    assert_eq!(tx.transaction_type, "expense");
}

#[tokio::test]
async fn non_positive_amount_is_rejected() {
    let engine = engine_with_db().await;

    let account = engine.create_account(account_draft("Main")).await.unwrap();
    let err = engine
        .create_transaction(expense_draft(account.account_id, 0, "2026-01-15"))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        EngineError::InvalidParameter("amount_minor must be > 0".to_string())
    );
}

#[tokio::test]
async fn transaction_list_orders_newest_first_and_filters() {
    let engine = engine_with_db().await;

    let account = engine.create_account(account_draft("Main")).await.unwrap();
    for date in ["2026-01-10", "2026-02-10", "2026-03-10"] {
        engine
            .create_transaction(expense_draft(account.account_id, 10_00, date))
            .await
            .unwrap();
    }
    let mut income = expense_draft(account.account_id, 500_00, "2026-02-01");
    income.kind = TransactionKind::Income;
    engine.create_transaction(income).await.unwrap();

    let (all, total) = engine
        .list_transactions(&TransactionFilter::default(), FIRST_PAGE)
        .await
        .unwrap();
    assert_eq!(total, 4);
    assert_eq!(
        all[0].transaction_date,
        "2026-03-10".parse::<NaiveDate>().unwrap()
    );

    let filter = TransactionFilter {
        kind: Some(TransactionKind::Income),
        ..Default::default()
    };
    let (incomes, total) = engine.list_transactions(&filter, FIRST_PAGE).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(incomes[0].amount_minor, 50000);

    let filter = TransactionFilter {
        start_date: Some("2026-02-01".parse().unwrap()),
        end_date: Some("2026-02-28".parse().unwrap()),
        ..Default::default()
    };
    let (february, total) = engine.list_transactions(&filter, FIRST_PAGE).await.unwrap();
    assert_eq!(total, 2);
    assert!(february.iter().all(|tx| {
        tx.transaction_date >= "2026-02-01".parse::<NaiveDate>().unwrap()
            && tx.transaction_date <= "2026-02-28".parse::<NaiveDate>().unwrap()
    }));
}

#[tokio::test]
async fn transaction_patch_can_void_and_clear_category() {
    let engine = engine_with_db().await;

    let account = engine.create_account(account_draft("Main")).await.unwrap();
    let category = engine
        .create_category(CategoryDraft {
            category_name: "Groceries".to_string(),
            kind: CategoryKind::Expense,
            category_group: None,
            color_code: None,
            icon_name: None,
            is_active: None,
        })
        .await
        .unwrap();

    let mut draft = expense_draft(account.account_id, 20_00, "2026-01-15");
    draft.category_id = Some(category.category_id);
    let tx = engine.create_transaction(draft).await.unwrap();

    let patch = engine::TransactionPatch {
        status: Some(TransactionStatus::Void),
        category_id: Some(None),
        ..Default::default()
    };
    let updated = engine
        .update_transaction(tx.transaction_id, patch)
        .await
        .unwrap();

    assert_eq!(updated.status, "void");
    assert_eq!(updated.category_id, None);
}

#[tokio::test]
async fn category_names_are_normalized() {
    let engine = engine_with_db().await;

    let category = engine
        .create_category(CategoryDraft {
            category_name: "  Caffè  ".to_string(),
            kind: CategoryKind::Expense,
            category_group: Some("Food".to_string()),
            color_code: None,
            icon_name: None,
            is_active: None,
        })
        .await
        .unwrap();

    assert_eq!(category.category_name, "Caffè");
    assert!(category.is_active);
}

#[tokio::test]
async fn payee_with_unknown_category_is_rejected() {
    let engine = engine_with_db().await;

    let err = engine
        .create_payee(PayeeDraft {
            payee_name: "Corner Shop".to_string(),
            default_category_id: Some(999),
            notes: None,
            is_active: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, EngineError::InvalidReference(_)));
}

#[tokio::test]
async fn payee_patch_can_clear_default_category() {
    let engine = engine_with_db().await;

    let category = engine
        .create_category(CategoryDraft {
            category_name: "Groceries".to_string(),
            kind: CategoryKind::Expense,
            category_group: None,
            color_code: None,
            icon_name: None,
            is_active: None,
        })
        .await
        .unwrap();
    let payee = engine
        .create_payee(PayeeDraft {
            payee_name: "Corner Shop".to_string(),
            default_category_id: Some(category.category_id),
            notes: None,
            is_active: None,
        })
        .await
        .unwrap();

    let patch = PayeePatch {
        default_category_id: Some(None),
        ..Default::default()
    };
    let updated = engine.update_payee(payee.payee_id, patch).await.unwrap();

    assert_eq!(updated.default_category_id, None);
    assert_eq!(updated.payee_name, "Corner Shop");
}

#[tokio::test]
async fn payees_list_alphabetically() {
    let engine = engine_with_db().await;

    for name in ["Zed Cafe", "Acme Corp", "Midtown Gym"] {
        engine
            .create_payee(PayeeDraft {
                payee_name: name.to_string(),
                default_category_id: None,
                notes: None,
                is_active: None,
            })
            .await
            .unwrap();
    }

    let (payees, _) = engine
        .list_payees(&PayeeFilter::default(), FIRST_PAGE)
        .await
        .unwrap();
    let names: Vec<_> = payees.iter().map(|p| p.payee_name.as_str()).collect();
    assert_eq!(names, ["Acme Corp", "Midtown Gym", "Zed Cafe"]);
}

#[tokio::test]
async fn reference_data_is_seeded_and_sorted() {
    let engine = engine_with_db().await;

    let types = engine.account_types().await.unwrap();
    assert_eq!(types.len(), 5);
    assert_eq!(types[0].type_name, "cash");
    assert_eq!(types[4].type_name, "savings");

    let currencies = engine.currencies(true).await.unwrap();
    assert_eq!(currencies.len(), 5);
    assert_eq!(currencies[0].currency_code, "CAD");
    assert!(currencies.iter().all(|c| c.is_active));
}

#[tokio::test]
async fn active_categories_skip_disabled_and_sort_by_group() {
    let engine = engine_with_db().await;

    for (name, group, active) in [
        ("Rent", Some("Housing"), true),
        ("Coffee", Some("Food"), true),
        ("Pager", Some("Bills"), false),
    ] {
        engine
            .create_category(CategoryDraft {
                category_name: name.to_string(),
                kind: CategoryKind::Expense,
                category_group: group.map(str::to_string),
                color_code: None,
                icon_name: None,
                is_active: Some(active),
            })
            .await
            .unwrap();
    }

    let categories = engine.active_categories().await.unwrap();
    let names: Vec<_> = categories.iter().map(|c| c.category_name.as_str()).collect();
    assert_eq!(names, ["Coffee", "Rent"]);
}
