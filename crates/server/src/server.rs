use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use std::sync::Arc;

use api_types::health::Health;
use engine::Engine;

use crate::{accounts, categories, payees, reference, schema, transactions};

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub environment: Arc<str>,
}

async fn health(State(state): State<ServerState>) -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
        environment: state.environment.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

fn router(state: ServerState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/accounts", post(accounts::create).get(accounts::list))
        .route(
            "/accounts/{account_id}",
            get(accounts::get)
                .put(accounts::update)
                .patch(accounts::update)
                .delete(accounts::remove),
        )
        .route(
            "/transactions",
            post(transactions::create).get(transactions::list),
        )
        .route(
            "/transactions/{transaction_id}",
            get(transactions::get)
                .patch(transactions::update)
                .delete(transactions::remove),
        )
        .route("/categories", post(categories::create).get(categories::list))
        .route(
            "/categories/{category_id}",
            get(categories::get)
                .put(categories::update)
                .patch(categories::update)
                .delete(categories::remove),
        )
        .route("/payees", post(payees::create).get(payees::list))
        .route(
            "/payees/{payee_id}",
            get(payees::get)
                .put(payees::update)
                .patch(payees::update)
                .delete(payees::remove),
        )
        .route("/reference/account-types", get(reference::account_types))
        .route("/reference/currencies", get(reference::currencies))
        .route("/schema", get(schema::full))
        .route("/schema/reference-data", get(schema::reference_data))
        .route("/schema/tables", get(schema::tables))
        .route("/schema/tables/{table_name}", get(schema::table))
        .route("/schema/relationships", get(schema::relationships))
        .with_state(state)
}

pub async fn run(engine: Engine, environment: String, bind: &str) {
    let listener = match tokio::net::TcpListener::bind(bind).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, environment, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    environment: String,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
        environment: environment.into(),
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    environment: String,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, environment, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use migration::MigratorTrait;
    use sea_orm::{
        ActiveModelTrait, ActiveValue, Database, DatabaseBackend, DatabaseConnection, MockDatabase,
    };
    use serde_json::{Value, json};
    use std::collections::BTreeMap;
    use tower::ServiceExt;

    fn state_with(engine: Engine) -> ServerState {
        ServerState {
            engine: Arc::new(engine),
            environment: "test".into(),
        }
    }

    async fn sqlite_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        migration::Migrator::up(&db, None).await.unwrap();
        db
    }

    async fn sqlite_router() -> Router {
        let db = sqlite_db().await;
        router(state_with(Engine::builder().database(db).build()))
    }

    fn request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder().method(method).uri(uri);
        match body {
            Some(value) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(value.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_reports_environment() {
        let app = sqlite_router().await;
        let response = app.oneshot(request("GET", "/health", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["environment"], "test");
    }

    #[tokio::test]
    async fn account_crud_round_trip() {
        let app = sqlite_router().await;

        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/accounts",
                Some(json!({
                    "account_type_id": 2,
                    "account_name": "Everyday Checking",
                    "opening_balance_minor": 125_00
                })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;
        assert_eq!(created["currency_code"], "USD");
        assert_eq!(created["current_balance_minor"], 12500);
        let id = created["account_id"].as_i64().unwrap();

        let response = app
            .clone()
            .oneshot(request("GET", &format!("/accounts/{id}"), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(request(
                "PATCH",
                &format!("/accounts/{id}"),
                Some(json!({ "institution_name": "First National" })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let patched = body_json(response).await;
        assert_eq!(patched["institution_name"], "First National");
        assert_eq!(patched["account_name"], "Everyday Checking");

        let response = app
            .clone()
            .oneshot(request("DELETE", &format!("/accounts/{id}"), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .oneshot(request("GET", &format!("/accounts/{id}"), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn account_with_unknown_type_is_rejected() {
        let app = sqlite_router().await;

        let response = app
            .oneshot(request(
                "POST",
                "/accounts",
                Some(json!({
                    "account_type_id": 999,
                    "account_name": "Ghost"
                })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn transaction_flow_with_filters() {
        let app = sqlite_router().await;

        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/accounts",
                Some(json!({ "account_type_id": 2, "account_name": "Main" })),
            ))
            .await
            .unwrap();
        let account = body_json(response).await;
        let account_id = account["account_id"].as_i64().unwrap();

        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/transactions",
                Some(json!({
                    "account_id": account_id,
                    "transaction_type": "expense",
                    "amount_minor": 4_50,
                    "currency_code": "USD",
                    "transaction_date": "2026-01-15",
                    "description": "coffee"
                })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let tx = body_json(response).await;
        assert_eq!(tx["status"], "cleared");

        let response = app
            .clone()
            .oneshot(request(
                "GET",
                &format!("/transactions?account_id={account_id}&transaction_type=expense"),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let listed = body_json(response).await;
        assert_eq!(listed["pagination"]["total"], 1);
        assert_eq!(listed["data"][0]["description"], "coffee");

        // The account cannot go away while the transaction references it.
        let response = app
            .clone()
            .oneshot(request("DELETE", &format!("/accounts/{account_id}"), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let response = app
            .oneshot(request(
                "POST",
                "/transactions",
                Some(json!({
                    "account_id": account_id,
                    "transaction_type": "expense",
                    "amount_minor": 0,
                    "currency_code": "USD",
                    "transaction_date": "2026-01-15"
                })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "INVALID_PARAMETER");
    }

    #[tokio::test]
    async fn patch_null_clears_a_nullable_field() {
        let app = sqlite_router().await;

        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/accounts",
                Some(json!({
                    "account_type_id": 2,
                    "account_name": "Main",
                    "notes": "keep me"
                })),
            ))
            .await
            .unwrap();
        let created = body_json(response).await;
        assert_eq!(created["notes"], "keep me");
        let id = created["account_id"].as_i64().unwrap();

        // Absent field stays untouched.
        let response = app
            .clone()
            .oneshot(request(
                "PATCH",
                &format!("/accounts/{id}"),
                Some(json!({ "is_closed": true })),
            ))
            .await
            .unwrap();
        let patched = body_json(response).await;
        assert_eq!(patched["notes"], "keep me");

        // Explicit null clears it.
        let response = app
            .oneshot(request(
                "PATCH",
                &format!("/accounts/{id}"),
                Some(json!({ "notes": null })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let cleared = body_json(response).await;
        assert_eq!(cleared["notes"], Value::Null);
    }

    #[tokio::test]
    async fn list_rejects_out_of_range_limit() {
        let app = sqlite_router().await;
        let response = app
            .oneshot(request("GET", "/accounts?limit=0", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "INVALID_PARAMETER");
    }

    #[tokio::test]
    async fn reference_data_is_seeded() {
        let app = sqlite_router().await;

        let response = app
            .clone()
            .oneshot(request("GET", "/reference/account-types", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let types = body_json(response).await;
        assert_eq!(types.as_array().unwrap().len(), 5);
        assert_eq!(types[0]["type_name"], "cash");

        let response = app
            .oneshot(request("GET", "/reference/currencies?active_only=true", None))
            .await
            .unwrap();
        let currencies = body_json(response).await;
        assert_eq!(currencies[0]["currency_code"], "CAD");
    }

    #[tokio::test]
    async fn payees_allow_wider_pages_than_accounts() {
        let app = sqlite_router().await;

        let response = app
            .clone()
            .oneshot(request("GET", "/payees?limit=200", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["pagination"]["limit"], 200);

        let response = app
            .oneshot(request("GET", "/payees?limit=201", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    async fn insert_inactive_currency(db: &DatabaseConnection) {
        engine::currencies::ActiveModel {
            currency_code: ActiveValue::Set("XXX".to_string()),
            currency_name: ActiveValue::Set("Testing Code".to_string()),
            currency_symbol: ActiveValue::Set(None),
            decimal_places: ActiveValue::Set(2),
            is_active: ActiveValue::Set(false),
        }
        .insert(db)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn inactive_currencies_are_hidden_by_default() {
        let db = sqlite_db().await;
        insert_inactive_currency(&db).await;
        let app = router(state_with(Engine::builder().database(db).build()));

        let response = app
            .clone()
            .oneshot(request("GET", "/reference/currencies", None))
            .await
            .unwrap();
        let currencies = body_json(response).await;
        assert!(
            currencies
                .as_array()
                .unwrap()
                .iter()
                .all(|c| c["currency_code"] != "XXX")
        );

        let response = app
            .oneshot(request("GET", "/reference/currencies?active_only=false", None))
            .await
            .unwrap();
        let currencies = body_json(response).await;
        assert!(
            currencies
                .as_array()
                .unwrap()
                .iter()
                .any(|c| c["currency_code"] == "XXX")
        );
    }

    #[tokio::test]
    async fn reference_data_rejects_unknown_type() {
        let app = sqlite_router().await;

        let response = app
            .clone()
            .oneshot(request("GET", "/schema/reference-data?type=bananas", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "INVALID_PARAMETER");

        let response = app
            .oneshot(request("GET", "/schema/reference-data", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn reference_data_lists_active_categories() {
        let app = sqlite_router().await;

        for (name, active) in [("Groceries", true), ("Old Stuff", false)] {
            let response = app
                .clone()
                .oneshot(request(
                    "POST",
                    "/categories",
                    Some(json!({
                        "category_name": name,
                        "category_type": "expense",
                        "is_active": active
                    })),
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let response = app
            .clone()
            .oneshot(request("GET", "/schema/reference-data?type=categories", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["data_type"], "categories");
        let rows = body["data"].as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["category_name"], "Groceries");

        let response = app
            .oneshot(request("GET", "/schema/reference-data?type=all", None))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["data_type"], "all");
        assert_eq!(body["data"]["currencies"].as_array().unwrap().len(), 5);
        assert_eq!(body["data"]["account_types"].as_array().unwrap().len(), 5);
        assert_eq!(body["data"]["categories"].as_array().unwrap().len(), 1);
    }

    fn mock_router(db: MockDatabase) -> Router {
        let engine = Engine::builder().database(db.into_connection()).build();
        router(state_with(engine))
    }

    fn name_row(name: &str) -> BTreeMap<&'static str, sea_orm::Value> {
        BTreeMap::from([("table_name", sea_orm::Value::from(name))])
    }

    #[tokio::test]
    async fn schema_tables_lists_names() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![name_row("accounts"), name_row("currencies")]]);

        let response = mock_router(db)
            .oneshot(request("GET", "/schema/tables", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body, json!(["accounts", "currencies"]));
    }

    #[tokio::test]
    async fn unknown_table_is_a_structured_404() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<BTreeMap<&str, sea_orm::Value>>::new()]);

        let response = mock_router(db)
            .oneshot(request("GET", "/schema/tables/ghost_table", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert_eq!(body["error"]["details"]["table_name"], "ghost_table");
        assert_eq!(body["error"]["details"]["schema"], "public");
    }

    #[tokio::test]
    async fn schema_relationships_returns_edges() {
        let edge = BTreeMap::from([
            ("from_table", sea_orm::Value::from("transactions")),
            ("from_column", sea_orm::Value::from("account_id")),
            ("to_table", sea_orm::Value::from("accounts")),
            ("to_column", sea_orm::Value::from("account_id")),
            (
                "constraint_name",
                sea_orm::Value::from("fk-transactions-account_id"),
            ),
        ]);
        let db =
            MockDatabase::new(DatabaseBackend::Postgres).append_query_results([vec![edge]]);

        let response = mock_router(db)
            .oneshot(request("GET", "/schema/relationships", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body[0]["from_table"], "transactions");
        assert_eq!(body[0]["to_column"], "account_id");
    }
}
