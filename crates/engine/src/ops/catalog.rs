//! Schema discovery against `information_schema`.
//!
//! Read-only, parameterized queries scoped to the `public` schema and
//! to base tables (views and the system schemas never appear). The SQL
//! targets PostgreSQL's catalog views; tests drive these operations
//! through a mocked Postgres backend.
//!
//! A snapshot is assembled per call and either completes or fails as a
//! whole: no caching, no retries, no partial documents.

use sea_orm::{ConnectionTrait, Statement, Value};

use crate::catalog::{ColumnInfo, ConstraintInfo, FkEdge, SchemaSnapshot, TableInfo};
use crate::{EngineError, ResultEngine};

use super::Engine;

const TABLE_NAMES_SQL: &str = "\
    SELECT table_name \
    FROM information_schema.tables \
    WHERE table_schema = 'public' AND table_type = 'BASE TABLE' \
    ORDER BY table_name";

const TABLE_EXISTS_SQL: &str = "\
    SELECT table_name, table_type \
    FROM information_schema.tables \
    WHERE table_schema = 'public' AND table_type = 'BASE TABLE' \
      AND table_name = $1";

const COLUMNS_SQL: &str = "\
    SELECT column_name, data_type, is_nullable, column_default, \
           character_maximum_length, numeric_precision, numeric_scale \
    FROM information_schema.columns \
    WHERE table_schema = 'public' AND table_name = $1 \
    ORDER BY ordinal_position";

const CONSTRAINTS_SQL: &str = "\
    SELECT tc.constraint_name, tc.constraint_type, kcu.column_name, \
           ccu.table_name AS foreign_table_name, \
           ccu.column_name AS foreign_column_name \
    FROM information_schema.table_constraints tc \
    LEFT JOIN information_schema.key_column_usage kcu \
        ON tc.constraint_name = kcu.constraint_name \
        AND tc.table_schema = kcu.table_schema \
    LEFT JOIN information_schema.constraint_column_usage ccu \
        ON tc.constraint_name = ccu.constraint_name \
        AND tc.table_schema = ccu.table_schema \
    WHERE tc.table_schema = 'public' AND tc.table_name = $1 \
    ORDER BY tc.constraint_name";

const RELATIONSHIPS_SQL: &str = "\
    SELECT tc.table_name AS from_table, kcu.column_name AS from_column, \
           ccu.table_name AS to_table, ccu.column_name AS to_column, \
           tc.constraint_name \
    FROM information_schema.table_constraints tc \
    JOIN information_schema.key_column_usage kcu \
        ON tc.constraint_name = kcu.constraint_name \
        AND tc.table_schema = kcu.table_schema \
    JOIN information_schema.constraint_column_usage ccu \
        ON tc.constraint_name = ccu.constraint_name \
        AND tc.table_schema = ccu.table_schema \
    WHERE tc.table_schema = 'public' \
      AND tc.constraint_type = 'FOREIGN KEY' \
    ORDER BY tc.table_name, kcu.column_name";

impl Engine {
    /// Base-table names of the public schema, sorted alphabetically.
    /// An empty schema yields an empty vec, not an error.
    pub async fn table_names(&self) -> ResultEngine<Vec<String>> {
        let stmt = Statement::from_string(self.db().get_database_backend(), TABLE_NAMES_SQL);
        let rows = self.db().query_all(stmt).await.map_err(|err| {
            tracing::error!("table list query failed: {err}");
            EngineError::from(err)
        })?;

        let mut names = Vec::with_capacity(rows.len());
        for row in rows {
            names.push(row.try_get::<String>("", "table_name")?);
        }
        Ok(names)
    }

    /// Columns of one table, in ordinal position. An unknown table
    /// simply yields an empty vec; existence is checked separately.
    pub async fn table_columns(&self, table_name: &str) -> ResultEngine<Vec<ColumnInfo>> {
        let stmt = Statement::from_sql_and_values(
            self.db().get_database_backend(),
            COLUMNS_SQL,
            [Value::from(table_name)],
        );
        let rows = self.db().query_all(stmt).await.map_err(|err| {
            tracing::error!(table = table_name, "column query failed: {err}");
            EngineError::from(err)
        })?;

        let mut columns = Vec::with_capacity(rows.len());
        for row in rows {
            columns.push(ColumnInfo {
                name: row.try_get("", "column_name")?,
                data_type: row.try_get("", "data_type")?,
                is_nullable: row.try_get("", "is_nullable")?,
                column_default: row.try_get("", "column_default")?,
                character_maximum_length: row.try_get("", "character_maximum_length")?,
                numeric_precision: row.try_get("", "numeric_precision")?,
                numeric_scale: row.try_get("", "numeric_scale")?,
            });
        }
        tracing::debug!(table = table_name, count = columns.len(), "fetched columns");
        Ok(columns)
    }

    /// Constraints of one table. The referenced table/column fields are
    /// kept only for FOREIGN KEY rows; `constraint_column_usage` also
    /// matches PRIMARY KEY and UNIQUE rows, where it points back at the
    /// constraint's own table.
    pub async fn table_constraints(&self, table_name: &str) -> ResultEngine<Vec<ConstraintInfo>> {
        let stmt = Statement::from_sql_and_values(
            self.db().get_database_backend(),
            CONSTRAINTS_SQL,
            [Value::from(table_name)],
        );
        let rows = self.db().query_all(stmt).await.map_err(|err| {
            tracing::error!(table = table_name, "constraint query failed: {err}");
            EngineError::from(err)
        })?;

        let mut constraints = Vec::with_capacity(rows.len());
        for row in rows {
            let kind: String = row.try_get("", "constraint_type")?;
            let is_fk = kind == "FOREIGN KEY";
            constraints.push(ConstraintInfo {
                name: row.try_get("", "constraint_name")?,
                kind,
                column: row.try_get("", "column_name")?,
                referenced_table: if is_fk {
                    row.try_get("", "foreign_table_name")?
                } else {
                    None
                },
                referenced_column: if is_fk {
                    row.try_get("", "foreign_column_name")?
                } else {
                    None
                },
            });
        }
        tracing::debug!(
            table = table_name,
            count = constraints.len(),
            "fetched constraints"
        );
        Ok(constraints)
    }

    /// All foreign-key edges of the public schema, one per FK
    /// constraint, never deduplicated.
    pub async fn relationships(&self) -> ResultEngine<Vec<FkEdge>> {
        let stmt = Statement::from_string(self.db().get_database_backend(), RELATIONSHIPS_SQL);
        let rows = self.db().query_all(stmt).await.map_err(|err| {
            tracing::error!("relationship query failed: {err}");
            EngineError::from(err)
        })?;

        let mut edges = Vec::with_capacity(rows.len());
        for row in rows {
            edges.push(FkEdge {
                from_table: row.try_get("", "from_table")?,
                from_column: row.try_get("", "from_column")?,
                to_table: row.try_get("", "to_table")?,
                to_column: row.try_get("", "to_column")?,
                constraint_name: row.try_get("", "constraint_name")?,
            });
        }
        tracing::debug!(count = edges.len(), "fetched foreign key relationships");
        Ok(edges)
    }

    /// One table's full description, or `None` when the name is not a
    /// base table of the public schema.
    pub async fn table_schema(&self, table_name: &str) -> ResultEngine<Option<TableInfo>> {
        let stmt = Statement::from_sql_and_values(
            self.db().get_database_backend(),
            TABLE_EXISTS_SQL,
            [Value::from(table_name)],
        );
        let Some(row) = self.db().query_one(stmt).await.map_err(|err| {
            tracing::error!(table = table_name, "table lookup failed: {err}");
            EngineError::from(err)
        })?
        else {
            tracing::warn!(table = table_name, "table not found in public schema");
            return Ok(None);
        };

        let table_type: String = row.try_get("", "table_type")?;
        let columns = self.table_columns(table_name).await?;
        let constraints = self.table_constraints(table_name).await?;

        Ok(Some(TableInfo {
            name: table_name.to_string(),
            table_type,
            columns,
            constraints,
        }))
    }

    /// The full schema snapshot: every base table with columns and
    /// constraints, plus the flat relationship list. Either the whole
    /// document is produced or the first failure aborts it.
    pub async fn schema_snapshot(&self) -> ResultEngine<SchemaSnapshot> {
        let names = self.table_names().await?;

        let mut tables = Vec::with_capacity(names.len());
        for name in names {
            let columns = self.table_columns(&name).await?;
            let constraints = self.table_constraints(&name).await?;
            tables.push(TableInfo {
                name,
                table_type: "BASE TABLE".to_string(),
                columns,
                constraints,
            });
        }

        let relationships = self.relationships().await?;

        tracing::info!(
            tables = tables.len(),
            relationships = relationships.len(),
            "assembled schema snapshot"
        );
        Ok(SchemaSnapshot {
            tables,
            relationships,
        })
    }
}
