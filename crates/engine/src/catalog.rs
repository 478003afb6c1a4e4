//! Snapshot types for the schema-discovery subsystem.
//!
//! Every value here is rebuilt from `information_schema` on each
//! request and discarded after serialization; nothing is cached or
//! persisted. Field vocabulary follows the catalog views
//! (`is_nullable` stays the "YES"/"NO" string PostgreSQL reports).

/// One column of a base table, in physical (ordinal) position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,
    pub data_type: String,
    pub is_nullable: String,
    pub column_default: Option<String>,
    pub character_maximum_length: Option<i32>,
    pub numeric_precision: Option<i32>,
    pub numeric_scale: Option<i32>,
}

/// One table or column constraint.
///
/// `referenced_table`/`referenced_column` are `Some` if and only if
/// `kind` is `FOREIGN KEY`. `column` is `None` for table-level
/// constraints such as CHECK.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstraintInfo {
    pub name: String,
    pub kind: String,
    pub column: Option<String>,
    pub referenced_table: Option<String>,
    pub referenced_column: Option<String>,
}

impl ConstraintInfo {
    pub fn is_foreign_key(&self) -> bool {
        self.kind == "FOREIGN KEY"
    }
}

/// A base table with its ordered columns and its constraints.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableInfo {
    pub name: String,
    pub table_type: String,
    pub columns: Vec<ColumnInfo>,
    pub constraints: Vec<ConstraintInfo>,
}

/// A directed foreign-key edge.
///
/// Edges map 1:1 onto FOREIGN KEY constraints and are never
/// deduplicated; a table without foreign keys contributes none.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FkEdge {
    pub from_table: String,
    pub from_column: String,
    pub to_table: String,
    pub to_column: String,
    pub constraint_name: String,
}

/// The full point-in-time structural description of the public schema.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SchemaSnapshot {
    /// Tables in alphabetical order.
    pub tables: Vec<TableInfo>,
    pub relationships: Vec<FkEdge>,
}
