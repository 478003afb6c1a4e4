use sea_orm::{QueryFilter, QueryOrder, prelude::*};

use crate::{ResultEngine, account_types, categories, currencies};

use super::Engine;

impl Engine {
    /// All account types, sorted by name. Read-only reference data
    /// seeded at database initialization.
    pub async fn account_types(&self) -> ResultEngine<Vec<account_types::Model>> {
        let models = account_types::Entity::find()
            .order_by_asc(account_types::Column::TypeName)
            .all(self.db())
            .await?;
        Ok(models)
    }

    /// Supported currencies, sorted by code.
    pub async fn currencies(&self, active_only: bool) -> ResultEngine<Vec<currencies::Model>> {
        let mut query = currencies::Entity::find();
        if active_only {
            query = query.filter(currencies::Column::IsActive.eq(true));
        }
        let models = query
            .order_by_asc(currencies::Column::CurrencyCode)
            .all(self.db())
            .await?;
        Ok(models)
    }

    /// Active categories in display order (group, then name), for the
    /// reference-data document.
    pub async fn active_categories(&self) -> ResultEngine<Vec<categories::Model>> {
        let models = categories::Entity::find()
            .filter(categories::Column::IsActive.eq(true))
            .order_by_asc(categories::Column::CategoryGroup)
            .order_by_asc(categories::Column::CategoryName)
            .all(self.db())
            .await?;
        Ok(models)
    }
}
