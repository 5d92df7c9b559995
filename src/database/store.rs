use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use sqlx::PgPool;
use thiserror::Error;

use crate::database::models::{Location, NavigationItem, NewNavigationItem, UpdateNavigationItem};

/// Errors from navigation item stores
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Navigation item {0} not found")]
    NotFound(i64),

    #[error("Navigation item validation failed")]
    Validation { field_errors: HashMap<String, String> },

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl StoreError {
    fn field_error(field: &str, message: impl Into<String>) -> Self {
        let mut field_errors = HashMap::new();
        field_errors.insert(field.to_string(), message.into());
        StoreError::Validation { field_errors }
    }
}

/// Persistence contract for navigation items.
///
/// `list_top_level` and `list_children` feed menu assembly and therefore
/// return only enabled rows, ordered by `sort_order` ascending with ties
/// broken by `id` ascending (insertion order). `find_by_id` serves the
/// redirect path and ignores the enabled flag. The remaining operations
/// back the admin surface.
#[async_trait]
pub trait NavigationStore: Send + Sync {
    async fn list_top_level(&self, location: Location) -> Result<Vec<NavigationItem>, StoreError>;

    async fn list_children(&self, parent_id: i64) -> Result<Vec<NavigationItem>, StoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<NavigationItem>, StoreError>;

    /// Every item, enabled or not, optionally narrowed to one location.
    async fn list_all(&self, location: Option<Location>) -> Result<Vec<NavigationItem>, StoreError>;

    async fn create(&self, input: NewNavigationItem) -> Result<NavigationItem, StoreError>;

    async fn update(&self, id: i64, changes: UpdateNavigationItem) -> Result<NavigationItem, StoreError>;

    /// Delete an item and cascade to its children; returns rows removed.
    async fn delete(&self, id: i64) -> Result<u64, StoreError>;
}

const COLUMNS: &str = "id, name, link_type, link_value, route_params, target_blank, icon, \
                       location, visibility, allowed_roles, parent_id, sort_order, is_enabled, \
                       description, created_at, updated_at";

/// PostgreSQL-backed store over the `navigation_items` table.
pub struct PgNavigationStore {
    pool: PgPool,
}

impl PgNavigationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Parent must exist and be a top-level item; nesting is capped at two
    /// levels. An item that already has children cannot itself be reparented.
    async fn check_parent(&self, item_id: Option<i64>, parent_id: i64) -> Result<(), StoreError> {
        if item_id == Some(parent_id) {
            return Err(StoreError::field_error("parent_id", "An item cannot be its own parent"));
        }

        let parent = self.find_by_id(parent_id).await?;
        match parent {
            None => Err(StoreError::field_error(
                "parent_id",
                format!("Parent item {} does not exist", parent_id),
            )),
            Some(p) if p.parent_id.is_some() => Err(StoreError::field_error(
                "parent_id",
                "Parent item is itself a child; nesting is limited to two levels",
            )),
            Some(_) => {
                if let Some(item_id) = item_id {
                    let (children,): (i64,) = sqlx::query_as(
                        "SELECT COUNT(*) FROM navigation_items WHERE parent_id = $1",
                    )
                    .bind(item_id)
                    .fetch_one(&self.pool)
                    .await?;

                    if children > 0 {
                        return Err(StoreError::field_error(
                            "parent_id",
                            "Item has children and cannot become a child itself",
                        ));
                    }
                }
                Ok(())
            }
        }
    }
}

#[async_trait]
impl NavigationStore for PgNavigationStore {
    async fn list_top_level(&self, location: Location) -> Result<Vec<NavigationItem>, StoreError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM navigation_items \
             WHERE location = $1 AND is_enabled AND parent_id IS NULL \
             ORDER BY sort_order ASC, id ASC"
        );
        let items = sqlx::query_as::<_, NavigationItem>(&sql)
            .bind(location.as_str())
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    async fn list_children(&self, parent_id: i64) -> Result<Vec<NavigationItem>, StoreError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM navigation_items \
             WHERE parent_id = $1 AND is_enabled \
             ORDER BY sort_order ASC, id ASC"
        );
        let items = sqlx::query_as::<_, NavigationItem>(&sql)
            .bind(parent_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<NavigationItem>, StoreError> {
        let sql = format!("SELECT {COLUMNS} FROM navigation_items WHERE id = $1");
        let item = sqlx::query_as::<_, NavigationItem>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(item)
    }

    async fn list_all(&self, location: Option<Location>) -> Result<Vec<NavigationItem>, StoreError> {
        let items = match location {
            Some(location) => {
                let sql = format!(
                    "SELECT {COLUMNS} FROM navigation_items WHERE location = $1 \
                     ORDER BY location ASC, sort_order ASC, id ASC"
                );
                sqlx::query_as::<_, NavigationItem>(&sql)
                    .bind(location.as_str())
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let sql = format!(
                    "SELECT {COLUMNS} FROM navigation_items \
                     ORDER BY location ASC, sort_order ASC, id ASC"
                );
                sqlx::query_as::<_, NavigationItem>(&sql).fetch_all(&self.pool).await?
            }
        };
        Ok(items)
    }

    async fn create(&self, input: NewNavigationItem) -> Result<NavigationItem, StoreError> {
        let field_errors = input.field_errors();
        if !field_errors.is_empty() {
            return Err(StoreError::Validation { field_errors });
        }
        if let Some(parent_id) = input.parent_id {
            self.check_parent(None, parent_id).await?;
        }

        let sql = format!(
            "INSERT INTO navigation_items \
             (name, link_type, link_value, route_params, target_blank, icon, location, \
              visibility, allowed_roles, parent_id, sort_order, is_enabled, description) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             RETURNING {COLUMNS}"
        );

        let item = sqlx::query_as::<_, NavigationItem>(&sql)
            .bind(&input.name)
            .bind(&input.link_type)
            .bind(&input.link_value)
            .bind(input.route_params.clone().map(Json))
            .bind(input.target_blank)
            .bind(&input.icon)
            .bind(&input.location)
            .bind(&input.visibility)
            .bind(input.allowed_roles.clone().map(Json))
            .bind(input.parent_id)
            .bind(input.sort_order)
            .bind(input.is_enabled)
            .bind(&input.description)
            .fetch_one(&self.pool)
            .await?;

        tracing::info!(id = item.id, name = %item.name, location = %item.location, "Created navigation item");
        Ok(item)
    }

    async fn update(&self, id: i64, changes: UpdateNavigationItem) -> Result<NavigationItem, StoreError> {
        let mut item = self.find_by_id(id).await?.ok_or(StoreError::NotFound(id))?;
        changes.apply(&mut item, Utc::now());

        let field_errors = crate::database::models::navigation_item::validate_fields(
            &item.name,
            &item.link_type,
            &item.link_value,
            &item.location,
            &item.visibility,
        );
        if !field_errors.is_empty() {
            return Err(StoreError::Validation { field_errors });
        }
        if let Some(parent_id) = item.parent_id {
            self.check_parent(Some(id), parent_id).await?;
        }

        let sql = format!(
            "UPDATE navigation_items SET \
             name = $2, link_type = $3, link_value = $4, route_params = $5, target_blank = $6, \
             icon = $7, location = $8, visibility = $9, allowed_roles = $10, parent_id = $11, \
             sort_order = $12, is_enabled = $13, description = $14, updated_at = $15 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );

        let item = sqlx::query_as::<_, NavigationItem>(&sql)
            .bind(id)
            .bind(&item.name)
            .bind(&item.link_type)
            .bind(&item.link_value)
            .bind(&item.route_params)
            .bind(item.target_blank)
            .bind(&item.icon)
            .bind(&item.location)
            .bind(&item.visibility)
            .bind(&item.allowed_roles)
            .bind(item.parent_id)
            .bind(item.sort_order)
            .bind(item.is_enabled)
            .bind(&item.description)
            .bind(item.updated_at)
            .fetch_one(&self.pool)
            .await?;

        Ok(item)
    }

    async fn delete(&self, id: i64) -> Result<u64, StoreError> {
        // Children are removed explicitly so the cascade is reflected in the
        // returned count; the FK cascade remains as a backstop.
        let mut tx = self.pool.begin().await?;

        let children = sqlx::query("DELETE FROM navigation_items WHERE parent_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let parent = sqlx::query("DELETE FROM navigation_items WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if parent == 0 {
            return Err(StoreError::NotFound(id));
        }
        tx.commit().await?;

        tracing::info!(id, removed = children + parent, "Deleted navigation item");
        Ok(children + parent)
    }
}
