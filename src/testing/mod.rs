//! In-memory store and fixtures shared by unit and integration tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;

use crate::database::models::navigation_item::validate_fields;
use crate::database::models::{Location, NavigationItem, NewNavigationItem, UpdateNavigationItem};
use crate::database::store::{NavigationStore, StoreError};

/// Fluent fixture builder with sensible defaults: an enabled, public,
/// route-linked item in the main slot.
pub struct ItemBuilder {
    item: NavigationItem,
}

impl ItemBuilder {
    pub fn new(id: i64, name: &str) -> Self {
        let now = Utc::now();
        Self {
            item: NavigationItem {
                id,
                name: name.to_string(),
                link_type: "route".to_string(),
                link_value: "home".to_string(),
                route_params: None,
                target_blank: false,
                icon: None,
                location: "main".to_string(),
                visibility: "public".to_string(),
                allowed_roles: None,
                parent_id: None,
                sort_order: 0,
                is_enabled: true,
                description: None,
                created_at: now,
                updated_at: now,
            },
        }
    }

    pub fn link(mut self, link_type: &str, link_value: &str) -> Self {
        self.item.link_type = link_type.to_string();
        self.item.link_value = link_value.to_string();
        self
    }

    pub fn route_params(mut self, params: std::collections::HashMap<String, String>) -> Self {
        self.item.route_params = Some(Json(params));
        self
    }

    pub fn location(mut self, location: Location) -> Self {
        self.item.location = location.as_str().to_string();
        self
    }

    pub fn visibility(mut self, visibility: &str) -> Self {
        self.item.visibility = visibility.to_string();
        self
    }

    pub fn allowed_roles(mut self, roles: Vec<i64>) -> Self {
        self.item.allowed_roles = Some(Json(roles));
        self
    }

    pub fn parent(mut self, parent_id: i64) -> Self {
        self.item.parent_id = Some(parent_id);
        self
    }

    pub fn sort_order(mut self, sort_order: i32) -> Self {
        self.item.sort_order = sort_order;
        self
    }

    pub fn icon(mut self, icon: &str) -> Self {
        self.item.icon = Some(icon.to_string());
        self
    }

    pub fn target_blank(mut self) -> Self {
        self.item.target_blank = true;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.item.is_enabled = false;
        self
    }

    pub fn build(self) -> NavigationItem {
        self.item
    }
}

struct Inner {
    items: Vec<NavigationItem>,
    next_id: i64,
}

/// In-memory reference implementation of the store contract. Mirrors the
/// PostgreSQL implementation's ordering, validation, and cascade behavior.
pub struct MemoryNavigationStore {
    inner: Mutex<Inner>,
}

impl Default for MemoryNavigationStore {
    fn default() -> Self {
        Self::with_items(Vec::new())
    }
}

impl MemoryNavigationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with pre-built fixtures; skips write-path validation.
    pub fn with_items(items: Vec<NavigationItem>) -> Self {
        let next_id = items.iter().map(|i| i.id).max().unwrap_or(0) + 1;
        Self {
            inner: Mutex::new(Inner { items, next_id }),
        }
    }

    fn sorted(mut items: Vec<NavigationItem>) -> Vec<NavigationItem> {
        items.sort_by_key(|i| (i.sort_order, i.id));
        items
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check_parent(
        items: &[NavigationItem],
        item_id: Option<i64>,
        parent_id: i64,
    ) -> Result<(), StoreError> {
        let field = |message: String| {
            let mut field_errors = std::collections::HashMap::new();
            field_errors.insert("parent_id".to_string(), message);
            StoreError::Validation { field_errors }
        };

        if item_id == Some(parent_id) {
            return Err(field("An item cannot be its own parent".to_string()));
        }
        match items.iter().find(|i| i.id == parent_id) {
            None => Err(field(format!("Parent item {} does not exist", parent_id))),
            Some(p) if p.parent_id.is_some() => Err(field(
                "Parent item is itself a child; nesting is limited to two levels".to_string(),
            )),
            Some(_) => {
                if let Some(item_id) = item_id {
                    if items.iter().any(|i| i.parent_id == Some(item_id)) {
                        return Err(field(
                            "Item has children and cannot become a child itself".to_string(),
                        ));
                    }
                }
                Ok(())
            }
        }
    }
}

#[async_trait]
impl NavigationStore for MemoryNavigationStore {
    async fn list_top_level(&self, location: Location) -> Result<Vec<NavigationItem>, StoreError> {
        let inner = self.lock();
        let items = inner
            .items
            .iter()
            .filter(|i| i.is_enabled && i.parent_id.is_none() && i.location == location.as_str())
            .cloned()
            .collect();
        Ok(Self::sorted(items))
    }

    async fn list_children(&self, parent_id: i64) -> Result<Vec<NavigationItem>, StoreError> {
        let inner = self.lock();
        let items = inner
            .items
            .iter()
            .filter(|i| i.is_enabled && i.parent_id == Some(parent_id))
            .cloned()
            .collect();
        Ok(Self::sorted(items))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<NavigationItem>, StoreError> {
        let inner = self.lock();
        Ok(inner.items.iter().find(|i| i.id == id).cloned())
    }

    async fn list_all(&self, location: Option<Location>) -> Result<Vec<NavigationItem>, StoreError> {
        let inner = self.lock();
        let mut items: Vec<NavigationItem> = inner
            .items
            .iter()
            .filter(|i| location.map_or(true, |l| i.location == l.as_str()))
            .cloned()
            .collect();
        items.sort_by(|a, b| {
            (&a.location, a.sort_order, a.id).cmp(&(&b.location, b.sort_order, b.id))
        });
        Ok(items)
    }

    async fn create(&self, input: NewNavigationItem) -> Result<NavigationItem, StoreError> {
        let field_errors = input.field_errors();
        if !field_errors.is_empty() {
            return Err(StoreError::Validation { field_errors });
        }

        let mut inner = self.lock();
        if let Some(parent_id) = input.parent_id {
            Self::check_parent(&inner.items, None, parent_id)?;
        }

        let id = inner.next_id;
        inner.next_id += 1;
        let item = input.into_item(id, Utc::now());
        inner.items.push(item.clone());
        Ok(item)
    }

    async fn update(&self, id: i64, changes: UpdateNavigationItem) -> Result<NavigationItem, StoreError> {
        let mut inner = self.lock();
        let mut item = inner
            .items
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))?;

        changes.apply(&mut item, Utc::now());

        let field_errors = validate_fields(
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
            Self::check_parent(&inner.items, Some(id), parent_id)?;
        }

        let slot = inner
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(StoreError::NotFound(id))?;
        *slot = item.clone();
        Ok(item)
    }

    async fn delete(&self, id: i64) -> Result<u64, StoreError> {
        let mut inner = self.lock();
        if !inner.items.iter().any(|i| i.id == id) {
            return Err(StoreError::NotFound(id));
        }
        let before = inner.items.len();
        inner
            .items
            .retain(|i| i.id != id && i.parent_id != Some(id));
        Ok((before - inner.items.len()) as u64)
    }
}
