use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// Link types an item may carry. `link_value` is interpreted accordingly:
/// a named host route, a fully-qualified external URL, or an internal path.
pub const LINK_TYPES: &[&str] = &["route", "url", "custom"];

/// Visibility rules gating display. Values outside this set are tolerated
/// on read (fail-open) but rejected on write.
pub const VISIBILITIES: &[&str] = &["public", "logged_in", "guest", "role"];

/// Menu slot an item is rendered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    Main,
    AccountDropdown,
    Dashboard,
}

impl Location {
    pub const ALL: [Location; 3] = [Location::Main, Location::AccountDropdown, Location::Dashboard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Location::Main => "main",
            Location::AccountDropdown => "account_dropdown",
            Location::Dashboard => "dashboard",
        }
    }

    pub fn parse(s: &str) -> Option<Location> {
        match s {
            "main" => Some(Location::Main),
            "account_dropdown" => Some(Location::AccountDropdown),
            "dashboard" => Some(Location::Dashboard),
            _ => None,
        }
    }
}

/// Parsed link type. Stored as text; rows holding a value outside the known
/// set parse to `None` and are dropped during assembly (fail-closed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkType {
    Route,
    Url,
    Custom,
}

impl LinkType {
    pub fn parse(s: &str) -> Option<LinkType> {
        match s {
            "route" => Some(LinkType::Route),
            "url" => Some(LinkType::Url),
            "custom" => Some(LinkType::Custom),
            _ => None,
        }
    }
}

/// A persisted navigation item. Created and edited only through the admin
/// surface; the assembly path never writes.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct NavigationItem {
    pub id: i64,
    pub name: String,
    pub link_type: String,
    pub link_value: String,
    pub route_params: Option<Json<HashMap<String, String>>>,
    pub target_blank: bool,
    pub icon: Option<String>,
    pub location: String,
    pub visibility: String,
    pub allowed_roles: Option<Json<Vec<i64>>>,
    pub parent_id: Option<i64>,
    pub sort_order: i32,
    pub is_enabled: bool,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NavigationItem {
    pub fn link_type(&self) -> Option<LinkType> {
        LinkType::parse(&self.link_type)
    }

    /// Route parameters, empty when absent.
    pub fn route_params_map(&self) -> HashMap<String, String> {
        self.route_params
            .as_ref()
            .map(|p| p.0.clone())
            .unwrap_or_default()
    }

    /// Role ids allowed to see this item. Only meaningful when
    /// `visibility = "role"`; an empty slice means "any role".
    pub fn allowed_role_ids(&self) -> &[i64] {
        self.allowed_roles
            .as_ref()
            .map(|r| r.0.as_slice())
            .unwrap_or(&[])
    }
}

/// Input shape for item creation.
#[derive(Debug, Clone, Deserialize)]
pub struct NewNavigationItem {
    pub name: String,
    pub link_type: String,
    pub link_value: String,
    #[serde(default)]
    pub route_params: Option<HashMap<String, String>>,
    #[serde(default)]
    pub target_blank: bool,
    #[serde(default)]
    pub icon: Option<String>,
    pub location: String,
    #[serde(default = "default_visibility")]
    pub visibility: String,
    #[serde(default)]
    pub allowed_roles: Option<Vec<i64>>,
    #[serde(default)]
    pub parent_id: Option<i64>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default = "default_enabled")]
    pub is_enabled: bool,
    #[serde(default)]
    pub description: Option<String>,
}

fn default_visibility() -> String {
    "public".to_string()
}

fn default_enabled() -> bool {
    true
}

impl NewNavigationItem {
    /// Field-level validation; an empty map means the input is acceptable.
    /// Parent existence is checked separately by the store.
    pub fn field_errors(&self) -> HashMap<String, String> {
        validate_fields(&self.name, &self.link_type, &self.link_value, &self.location, &self.visibility)
    }

    /// Materialize a full record from this input, with a store-assigned id.
    pub fn into_item(self, id: i64, now: DateTime<Utc>) -> NavigationItem {
        NavigationItem {
            id,
            name: self.name,
            link_type: self.link_type,
            link_value: self.link_value,
            route_params: self.route_params.map(Json),
            target_blank: self.target_blank,
            icon: self.icon,
            location: self.location,
            visibility: self.visibility,
            allowed_roles: self.allowed_roles.map(Json),
            parent_id: self.parent_id,
            sort_order: self.sort_order,
            is_enabled: self.is_enabled,
            description: self.description,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update; absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateNavigationItem {
    pub name: Option<String>,
    pub link_type: Option<String>,
    pub link_value: Option<String>,
    pub route_params: Option<HashMap<String, String>>,
    pub target_blank: Option<bool>,
    pub icon: Option<String>,
    pub location: Option<String>,
    pub visibility: Option<String>,
    pub allowed_roles: Option<Vec<i64>>,
    pub parent_id: Option<i64>,
    pub sort_order: Option<i32>,
    pub is_enabled: Option<bool>,
    pub description: Option<String>,
}

impl UpdateNavigationItem {
    /// Merge this update onto an existing record, bumping `updated_at`.
    pub fn apply(self, item: &mut NavigationItem, now: DateTime<Utc>) {
        if let Some(name) = self.name {
            item.name = name;
        }
        if let Some(link_type) = self.link_type {
            item.link_type = link_type;
        }
        if let Some(link_value) = self.link_value {
            item.link_value = link_value;
        }
        if let Some(route_params) = self.route_params {
            item.route_params = Some(Json(route_params));
        }
        if let Some(target_blank) = self.target_blank {
            item.target_blank = target_blank;
        }
        if let Some(icon) = self.icon {
            item.icon = Some(icon);
        }
        if let Some(location) = self.location {
            item.location = location;
        }
        if let Some(visibility) = self.visibility {
            item.visibility = visibility;
        }
        if let Some(allowed_roles) = self.allowed_roles {
            item.allowed_roles = Some(Json(allowed_roles));
        }
        if let Some(parent_id) = self.parent_id {
            item.parent_id = Some(parent_id);
        }
        if let Some(sort_order) = self.sort_order {
            item.sort_order = sort_order;
        }
        if let Some(is_enabled) = self.is_enabled {
            item.is_enabled = is_enabled;
        }
        if let Some(description) = self.description {
            item.description = Some(description);
        }
        item.updated_at = now;
    }
}

/// Shared write-path validation for both store implementations.
pub fn validate_fields(
    name: &str,
    link_type: &str,
    link_value: &str,
    location: &str,
    visibility: &str,
) -> HashMap<String, String> {
    let mut errors = HashMap::new();

    if name.trim().is_empty() {
        errors.insert("name".to_string(), "Display name is required".to_string());
    }
    if !LINK_TYPES.contains(&link_type) {
        errors.insert(
            "link_type".to_string(),
            format!("Unknown link type '{}'; expected one of {}", link_type, LINK_TYPES.join(", ")),
        );
    }
    if link_value.trim().is_empty() {
        errors.insert("link_value".to_string(), "Link value is required".to_string());
    }
    if Location::parse(location).is_none() {
        errors.insert(
            "location".to_string(),
            format!("Unknown location '{}'; expected one of main, account_dropdown, dashboard", location),
        );
    }
    if !VISIBILITIES.contains(&visibility) {
        errors.insert(
            "visibility".to_string(),
            format!("Unknown visibility '{}'; expected one of {}", visibility, VISIBILITIES.join(", ")),
        );
    }

    errors
}
