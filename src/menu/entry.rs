use std::collections::HashMap;

use serde::Serialize;

/// Resolved, renderer-ready destination for an item's link.
///
/// `url` and `custom` links resolve to a stable redirect reference keyed by
/// item id rather than the raw link value, so the destination can change
/// without invalidating rendered menus.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderTarget {
    Route {
        name: String,
        params: HashMap<String, String>,
    },
    Redirect {
        item_id: i64,
    },
}

/// One assembled menu entry, possibly carrying one level of children.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuEntry {
    pub name: String,
    pub target: RenderTarget,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub target_blank: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<MenuEntry>>,
}
