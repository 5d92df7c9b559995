use crate::database::models::NavigationItem;

/// Per-request viewer context: authentication state and, when authenticated,
/// an optional role id.
#[derive(Debug, Clone, Default)]
pub struct Viewer {
    pub authenticated: bool,
    pub role_id: Option<i64>,
}

impl Viewer {
    pub fn guest() -> Self {
        Self::default()
    }

    pub fn logged_in(role_id: Option<i64>) -> Self {
        Self {
            authenticated: true,
            role_id,
        }
    }
}

/// Visibility rule. Unrecognized values are shown (fail-open): an item with
/// a corrupted or future visibility value should not blank out a menu.
pub fn is_visible(item: &NavigationItem, viewer: &Viewer) -> bool {
    match item.visibility.as_str() {
        "public" => true,
        "logged_in" => viewer.authenticated,
        "guest" => !viewer.authenticated,
        "role" => {
            if !viewer.authenticated {
                return false;
            }
            let allowed = item.allowed_role_ids();
            allowed.is_empty() || viewer.role_id.map_or(false, |role| allowed.contains(&role))
        }
        _ => true,
    }
}
