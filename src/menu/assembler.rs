use tracing::debug;

use crate::database::models::{LinkType, Location, NavigationItem};
use crate::database::store::{NavigationStore, StoreError};
use crate::menu::entry::{MenuEntry, RenderTarget};
use crate::menu::routes::RouteTable;
use crate::menu::visibility::{is_visible, Viewer};

/// Why an item was left out of the assembled menu. Exclusion is never an
/// error; a menu should render with whatever survives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExcludeReason {
    Hidden,
    UnresolvableRoute,
    UnknownLinkType,
}

enum Resolution {
    Included(MenuEntry),
    Excluded(ExcludeReason),
}

/// Turns flat enabled rows into a nested, permission-filtered menu for one
/// location. Stateless; every call re-reads the store.
pub struct MenuAssembler<'a> {
    store: &'a dyn NavigationStore,
    routes: &'a dyn RouteTable,
}

impl<'a> MenuAssembler<'a> {
    pub fn new(store: &'a dyn NavigationStore, routes: &'a dyn RouteTable) -> Self {
        Self { store, routes }
    }

    /// Assemble the menu for `location` as seen by `viewer`. Store errors
    /// propagate; per-item problems only exclude the item and its subtree.
    pub async fn build(&self, location: Location, viewer: &Viewer) -> Result<Vec<MenuEntry>, StoreError> {
        let mut entries = Vec::new();

        for item in self.store.list_top_level(location).await? {
            let mut entry = match self.resolve(&item, viewer) {
                Resolution::Included(entry) => entry,
                Resolution::Excluded(reason) => {
                    debug!(id = item.id, name = %item.name, ?reason, "Excluded navigation item");
                    continue;
                }
            };

            // One level of nesting only: children of children are never
            // fetched, so a depth violation in the data cannot recurse.
            let children: Vec<MenuEntry> = self
                .store
                .list_children(item.id)
                .await?
                .into_iter()
                .filter_map(|child| match self.resolve(&child, viewer) {
                    Resolution::Included(entry) => Some(entry),
                    Resolution::Excluded(reason) => {
                        debug!(id = child.id, name = %child.name, ?reason, "Excluded child navigation item");
                        None
                    }
                })
                .collect();

            if !children.is_empty() {
                entry.children = Some(children);
            }
            entries.push(entry);
        }

        Ok(entries)
    }

    fn resolve(&self, item: &NavigationItem, viewer: &Viewer) -> Resolution {
        if !is_visible(item, viewer) {
            return Resolution::Excluded(ExcludeReason::Hidden);
        }

        let target = match item.link_type() {
            Some(LinkType::Route) => {
                if !self.routes.route_exists(&item.link_value) {
                    return Resolution::Excluded(ExcludeReason::UnresolvableRoute);
                }
                RenderTarget::Route {
                    name: item.link_value.clone(),
                    params: item.route_params_map(),
                }
            }
            Some(LinkType::Url) | Some(LinkType::Custom) => RenderTarget::Redirect { item_id: item.id },
            None => return Resolution::Excluded(ExcludeReason::UnknownLinkType),
        };

        Resolution::Included(MenuEntry {
            name: item.name.clone(),
            target,
            icon: item.icon.clone(),
            target_blank: item.target_blank,
            children: None,
        })
    }
}
