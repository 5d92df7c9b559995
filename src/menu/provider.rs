use std::sync::Arc;

use crate::database::models::Location;
use crate::database::store::{NavigationStore, StoreError};
use crate::menu::assembler::MenuAssembler;
use crate::menu::entry::MenuEntry;
use crate::menu::routes::RouteTable;
use crate::menu::visibility::Viewer;

/// Named menu hooks consumed by the host's rendering layer, one per slot.
/// Explicit methods instead of a dispatch-by-event mechanism.
#[derive(Clone)]
pub struct NavigationProvider {
    store: Arc<dyn NavigationStore>,
    routes: Arc<dyn RouteTable>,
}

impl NavigationProvider {
    pub fn new(store: Arc<dyn NavigationStore>, routes: Arc<dyn RouteTable>) -> Self {
        Self { store, routes }
    }

    pub async fn build_main_menu(&self, viewer: &Viewer) -> Result<Vec<MenuEntry>, StoreError> {
        self.build(Location::Main, viewer).await
    }

    pub async fn build_account_menu(&self, viewer: &Viewer) -> Result<Vec<MenuEntry>, StoreError> {
        self.build(Location::AccountDropdown, viewer).await
    }

    pub async fn build_dashboard_menu(&self, viewer: &Viewer) -> Result<Vec<MenuEntry>, StoreError> {
        self.build(Location::Dashboard, viewer).await
    }

    async fn build(&self, location: Location, viewer: &Viewer) -> Result<Vec<MenuEntry>, StoreError> {
        MenuAssembler::new(self.store.as_ref(), self.routes.as_ref())
            .build(location, viewer)
            .await
    }
}
