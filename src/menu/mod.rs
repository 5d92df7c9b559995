pub mod assembler;
pub mod entry;
pub mod provider;
pub mod routes;
pub mod visibility;

pub use assembler::MenuAssembler;
pub use entry::{MenuEntry, RenderTarget};
pub use provider::NavigationProvider;
pub use routes::{RouteTable, StaticRouteTable};
pub use visibility::{is_visible, Viewer};
