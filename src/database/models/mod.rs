pub mod navigation_item;

pub use navigation_item::{
    LinkType, Location, NavigationItem, NewNavigationItem, UpdateNavigationItem,
};
