use std::collections::HashSet;

use crate::config;

/// Host router capability consumed during link resolution. A failure to
/// answer is treated the same as "route does not exist".
pub trait RouteTable: Send + Sync {
    fn route_exists(&self, name: &str) -> bool;
}

/// Route table backed by a fixed set of names, loaded from configuration
/// (the host application's named routes).
pub struct StaticRouteTable {
    names: HashSet<String>,
}

impl StaticRouteTable {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_config() -> Self {
        Self::new(config::config().navigation.known_routes.clone())
    }
}

impl RouteTable for StaticRouteTable {
    fn route_exists(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_table_answers_membership() {
        let table = StaticRouteTable::new(["home", "tickets"]);
        assert!(table.route_exists("home"));
        assert!(!table.route_exists("archived_route"));
    }
}
