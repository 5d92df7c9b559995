// Protected handlers: admin CRUD over navigation items.
// Route prefix /api/navigation, gated by the admin JWT middleware.

pub mod navigation;
