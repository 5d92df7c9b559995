// Public handlers: no authentication required. Menu assembly reads an
// optional viewer context; the redirect endpoint is anonymous by design.

pub mod menu;
pub mod redirect;
