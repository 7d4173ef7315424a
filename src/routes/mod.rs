// Routing segregation: anonymous surface vs. token-protected surface. The
// protected router gets the authentication gate applied in `create_router`;
// per-method role gates live alongside the route definitions.

pub mod authenticated;
pub mod public;
