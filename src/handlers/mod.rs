// handlers/mod.rs - Two-tier handler layout
//
// Public (no auth) and Protected (bearer token). Both tiers share the row
// lookups in `lookup`, which produce the 404 bodies clients see.
pub mod lookup;
pub mod protected; // Bearer token required, `CurrentUser` injected by middleware
pub mod public;    // Anonymous access
