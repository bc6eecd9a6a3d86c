/// Web API Handlers
///
/// One handler group per area of the demo: the marketplace fixtures, the
/// procedural art, the trading dashboard, the live protocol feed, the
/// games, the minting admin panel and the static pages.
/// Handlers extract what they need, call into the library modules and
/// return JSON or an `ApiError`.

mod marketplace_handlers;
mod art_handlers;
mod trading_handlers;
mod live_handlers;
mod scratch_handlers;
mod crash_handlers;
mod admin_handlers;
mod page_handlers;

// Re-export all handlers
pub use marketplace_handlers::*;
pub use art_handlers::*;
pub use trading_handlers::*;
pub use live_handlers::*;
pub use scratch_handlers::*;
pub use crash_handlers::*;
pub use admin_handlers::*;
pub use page_handlers::*;
