pub mod api_router;
pub mod core;
pub mod listing;
pub mod session;
pub mod shared;
pub mod tickets;
