pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{ActionOutcome, DashboardAction, DashboardError, Overview};
pub use router::dashboard_routes;
pub use services::dispatch::dispatch;
