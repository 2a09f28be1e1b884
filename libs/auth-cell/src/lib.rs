pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{AuthError, LoginResponse};
pub use router::auth_routes;
pub use services::session::{parse_role, AuthService};
