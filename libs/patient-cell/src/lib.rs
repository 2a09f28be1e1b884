pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{DeepLinkError, PatientError, Priority, RideProvider};
pub use router::patient_routes;
pub use services::deep_link::{normalize_phone, DEFAULT_PICKUP, INFUSION_CENTERS};
pub use services::patient::PatientDirectory;
