pub mod deep_link;
pub mod patient;
