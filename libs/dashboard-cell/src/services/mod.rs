pub mod dispatch;
pub mod overview;
