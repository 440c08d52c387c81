mod gig_repo;
mod session_repo;
mod set_item_repo;
mod set_repo;
mod track_repo;
mod usage_repo;
mod user_repo;

pub use gig_repo::GigRepo;
pub use session_repo::SessionRepo;
pub use set_item_repo::SetItemRepo;
pub use set_repo::SetRepo;
pub use track_repo::TrackRepo;
pub use usage_repo::UsageRepo;
pub use user_repo::UserRepo;

/// Clamp a requested page size into `1..=100`, defaulting to 20.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(20).clamp(1, 100)
}

/// Clamp a requested offset to be non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}
