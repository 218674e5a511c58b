//! Repository layer: one zero-sized struct per table.

pub mod house_repo;
pub mod session_repo;
pub mod user_repo;

pub use house_repo::HouseRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
