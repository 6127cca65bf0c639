//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod category_repo;
pub mod overlay_asset_repo;
pub mod overlay_set_repo;
pub mod purchase_repo;
pub mod usage_stat_repo;
pub mod user_repo;

pub use category_repo::CategoryRepo;
pub use overlay_asset_repo::OverlayAssetRepo;
pub use overlay_set_repo::OverlaySetRepo;
pub use purchase_repo::PurchaseRepo;
pub use usage_stat_repo::UsageStatRepo;
pub use user_repo::UserRepo;
