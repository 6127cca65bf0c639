pub mod admin;
pub mod assets;
pub mod catalog;
pub mod categories;
pub mod files;
pub mod migrate;
pub mod overlay_sets;
pub mod purchases;
pub mod thumbnails;
pub mod usage;
