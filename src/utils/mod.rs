pub mod overlay;
pub mod paths;
pub mod platform;
pub mod templates;
