pub mod audit;
pub mod clean;
pub mod completions;
pub mod install;
pub mod list;
pub mod update;
