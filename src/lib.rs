pub mod app;
pub mod browser;
pub mod cli;
pub mod config;
pub mod filter;
pub mod format;
pub mod logging;
pub mod model;
pub mod pager;
pub mod render;
pub mod store;

#[cfg(test)]
mod tests;
