pub mod aggregate;
pub mod cli;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod output;
pub mod scale;
pub mod stats;
pub mod tui;
pub mod util;
