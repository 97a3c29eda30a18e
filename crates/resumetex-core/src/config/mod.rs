//! Configuration (`resumetex.toml`)

pub mod consts;
mod model;

pub use model::{CompilerConfig, Config, OutputConfig};
