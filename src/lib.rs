pub mod config;
pub mod example;
pub mod loader;
pub mod max_pain;
pub mod model;
pub mod render;
pub mod report;
pub mod request;
pub mod schema;
pub mod series;
pub mod validate;

#[cfg(feature = "full")]
pub mod pipeline;
#[cfg(feature = "full")]
pub mod source;

#[cfg(feature = "wasm")]
pub mod wasm;
