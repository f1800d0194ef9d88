#[macro_use]
extern crate lazy_static;

#[macro_use]
extern crate log;

pub mod config;
pub mod engine;
pub mod runtime;
pub mod tokio_runtime;

pub use config::{RuntimeConfig, ScriptSource};
pub use engine::ScriptEngine;
pub use runtime::EngineRuntime;
