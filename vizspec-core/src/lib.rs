#[macro_use]
extern crate lazy_static;

#[macro_use]
extern crate log;

pub mod builder;
pub mod diagnostics;
pub mod runtime;
pub mod scenegraph;
pub mod spec;

pub use vizspec_common::error;
