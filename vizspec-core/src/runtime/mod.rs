mod runtime;
pub use runtime::{CompileOpts, CompileOutput, EngineLogLevel, VizCompilerTrait};
