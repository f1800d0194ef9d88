use serde_json::Value;
use vizspec_common::error::Result;

/// Names of the functions the engine script must export
pub mod functions {
    pub const COMPILE: &str = "compile";
    pub const TO_SVG: &str = "toSvg";
    pub const TO_PNG: &str = "toPng";
    pub const SCENEGRAPH: &str = "scenegraph";
}

/// An embedded script interpreter hosting the rendering engine.
///
/// Engines are single threaded: the runtime owns one instance on a
/// dedicated thread and issues one blocking call at a time.
pub trait ScriptEngine: Send + 'static {
    /// Evaluate the engine bundle. `name` identifies the script in errors.
    fn load(&mut self, name: &str, source: &str) -> Result<()>;

    /// Invoke an exported function with JSON arguments
    fn call(&mut self, function: &str, args: Vec<Value>) -> Result<Value>;
}
