use crate::scenegraph::SceneNode;
use crate::spec::chart::VizSpec;
use crate::spec::config::ConfigDef;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::any::Any;
use vizspec_common::error::{Result, ResultWithContext};

/// Verbosity of the engine's own logger
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineLogLevel {
    #[default]
    Warn,
    Info,
    Debug,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileOpts {
    /// Config merged over the spec's own `config` by the engine
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<ConfigDef>,

    /// Request the normalized echo of the input spec
    #[serde(default)]
    pub normalize: bool,

    #[serde(default)]
    pub log_level: EngineLogLevel,
}

/// Result of compiling a spec into the lower-level grammar
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompileOutput {
    pub spec: Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalized: Option<Value>,

    #[serde(default)]
    pub warnings: Vec<String>,

    #[serde(default)]
    pub info: Vec<String>,

    #[serde(default)]
    pub debug: Vec<String>,
}

impl CompileOutput {
    /// Forward the engine's diagnostic buckets to the log facade
    pub fn log_messages(&self) {
        for message in &self.warnings {
            warn!("{message}");
        }
        for message in &self.info {
            info!("{message}");
        }
        for message in &self.debug {
            debug!("{message}");
        }
    }
}

#[async_trait]
pub trait VizCompilerTrait: Send + Sync {
    fn as_any(&self) -> &dyn Any;

    async fn compile(&self, spec: &VizSpec, opts: &CompileOpts) -> Result<CompileOutput>;

    async fn to_svg(&self, spec: &VizSpec, opts: &CompileOpts) -> Result<String>;

    /// Rasterize the spec. `scale` multiplies the spec's pixel size.
    async fn to_png(&self, spec: &VizSpec, opts: &CompileOpts, scale: f64) -> Result<Vec<u8>>;

    async fn scenegraph(&self, spec: &VizSpec, opts: &CompileOpts) -> Result<SceneNode>;

    /// Compile and return only the lower-level grammar document, logging
    /// the engine's diagnostics
    async fn compile_vega(&self, spec: &VizSpec, opts: &CompileOpts) -> Result<Value> {
        let output = self
            .compile(spec, opts)
            .await
            .with_context(|| "Failed to compile spec")?;
        output.log_messages();
        Ok(output.spec)
    }

    /// Normalized echo of `spec`, as rewritten by the engine
    async fn normalize(&self, spec: &VizSpec, opts: &CompileOpts) -> Result<VizSpec> {
        let opts = CompileOpts {
            normalize: true,
            ..opts.clone()
        };
        let output = self.compile(spec, &opts).await?;
        let normalized = output
            .normalized
            .with_context(|| "Engine did not return a normalized spec")?;
        VizSpec::from_value(normalized)
    }
}
