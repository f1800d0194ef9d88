use crate::config::RuntimeConfig;
use crate::engine::{functions, ScriptEngine};
use crate::tokio_runtime::TOKIO_RUNTIME;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{json, Value};
use std::any::Any;
use std::sync::mpsc as std_mpsc;
use std::thread;
use tokio::sync::{mpsc, oneshot};
use vizspec_common::error::{Result, ResultWithContext, VizSpecError};
use vizspec_core::runtime::{CompileOpts, CompileOutput, VizCompilerTrait};
use vizspec_core::scenegraph::SceneNode;
use vizspec_core::spec::chart::VizSpec;

const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

struct EngineRequest {
    function: &'static str,
    args: Vec<Value>,
    reply: oneshot::Sender<Result<Value>>,
}

/// Compiler backed by a [`ScriptEngine`] running on its own thread.
///
/// Requests are queued and executed one at a time in arrival order. The
/// engine thread exits once the runtime is dropped and the queue drains.
pub struct EngineRuntime {
    sender: mpsc::Sender<EngineRequest>,
}

impl EngineRuntime {
    /// Read the engine script, start the engine thread and load the script
    /// into `engine`. Fails with a resource load error before any request
    /// is accepted if either step fails.
    pub fn try_new<E: ScriptEngine>(engine: E, config: RuntimeConfig) -> Result<Self> {
        let name = config.script.name();
        let source = config.script.read()?;

        let (sender, receiver) = mpsc::channel(config.queue_capacity.max(1));
        let (ready_sender, ready_receiver) = std_mpsc::sync_channel(1);
        thread::Builder::new()
            .name("vizspec-engine".to_string())
            .spawn(move || run_engine(engine, name, source, receiver, ready_sender))
            .map_err(|err| {
                VizSpecError::internal(format!("Failed to spawn engine thread: {err}"))
            })?;

        ready_receiver
            .recv()
            .map_err(|_| VizSpecError::internal("Engine thread exited during startup"))??;
        Ok(Self { sender })
    }

    async fn call(&self, function: &'static str, args: Vec<Value>) -> Result<Value> {
        let (reply, response) = oneshot::channel();
        self.sender
            .send(EngineRequest {
                function,
                args,
                reply,
            })
            .await
            .map_err(|_| VizSpecError::engine("Engine thread has stopped"))?;
        response
            .await
            .map_err(|_| VizSpecError::engine("Engine thread stopped before replying"))?
    }

    async fn call_for_string(&self, function: &'static str, args: Vec<Value>) -> Result<String> {
        match self.call(function, args).await? {
            Value::String(s) => Ok(s),
            other => Err(VizSpecError::engine(format!(
                "Expected `{function}` to return a string, received: {other}"
            ))),
        }
    }

    pub fn compile_blocking(&self, spec: &VizSpec, opts: &CompileOpts) -> Result<CompileOutput> {
        TOKIO_RUNTIME.block_on(self.compile(spec, opts))
    }

    pub fn to_svg_blocking(&self, spec: &VizSpec, opts: &CompileOpts) -> Result<String> {
        TOKIO_RUNTIME.block_on(self.to_svg(spec, opts))
    }

    pub fn to_png_blocking(
        &self,
        spec: &VizSpec,
        opts: &CompileOpts,
        scale: f64,
    ) -> Result<Vec<u8>> {
        TOKIO_RUNTIME.block_on(self.to_png(spec, opts, scale))
    }

    pub fn scenegraph_blocking(&self, spec: &VizSpec, opts: &CompileOpts) -> Result<SceneNode> {
        TOKIO_RUNTIME.block_on(self.scenegraph(spec, opts))
    }
}

fn run_engine<E: ScriptEngine>(
    mut engine: E,
    name: String,
    source: String,
    mut receiver: mpsc::Receiver<EngineRequest>,
    ready: std_mpsc::SyncSender<Result<()>>,
) {
    let loaded = engine.load(&name, &source).map_err(|err| {
        VizSpecError::resource_load(format!("Failed to load engine script {name}: {err}"))
    });
    let load_failed = loaded.is_err();
    if ready.send(loaded).is_err() || load_failed {
        return;
    }
    info!("Engine started with script {name}");

    while let Some(request) = receiver.blocking_recv() {
        debug!("Engine call `{}`", request.function);
        let function = request.function;
        let result = engine.call(function, request.args).map_err(|err| {
            to_engine_error(err).with_context(|| format!("Engine call `{function}` failed"))
        });
        if request.reply.send(result).is_err() {
            debug!("Caller of `{function}` went away before the engine replied");
        }
    }
    info!("Engine stopped");
}

fn to_engine_error(err: VizSpecError) -> VizSpecError {
    match err {
        VizSpecError::EngineError(..) => err,
        other => VizSpecError::engine(other.to_string()),
    }
}

fn spec_args(spec: &VizSpec, opts: &CompileOpts) -> Result<Vec<Value>> {
    Ok(vec![serde_json::to_value(spec)?, serde_json::to_value(opts)?])
}

#[async_trait]
impl VizCompilerTrait for EngineRuntime {
    fn as_any(&self) -> &dyn Any {
        self
    }

    async fn compile(&self, spec: &VizSpec, opts: &CompileOpts) -> Result<CompileOutput> {
        let value = self.call(functions::COMPILE, spec_args(spec, opts)?).await?;
        serde_json::from_value(value)
            .map_err(|err| VizSpecError::engine(format!("Malformed compile output: {err}")))
    }

    async fn to_svg(&self, spec: &VizSpec, opts: &CompileOpts) -> Result<String> {
        self.call_for_string(functions::TO_SVG, spec_args(spec, opts)?)
            .await
    }

    async fn to_png(&self, spec: &VizSpec, opts: &CompileOpts, scale: f64) -> Result<Vec<u8>> {
        let mut args = spec_args(spec, opts)?;
        args.push(json!(scale));
        let data_url = self.call_for_string(functions::TO_PNG, args).await?;
        let encoded = data_url.strip_prefix(PNG_DATA_URL_PREFIX).with_context(|| {
            format!("Expected a PNG data URL from `{}`", functions::TO_PNG)
        })?;
        Ok(STANDARD.decode(encoded)?)
    }

    async fn scenegraph(&self, spec: &VizSpec, opts: &CompileOpts) -> Result<SceneNode> {
        let value = self
            .call(functions::SCENEGRAPH, spec_args(spec, opts)?)
            .await?;
        serde_json::from_value(value)
            .map_err(|err| VizSpecError::engine(format!("Malformed scenegraph: {err}")))
    }
}
