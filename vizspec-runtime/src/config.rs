use std::path::PathBuf;
use vizspec_common::error::{Result, VizSpecError};

/// Where the engine's script bundle comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptSource {
    Path(PathBuf),
    Inline { name: String, source: String },
}

impl ScriptSource {
    pub fn inline<N: Into<String>, S: Into<String>>(name: N, source: S) -> Self {
        Self::Inline {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Name used when reporting load failures
    pub fn name(&self) -> String {
        match self {
            ScriptSource::Path(path) => path.display().to_string(),
            ScriptSource::Inline { name, .. } => name.clone(),
        }
    }

    /// Read the script text
    pub fn read(&self) -> Result<String> {
        match self {
            ScriptSource::Path(path) => std::fs::read_to_string(path).map_err(|err| {
                VizSpecError::resource_load(format!(
                    "Failed to read engine script {}: {err}",
                    path.display()
                ))
            }),
            ScriptSource::Inline { source, .. } => Ok(source.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub script: ScriptSource,

    /// Number of requests that may wait for the engine before callers
    /// are suspended
    pub queue_capacity: usize,
}

impl RuntimeConfig {
    pub fn new(script: ScriptSource) -> Self {
        Self {
            script,
            queue_capacity: 32,
        }
    }

    pub fn with_queue_capacity(mut self, queue_capacity: usize) -> Self {
        self.queue_capacity = queue_capacity;
        self
    }
}
