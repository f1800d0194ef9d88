use std::result;
use thiserror::Error;

#[cfg(feature = "base64")]
use base64::DecodeError as Base64DecodeError;

pub type Result<T> = result::Result<T, VizSpecError>;

#[derive(Clone, Debug, Default)]
pub struct ErrorContext {
    pub contexts: Vec<String>,
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (i, context) in self.contexts.iter().enumerate() {
            writeln!(f, "    Context[{i}]: {context}")?;
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum VizSpecError {
    #[error("Specification error: {0}\n{1}")]
    SpecificationError(String, ErrorContext),

    #[error("Engine error: {0}\n{1}")]
    EngineError(String, ErrorContext),

    #[error("Resource load error: {0}\n{1}")]
    ResourceLoadError(String, ErrorContext),

    #[error("Internal error: {0}\n{1}")]
    InternalError(String, ErrorContext),

    #[error("External error: {0}\n{1}")]
    ExternalError(String, ErrorContext),

    #[error("IO Error: {0}\n{1}")]
    IOError(std::io::Error, ErrorContext),

    #[cfg(feature = "json")]
    #[error("Serde JSON Error: {0}\n{1}")]
    SerdeJsonError(serde_json::Error, ErrorContext),

    #[cfg(feature = "base64")]
    #[error("Base64 Decode Error: {0}\n{1}")]
    Base64DecodeError(Base64DecodeError, ErrorContext),
}

impl VizSpecError {
    /// Append a new context level to the error
    pub fn with_context<S, F>(self, context_fn: F) -> Self
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        use VizSpecError::*;
        match self {
            SpecificationError(msg, mut context) => {
                context.contexts.push(context_fn().into());
                VizSpecError::SpecificationError(msg, context)
            }
            EngineError(msg, mut context) => {
                context.contexts.push(context_fn().into());
                VizSpecError::EngineError(msg, context)
            }
            ResourceLoadError(msg, mut context) => {
                context.contexts.push(context_fn().into());
                VizSpecError::ResourceLoadError(msg, context)
            }
            InternalError(msg, mut context) => {
                context.contexts.push(context_fn().into());
                VizSpecError::InternalError(msg, context)
            }
            ExternalError(msg, mut context) => {
                context.contexts.push(context_fn().into());
                VizSpecError::ExternalError(msg, context)
            }
            IOError(err, mut context) => {
                context.contexts.push(context_fn().into());
                VizSpecError::IOError(err, context)
            }
            #[cfg(feature = "json")]
            SerdeJsonError(err, mut context) => {
                context.contexts.push(context_fn().into());
                VizSpecError::SerdeJsonError(err, context)
            }
            #[cfg(feature = "base64")]
            Base64DecodeError(err, mut context) => {
                context.contexts.push(context_fn().into());
                VizSpecError::Base64DecodeError(err, context)
            }
        }
    }

    pub fn specification<S: Into<String>>(message: S) -> Self {
        Self::SpecificationError(message.into(), Default::default())
    }

    pub fn engine<S: Into<String>>(message: S) -> Self {
        Self::EngineError(message.into(), Default::default())
    }

    pub fn resource_load<S: Into<String>>(message: S) -> Self {
        Self::ResourceLoadError(message.into(), Default::default())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::InternalError(message.into(), Default::default())
    }

    pub fn external<S: Into<String>>(message: S) -> Self {
        Self::ExternalError(message.into(), Default::default())
    }

    /// The context strings accumulated so far, innermost first
    pub fn context(&self) -> &ErrorContext {
        use VizSpecError::*;
        match self {
            SpecificationError(_, context)
            | EngineError(_, context)
            | ResourceLoadError(_, context)
            | InternalError(_, context)
            | ExternalError(_, context)
            | IOError(_, context) => context,
            #[cfg(feature = "json")]
            SerdeJsonError(_, context) => context,
            #[cfg(feature = "base64")]
            Base64DecodeError(_, context) => context,
        }
    }

    /// Duplicate error. Not a precise Clone because some of the wrapped error types aren't Clone
    /// These are converted to external errors
    pub fn duplicate(&self) -> Self {
        use VizSpecError::*;
        match self {
            SpecificationError(msg, context) => {
                VizSpecError::SpecificationError(msg.clone(), context.clone())
            }
            EngineError(msg, context) => VizSpecError::EngineError(msg.clone(), context.clone()),
            ResourceLoadError(msg, context) => {
                VizSpecError::ResourceLoadError(msg.clone(), context.clone())
            }
            InternalError(msg, context) => {
                VizSpecError::InternalError(msg.clone(), context.clone())
            }
            ExternalError(msg, context) => {
                VizSpecError::ExternalError(msg.clone(), context.clone())
            }
            IOError(err, context) => VizSpecError::ExternalError(err.to_string(), context.clone()),
            #[cfg(feature = "json")]
            SerdeJsonError(err, context) => {
                VizSpecError::ExternalError(err.to_string(), context.clone())
            }
            #[cfg(feature = "base64")]
            Base64DecodeError(err, context) => {
                VizSpecError::Base64DecodeError(err.clone(), context.clone())
            }
        }
    }
}

pub trait ResultWithContext<R> {
    fn with_context<S, F>(self, context_fn: F) -> Result<R>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<R, E> ResultWithContext<R> for result::Result<R, E>
where
    E: Into<VizSpecError>,
{
    fn with_context<S, F>(self, context_fn: F) -> Result<R>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        match self {
            Ok(val) => Ok(val),
            Err(err) => {
                let viz_spec_error: VizSpecError = err.into();
                Err(viz_spec_error.with_context(context_fn))
            }
        }
    }
}

impl<R> ResultWithContext<R> for Option<R> {
    fn with_context<S, F>(self, context_fn: F) -> Result<R>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        match self {
            Some(val) => Ok(val),
            None => Err(VizSpecError::internal(context_fn().into())),
        }
    }
}

impl From<std::io::Error> for VizSpecError {
    fn from(err: std::io::Error) -> Self {
        Self::IOError(err, Default::default())
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Error> for VizSpecError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerdeJsonError(err, Default::default())
    }
}

#[cfg(feature = "base64")]
impl From<Base64DecodeError> for VizSpecError {
    fn from(err: Base64DecodeError) -> Self {
        Self::Base64DecodeError(err, Default::default())
    }
}

pub trait ToExternalError<T> {
    fn external<S: Into<String>>(self, context: S) -> Result<T>;
}

impl<T, E: std::error::Error> ToExternalError<T> for std::result::Result<T, E> {
    fn external<S: Into<String>>(self, context: S) -> Result<T> {
        match self {
            Ok(v) => Ok(v),
            Err(err) => {
                let context = ErrorContext {
                    contexts: vec![context.into()],
                };
                Err(VizSpecError::ExternalError(err.to_string(), context))
            }
        }
    }
}

pub trait DuplicateResult {
    fn duplicate(&self) -> Self;
}

impl<T> DuplicateResult for Result<T>
where
    T: Clone,
{
    fn duplicate(&self) -> Self {
        match self {
            Ok(v) => Ok(v.clone()),
            Err(err) => Err(err.duplicate()),
        }
    }
}
