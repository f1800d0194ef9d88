use tokio::runtime::Runtime;

/// Engine payloads can be large nested JSON documents, so worker threads get
/// twice the default 2MB stack
pub const TOKIO_THREAD_STACK_SIZE: usize = 4 * 1024 * 1024;

lazy_static! {
    pub static ref TOKIO_RUNTIME: Runtime = build_runtime();
}

#[cfg(feature = "multi-thread")]
fn build_runtime() -> Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_stack_size(TOKIO_THREAD_STACK_SIZE)
        .thread_name("vizspec-tokio")
        .build()
        .unwrap_or_else(|err| panic!("Failed to start tokio runtime: {err}"))
}

#[cfg(not(feature = "multi-thread"))]
fn build_runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap_or_else(|err| panic!("Failed to start tokio runtime: {err}"))
}
