//! Fire-and-forget loading of the external computation module.
//!
//! The loader has no link to the drawing surface. A failed load is reported
//! through an injected [`DiagnosticSink`] and otherwise ignored: no retry, no
//! fallback, no cancellation.

#[cfg(test)]
#[path = "loader_test.rs"]
mod loader_test;

/// Why the external module could not be obtained.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    /// The host rejected the import (network, parse or instantiation failure).
    #[error("import failed: {0}")]
    Import(String),
    /// The import resolved, but not to a module namespace.
    #[error("import resolved to a non-module value: {0}")]
    NotAModule(String),
}

/// Something that can asynchronously produce a module from a locator.
///
/// Futures run on the single event-loop thread and need not be `Send`.
#[allow(async_fn_in_trait)]
pub trait ModuleSource {
    type Module;

    async fn load(&self, path: &str) -> Result<Self::Module, LoadError>;
}

/// Receives load failures.
pub trait DiagnosticSink {
    fn report(&self, path: &str, err: &LoadError);
}

impl<F: Fn(&str, &LoadError)> DiagnosticSink for F {
    fn report(&self, path: &str, err: &LoadError) {
        self(path, err);
    }
}

/// Sink that writes failures to the `log` facade at error level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, path: &str, err: &LoadError) {
        log::error!("failed to load module `{path}`: {err}");
    }
}

/// Loads one module from `path` via `source`, reporting failure to `sink`.
pub struct ModuleLoader<S, D = LogSink> {
    source: S,
    sink: D,
    path: String,
}

impl<S: ModuleSource> ModuleLoader<S, LogSink> {
    #[must_use]
    pub fn new(source: S, path: impl Into<String>) -> Self {
        Self::with_sink(source, path, LogSink)
    }
}

impl<S: ModuleSource, D: DiagnosticSink> ModuleLoader<S, D> {
    #[must_use]
    pub fn with_sink(source: S, path: impl Into<String>, sink: D) -> Self {
        Self { source, sink, path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Await the module once.
    ///
    /// # Errors
    ///
    /// Returns the source's [`LoadError`] after it has been reported to the sink.
    pub async fn load(&self) -> Result<S::Module, LoadError> {
        log::debug!("loading module `{}`", self.path);
        match self.source.load(&self.path).await {
            Ok(module) => {
                log::info!("module `{}` loaded", self.path);
                Ok(module)
            }
            Err(err) => {
                self.sink.report(&self.path, &err);
                Err(err)
            }
        }
    }
}

impl<S, D> ModuleLoader<S, D>
where
    S: ModuleSource + 'static,
    D: DiagnosticSink + 'static,
{
    /// Start the load on the event loop and return immediately.
    pub fn spawn(self) {
        wasm_bindgen_futures::spawn_local(async move {
            // Failures already went to the sink; the module itself is unused here.
            drop(self.load().await);
        });
    }
}
