//! Python bindings.
//!
//! Exposes [`TraceEngine`] to a Python host that owns the diagnostic
//! listener. Payloads cross the boundary as JSON arrays.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use serde_json::Value;

use crate::config::EngineConfig;
use crate::events::RawEvent;
use crate::logging::structured::init_logger;
use crate::pipeline::{LogSink, TraceEngine};

#[pyclass(name = "TraceEngine")]
struct PyTraceEngine {
    engine: TraceEngine,
}

fn value_error(e: impl std::fmt::Display) -> PyErr {
    PyValueError::new_err(e.to_string())
}

#[pymethods]
impl PyTraceEngine {
    #[new]
    #[pyo3(signature = (config_json=None))]
    fn new(config_json: Option<String>) -> PyResult<Self> {
        let config = match config_json {
            Some(json) => EngineConfig::from_json(&json).map_err(value_error)?,
            None => EngineConfig::default(),
        };
        init_logger(config.level_filter().map_err(value_error)?);

        let engine = TraceEngine::new(config);
        let sink = LogSink::new(engine.log_context().clone());
        Ok(Self {
            engine: engine.with_sink(Box::new(sink)),
        })
    }

    fn start(&self) {
        self.engine.start();
    }

    fn stop(&self) {
        self.engine.stop();
    }

    fn accepts_source(&self, source_name: &str) -> bool {
        self.engine.accepts_source(source_name)
    }

    /// Feed one raw event. Returns the accepted trace event as JSON.
    #[pyo3(signature = (event_id, event_name, payload_json=None))]
    fn on_event(
        &self,
        event_id: i64,
        event_name: String,
        payload_json: Option<String>,
    ) -> PyResult<Option<String>> {
        let payload = payload_json
            .map(|json| serde_json::from_str::<Vec<Value>>(&json))
            .transpose()
            .map_err(value_error)?;

        let raw = RawEvent {
            event_id,
            event_name,
            source_name: self.engine.config().source_name.clone(),
            payload,
        };

        self.engine
            .on_event(&raw)
            .map(|event| serde_json::to_string(&event))
            .transpose()
            .map_err(value_error)
    }

    fn snapshot_json(&self) -> PyResult<String> {
        self.engine.store().snapshot().to_json().map_err(value_error)
    }

    fn errors(&self) -> Vec<String> {
        self.engine.store().errors()
    }

    fn event_count(&self) -> u64 {
        self.engine.event_count()
    }
}

/// Python module definition
#[pymodule]
fn httptrace_core(_py: Python<'_>, m: &PyModule) -> PyResult<()> {
    m.add_class::<PyTraceEngine>()?;
    Ok(())
}
