//! PyO3 wrapper for BackendContext
//!
//! This module provides the Python interface to the rounding backend.

use pyo3::exceptions::PyRuntimeError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};
use tracing::warn;

use super::types::{parse_backend_config, parse_mode, parse_operator, summary_to_py};
use crate::context::{BackendConfig, BackendContext};

/// Python wrapper for the Rust backend context
///
/// # Example (from Python)
///
/// ```python
/// from stochastic_fp_core import Backend
///
/// backend = Backend({"rounding_mode": "RANDOM", "seed": 12345})
/// total = 0.0
/// for _ in range(1000):
///     total = backend.add_double(total, 0.1)
/// print(total, backend.finalize())
/// ```
#[pyclass(name = "Backend")]
pub struct PyBackend {
    inner: Option<BackendContext>,
}

impl PyBackend {
    fn ctx(&mut self) -> PyResult<&mut BackendContext> {
        self.inner
            .as_mut()
            .ok_or_else(|| PyRuntimeError::new_err("Backend has already been finalized"))
    }
}

#[pymethods]
impl PyBackend {
    /// Create a backend from an optional configuration dict
    ///
    /// # Errors
    ///
    /// Raises ValueError on an unknown rounding mode, generator or operator.
    #[new]
    #[pyo3(signature = (config=None))]
    fn new(config: Option<&Bound<'_, PyDict>>) -> PyResult<Self> {
        let config = match config {
            Some(dict) => parse_backend_config(dict)?,
            None => BackendConfig::default(),
        };
        Ok(PyBackend {
            inner: Some(BackendContext::new(config)),
        })
    }

    /// Set the rounding mode (`"NEAREST"`, `"AVERAGE"`, `"AVERAGE_DET"`,
    /// `"RANDOM"` or `"RANDOM_DET"`)
    fn configure(&mut self, mode: &str) -> PyResult<()> {
        let mode = parse_mode(mode)?;
        self.ctx()?.configure(mode);
        Ok(())
    }

    fn set_seed(&mut self, seed: u64) -> PyResult<()> {
        self.ctx()?.set_seed(seed);
        Ok(())
    }

    fn seed(&mut self) -> PyResult<u64> {
        Ok(self.ctx()?.seed())
    }

    fn set_operator_enabled(&mut self, operator: &str, enabled: bool) -> PyResult<()> {
        let op = parse_operator(operator)?;
        self.ctx()?.set_operator_enabled(op, enabled);
        Ok(())
    }

    /// Install a Python callable `f(count, name, operands, result)` invoked
    /// after every operation. An exception raised by the callable is logged
    /// and printed to stderr; the arithmetic result is still returned.
    fn set_debug_callback(&mut self, callback: PyObject) -> PyResult<()> {
        self.ctx()?
            .set_debug_callback(move |count, name, operands, result| {
                Python::with_gil(|py| {
                    let args = (count, name, operands.to_vec(), *result);
                    if let Err(err) = callback.call1(py, args) {
                        warn!(operator = name, error = %err, "debug callback raised");
                        err.print(py);
                    }
                });
            });
        Ok(())
    }

    fn clear_debug_callback(&mut self) -> PyResult<()> {
        self.ctx()?.clear_debug_callback();
        Ok(())
    }

    // ========================================================================
    // Arithmetic (double)
    // ========================================================================

    fn add_double(&mut self, a: f64, b: f64) -> PyResult<f64> {
        Ok(self.ctx()?.add(a, b))
    }

    fn sub_double(&mut self, a: f64, b: f64) -> PyResult<f64> {
        Ok(self.ctx()?.sub(a, b))
    }

    fn mul_double(&mut self, a: f64, b: f64) -> PyResult<f64> {
        Ok(self.ctx()?.mul(a, b))
    }

    fn div_double(&mut self, a: f64, b: f64) -> PyResult<f64> {
        Ok(self.ctx()?.div(a, b))
    }

    fn madd_double(&mut self, a: f64, b: f64, c: f64) -> PyResult<f64> {
        Ok(self.ctx()?.madd(a, b, c))
    }

    fn msub_double(&mut self, a: f64, b: f64, c: f64) -> PyResult<f64> {
        Ok(self.ctx()?.msub(a, b, c))
    }

    // ========================================================================
    // Arithmetic (float): Python floats are narrowed on the way in
    // ========================================================================

    fn add_float(&mut self, a: f32, b: f32) -> PyResult<f32> {
        Ok(self.ctx()?.add(a, b))
    }

    fn sub_float(&mut self, a: f32, b: f32) -> PyResult<f32> {
        Ok(self.ctx()?.sub(a, b))
    }

    fn mul_float(&mut self, a: f32, b: f32) -> PyResult<f32> {
        Ok(self.ctx()?.mul(a, b))
    }

    fn div_float(&mut self, a: f32, b: f32) -> PyResult<f32> {
        Ok(self.ctx()?.div(a, b))
    }

    fn madd_float(&mut self, a: f32, b: f32, c: f32) -> PyResult<f32> {
        Ok(self.ctx()?.madd(a, b, c))
    }

    fn msub_float(&mut self, a: f32, b: f32, c: f32) -> PyResult<f32> {
        Ok(self.ctx()?.msub(a, b, c))
    }

    fn cast_double_to_float(&mut self, a: f64) -> PyResult<f32> {
        Ok(self.ctx()?.cast(a))
    }

    /// Release the backend and return its per-operator call counts
    ///
    /// # Returns
    ///
    /// List of dicts with keys `operator`, `precision`, `total`,
    /// `instrumented`
    fn finalize(&mut self, py: Python) -> PyResult<Py<PyList>> {
        let ctx = self
            .inner
            .take()
            .ok_or_else(|| PyRuntimeError::new_err("Backend has already been finalized"))?;
        summary_to_py(py, &ctx.finalize())
    }
}
