//! Type conversion utilities for FFI boundary
//!
//! Converts between Rust types and PyO3-compatible types (PyDict, PyList).

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use crate::context::{BackendConfig, EnabledOperators, OpCountSummary};
use crate::rng::GeneratorKind;
use crate::rounding::{Operator, RoundingMode};

/// Extract an optional field from a Python dict.
///
/// # Returns
/// `Some(value)` if field exists and is not None, `None` otherwise
///
/// # Errors
/// Returns error only if type conversion fails (not if field is missing)
fn extract_optional<T>(dict: &Bound<'_, PyDict>, key: &str) -> PyResult<Option<T>>
where
    T: for<'py> FromPyObject<'py>,
{
    match dict.get_item(key)? {
        Some(value) if !value.is_none() => Ok(Some(value.extract()?)),
        _ => Ok(None),
    }
}

/// Parse a rounding mode identifier, raising ValueError when unknown
pub(crate) fn parse_mode(mode: &str) -> PyResult<RoundingMode> {
    mode.parse::<RoundingMode>()
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

fn parse_generator(name: &str) -> PyResult<GeneratorKind> {
    match name.to_ascii_lowercase().as_str() {
        "lcg" => Ok(GeneratorKind::Lcg),
        "tiny_mt" | "tinymt" => Ok(GeneratorKind::TinyMt),
        other => Err(PyValueError::new_err(format!(
            "Unknown generator '{}' (expected 'lcg' or 'tiny_mt')",
            other
        ))),
    }
}

/// Build a [`BackendConfig`] from a Python dict
///
/// Recognized keys: `rounding_mode` (str), `seed` (int), `generator` (str),
/// `count_ops` (bool), `disabled_operators` (list of operator names).
/// Missing keys take their defaults.
pub(crate) fn parse_backend_config(dict: &Bound<'_, PyDict>) -> PyResult<BackendConfig> {
    let mut config = BackendConfig::default();

    if let Some(mode) = extract_optional::<String>(dict, "rounding_mode")? {
        config.rounding_mode = parse_mode(&mode)?;
    }
    config.seed = extract_optional(dict, "seed")?;
    if let Some(generator) = extract_optional::<String>(dict, "generator")? {
        config.generator = parse_generator(&generator)?;
    }
    if let Some(count_ops) = extract_optional(dict, "count_ops")? {
        config.count_ops = count_ops;
    }
    if let Some(disabled) = extract_optional::<Vec<String>>(dict, "disabled_operators")? {
        let mut enabled = EnabledOperators::all();
        for name in disabled {
            enabled.set(parse_operator(&name)?, false);
        }
        config.enabled_operators = enabled;
    }

    Ok(config)
}

pub(crate) fn parse_operator(name: &str) -> PyResult<Operator> {
    Operator::ALL
        .into_iter()
        .find(|op| op.name() == name)
        .ok_or_else(|| PyValueError::new_err(format!("Unknown operator '{}'", name)))
}

/// Convert a count summary to a list of dicts
pub(crate) fn summary_to_py(py: Python<'_>, summary: &OpCountSummary) -> PyResult<Py<PyList>> {
    let list = PyList::empty_bound(py);
    for entry in &summary.entries {
        let dict = PyDict::new_bound(py);
        dict.set_item("operator", entry.operator.name())?;
        dict.set_item(
            "precision",
            match entry.precision {
                crate::rounding::Precision::Float => "float",
                crate::rounding::Precision::Double => "double",
            },
        )?;
        dict.set_item("total", entry.total)?;
        dict.set_item("instrumented", entry.instrumented)?;
        list.append(dict)?;
    }
    Ok(list.unbind())
}
