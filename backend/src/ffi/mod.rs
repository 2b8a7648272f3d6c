//! Python bindings (feature `pyo3`)

pub mod backend;
mod types;
