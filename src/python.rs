//! Python bindings for naf-srl
//!
//! Exposes feature extraction and prediction merging as plain functions
//! over paths and strings.

use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;

use crate::config::{Lexicon, ProcessorInfo};
use crate::extractor::{self, ExtractError};
use crate::features::FeatureRecord;
use crate::merge;
use crate::naf::NafDocument;
use crate::source;

impl From<ExtractError> for PyErr {
    fn from(err: ExtractError) -> PyErr {
        match err {
            ExtractError::Io(e) => PyIOError::new_err(e.to_string()),
            ExtractError::Naf(e) => PyValueError::new_err(e.to_string()),
        }
    }
}

fn value_error(err: impl std::fmt::Display) -> PyErr {
    PyValueError::new_err(err.to_string())
}

fn lines(records: Vec<FeatureRecord>) -> Vec<String> {
    records.iter().map(FeatureRecord::to_string).collect()
}

/// Extract feature lines from a NAF file.
///
/// Args:
///     path: Path to a NAF document, optionally gzipped
///
/// Returns:
///     One comma-separated feature line per predicate and argument
///
/// Raises:
///     IOError: If the file cannot be read
///     ValueError: If the document is not valid NAF
#[pyfunction]
fn extract_features(path: &str) -> PyResult<Vec<String>> {
    Ok(lines(extractor::extract_from_path(path, &Lexicon::default())?))
}

/// Extract feature lines from NAF text.
#[pyfunction]
fn extract_features_from_string(text: &str) -> PyResult<Vec<String>> {
    Ok(lines(extractor::extract_from_str(text, &Lexicon::default())?))
}

/// Merge a file of predictions into a NAF document.
///
/// Args:
///     document_path: Path to the NAF document
///     predictions_path: Path to the prediction lines
///     name: Processor name recorded in the header
///     version: Processor version recorded in the header
///
/// Returns:
///     The updated document as XML text
#[pyfunction]
#[pyo3(signature = (document_path, predictions_path, name=None, version=None))]
fn merge_predictions(
    document_path: &str,
    predictions_path: &str,
    name: Option<String>,
    version: Option<String>,
) -> PyResult<String> {
    let text = source::read_path(document_path).map_err(|e| PyIOError::new_err(e.to_string()))?;
    let predictions =
        source::read_path(predictions_path).map_err(|e| PyIOError::new_err(e.to_string()))?;

    let defaults = ProcessorInfo::default();
    let info = ProcessorInfo {
        name: name.unwrap_or(defaults.name),
        version: version.unwrap_or(defaults.version),
        ..ProcessorInfo::default()
    };

    let mut document = NafDocument::parse(&text).map_err(value_error)?;
    merge::annotate(&mut document, &predictions, &info).map_err(value_error)?;
    document.to_xml_string().map_err(value_error)
}

fn __version__() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[pymodule]
fn naf_srl(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("__version__", __version__())?;
    m.add_function(wrap_pyfunction!(extract_features, m)?)?;
    m.add_function(wrap_pyfunction!(extract_features_from_string, m)?)?;
    m.add_function(wrap_pyfunction!(merge_predictions, m)?)?;
    Ok(())
}
