//! Python bindings for Rich Header parsing.
//!
//! Exposes a stateful `RichHeader` class (parse, then query results) and the
//! exception hierarchy Python callers match on.

use crate::config::RichConfig;
use crate::error::RichError;
use crate::rich;
use pyo3::create_exception;
use pyo3::exceptions::{PyException, PyRuntimeError};
use pyo3::prelude::*;
use pyo3::types::PyBytes;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::PathBuf;

create_exception!(richheader, RichHeaderException, PyException);
create_exception!(richheader, RichHeaderNotFound, RichHeaderException);
create_exception!(richheader, RichHeaderNotPE, RichHeaderException);

impl From<RichError> for PyErr {
    fn from(err: RichError) -> PyErr {
        match err {
            RichError::NotPeFormat(msg) => RichHeaderNotPE::new_err(msg),
            RichError::RichHeaderNotFound => {
                RichHeaderNotFound::new_err("Rich header does not appear to exist")
            }
            RichError::Io(e) => RichHeaderException::new_err(e.to_string()),
        }
    }
}

fn to_io(err: PyErr) -> io::Error {
    io::Error::other(err.to_string())
}

/// `Read + Seek` over a Python binary file object (`read(n)`, `seek(off, whence)`).
struct PyFileReader<'py> {
    obj: Bound<'py, PyAny>,
}

impl Read for PyFileReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let chunk = self.obj.call_method1("read", (buf.len(),)).map_err(to_io)?;
        let chunk = chunk
            .downcast::<PyBytes>()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
        let data = chunk.as_bytes();
        let n = data.len().min(buf.len());
        buf[..n].copy_from_slice(&data[..n]);
        Ok(n)
    }
}

impl Seek for PyFileReader<'_> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let (offset, whence) = match pos {
            SeekFrom::Start(n) => (n as i64, 0),
            SeekFrom::Current(n) => (n, 1),
            SeekFrom::End(n) => (n, 2),
        };
        self.obj
            .call_method1("seek", (offset, whence))
            .and_then(|p| p.extract::<u64>())
            .map_err(to_io)
    }
}

#[pyclass(name = "RichHeader")]
pub struct PyRichHeader {
    config: RichConfig,
    parsed: Option<rich::RichHeader>,
}

impl PyRichHeader {
    fn parsed(&self) -> PyResult<&rich::RichHeader> {
        self.parsed
            .as_ref()
            .ok_or_else(|| PyRuntimeError::new_err("no Rich header has been parsed yet"))
    }
}

#[pymethods]
impl PyRichHeader {
    /// `legacy=True` selects the single-byte start marker search.
    #[new]
    #[pyo3(signature = (legacy=false))]
    fn new(legacy: bool) -> Self {
        let config = if legacy {
            RichConfig::legacy()
        } else {
            RichConfig::default()
        };
        Self {
            config,
            parsed: None,
        }
    }

    fn parse_path(&mut self, path: PathBuf) -> PyResult<()> {
        self.parsed = None;
        self.parsed = Some(rich::parse_path(&path, &self.config)?);
        Ok(())
    }

    /// Parse an open binary file object; its position afterwards is unspecified.
    fn parse_filehandle(&mut self, filehandle: Bound<'_, PyAny>) -> PyResult<()> {
        self.parsed = None;
        let mut reader = PyFileReader { obj: filehandle };
        self.parsed = Some(rich::parse_reader(&mut reader, &self.config)?);
        Ok(())
    }

    fn parse_bytes(&mut self, data: &[u8]) -> PyResult<()> {
        self.parsed = None;
        self.parsed = Some(rich::parse_bytes(data, &self.config)?);
        Ok(())
    }

    /// ([(compid, count), ...], checksum_valid)
    fn get_results(&self) -> PyResult<(Vec<(u32, u32)>, bool)> {
        Ok(self.parsed()?.results())
    }

    #[getter]
    fn stored_checksum(&self) -> PyResult<u32> {
        Ok(self.parsed()?.stored_checksum)
    }

    #[getter]
    fn computed_checksum(&self) -> PyResult<u32> {
        Ok(self.parsed()?.computed_checksum)
    }

    #[getter]
    fn offset(&self) -> PyResult<usize> {
        Ok(self.parsed()?.offset)
    }

    fn fingerprint(&self) -> PyResult<String> {
        Ok(self.parsed()?.fingerprint())
    }

    fn to_json(&self) -> PyResult<String> {
        self.parsed()?
            .to_json()
            .map_err(|e| RichHeaderException::new_err(e.to_string()))
    }

    fn __repr__(&self) -> String {
        match &self.parsed {
            Some(h) => format!(
                "RichHeader(offset={}, entries={}, valid={})",
                h.offset,
                h.entries.len(),
                h.checksum_valid
            ),
            None => "RichHeader(unparsed)".to_string(),
        }
    }
}

#[pyfunction]
#[pyo3(signature = (json=false))]
fn init_logging(json: bool) {
    if json {
        crate::logging::init_tracing_json();
    } else {
        crate::logging::init_tracing();
    }
}

#[pymodule]
fn richheader(m: &Bound<'_, PyModule>) -> PyResult<()> {
    let py = m.py();
    m.add_class::<PyRichHeader>()?;
    m.add("RichHeaderException", py.get_type::<RichHeaderException>())?;
    m.add("RichHeaderNotFound", py.get_type::<RichHeaderNotFound>())?;
    m.add("RichHeaderNotPE", py.get_type::<RichHeaderNotPE>())?;
    m.add_function(wrap_pyfunction!(init_logging, m)?)?;
    Ok(())
}
