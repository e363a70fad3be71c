//! Property-list codec for the preference store
//!
//! Binary and XML property lists are accepted on read; XML is written.
//! A store written by `encode` round-trips byte-identically through
//! `decode`/`encode` as long as untouched fields are left in place, so a
//! no-op reconciliation never rewrites the document differently. A binary
//! store is normalized to XML on its first write; from then on the round
//! trip is exact.

use crate::error::{Error, Result};
use camino::Utf8Path;
use plist::{Dictionary, Value};
use std::fs;
use std::io::Cursor;

/// Decode a property-list document into the store mapping
pub fn decode(bytes: &[u8]) -> Result<Dictionary> {
    let value = Value::from_reader(Cursor::new(bytes))?;
    match value {
        Value::Dictionary(dict) => Ok(dict),
        _ => Err(Error::NotADictionary),
    }
}

/// Encode the store mapping as an XML property list
pub fn encode(store: &Dictionary) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    Value::Dictionary(store.clone()).to_writer_xml(&mut buf)?;
    Ok(buf)
}

/// Read and decode the store file
///
/// A missing file is reported as `StoreNotFound` so callers can degrade
/// to skip-with-warning instead of treating it as a malformed store.
pub fn read_store(path: &Utf8Path) -> Result<Dictionary> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::store_not_found(path.as_str()))
        }
        Err(e) => return Err(e.into()),
    };
    decode(&bytes)
}

/// Encode and write the store file
pub fn write_store(path: &Utf8Path, store: &Dictionary) -> Result<()> {
    let bytes = encode(store)?;
    fs::write(path, bytes)?;
    Ok(())
}
