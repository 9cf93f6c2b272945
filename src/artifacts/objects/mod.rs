//! Versioning records
//!
//! - `fingerprint`: content checksum used to name artifacts
//! - `artifact_id`: `<fingerprint>-L<length><ext>` artifact names
//! - `structure_entry`: one row of a snapshot
//! - `manifest_id`: time-derived manifest identifiers
//! - `manifest`: immutable record of one operation

pub mod artifact_id;
pub mod fingerprint;
pub mod manifest;
pub mod manifest_id;
pub mod structure_entry;
