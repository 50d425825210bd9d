//! File boundaries: bond-list ingest, exports, and the alert file.

pub mod alerts;
pub mod export;
pub mod ingest;
