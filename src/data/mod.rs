//! External data sources and their offline fallbacks.
//!
//! Every provider here is a boundary: it fetches, validates, and hands the
//! core plain maps. Provider failures are never fatal; the resolvers in
//! this module degrade to bundled or synthetic tables instead.

pub mod country;
pub mod ecb;
pub mod sample;
pub mod spreads;
