//! Search orchestration: concurrent fan-out to providers, fan-in of their
//! results, and first-seen URL deduplication.

pub mod collector;
pub mod dedup;
