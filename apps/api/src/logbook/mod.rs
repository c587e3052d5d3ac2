// Append-only audit log of analyses.
// Record layout lives in writer; persistence behind the LogStore trait in store.

pub mod handlers;
pub mod store;
pub mod writer;
