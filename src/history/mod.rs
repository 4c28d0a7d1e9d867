//! Snapshots, undo/redo and save/load.
//!
//! - `Snapshot`: Versioned copy of all 16 stacks plus the deal
//! - `History`: Undo and redo stacks of snapshots
//! - `SnapshotError`: Why an import was refused

pub mod snapshot;
pub mod undo;

pub use snapshot::{validate_deal, Snapshot, SnapshotError, SNAPSHOT_VERSION};
pub use undo::History;
