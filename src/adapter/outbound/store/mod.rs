//! Snapshot persistence adapters.

pub mod filesystem;

pub use filesystem::FileSnapshotStore;
