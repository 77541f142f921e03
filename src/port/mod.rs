//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Inbound ports are the use-cases the CLI drives. Outbound ports define the
//! seams between the run's logic and the outside world:
//!
//! ```text
//!                 ┌──────────────────────────────┐
//!                 │         Application          │
//!                 │  resolver · scorer · service │
//!                 └──────────────┬───────────────┘
//!        ┌───────────────┬───────┴───────┬────────────────┐
//!        ▼               ▼               ▼                ▼
//!  ┌───────────┐  ┌─────────────┐  ┌───────────┐  ┌──────────────┐
//!  │JsonFetcher│  │Concentration│  │  Market   │  │SnapshotStore │
//!  │ToolRunner │  │  Provider   │  │  sources  │  │              │
//!  └───────────┘  └─────────────┘  └───────────┘  └──────────────┘
//! ```

pub mod inbound;
pub mod outbound;

pub use outbound::fetch::JsonFetcher;
pub use outbound::market::{PoolSource, PriceSource};
pub use outbound::provider::{ConcentrationProvider, ResolveInput, Skip};
pub use outbound::store::SnapshotStore;
pub use outbound::tool::{ToolOutput, ToolRunner};
