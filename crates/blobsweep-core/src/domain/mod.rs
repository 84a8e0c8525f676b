//! Domain model (cleaner definitions, run identity, status, errors).

pub mod cleaner;
pub mod errors;
pub mod ids;
pub mod status;

pub use self::cleaner::{BlobEntry, CleanerSpec};
pub use self::errors::{CleanerError, RegistryError, StoreError};
pub use self::ids::RunId;
pub use self::status::{AgentStatus, RunSummary};
