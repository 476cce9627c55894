// Korean Registration Number Validation - Core Library
// Exposes all modules for use in CLI, API server, and tests

pub mod normalize;
pub mod checksum;       // Weighted check-digit schemes
pub mod validation;     // Result + error types
pub mod identifiers;    // RRN / BRN / CRN
pub mod batch;          // CSV batch validation
pub mod config;
pub mod logging;

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use checksum::ChecksumScheme;
pub use validation::{ValidationDetails, ValidationError, ValidationResult};
pub use identifiers::{
    validate, format_input, mask_input,
    IdKind, ParseKindError,
    validate_resident, ResidentNumber, ResidentInfo, Gender,
    validate_business, BusinessNumber, BusinessType,
    validate_corporate, CorporateNumber, CorporateInfo,
};
pub use batch::{
    BatchRecord, BatchEntry, BatchSummary, BatchReport,
    load_csv, validate_batch, write_csv,
};
pub use config::ServerConfig;

#[cfg(feature = "server")]
pub use api::{build_router, AppState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
