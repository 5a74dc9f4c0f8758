//! Structured logging field name constants for quill.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log aggregation tools can query by standardized names across every
//! subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, automatic fallback applied |
//! | INFO  | Lifecycle events (startup, shutdown), operation completions |
//! | DEBUG | Decision points, intermediate values, config choices |
//! | TRACE | Per-item iteration, high-volume data |

/// Subsystem originating the log event.
/// Values: "api", "db", "service"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "note_service", "pool", "token_codec"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "create_note", "trash_note", "authenticate"
pub const OPERATION: &str = "op";

/// User UUID the operation acts on behalf of.
pub const USER_ID: &str = "user_id";

/// Note UUID being operated on.
pub const NOTE_ID: &str = "note_id";

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of results returned by a listing or search.
pub const RESULT_COUNT: &str = "result_count";
