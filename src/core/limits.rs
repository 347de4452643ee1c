/*!
 * Store Limits and Constants
 *
 * Centralized location for the defaults the in-memory store is built with.
 * Linux-compatible values are marked with [LINUX-COMPAT]
 */

// =============================================================================
// TREE LAYOUT
// =============================================================================

/// Arena slot of the root directory
pub const ROOT_NODE_ID: u64 = 0;

/// Name of the temporary directory directly under the root
pub const DEFAULT_TEMP_DIR_NAME: &str = "tmp";

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// First handle identifier handed out by a fresh store
/// Keeps simulated descriptors clear of the stdio range
pub const FIRST_HANDLE_ID: u64 = 100;

// =============================================================================
// TEMPORARY NAMES
// =============================================================================

/// Length of the random run substituted into temp-name patterns
pub const TEMP_NAME_LEN: usize = 8;

/// Placeholder replaced by the random run
pub const TEMP_NAME_PLACEHOLDER: char = '*';

// =============================================================================
// PERMISSIONS
// =============================================================================

/// Mode for seeded directories and `mkdir_all` defaults
/// [LINUX-COMPAT] Matches `mkdir -p` before umask
pub const DEFAULT_DIR_MODE: u32 = 0o777;

/// Mode for files made by `create`
/// [LINUX-COMPAT] Matches `creat(2)` callers before umask
pub const DEFAULT_FILE_MODE: u32 = 0o666;

/// Mode for files made by `create_temp`
/// [LINUX-COMPAT] Matches `mkstemp(3)`
pub const TEMP_FILE_MODE: u32 = 0o600;

/// Mode for directories made by `mkdir_temp`
/// [LINUX-COMPAT] Matches `mkdtemp(3)`
pub const TEMP_DIR_MODE: u32 = 0o700;

// =============================================================================
// OBSERVABILITY
// =============================================================================

/// Operations slower than this are logged at warn level (milliseconds)
pub const SLOW_OPERATION_THRESHOLD_MS: u128 = 10;
