//! Resource limits and behaviour switches for parsing.
//!
//! A parse walks arbitrary caller input, so every unbounded resource has a
//! configurable ceiling:
//!
//! - E120_InputTooLarge: total input size
//! - E121_NestingTooDeep: array/object nesting depth (bounds recursion)
//! - E122_StringTooLong: decoded string length
//! - E123_TooManyFields: fields in one object
//! - E124_ArrayTooLong: elements in one array
//!
//! Two switches select between strict RFC 8259 behaviour and the lax
//! behaviour some readers expect: unknown escapes passed through verbatim and
//! a root restricted to objects or arrays.

use serde::{Deserialize, Serialize};

/// Deepest nesting the recursive parser accepts, whatever
/// [`Limits::max_nesting_depth`] says.
pub const MAX_SUPPORTED_DEPTH: u64 = 1024;

/// Limits and switches applied by [`crate::json::parse_with_limits`].
///
/// Deserializing fills every missing field from [`Limits::strict`], so a
/// config file only needs to name the fields it changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Limits {
    /// Maximum total input size in bytes (E120)
    pub max_input_size: u64,
    /// Maximum nesting depth for arrays/objects (E121), capped at [`MAX_SUPPORTED_DEPTH`]
    pub max_nesting_depth: u64,
    /// Maximum decoded string length in bytes (E122)
    pub max_string_length: u64,
    /// Maximum number of fields in an object (E123)
    pub max_object_fields: u64,
    /// Maximum number of elements in an array (E124)
    pub max_array_length: u64,
    /// Append unknown escaped characters verbatim instead of failing (E106)
    pub lenient_escapes: bool,
    /// Reject scalars and strings at the root (E109)
    pub containers_only_at_root: bool,
}

impl Limits {
    /// Default limits: RFC 8259 grammar with conservative resource bounds.
    pub const fn strict() -> Self {
        Self {
            max_input_size: 8 * 1024 * 1024, // 8 MiB
            max_nesting_depth: 128,          // 128 levels
            max_string_length: 1024 * 1024,  // 1 MiB
            max_object_fields: 65_536,       // 65,536 fields
            max_array_length: 1_000_000,     // 1,000,000 elements
            lenient_escapes: false,
            containers_only_at_root: false,
        }
    }

    /// Larger bounds and unknown escapes accepted.
    pub const fn lenient() -> Self {
        Self {
            max_input_size: 64 * 1024 * 1024, // 64 MiB
            max_nesting_depth: 256,           // 256 levels
            max_string_length: 16 * 1024 * 1024,
            max_object_fields: 1_000_000,
            max_array_length: 10_000_000,
            lenient_escapes: true,
            containers_only_at_root: false,
        }
    }

    /// Nesting depth enforced by the parser: the configured depth capped at
    /// [`MAX_SUPPORTED_DEPTH`].
    pub const fn nesting_limit(&self) -> u64 {
        if self.max_nesting_depth < MAX_SUPPORTED_DEPTH {
            self.max_nesting_depth
        } else {
            MAX_SUPPORTED_DEPTH
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::strict()
    }
}
