// ABOUTME: Application-wide constants for the recipe generator
// ABOUTME: Storage keys, diagnostic limits, and service identifiers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Recipe Generator Contributors

/// Service identity used in logs and user-agent strings
pub mod service {
    /// Service name reported in structured logs
    pub const SERVICE_NAME: &str = "recipe-generator";

    /// Directory name under the platform data directory
    pub const DATA_DIR_NAME: &str = "recipe-generator";
}

/// Favorites persistence
pub mod storage {
    /// Key under which the favorites collection is stored
    pub const FAVORITES_KEY: &str = "savedRecipes";

    /// File extension used by the file-backed key-value store
    pub const STORE_FILE_EXTENSION: &str = "json";
}

/// Limits applied when echoing provider output back in diagnostics
pub mod diagnostics {
    /// Maximum characters of provider text kept in an error
    pub const MAX_SNIPPET_CHARS: usize = 200;
}
