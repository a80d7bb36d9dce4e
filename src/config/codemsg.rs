//! Message code table shared by success and error bodies.

use std::collections::HashMap;

pub const STUDENT_CREATED: u32 = 12;
pub const STUDENT_UPDATED: u32 = 13;
pub const STUDENT_DELETED: u32 = 14;
pub const PERMISSION_DISPATCHED: u32 = 15;
pub const PERMISSION_REMOVED: u32 = 16;

pub const UNKNOWN: u32 = 9999;
pub const UNAUTHORIZED: u32 = 10000;
pub const FORBIDDEN: u32 = 10001;
pub const NOT_FOUND: u32 = 10020;
pub const STUDENT_NOT_FOUND: u32 = 10022;
pub const PARAMETER_ERROR: u32 = 10030;
pub const INVALID_TOKEN: u32 = 10041;
pub const TOKEN_EXPIRED: u32 = 10042;

/// Built-in message for a code; unknown codes fall back to the generic text.
pub fn default_message(code: u32) -> &'static str {
    match code {
        STUDENT_CREATED => "student created",
        STUDENT_UPDATED => "student updated",
        STUDENT_DELETED => "student deleted",
        PERMISSION_DISPATCHED => "permission dispatched",
        PERMISSION_REMOVED => "permission removed",
        UNAUTHORIZED => "authorization required",
        FORBIDDEN => "permission denied",
        NOT_FOUND => "resource not found",
        STUDENT_NOT_FOUND => "student not found",
        PARAMETER_ERROR => "invalid parameters",
        INVALID_TOKEN => "invalid token",
        TOKEN_EXPIRED => "token expired",
        _ => "internal server error",
    }
}

/// Code to message lookup with optional per-deployment overrides.
#[derive(Clone, Debug, Default)]
pub struct CodeMessages {
    overrides: HashMap<u32, String>,
}

impl CodeMessages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_override(mut self, code: u32, message: impl Into<String>) -> Self {
        self.overrides.insert(code, message.into());
        self
    }

    /// Parse `code=message` pairs separated by `;`.
    pub fn parse_overrides(raw: &str) -> Option<Self> {
        let mut codes = Self::new();
        for pair in raw.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            let (code, message) = pair.split_once('=')?;
            codes = codes.with_override(code.trim().parse().ok()?, message.trim());
        }
        Some(codes)
    }

    pub fn message(&self, code: u32) -> &str {
        self.overrides
            .get(&code)
            .map(String::as_str)
            .unwrap_or_else(|| default_message(code))
    }
}
