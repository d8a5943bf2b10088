// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors at the text boundary.

/// Failures reading a layer document or writing an export.
///
/// Building and querying never fail; only JSON text going in or out can.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input was not valid JSON, or could not be read.
    #[error("failed to parse layer document: {0}")]
    Parse(#[source] serde_json::Error),
    /// An export payload could not be serialized.
    #[error("failed to serialize export payload: {0}")]
    Serialize(#[source] serde_json::Error),
}
