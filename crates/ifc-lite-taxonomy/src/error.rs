// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for taxonomy operations

use crate::Kind;
use thiserror::Error;

/// Taxonomy result type
pub type Result<T> = std::result::Result<T, Error>;

/// Taxonomy errors
///
/// The taxonomy itself has a single failure mode: an operation that is
/// structurally undefined for the kind it was invoked on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Operation undefined for this kind (e.g. reversing a circle)
    #[error("Topology error on {kind}: {message}")]
    Topology { kind: Kind, message: String },
}

impl Error {
    /// Create a topology error
    pub fn topology(kind: Kind, msg: impl Into<String>) -> Self {
        Error::Topology {
            kind,
            message: msg.into(),
        }
    }

    /// Create the generic "cannot reverse" topology error
    pub fn not_reversible(kind: Kind) -> Self {
        Error::topology(kind, "orientation reversal is undefined for this kind")
    }

    /// Kind of the node the error was raised on
    pub fn kind(&self) -> Kind {
        match self {
            Error::Topology { kind, .. } => *kind,
        }
    }
}
