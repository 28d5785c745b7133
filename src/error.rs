// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error(
        "Unknown payment frequency '{0}' (use monthly|bimonthly|quarterly|quadrimester|semiannual|annual)"
    )]
    UnknownFrequency(String),

    #[error("Unknown regime '{0}' (use graduated|sac|price)")]
    UnknownRegime(String),

    #[error("Unknown entry kind '{0}'")]
    UnknownKind(String),
}
