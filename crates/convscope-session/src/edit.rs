// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{SessionError, SessionResult};

/// Which container a cell edit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellTarget {
    Image,
    Kernel,
}

impl Display for CellTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CellTarget::Image => write!(f, "image"),
            CellTarget::Kernel => write!(f, "kernel"),
        }
    }
}

/// Parse user-typed cell text. Surrounding whitespace is ignored; anything
/// that is not a finite decimal number is rejected.
pub fn parse_cell_input(raw: &str) -> SessionResult<f64> {
    let trimmed = raw.trim();
    let value: f64 = trimmed
        .parse()
        .map_err(|_| SessionError::RejectedEdit(format!("'{}' is not a number", raw)))?;
    ensure_finite(value)
}

pub(crate) fn ensure_finite(value: f64) -> SessionResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SessionError::RejectedEdit(format!(
            "{} is not a finite number",
            value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_decimals() {
        assert_eq!(parse_cell_input(" 2.5 "), Ok(2.5));
        assert_eq!(parse_cell_input("-3"), Ok(-3.0));
        assert_eq!(parse_cell_input("1e2"), Ok(100.0));
    }

    #[test]
    fn test_rejects_garbage() {
        for raw in ["", "abc", "1,5", "NaN", "inf", "-"] {
            assert!(
                matches!(parse_cell_input(raw), Err(SessionError::RejectedEdit(_))),
                "{:?} should be rejected",
                raw
            );
        }
    }
}
