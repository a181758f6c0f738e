//! Matrix Market coordinate reader
//!
//! Accepts `%%MatrixMarket matrix coordinate <real|integer|pattern> general`.
//! Indices in the file are 1-based and are translated to 0-based triplets here;
//! pattern entries are stored with value 1.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::error::{Result, SmvpError};
use crate::matrix::{Triplet, TripletStore};

/// Value field declared in the banner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueField {
    Real,
    Integer,
    Pattern,
}

/// Parsed and validated banner line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Banner {
    pub field: ValueField,
}

/// Parses the `%%MatrixMarket` banner, rejecting anything but sparse general real data
pub fn parse_banner(line: &str) -> Result<Banner> {
    let tokens: Vec<String> = line.split_whitespace().map(str::to_ascii_lowercase).collect();

    if tokens.first().map(String::as_str) != Some("%%matrixmarket") {
        return Err(SmvpError::Parse {
            line: 1,
            reason: "missing %%MatrixMarket header".to_string(),
        });
    }
    if tokens.len() != 5 {
        return Err(SmvpError::Parse {
            line: 1,
            reason: format!("expected 5 banner fields, found {}", tokens.len()),
        });
    }
    if tokens[1] != "matrix" {
        return Err(SmvpError::UnsupportedMatrix(format!("object type '{}'", tokens[1])));
    }
    if tokens[2] != "coordinate" {
        return Err(SmvpError::UnsupportedMatrix(format!(
            "storage '{}' is not sparse (coordinate)",
            tokens[2]
        )));
    }

    let field = match tokens[3].as_str() {
        "real" => ValueField::Real,
        "integer" => ValueField::Integer,
        "pattern" => ValueField::Pattern,
        other => {
            return Err(SmvpError::UnsupportedMatrix(format!("value field '{}'", other)));
        }
    };

    if tokens[4] != "general" {
        return Err(SmvpError::UnsupportedMatrix(format!(
            "symmetry '{}' (only general matrices are supported)",
            tokens[4]
        )));
    }

    Ok(Banner { field })
}

fn parse_index(token: &str, line: usize, what: &str) -> Result<usize> {
    let one_based: usize = token.parse().map_err(|_| SmvpError::Parse {
        line,
        reason: format!("invalid {} index '{}'", what, token),
    })?;
    one_based.checked_sub(1).ok_or_else(|| SmvpError::Parse {
        line,
        reason: format!("{} index must be at least 1", what),
    })
}

/// Reads a Matrix Market stream into a validated triplet store
pub fn read_matrix_market<R: BufRead>(reader: R) -> Result<TripletStore<f64>> {
    let mut lines = reader.lines().enumerate().map(|(i, l)| (i + 1, l));

    let banner = match lines.next() {
        Some((_, line)) => parse_banner(&line?)?,
        None => {
            return Err(SmvpError::Parse {
                line: 1,
                reason: "empty input".to_string(),
            })
        }
    };

    let mut size: Option<(usize, usize, usize)> = None;
    let mut entries = Vec::new();
    let mut last_line = 1;

    for (line_no, line) in lines {
        let line = line?;
        last_line = line_no;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('%') {
            continue;
        }

        let parts: Vec<&str> = trimmed.split_whitespace().collect();

        let Some((_, _, nnz)) = size else {
            if parts.len() != 3 {
                return Err(SmvpError::Parse {
                    line: line_no,
                    reason: "size line must hold rows, columns and nnz".to_string(),
                });
            }
            let parse = |s: &str| {
                s.parse::<usize>().map_err(|_| SmvpError::Parse {
                    line: line_no,
                    reason: format!("invalid size field '{}'", s),
                })
            };
            let (r, c, n) = (parse(parts[0])?, parse(parts[1])?, parse(parts[2])?);
            size = Some((r, c, n));
            entries.reserve(n);
            continue;
        };

        if entries.len() == nnz {
            return Err(SmvpError::Parse {
                line: line_no,
                reason: format!("more than the declared {} entries", nnz),
            });
        }

        let expected = if banner.field == ValueField::Pattern { 2 } else { 3 };
        if parts.len() < expected {
            return Err(SmvpError::Parse {
                line: line_no,
                reason: format!("expected {} fields, found {}", expected, parts.len()),
            });
        }

        let row = parse_index(parts[0], line_no, "row")?;
        let col = parse_index(parts[1], line_no, "column")?;
        let value = match banner.field {
            ValueField::Pattern => 1.0,
            ValueField::Real | ValueField::Integer => {
                parts[2].parse::<f64>().map_err(|_| SmvpError::Parse {
                    line: line_no,
                    reason: format!("invalid value '{}'", parts[2]),
                })?
            }
        };

        entries.push(Triplet::new(row, col, value));
    }

    let (n_rows, n_cols, nnz) = size.ok_or_else(|| SmvpError::Parse {
        line: last_line,
        reason: "missing size line".to_string(),
    })?;
    if entries.len() != nnz {
        return Err(SmvpError::Parse {
            line: last_line,
            reason: format!("expected {} entries, found {}", nnz, entries.len()),
        });
    }

    debug!(n_rows, n_cols, nnz, field = ?banner.field, "read Matrix Market input");

    TripletStore::from_parts(n_rows, n_cols, nnz, entries)
}

/// Opens and reads a Matrix Market file
pub fn read_matrix_market_file<P: AsRef<Path>>(path: P) -> Result<TripletStore<f64>> {
    let file = File::open(path)?;
    read_matrix_market(BufReader::new(file))
}
