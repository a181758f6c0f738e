//! Compressed Interleaved Sparse Row (CISR) slot encoding
//!
//! CISR spreads the rows of a CSR matrix over a fixed number of lanes
//! ("slots"). Each lane streams one row at a time; when its row runs out the
//! lane takes the next unconsumed row in row order. One step over all lanes
//! produces a [`SlotGroup`]. Lanes with no rows left emit
//! [`SlotEntry::Padding`] until every lane is padding, at which point the
//! stream ends.
//!
//! The finished [`CisrImage`] can be packed into 32-bit words,
//! `(value << 20) | (col << 8) | slot`, and exported as hex text for a
//! memory-initialisation file.

use num_traits::{Num, ToPrimitive};
use tracing::debug;

use crate::error::{Result, SmvpError};
use crate::matrix::config::CisrConfig;
use crate::matrix::csr::SparseMatrixCSR;

/// Width of the packed value field
pub const VALUE_BITS: u32 = 12;
/// Width of the packed column field
pub const COL_BITS: u32 = 12;
/// Width of the packed slot field
pub const SLOT_BITS: u32 = 8;

const VALUE_SHIFT: u32 = COL_BITS + SLOT_BITS;
const COL_SHIFT: u32 = SLOT_BITS;

/// Column field written for padding entries; real columns must stay below it
pub const PADDING_COL: u32 = (1 << COL_BITS) - 1;

/// Content of one lane within a slot group
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SlotEntry<T> {
    /// A stored non-zero
    Entry { value: T, col: usize },
    /// Lane has no rows left
    Padding,
}

impl<T> SlotEntry<T> {
    pub fn is_padding(&self) -> bool {
        matches!(self, SlotEntry::Padding)
    }
}

/// One step of the encoder: one entry per lane, indexed by slot number
#[derive(Debug, Clone, PartialEq)]
pub struct SlotGroup<T> {
    pub lanes: Vec<SlotEntry<T>>,
}

impl<T> SlotGroup<T> {
    /// Real (non-padding) entries tagged with their slot
    pub fn entries(&self) -> impl Iterator<Item = (usize, &SlotEntry<T>)> {
        self.lanes
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.is_padding())
    }
}

/// A row handed to a lane, in assignment order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowAssignment {
    pub lane: usize,
    pub row: usize,
    pub len: usize,
}

/// Complete slot encoding of a matrix
#[derive(Debug, Clone, PartialEq)]
pub struct CisrImage<T> {
    pub slot_count: usize,
    pub nnz: usize,
    pub groups: Vec<SlotGroup<T>>,
    /// Row-length stream: which lane took which row, and how long it was
    pub assignments: Vec<RowAssignment>,
}

/// Read cursor of a single lane
#[derive(Debug, Clone, Copy)]
enum Lane {
    Active { next: usize, end: usize },
    Retired,
}

/// Hands out rows in order, skipping (but recording) empty ones
struct RowFeeder<'a, T> {
    csr: &'a SparseMatrixCSR<T>,
    next_row: usize,
    assignments: Vec<RowAssignment>,
}

impl<'a, T> RowFeeder<'a, T> {
    fn assign(&mut self, lane: usize) -> Lane {
        while self.next_row < self.csr.n_rows {
            let row = self.next_row;
            self.next_row += 1;

            let start = self.csr.row_ptr[row];
            let end = self.csr.row_ptr[row + 1];
            self.assignments.push(RowAssignment {
                lane,
                row,
                len: end - start,
            });

            if start < end {
                return Lane::Active { next: start, end };
            }
        }
        Lane::Retired
    }
}

/// Builds [`CisrImage`]s for a fixed lane count
#[derive(Debug, Clone)]
pub struct CisrEncoder {
    config: CisrConfig,
}

impl CisrEncoder {
    /// # Errors
    ///
    /// Returns [`SmvpError::InvalidSlotCount`] if `config.slot_count` is zero.
    pub fn new(config: CisrConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CisrConfig {
        &self.config
    }

    /// Encodes a CSR matrix into slot groups
    ///
    /// # Errors
    ///
    /// Returns [`SmvpError::SlotOverrun`] if more groups than non-zeros would
    /// be produced. Every emitted group carries at least one real entry, so
    /// this only fires on a broken lane schedule.
    pub fn encode<T>(&self, csr: &SparseMatrixCSR<T>) -> Result<CisrImage<T>>
    where
        T: Copy + Num,
    {
        let slot_count = self.config.slot_count;
        let nnz = csr.nnz();

        let mut feeder = RowFeeder {
            csr,
            next_row: 0,
            assignments: Vec::with_capacity(csr.n_rows),
        };
        let mut lanes: Vec<Lane> = (0..slot_count).map(|lane| feeder.assign(lane)).collect();
        let mut groups = Vec::new();

        while lanes.iter().any(|l| matches!(l, Lane::Active { .. })) {
            let mut group = Vec::with_capacity(slot_count);

            for (slot, lane) in lanes.iter_mut().enumerate() {
                match *lane {
                    Lane::Active { next, end } => {
                        group.push(SlotEntry::Entry {
                            value: csr.values[next],
                            col: csr.col_idx[next],
                        });
                        *lane = if next + 1 >= end {
                            feeder.assign(slot)
                        } else {
                            Lane::Active {
                                next: next + 1,
                                end,
                            }
                        };
                    }
                    Lane::Retired => group.push(SlotEntry::Padding),
                }
            }

            groups.push(SlotGroup { lanes: group });
            if groups.len() > nnz {
                return Err(SmvpError::SlotOverrun {
                    groups: groups.len(),
                    nnz,
                });
            }
        }

        debug!(
            slot_count,
            nnz,
            groups = groups.len(),
            "encoded CISR slot groups"
        );

        Ok(CisrImage {
            slot_count,
            nnz,
            groups,
            assignments: feeder.assignments,
        })
    }
}

/// Packs one lane entry into a 32-bit word
///
/// # Errors
///
/// Returns [`SmvpError::PackOverflow`] if the value is not an integer in
/// `[0, 4095]`, the column is not below [`PADDING_COL`], or the slot does not
/// fit 8 bits.
pub fn pack_entry<T: ToPrimitive>(entry: &SlotEntry<T>, slot: usize) -> Result<u32> {
    let slot_limit = (1i64 << SLOT_BITS) - 1;
    if slot as i64 > slot_limit {
        return Err(SmvpError::PackOverflow {
            field: "slot",
            value: slot as i64,
            limit: slot_limit,
        });
    }

    let (value, col) = match entry {
        SlotEntry::Padding => (0, PADDING_COL),
        SlotEntry::Entry { value, col } => {
            let value_limit = (1i64 << VALUE_BITS) - 1;
            let v = value.to_f64().unwrap_or(f64::NAN);
            if !(v.fract() == 0.0 && (0.0..=value_limit as f64).contains(&v)) {
                return Err(SmvpError::PackOverflow {
                    field: "value",
                    value: v as i64,
                    limit: value_limit,
                });
            }

            let col_limit = PADDING_COL as i64 - 1;
            if *col as i64 > col_limit {
                return Err(SmvpError::PackOverflow {
                    field: "column",
                    value: *col as i64,
                    limit: col_limit,
                });
            }
            (v as u32, *col as u32)
        }
    };

    Ok((value << VALUE_SHIFT) | (col << COL_SHIFT) | slot as u32)
}

impl<T: Copy + ToPrimitive> CisrImage<T> {
    /// Number of non-padding entries across all groups
    pub fn entry_count(&self) -> usize {
        self.groups.iter().map(|g| g.entries().count()).sum()
    }

    /// Packs every lane of every group, group-major
    pub fn packed_words(&self) -> Result<Vec<u32>> {
        let mut words = Vec::with_capacity(self.groups.len() * self.slot_count);
        for group in &self.groups {
            for (slot, entry) in group.lanes.iter().enumerate() {
                words.push(pack_entry(entry, slot)?);
            }
        }
        Ok(words)
    }

    /// Hex lines for a memory-initialisation file: tag, then the packed word
    pub fn to_hex_lines(&self, tag: u8) -> Result<Vec<String>> {
        Ok(self
            .packed_words()?
            .into_iter()
            .map(|word| format!("{:02x}{:08x}", tag, word))
            .collect())
    }
}
