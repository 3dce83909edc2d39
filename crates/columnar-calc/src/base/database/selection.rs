//! Row selections and the single-pass iterators that walk them.
//!
//! A [`Selection`] names rows by row id. A [`SelectionIter`] resolves it against one
//! column and yields 0-based positions into that column, clipped to the column's rows.
use super::{ColumnOperationError, ColumnOperationResult, NumericColumn};
use alloc::vec::Vec;
use bit_iter::BitIter;
use core::{ops::Range, slice};
use serde::{Deserialize, Serialize};

const WORD_BITS: u64 = u64::BITS as u64;

/// The rows of a column an operation should touch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    /// Every row id in `start..end`.
    Range {
        /// First selected row id
        start: u64,
        /// One past the last selected row id
        end: u64,
    },
    /// An explicit, strictly increasing list of row ids.
    Rows(Vec<u64>),
    /// Bit `i` of the concatenated little-endian words selects row id `first_row + i`.
    Mask {
        /// Row id of bit 0 of the first word
        first_row: u64,
        /// Bitmask words
        words: Vec<u64>,
    },
}

impl Selection {
    /// Selects every row id in `rows`.
    #[must_use]
    pub fn range(rows: Range<u64>) -> Self {
        Self::Range {
            start: rows.start,
            end: rows.end,
        }
    }

    /// Selects the row ids of a `true` flag, where `flags[0]` is row id `first_row`.
    #[must_use]
    pub fn from_flags(first_row: u64, flags: &[bool]) -> Self {
        let mut words = vec![0u64; flags.len().div_ceil(64)];
        for (i, &flag) in flags.iter().enumerate() {
            if flag {
                words[i / 64] |= 1 << (i % 64);
            }
        }
        Self::Mask { first_row, words }
    }
}

/// Restricts `words[index]` to the bit indexes in `lo..hi`.
fn masked_word(words: &[u64], index: usize, lo: u64, hi: u64) -> u64 {
    let word_start = index as u64 * WORD_BITS;
    let mut word = words[index];
    if lo > word_start {
        word &= u64::MAX
            .checked_shl(u32::try_from(lo - word_start).unwrap_or(u32::MAX))
            .unwrap_or(0);
    }
    if hi < word_start + WORD_BITS {
        let keep = hi.saturating_sub(word_start);
        word &= u64::MAX
            .checked_shr(u32::try_from(WORD_BITS - keep).unwrap_or(u32::MAX))
            .unwrap_or(0);
    }
    word
}

struct MaskCursor<'a> {
    words: &'a [u64],
    lo: u64,
    hi: u64,
    word_index: usize,
    end_word: usize,
    bits: BitIter<u64>,
    start_position: usize,
}

impl MaskCursor<'_> {
    fn next_position(&mut self) -> Option<usize> {
        loop {
            if let Some(bit) = self.bits.next() {
                let index = self.word_index as u64 * WORD_BITS + bit as u64;
                return Some(self.start_position + (index - self.lo) as usize);
            }
            self.word_index += 1;
            if self.word_index >= self.end_word {
                return None;
            }
            self.bits = BitIter::from(masked_word(self.words, self.word_index, self.lo, self.hi));
        }
    }
}

enum Cursor<'a> {
    Dense {
        next: usize,
    },
    Rows {
        rows: slice::Iter<'a, u64>,
        column_first_row: u64,
    },
    Mask(MaskCursor<'a>),
}

/// Single-pass iterator over the positions a selection picks out of one column.
///
/// `len()` is the number of positions still to come. Positions are strictly increasing.
pub struct SelectionIter<'a> {
    cursor: Cursor<'a>,
    remaining: usize,
    first_row: u64,
}

impl<'a> SelectionIter<'a> {
    /// Resolves `selection` against the `len` rows starting at row id `column_first_row`.
    ///
    /// Without a selection every row is selected. Row ids outside the column are skipped.
    ///
    /// # Errors
    /// Returns [`ColumnOperationError::UnsortedSelection`] if a row list is not strictly
    /// increasing.
    pub fn new(
        column_first_row: u64,
        len: usize,
        selection: Option<&'a Selection>,
    ) -> ColumnOperationResult<Self> {
        let column_end = column_first_row.saturating_add(len as u64);
        match selection {
            None => Ok(Self::dense(column_first_row, 0, len)),
            Some(Selection::Range { start, end }) => {
                let start = (*start).clamp(column_first_row, column_end);
                let end = (*end).clamp(start, column_end);
                Ok(Self::dense(
                    start,
                    (start - column_first_row) as usize,
                    (end - start) as usize,
                ))
            }
            Some(Selection::Rows(rows)) => {
                if let Some(position) = rows.windows(2).position(|pair| pair[0] >= pair[1]) {
                    return Err(ColumnOperationError::UnsortedSelection {
                        position: position + 1,
                    });
                }
                let lo = rows.partition_point(|&row| row < column_first_row);
                let hi = rows.partition_point(|&row| row < column_end);
                let rows = &rows[lo..hi];
                Ok(Self {
                    first_row: rows.first().copied().unwrap_or(column_first_row),
                    remaining: rows.len(),
                    cursor: Cursor::Rows {
                        rows: rows.iter(),
                        column_first_row,
                    },
                })
            }
            Some(Selection::Mask { first_row, words }) => Ok(Self::mask(
                column_first_row,
                column_end,
                *first_row,
                words,
            )),
        }
    }

    /// Resolves `selection` against the rows of `column`.
    ///
    /// # Errors
    /// See [`SelectionIter::new`].
    pub fn for_column(
        column: &NumericColumn,
        selection: Option<&'a Selection>,
    ) -> ColumnOperationResult<Self> {
        Self::new(column.first_row(), column.len(), selection)
    }

    fn dense(first_row: u64, start: usize, count: usize) -> Self {
        Self {
            cursor: Cursor::Dense { next: start },
            remaining: count,
            first_row,
        }
    }

    fn mask(
        column_first_row: u64,
        column_end: u64,
        mask_first_row: u64,
        words: &'a [u64],
    ) -> Self {
        let total_bits = words.len() as u64 * WORD_BITS;
        let lo = column_first_row.saturating_sub(mask_first_row).min(total_bits);
        let hi = column_end
            .saturating_sub(mask_first_row)
            .clamp(lo, total_bits);
        let start_word = (lo / WORD_BITS) as usize;
        let end_word = hi.div_ceil(WORD_BITS) as usize;
        let masked = |index: usize| masked_word(words, index, lo, hi);
        let remaining = (start_word..end_word)
            .map(|index| masked(index).count_ones() as usize)
            .sum();
        let first_row = (start_word..end_word)
            .map(|index| (index, masked(index)))
            .find(|(_, word)| *word != 0)
            .map_or(column_first_row, |(index, word)| {
                mask_first_row + index as u64 * WORD_BITS + u64::from(word.trailing_zeros())
            });
        let bits = if start_word < end_word {
            BitIter::from(masked(start_word))
        } else {
            BitIter::from(0u64)
        };
        Self {
            cursor: Cursor::Mask(MaskCursor {
                words,
                lo,
                hi,
                word_index: start_word,
                end_word,
                bits,
                start_position: (mask_first_row + lo).saturating_sub(column_first_row) as usize,
            }),
            remaining,
            first_row,
        }
    }

    /// Row id of the first selected row, or of the column's first row if nothing is selected.
    #[must_use]
    pub fn first_row(&self) -> u64 {
        self.first_row
    }

    /// Returns true if the positions form one contiguous run.
    #[must_use]
    pub fn is_dense(&self) -> bool {
        matches!(self.cursor, Cursor::Dense { .. })
    }

    /// Returns the next position without translating through a row list or mask.
    ///
    /// Falls back to [`Iterator::next`] when the selection is not dense.
    #[inline]
    pub fn next_dense(&mut self) -> Option<usize> {
        if let Cursor::Dense { next } = &mut self.cursor {
            if self.remaining == 0 {
                return None;
            }
            let position = *next;
            *next += 1;
            self.remaining -= 1;
            return Some(position);
        }
        self.next()
    }
}

impl Iterator for SelectionIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let position = match &mut self.cursor {
            Cursor::Dense { next } => {
                let position = *next;
                *next += 1;
                Some(position)
            }
            Cursor::Rows {
                rows,
                column_first_row,
            } => rows.next().map(|&row| (row - *column_first_row) as usize),
            Cursor::Mask(mask) => mask.next_position(),
        }?;
        self.remaining -= 1;
        Some(position)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for SelectionIter<'_> {}
