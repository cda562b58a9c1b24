use std::{fmt, ops::Index};

use crate::error::{Error, Result};

/// A fixed-size table holding one value estimate per state, zero-initialized
#[derive(Debug, Clone, PartialEq)]
pub struct ValueTable {
    values: Vec<f32>,
}

impl ValueTable {
    /// Constructs a zeroed `ValueTable` for the states `0..len`
    pub fn new(len: usize) -> Result<Self> {
        if len == 0 {
            return Err(Error::EmptyStateSpace);
        }
        Ok(Self {
            values: vec![0.0; len],
        })
    }

    /// Returns the number of states
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Checked read of the value of `index`
    pub fn get(&self, index: usize) -> Result<f32> {
        self.values
            .get(index)
            .copied()
            .ok_or(Error::StateOutOfRange {
                index,
                len: self.len(),
            })
    }

    /// Checked write of the value of `index`
    pub fn set(&mut self, index: usize, value: f32) -> Result<()> {
        let len = self.len();
        let slot = self
            .values
            .get_mut(index)
            .ok_or(Error::StateOutOfRange { index, len })?;
        *slot = value;
        Ok(())
    }

    /// Get a slice view of the values
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = &f32> {
        self.values.iter()
    }

    /// Iterate the table as the rows of a grid `width` states wide
    ///
    /// **Panics** if `width` is 0
    pub fn rows(&self, width: usize) -> impl Iterator<Item = &[f32]> {
        self.values.chunks(width)
    }

    /// The smallest and largest value in the table
    pub fn bounds(&self) -> (f32, f32) {
        self.values
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }

    /// A [`Display`](fmt::Display) view of the table laid out as a grid `width` states wide
    ///
    /// The formatter's precision is honored and defaults to 3 decimals.
    pub fn grid(&self, width: usize) -> Grid<'_> {
        Grid {
            table: self,
            width: width.max(1),
        }
    }
}

impl Index<usize> for ValueTable {
    type Output = f32;

    fn index(&self, index: usize) -> &Self::Output {
        &self.values[index]
    }
}

/// See [`ValueTable::grid`]
pub struct Grid<'a> {
    table: &'a ValueTable,
    width: usize,
}

impl fmt::Display for Grid<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(3);
        for (i, row) in self.table.rows(self.width).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let cells = row
                .iter()
                .map(|v| format!("{v:>w$.p$}", w = precision + 4, p = precision))
                .collect::<Vec<_>>();
            write!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}
