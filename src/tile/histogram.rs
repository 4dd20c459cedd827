//! Colour counting and dominant-colour selection.
//!
//! The histogram is built by a single row-major scan, so entry order equals
//! first-occurrence order. Ranking uses a stable sort on descending count:
//! when two colours tie, the one seen earlier in scan order ranks higher.
//! That tie-break is load-bearing for reproducible conversions and must not
//! be left to an unordered map.

use std::collections::HashMap;

use crate::types::{Colour, DominantColours};

use super::RasterTile;

/// Pixel counts per distinct RGBA colour, in first-occurrence order.
#[derive(Debug, Clone, Default)]
pub struct ColourHistogram {
    entries: Vec<(Colour, usize)>,
    index: HashMap<Colour, usize>,
}

impl ColourHistogram {
    /// Count the colours of a tile in scan order.
    pub fn of(tile: &RasterTile) -> Self {
        let mut histogram = Self::default();
        for &pixel in tile.pixels() {
            histogram.add(pixel);
        }
        histogram
    }

    fn add(&mut self, colour: Colour) {
        match self.index.get(&colour) {
            Some(&slot) => self.entries[slot].1 += 1,
            None => {
                self.index.insert(colour, self.entries.len());
                self.entries.push((colour, 1));
            }
        }
    }

    /// Number of distinct colours.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total pixel count (equals width × height of the scanned tile).
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Colours ranked by descending count.
    ///
    /// The sort is stable, so colours with equal counts keep their
    /// first-occurrence order.
    pub fn ranked(&self) -> Vec<(Colour, usize)> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// Select background, foreground, and tertiary colours.
    ///
    /// Background is the most frequent colour and foreground the second;
    /// a single-colour tile uses the same colour for both. The tertiary
    /// colour exists only when at least three distinct colours do.
    pub fn dominant(&self) -> DominantColours {
        let ranked = self.ranked();
        let background = ranked.first().map_or(Colour::TRANSPARENT, |e| e.0);
        let foreground = ranked.get(1).map_or(background, |e| e.0);
        let tertiary = ranked.get(2).map(|e| e.0);

        DominantColours {
            background,
            foreground,
            tertiary,
        }
    }
}
