//! Ordered cut sequences.
//!
//! The order of a [`CutCode`] is the order the laser head visits its cuts.
//! Consecutive cuts need not touch: an unlit travel move is implied whenever
//! one cut ends away from where the next one starts.

use std::fmt;
use std::ops::{Index, IndexMut};

use tracing::trace;

use crate::command::LaserCommand;
use crate::cut::CutObject;
use crate::drawable::{svg_document, Drawable};

/// Ordered list of cut objects.
#[derive(Debug, Clone, Default)]
pub struct CutCode {
    cuts: Vec<CutObject>,
}

impl CutCode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cuts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cuts.is_empty()
    }

    pub fn push(&mut self, cut: impl Into<CutObject>) {
        self.cuts.push(cut.into());
    }

    pub fn insert(&mut self, index: usize, cut: impl Into<CutObject>) {
        self.cuts.insert(index, cut.into());
    }

    pub fn remove(&mut self, index: usize) -> CutObject {
        self.cuts.remove(index)
    }

    pub fn get(&self, index: usize) -> Option<&CutObject> {
        self.cuts.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CutObject> {
        self.cuts.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, CutObject> {
        self.cuts.iter_mut()
    }

    pub fn as_slice(&self) -> &[CutObject] {
        &self.cuts
    }

    /// One preview drawable per cut, in order.
    pub fn export_drawable(&self) -> Vec<Drawable> {
        self.cuts.iter().map(CutObject::to_drawable).collect()
    }

    /// The whole sequence as a standalone SVG document.
    pub fn to_svg_document(&self) -> String {
        svg_document(&self.export_drawable())
    }

    /// Reverse the direction of travel over `j..k`.
    ///
    /// Every cut in the range is reversed, then the range itself is
    /// reversed, so the path through it runs backwards. `cross(j, j)` does
    /// nothing and applying the same cross twice restores the sequence.
    ///
    /// # Panics
    ///
    /// Panics unless `j <= k <= self.len()`.
    pub fn cross(&mut self, j: usize, k: usize) {
        trace!(j, k, "Crossing cut range");
        let range = &mut self.cuts[j..k];
        for cut in range.iter_mut() {
            cut.reverse();
        }
        range.reverse();
    }

    /// Instructions for the execution layer: one plot per cut in order,
    /// then a single plot start.
    pub fn generate_commands(&self) -> impl Iterator<Item = LaserCommand<'_>> + '_ {
        self.cuts
            .iter()
            .map(LaserCommand::Plot)
            .chain(std::iter::once(LaserCommand::PlotStart))
    }
}

impl fmt::Display for CutCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CutCode({} items)", self.cuts.len())
    }
}

impl Index<usize> for CutCode {
    type Output = CutObject;

    fn index(&self, index: usize) -> &CutObject {
        &self.cuts[index]
    }
}

impl IndexMut<usize> for CutCode {
    fn index_mut(&mut self, index: usize) -> &mut CutObject {
        &mut self.cuts[index]
    }
}

impl From<Vec<CutObject>> for CutCode {
    fn from(cuts: Vec<CutObject>) -> Self {
        Self { cuts }
    }
}

impl FromIterator<CutObject> for CutCode {
    fn from_iter<I: IntoIterator<Item = CutObject>>(iter: I) -> Self {
        Self {
            cuts: iter.into_iter().collect(),
        }
    }
}

impl Extend<CutObject> for CutCode {
    fn extend<I: IntoIterator<Item = CutObject>>(&mut self, iter: I) {
        self.cuts.extend(iter);
    }
}

impl IntoIterator for CutCode {
    type Item = CutObject;
    type IntoIter = std::vec::IntoIter<CutObject>;

    fn into_iter(self) -> Self::IntoIter {
        self.cuts.into_iter()
    }
}

impl<'a> IntoIterator for &'a CutCode {
    type Item = &'a CutObject;
    type IntoIter = std::slice::Iter<'a, CutObject>;

    fn into_iter(self) -> Self::IntoIter {
        self.cuts.iter()
    }
}

impl<'a> IntoIterator for &'a mut CutCode {
    type Item = &'a mut CutObject;
    type IntoIter = std::slice::IterMut<'a, CutObject>;

    fn into_iter(self) -> Self::IntoIter {
        self.cuts.iter_mut()
    }
}
