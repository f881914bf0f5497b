//! Instructions handed to the execution layer.

use crate::cut::CutObject;

/// One instruction of a cut code command stream.
///
/// A stream holds one `Plot` per cut object in sequence order, then exactly
/// one `PlotStart`.
#[derive(Debug, Clone, Copy)]
pub enum LaserCommand<'a> {
    /// Plot this cut object
    Plot(&'a CutObject),
    /// End of the batch; start plotting
    PlotStart,
}

impl<'a> LaserCommand<'a> {
    pub fn is_plot_start(&self) -> bool {
        matches!(self, Self::PlotStart)
    }

    pub fn cut(&self) -> Option<&'a CutObject> {
        match self {
            Self::Plot(cut) => Some(*cut),
            Self::PlotStart => None,
        }
    }
}
