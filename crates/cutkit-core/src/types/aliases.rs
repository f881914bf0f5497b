//! Type aliases for commonly used complex types.
//!
//! Cut objects share one configuration record per logical operation and
//! return point streams whose concrete iterator type depends on the cut kind.
//! These aliases give both patterns a name.

use std::sync::Arc;

/// A reference-counted, read-only value shared by many owners.
///
/// Values behind a `Shared` are never mutated once shared. Build the value
/// completely, then wrap it.
///
/// # Example
/// ```rust,ignore
/// let settings: Shared<LaserSettings> = shared(LaserSettings::default());
/// let line = LineCut::new(start, end, Some(settings.clone()));
/// ```
pub type Shared<T> = Arc<T>;

/// A boxed dynamically-typed iterator borrowing from `'a`.
///
/// Used when the concrete iterator varies at runtime, e.g. a lazy line
/// plotter versus a buffered curve plot versus a raster scan.
///
/// # Example
/// ```rust,ignore
/// let points: BoxedIterator<'_, PlotPoint> = if raster {
///     Box::new(plan.plot())
/// } else {
///     Box::new(plot_line(0, 0, 10, 0))
/// };
/// ```
pub type BoxedIterator<'a, T> = Box<dyn Iterator<Item = T> + 'a>;

/// Create a new `Shared<T>` from a value.
#[inline]
pub fn shared<T>(value: T) -> Shared<T> {
    Arc::new(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_creation() {
        let value: Shared<i32> = shared(42);
        let other = value.clone();
        assert_eq!(*other, 42);
        assert_eq!(Arc::strong_count(&value), 2);
    }

    #[test]
    fn test_boxed_iterator() {
        let forward: BoxedIterator<'_, u32> = Box::new(0..5);
        assert_eq!(forward.collect::<Vec<_>>(), vec![0, 1, 2, 3, 4]);

        let data = vec![3, 4, 5];
        let ascending = false;
        let iter: BoxedIterator<'_, &i32> = if ascending {
            Box::new(data.iter())
        } else {
            Box::new(data.iter().rev())
        };
        assert_eq!(iter.copied().collect::<Vec<_>>(), vec![5, 4, 3]);
    }
}
