use crate::LcaError;

/// Sparse table answering range-minimum queries by position in O(1).
///
/// `table[k][i]` holds the position of the minimum value in the window
/// `[i, i + 2^k)`. Levels are built bottom-up from window size 1, combining
/// the two half-window answers of the previous level, ties broken toward
/// the left half. O(n log n) time and space; read-only once built.
#[derive(Debug, Clone)]
pub struct SparseTableRmq {
    values: Vec<usize>,
    table: Vec<Vec<usize>>,
}

impl SparseTableRmq {
    /// Precompute all power-of-two windows over `values`.
    pub fn build(values: &[usize]) -> Self {
        let n = values.len();
        if n == 0 {
            return Self {
                values: Vec::new(),
                table: Vec::new(),
            };
        }

        let mut table = vec![(0..n).collect::<Vec<_>>()];
        for k in 1..=n.ilog2() as usize {
            let half = 1usize << (k - 1);
            let width = 1usize << k;
            let prev = &table[k - 1];
            let mut level = Vec::with_capacity(n - width + 1);
            for i in 0..=n - width {
                let left = prev[i];
                let right = prev[i + half];
                level.push(if values[left] <= values[right] { left } else { right });
            }
            table.push(level);
        }

        Self {
            values: values.to_vec(),
            table,
        }
    }

    /// Position of the minimum value within `[min(i, j), max(i, j)]`.
    ///
    /// Uses the standard two-overlapping-window technique; when both
    /// windows see the same minimum the left window's representative wins.
    /// Positions must lie within the built sequence. Fails with
    /// [`LcaError::NotInitialized`] if the table was built over an empty
    /// sequence.
    pub fn query(&self, i: usize, j: usize) -> Result<usize, LcaError> {
        if self.values.is_empty() {
            return Err(LcaError::NotInitialized);
        }
        let (lo, hi) = if i <= j { (i, j) } else { (j, i) };
        let k = (hi - lo + 1).ilog2() as usize;
        let left = self.table[k][lo];
        let right = self.table[k][hi + 1 - (1usize << k)];
        Ok(if self.values[left] <= self.values[right] {
            left
        } else {
            right
        })
    }

    /// Length of the underlying sequence.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the table was built over an empty sequence.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive_argmin(values: &[usize], lo: usize, hi: usize) -> usize {
        let mut best = lo;
        for pos in lo..=hi {
            if values[pos] < values[best] {
                best = pos;
            }
        }
        best
    }

    #[test]
    fn matches_naive_scan_on_all_ranges() {
        let values = vec![3, 1, 4, 1, 5, 9, 2, 6, 5, 3, 5];
        let rmq = SparseTableRmq::build(&values);
        for lo in 0..values.len() {
            for hi in lo..values.len() {
                let pos = rmq.query(lo, hi).unwrap();
                let naive = naive_argmin(&values, lo, hi);
                assert_eq!(values[pos], values[naive], "range [{lo}, {hi}]");
            }
        }
    }

    #[test]
    fn ties_break_toward_the_left() {
        let values = vec![2, 0, 3, 0, 2];
        let rmq = SparseTableRmq::build(&values);
        assert_eq!(rmq.query(0, 4).unwrap(), 1);
        assert_eq!(rmq.query(2, 4).unwrap(), 3);
    }

    #[test]
    fn swapped_bounds_are_normalized() {
        let values = vec![5, 4, 3, 2, 1];
        let rmq = SparseTableRmq::build(&values);
        assert_eq!(rmq.query(4, 0).unwrap(), rmq.query(0, 4).unwrap());
    }

    #[test]
    fn single_element_sequence() {
        let rmq = SparseTableRmq::build(&[0]);
        assert_eq!(rmq.query(0, 0).unwrap(), 0);
    }

    #[test]
    fn empty_table_rejects_queries() {
        let rmq = SparseTableRmq::build(&[]);
        assert_eq!(rmq.query(0, 0), Err(LcaError::NotInitialized));
    }
}
