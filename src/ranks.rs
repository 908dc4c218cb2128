//! # Mid-rank computation
//!
//! Ranking is the shared primitive of the Wilcoxon, Kruskal-Wallis and
//! Friedman tests. Ties receive the average of the positions they occupy
//! (standard mid-rank resolution), and ranks are 1-based.

/// Assigns mid-ranks to `values`, returning a vector aligned to the input
/// order. The input is never reordered: the sort happens on a copied index
/// vector.
///
/// `values` must be free of NaNs (callers validate their data first); ranks
/// are meaningless under a partial order.
///
/// ```
/// use rformula::ranks::mid_ranks;
///
/// assert_eq!(mid_ranks(&[3.0, 1.0, 4.0, 1.0]), vec![3.0, 1.5, 4.0, 1.5]);
/// ```
#[must_use]
pub fn mid_ranks(values: &[f64]) -> Vec<f64> {
    let n: usize = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        values[a]
            .partial_cmp(&values[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut ranks: Vec<f64> = vec![0.0; n];
    let mut i: usize = 0;
    while i < n {
        // find the run of tied values [i, j)
        let mut j: usize = i + 1;
        while j < n && values[order[j]] == values[order[i]] {
            j += 1;
        }
        // positions i+1 ..= j (1-based) share the average rank
        #[allow(clippy::cast_precision_loss)]
        let rank: f64 = ((i + 1 + j) as f64) / 2.0;
        for &slot in &order[i..j] {
            ranks[slot] = rank;
        }
        i = j;
    }

    return ranks;
}
