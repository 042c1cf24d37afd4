//! Rank transformation with average ranks for ties.
//!
//! Ranks are 1-based. A run of equal values receives the average of the
//! ranks the run spans, so `[3, 1, 2, 1]` ranks to `[4, 1.5, 3, 1.5]`.

use super::descriptive::{Result, StatsError};

/// Rank-transform a series, assigning tied values their average rank.
pub fn ranks(xs: &[f64]) -> Result<Vec<f64>> {
    if xs.is_empty() {
        return Err(StatsError::EmptyInput { op: "ranks" });
    }

    let mut order: Vec<usize> = (0..xs.len()).collect();
    order.sort_by(|&a, &b| xs[a].total_cmp(&xs[b]));

    let mut out = vec![0.0; xs.len()];
    let mut i = 0;
    while i < order.len() {
        // Extend over the run of values equal to xs[order[i]].
        let mut j = i + 1;
        while j < order.len() && xs[order[j]] == xs[order[i]] {
            j += 1;
        }
        // Sorted positions i..j hold ranks i+1..=j; ties share the average.
        let avg_rank = (i + j + 1) as f64 / 2.0;
        for &idx in &order[i..j] {
            out[idx] = avg_rank;
        }
        i = j;
    }

    Ok(out)
}
