//! Histogram similarity and first-fit grouping of palettes.
//!
//! This is the older aggregation strategy: instead of sorting albums it puts
//! visually similar ones together. Each color channel value of a palette is
//! counted into `bins` equal-width bins over `[0, 256)`, the counts are
//! normalized to sum to one, and two histograms are compared with the
//! Bhattacharyya coefficient.

use crate::types::Rgb;

pub const DEFAULT_BINS: usize = 8;
pub const DEFAULT_GROUP_THRESHOLD: f64 = 0.7;

/// Normalized frequency of all channel values of `colors` across `bins` bins.
///
/// An empty color list (or `bins == 0`) yields an all-zero histogram, which has
/// similarity 0 with everything.
pub fn color_histogram(colors: &[Rgb], bins: usize) -> Vec<f64> {
    let mut hist = vec![0.0; bins];
    if bins == 0 || colors.is_empty() {
        return hist;
    }

    let width = 256.0 / bins as f64;
    for value in colors.iter().flat_map(|c| c.channels()) {
        let idx = ((value as f64 / width) as usize).min(bins - 1);
        hist[idx] += 1.0;
    }

    let total = (colors.len() * 3) as f64;
    hist.iter_mut().for_each(|h| *h /= total);
    hist
}

/// Bhattacharyya coefficient: `Σ sqrt(h1[i] * h2[i])`. Higher is more similar,
/// 1.0 for identical normalized histograms.
pub fn histogram_similarity(h1: &[f64], h2: &[f64]) -> f64 {
    h1.iter().zip(h2).map(|(a, b)| (a * b).sqrt()).sum()
}

/// Greedy first-fit grouping.
///
/// Each item joins the first existing group whose *first member* is more
/// similar than `threshold`; otherwise it starts a new group. Groups appear in
/// creation order and members in encounter order.
pub fn group_by_similarity<T, F>(items: Vec<T>, threshold: f64, colors: F) -> Vec<Vec<T>>
where
    F: Fn(&T) -> &[Rgb],
{
    // (representative histogram, members)
    let mut groups: Vec<(Vec<f64>, Vec<T>)> = Vec::new();

    for item in items {
        let hist = color_histogram(colors(&item), DEFAULT_BINS);

        match groups
            .iter_mut()
            .find(|(rep, _)| histogram_similarity(&hist, rep) > threshold)
        {
            Some((_, members)) => members.push(item),
            None => groups.push((hist, vec![item])),
        }
    }

    groups.into_iter().map(|(_, members)| members).collect()
}
