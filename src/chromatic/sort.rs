use std::cmp::Ordering;

use crate::{types::Album, utils::SortMode};

/// Orders albums in place by the chosen criterion.
///
/// Hue ascending, saturation and brightness descending. The sort is stable, so
/// albums with equal keys keep their first-seen order, and song lists are not
/// touched.
pub fn sort_albums(albums: &mut [Album], mode: SortMode) {
    albums.sort_by(|a, b| compare(a, b, mode));
}

fn compare(a: &Album, b: &Album, mode: SortMode) -> Ordering {
    let (a, b) = (&a.analysis, &b.analysis);
    match mode {
        SortMode::Hue => a.hue.total_cmp(&b.hue),
        SortMode::Saturation => b.saturation.total_cmp(&a.saturation),
        SortMode::Brightness => b.brightness.total_cmp(&a.brightness),
    }
}
