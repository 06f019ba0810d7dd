// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Row-band parallelism
//!
//! The receiving grid is broken up with `chunks_mut` into contiguous
//! bands of whole rows, and each band is filled by its own scoped
//! thread.  No band overlaps another, so nothing needs a lock; the
//! scope itself is the only rendezvous, and it does not return until
//! every band is written.

use std::ops::Range;

/// The number of workers to use when none is configured.
pub fn available_workers() -> usize {
    num_cpus::get().max(1)
}

/// Rows per band when `rows` are shared among `workers`.
fn band_height(rows: usize, workers: usize) -> usize {
    let workers = workers.max(1);
    ((rows + workers - 1) / workers).max(1)
}

/// The row ranges each worker receives.  Bands are contiguous, in
/// order, and cover `0..rows` exactly once; there are never more
/// bands than workers.
pub fn row_bands(rows: usize, workers: usize) -> Vec<Range<usize>> {
    let band = band_height(rows, workers);
    (0..rows)
        .step_by(band)
        .map(|start| start..(start + band).min(rows))
        .collect()
}

/// Call `f(first_row, band)` for each band of `cells`, where `cells`
/// is a row-major grid `row_len` wide, on up to `workers` threads.
/// Returns once every band is done.  A panic in any worker is
/// resumed on the calling thread.
pub fn for_each_row_band<T, F>(cells: &mut [T], row_len: usize, workers: usize, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync,
{
    if row_len == 0 || cells.is_empty() {
        return;
    }
    let bands = row_bands(cells.len() / row_len, workers);
    if bands.len() == 1 {
        f(0, cells);
        return;
    }

    let f = &f;
    crossbeam::scope(|scope| {
        let mut rest = cells;
        for rows in bands {
            let (band, tail) = std::mem::take(&mut rest).split_at_mut(rows.len() * row_len);
            rest = tail;
            scope.spawn(move |_| f(rows.start, band));
        }
    })
    .unwrap_or_else(|panic| std::panic::resume_unwind(panic));
}
