//! Parallel batch estimation.

use rayon::prelude::*;

use crate::error::Result;
use crate::estimate;
use crate::registry::FontMetricsRegistry;

impl FontMetricsRegistry {
    /// [`estimate_widths`](Self::estimate_widths) fanned out across the rayon pool.
    ///
    /// The input is partitioned into contiguous chunks, one per worker; every worker reads the
    /// same immutable registry entry, so per-text results are bit-identical to the sequential
    /// path regardless of how the partitioning falls. Order-preserving, all-or-nothing.
    pub fn estimate_widths_parallel<S>(&self, font: &str, texts: &[S]) -> Result<Vec<f64>>
    where
        S: AsRef<str> + Sync,
    {
        // Resolve up front so an unknown font fails before any fan-out.
        let entry = self.resolve(font)?;
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let chunk_len = texts.len().div_ceil(rayon::current_num_threads().max(1));
        let chunks = texts
            .par_chunks(chunk_len)
            .map(|chunk| {
                chunk
                    .iter()
                    .map(|text| estimate::width_for_entry(entry, font, text.as_ref()))
                    .collect::<Result<Vec<f64>>>()
            })
            .collect::<Result<Vec<Vec<f64>>>>()?;
        Ok(chunks.into_iter().flatten().collect())
    }
}
