use super::diagnostics::Diagnostic;
use super::error::SasaError;
use std::ops::Range;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "parallel")]
use tracing::debug;

/// Bounds of part `index` when `len` items are split into `parts` contiguous ranges whose sizes
/// differ by at most one.
pub(crate) fn partition(len: usize, parts: usize, index: usize) -> Range<usize> {
    (len * index / parts)..(len * (index + 1) / parts)
}

/// A fixed number of workers for the duration of one engine call.
///
/// With more than one worker the work runs on a dedicated thread pool that is torn down when
/// the `Workers` value is dropped. Failing to start that pool is not an error: the call falls
/// back to the calling thread and the caller receives a warning instead.
pub(crate) struct Workers {
    count: usize,
    #[cfg(feature = "parallel")]
    pool: Option<rayon::ThreadPool>,
}

impl Workers {
    #[track_caller]
    pub fn new(requested: usize, operation: &'static str) -> (Self, Option<Diagnostic>) {
        if requested <= 1 {
            return (Self::sequential(), None);
        }
        Self::spawn(requested, operation)
    }

    fn sequential() -> Self {
        Self {
            count: 1,
            #[cfg(feature = "parallel")]
            pool: None,
        }
    }

    #[cfg(feature = "parallel")]
    #[track_caller]
    fn spawn(requested: usize, operation: &'static str) -> (Self, Option<Diagnostic>) {
        match rayon::ThreadPoolBuilder::new()
            .num_threads(requested)
            .thread_name(|i| format!("solvacc-worker-{i}"))
            .build()
        {
            Ok(pool) => {
                debug!(threads = requested, operation, "Started worker pool.");
                (
                    Self {
                        count: requested,
                        pool: Some(pool),
                    },
                    None,
                )
            }
            Err(e) => {
                let diagnostic = Diagnostic::warning(
                    operation,
                    format!("could not start {requested} worker threads ({e}), running sequentially"),
                )
                .emit();
                (Self::sequential(), Some(diagnostic))
            }
        }
    }

    #[cfg(not(feature = "parallel"))]
    #[track_caller]
    fn spawn(requested: usize, operation: &'static str) -> (Self, Option<Diagnostic>) {
        let diagnostic = Diagnostic::warning(
            operation,
            format!(
                "{requested} threads requested but thread support is not compiled in, running sequentially"
            ),
        )
        .emit();
        (Self::sequential(), Some(diagnostic))
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Splits `out` into one contiguous chunk per worker and calls `f(first_index, chunk)` for
    /// each. The first error any worker returns is the result of the whole call.
    #[cfg(feature = "parallel")]
    pub fn for_each_chunk_mut<T, F>(&self, out: &mut [T], f: F) -> Result<(), SasaError>
    where
        T: Send,
        F: Fn(usize, &mut [T]) -> Result<(), SasaError> + Sync,
    {
        let Some(pool) = &self.pool else {
            return f(0, out);
        };
        let len = out.len();
        let mut chunks = Vec::with_capacity(self.count);
        let mut rest = out;
        for w in 0..self.count {
            let range = partition(len, self.count, w);
            let (head, tail) = std::mem::take(&mut rest).split_at_mut(range.len());
            chunks.push((range.start, head));
            rest = tail;
        }
        pool.install(|| {
            chunks
                .into_par_iter()
                .try_for_each(|(start, chunk)| f(start, chunk))
        })
    }

    #[cfg(not(feature = "parallel"))]
    pub fn for_each_chunk_mut<T, F>(&self, out: &mut [T], f: F) -> Result<(), SasaError>
    where
        T: Send,
        F: Fn(usize, &mut [T]) -> Result<(), SasaError> + Sync,
    {
        f(0, out)
    }

    /// Calls `f(worker_index)` once per worker and returns the results in worker order.
    #[cfg(feature = "parallel")]
    pub fn map_workers<R, F>(&self, f: F) -> Result<Vec<R>, SasaError>
    where
        R: Send,
        F: Fn(usize) -> Result<R, SasaError> + Sync,
    {
        match &self.pool {
            Some(pool) => pool.install(|| (0..self.count).into_par_iter().map(&f).collect()),
            None => (0..self.count).map(f).collect(),
        }
    }

    #[cfg(not(feature = "parallel"))]
    pub fn map_workers<R, F>(&self, f: F) -> Result<Vec<R>, SasaError>
    where
        R: Send,
        F: Fn(usize) -> Result<R, SasaError> + Sync,
    {
        (0..self.count).map(f).collect()
    }
}
