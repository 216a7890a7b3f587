//! This module defines the [`BufPolicy`](BufPolicy) trait, which
//! configures how the reader's internal buffer grows when a single record
//! does not fit into the current capacity.
//!
//! The default policy ([`StdPolicy`](StdPolicy)) doubles the buffer each
//! time without imposing a size limit, which keeps parsing cost amortized
//! linear in the input size. [`DoubleUntil`](DoubleUntil) switches to
//! linear growth above a threshold, and
//! [`DoubleUntilLimited`](DoubleUntilLimited) additionally imposes a hard
//! limit, above which the reader fails with
//! [`Error::BufferLimit`](crate::Error::BufferLimit).
//!
//! # Custom policy
//!
//! ```no_run
//! use fqio::policy::BufPolicy;
//! use fqio::Reader;
//! use std::io::stdin;
//!
//! struct Max1G;
//!
//! // Doubles the buffer each time, but refuses to grow beyond 1 GiB.
//! impl BufPolicy for Max1G {
//!     fn grow(&mut self, current_size: usize) -> usize {
//!         current_size * 2
//!     }
//!
//!     fn limit(&self) -> Option<usize> {
//!         Some(1 << 30)
//!     }
//! }
//!
//! let mut reader = Reader::new(stdin()).set_policy(Max1G);
//! while let Some(event) = reader.next() {
//!     event.expect("parse error");
//! }
//! ```

/// Policy that configures how the internal buffer grows upon
/// encountering records that don't fit into the current buffer.
pub trait BufPolicy: Send + Sync {
    /// Takes the current buffer size in bytes and returns the new size the
    /// buffer should grow to. Called every time the buffer has to be
    /// enlarged.
    fn grow(&mut self, current_size: usize) -> usize;

    /// Returns a buffer limit, if any. If the new buffer size (as
    /// calculated based on the call to `grow()`) exceeds the given limit,
    /// the reader will return an error of
    /// [`Error::BufferLimit`](crate::Error::BufferLimit).
    fn limit(&self) -> Option<usize> {
        None
    }

    /// Combines `grow()` and `limit()` into one call. Takes the current
    /// buffer size and returns the new size, unless it is larger than the
    /// limit.
    fn grow_limited(&mut self, current_size: usize) -> Option<usize> {
        let new_size = self.grow(current_size);
        if let Some(l) = self.limit() {
            if new_size > l {
                return None;
            }
        }
        Some(new_size)
    }
}

/// Standard buffer policy: the buffer doubles each time it has to grow,
/// without any size limit.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdPolicy;

impl BufPolicy for StdPolicy {
    fn grow(&mut self, current_size: usize) -> usize {
        current_size * 2
    }
}

/// Buffer size doubles until it reaches a given threshold (in bytes).
/// Above, it will increase linearly in steps of the threshold. The buffer
/// size is not limited, it could theoretically grow indefinitely.
#[derive(Debug, Clone, Copy)]
pub struct DoubleUntil(pub usize);

impl BufPolicy for DoubleUntil {
    fn grow(&mut self, current_size: usize) -> usize {
        if current_size < self.0 {
            current_size * 2
        } else {
            current_size + self.0
        }
    }
}

/// Buffer size doubles until it reaches `double_until` (in bytes), then
/// increases linearly in steps of `double_until`. The buffer size is
/// additionally limited to `limit` bytes; the reader returns an error if
/// this limit is reached.
#[derive(Debug, Clone, Copy)]
pub struct DoubleUntilLimited {
    double_until: usize,
    limit: usize,
}

impl DoubleUntilLimited {
    pub fn new(double_until: usize, limit: usize) -> Self {
        DoubleUntilLimited {
            double_until,
            limit,
        }
    }
}

impl BufPolicy for DoubleUntilLimited {
    fn grow(&mut self, current_size: usize) -> usize {
        if current_size < self.double_until {
            current_size * 2
        } else {
            current_size + self.double_until
        }
    }

    fn limit(&self) -> Option<usize> {
        Some(self.limit)
    }
}
