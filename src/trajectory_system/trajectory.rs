use std::collections::VecDeque;

use crate::utils::vector2d::Vector2D;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectorySample {
    pub position: Vector2D,
    pub elapsed_time: f64,
}

/// Ordered flight history, one sample per integration step.
///
/// Unbounded by default. With a limit set, the oldest samples are dropped
/// once the limit is reached so long propagations keep a fixed footprint.
#[derive(Debug, Clone, Default)]
pub struct Trajectory {
    samples: VecDeque<TrajectorySample>,
    max_samples: Option<usize>,
    dropped: usize,
}

impl Trajectory {
    pub fn new(max_samples: Option<usize>) -> Self {
        Trajectory {
            samples: VecDeque::new(),
            max_samples,
            dropped: 0,
        }
    }

    pub(crate) fn record(&mut self, position: Vector2D, elapsed_time: f64) {
        if let Some(limit) = self.max_samples {
            while self.samples.len() >= limit.max(1) {
                self.samples.pop_front();
                self.dropped += 1;
            }
        }
        self.samples.push_back(TrajectorySample {
            position,
            elapsed_time,
        });
    }

    pub fn samples(&self) -> impl Iterator<Item = &TrajectorySample> + '_ {
        self.samples.iter()
    }

    pub fn latest(&self) -> Option<&TrajectorySample> {
        self.samples.back()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples discarded because of the size limit.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Point-in-time copy for consumers that outlive the borrow.
    pub fn to_vec(&self) -> Vec<TrajectorySample> {
        self.samples.iter().copied().collect()
    }
}
