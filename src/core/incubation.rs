use std::collections::VecDeque;

/// Fixed-length delay line for exposed cases that are not yet infectious.
///
/// A queue for an incubation period of `I` days holds `I - 1` daily cohorts. Every day the newly
/// exposed cohort is pushed to the front before the oldest one is popped from the back, so an
/// incubation period of one day passes cohorts through unchanged.
#[derive(Clone, Debug, PartialEq)]
pub struct IncubationQueue {
    queue: VecDeque<f64>,
}

impl IncubationQueue {
    pub fn new(incubation_period: usize) -> Self {
        let length = incubation_period.saturating_sub(1);
        Self {
            queue: VecDeque::from(vec![0.; length]),
        }
    }

    /// Enqueue today's exposures and return the cohort that becomes infectious today.
    pub fn advance(&mut self, exposed: f64) -> f64 {
        self.queue.push_front(exposed);
        self.queue.pop_back().unwrap_or(0.)
    }

    /// Cases currently incubating.
    pub fn pending(&self) -> f64 {
        self.queue.iter().sum()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
