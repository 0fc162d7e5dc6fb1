/// Counts steps of an episode and reports truncation.
#[derive(Debug, Clone)]
pub(crate) struct TimeLimit {
    max_steps: Option<usize>,
    count_steps: usize,
}

impl TimeLimit {
    pub(crate) fn new(max_steps: Option<usize>) -> Self {
        Self {
            max_steps,
            count_steps: 0,
        }
    }

    pub(crate) fn reset(&mut self) {
        self.count_steps = 0;
    }

    /// Counts a step, returns `true` if the episode hits the limit with it.
    pub(crate) fn tick(&mut self) -> bool {
        self.count_steps += 1;
        match self.max_steps {
            Some(max_steps) => self.count_steps >= max_steps,
            None => false,
        }
    }
}
