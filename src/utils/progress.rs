/// Logs the progression of a long loop, once every 10% of its iterations.
///
/// Progress lines are emitted at the `debug` level.
///
/// ```
/// # use voxelator::utils::Progress;
/// let mut progress = Progress::new("Transferring materials", 250);
/// for _ in 0..250 {
///     progress.step();
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Progress {
    label: &'static str,
    total: usize,
    done: usize,
    next_report: usize,
}

impl Progress {
    /// Starts tracking a loop of `total` iterations.
    pub fn new(label: &'static str, total: usize) -> Self {
        let mut result = Self {
            label,
            total,
            done: 0,
            next_report: 0,
        };
        result.next_report = result.threshold(1);
        result
    }

    /// The number of iterations done so far.
    pub fn done(&self) -> usize {
        self.done
    }

    /// The percentage (in `[0, 100]`) of iterations done so far.
    pub fn percent(&self) -> usize {
        if self.total == 0 {
            100
        } else {
            (self.done * 100 / self.total).min(100)
        }
    }

    /// Marks one more iteration as done, logging if a new 10% step was reached.
    pub fn step(&mut self) {
        self.done += 1;

        if self.done >= self.next_report && self.done <= self.total {
            log::debug!("{}: {}%", self.label, self.percent());
            let decile = (self.percent() / 10 + 1).min(10);
            self.next_report = self.threshold(decile).max(self.done + 1);
        }
    }

    // First iteration count reaching `decile * 10%`.
    fn threshold(&self, decile: usize) -> usize {
        (self.total * decile).div_ceil(10).max(1)
    }
}
