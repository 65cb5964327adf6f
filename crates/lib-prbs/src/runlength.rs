//! Run-length analysis of binary sequences.

/// Calculate run-length statistics for a binary sequence.
pub fn run_length_stats(bits: &[u8]) -> RunLengthStats {
    let mut stats = RunLengthStats::default();

    for run in bits.chunk_by(|a, b| a == b) {
        if run[0] != 0 {
            stats.ones_runs.push(run.len());
        } else {
            stats.zeros_runs.push(run.len());
        }
    }

    stats
}

/// Longest and shortest run, in one pass without allocating.
///
/// Returns `None` for an empty sequence.
pub fn run_length_bounds(bits: &[u8]) -> Option<RunBounds> {
    bits.chunk_by(|a, b| a == b)
        .map(<[u8]>::len)
        .fold(None, |acc, len| match acc {
            None => Some(RunBounds { min: len, max: len }),
            Some(b) => Some(RunBounds {
                min: b.min.min(len),
                max: b.max.max(len),
            }),
        })
}

/// Shortest and longest run of a sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunBounds {
    pub min: usize,
    pub max: usize,
}

/// Run-length statistics.
#[derive(Debug, Default)]
pub struct RunLengthStats {
    pub ones_runs: Vec<usize>,
    pub zeros_runs: Vec<usize>,
}

impl RunLengthStats {
    /// Maximum run of ones.
    pub fn max_ones_run(&self) -> usize {
        self.ones_runs.iter().copied().max().unwrap_or(0)
    }

    /// Maximum run of zeros.
    pub fn max_zeros_run(&self) -> usize {
        self.zeros_runs.iter().copied().max().unwrap_or(0)
    }

    /// Longest run of either value.
    pub fn max_run(&self) -> usize {
        self.max_ones_run().max(self.max_zeros_run())
    }

    /// Shortest run of either value, 0 when there are no runs.
    pub fn min_run(&self) -> usize {
        self.ones_runs
            .iter()
            .chain(&self.zeros_runs)
            .copied()
            .min()
            .unwrap_or(0)
    }

    /// Total number of runs.
    pub fn run_count(&self) -> usize {
        self.ones_runs.len() + self.zeros_runs.len()
    }

    /// Average run length.
    pub fn average_run(&self) -> f64 {
        let total_runs = self.run_count();
        if total_runs == 0 {
            return 0.0;
        }

        let total_length: usize =
            self.ones_runs.iter().sum::<usize>() + self.zeros_runs.iter().sum::<usize>();

        total_length as f64 / total_runs as f64
    }
}
