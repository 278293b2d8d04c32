//! Console reports
//!
//! Each report is the complete standard output of one binary.

use std::fmt::{self, Display};

use crate::timing::{speedup, TimingAccumulator};

/// Result of the single-threaded baseline.
#[derive(Debug, Clone)]
pub struct SequentialReport<S> {
    /// Number of elements summed
    pub array_size: usize,
    /// Sum produced by the first (unmeasured) run
    pub reference_sum: S,
    /// Duration of the first run in seconds
    pub first_run: f64,
    /// Measured passes
    pub timing: TimingAccumulator,
}

impl<S: Display> Display for SequentialReport<S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Reference sum: {}", self.reference_sum)?;
        writeln!(f, "First run time: {} seconds", self.first_run)?;
        writeln!(f)?;
        writeln!(
            f,
            "Average time over {} runs: {} seconds",
            self.timing.passes(),
            self.timing.average()
        )?;
        writeln!(f, "Total time: {} seconds", self.timing.total())
    }
}

/// Result of the shared-memory benchmark.
#[derive(Debug, Clone)]
pub struct SharedReport<S> {
    /// Number of elements summed
    pub array_size: usize,
    /// Worker threads
    pub workers: usize,
    /// Sequential sum of the first run
    pub reference_sum: S,
    /// Parallel sum of the last measured pass
    pub parallel_sum: S,
    /// Duration of the first sequential run in seconds
    pub first_run: f64,
    /// Sequential passes
    pub sequential: TimingAccumulator,
    /// Parallel passes
    pub parallel: TimingAccumulator,
}

impl<S> SharedReport<S> {
    /// `avg(sequential) / avg(parallel)`
    pub fn speedup(&self) -> Option<f64> {
        speedup(&self.sequential, &self.parallel)
    }
}

impl<S: Display> Display for SharedReport<S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Array size: {}", self.array_size)?;
        writeln!(f, "Number of threads: {}", self.workers)?;
        writeln!(f, "Reference sum: {}", self.reference_sum)?;
        writeln!(f, "Parallel sum:  {}", self.parallel_sum)?;
        writeln!(f, "First run time: {:.6} seconds", self.first_run)?;
        writeln!(f)?;
        writeln!(
            f,
            "Average execution time over {} runs:",
            self.parallel.passes()
        )?;
        writeln!(f, "  Sequential sum: {:.6} sec", self.sequential.average())?;
        writeln!(f, "  Parallel sum:   {:.6} sec", self.parallel.average())?;
        write_speedup(f, self.speedup())?;
        writeln!(f, "Total parallel time: {:.6} seconds", self.parallel.total())
    }
}

/// Result of the distributed benchmark, produced on the root only.
#[derive(Debug, Clone)]
pub struct DistributedReport<S> {
    /// Number of elements summed per pass
    pub array_size: usize,
    /// Processes in the group
    pub processes: usize,
    /// Sequential sum of the last measured pass, computed on the root
    pub reference_sum: S,
    /// Reduced total of the last measured pass
    pub total_sum: S,
    /// Sequential reference passes on the root
    pub sequential: TimingAccumulator,
    /// Scatter + local sum + reduce, measured on the root
    pub parallel: TimingAccumulator,
}

impl<S> DistributedReport<S> {
    /// `avg(sequential) / avg(parallel)`
    pub fn speedup(&self) -> Option<f64> {
        speedup(&self.sequential, &self.parallel)
    }
}

impl<S: Display> Display for DistributedReport<S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Array size: {}", self.array_size)?;
        writeln!(f, "Number of processes: {}", self.processes)?;
        writeln!(f, "Reference sum: {}", self.reference_sum)?;
        writeln!(f, "Total sum:     {}", self.total_sum)?;
        writeln!(f)?;
        writeln!(f, "Average execution time:")?;
        writeln!(f, "  Sequential sum: {:.6} sec", self.sequential.average())?;
        writeln!(f, "  Parallel sum:   {:.6} sec", self.parallel.average())?;
        write_speedup(f, self.speedup())
    }
}

fn write_speedup(f: &mut fmt::Formatter, speedup: Option<f64>) -> fmt::Result {
    match speedup {
        Some(ratio) => writeln!(f, "  Speedup:        {:.2}x", ratio),
        None => writeln!(f, "  Speedup:        n/a"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timing(passes: &[f64]) -> TimingAccumulator {
        let mut acc = TimingAccumulator::new();
        for &p in passes {
            acc.record(p);
        }
        acc
    }

    #[test]
    fn sequential_report_lines() {
        let report = SequentialReport {
            array_size: 5,
            reference_sum: 15i64,
            first_run: 0.5,
            timing: timing(&[1.0, 2.0]),
        };
        let text = report.to_string();
        assert!(text.starts_with("Reference sum: 15\n"));
        assert!(text.contains("Average time over 2 runs: 1.5 seconds"));
        assert!(text.contains("Total time: 3 seconds"));
    }

    #[test]
    fn distributed_report_shows_speedup() {
        let report = DistributedReport {
            array_size: 100,
            processes: 4,
            reference_sum: 4950i64,
            total_sum: 4950i64,
            sequential: timing(&[0.5]),
            parallel: timing(&[0.125]),
        };
        assert_eq!(report.speedup(), Some(4.0));
        let text = report.to_string();
        assert!(text.contains("Number of processes: 4"));
        assert!(text.contains("Reference sum: 4950\nTotal sum:     4950\n"));
        assert!(text.contains("  Speedup:        4.00x"));
    }

    #[test]
    fn speedup_unavailable_without_parallel_time() {
        let report = SharedReport {
            array_size: 100,
            workers: 2,
            reference_sum: 1.0f64,
            parallel_sum: 1.0f64,
            first_run: 0.0,
            sequential: timing(&[0.4]),
            parallel: timing(&[0.0]),
        };
        assert_eq!(report.speedup(), None);
        assert!(report.to_string().contains("Speedup:        n/a"));
    }
}
