//! Regression test parameters
//!
//! Tracks indexed comparisons over a test run and accumulates failures so
//! a suite reports every broken expectation at once instead of stopping at
//! the first.

/// Regression test state
pub struct RegParams {
    /// Name of the test (e.g., "bridging")
    pub test_name: String,
    /// Current comparison index (incremented before each check)
    index: usize,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Start a regression test run.
    pub fn new(test_name: &str) -> Self {
        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");

        Self {
            test_name: test_name.to_string(),
            index: 0,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Current comparison index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Compare two floating-point values within `delta`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            let msg = format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            );
            eprintln!("{}", msg);
            self.failures.push(msg);
            self.success = false;
            false
        } else {
            true
        }
    }

    /// Record a named boolean expectation.
    pub fn check(&mut self, label: &str, condition: bool) -> bool {
        self.index += 1;
        if !condition {
            let msg = format!(
                "Failure in {}_reg: check '{}' for index {}",
                self.test_name, label, self.index
            );
            eprintln!("{}", msg);
            self.failures.push(msg);
            self.success = false;
        }
        condition
    }

    /// Finish the run, printing a summary. Returns overall success.
    pub fn cleanup(&self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg ({} checks)", self.test_name, self.index);
        } else {
            eprintln!(
                "FAILURE: {}_reg ({} of {} checks failed)",
                self.test_name,
                self.failures.len(),
                self.index
            );
        }
        self.success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passing_run() {
        let mut rp = RegParams::new("params_self");
        assert!(rp.compare_values(1.0, 1.0, 0.0));
        assert!(rp.compare_values(1.0, 1.05, 0.1));
        assert!(rp.check("holds", true));
        assert!(rp.cleanup());
        assert_eq!(rp.index(), 3);
    }

    #[test]
    fn test_failing_run() {
        let mut rp = RegParams::new("params_self");
        assert!(!rp.compare_values(1.0, 2.0, 0.5));
        assert!(rp.check("holds", true));
        assert!(!rp.cleanup(), "one failure poisons the run");
    }
}
