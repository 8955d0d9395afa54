//! Step-by-step walkthrough of the teleportation circuit.
//!
//! The service returns two parallel sequences, one description and one
//! circuit diagram per step. The navigator holds a bounded index into them
//! and derives the counter, progress bar and button state from it.

/// Number of protocol steps. The index always stays within `0..7`; extra
/// entries in a response are never shown.
pub const DEFAULT_TOTAL_STEPS: usize = 7;

pub const DESCRIPTION_PLACEHOLDER: &str = "Ready to explore quantum teleportation? Click \"Run Teleportation\" to begin the journey!";
pub const CIRCUIT_PLACEHOLDER: &str = "Quantum circuit visualization will appear here...";

#[derive(Debug, Clone, PartialEq, Default)]
struct StepData {
    descriptions: Vec<String>,
    circuits: Vec<String>,
}

/// Bounded cursor over the step descriptions and circuits.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StepNavigator {
    current: usize,
    data: Option<StepData>,
}

impl StepNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the step data and rewind to the first step.
    pub fn load(&mut self, descriptions: Vec<String>, circuits: Vec<String>) {
        if descriptions.len() != DEFAULT_TOTAL_STEPS || circuits.len() != DEFAULT_TOTAL_STEPS {
            tracing::warn!(
                descriptions = descriptions.len(),
                circuits = circuits.len(),
                "unexpected number of steps"
            );
        }
        self.data = Some(StepData {
            descriptions,
            circuits,
        });
        self.current = 0;
    }

    /// Drop the step data and rewind.
    pub fn clear(&mut self) {
        self.data = None;
        self.current = 0;
    }

    pub fn is_loaded(&self) -> bool {
        self.data.is_some()
    }

    /// Zero-based index of the current step.
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        DEFAULT_TOTAL_STEPS
    }

    /// Move back one step. Returns whether the index changed.
    pub fn prev(&mut self) -> bool {
        if self.current > 0 {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    /// Move forward one step. Returns whether the index changed.
    pub fn next(&mut self) -> bool {
        if self.current + 1 < self.total() {
            self.current += 1;
            true
        } else {
            false
        }
    }

    pub fn can_prev(&self) -> bool {
        self.is_loaded() && self.current > 0
    }

    pub fn can_next(&self) -> bool {
        self.is_loaded() && self.current + 1 < self.total()
    }

    /// `Step N of M`.
    pub fn counter_label(&self) -> String {
        format!("Step {} of {}", self.current + 1, self.total())
    }

    /// One-based step number for the summary display. Stays at 1 until data
    /// has been loaded.
    pub fn display_step(&self) -> usize {
        if self.is_loaded() { self.current + 1 } else { 1 }
    }

    /// Width of the progress bar in percent.
    pub fn progress_percent(&self) -> f64 {
        if self.is_loaded() {
            (self.current + 1) as f64 / self.total() as f64 * 100.0
        } else {
            100.0 / DEFAULT_TOTAL_STEPS as f64
        }
    }

    pub fn description(&self) -> &str {
        self.data
            .as_ref()
            .and_then(|d| d.descriptions.get(self.current))
            .map(String::as_str)
            .unwrap_or(DESCRIPTION_PLACEHOLDER)
    }

    pub fn circuit(&self) -> &str {
        self.data
            .as_ref()
            .and_then(|d| d.circuits.get(self.current))
            .map(String::as_str)
            .unwrap_or(CIRCUIT_PLACEHOLDER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(n: usize) -> StepNavigator {
        let mut nav = StepNavigator::new();
        nav.load(
            (1..=n).map(|i| format!("Step {}", i)).collect(),
            (1..=n).map(|i| format!("circuit {}", i)).collect(),
        );
        nav
    }

    #[test]
    fn test_empty_navigator() {
        let nav = StepNavigator::new();
        assert!(!nav.is_loaded());
        assert_eq!(nav.total(), DEFAULT_TOTAL_STEPS);
        assert_eq!(nav.counter_label(), "Step 1 of 7");
        assert_eq!(nav.description(), DESCRIPTION_PLACEHOLDER);
        assert_eq!(nav.circuit(), CIRCUIT_PLACEHOLDER);
        assert_eq!(nav.display_step(), 1);
        assert!((nav.progress_percent() - 14.2857).abs() < 1e-3);
        assert!(!nav.can_prev());
        assert!(!nav.can_next());
    }

    #[test]
    fn test_next_stops_at_last_step() {
        let mut nav = loaded(7);
        for _ in 0..6 {
            assert!(nav.next());
        }
        assert_eq!(nav.current(), 6);
        assert!(!nav.next());
        assert_eq!(nav.current(), 6);
        assert!(!nav.can_next());
        assert!(nav.can_prev());
        assert_eq!(nav.counter_label(), "Step 7 of 7");
        assert_eq!(nav.progress_percent(), 100.0);
        assert_eq!(nav.description(), "Step 7");
        assert_eq!(nav.circuit(), "circuit 7");
    }

    #[test]
    fn test_prev_stops_at_first_step() {
        let mut nav = loaded(7);
        assert!(!nav.prev());
        assert_eq!(nav.current(), 0);
        nav.next();
        nav.next();
        assert!(nav.prev());
        assert_eq!(nav.current(), 1);
        assert_eq!(nav.display_step(), 2);
    }

    #[test]
    fn test_load_rewinds() {
        let mut nav = loaded(7);
        nav.next();
        nav.next();
        nav.load(vec!["a".into(), "b".into()], vec!["x".into(), "y".into()]);
        assert_eq!(nav.current(), 0);
        assert_eq!(nav.counter_label(), "Step 1 of 7");
        assert_eq!(nav.description(), "a");
    }

    #[test]
    fn test_longer_response_stays_within_seven_steps() {
        let mut nav = loaded(9);
        while nav.next() {}
        assert_eq!(nav.current(), DEFAULT_TOTAL_STEPS - 1);
        assert_eq!(nav.counter_label(), "Step 7 of 7");
        assert_eq!(nav.description(), "Step 7");
        assert!(!nav.can_next());
    }

    #[test]
    fn test_shorter_response_shows_placeholders() {
        let mut nav = loaded(2);
        assert_eq!(nav.total(), DEFAULT_TOTAL_STEPS);
        nav.next();
        assert_eq!(nav.description(), "Step 2");
        nav.next();
        assert_eq!(nav.counter_label(), "Step 3 of 7");
        assert_eq!(nav.description(), DESCRIPTION_PLACEHOLDER);
        assert_eq!(nav.circuit(), CIRCUIT_PLACEHOLDER);
    }

    #[test]
    fn test_clear_restores_placeholder() {
        let mut nav = loaded(3);
        nav.next();
        nav.clear();
        assert_eq!(nav.current(), 0);
        assert_eq!(nav.description(), DESCRIPTION_PLACEHOLDER);
    }

    #[test]
    fn test_short_circuit_list_falls_back() {
        let mut nav = StepNavigator::new();
        nav.load(vec!["one".into(), "two".into()], vec!["c1".into()]);
        nav.next();
        assert_eq!(nav.description(), "two");
        assert_eq!(nav.circuit(), CIRCUIT_PLACEHOLDER);
    }

    #[test]
    fn test_empty_response_uses_placeholders() {
        let mut nav = StepNavigator::new();
        nav.load(Vec::new(), Vec::new());
        assert_eq!(nav.total(), DEFAULT_TOTAL_STEPS);
        assert!(nav.is_loaded());
        assert_eq!(nav.description(), DESCRIPTION_PLACEHOLDER);
        assert_eq!(nav.progress_percent(), 100.0 / 7.0);
    }
}
