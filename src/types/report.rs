use std::fmt;
use std::time::Duration;

use super::decision::Decision;

/// Detailed decision report returned by
/// [`DecisionTable::decide_detailed()`](super::table::DecisionTable::decide_detailed).
///
/// Row numbers are 0-based positions in the table body.
#[derive(Debug, Clone)]
#[must_use]
pub struct DecisionReport {
    decision: Decision,
    scanned: Vec<usize>,
    matched: Vec<usize>,
    indexed: bool,
    duration: Duration,
}

impl DecisionReport {
    pub(crate) fn new(
        decision: Decision,
        scanned: Vec<usize>,
        matched: Vec<usize>,
        indexed: bool,
        duration: Duration,
    ) -> Self {
        Self {
            decision,
            scanned,
            matched,
            indexed,
            duration,
        }
    }

    /// The decision, same as [`DecisionTable::decide()`](super::table::DecisionTable::decide).
    pub fn decision(&self) -> &Decision {
        &self.decision
    }

    /// Rows tested against the input, in scan order.
    #[must_use]
    pub fn scanned(&self) -> &[usize] {
        &self.scanned
    }

    /// Rows that matched and were handed to the result, before `if:` filtering.
    #[must_use]
    pub fn matched(&self) -> &[usize] {
        &self.matched
    }

    /// Whether candidate rows came from the index.
    #[must_use]
    pub fn used_index(&self) -> bool {
        self.indexed
    }

    /// Wall-clock duration of the decision.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl fmt::Display for DecisionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "decision: {}", self.decision)?;
        write!(
            f,
            ", scanned: {} rows{}",
            self.scanned.len(),
            if self.indexed { " (indexed)" } else { "" }
        )?;
        let matched: Vec<String> = self.matched.iter().map(usize::to_string).collect();
        write!(f, ", matched: [{}]", matched.join(", "))?;
        write!(f, ", duration: {:?}", self.duration)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;

    #[test]
    fn report_accessors() {
        let decision = Decision::new(vec![("x".into(), Value::Int(1))], false);
        let report = DecisionReport::new(
            decision.clone(),
            vec![0, 1, 2],
            vec![2],
            false,
            Duration::from_nanos(500),
        );
        assert_eq!(report.decision(), &decision);
        assert_eq!(report.scanned(), &[0, 1, 2]);
        assert_eq!(report.matched(), &[2]);
        assert!(!report.used_index());
        assert_eq!(report.duration(), Duration::from_nanos(500));
    }

    #[test]
    fn report_display() {
        let report = DecisionReport::new(
            Decision::new(vec![("x".into(), Value::Int(1))], false),
            vec![4, 5],
            vec![5],
            true,
            Duration::from_nanos(100),
        );
        let s = report.to_string();
        assert!(s.contains("decision: {x: 1}"));
        assert!(s.contains("scanned: 2 rows (indexed)"));
        assert!(s.contains("matched: [5]"));
    }
}
