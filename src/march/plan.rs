use crate::{Result, WingError};
use serde::{Deserialize, Serialize};

/// One row of a spacing schedule: from `threshold` marched distance onwards, step by `spacing`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpacingEntry {
    pub threshold: f64,
    pub spacing: f64,
}

/// A fixed spacing schedule for `march_scheduled`. Thresholds are distances along the starting
/// plane's normal and are strictly increasing. The first entry's spacing is used from the start
/// regardless of its threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<SpacingEntry>", into = "Vec<SpacingEntry>")]
pub struct SpacingPlan {
    entries: Vec<SpacingEntry>,
}

impl SpacingPlan {
    /// Build a schedule from (threshold, spacing) pairs.
    ///
    /// # Examples
    ///
    /// ```
    /// use cadwing::SpacingPlan;
    /// let plan = SpacingPlan::new(&[(0.0, 10.0), (50.0, 2.0)]).unwrap();
    /// assert_eq!(plan.entries().len(), 2);
    /// assert!(SpacingPlan::new(&[(0.0, 10.0), (0.0, 2.0)]).is_err());
    /// ```
    pub fn new(pairs: &[(f64, f64)]) -> Result<Self> {
        let entries = pairs
            .iter()
            .map(|&(threshold, spacing)| SpacingEntry { threshold, spacing })
            .collect::<Vec<_>>();
        Self::try_from(entries)
    }

    /// A schedule with a single constant spacing.
    pub fn constant(spacing: f64) -> Result<Self> {
        Self::new(&[(0.0, spacing)])
    }

    pub fn entries(&self) -> &[SpacingEntry] {
        &self.entries
    }

    /// Returns the schedule with a final entry at `extent` repeating the last spacing, unless the
    /// schedule already reaches that far.
    pub fn extended_to(&self, extent: f64) -> Self {
        let mut entries = self.entries.clone();
        if let Some(last) = entries.last().copied() {
            if extent > last.threshold {
                entries.push(SpacingEntry {
                    threshold: extent,
                    spacing: last.spacing,
                });
            }
        }
        Self { entries }
    }
}

impl TryFrom<Vec<SpacingEntry>> for SpacingPlan {
    type Error = WingError;

    fn try_from(entries: Vec<SpacingEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(WingError::InvalidParameter(
                "a spacing plan needs at least one entry".to_string(),
            ));
        }
        for (i, e) in entries.iter().enumerate() {
            if !(e.threshold >= 0.0 && e.threshold.is_finite()) {
                return Err(WingError::InvalidParameter(format!(
                    "spacing plan entry {i} has an invalid threshold {}",
                    e.threshold
                )));
            }
            if !(e.spacing > 0.0 && e.spacing.is_finite()) {
                return Err(WingError::InvalidParameter(format!(
                    "spacing plan entry {i} has an invalid spacing {}",
                    e.spacing
                )));
            }
        }
        if let Some(i) = entries
            .windows(2)
            .position(|w| w[1].threshold <= w[0].threshold)
        {
            return Err(WingError::InvalidParameter(format!(
                "spacing plan thresholds must increase, entry {} does not",
                i + 1
            )));
        }

        Ok(Self { entries })
    }
}

impl From<SpacingPlan> for Vec<SpacingEntry> {
    fn from(plan: SpacingPlan) -> Self {
        plan.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn extension_adds_synthetic_entry() {
        let plan = SpacingPlan::new(&[(0.0, 10.0), (50.0, 2.0)]).unwrap();
        let ext = plan.extended_to(120.0);
        assert_eq!(ext.entries().len(), 3);
        assert_eq!(ext.entries()[2], SpacingEntry { threshold: 120.0, spacing: 2.0 });

        let same = plan.extended_to(40.0);
        assert_eq!(same, plan);
    }

    #[test_case(&[]; "empty")]
    #[test_case(&[(0.0, 0.0)]; "zero spacing")]
    #[test_case(&[(-1.0, 1.0)]; "negative threshold")]
    #[test_case(&[(0.0, 1.0), (5.0, 1.0), (4.0, 1.0)]; "decreasing")]
    #[test_case(&[(0.0, f64::NAN)]; "nan spacing")]
    fn invalid_plans(pairs: &[(f64, f64)]) {
        assert!(matches!(
            SpacingPlan::new(pairs),
            Err(WingError::InvalidParameter(_))
        ));
    }

    #[test]
    fn plan_json_is_a_list() {
        let plan: SpacingPlan = serde_json::from_str(
            r#"[{"threshold": 0.0, "spacing": 10.0}, {"threshold": 50.0, "spacing": 2.0}]"#,
        )
        .unwrap();
        assert_eq!(plan, SpacingPlan::new(&[(0.0, 10.0), (50.0, 2.0)]).unwrap());

        let text = serde_json::to_string(&plan).unwrap();
        assert!(text.starts_with('['));

        let bad = serde_json::from_str::<SpacingPlan>(r#"[]"#);
        assert!(bad.is_err());
    }
}
