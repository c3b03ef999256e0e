use log::debug;

use crate::accrual::DailyAccrualRecord;
use crate::error::HistoryError;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, PartialEq, Debug)]
pub struct HistoryRecord {
    pub id: String,
    pub schedule: Vec<DailyAccrualRecord>,
}

/// Calculations saved during one session, kept in creation order.
///
/// Identifiers come from a counter that only moves forward, so they never depend
/// on how many records the store currently holds.
#[derive(Debug)]
pub struct History {
    records: Vec<HistoryRecord>,
    next_id: u64,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }

    /// The identifier the next `insert` will assign.
    pub fn next_id(&self) -> String {
        self.next_id.to_string()
    }

    pub fn insert(&mut self, schedule: Vec<DailyAccrualRecord>) -> String {
        let id = self.next_id();
        self.next_id += 1;
        debug!("storing {} accrual records under ID {}", schedule.len(), id);
        self.records.push(HistoryRecord {
            id: id.clone(),
            schedule,
        });
        id
    }

    pub fn get(&self, id: &str) -> Option<&HistoryRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Swaps the stored schedule for `id`, keeping the identifier.
    pub fn replace(
        &mut self,
        id: &str,
        schedule: Vec<DailyAccrualRecord>,
    ) -> Result<(), HistoryError> {
        let record = self
            .records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or_else(|| HistoryError::NotFound(id.to_string()))?;
        debug!(
            "replacing {} accrual records under ID {} with {}",
            record.schedule.len(),
            id,
            schedule.len()
        );
        record.schedule = schedule;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::History;
    use crate::accrual::{compute_schedule, LoanDescription};
    use crate::error::HistoryError;
    use chrono::NaiveDate;
    use test_log::test;

    fn schedule(days: u32, principal: f64) -> Vec<crate::accrual::DailyAccrualRecord> {
        let loan = LoanDescription::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, days).unwrap(),
            principal,
            "USD",
            0.05,
            0.02,
        );
        compute_schedule(&loan).unwrap()
    }

    #[test]
    fn test_sequential_ids() {
        let mut history = History::new();
        assert!(history.is_empty());
        assert_eq!(history.next_id(), "1");

        assert_eq!(history.insert(schedule(3, 1000.)), "1");
        assert_eq!(history.insert(schedule(5, 1000.)), "2");
        assert_eq!(history.next_id(), "3");
        assert_eq!(history.len(), 2);

        assert_eq!(history.get("2").unwrap().schedule.len(), 5);
        assert!(history.get("3").is_none());
        assert!(history.get("").is_none());
    }

    #[test]
    fn test_replace_keeps_id() {
        let mut history = History::new();
        let id = history.insert(schedule(3, 1000.));
        let replacement = schedule(10, 5000.);

        history.replace(&id, replacement.clone()).unwrap();

        let record = history.get("1").unwrap();
        assert_eq!(record.id, "1");
        assert_eq!(record.schedule, replacement);
        assert_eq!(history.len(), 1);
        assert_eq!(history.next_id(), "2");
    }

    #[test]
    fn test_replace_unknown_id() {
        let mut history = History::new();
        history.insert(schedule(3, 1000.));

        assert_eq!(
            history.replace("7", schedule(2, 1000.)),
            Err(HistoryError::NotFound("7".to_string()))
        );
        assert_eq!(history.get("1").unwrap().schedule.len(), 3);
    }
}
