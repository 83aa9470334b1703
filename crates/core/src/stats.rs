use serde::{Deserialize, Serialize};

use crate::interview::{Interview, InterviewStatus};

/// Progress counters for one study's interviews.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewStats {
    pub total: usize,
    pub complete: usize,
    pub in_progress: usize,
    pub abandoned: usize,
    /// Mean duration over all interviews, whole seconds rounded down.
    pub avg_duration_secs: u64,
    /// Share of complete interviews, rounded to a whole percent.
    pub completion_rate: u32,
}

impl InterviewStats {
    #[must_use]
    pub fn from_interviews(interviews: &[Interview]) -> Self {
        let mut stats = Self { total: interviews.len(), ..Self::default() };
        let mut total_secs: u64 = 0;
        for interview in interviews {
            match interview.status {
                InterviewStatus::Complete => stats.complete += 1,
                InterviewStatus::InProgress => stats.in_progress += 1,
                InterviewStatus::Abandoned => stats.abandoned += 1,
            }
            total_secs = total_secs.saturating_add(interview.duration_secs);
        }
        if stats.total > 0 {
            let total = stats.total as u64;
            stats.avg_duration_secs = total_secs / total;
            stats.completion_rate = u32::try_from((stats.complete as u64 * 100 + total / 2) / total)
                .unwrap_or(100);
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::Utc;

    use super::*;

    fn with(status: InterviewStatus, secs: u64) -> Interview {
        let mut i = Interview::new("i".to_owned(), "s".to_owned(), BTreeMap::new(), Utc::now());
        i.status = status;
        i.duration_secs = secs;
        i
    }

    #[test]
    fn test_empty() {
        assert_eq!(InterviewStats::from_interviews(&[]), InterviewStats::default());
    }

    #[test]
    fn test_counts_and_rounding() {
        let stats = InterviewStats::from_interviews(&[
            with(InterviewStatus::Complete, 100),
            with(InterviewStatus::Complete, 201),
            with(InterviewStatus::InProgress, 0),
        ]);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.complete, 2);
        assert_eq!(stats.in_progress, 1);
        assert_eq!(stats.abandoned, 0);
        assert_eq!(stats.avg_duration_secs, 100);
        assert_eq!(stats.completion_rate, 67);
    }
}
