//! Score aggregation over a step's tasks.
//!
//! For each task the student's best mark counts towards `points`. Only
//! regular tasks count towards `max_points`; star (bonus) tasks can raise a
//! student's points without raising the bar, so `percent` may exceed 100.

use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard, PoisonError},
};

use serde::{Deserialize, Serialize};

use crate::models::Task;

/// A student's score on one step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsRecord {
    /// Sum of best marks over all tasks, star tasks included
    pub points: f64,
    /// Sum of `max_mark` over regular tasks
    pub max_points: f64,
    /// `points * 100 / max_points`, or 0 when there is nothing to earn
    pub percent: f64,
}

impl StatsRecord {
    /// Builds a record from totals, deriving the percentage.
    pub fn from_totals(points: f64, max_points: f64) -> Self {
        let percent = if max_points != 0.0 {
            points * 100.0 / max_points
        } else {
            0.0
        };
        Self {
            points,
            max_points,
            percent,
        }
    }
}

/// Source of a student's marks, queried per task.
pub trait SubmissionHistory {
    /// Student the history belongs to; keys the per-step stats cache.
    fn student_id(&self) -> u64;

    /// Highest mark the student got on `task_id`, if they submitted at all.
    fn best_mark(&self, task_id: u64) -> Option<f64>;
}

/// Aggregates `tasks` against a student's submission history.
pub fn compute_stats<H>(tasks: &[Task], history: &H) -> StatsRecord
where
    H: SubmissionHistory + ?Sized,
{
    let (points, max_points) = tasks.iter().fold((0.0, 0.0), |(points, max_points), task| {
        let max_points = if task.is_star {
            max_points
        } else {
            max_points + task.max_mark
        };
        (points + history.best_mark(task.id).unwrap_or(0.0), max_points)
    });

    StatsRecord::from_totals(points, max_points)
}

/// Per-instance memo of [`StatsRecord`]s keyed by student id.
#[derive(Debug, Default)]
pub struct StatsCache(Mutex<HashMap<u64, StatsRecord>>);

impl StatsCache {
    // A panic while holding the lock cannot leave a half-written record.
    fn lock(&self) -> MutexGuard<'_, HashMap<u64, StatsRecord>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, student_id: u64) -> Option<StatsRecord> {
        self.lock().get(&student_id).copied()
    }

    /// Cached record for `student_id`, computing it on first request.
    pub fn get_or_compute<F>(&self, student_id: u64, compute: F) -> StatsRecord
    where
        F: FnOnce() -> StatsRecord,
    {
        *self.lock().entry(student_id).or_insert_with(compute)
    }

    /// Fallible variant for callers that load submissions on a miss. The lock
    /// is not held while loading; the first stored record wins.
    pub fn get_or_try_compute<F, E>(&self, student_id: u64, compute: F) -> Result<StatsRecord, E>
    where
        F: FnOnce() -> Result<StatsRecord, E>,
    {
        if let Some(record) = self.get(student_id) {
            return Ok(record);
        }
        let record = compute()?;
        Ok(*self.lock().entry(student_id).or_insert(record))
    }

    /// Number of students with a cached record.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl Clone for StatsCache {
    fn clone(&self) -> Self {
        Self(Mutex::new(self.lock().clone()))
    }
}

// Memoized records never take part in step equality.
impl PartialEq for StatsCache {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;

    struct Marks(HashMap<u64, f64>);

    impl SubmissionHistory for Marks {
        fn student_id(&self) -> u64 {
            1
        }

        fn best_mark(&self, task_id: u64) -> Option<f64> {
            self.0.get(&task_id).copied()
        }
    }

    fn task(id: u64, max_mark: f64, is_star: bool) -> Task {
        Task {
            id,
            step_id: 1,
            name: format!("Task {id}"),
            max_mark,
            is_star,
            sort_index: 100 + id as i64,
            created_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn test_no_tasks_yields_zero_record() {
        let record = compute_stats(&[], &Marks(HashMap::new()));
        assert_eq!(record, StatsRecord::default());
    }

    #[test]
    fn test_star_task_excluded_from_max_points() {
        let tasks = [task(1, 10.0, false), task(2, 5.0, true)];
        let record = compute_stats(&tasks, &Marks(HashMap::from([(1, 7.0)])));

        assert_eq!(record.points, 7.0);
        assert_eq!(record.max_points, 10.0);
        assert_eq!(record.percent, 70.0);
    }

    #[test]
    fn test_star_mark_still_adds_points() {
        let tasks = [task(1, 10.0, false), task(2, 5.0, true)];
        let record = compute_stats(&tasks, &Marks(HashMap::from([(1, 10.0), (2, 5.0)])));

        assert_eq!(record.points, 15.0);
        assert_eq!(record.max_points, 10.0);
        assert_eq!(record.percent, 150.0);
    }

    #[test]
    fn test_only_star_tasks_guards_division() {
        let tasks = [task(1, 5.0, true)];
        let record = compute_stats(&tasks, &Marks(HashMap::from([(1, 4.0)])));

        assert_eq!(record.points, 4.0);
        assert_eq!(record.max_points, 0.0);
        assert_eq!(record.percent, 0.0);
    }

    #[test]
    fn test_fractional_marks() {
        let tasks = [task(1, 2.5, false), task(2, 1.5, false)];
        let record = compute_stats(&tasks, &Marks(HashMap::from([(1, 2.0), (2, 1.0)])));

        assert_eq!(record.points, 3.0);
        assert_eq!(record.max_points, 4.0);
        assert_eq!(record.percent, 75.0);
    }

    #[test]
    fn test_cache_computes_once_per_student() {
        let cache = StatsCache::default();
        let mut calls = 0;

        let first = cache.get_or_compute(1, || {
            calls += 1;
            StatsRecord::from_totals(1.0, 2.0)
        });
        let second = cache.get_or_compute(1, || {
            calls += 1;
            StatsRecord::from_totals(2.0, 2.0)
        });

        assert_eq!(calls, 1);
        assert_eq!(first, second);
        assert_eq!(second.percent, 50.0);

        cache.get_or_compute(2, || StatsRecord::from_totals(2.0, 2.0));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_cache_skips_failed_loads() {
        let cache = StatsCache::default();
        let failed: Result<StatsRecord, &str> = cache.get_or_try_compute(3, || Err("db down"));
        assert!(failed.is_err());
        assert!(cache.is_empty());

        let record = cache
            .get_or_try_compute::<_, &str>(3, || Ok(StatsRecord::from_totals(3.0, 4.0)))
            .unwrap();
        assert_eq!(record.percent, 75.0);
        assert_eq!(cache.get(3), Some(record));
    }

    #[test]
    fn test_clone_copies_records_independently() {
        let cache = StatsCache::default();
        cache.get_or_compute(1, || StatsRecord::from_totals(1.0, 1.0));

        let copy = cache.clone();
        copy.get_or_compute(2, StatsRecord::default);

        assert_eq!(cache.len(), 1);
        assert_eq!(copy.len(), 2);
    }
}
