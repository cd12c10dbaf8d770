//! Virtual-time task queue and the periodic ambush policy.
//!
//! The browser pumps [`TaskQueue::pop_due`] from a plain interval timer; tests
//! pump it with made-up timestamps. Either way tasks come out in due-time
//! order (ties in insertion order) and the queue clock jumps to each task's
//! due time before it is handed out, so work scheduled while handling a task
//! is relative to that task and not to the pump.

use crate::rng::RandomSource;
use crate::surface::Tone;

/// Work items the session knows how to run.
#[derive(Clone, Debug, PartialEq)]
pub enum Task {
    AmbushTick,
    RotateSpeech,
    CycleMission,
    PlayTone(Tone),
    EndSuccessFlash,
    HideToast,
}

#[derive(Debug)]
struct Entry {
    due_ms: f64,
    seq: u64,
    every_ms: Option<f64>,
    task: Task,
}

#[derive(Debug, Default)]
pub struct TaskQueue {
    now_ms: f64,
    next_seq: u64,
    entries: Vec<Entry>,
}

impl TaskQueue {
    pub fn new(now_ms: f64) -> Self {
        Self { now_ms, ..Self::default() }
    }

    /// Current queue clock.
    pub fn now(&self) -> f64 {
        self.now_ms
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn after(&mut self, delay_ms: f64, task: Task) {
        self.push(delay_ms.max(0.0), None, task);
    }

    /// Repeat `task` every `interval_ms`, first run one interval from now.
    pub fn every(&mut self, interval_ms: f64, task: Task) {
        // zero intervals would spin the pump forever
        let interval = interval_ms.max(1.0);
        self.push(interval, Some(interval), task);
    }

    fn push(&mut self, delay_ms: f64, every_ms: Option<f64>, task: Task) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(Entry { due_ms: self.now_ms + delay_ms, seq, every_ms, task });
    }

    /// Next task due at or before `until_ms`, advancing the clock to it.
    /// Returns `None` once nothing else is due; the clock then rests at
    /// `until_ms`.
    pub fn pop_due(&mut self, until_ms: f64) -> Option<Task> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due_ms <= until_ms)
            .min_by(|(_, a), (_, b)| a.due_ms.total_cmp(&b.due_ms).then(a.seq.cmp(&b.seq)))
            .map(|(i, _)| i);
        let Some(idx) = idx else {
            self.now_ms = self.now_ms.max(until_ms);
            return None;
        };

        let due = self.entries[idx].due_ms;
        self.now_ms = self.now_ms.max(due);
        match self.entries[idx].every_ms {
            Some(interval) => {
                let seq = self.next_seq;
                self.next_seq += 1;
                let e = &mut self.entries[idx];
                e.due_ms = due + interval;
                e.seq = seq;
                Some(e.task.clone())
            }
            None => Some(self.entries.swap_remove(idx).task),
        }
    }
}

/// Gate for the periodic ambush.
///
/// A tick fires only while idle and only when the draw beats the skip
/// threshold (default 0.42, so roughly 58% of idle ticks fire).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbushPolicy {
    pub interval_ms: f64,
    pub skip_threshold: f64,
}

impl Default for AmbushPolicy {
    fn default() -> Self {
        Self { interval_ms: 14_000.0, skip_threshold: 0.42 }
    }
}

impl AmbushPolicy {
    /// Returns whether this tick should launch an attack. No draw is taken
    /// while an attack is already running.
    pub fn should_fire(&self, under_attack: bool, rng: &mut dyn RandomSource) -> bool {
        !under_attack && rng.next_unit() > self.skip_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::tests::Scripted;

    fn drain(q: &mut TaskQueue, until: f64) -> Vec<(f64, Task)> {
        let mut v = Vec::new();
        while let Some(t) = q.pop_due(until) {
            v.push((q.now(), t));
        }
        v
    }

    #[test]
    fn one_shot_runs_once_at_due_time() {
        let mut q = TaskQueue::new(1000.0);
        q.after(120.0, Task::HideToast);
        assert!(drain(&mut q, 1119.0).is_empty());
        assert_eq!(drain(&mut q, 5000.0), vec![(1120.0, Task::HideToast)]);
        assert!(q.is_empty());
        assert_eq!(q.now(), 5000.0);
    }

    #[test]
    fn repeating_task_catches_up_in_order() {
        let mut q = TaskQueue::new(0.0);
        q.every(100.0, Task::AmbushTick);
        q.after(150.0, Task::EndSuccessFlash);
        let got = drain(&mut q, 350.0);
        assert_eq!(
            got,
            vec![
                (100.0, Task::AmbushTick),
                (150.0, Task::EndSuccessFlash),
                (200.0, Task::AmbushTick),
                (300.0, Task::AmbushTick),
            ]
        );
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn ties_keep_insertion_order() {
        let mut q = TaskQueue::new(0.0);
        q.after(10.0, Task::RotateSpeech);
        q.after(10.0, Task::CycleMission);
        let got: Vec<Task> = drain(&mut q, 10.0).into_iter().map(|(_, t)| t).collect();
        assert_eq!(got, vec![Task::RotateSpeech, Task::CycleMission]);
    }

    #[test]
    fn work_scheduled_mid_drain_is_relative_to_the_task() {
        let mut q = TaskQueue::new(0.0);
        q.after(100.0, Task::RotateSpeech);
        assert_eq!(q.pop_due(1000.0), Some(Task::RotateSpeech));
        q.after(50.0, Task::HideToast);
        assert_eq!(q.pop_due(1000.0), Some(Task::HideToast));
        assert_eq!(q.now(), 150.0);
    }

    #[test]
    fn ambush_gate_uses_strict_threshold() {
        let p = AmbushPolicy::default();
        assert!(!p.should_fire(false, &mut Scripted::new(&[0.42])));
        assert!(p.should_fire(false, &mut Scripted::new(&[0.4201])));
        assert!(!p.should_fire(true, &mut Scripted::new(&[0.99])));
    }
}
