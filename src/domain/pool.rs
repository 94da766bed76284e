//! Bounded worker pool for per-trade fetch work.
//!
//! Scoped threads claim task indices from a shared counter and push outputs
//! over an `mpsc` channel. The scope joins every worker before `run` returns,
//! so no threads outlive an invocation.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;

pub struct WorkerPool {
    workers: usize,
}

impl WorkerPool {
    /// Pool sized for a batch of `tasks`: `max(1, min(requested, tasks))`.
    pub fn bounded(requested: usize, tasks: usize) -> Self {
        Self {
            workers: requested.min(tasks).max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run `task` for every index in `0..tasks` across the pool.
    ///
    /// Returns one `(index, output)` pair per task, sorted by index, so the
    /// caller sees the same ordering regardless of completion order.
    pub fn run<T, F>(&self, tasks: usize, task: F) -> Vec<(usize, T)>
    where
        T: Send,
        F: Fn(usize) -> T + Sync,
    {
        let next = AtomicUsize::new(0);
        let (tx, rx) = mpsc::channel();

        thread::scope(|scope| {
            for _ in 0..self.workers {
                let tx = tx.clone();
                let next = &next;
                let task = &task;
                scope.spawn(move || {
                    loop {
                        let index = next.fetch_add(1, Ordering::Relaxed);
                        if index >= tasks {
                            break;
                        }
                        if tx.send((index, task(index))).is_err() {
                            break;
                        }
                    }
                });
            }
        });
        drop(tx);

        let mut outputs: Vec<(usize, T)> = rx.into_iter().collect();
        outputs.sort_by_key(|(index, _)| *index);
        outputs
    }
}
