//! An explicit worklist that replaces recursion in the search.
//!
//! Tasks are processed in last-in first-out order. A task that spawns
//! subtasks pushes them onto the same engine, so the traversal is depth
//! first and its memory is bounded by the pending tasks instead of the
//! native call stack.

/// Processes the tasks of a [TaskEngine].
pub trait TaskRunner<T> {
    /// Run `task`. New tasks may be added to `engine`.
    fn run_task(&mut self, task: T, engine: &mut TaskEngine<T>);
}

pub struct TaskEngine<T> {
    tasks: Vec<T>,
    processed: usize,
}

impl<T> TaskEngine<T> {
    pub fn new() -> TaskEngine<T> {
        TaskEngine {
            tasks: vec![],
            processed: 0,
        }
    }

    /// Schedule `task`. It runs before all tasks that were added earlier.
    #[inline]
    pub fn add_task(&mut self, task: T) {
        self.tasks.push(task);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// The number of pending tasks.
    #[inline]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// The number of tasks that have been run.
    #[inline]
    pub fn processed_count(&self) -> usize {
        self.processed
    }

    /// Run the most recently added task. Returns `false` if there is none.
    pub fn run_next_task<R: TaskRunner<T> + ?Sized>(&mut self, runner: &mut R) -> bool {
        match self.tasks.pop() {
            Some(task) => {
                self.processed += 1;
                runner.run_task(task, self);
                true
            }
            None => false,
        }
    }

    /// Run tasks until none are left.
    pub fn run_tasks<R: TaskRunner<T> + ?Sized>(&mut self, runner: &mut R) {
        while self.run_next_task(runner) {}
    }
}

impl<T> Default for TaskEngine<T> {
    fn default() -> Self {
        TaskEngine::new()
    }
}

impl<T> Drop for TaskEngine<T> {
    fn drop(&mut self) {
        // dispose in the order the tasks would have run
        while let Some(task) = self.tasks.pop() {
            drop(task);
        }
    }
}

#[cfg(test)]
mod test {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::{TaskEngine, TaskRunner};

    /// Expands `n` into `n - 1` and `n - 2` and records the visiting order.
    struct Fibonacci {
        visited: Vec<u32>,
    }

    impl TaskRunner<u32> for Fibonacci {
        fn run_task(&mut self, task: u32, engine: &mut TaskEngine<u32>) {
            self.visited.push(task);
            if task >= 2 {
                engine.add_task(task - 2);
                engine.add_task(task - 1);
            }
        }
    }

    #[test]
    fn lifo_order() {
        let mut engine = TaskEngine::new();
        let mut runner = Fibonacci { visited: vec![] };
        engine.add_task(3);
        engine.run_tasks(&mut runner);

        assert_eq!(runner.visited, vec![3, 2, 1, 0, 1]);
        assert_eq!(engine.processed_count(), 5);
        assert!(engine.is_empty());
    }

    struct Noisy(u32, Rc<RefCell<Vec<u32>>>);

    impl Drop for Noisy {
        fn drop(&mut self) {
            self.1.borrow_mut().push(self.0);
        }
    }

    #[test]
    fn drop_pending() {
        let log = Rc::new(RefCell::new(vec![]));
        {
            let mut engine = TaskEngine::new();
            for i in 0..3 {
                engine.add_task(Noisy(i, log.clone()));
            }
            assert_eq!(engine.len(), 3);
        }
        assert_eq!(*log.borrow(), vec![2, 1, 0]);
    }
}
