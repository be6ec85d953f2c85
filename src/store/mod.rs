use thiserror::Error;

/// A single entry in the list: display text plus its completed flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub text: String,
    pub completed: bool,
}

impl Task {
    fn new(text: impl Into<String>) -> Self {
        Task {
            text: text.into(),
            completed: false,
        }
    }
}

/// Validation conditions surfaced by store operations.
///
/// These are user-input conditions, not faults; the UI maps each one to a
/// modal prompt and the list is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("task text is empty after trimming")]
    EmptyText,
    #[error("no task is selected")]
    NoSelection,
}

/// Ordered, in-memory collection of tasks.
///
/// Insertion order is preserved and identity is positional: operations
/// address tasks by index, and removing a task shifts everything after it.
/// Duplicate text is allowed.
#[derive(Debug, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        TaskList::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Trim `text` and append a new incomplete task.
    ///
    /// Whitespace-only input is rejected with [`StoreError::EmptyText`]
    /// without mutating the list.
    pub fn add(&mut self, text: &str) -> Result<&Task, StoreError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(StoreError::EmptyText);
        }
        tracing::debug!(text = trimmed, "adding task");
        self.tasks.push(Task::new(trimmed));
        Ok(self.tasks.last().expect("just pushed"))
    }

    /// Flip the completed flag of the task at `index`, in place.
    ///
    /// `None` or an out-of-range index yields [`StoreError::NoSelection`].
    pub fn toggle(&mut self, index: Option<usize>) -> Result<&Task, StoreError> {
        let index = index.ok_or(StoreError::NoSelection)?;
        let task = self
            .tasks
            .get_mut(index)
            .ok_or(StoreError::NoSelection)?;
        task.completed = !task.completed;
        tracing::debug!(index, completed = task.completed, "toggled task");
        Ok(task)
    }

    /// Remove and return the task at `index`.
    ///
    /// `None` or an out-of-range index yields [`StoreError::NoSelection`].
    /// Confirmation is the caller's concern: by the time this runs, the
    /// user already said yes.
    pub fn remove(&mut self, index: Option<usize>) -> Result<Task, StoreError> {
        let index = index.ok_or(StoreError::NoSelection)?;
        if index >= self.tasks.len() {
            return Err(StoreError::NoSelection);
        }
        tracing::debug!(index, "removing task");
        Ok(self.tasks.remove(index))
    }
}
