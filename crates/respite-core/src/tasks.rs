//! Ad-hoc task list kept alongside the timer.
//!
//! An ordered, index-addressed list. Every successful mutation writes the
//! whole list back to the store before returning, so a concurrently queued
//! callback can never observe a half-updated list.

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::storage::Store;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

/// In-memory task list written through to the store on every change.
#[derive(Debug, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn load(store: &Store) -> Result<Self, StoreError> {
        Ok(Self {
            tasks: store.load_tasks()?,
        })
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

    /// Append a task. Text is trimmed; empty text is ignored.
    /// Returns whether the list changed.
    pub fn add(&mut self, store: &Store, text: &str) -> Result<bool, StoreError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(false);
        }
        self.tasks.push(Task {
            text: text.to_string(),
            completed: false,
        });
        store.save_tasks(&self.tasks)?;
        Ok(true)
    }

    /// Flip completion at `index`. Out-of-range indices are ignored.
    pub fn toggle(&mut self, store: &Store, index: usize) -> Result<bool, StoreError> {
        let Some(task) = self.tasks.get_mut(index) else {
            return Ok(false);
        };
        task.completed = !task.completed;
        store.save_tasks(&self.tasks)?;
        Ok(true)
    }

    /// Remove the task at `index`. Out-of-range indices are ignored.
    pub fn delete(&mut self, store: &Store, index: usize) -> Result<bool, StoreError> {
        if index >= self.tasks.len() {
            return Ok(false);
        }
        self.tasks.remove(index);
        store.save_tasks(&self.tasks)?;
        Ok(true)
    }
}
