use serde::{Deserialize, Serialize};

use crate::errors::{BotError, BotResult};

/// Ordered task list belonging to one user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    pub tasks: Vec<String>,
}

impl TodoList {
    pub fn add(&mut self, task: impl Into<String>) {
        self.tasks.push(task.into());
    }

    /// Remove a task by its 1-based position, as shown by [`TodoList::render`].
    pub fn remove(&mut self, number: i64) -> BotResult<String> {
        let index = usize::try_from(number)
            .ok()
            .and_then(|n| n.checked_sub(1))
            .filter(|&i| i < self.tasks.len())
            .ok_or_else(|| BotError::InvalidInput(format!("no task numbered {}", number)))?;

        Ok(self.tasks.remove(index))
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Numbered listing, one task per line. `None` when there is nothing to show.
    pub fn render(&self) -> Option<String> {
        if self.tasks.is_empty() {
            return None;
        }

        Some(
            self.tasks
                .iter()
                .enumerate()
                .map(|(i, task)| format!("{}. {}", i + 1, task))
                .collect::<Vec<_>>()
                .join("\n"),
        )
    }
}
