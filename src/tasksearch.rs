//! Read-only task dataset with name search and id lookup.
//!
//! The dataset is loaded once at startup and never mutated afterwards, so
//! the service is shared across requests without any locking.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Dataset compiled into the binary, served when no override path is configured.
pub const BUNDLED_TASKS: &str = include_str!("../resources/tasks.json");

#[derive(Debug, Error)]
pub enum TaskSearchError {
    #[error("Failed to read task dataset {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse task dataset: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Task dataset contains duplicate id {0}")]
    DuplicateId(i64),
}

/// A single task record from the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct TaskSearchService {
    tasks: Vec<Task>,
}

impl TaskSearchService {
    /// Build the service from the bundled dataset.
    pub fn bundled() -> Result<Self, TaskSearchError> {
        Self::from_json(BUNDLED_TASKS)
    }

    /// Load the dataset from `path`, or the bundled one when `path` is `None`.
    pub fn load_tasks(path: Option<&Path>) -> Result<Self, TaskSearchError> {
        match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|source| TaskSearchError::Io {
                    path: path.display().to_string(),
                    source,
                })?;
                Self::from_json(&raw)
            }
            None => Self::bundled(),
        }
    }

    /// Parse a JSON array of tasks. Ids must be unique.
    pub fn from_json(raw: &str) -> Result<Self, TaskSearchError> {
        let tasks: Vec<Task> = serde_json::from_str(raw)?;
        let mut seen = HashSet::with_capacity(tasks.len());
        for task in &tasks {
            if !seen.insert(task.id) {
                return Err(TaskSearchError::DuplicateId(task.id));
            }
        }
        Ok(Self { tasks })
    }

    pub fn all_tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Tasks whose name contains `query`, ignoring case, in dataset order.
    ///
    /// A blank query matches every task.
    pub fn search(&self, query: &str) -> Vec<Task> {
        if query.trim().is_empty() {
            return self.tasks.clone();
        }
        let needle = query.to_lowercase();
        self.tasks
            .iter()
            .filter(|task| task.name.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    pub fn get_task_by_id(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }
}
