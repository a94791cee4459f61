//! In-memory repository for task lifecycle tests and embedding.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{Task, TaskId, TaskState},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, StoredTask>,
    next_seq: u64,
}

/// Stored record plus its insertion sequence.
///
/// The sequence makes newest-first ordering total when creation timestamps
/// collide, which happens routinely under a mocked clock.
#[derive(Debug, Clone)]
struct StoredTask {
    task: Task,
    seq: u64,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Collects tasks satisfying `keep`, newest-first.
fn collect_newest_first<F>(state: &InMemoryTaskState, keep: F) -> Vec<Task>
where
    F: Fn(&Task) -> bool,
{
    let mut entries: Vec<&StoredTask> = state
        .tasks
        .values()
        .filter(|stored| keep(&stored.task))
        .collect();
    entries.sort_by(|a, b| {
        (b.task.created_at(), b.seq).cmp(&(a.task.created_at(), a.seq))
    });
    entries.into_iter().map(|stored| stored.task.clone()).collect()
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }

        let seq = state.next_seq;
        state.next_seq += 1;
        state.tasks.insert(
            task.id(),
            StoredTask {
                task: task.clone(),
                seq,
            },
        );
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let stored = state
            .tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        stored.task = task.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.tasks.get(&id).map(|stored| stored.task.clone()))
    }

    async fn find_all(&self, filter: Option<TaskState>) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(collect_newest_first(&state, |task| {
            filter.is_none_or(|wanted| task.state() == wanted)
        }))
    }

    async fn find_by_name_exact(&self, name: &str) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(collect_newest_first(&state, |task| {
            task.name().eq_ignore_case(name)
        }))
    }

    async fn find_by_name_fragment(&self, fragment: &str) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(collect_newest_first(&state, |task| {
            task.name().contains_ignore_case(fragment)
        }))
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let mut state = self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.tasks.remove(&id).map(|stored| stored.task))
    }
}
