use chrono::{DateTime, Utc};
use log::debug;

use crate::error::{Error, Result};
use crate::model::{Status, Task};
use crate::store::Store;

// Collection-level steps. These never touch the disk and take `now`
// explicitly; the store-level operations below wrap them.

/// Append a new `todo` task. Its id is the collection length plus one, so an
/// id freed by a delete can be handed out again.
pub fn push_task(tasks: &mut Vec<Task>, name: &str, now: DateTime<Utc>) -> Task {
    let id = tasks.len() as u32 + 1;
    let task = Task::new(id, name, now);
    tasks.push(task.clone());
    task
}

/// Tasks whose status equals `status`, in stored order. `None` keeps all.
pub fn filter_tasks(tasks: Vec<Task>, status: Option<Status>) -> Vec<Task> {
    match status {
        Some(s) => tasks.into_iter().filter(|t| t.status == s).collect(),
        None => tasks,
    }
}

/// Patch the first task with `id`. An empty or absent name and an absent
/// status leave those fields alone; `updated_at` is always refreshed.
pub fn patch_task(
    tasks: &mut [Task],
    id: u32,
    name: Option<&str>,
    status: Option<Status>,
    now: DateTime<Utc>,
) -> Result<Task> {
    let task = tasks
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or(Error::NotFound(id))?;
    if let Some(n) = name.filter(|n| !n.is_empty()) {
        task.name = n.to_string();
    }
    if let Some(s) = status {
        task.status = s;
    }
    task.updated_at = now;
    Ok(task.clone())
}

/// Remove the first task with `id`. The rest keep their ids and order.
pub fn remove_task(tasks: &mut Vec<Task>, id: u32) -> Result<Task> {
    let index = tasks
        .iter()
        .position(|t| t.id == id)
        .ok_or(Error::NotFound(id))?;
    Ok(tasks.remove(index))
}

pub fn add_task(store: &Store, name: &str) -> Result<Task> {
    let mut tasks = store.load()?;
    let task = push_task(&mut tasks, name, Utc::now());
    store.save(&tasks)?;
    debug!("added task {}", task.id);
    Ok(task)
}

pub fn list_tasks(store: &Store, status: Option<Status>) -> Result<Vec<Task>> {
    let tasks = store.load()?;
    Ok(filter_tasks(tasks, status))
}

/// Unknown ids return `Error::NotFound` and the file is not rewritten.
pub fn update_task(
    store: &Store,
    id: u32,
    name: Option<&str>,
    status: Option<Status>,
) -> Result<Task> {
    let mut tasks = store.load()?;
    let task = patch_task(&mut tasks, id, name, status, Utc::now())?;
    store.save(&tasks)?;
    debug!("updated task {id}");
    Ok(task)
}

pub fn mark_in_progress(store: &Store, id: u32) -> Result<Task> {
    update_task(store, id, None, Some(Status::InProgress))
}

pub fn mark_done(store: &Store, id: u32) -> Result<Task> {
    update_task(store, id, None, Some(Status::Done))
}

/// Unknown ids return `Error::NotFound` and the file is not rewritten.
pub fn delete_task(store: &Store, id: u32) -> Result<Task> {
    let mut tasks = store.load()?;
    let task = remove_task(&mut tasks, id)?;
    store.save(&tasks)?;
    debug!("deleted task {id}");
    Ok(task)
}
