use mockable::{Clock, DefaultClock};

use crate::ids::{IdGenerator, UuidGenerator};
use crate::model::{CreateTaskInput, Task, TaskId, TaskPatch};
use crate::repository::{KeyValueStore, TaskStorage};
use crate::seed::seed_tasks;
use crate::store::{reduce, TaskAction};

type Subscriber = Box<dyn FnMut(&[Task])>;

/// Owns the in-memory task collection for a session.
///
/// Every mutation goes through the reducer, is handed to subscribers, and is
/// then saved. Saving is best-effort: a failure is logged and the in-memory
/// state stays authoritative.
pub struct TaskService<S, C = DefaultClock, G = UuidGenerator>
where
    S: KeyValueStore,
    C: Clock,
    G: IdGenerator,
{
    tasks: Vec<Task>,
    storage: TaskStorage<S>,
    clock: C,
    ids: G,
    subscribers: Vec<Subscriber>,
}

impl<S: KeyValueStore> TaskService<S> {
    /// Opens with the wall clock and random ids.
    pub fn new(storage: TaskStorage<S>) -> Self {
        Self::open(storage, DefaultClock, UuidGenerator)
    }
}

impl<S, C, G> TaskService<S, C, G>
where
    S: KeyValueStore,
    C: Clock,
    G: IdGenerator,
{
    /// Loads persisted tasks, falling back to the seed set on a first run or
    /// when the stored blob is unreadable. The seed set is saved right away.
    pub fn open(mut storage: TaskStorage<S>, clock: C, ids: G) -> Self {
        let tasks = match storage.load() {
            Some(tasks) => tasks,
            None => {
                tracing::info!("starting from seed tasks");
                let tasks = seed_tasks();
                if let Err(e) = storage.save(&tasks) {
                    tracing::warn!(error = %e, "failed to save seed tasks");
                }
                tasks
            }
        };
        Self {
            tasks,
            storage,
            clock,
            ids,
            subscribers: Vec::new(),
        }
    }

    /// All tasks in insertion order.
    pub fn list_all(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get_by_id(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    pub fn storage(&self) -> &TaskStorage<S> {
        &self.storage
    }

    /// Registers a callback that receives the full collection after each change.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&[Task]) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    pub fn add_task(&mut self, input: CreateTaskInput) -> Task {
        self.dispatch(TaskAction::Create(input));
        // The reducer appends, so the new task is last.
        let task = self.tasks[self.tasks.len() - 1].clone();
        tracing::debug!(id = %task.id, "task created");
        task
    }

    pub fn update_task(&mut self, patch: TaskPatch) -> Option<Task> {
        let id = patch.id.clone();
        self.dispatch_existing(&id, TaskAction::Update(patch))
    }

    /// Returns the removed task, or `None` when nothing matched.
    pub fn delete_task(&mut self, id: &TaskId) -> Option<Task> {
        let removed = self.get_by_id(id).cloned()?;
        self.dispatch(TaskAction::Delete(id.clone()));
        tracing::debug!(%id, "task deleted");
        Some(removed)
    }

    pub fn toggle_status(&mut self, id: &TaskId) -> Option<Task> {
        self.dispatch_existing(id, TaskAction::ToggleStatus(id.clone()))
    }

    /// Drops persisted state and goes back to the seed set.
    pub fn reset(&mut self) {
        if let Err(e) = self.storage.clear() {
            tracing::warn!(error = %e, "failed to clear persisted tasks");
        }
        self.tasks = seed_tasks();
        self.publish();
    }

    fn dispatch_existing(&mut self, id: &TaskId, action: TaskAction) -> Option<Task> {
        if self.get_by_id(id).is_none() {
            tracing::debug!(%id, "no task with this id");
            return None;
        }
        self.dispatch(action);
        let task = self.get_by_id(id).cloned();
        tracing::debug!(%id, "task updated");
        task
    }

    fn dispatch(&mut self, action: TaskAction) {
        self.tasks = reduce(&self.tasks, &action, &self.clock, &self.ids);
        self.publish();
        if let Err(e) = self.storage.save(&self.tasks) {
            tracing::warn!(error = %e, "failed to save tasks, keeping in-memory state");
        }
    }

    fn publish(&mut self) {
        for subscriber in &mut self.subscribers {
            subscriber(&self.tasks);
        }
    }
}
