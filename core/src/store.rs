//! Pure state transitions over the task collection.
//!
//! `reduce` never mutates its input. Reading the time and minting ids go
//! through the injected clock and id generator so the transitions can be
//! exercised without the wall clock.

use mockable::Clock;

use crate::ids::IdGenerator;
use crate::model::{CreateTaskInput, Task, TaskId, TaskPatch};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskAction {
    Create(CreateTaskInput),
    Update(TaskPatch),
    Delete(TaskId),
    ToggleStatus(TaskId),
}

pub fn reduce<C, G>(tasks: &[Task], action: &TaskAction, clock: &C, ids: &G) -> Vec<Task>
where
    C: Clock + ?Sized,
    G: IdGenerator + ?Sized,
{
    match action {
        TaskAction::Create(input) => {
            let id = fresh_id(tasks, ids);
            let mut next = tasks.to_vec();
            next.push(Task::new(id, input.clone(), clock.utc()));
            next
        }
        TaskAction::Update(patch) => replace_matching(tasks, &patch.id, |task| {
            patch.apply_to(task);
            task.touch(clock.utc());
        }),
        TaskAction::Delete(id) => tasks.iter().filter(|t| &t.id != id).cloned().collect(),
        TaskAction::ToggleStatus(id) => replace_matching(tasks, id, |task| {
            task.status = task.status.toggled();
            task.touch(clock.utc());
        }),
    }
}

// Ids already in the collection are skipped, so a generator that restarts
// (or collides with seeded ids) can never produce a duplicate.
fn fresh_id<G: IdGenerator + ?Sized>(tasks: &[Task], ids: &G) -> TaskId {
    loop {
        let candidate = ids.next_id();
        if !tasks.iter().any(|t| t.id == candidate) {
            return candidate;
        }
    }
}

fn replace_matching(tasks: &[Task], id: &TaskId, mut edit: impl FnMut(&mut Task)) -> Vec<Task> {
    tasks
        .iter()
        .map(|task| {
            let mut task = task.clone();
            if &task.id == id {
                edit(&mut task);
            }
            task
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;
    use crate::model::TaskStatus;
    use crate::time::StepClock;
    use chrono::{Duration, TimeZone, Utc};
    use rstest::{fixture, rstest};
    use std::collections::HashSet;

    #[fixture]
    fn clock() -> StepClock {
        StepClock::new(
            Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap(),
            Duration::seconds(1),
        )
    }

    fn create(title: &str) -> TaskAction {
        TaskAction::Create(CreateTaskInput::new(title, "a long enough description"))
    }

    fn seeded(clock: &StepClock, ids: &SequentialIds) -> Vec<Task> {
        let one = reduce(&[], &create("First"), clock, ids);
        reduce(&one, &create("Second"), clock, ids)
    }

    #[rstest]
    fn test_create_appends_pending_task(clock: StepClock) {
        let ids = SequentialIds::default();
        let tasks = seeded(&clock, &ids);

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[1].title, "Second");
        assert_eq!(tasks[1].status, TaskStatus::Pending);
        assert_eq!(tasks[1].created_at, tasks[1].updated_at);
    }

    #[rstest]
    fn test_create_skips_ids_already_in_use(clock: StepClock) {
        let ids = SequentialIds::default();
        let tasks = seeded(&clock, &ids);
        let restarted = SequentialIds::default();
        let tasks = reduce(&tasks, &create("Third"), &clock, &restarted);

        let unique: HashSet<_> = tasks.iter().map(|t| t.id.clone()).collect();
        assert_eq!(unique.len(), 3);
        assert_eq!(tasks[2].id.as_str(), "3");
    }

    #[rstest]
    fn test_input_is_not_mutated(clock: StepClock) {
        let ids = SequentialIds::default();
        let before = seeded(&clock, &ids);
        let snapshot = before.clone();
        let _ = reduce(&before, &TaskAction::ToggleStatus(before[0].id.clone()), &clock, &ids);
        assert_eq!(before, snapshot);
    }

    #[rstest]
    fn test_update_merges_fields(clock: StepClock) {
        let ids = SequentialIds::default();
        let tasks = seeded(&clock, &ids);
        let patch = TaskPatch::new(tasks[0].id.clone()).title("Renamed");
        let next = reduce(&tasks, &TaskAction::Update(patch), &clock, &ids);

        assert_eq!(next[0].title, "Renamed");
        assert_eq!(next[0].description, tasks[0].description);
        assert_eq!(next[0].status, tasks[0].status);
        assert_eq!(next[0].created_at, tasks[0].created_at);
        assert!(next[0].updated_at > tasks[0].updated_at);
        assert_eq!(next[1], tasks[1]);
    }

    #[rstest]
    fn test_toggle_flips_and_refreshes(clock: StepClock) {
        let ids = SequentialIds::default();
        let tasks = seeded(&clock, &ids);
        let id = tasks[0].id.clone();

        let once = reduce(&tasks, &TaskAction::ToggleStatus(id.clone()), &clock, &ids);
        let twice = reduce(&once, &TaskAction::ToggleStatus(id), &clock, &ids);

        assert_eq!(once[0].status, TaskStatus::Completed);
        assert_eq!(twice[0].status, TaskStatus::Pending);
        assert!(once[0].updated_at > tasks[0].updated_at);
        assert!(twice[0].updated_at > once[0].updated_at);
    }

    #[rstest]
    #[case::update(TaskAction::Update(TaskPatch::new(TaskId::from("missing")).title("x")))]
    #[case::delete(TaskAction::Delete(TaskId::from("missing")))]
    #[case::toggle(TaskAction::ToggleStatus(TaskId::from("missing")))]
    fn test_unknown_id_leaves_collection_unchanged(clock: StepClock, #[case] action: TaskAction) {
        let ids = SequentialIds::default();
        let tasks = seeded(&clock, &ids);
        assert_eq!(reduce(&tasks, &action, &clock, &ids), tasks);
    }

    #[rstest]
    fn test_delete_preserves_order_of_the_rest(clock: StepClock) {
        let ids = SequentialIds::default();
        let tasks = seeded(&clock, &ids);
        let tasks = reduce(&tasks, &create("Third"), &clock, &ids);
        let next = reduce(&tasks, &TaskAction::Delete(tasks[1].id.clone()), &clock, &ids);

        let titles: Vec<_> = next.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["First", "Third"]);
    }
}
