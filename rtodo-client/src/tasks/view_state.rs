use chrono::NaiveDate;

use super::api::{Priority, Task};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Filter {
    All,
    Active,
    Done,
    Overdue,
}

pub const FILTERS: [Filter; 4] = [Filter::All, Filter::Active, Filter::Done, Filter::Overdue];

impl Filter {
    pub fn label(&self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Active => "Active",
            Filter::Done => "Done",
            Filter::Overdue => "Overdue",
        }
    }

    pub fn accepts(&self, task: &Task, today: NaiveDate) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !task.completed,
            Filter::Done => task.completed,
            Filter::Overdue => is_overdue(task, today),
        }
    }
}

/* A task due today counts as overdue already; completed tasks never do,
 * however old their due date is.
 */
pub fn is_overdue(task: &Task, today: NaiveDate) -> bool {
    match task.due_date {
        Some(due_date) => !task.completed && due_date <= today,
        None => false,
    }
}

pub fn matches_search(task: &Task, search_term: &str) -> bool {
    search_term.is_empty()
        || task
            .title
            .to_lowercase()
            .contains(&search_term.to_lowercase())
}

fn urgency(priority: Priority) -> u8 {
    match priority {
        Priority::High => 0,
        Priority::Medium => 1,
        Priority::Low => 2,
    }
}

/// The rendered list: filter ANDed with search, then a stable sort by
/// urgency. The source sequence is left untouched.
pub fn derive_view(
    tasks: &[Task],
    search_term: &str,
    filter: Filter,
    today: NaiveDate,
) -> Vec<Task> {
    let mut view: Vec<Task> = tasks
        .iter()
        .filter(|task| filter.accepts(task, today) && matches_search(task, search_term))
        .cloned()
        .collect();

    view.sort_by_key(|task| urgency(task.priority));

    view
}

/// Aggregates over the unfiltered sequence; these back both the stats
/// display and the filter-button badges, so they ignore the search term.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TaskCounts {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
    pub overdue: usize,
}

impl TaskCounts {
    pub fn tally(tasks: &[Task], today: NaiveDate) -> TaskCounts {
        let mut counts = TaskCounts {
            total: tasks.len(),
            ..TaskCounts::default()
        };

        for task in tasks {
            if task.completed {
                counts.completed += 1;
            } else {
                counts.active += 1;
            }

            if is_overdue(task, today) {
                counts.overdue += 1;
            }
        }

        counts
    }

    pub fn for_filter(&self, filter: Filter) -> usize {
        match filter {
            Filter::All => self.total,
            Filter::Active => self.active,
            Filter::Done => self.completed,
            Filter::Overdue => self.overdue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(text: &str) -> NaiveDate {
        NaiveDate::parse_from_str(text, "%Y-%m-%d").unwrap()
    }

    fn task(id: i64, title: &str, completed: bool, due: Option<&str>, priority: Priority) -> Task {
        Task {
            id,
            title: title.to_string(),
            completed,
            due_date: due.map(day),
            priority,
        }
    }

    const TODAY: &str = "2026-08-06";

    #[test]
    fn overdue_boundary() {
        let today = day(TODAY);

        let due_today = task(1, "due today", false, Some(TODAY), Priority::Low);
        assert!(is_overdue(&due_today, today));

        let due_tomorrow = task(2, "due tomorrow", false, Some("2026-08-07"), Priority::Low);
        assert!(!is_overdue(&due_tomorrow, today));

        let completed_past = task(3, "done long ago", true, Some("2026-01-01"), Priority::Low);
        assert!(!is_overdue(&completed_past, today));

        let no_deadline = task(4, "someday", false, None, Priority::Low);
        assert!(!is_overdue(&no_deadline, today));
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let milk = task(1, "Buy Milk", false, None, Priority::Low);

        assert!(matches_search(&milk, "milk"));
        assert!(matches_search(&milk, "BUY"));
        assert!(matches_search(&milk, ""));
        assert!(!matches_search(&milk, "bread"));
    }

    #[test]
    fn filters_and_with_search() {
        let today = day(TODAY);
        let tasks = vec![
            task(1, "Buy milk", false, None, Priority::Low),
            task(2, "Buy stamps", true, None, Priority::Low),
            task(3, "Clean garage", false, None, Priority::Low),
        ];

        let active = derive_view(&tasks, "buy", Filter::Active, today);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, 1);

        let done = derive_view(&tasks, "buy", Filter::Done, today);
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].id, 2);

        let all = derive_view(&tasks, "buy", Filter::All, today);
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn overdue_filter_excludes_completed() {
        let today = day(TODAY);
        let tasks = vec![
            task(1, "late and open", false, Some("2026-08-01"), Priority::Low),
            task(2, "late but done", true, Some("2026-08-01"), Priority::Low),
        ];

        let overdue = derive_view(&tasks, "", Filter::Overdue, today);
        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].id, 1);
    }

    #[test]
    fn display_sort_is_by_urgency_and_stable() {
        let today = day(TODAY);
        let tasks = vec![
            task(1, "low", false, None, Priority::Low),
            task(2, "first high", false, None, Priority::High),
            task(3, "medium", false, None, Priority::Medium),
            task(4, "second high", false, None, Priority::High),
        ];

        let view = derive_view(&tasks, "", Filter::All, today);
        let ids: Vec<i64> = view.iter().map(|task| task.id).collect();
        assert_eq!(ids, vec![2, 4, 3, 1]);
    }

    #[test]
    fn derive_view_leaves_source_untouched() {
        let today = day(TODAY);
        let tasks = vec![
            task(1, "low", false, None, Priority::Low),
            task(2, "high", false, None, Priority::High),
        ];
        let before = tasks.clone();

        derive_view(&tasks, "", Filter::All, today);
        assert_eq!(tasks, before);
    }

    #[test]
    fn counts_ignore_search_term() {
        let today = day(TODAY);
        let tasks = vec![
            task(1, "Buy milk", false, Some(TODAY), Priority::High),
            task(2, "Buy stamps", true, Some("2026-08-01"), Priority::Low),
            task(3, "Clean garage", false, None, Priority::Medium),
        ];

        let counts = TaskCounts::tally(&tasks, today);
        assert_eq!(counts.total, 3);
        assert_eq!(counts.active, 2);
        assert_eq!(counts.completed, 1);
        assert_eq!(counts.overdue, 1);

        // The badges read the same aggregates however the list is searched;
        // a term that empties the rendered list changes nothing here.
        let narrowed = derive_view(&tasks, "zzz", Filter::All, today);
        assert!(narrowed.is_empty());
        assert_eq!(TaskCounts::tally(&tasks, today), counts);

        for filter in FILTERS.iter() {
            assert_eq!(
                counts.for_filter(*filter),
                derive_view(&tasks, "", *filter, today).len()
            );
        }
    }
}
