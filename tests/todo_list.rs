use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use scheduled_todo::clock::{Clock, FixedClock};
use scheduled_todo::error::TaskError;
use scheduled_todo::fields::{Filter, Priority};
use scheduled_todo::list::TodoList;
use scheduled_todo::store::TaskStore;
use scheduled_todo::view::Stats;

fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

fn days(now: NaiveDateTime, n: i64) -> NaiveDate {
    now.date() + Duration::days(n)
}

fn ids(list: &TodoList<&FixedClock>, now: NaiveDateTime) -> Vec<u64> {
    list.view(now).iter().map(|row| row.task.id).collect()
}

#[test]
fn session_walkthrough() {
    let clock = FixedClock::new(at("2024-06-03 10:00:00"));
    let mut list = TodoList::with_store(TaskStore::with_clock(&clock));

    let yesterday = list
        .store_mut()
        .add("File taxes", Some(days(clock.now(), -1)), None)
        .unwrap()
        .id;
    clock.advance(Duration::seconds(1));
    let today = list
        .store_mut()
        .add("Standup", Some(clock.now().date()), NaiveTime::from_hms_opt(16, 0, 0))
        .unwrap()
        .id;
    clock.advance(Duration::seconds(1));
    let tomorrow = list
        .store_mut()
        .add("Dentist", Some(days(clock.now(), 1)), None)
        .unwrap()
        .id;
    clock.advance(Duration::seconds(1));
    let far = list
        .store_mut()
        .add("Renew passport", Some(days(clock.now(), 10)), None)
        .unwrap()
        .id;
    clock.advance(Duration::seconds(1));
    let someday = list.store_mut().add("Learn piano", None, None).unwrap().id;

    let now = clock.now();
    assert_eq!(ids(&list, now), vec![yesterday, today, tomorrow, far, someday]);

    list.set_filter(Filter::Overdue);
    assert_eq!(ids(&list, now), vec![yesterday]);
    list.set_filter(Filter::Today);
    assert_eq!(ids(&list, now), vec![today]);
    list.set_filter(Filter::ThisWeek);
    assert_eq!(ids(&list, now), vec![today, tomorrow]);

    list.set_filter(Filter::All);
    let view = list.view(now);
    let priorities: Vec<Priority> = view.iter().map(|row| row.priority).collect();
    assert_eq!(
        priorities,
        vec![
            Priority::Overdue,
            Priority::Today,
            Priority::Tomorrow,
            Priority::Future,
            Priority::NoDate
        ]
    );
    assert_eq!(view[1].due.map(|d| d.to_string()).as_deref(), Some("Today at 4:00 PM"));

    // Completing the overdue task moves it to the bottom and out of the overdue count.
    list.store_mut().toggle(yesterday).unwrap();
    assert_eq!(ids(&list, now), vec![today, tomorrow, far, someday, yesterday]);
    assert_eq!(
        list.stats(now),
        Stats {
            total: 5,
            active: 4,
            completed: 1,
            overdue: 0,
            today: 1,
        }
    );

    // Time passes: the 4 PM standup becomes overdue.
    clock.set(at("2024-06-03 16:00:01"));
    let later = clock.now();
    assert_eq!(list.stats(later).overdue, 1);

    assert_eq!(list.store_mut().clear_completed(), 1);
    assert_eq!(list.store_mut().clear_completed(), 0);
    assert_eq!(list.store().len(), 4);
}

#[test]
fn failures_leave_the_list_untouched() {
    let clock = FixedClock::new(at("2024-06-03 10:00:00"));
    let mut list = TodoList::with_store(TaskStore::with_clock(&clock));
    let id = list.store_mut().add("Only", None, None).unwrap().id;

    assert_eq!(list.store_mut().add(" ", None, None).unwrap_err(), TaskError::Rejected);
    assert_eq!(list.store_mut().toggle(id + 1).unwrap_err(), TaskError::NotFound(id + 1));
    assert_eq!(
        list.store_mut().edit(id, "", None, None).unwrap_err(),
        TaskError::Rejected
    );
    assert!(!list.store_mut().delete(id + 1));

    let task = list.store().get(id).unwrap();
    assert_eq!(task.text, "Only");
    assert!(!task.completed);
    assert_eq!(list.store().len(), 1);
}
