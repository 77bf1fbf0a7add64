//! End-to-end behavior of the list pipeline and record store.

use std::cell::RefCell;
use std::rc::Rc;

use opsboard::entities::{Alert, HelpRequest, Incident, LendingItem, Personnel, Resource};
use opsboard::{
    pipeline, Entity, EntityKind, EntityVisitor, FilterState, IdStrategy, ListQuery, Notice,
    Notifier, Page, Record, RecordStore, SortDirection, SortState, ALL,
};

fn ids<R: Record>(items: &[&R]) -> Vec<String> {
    items.iter().map(|r| r.id().to_string()).collect()
}

fn lending(id: &str, status: &str) -> LendingItem {
    LendingItem {
        id: id.to_string(),
        item_name: format!("Item {id}"),
        status: status.to_string(),
        ..LendingItem::default()
    }
}

fn resource(id: &str, quantity: u32) -> Resource {
    Resource {
        id: id.to_string(),
        name: format!("Resource {id}"),
        quantity,
        ..Resource::default()
    }
}

struct IdentityCheck;

impl EntityVisitor for IdentityCheck {
    type Output = bool;

    fn visit<R: Entity>(self) -> bool {
        let records = R::seed();
        let query = ListQuery {
            filter: FilterState::for_schema(R::schema()),
            sort: None,
            page: Page::unlimited(),
        };
        let view = pipeline::run(&records, &query);
        let expected: Vec<&R> = records.iter().collect();
        ids(&view.items) == ids(&expected) && view.total == records.len()
    }
}

#[test]
fn empty_query_and_all_constraints_return_every_record_in_order() {
    for kind in EntityKind::ALL {
        assert!(kind.visit(IdentityCheck), "{kind} changed under identity filter");
    }
}

#[test]
fn filtering_twice_gives_the_same_result() {
    let records = Incident::seed();
    let filter = FilterState::for_schema(Incident::schema())
        .with_query("road")
        .with_constraint("status", "Active");

    let once = filter.apply(&records, Incident::schema());
    let owned: Vec<Incident> = once.iter().map(|r| (*r).clone()).collect();
    let twice = filter.apply(&owned, Incident::schema());

    assert_eq!(ids(&once), ids(&twice));
    assert_eq!(ids(&once), vec!["4"]);
}

#[test]
fn descending_is_the_exact_reverse_of_ascending() {
    let records = Incident::seed();
    for field in ["title", "timestamp", "responders"] {
        let asc = pipeline::run(
            &records,
            &ListQuery {
                sort: Some(SortState::ascending(field)),
                ..ListQuery::default()
            },
        );
        let desc = pipeline::run(
            &records,
            &ListQuery {
                sort: Some(SortState::descending(field)),
                ..ListQuery::default()
            },
        );
        let mut reversed = ids(&desc.items);
        reversed.reverse();
        assert_eq!(ids(&asc.items), reversed, "field {field}");
    }
}

#[test]
fn numbers_sort_numerically_not_lexically() {
    let records = vec![resource("a", 2), resource("b", 10), resource("c", 1)];
    let view = pipeline::run(
        &records,
        &ListQuery {
            sort: Some(SortState::ascending("quantity")),
            ..ListQuery::default()
        },
    );
    let quantities: Vec<u32> = view.items.iter().map(|r| r.quantity).collect();
    assert_eq!(quantities, vec![1, 2, 10]);
}

#[test]
fn severity_sorts_by_rank() {
    let records: Vec<Alert> = ["Low", "Critical", "Medium"]
        .iter()
        .enumerate()
        .map(|(i, severity)| Alert {
            id: i.to_string(),
            severity: (*severity).to_string(),
            ..Alert::default()
        })
        .collect();
    let view = pipeline::run(
        &records,
        &ListQuery {
            sort: Some(SortState::ascending("severity")),
            ..ListQuery::default()
        },
    );
    let order: Vec<&str> = view.items.iter().map(|a| a.severity.as_str()).collect();
    assert_eq!(order, vec!["Critical", "Medium", "Low"]);
}

#[test]
fn urgency_descending_puts_unknown_values_first() {
    let mut records = HelpRequest::seed();
    records[0].urgency = "Whenever".to_string();
    let view = pipeline::run(
        &records,
        &ListQuery {
            sort: Some(SortState::new("urgency", SortDirection::Descending)),
            ..ListQuery::default()
        },
    );
    assert_eq!(view.items[0].urgency, "Whenever");
    assert_eq!(view.items[1].urgency, "Low");
}

#[test]
fn delete_removes_once_and_then_does_nothing() {
    let mut store = RecordStore::from_records(
        vec![lending("1", "Active"), lending("2", "Returned")],
        IdStrategy::Uuid,
    )
    .unwrap();

    assert!(store.delete("2"));
    assert_eq!(store.records().iter().map(|r| r.id.as_str()).collect::<Vec<_>>(), vec!["1"]);
    let revision = store.revision();

    assert!(!store.delete("2"));
    assert_eq!(store.len(), 1);
    assert_eq!(store.revision(), revision);
}

#[test]
fn add_appends_a_record_with_a_fresh_id() {
    for strategy in [IdStrategy::Uuid, IdStrategy::Sequential] {
        let mut store = RecordStore::<LendingItem>::seeded(strategy).unwrap();
        let before = store.len();

        let id = store.add(lending("", "Active"));

        assert!(!id.is_empty());
        assert_eq!(store.len(), before + 1);
        assert_eq!(store.records().last().map(|r| r.id.as_str()), Some(id.as_str()));
        assert_eq!(store.records().iter().filter(|r| r.id == id).count(), 1);
    }
}

#[test]
fn query_matches_case_insensitively() {
    let records = vec![
        Incident {
            id: "1".to_string(),
            title: "Flash Flood Warning".to_string(),
            ..Incident::default()
        },
        Incident {
            id: "2".to_string(),
            title: "Road Closure".to_string(),
            ..Incident::default()
        },
    ];
    let filter = FilterState::new().with_query("flood");
    assert_eq!(ids(&filter.apply(&records, Incident::schema())), vec!["1"]);
}

#[test]
fn constraint_on_a_missing_field_excludes_everything() {
    let records = Personnel::seed();
    let filter = FilterState::new().with_constraint("severity", "High");
    assert!(filter.apply(&records, Personnel::schema()).is_empty());

    let filter = FilterState::new().with_constraint("severity", ALL);
    assert_eq!(filter.apply(&records, Personnel::schema()).len(), records.len());
}

#[test]
fn strict_mode_rejects_an_unknown_sort_field() {
    let records = Incident::seed();
    let query = ListQuery {
        sort: Some(SortState::ascending("nonexistent")),
        ..ListQuery::default()
    };

    assert!(pipeline::run_checked(&records, &query, true).is_err());
    let view = pipeline::run_checked(&records, &query, false).unwrap();
    assert_eq!(view.total, records.len());
}

#[derive(Clone, Default)]
struct Collect(Rc<RefCell<Vec<String>>>);

impl Notifier for Collect {
    fn notify(&self, notice: &Notice) {
        self.0.borrow_mut().push(notice.to_string());
    }
}

#[test]
fn mutations_recompute_the_view_and_notify() {
    let notices = Collect::default();
    let mut store = RecordStore::<LendingItem>::seeded(IdStrategy::Sequential)
        .unwrap()
        .with_notifier(notices.clone());
    let overdue = ListQuery {
        filter: FilterState::for_schema(LendingItem::schema()).with_constraint("status", "Overdue"),
        ..ListQuery::for_entity::<LendingItem>()
    };

    assert_eq!(pipeline::run(store.records(), &overdue).total, 1);
    assert!(store.set_status("1", "Overdue").unwrap());
    assert_eq!(pipeline::run(store.records(), &overdue).total, 2);

    assert_eq!(notices.0.borrow().len(), 1);
}
