use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::day;
use crate::record::{Entity, FieldValue, Record};
use crate::schema::{EntitySchema, FieldSpec, FilterSpec};
use crate::sort::SortDirection;

static SCHEMA: EntitySchema = EntitySchema {
    name: "lending",
    fields: &[
        FieldSpec::text("id"),
        FieldSpec::text("itemName"),
        FieldSpec::text("itemType"),
        FieldSpec::text("borrower"),
        FieldSpec::text("borrowerContact"),
        FieldSpec::numeric("quantity"),
        FieldSpec::temporal("lendDate"),
        FieldSpec::temporal("expectedReturnDate"),
        FieldSpec::text("notes"),
        FieldSpec::text("status"),
    ],
    searchable: &["itemName", "borrower"],
    filters: &[
        FilterSpec {
            key: "itemType",
            options: &[
                "Equipment",
                "Vehicle",
                "Medical Supplies",
                "Communication",
                "Shelter",
            ],
        },
        FilterSpec {
            key: "status",
            options: &["Active", "Overdue", "Returned"],
        },
    ],
    status_field: Some("status"),
    default_sort: ("expectedReturnDate", SortDirection::Ascending),
};

/// Equipment or supplies lent to another organisation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LendingItem {
    /// Unique id.
    pub id: String,
    /// What was lent.
    pub item_name: String,
    /// Item category.
    pub item_type: String,
    /// Borrowing organisation or person.
    pub borrower: String,
    /// How to reach the borrower.
    pub borrower_contact: String,
    /// Units lent.
    pub quantity: u32,
    /// Date handed over.
    pub lend_date: NaiveDate,
    /// Date due back.
    pub expected_return_date: NaiveDate,
    /// Free-form notes.
    pub notes: String,
    /// Active, Overdue or Returned.
    pub status: String,
}

impl Record for LendingItem {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        Some(match name {
            "id" => FieldValue::Text(&self.id),
            "itemName" => FieldValue::Text(&self.item_name),
            "itemType" => FieldValue::Text(&self.item_type),
            "borrower" => FieldValue::Text(&self.borrower),
            "borrowerContact" => FieldValue::Text(&self.borrower_contact),
            "quantity" => FieldValue::Number(f64::from(self.quantity)),
            "lendDate" => FieldValue::Date(self.lend_date),
            "expectedReturnDate" => FieldValue::Date(self.expected_return_date),
            "notes" => FieldValue::Text(&self.notes),
            "status" => FieldValue::Text(&self.status),
            _ => return None,
        })
    }
}

impl Entity for LendingItem {
    fn schema() -> &'static EntitySchema {
        &SCHEMA
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn status_mut(&mut self) -> Option<&mut String> {
        Some(&mut self.status)
    }

    fn seed() -> Vec<Self> {
        vec![
            LendingItem {
                id: "1".to_string(),
                item_name: "Portable Generator 5kW".to_string(),
                item_type: "Equipment".to_string(),
                borrower: "Riverside Community Centre".to_string(),
                borrower_contact: "555-0140".to_string(),
                quantity: 2,
                lend_date: day(2024, 3, 10),
                expected_return_date: day(2024, 3, 20),
                notes: "Fuel not included.".to_string(),
                status: "Active".to_string(),
            },
            LendingItem {
                id: "2".to_string(),
                item_name: "Satellite Phone".to_string(),
                item_type: "Communication".to_string(),
                borrower: "North Ridge Volunteer Fire".to_string(),
                borrower_contact: "555-0141".to_string(),
                quantity: 3,
                lend_date: day(2024, 2, 28),
                expected_return_date: day(2024, 3, 7),
                notes: String::new(),
                status: "Overdue".to_string(),
            },
            LendingItem {
                id: "3".to_string(),
                item_name: "Family Tent".to_string(),
                item_type: "Shelter".to_string(),
                borrower: "Red Cross Chapter 12".to_string(),
                borrower_contact: "555-0142".to_string(),
                quantity: 40,
                lend_date: day(2024, 3, 1),
                expected_return_date: day(2024, 3, 12),
                notes: "Returned with two damaged poles.".to_string(),
                status: "Returned".to_string(),
            },
            LendingItem {
                id: "4".to_string(),
                item_name: "4x4 Utility Truck".to_string(),
                item_type: "Vehicle".to_string(),
                borrower: "County Roads Department".to_string(),
                borrower_contact: "555-0143".to_string(),
                quantity: 1,
                lend_date: day(2024, 3, 13),
                expected_return_date: day(2024, 3, 16),
                notes: "Driver supplied by borrower.".to_string(),
                status: "Active".to_string(),
            },
            LendingItem {
                id: "5".to_string(),
                item_name: "Trauma Kit".to_string(),
                item_type: "Medical Supplies".to_string(),
                borrower: "Central Shelter Clinic".to_string(),
                borrower_contact: "555-0144".to_string(),
                quantity: 10,
                lend_date: day(2024, 3, 11),
                expected_return_date: day(2024, 4, 11),
                notes: String::new(),
                status: "Active".to_string(),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dates_are_temporal_values() {
        let seed = LendingItem::seed();
        assert_eq!(
            seed[0].field("lendDate"),
            Some(FieldValue::Date(day(2024, 3, 10)))
        );
    }

    #[test]
    fn test_camel_case_wire_names() {
        let json = r#"{"itemName": "Chainsaw", "expectedReturnDate": "2024-05-01", "quantity": 1}"#;
        let item: LendingItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.item_name, "Chainsaw");
        assert_eq!(item.expected_return_date, day(2024, 5, 1));
        assert!(item.id.is_empty());
    }
}
