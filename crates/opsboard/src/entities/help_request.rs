use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::at;
use crate::record::{Entity, FieldValue, Record};
use crate::schema::{EntitySchema, FieldSpec, FilterSpec, SEVERITY};
use crate::sort::SortDirection;

static SCHEMA: EntitySchema = EntitySchema {
    name: "help_requests",
    fields: &[
        FieldSpec::text("id"),
        FieldSpec::text("requester"),
        FieldSpec::text("category"),
        FieldSpec::ranked("urgency", &SEVERITY),
        FieldSpec::text("location"),
        FieldSpec::numeric("peopleAffected"),
        FieldSpec::text("status"),
        FieldSpec::temporal("requestedAt"),
        FieldSpec::text("description"),
    ],
    searchable: &["requester", "location", "description"],
    filters: &[
        FilterSpec {
            key: "category",
            options: &["Rescue", "Medical", "Food", "Shelter", "Evacuation"],
        },
        FilterSpec {
            key: "urgency",
            options: &["Critical", "High", "Medium", "Low"],
        },
        FilterSpec {
            key: "status",
            options: &["Pending", "Assigned", "In Progress", "Completed"],
        },
    ],
    status_field: Some("status"),
    default_sort: ("urgency", SortDirection::Ascending),
};

/// A request for assistance from the public.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HelpRequest {
    /// Unique id.
    pub id: String,
    /// Who asked.
    pub requester: String,
    /// Kind of help needed.
    pub category: String,
    /// Critical, High, Medium or Low.
    pub urgency: String,
    /// Where help is needed.
    pub location: String,
    /// Number of people involved.
    pub people_affected: u32,
    /// Workflow status.
    pub status: String,
    /// When the request came in.
    pub requested_at: DateTime<Utc>,
    /// Details from the caller.
    pub description: String,
}

impl Record for HelpRequest {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        Some(match name {
            "id" => FieldValue::Text(&self.id),
            "requester" => FieldValue::Text(&self.requester),
            "category" => FieldValue::Text(&self.category),
            "urgency" => FieldValue::Text(&self.urgency),
            "location" => FieldValue::Text(&self.location),
            "peopleAffected" => FieldValue::Number(f64::from(self.people_affected)),
            "status" => FieldValue::Text(&self.status),
            "requestedAt" => FieldValue::Timestamp(self.requested_at),
            "description" => FieldValue::Text(&self.description),
            _ => return None,
        })
    }
}

impl Entity for HelpRequest {
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
            HelpRequest {
                id: "1".to_string(),
                requester: "Alvarez family".to_string(),
                category: "Rescue".to_string(),
                urgency: "Critical".to_string(),
                location: "14 Willow Lane, Riverside".to_string(),
                people_affected: 5,
                status: "Assigned".to_string(),
                requested_at: at(2024, 3, 14, 6, 55),
                description: "Trapped on second floor, water rising.".to_string(),
            },
            HelpRequest {
                id: "2".to_string(),
                requester: "Sunset Care Home".to_string(),
                category: "Evacuation".to_string(),
                urgency: "High".to_string(),
                location: "Sunset Care Home, Oak Avenue".to_string(),
                people_affected: 32,
                status: "Pending".to_string(),
                requested_at: at(2024, 3, 14, 10, 20),
                description: "Residents need accessible transport; power is out.".to_string(),
            },
            HelpRequest {
                id: "3".to_string(),
                requester: "B. Chen".to_string(),
                category: "Medical".to_string(),
                urgency: "Medium".to_string(),
                location: "Central Shelter".to_string(),
                people_affected: 1,
                status: "In Progress".to_string(),
                requested_at: at(2024, 3, 14, 9, 5),
                description: "Insulin needs refrigeration.".to_string(),
            },
            HelpRequest {
                id: "4".to_string(),
                requester: "North Ridge Residents Association".to_string(),
                category: "Food".to_string(),
                urgency: "Low".to_string(),
                location: "North Ridge Community Hall".to_string(),
                people_affected: 60,
                status: "Completed".to_string(),
                requested_at: at(2024, 3, 12, 13, 0),
                description: "Road cut off; meal delivery requested.".to_string(),
            },
        ]
    }
}
