use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::at;
use crate::record::{Entity, FieldValue, Record};
use crate::schema::{EntitySchema, FieldSpec, FilterSpec, SEVERITY};
use crate::sort::SortDirection;

static SCHEMA: EntitySchema = EntitySchema {
    name: "incidents",
    fields: &[
        FieldSpec::text("id"),
        FieldSpec::text("title"),
        FieldSpec::text("type"),
        FieldSpec::ranked("severity", &SEVERITY),
        FieldSpec::text("location"),
        FieldSpec::text("status"),
        FieldSpec::temporal("timestamp"),
        FieldSpec::numeric("responders"),
        FieldSpec::text("description"),
    ],
    searchable: &["title", "location", "description"],
    filters: &[
        FilterSpec {
            key: "type",
            options: &[
                "Flood",
                "Fire",
                "Earthquake",
                "Landslide",
                "Storm",
                "Accident",
                "Medical",
                "Other",
            ],
        },
        FilterSpec {
            key: "severity",
            options: &["Critical", "High", "Medium", "Low"],
        },
        FilterSpec {
            key: "status",
            options: &["Active", "Responding", "Contained", "Resolved"],
        },
    ],
    status_field: Some("status"),
    default_sort: ("timestamp", SortDirection::Descending),
};

/// A reported incident.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Incident {
    /// Unique id.
    pub id: String,
    /// Short headline.
    pub title: String,
    /// Incident category.
    #[serde(rename = "type")]
    pub incident_type: String,
    /// Critical, High, Medium or Low.
    pub severity: String,
    /// Where it happened.
    pub location: String,
    /// Workflow status.
    pub status: String,
    /// When it was reported.
    pub timestamp: DateTime<Utc>,
    /// Responders assigned.
    pub responders: u32,
    /// Free-form details.
    pub description: String,
}

impl Record for Incident {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        Some(match name {
            "id" => FieldValue::Text(&self.id),
            "title" => FieldValue::Text(&self.title),
            "type" => FieldValue::Text(&self.incident_type),
            "severity" => FieldValue::Text(&self.severity),
            "location" => FieldValue::Text(&self.location),
            "status" => FieldValue::Text(&self.status),
            "timestamp" => FieldValue::Timestamp(self.timestamp),
            "responders" => FieldValue::Number(f64::from(self.responders)),
            "description" => FieldValue::Text(&self.description),
            _ => return None,
        })
    }
}

impl Entity for Incident {
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
            incident(
                "1",
                "Flash Flood Warning",
                "Flood",
                "Critical",
                "Riverside District",
                "Active",
                at(2024, 3, 14, 6, 40),
                12,
                "River gauge above flood stage; low-lying streets under water.",
            ),
            incident(
                "2",
                "Warehouse Fire",
                "Fire",
                "High",
                "Industrial Park, Unit 7",
                "Responding",
                at(2024, 3, 14, 9, 15),
                18,
                "Structure fire with possible chemical storage on site.",
            ),
            incident(
                "3",
                "Road Closure",
                "Accident",
                "Medium",
                "Highway 9, Exit 22",
                "Contained",
                at(2024, 3, 13, 22, 5),
                4,
                "Jackknifed truck blocking both northbound lanes.",
            ),
            incident(
                "4",
                "Hillside Slip",
                "Landslide",
                "High",
                "North Ridge Road",
                "Active",
                at(2024, 3, 14, 7, 50),
                6,
                "Debris across the road after overnight rain; two homes evacuated.",
            ),
            incident(
                "5",
                "Heat Exhaustion Cluster",
                "Medical",
                "Low",
                "Central Shelter",
                "Resolved",
                at(2024, 3, 12, 15, 30),
                3,
                "Several evacuees treated on site and released.",
            ),
            incident(
                "6",
                "Power Lines Down",
                "Storm",
                "Medium",
                "Oak Avenue",
                "Responding",
                at(2024, 3, 14, 11, 0),
                5,
                "Utility crews requested; area cordoned off.",
            ),
        ]
    }
}

#[allow(clippy::too_many_arguments)]
fn incident(
    id: &str,
    title: &str,
    incident_type: &str,
    severity: &str,
    location: &str,
    status: &str,
    timestamp: DateTime<Utc>,
    responders: u32,
    description: &str,
) -> Incident {
    Incident {
        id: id.to_string(),
        title: title.to_string(),
        incident_type: incident_type.to_string(),
        severity: severity.to_string(),
        location: location.to_string(),
        status: status.to_string(),
        timestamp,
        responders,
        description: description.to_string(),
    }
}
