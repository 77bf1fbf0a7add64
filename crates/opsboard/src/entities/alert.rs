use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::at;
use crate::record::{Entity, FieldValue, Record};
use crate::schema::{EntitySchema, FieldSpec, FilterSpec, SEVERITY};
use crate::sort::SortDirection;

static SCHEMA: EntitySchema = EntitySchema {
    name: "alerts",
    fields: &[
        FieldSpec::text("id"),
        FieldSpec::text("title"),
        FieldSpec::ranked("severity", &SEVERITY),
        FieldSpec::text("category"),
        FieldSpec::text("area"),
        FieldSpec::text("status"),
        FieldSpec::temporal("issuedAt"),
        FieldSpec::text("message"),
    ],
    searchable: &["title", "area", "message"],
    filters: &[
        FilterSpec {
            key: "severity",
            options: &["Critical", "High", "Medium", "Low"],
        },
        FilterSpec {
            key: "category",
            options: &[
                "Weather",
                "Flood",
                "Fire",
                "Seismic",
                "Health",
                "Infrastructure",
            ],
        },
        FilterSpec {
            key: "status",
            options: &["Active", "Monitoring", "Expired"],
        },
    ],
    status_field: Some("status"),
    default_sort: ("severity", SortDirection::Ascending),
};

/// A public warning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Alert {
    /// Unique id.
    pub id: String,
    /// Headline.
    pub title: String,
    /// Critical, High, Medium or Low.
    pub severity: String,
    /// Hazard category.
    pub category: String,
    /// Affected area.
    pub area: String,
    /// Lifecycle status.
    pub status: String,
    /// When the alert went out.
    pub issued_at: DateTime<Utc>,
    /// Public message text.
    pub message: String,
}

impl Record for Alert {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        Some(match name {
            "id" => FieldValue::Text(&self.id),
            "title" => FieldValue::Text(&self.title),
            "severity" => FieldValue::Text(&self.severity),
            "category" => FieldValue::Text(&self.category),
            "area" => FieldValue::Text(&self.area),
            "status" => FieldValue::Text(&self.status),
            "issuedAt" => FieldValue::Timestamp(self.issued_at),
            "message" => FieldValue::Text(&self.message),
            _ => return None,
        })
    }
}

impl Entity for Alert {
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
            Alert {
                id: "1".to_string(),
                title: "Flood Warning: Lower Valley".to_string(),
                severity: "Critical".to_string(),
                category: "Flood".to_string(),
                area: "Riverside District".to_string(),
                status: "Active".to_string(),
                issued_at: at(2024, 3, 14, 5, 30),
                message: "Move to higher ground now. Do not drive through flood water.".to_string(),
            },
            Alert {
                id: "2".to_string(),
                title: "Severe Thunderstorm Watch".to_string(),
                severity: "High".to_string(),
                category: "Weather".to_string(),
                area: "County-wide".to_string(),
                status: "Monitoring".to_string(),
                issued_at: at(2024, 3, 14, 8, 0),
                message: "Damaging winds and hail possible through the evening.".to_string(),
            },
            Alert {
                id: "3".to_string(),
                title: "Boil Water Advisory".to_string(),
                severity: "Medium".to_string(),
                category: "Health".to_string(),
                area: "North Ridge".to_string(),
                status: "Active".to_string(),
                issued_at: at(2024, 3, 13, 18, 45),
                message: "Boil tap water for one minute before drinking.".to_string(),
            },
            Alert {
                id: "4".to_string(),
                title: "Bridge Inspection Closure".to_string(),
                severity: "Low".to_string(),
                category: "Infrastructure".to_string(),
                area: "Mill Street Bridge".to_string(),
                status: "Expired".to_string(),
                issued_at: at(2024, 3, 10, 9, 0),
                message: "Bridge reopened after inspection.".to_string(),
            },
        ]
    }
}
