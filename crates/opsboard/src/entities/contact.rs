use serde::{Deserialize, Serialize};

use crate::record::{Entity, FieldValue, Record};
use crate::schema::{EntitySchema, FieldSpec, FilterSpec};
use crate::sort::SortDirection;

static SCHEMA: EntitySchema = EntitySchema {
    name: "contacts",
    fields: &[
        FieldSpec::text("id"),
        FieldSpec::text("name"),
        FieldSpec::text("organization"),
        FieldSpec::text("role"),
        FieldSpec::text("category"),
        FieldSpec::text("phone"),
        FieldSpec::text("email"),
        FieldSpec::text("location"),
    ],
    searchable: &["name", "organization", "role", "location"],
    filters: &[FilterSpec {
        key: "category",
        options: &[
            "Government",
            "Medical",
            "NGO",
            "Utilities",
            "Media",
            "Volunteer",
        ],
    }],
    status_field: None,
    default_sort: ("name", SortDirection::Ascending),
};

/// A partner or agency contact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Contact {
    /// Unique id.
    pub id: String,
    /// Person's name.
    pub name: String,
    /// Agency or company.
    pub organization: String,
    /// Position within the organisation.
    pub role: String,
    /// Contact category.
    pub category: String,
    /// Phone number.
    pub phone: String,
    /// Email address.
    pub email: String,
    /// Office or base.
    pub location: String,
}

impl Record for Contact {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        Some(match name {
            "id" => FieldValue::Text(&self.id),
            "name" => FieldValue::Text(&self.name),
            "organization" => FieldValue::Text(&self.organization),
            "role" => FieldValue::Text(&self.role),
            "category" => FieldValue::Text(&self.category),
            "phone" => FieldValue::Text(&self.phone),
            "email" => FieldValue::Text(&self.email),
            "location" => FieldValue::Text(&self.location),
            _ => return None,
        })
    }
}

impl Entity for Contact {
    fn schema() -> &'static EntitySchema {
        &SCHEMA
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn seed() -> Vec<Self> {
        [
            ("1", "Helen Achebe", "County Emergency Management", "Director", "Government", "555-0201", "City Hall"),
            ("2", "Dr. Samuel Grant", "St. Agnes Hospital", "ER Coordinator", "Medical", "555-0202", "Hospital Campus"),
            ("3", "Lucia Ferreira", "Red Cross Chapter 12", "Shelter Manager", "NGO", "555-0203", "Central Shelter"),
            ("4", "Ken Watanabe", "Valley Power & Light", "Outage Desk", "Utilities", "555-0204", "Substation 3"),
            ("5", "Aisha Rahman", "Channel 8 News", "Assignment Editor", "Media", "555-0205", "Downtown Studio"),
            ("6", "Peter Novak", "Community Response Team", "Volunteer Lead", "Volunteer", "555-0206", "Riverside District"),
        ]
        .into_iter()
        .map(|(id, name, organization, role, category, phone, location)| Contact {
            id: id.to_string(),
            name: name.to_string(),
            organization: organization.to_string(),
            role: role.to_string(),
            category: category.to_string(),
            phone: phone.to_string(),
            email: format!("contact{id}@partners.example.org"),
            location: location.to_string(),
        })
        .collect()
    }
}
