use serde::{Deserialize, Serialize};

use crate::record::{Entity, FieldValue, Record};
use crate::schema::{EntitySchema, FieldSpec, FilterSpec};
use crate::sort::SortDirection;

static SCHEMA: EntitySchema = EntitySchema {
    name: "personnel",
    fields: &[
        FieldSpec::text("id"),
        FieldSpec::text("name"),
        FieldSpec::text("role"),
        FieldSpec::text("department"),
        FieldSpec::text("status"),
        FieldSpec::numeric("experience"),
        FieldSpec::text("contact"),
        FieldSpec::text("email"),
        FieldSpec::numeric("certifications"),
    ],
    searchable: &["name", "role", "email"],
    filters: &[
        FilterSpec {
            key: "department",
            options: &[
                "Search & Rescue",
                "Medical",
                "Logistics",
                "Communications",
                "Command",
            ],
        },
        FilterSpec {
            key: "status",
            options: &["Available", "Deployed", "On Leave", "Off Duty"],
        },
    ],
    status_field: Some("status"),
    default_sort: ("name", SortDirection::Ascending),
};

/// A responder or staff member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Personnel {
    /// Unique id.
    pub id: String,
    /// Full name.
    pub name: String,
    /// Job title.
    pub role: String,
    /// Department.
    pub department: String,
    /// Availability.
    pub status: String,
    /// Years of field experience.
    pub experience: u32,
    /// Phone number.
    pub contact: String,
    /// Email address.
    pub email: String,
    /// Held certifications. Sorting and display use the count.
    pub certifications: Vec<String>,
}

impl Record for Personnel {
    fn id(&self) -> &str {
        &self.id
    }

    #[allow(clippy::cast_precision_loss)]
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        Some(match name {
            "id" => FieldValue::Text(&self.id),
            "name" => FieldValue::Text(&self.name),
            "role" => FieldValue::Text(&self.role),
            "department" => FieldValue::Text(&self.department),
            "status" => FieldValue::Text(&self.status),
            "experience" => FieldValue::Number(f64::from(self.experience)),
            "contact" => FieldValue::Text(&self.contact),
            "email" => FieldValue::Text(&self.email),
            "certifications" => FieldValue::Number(self.certifications.len() as f64),
            _ => return None,
        })
    }
}

impl Entity for Personnel {
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
            member(
                "1",
                "Maria Okafor",
                "Team Leader",
                "Search & Rescue",
                "Deployed",
                12,
                "555-0101",
                &["Swift Water Rescue", "Incident Command"],
            ),
            member(
                "2",
                "James Whitfield",
                "Paramedic",
                "Medical",
                "Available",
                8,
                "555-0102",
                &["Advanced Life Support"],
            ),
            member(
                "3",
                "Priya Raman",
                "Logistics Coordinator",
                "Logistics",
                "Available",
                5,
                "555-0103",
                &[],
            ),
            member(
                "4",
                "Tomás Herrera",
                "Radio Operator",
                "Communications",
                "On Leave",
                2,
                "555-0104",
                &["Amateur Radio General"],
            ),
            member(
                "5",
                "Grace Lindqvist",
                "Operations Chief",
                "Command",
                "Available",
                20,
                "555-0105",
                &["Incident Command", "Hazmat Awareness", "Public Information"],
            ),
            member(
                "6",
                "Daniel Osei",
                "Rescue Technician",
                "Search & Rescue",
                "Off Duty",
                10,
                "555-0106",
                &["Rope Rescue"],
            ),
        ]
    }
}

#[allow(clippy::too_many_arguments)]
fn member(
    id: &str,
    name: &str,
    role: &str,
    department: &str,
    status: &str,
    experience: u32,
    contact: &str,
    certifications: &[&str],
) -> Personnel {
    let email = format!(
        "{}@ops.example.org",
        name.to_lowercase().replace(' ', ".")
    );
    Personnel {
        id: id.to_string(),
        name: name.to_string(),
        role: role.to_string(),
        department: department.to_string(),
        status: status.to_string(),
        experience,
        contact: contact.to_string(),
        email,
        certifications: certifications.iter().map(ToString::to_string).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_certifications_count() {
        let seed = Personnel::seed();
        let grace = seed.iter().find(|p| p.id == "5").unwrap();
        assert_eq!(grace.field("certifications"), Some(FieldValue::Number(3.0)));
    }

    #[test]
    fn test_seed_emails() {
        let seed = Personnel::seed();
        assert_eq!(seed[0].email, "maria.okafor@ops.example.org");
    }
}
