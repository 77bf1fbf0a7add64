use serde::{Deserialize, Serialize};

use crate::record::{Entity, FieldValue, Record};
use crate::schema::{EntitySchema, FieldSpec, FilterSpec};
use crate::sort::SortDirection;

static SCHEMA: EntitySchema = EntitySchema {
    name: "resources",
    fields: &[
        FieldSpec::text("id"),
        FieldSpec::text("name"),
        FieldSpec::text("category"),
        FieldSpec::numeric("quantity"),
        FieldSpec::text("unit"),
        FieldSpec::text("location"),
        FieldSpec::text("status"),
    ],
    searchable: &["name", "location"],
    filters: &[
        FilterSpec {
            key: "category",
            options: &["Food", "Water", "Medical", "Shelter", "Equipment", "Fuel"],
        },
        FilterSpec {
            key: "status",
            options: &["Available", "Low Stock", "Depleted", "In Transit"],
        },
    ],
    status_field: Some("status"),
    default_sort: ("name", SortDirection::Ascending),
};

/// A stockpiled supply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Resource {
    /// Unique id.
    pub id: String,
    /// Item name.
    pub name: String,
    /// Supply category.
    pub category: String,
    /// Units on hand.
    pub quantity: u32,
    /// Unit of measure.
    pub unit: String,
    /// Depot or warehouse.
    pub location: String,
    /// Stock status.
    pub status: String,
}

impl Record for Resource {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        Some(match name {
            "id" => FieldValue::Text(&self.id),
            "name" => FieldValue::Text(&self.name),
            "category" => FieldValue::Text(&self.category),
            "quantity" => FieldValue::Number(f64::from(self.quantity)),
            "unit" => FieldValue::Text(&self.unit),
            "location" => FieldValue::Text(&self.location),
            "status" => FieldValue::Text(&self.status),
            _ => return None,
        })
    }
}

impl Entity for Resource {
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
        [
            ("1", "Bottled Water", "Water", 2400, "litres", "Depot A", "Available"),
            ("2", "Ready Meals", "Food", 180, "packs", "Depot A", "Low Stock"),
            ("3", "First Aid Kits", "Medical", 65, "kits", "Central Shelter", "Available"),
            ("4", "Cots", "Shelter", 0, "units", "Depot B", "Depleted"),
            ("5", "Sandbags", "Equipment", 5000, "bags", "Riverside Staging", "In Transit"),
            ("6", "Diesel", "Fuel", 900, "litres", "Depot B", "Available"),
        ]
        .into_iter()
        .map(|(id, name, category, quantity, unit, location, status)| Resource {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            quantity,
            unit: unit.to_string(),
            location: location.to_string(),
            status: status.to_string(),
        })
        .collect()
    }
}
