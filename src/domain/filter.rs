use std::collections::HashMap;

use crate::domain::equipment::{Equipment, EquipmentStatus};
use crate::error::{Error, Result};

/// The closed set of fields the equipment list can be filtered on.
///
/// Filters are enumerated here rather than discovered from record keys at
/// runtime, so a misspelled field is a construction error, not a silently
/// empty result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Status,
    Kind,
    Department,
}

/// One selectable value of a filter dropdown.
#[derive(Debug, Clone)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

/// One filter dropdown: the field it drives and the values it offers.
#[derive(Debug, Clone)]
pub struct FilterSpec {
    pub field: FilterField,
    pub label: String,
    pub options: Vec<FilterOption>,
}

/// A validated set of filter dropdowns.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    specs: Vec<FilterSpec>,
}

impl FilterConfig {
    /// Validates at construction: every field at most once, no dropdown
    /// without options.
    pub fn new(specs: Vec<FilterSpec>) -> Result<FilterConfig> {
        let mut seen = Vec::new();
        for spec in &specs {
            if seen.contains(&spec.field) {
                return Err(Error::FilterConfigError(format!("Duplicate filter field {:?}", spec.field)));
            }
            if spec.options.is_empty() {
                return Err(Error::FilterConfigError(format!("Filter field {:?} has no options", spec.field)));
            }
            seen.push(spec.field);
        }
        Ok(FilterConfig { specs })
    }

    /// Builds the standard three-dropdown config for an equipment list:
    /// a fixed status dropdown plus kind and department dropdowns populated
    /// from the values actually present.
    pub fn for_equipment(equipment: &[Equipment]) -> Result<FilterConfig> {
        let status_options = [EquipmentStatus::Available, EquipmentStatus::InUse, EquipmentStatus::Maintenance, EquipmentStatus::Reserved]
            .iter()
            .map(|status| FilterOption { value: status.as_str().to_string(), label: status.label().to_string() })
            .collect();

        let to_options = |values: Vec<String>| values.into_iter().map(|value| FilterOption { label: value.clone(), value }).collect();

        FilterConfig::new(vec![
            FilterSpec { field: FilterField::Status, label: "Status".to_string(), options: status_options },
            FilterSpec { field: FilterField::Kind, label: "Type".to_string(), options: to_options(unique_values(equipment, FilterField::Kind)) },
            FilterSpec {
                field: FilterField::Department,
                label: "Department".to_string(),
                options: to_options(unique_values(equipment, FilterField::Department)),
            },
        ])
    }

    pub fn specs(&self) -> &[FilterSpec] {
        &self.specs
    }
}

/// What the user currently has selected: an optional free-text search plus
/// at most one value per filter field. An absent field means "all".
#[derive(Debug, Clone, Default)]
pub struct FilterSelection {
    pub search_term: Option<String>,
    values: HashMap<FilterField, String>,
}

impl FilterSelection {
    pub fn select(&mut self, field: FilterField, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    pub fn clear(&mut self, field: FilterField) {
        self.values.remove(&field);
    }
}

fn field_value(item: &Equipment, field: FilterField) -> &str {
    match field {
        FilterField::Status => item.status.as_str(),
        FilterField::Kind => &item.kind,
        FilterField::Department => &item.department,
    }
}

/// Distinct, non-empty values present for a field, in first-seen order.
pub fn unique_values(equipment: &[Equipment], field: FilterField) -> Vec<String> {
    let mut values: Vec<String> = Vec::new();
    for item in equipment {
        let value = field_value(item, field);
        if !value.is_empty() && !values.iter().any(|v| v == value) {
            values.push(value.to_string());
        }
    }
    values
}

/// Applies a selection to the equipment list.
///
/// The search term matches case-insensitively against name, type and
/// department; each selected dropdown value must match exactly.
pub fn filter_equipment<'a>(equipment: &'a [Equipment], selection: &FilterSelection) -> Vec<&'a Equipment> {
    equipment
        .iter()
        .filter(|item| {
            if let Some(term) = &selection.search_term {
                let term = term.to_lowercase();
                let hit = item.name.to_lowercase().contains(&term)
                    || item.kind.to_lowercase().contains(&term)
                    || item.department.to_lowercase().contains(&term);
                if !hit {
                    return false;
                }
            }

            selection.values.iter().all(|(field, value)| field_value(item, *field) == value)
        })
        .collect()
}
