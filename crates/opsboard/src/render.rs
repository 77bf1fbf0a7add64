//! Text and JSON output for list views, facet counts and schemas.
//!
//! This is the CLI's stand-in for the dashboard's table components.

use std::io::Write;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::Result;
use crate::facets::FacetCount;
use crate::pipeline::ListView;
use crate::record::Entity;
use crate::schema::EntitySchema;

/// Longest cell shown in table output before it is cut.
const MAX_CELL_WIDTH: usize = 40;

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}

/// Write one page of a list.
///
/// # Errors
///
/// Returns an error if writing or JSON encoding fails.
pub fn render_list<R: Entity, W: Write>(
    out: &mut W,
    view: &ListView<'_, R>,
    format: OutputFormat,
) -> Result<()> {
    let schema = R::schema();
    match format {
        OutputFormat::Json => {
            let body = json!({
                "entity": schema.name,
                "total": view.total,
                "offset": view.page.offset,
                "limit": view.page.limit,
                "items": view.items,
            });
            serde_json::to_writer_pretty(&mut *out, &body)?;
            writeln!(out)?;
        }
        OutputFormat::Plain => {
            for record in &view.items {
                let line: Vec<String> = cells(*record, schema).collect();
                writeln!(out, "{}", line.join(" | "))?;
            }
            write_footer(out, view, schema)?;
        }
        OutputFormat::Table => {
            let header: Vec<String> = schema.fields.iter().map(|f| f.name.to_string()).collect();
            let rows: Vec<Vec<String>> = view
                .items
                .iter()
                .map(|record| cells(*record, schema).map(|c| truncate(&c)).collect())
                .collect();
            write_table(out, &header, &rows)?;
            write_footer(out, view, schema)?;
        }
    }
    Ok(())
}

/// Write facet counts for one field.
///
/// # Errors
///
/// Returns an error if writing or JSON encoding fails.
pub fn render_facets<W: Write>(
    out: &mut W,
    schema: &EntitySchema,
    field: &str,
    counts: &[FacetCount],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let body = json!({
                "entity": schema.name,
                "field": field,
                "counts": counts,
            });
            serde_json::to_writer_pretty(&mut *out, &body)?;
            writeln!(out)?;
        }
        OutputFormat::Plain => {
            for facet in counts {
                writeln!(out, "{}: {}", facet.value, facet.count)?;
            }
        }
        OutputFormat::Table => {
            let header = vec![field.to_string(), "count".to_string()];
            let rows: Vec<Vec<String>> = counts
                .iter()
                .map(|facet| vec![facet.value.clone(), facet.count.to_string()])
                .collect();
            write_table(out, &header, &rows)?;
        }
    }
    Ok(())
}

/// Describe an entity schema: fields, kinds, search and filters.
///
/// # Errors
///
/// Returns an error if writing or JSON encoding fails.
pub fn render_schema<W: Write>(out: &mut W, schema: &EntitySchema, format: OutputFormat) -> Result<()> {
    let (sort_field, sort_direction) = schema.default_sort;
    if format == OutputFormat::Json {
        let fields: Vec<_> = schema
            .fields
            .iter()
            .map(|f| json!({ "name": f.name, "kind": f.kind.to_string() }))
            .collect();
        let filters: Vec<_> = schema
            .filters
            .iter()
            .map(|f| json!({ "key": f.key, "options": f.options }))
            .collect();
        let body = json!({
            "entity": schema.name,
            "fields": fields,
            "searchable": schema.searchable,
            "filters": filters,
            "status_field": schema.status_field,
            "default_sort": { "field": sort_field, "direction": sort_direction.to_string() },
        });
        serde_json::to_writer_pretty(&mut *out, &body)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "{}", schema.name)?;
    writeln!(out, "  fields:")?;
    for field in schema.fields {
        writeln!(out, "    {:<20} {}", field.name, field.kind)?;
    }
    writeln!(out, "  search: {}", schema.searchable.join(", "))?;
    for filter in schema.filters {
        writeln!(out, "  filter {}: {}", filter.key, filter.options.join(", "))?;
    }
    if let Some(status) = schema.status_field {
        writeln!(out, "  status field: {status}")?;
    }
    writeln!(out, "  default sort: {sort_field} {sort_direction}")?;
    Ok(())
}

fn cells<'r, R: Entity>(record: &'r R, schema: &'static EntitySchema) -> impl Iterator<Item = String> + 'r {
    schema
        .fields
        .iter()
        .map(move |f| record.field(f.name).map(|v| v.to_string()).unwrap_or_default())
}

fn truncate(cell: &str) -> String {
    if cell.chars().count() <= MAX_CELL_WIDTH {
        return cell.to_string();
    }
    let mut cut: String = cell.chars().take(MAX_CELL_WIDTH - 3).collect();
    cut.push_str("...");
    cut
}

fn write_table<W: Write>(out: &mut W, header: &[String], rows: &[Vec<String>]) -> Result<()> {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_row(out, header, &widths)?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    write_row(out, &rule, &widths)?;
    for row in rows {
        write_row(out, row, &widths)?;
    }
    Ok(())
}

fn write_row<W: Write>(out: &mut W, row: &[String], widths: &[usize]) -> Result<()> {
    let padded: Vec<String> = row
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    writeln!(out, "{}", padded.join("  ").trim_end())?;
    Ok(())
}

fn write_footer<R: Entity, W: Write>(out: &mut W, view: &ListView<'_, R>, schema: &EntitySchema) -> Result<()> {
    if view.total == 0 {
        writeln!(out, "No matching {}", schema.name)?;
    } else if view.is_empty() {
        writeln!(
            out,
            "No rows at offset {} of {} {}",
            view.page.offset, view.total, schema.name
        )?;
    } else {
        let first = view.page.offset + 1;
        let last = view.page.offset + view.len();
        writeln!(out, "Showing {first}-{last} of {} {}", view.total, schema.name)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Incident, LendingItem};
    use crate::facets::facet_counts;
    use crate::pipeline::{run, ListQuery, Page};

    fn render_to_string<R: Entity>(view: &ListView<'_, R>, format: OutputFormat) -> String {
        let mut out = Vec::new();
        render_list(&mut out, view, format).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Plain);
    }

    #[test]
    fn test_output_format_serde_names() {
        let format: OutputFormat = serde_json::from_str("\"table\"").unwrap();
        assert_eq!(format, OutputFormat::Table);
        assert_eq!(serde_json::to_string(&OutputFormat::Json).unwrap(), "\"json\"");
    }

    #[test]
    fn test_plain_output_one_line_per_record() {
        let records = LendingItem::seed();
        let view = run(&records, &ListQuery::default());
        let text = render_to_string(&view, OutputFormat::Plain);

        assert_eq!(text.lines().count(), records.len() + 1);
        assert!(text.contains("Portable Generator 5kW"));
        assert!(text.ends_with(&format!("Showing 1-{} of {} lending\n", records.len(), records.len())));
    }

    #[test]
    fn test_table_output_has_header_and_rule() {
        let records = Incident::seed();
        let view = run(&records, &ListQuery::default());
        let text = render_to_string(&view, OutputFormat::Table);
        let mut lines = text.lines();

        let header = lines.next().unwrap();
        assert!(header.starts_with("id"));
        assert!(header.contains("severity"));
        assert!(lines.next().unwrap().starts_with("--"));
    }

    #[test]
    fn test_table_truncates_long_cells() {
        assert_eq!(truncate("short"), "short");
        let long = "x".repeat(60);
        let cut = truncate(&long);
        assert_eq!(cut.chars().count(), MAX_CELL_WIDTH);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn test_json_output_reports_total_and_page() {
        let records = Incident::seed();
        let query = ListQuery {
            page: Page::new(1, 2),
            ..ListQuery::default()
        };
        let view = run(&records, &query);
        let text = render_to_string(&view, OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["entity"], "incidents");
        assert_eq!(value["total"], records.len());
        assert_eq!(value["offset"], 1);
        assert_eq!(value["items"].as_array().unwrap().len(), 2);
        assert_eq!(value["items"][0]["id"], records[1].id);
    }

    #[test]
    fn test_empty_view_footer() {
        let records = Incident::seed();
        let query = ListQuery {
            filter: crate::filter::FilterState::new().with_query("no such incident"),
            ..ListQuery::default()
        };
        let view = run(&records, &query);
        let text = render_to_string(&view, OutputFormat::Plain);
        assert_eq!(text, "No matching incidents\n");
    }

    #[test]
    fn test_offset_past_end_footer() {
        let records = Incident::seed();
        let query = ListQuery {
            page: Page::new(10, 2),
            ..ListQuery::default()
        };
        let view = run(&records, &query);
        let text = render_to_string(&view, OutputFormat::Plain);
        assert_eq!(text, format!("No rows at offset 10 of {} incidents\n", records.len()));
    }

    #[test]
    fn test_render_facets_plain() {
        let records = LendingItem::seed();
        let counts = facet_counts(&records, "status", LendingItem::schema());
        let mut out = Vec::new();
        render_facets(&mut out, LendingItem::schema(), "status", &counts, OutputFormat::Plain).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "Active: 3\nOverdue: 1\nReturned: 1\n");
    }

    #[test]
    fn test_render_schema_lists_filters() {
        let mut out = Vec::new();
        render_schema(&mut out, Incident::schema(), OutputFormat::Plain).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("incidents\n"));
        assert!(text.contains("ranked(severity)"));
        assert!(text.contains("filter status: Active, Responding, Contained, Resolved"));
        assert!(text.contains("default sort: timestamp desc"));
    }

    #[test]
    fn test_render_schema_json() {
        let mut out = Vec::new();
        render_schema(&mut out, LendingItem::schema(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["entity"], "lending");
        assert_eq!(value["default_sort"]["direction"], "asc");
        assert_eq!(value["fields"][5]["kind"], "numeric");
    }
}
