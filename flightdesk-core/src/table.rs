use std::cmp::Ordering;
use flightdesk_shared::{FlightRecord, RecordField};
use crate::{CoreError, CoreResult};

pub type CellFormatter = fn(&str) -> String;

/// One column of the results table.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub field: RecordField,
    pub formatter: Option<CellFormatter>,
}

impl Column {
    pub fn label(&self) -> &'static str {
        self.field.label()
    }

    /// Raw cell value, used for sorting.
    pub fn accessor<'a>(&self, record: &'a FlightRecord) -> &'a str {
        record.get(self.field).unwrap_or_default()
    }

    /// Cell value as displayed.
    pub fn render(&self, record: &FlightRecord) -> String {
        let raw = self.accessor(record);
        match self.formatter {
            Some(format) => format(raw),
            None => raw.to_string(),
        }
    }
}

pub const COLUMNS: [Column; 8] = [
    Column { field: RecordField::FlightNumber, formatter: None },
    Column { field: RecordField::Origin, formatter: None },
    Column { field: RecordField::Destination, formatter: None },
    Column { field: RecordField::DepartureDate, formatter: Some(format_date) },
    Column { field: RecordField::DepartureTime, formatter: None },
    Column { field: RecordField::ArrivalDate, formatter: Some(format_date) },
    Column { field: RecordField::ArrivalTime, formatter: None },
    Column { field: RecordField::Status, formatter: None },
];

pub fn column(field: RecordField) -> Column {
    COLUMNS
        .iter()
        .copied()
        .find(|c| c.field == field)
        .unwrap_or(Column { field, formatter: None })
}

/// Date part of a combined date-time value ("2024-01-01T10:00" -> "2024-01-01").
pub fn format_date(value: &str) -> String {
    value.split('T').next().unwrap_or(value).to_string()
}

/// Resolve a user-typed column name: wire name, header label or kebab-case.
pub fn parse_column(name: &str) -> CoreResult<RecordField> {
    let wanted = normalize(name);
    RecordField::ALL
        .into_iter()
        .find(|f| normalize(f.wire_name()) == wanted || normalize(f.label()) == wanted)
        .ok_or_else(|| CoreError::ValidationError(format!("unknown column {:?}", name)))
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortBy {
    pub field: RecordField,
    pub direction: SortDirection,
}

impl SortBy {
    pub fn ascending(field: RecordField) -> Self {
        Self { field, direction: SortDirection::Ascending }
    }

    pub fn descending(field: RecordField) -> Self {
        Self { field, direction: SortDirection::Descending }
    }
}

/// Header click: unsorted -> ascending -> descending -> unsorted.
/// Clicking another column starts over on that column.
pub fn toggle_sort(current: Option<SortBy>, field: RecordField) -> Option<SortBy> {
    match current {
        Some(sort) if sort.field == field => match sort.direction {
            SortDirection::Ascending => Some(SortBy::descending(field)),
            SortDirection::Descending => None,
        },
        _ => Some(SortBy::ascending(field)),
    }
}

/// Rows in display order. Ties keep their incoming order in both directions.
pub fn sort_rows<'a>(rows: &'a [FlightRecord], sort: Option<SortBy>) -> Vec<&'a FlightRecord> {
    let mut ordered: Vec<&FlightRecord> = rows.iter().collect();
    if let Some(sort) = sort {
        let col = column(sort.field);
        ordered.sort_by(|a, b| {
            let ord = col.accessor(a).cmp(col.accessor(b));
            match sort.direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        });
    }
    ordered
}

pub fn header(col: &Column, sort: Option<SortBy>) -> String {
    let indicator = match sort {
        Some(s) if s.field == col.field => match s.direction {
            SortDirection::Ascending => " ↑",
            SortDirection::Descending => " ↓",
        },
        _ => " ↑↓",
    };
    format!("{}{}", col.label(), indicator)
}

/// Plain-text table with a 1-based row number column.
pub fn render_table(rows: &[&FlightRecord], sort: Option<SortBy>) -> String {
    let mut grid: Vec<Vec<String>> = Vec::with_capacity(rows.len() + 1);

    let mut head = vec!["#".to_string()];
    head.extend(COLUMNS.iter().map(|c| header(c, sort)));
    grid.push(head);

    for (position, record) in rows.iter().enumerate() {
        let mut line = vec![(position + 1).to_string()];
        line.extend(COLUMNS.iter().map(|c| c.render(record)));
        grid.push(line);
    }

    let widths: Vec<usize> = (0..grid[0].len())
        .map(|i| grid.iter().map(|row| row[i].chars().count()).max().unwrap_or(0))
        .collect();

    let mut out = String::new();
    for (i, row) in grid.iter().enumerate() {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| pad(cell, *width))
            .collect();
        out.push_str(cells.join("  ").trim_end());
        out.push('\n');
        if i == 0 {
            let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
            out.push_str(&rule.join("  "));
            out.push('\n');
        }
    }
    out
}

fn pad(cell: &str, width: usize) -> String {
    let len = cell.chars().count();
    match len.cmp(&width) {
        Ordering::Less => format!("{}{}", cell, " ".repeat(width - len)),
        _ => cell.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::fixtures::*;

    #[test]
    fn test_format_date_strips_time() {
        assert_eq!(format_date("2024-01-01T10:00:00.000Z"), "2024-01-01");
        assert_eq!(format_date("2024-01-01"), "2024-01-01");
        assert_eq!(format_date(""), "");
    }

    #[test]
    fn test_date_columns_use_formatter() {
        let record = aa100();
        assert_eq!(column(RecordField::DepartureDate).render(&record), "2024-01-01");
        assert_eq!(column(RecordField::DepartureDate).accessor(&record), "2024-01-01T10:00");
        assert_eq!(column(RecordField::DepartureTime).render(&record), "10:00");
    }

    #[test]
    fn test_toggle_cycle() {
        let field = RecordField::Origin;
        let first = toggle_sort(None, field);
        assert_eq!(first, Some(SortBy::ascending(field)));
        let second = toggle_sort(first, field);
        assert_eq!(second, Some(SortBy::descending(field)));
        assert_eq!(toggle_sort(second, field), None);

        let other = toggle_sort(second, RecordField::Status);
        assert_eq!(other, Some(SortBy::ascending(RecordField::Status)));
    }

    #[test]
    fn test_sort_is_stable_in_both_directions() {
        let mut twin = dl300();
        twin.id = Some("f-twin".to_string());
        twin.status = Some("Delayed".to_string());
        let rows = vec![ba200(), aa100(), twin];

        let asc = sort_rows(&rows, Some(SortBy::ascending(RecordField::Status)));
        let ids: Vec<_> = asc.iter().map(|r| r.id.as_deref().unwrap()).collect();
        assert_eq!(ids, vec!["f-ba200", "f-twin", "f-aa100"]);

        let desc = sort_rows(&rows, Some(SortBy::descending(RecordField::Status)));
        let ids: Vec<_> = desc.iter().map(|r| r.id.as_deref().unwrap()).collect();
        assert_eq!(ids, vec!["f-aa100", "f-ba200", "f-twin"]);

        let unsorted = sort_rows(&rows, None);
        assert_eq!(unsorted.len(), 3);
        assert_eq!(unsorted[0].id.as_deref(), Some("f-ba200"));
    }

    #[test]
    fn test_parse_column_accepts_several_spellings() {
        assert_eq!(parse_column("departureDate").unwrap(), RecordField::DepartureDate);
        assert_eq!(parse_column("Departure Date").unwrap(), RecordField::DepartureDate);
        assert_eq!(parse_column("departure-date").unwrap(), RecordField::DepartureDate);
        assert!(parse_column("gate").is_err());
    }

    #[test]
    fn test_render_table_headers_and_rows() {
        let rows = vec![aa100(), ba200()];
        let sort = Some(SortBy::descending(RecordField::FlightNumber));
        let ordered = sort_rows(&rows, sort);
        let text = render_table(&ordered, sort);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("Flight Number ↓"));
        assert!(lines[0].contains("Origin ↑↓"));
        assert!(lines[1].starts_with('-'));
        assert!(lines[2].starts_with("1 "));
        assert!(lines[2].contains("BA200"));
        assert!(lines[2].contains("2024-01-02"));
        assert!(!lines[2].contains("T09:00"));
        assert!(lines[3].contains("AA100"));
    }
}
