use flightdesk_core::search::SearchCriteria;
use flightdesk_core::session::SearchState;
use flightdesk_core::table::render_table;
use flightdesk_core::{FlightRecord, FlightStatus, RecordField};

pub const NO_SEARCH: &str = "No search performed yet.";
pub const NO_MATCHES: &str = "No flights match your search.";

/// The results area: nothing before the first search, then the table.
pub fn results(state: &SearchState) -> String {
    if !state.has_searched {
        return format!("{}\n", NO_SEARCH);
    }
    if state.results.is_empty() {
        return format!("{}\n", NO_MATCHES);
    }
    let rows = state.displayed_rows();
    let mut out = render_table(&rows, state.sort);
    out.push_str(&format!(
        "{} of {} flight(s)\n",
        rows.len(),
        state.records.len()
    ));
    out
}

pub fn details(record: &FlightRecord) -> String {
    let mut out = format!("Flight {}\n", record.id.as_deref().unwrap_or("(no id)"));
    for field in RecordField::ALL {
        out.push_str(&format!(
            "  {:<15} {}\n",
            format!("{}:", field.label()),
            record.get(field).unwrap_or("-")
        ));
    }
    out
}

pub fn criteria(criteria: &SearchCriteria) -> String {
    let or_any = |v: &str| if v.is_empty() { "(any)".to_string() } else { format!("{:?}", v) };
    format!(
        "  Search:         {}\n  Departure Date: {}\n  Departure Time: {}\n  Arrival Date:   {}\n  Arrival Time:   {}\n  Status:         {}\n",
        or_any(&criteria.query),
        or_any(&criteria.departure_date),
        or_any(&criteria.departure_time),
        or_any(&criteria.arrival_date),
        or_any(&criteria.arrival_time),
        criteria.status.map_or("(any)", |s| s.as_str()),
    )
}

pub fn statuses() -> String {
    FlightStatus::ALL
        .iter()
        .map(|s| format!("{}\n", s))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use flightdesk_core::session::SearchState;

    fn flight() -> FlightRecord {
        FlightRecord::new(
            "f1", "AA100", "JFK", "LAX", "2024-01-01T10:00", "10:00", "2024-01-01T14:00", "14:00",
            "On Time",
        )
    }

    #[test]
    fn test_results_distinguish_no_search_from_no_match() {
        let state = SearchState::new();
        assert_eq!(results(&state), format!("{}\n", NO_SEARCH));

        let (pending, ticket) = state
            .edit(flightdesk_core::session::CriteriaEdit::Query("zzz".to_string()))
            .begin_submit();
        let searched = pending.apply_fetched(ticket, vec![flight()]).unwrap();
        assert_eq!(results(&searched), format!("{}\n", NO_MATCHES));
    }

    #[test]
    fn test_results_table_has_count_footer() {
        let (pending, ticket) = SearchState::new().begin_submit();
        let state = pending.apply_fetched(ticket, vec![flight()]).unwrap();
        let text = results(&state);
        assert!(text.contains("AA100"));
        assert!(text.ends_with("1 of 1 flight(s)\n"));
    }

    #[test]
    fn test_details_show_full_values() {
        let text = details(&flight());
        assert!(text.starts_with("Flight f1"));
        assert!(text.contains("2024-01-01T10:00"));
        assert!(text.contains("Status:"));
    }

    #[test]
    fn test_statuses_lists_all_labels() {
        let text = statuses();
        assert_eq!(text.lines().count(), 11);
        assert!(text.contains("Gate Closed"));
    }
}
