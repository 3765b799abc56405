use std::io::Write;
use flightdesk_core::repository::FlightSource;
use flightdesk_core::session::{CriteriaEdit, SearchSession, SubmitOutcome};
use flightdesk_core::table::parse_column;
use flightdesk_core::RecordField;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use crate::error::CommandError;
use crate::render;

pub const HELP: &str = "\
Commands:
  query <text>      search flight number, origin or destination
  dep-date <text>   departure date contains, e.g. 2024-01-01
  dep-time <text>   departure time contains, e.g. 10:
  arr-date <text>   arrival date contains
  arr-time <text>   arrival time contains
  status [label]    exact status, e.g. Delayed; no label clears it
  search            fetch flights and apply the filters
  clear             reset all filters
  sort <column>     toggle sorting on a column
  open <row>        open the details of a result row
  show              print filters and results
  help              this text
  quit              leave
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Edit(CriteriaEdit),
    Search,
    Clear,
    Sort(RecordField),
    Open(usize),
    Show,
    Help,
    Quit,
}

/// `Ok(None)` for a blank line.
pub fn parse_command(line: &str) -> Result<Option<SessionCommand>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word {
        "query" | "q" => SessionCommand::Edit(CriteriaEdit::Query(rest.to_string())),
        "dep-date" => SessionCommand::Edit(CriteriaEdit::DepartureDate(rest.to_string())),
        "dep-time" => SessionCommand::Edit(CriteriaEdit::DepartureTime(rest.to_string())),
        "arr-date" => SessionCommand::Edit(CriteriaEdit::ArrivalDate(rest.to_string())),
        "arr-time" => SessionCommand::Edit(CriteriaEdit::ArrivalTime(rest.to_string())),
        "status" if rest.is_empty() => SessionCommand::Edit(CriteriaEdit::Status(None)),
        "status" => SessionCommand::Edit(CriteriaEdit::Status(Some(rest.parse()?))),
        "search" | "s" => SessionCommand::Search,
        "clear" => SessionCommand::Clear,
        "sort" if rest.is_empty() => {
            return Err(CommandError::MissingArgument {
                command: "sort",
                expected: "a column name",
            })
        }
        "sort" => SessionCommand::Sort(parse_column(rest)?),
        "open" => SessionCommand::Open(
            rest.parse()
                .map_err(|_| CommandError::InvalidRow(rest.to_string()))?,
        ),
        "show" => SessionCommand::Show,
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" => SessionCommand::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

/// Apply one command and return what to print.
pub async fn execute<S: FlightSource>(
    session: &mut SearchSession<S>,
    command: SessionCommand,
) -> Result<String, CommandError> {
    let output = match command {
        SessionCommand::Edit(edit) => {
            session.edit(edit);
            String::new()
        }
        SessionCommand::Search => match session.submit().await? {
            SubmitOutcome::Applied => render::results(session.state()),
            SubmitOutcome::FetchFailed => format!(
                "Could not fetch flights; keeping the previous results.\n{}",
                render::results(session.state())
            ),
        },
        SessionCommand::Clear => {
            session.clear_filters();
            render::criteria(&session.state().criteria)
        }
        SessionCommand::Sort(field) => {
            session.toggle_sort(field);
            render::results(session.state())
        }
        SessionCommand::Open(position) => {
            let nav = session.select_row(position)?;
            let mut out = format!("-> {}\n", nav.path);
            if let Some(record) = session.state().find(&nav.record_id) {
                out.push_str(&render::details(record));
            }
            out
        }
        SessionCommand::Show => format!(
            "{}\n{}",
            render::criteria(&session.state().criteria),
            render::results(session.state())
        ),
        SessionCommand::Help => HELP.to_string(),
        SessionCommand::Quit => String::new(),
    };
    Ok(output)
}

/// Read commands until `quit` or end of input. Command errors are printed
/// and the loop carries on.
pub async fn run<S, R, W>(
    session: &mut SearchSession<S>,
    input: R,
    out: &mut W,
) -> std::io::Result<()>
where
    S: FlightSource,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    writeln!(out, "Flight search. Type `help` for commands.")?;
    write!(out, "> ")?;
    out.flush()?;

    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Ok(None) => {}
            Ok(Some(SessionCommand::Quit)) => break,
            Ok(Some(command)) => match execute(session, command).await {
                Ok(text) => write!(out, "{}", text)?,
                Err(e) => writeln!(out, "error: {}", e)?,
            },
            Err(e) => writeln!(out, "error: {}", e)?,
        }
        write!(out, "> ")?;
        out.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flightdesk_core::{FlightRecord, FlightStatus};
    use flightdesk_store::StaticFlightSource;

    fn source() -> StaticFlightSource {
        StaticFlightSource::new(vec![
            FlightRecord::new(
                "f-aa100", "AA100", "JFK", "LAX", "2024-01-01T10:00", "10:00",
                "2024-01-01T14:00", "14:00", "On Time",
            ),
            FlightRecord::new(
                "f-ba200", "BA200", "LHR", "JFK", "2024-01-02T09:00", "09:00",
                "2024-01-02T17:00", "17:00", "Delayed",
            ),
        ])
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command("   ").unwrap(), None);
        assert_eq!(
            parse_command("query  new york ").unwrap(),
            Some(SessionCommand::Edit(CriteriaEdit::Query("new york".to_string())))
        );
        assert_eq!(
            parse_command("status Gate Closed").unwrap(),
            Some(SessionCommand::Edit(CriteriaEdit::Status(Some(FlightStatus::GateClosed))))
        );
        assert_eq!(
            parse_command("status").unwrap(),
            Some(SessionCommand::Edit(CriteriaEdit::Status(None)))
        );
        assert_eq!(
            parse_command("sort arrival time").unwrap(),
            Some(SessionCommand::Sort(RecordField::ArrivalTime))
        );
        assert_eq!(parse_command("open 2").unwrap(), Some(SessionCommand::Open(2)));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse_command("fly"), Err(CommandError::Unknown(_))));
        assert!(matches!(parse_command("status late"), Err(CommandError::Status(_))));
        assert!(matches!(parse_command("sort"), Err(CommandError::MissingArgument { .. })));
        assert!(matches!(parse_command("sort gate"), Err(CommandError::Core(_))));
        assert!(matches!(parse_command("open x"), Err(CommandError::InvalidRow(_))));
    }

    #[tokio::test]
    async fn test_scripted_session() {
        let mut session = SearchSession::new(source());
        let script = b"show\nquery jfk\nsearch\nsort origin\nsort origin\nopen 1\nopen 9\nclear\nbogus\nquit\nsearch\n";
        let mut out = Vec::new();

        run(&mut session, &script[..], &mut out).await.unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains(render::NO_SEARCH));
        assert!(text.contains("2 of 2 flight(s)"));
        assert!(text.contains("Origin ↓"));
        // Descending by origin puts LHR (BA200) first.
        assert!(text.contains("-> /flight-details/f-ba200"));
        assert!(text.contains("error: Row 9 is out of range (2 rows displayed)"));
        assert!(text.contains("error: Unknown command \"bogus\""));

        // Clear kept the results; quit stopped before the last search.
        let state = session.state();
        assert!(state.criteria.is_unconstrained());
        assert!(state.has_searched);
        assert_eq!(state.results.len(), 2);
    }

    #[tokio::test]
    async fn test_open_before_search_is_an_error() {
        let mut session = SearchSession::new(source());
        let err = execute(&mut session, SessionCommand::Open(1)).await.unwrap_err();
        assert!(matches!(err, CommandError::Search(_)));
    }
}
