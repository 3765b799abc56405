use std::path::PathBuf;
use clap::{Args, Parser, Subcommand};
use flightdesk_core::search::SearchCriteria;
use flightdesk_core::table::{parse_column, SortBy};
use flightdesk_core::{FlightStatus, RecordField};

#[derive(Debug, Parser)]
#[command(name = "flightdesk", version, about = "Search flights published by the flights service")]
pub struct Cli {
    /// Directory holding default/<RUN_MODE>/local config files.
    #[arg(long, global = true, default_value = "config")]
    pub config: PathBuf,

    /// Override `source.base_url`, e.g. http://localhost:5000/api
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Read flights from a JSON file instead of the service.
    #[arg(long, global = true)]
    pub data_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run one search and print the results table.
    Search(SearchArgs),
    /// Interactive search form driven by commands on stdin.
    Session,
    /// Show the details of one flight.
    Show {
        /// Flight id as shown in the details path.
        id: String,
    },
    /// List the selectable flight statuses.
    Statuses,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Matches flight number, origin or destination (case-insensitive).
    #[arg(short, long, default_value = "")]
    pub query: String,
    #[arg(long, default_value = "")]
    pub departure_date: String,
    #[arg(long, default_value = "")]
    pub departure_time: String,
    #[arg(long, default_value = "")]
    pub arrival_date: String,
    #[arg(long, default_value = "")]
    pub arrival_time: String,
    /// Exact status label, e.g. "Gate Closed".
    #[arg(long, value_parser = parse_status)]
    pub status: Option<FlightStatus>,
    /// Column to sort by.
    #[arg(long, value_parser = parse_column)]
    pub sort: Option<RecordField>,
    /// Sort descending (with --sort).
    #[arg(long, requires = "sort")]
    pub desc: bool,
    /// Print matching records as JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

impl SearchArgs {
    pub fn criteria(&self) -> SearchCriteria {
        SearchCriteria {
            query: self.query.clone(),
            departure_date: self.departure_date.clone(),
            departure_time: self.departure_time.clone(),
            arrival_date: self.arrival_date.clone(),
            arrival_time: self.arrival_time.clone(),
            status: self.status,
        }
    }

    pub fn sort_by(&self) -> Option<SortBy> {
        self.sort.map(|field| {
            if self.desc {
                SortBy::descending(field)
            } else {
                SortBy::ascending(field)
            }
        })
    }
}

fn parse_status(s: &str) -> Result<FlightStatus, flightdesk_shared::UnknownStatus> {
    s.parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_search_args() {
        let cli = Cli::try_parse_from([
            "flightdesk",
            "--base-url",
            "http://flights.test/api",
            "search",
            "-q",
            "jfk",
            "--status",
            "Gate Closed",
            "--sort",
            "departure-date",
            "--desc",
        ])
        .unwrap();

        assert_eq!(cli.base_url.as_deref(), Some("http://flights.test/api"));
        let Command::Search(args) = cli.command else {
            panic!("expected search command");
        };
        let criteria = args.criteria();
        assert_eq!(criteria.query, "jfk");
        assert_eq!(criteria.status, Some(FlightStatus::GateClosed));
        assert_eq!(args.sort_by(), Some(SortBy::descending(RecordField::DepartureDate)));
    }

    #[test]
    fn test_rejects_unknown_status() {
        let err = Cli::try_parse_from(["flightdesk", "search", "--status", "late"]).unwrap_err();
        assert!(err.to_string().contains("late"));
    }

    #[test]
    fn test_desc_requires_sort() {
        assert!(Cli::try_parse_from(["flightdesk", "search", "--desc"]).is_err());
    }
}
