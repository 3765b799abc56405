use std::io::Write;
use anyhow::{anyhow, bail, Context};
use flightdesk_core::repository::FlightSource;
use flightdesk_core::session::{SearchSession, SubmitOutcome};
use flightdesk_store::app_config::Config;
use flightdesk_store::{HttpFlightSource, StaticFlightSource};
use crate::cli::{Cli, SearchArgs};
use crate::{interactive, render};

/// File source when `--data-file` is given, the flights service otherwise.
pub async fn build_source(cli: &Cli, config: &Config) -> anyhow::Result<Box<dyn FlightSource>> {
    if let Some(path) = &cli.data_file {
        let source = StaticFlightSource::from_json_file(path)
            .await
            .with_context(|| format!("Failed to read flights from {}", path.display()))?;
        return Ok(Box::new(source));
    }

    let source = HttpFlightSource::new(&config.source).context("Failed to build HTTP client")?;
    tracing::info!("Using flights service at {}", source.url());
    Ok(Box::new(source))
}

pub async fn search<S: FlightSource, W: Write>(
    source: S,
    args: &SearchArgs,
    out: &mut W,
) -> anyhow::Result<()> {
    let mut session = SearchSession::new(source);
    session.set_criteria(args.criteria());
    session.set_sort(args.sort_by());

    if session.submit().await? == SubmitOutcome::FetchFailed {
        bail!("Could not fetch flights; no results to show");
    }

    let state = session.state();
    if args.json {
        serde_json::to_writer_pretty(&mut *out, &state.displayed_rows())?;
        writeln!(out)?;
    } else {
        write!(out, "{}", render::results(state))?;
    }
    Ok(())
}

pub async fn session<S: FlightSource, W: Write>(source: S, out: &mut W) -> anyhow::Result<()> {
    let mut session = SearchSession::new(source);
    session.load().await;

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    interactive::run(&mut session, stdin, out).await?;
    Ok(())
}

/// The details view a selected row navigates to.
pub async fn show<S: FlightSource, W: Write>(source: S, id: &str, out: &mut W) -> anyhow::Result<()> {
    let records = source
        .fetch_flights()
        .await
        .map_err(|e| anyhow!("Could not fetch flights: {}", e))?;

    let record = records
        .iter()
        .find(|r| r.id.as_deref() == Some(id))
        .ok_or_else(|| anyhow!("No flight with id {:?}", id))?;

    write!(out, "{}", render::details(record))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use flightdesk_core::FlightRecord;

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

    fn search_args(argv: &[&str]) -> SearchArgs {
        let mut full = vec!["flightdesk", "search"];
        full.extend_from_slice(argv);
        match Cli::parse_from(full).command {
            crate::cli::Command::Search(args) => args,
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_search_prints_table() {
        let mut out = Vec::new();
        search(source(), &search_args(&["--departure-date", "2024-01-01"]), &mut out)
            .await
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("AA100"));
        assert!(!text.contains("BA200"));
        assert!(text.contains("1 of 2 flight(s)"));
    }

    #[tokio::test]
    async fn test_search_json_is_sorted() {
        let mut out = Vec::new();
        let args = search_args(&["-q", "jfk", "--sort", "flightNumber", "--desc", "--json"]);
        search(source(), &args, &mut out).await.unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let numbers: Vec<&str> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["flightNumber"].as_str().unwrap())
            .collect();
        assert_eq!(numbers, vec!["BA200", "AA100"]);
        assert_eq!(value[0]["_id"], "f-ba200");
    }

    #[tokio::test]
    async fn test_show_known_and_unknown_id() {
        let mut out = Vec::new();
        show(source(), "f-ba200", &mut out).await.unwrap();
        assert!(String::from_utf8(out).unwrap().contains("LHR"));

        let mut out = Vec::new();
        assert!(show(source(), "nope", &mut out).await.is_err());
    }
}
