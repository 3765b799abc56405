use flightdesk_shared::{FlightRecord, FlightStatus, RecordField};
use tracing::{error, info, warn};
use crate::repository::FlightSource;
use crate::search::{filter_flights, SearchCriteria};
use crate::table::{sort_rows, toggle_sort, SortBy};
use crate::CoreError;

/// A single edit to the search form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CriteriaEdit {
    Query(String),
    DepartureDate(String),
    DepartureTime(String),
    ArrivalDate(String),
    ArrivalTime(String),
    Status(Option<FlightStatus>),
}

/// Issued per submit; only the latest ticket may apply its fetch outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Where a row selection leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub record_id: String,
    pub path: String,
}

impl Navigation {
    pub fn flight_details(record_id: &str) -> Self {
        Self {
            record_id: record_id.to_string(),
            path: format!("/flight-details/{}", record_id),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Flight data violates the record contract: {0}")]
    DataContract(#[source] CoreError),
    #[error("No search has been performed yet")]
    NoSearch,
    #[error("Row {position} is out of range ({available} rows displayed)")]
    RowOutOfRange { position: usize, available: usize },
    #[error("Row {position} has no flight id to open")]
    MissingId { position: usize },
}

/// One immutable snapshot of the search screen. Every transition returns a
/// new snapshot and leaves `self` alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    pub records: Vec<FlightRecord>,
    pub criteria: SearchCriteria,
    pub results: Vec<FlightRecord>,
    pub has_searched: bool,
    pub sort: Option<SortBy>,
    last_ticket: u64,
    pending: Option<Ticket>,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Option<Ticket> {
        self.pending
    }

    /// Initial load: keep the snapshot, show nothing until a search runs.
    pub fn loaded(&self, records: Vec<FlightRecord>) -> Self {
        Self { records, ..self.clone() }
    }

    pub fn edit(&self, edit: CriteriaEdit) -> Self {
        let mut criteria = self.criteria.clone();
        match edit {
            CriteriaEdit::Query(v) => criteria.query = v,
            CriteriaEdit::DepartureDate(v) => criteria.departure_date = v,
            CriteriaEdit::DepartureTime(v) => criteria.departure_time = v,
            CriteriaEdit::ArrivalDate(v) => criteria.arrival_date = v,
            CriteriaEdit::ArrivalTime(v) => criteria.arrival_time = v,
            CriteriaEdit::Status(v) => criteria.status = v,
        }
        Self { criteria, ..self.clone() }
    }

    /// Replace the whole form at once.
    pub fn with_criteria(&self, criteria: SearchCriteria) -> Self {
        Self { criteria, ..self.clone() }
    }

    pub fn with_sort(&self, sort: Option<SortBy>) -> Self {
        Self { sort, ..self.clone() }
    }

    /// Reset the form. Results on screen and `has_searched` stay as they are.
    pub fn clear_filters(&self) -> Self {
        Self { criteria: SearchCriteria::default(), ..self.clone() }
    }

    pub fn toggle_sort(&self, field: RecordField) -> Self {
        Self { sort: toggle_sort(self.sort, field), ..self.clone() }
    }

    pub fn begin_submit(&self) -> (Self, Ticket) {
        let ticket = Ticket(self.last_ticket + 1);
        let next = Self {
            last_ticket: ticket.0,
            pending: Some(ticket),
            ..self.clone()
        };
        (next, ticket)
    }

    /// Filter the collection that was just fetched, not the stored one.
    ///
    /// Outcomes for any ticket other than the pending one are dropped.
    pub fn apply_fetched(
        &self,
        ticket: Ticket,
        records: Vec<FlightRecord>,
    ) -> Result<Self, SearchError> {
        if self.pending != Some(ticket) {
            warn!(?ticket, pending = ?self.pending, "Discarding stale flight snapshot");
            return Ok(self.clone());
        }

        let results = filter_flights(&records, &self.criteria).map_err(SearchError::DataContract)?;
        info!(
            fetched = records.len(),
            matched = results.len(),
            "Search completed"
        );

        Ok(Self {
            records,
            results,
            has_searched: true,
            pending: None,
            ..self.clone()
        })
    }

    /// A failed fetch changes nothing the user can see.
    pub fn apply_fetch_failure(
        &self,
        ticket: Ticket,
        err: &(dyn std::error::Error + Send + Sync),
    ) -> Self {
        error!("Error fetching flights: {}", err);
        if self.pending != Some(ticket) {
            return self.clone();
        }
        Self { pending: None, ..self.clone() }
    }

    /// Drop the pending submit without touching what is on screen.
    pub fn abandon(&self, ticket: Ticket) -> Self {
        if self.pending != Some(ticket) {
            return self.clone();
        }
        Self { pending: None, ..self.clone() }
    }

    /// Results in the order the table shows them.
    pub fn displayed_rows(&self) -> Vec<&FlightRecord> {
        sort_rows(&self.results, self.sort)
    }

    /// Row positions are 1-based, as printed.
    pub fn select_row(&self, position: usize) -> Result<Navigation, SearchError> {
        if !self.has_searched {
            return Err(SearchError::NoSearch);
        }
        let rows = self.displayed_rows();
        let record = position
            .checked_sub(1)
            .and_then(|i| rows.get(i))
            .ok_or(SearchError::RowOutOfRange { position, available: rows.len() })?;
        let id = record.id.as_deref().ok_or(SearchError::MissingId { position })?;
        Ok(Navigation::flight_details(id))
    }

    /// Look up a record from the latest snapshot by id.
    pub fn find(&self, record_id: &str) -> Option<&FlightRecord> {
        self.records
            .iter()
            .find(|r| r.id.as_deref() == Some(record_id))
    }
}

/// What a submit did to the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Applied,
    FetchFailed,
}

/// Drives a [`SearchState`] against a [`FlightSource`], one event at a time.
pub struct SearchSession<S> {
    source: S,
    state: SearchState,
}

impl<S: FlightSource> SearchSession<S> {
    pub fn new(source: S) -> Self {
        Self { source, state: SearchState::new() }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Startup fetch. Failures are logged and leave the session empty.
    pub async fn load(&mut self) {
        match self.source.fetch_flights().await {
            Ok(records) => {
                info!(count = records.len(), "Loaded flights");
                self.state = self.state.loaded(records);
            }
            Err(e) => error!("Error fetching flights: {}", e),
        }
    }

    pub fn edit(&mut self, edit: CriteriaEdit) {
        self.state = self.state.edit(edit);
    }

    pub fn set_criteria(&mut self, criteria: SearchCriteria) {
        self.state = self.state.with_criteria(criteria);
    }

    pub fn clear_filters(&mut self) {
        self.state = self.state.clear_filters();
    }

    pub fn set_sort(&mut self, sort: Option<SortBy>) {
        self.state = self.state.with_sort(sort);
    }

    pub fn toggle_sort(&mut self, field: RecordField) {
        self.state = self.state.toggle_sort(field);
    }

    /// Fetch, then filter what came back, in one step.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, SearchError> {
        let (pending, ticket) = self.state.begin_submit();
        self.state = pending;

        match self.source.fetch_flights().await {
            Ok(records) => match self.state.apply_fetched(ticket, records) {
                Ok(next) => {
                    self.state = next;
                    Ok(SubmitOutcome::Applied)
                }
                Err(e) => {
                    self.state = self.state.abandon(ticket);
                    Err(e)
                }
            },
            Err(e) => {
                self.state = self.state.apply_fetch_failure(ticket, e.as_ref());
                Ok(SubmitOutcome::FetchFailed)
            }
        }
    }

    pub fn select_row(&self, position: usize) -> Result<Navigation, SearchError> {
        self.state.select_row(position)
    }
}
