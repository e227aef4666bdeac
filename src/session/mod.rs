//! Orchestration of the route view: user actions come in, the map,
//! scoreboard and message log are kept consistent.

mod in_flight;

pub use in_flight::{BusyIndicator, InFlight, InFlightGuard};

use std::cell::RefCell;

use thiserror::Error;

use crate::api::RouteSource;
use crate::constants::MAX_DRAWN_ROUTES;
use crate::error::{EndpointError, ParseError, RangeError};
use crate::map::{MapSurface, MarkerSlot};
use crate::markers::{MarkerController, MarkerEffect};
use crate::models::{parse_coordinate, Coordinate, Message, MessageLog, RankedResult, SelectionState};
use crate::render::{self, ScoreboardRow};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("Provide start and end coordinates")]
    MissingInput,
    #[error("Start: {0}")]
    InvalidStart(ParseError),
    #[error("End: {0}")]
    InvalidEnd(ParseError),
    #[error(transparent)]
    Endpoint(#[from] EndpointError),
    #[error(transparent)]
    Range(#[from] RangeError),
}

/// Identifies one route request; only the latest ticket may install results
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FetchTicket {
    generation: u64,
    start: Coordinate,
    end: Coordinate,
}

impl FetchTicket {
    #[must_use]
    pub const fn start(&self) -> Coordinate {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> Coordinate {
        self.end
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Installed { routes: usize },
    /// A newer request or an endpoint edit made this response obsolete
    Superseded,
    Failed(SessionError),
}

/// Everything the page needs to draw its non-map parts
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionSnapshot {
    pub start_text: String,
    pub end_text: String,
    pub rows: Vec<ScoreboardRow>,
    pub messages: Vec<Message>,
}

pub struct Session<S: MapSurface> {
    surface: S,
    selection: SelectionState,
    markers: MarkerController,
    messages: MessageLog,
    scoreboard: Vec<ScoreboardRow>,
    auto_fetch: bool,
    generation: u64,
}

impl<S: MapSurface> Session<S> {
    pub fn new(surface: S, auto_fetch: bool) -> Self {
        Self {
            surface,
            selection: SelectionState::new(),
            markers: MarkerController::new(),
            messages: MessageLog::default(),
            scoreboard: Vec::new(),
            auto_fetch,
            generation: 0,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn markers(&self) -> &MarkerController {
        &self.markers
    }

    pub fn messages(&self) -> &MessageLog {
        &self.messages
    }

    pub fn messages_mut(&mut self) -> &mut MessageLog {
        &mut self.messages
    }

    pub fn scoreboard(&self) -> &[ScoreboardRow] {
        &self.scoreboard
    }

    pub fn auto_fetch(&self) -> bool {
        self.auto_fetch
    }

    pub fn set_auto_fetch(&mut self, enabled: bool) {
        self.auto_fetch = enabled;
    }

    /// Validate both fields and issue a ticket for a new request.
    ///
    /// # Errors
    ///
    /// Returns `MissingInput` when a field is empty and `InvalidStart` /
    /// `InvalidEnd` when one does not parse. The error is also logged to the
    /// message panel.
    pub fn prepare_fetch(&mut self) -> Result<FetchTicket, SessionError> {
        match self.read_endpoints() {
            Ok((start, end)) => {
                self.generation += 1;
                self.messages.info(format!("Requesting routes {start} -> {end}"));
                Ok(FetchTicket {
                    generation: self.generation,
                    start,
                    end,
                })
            }
            Err(e) => {
                self.messages.error(e.to_string());
                Err(e)
            }
        }
    }

    fn read_endpoints(&self) -> Result<(Coordinate, Coordinate), SessionError> {
        let start = self.markers.text(MarkerSlot::Start).trim();
        let end = self.markers.text(MarkerSlot::End).trim();
        if start.is_empty() || end.is_empty() {
            return Err(SessionError::MissingInput);
        }
        let start = parse_coordinate(start).map_err(SessionError::InvalidStart)?;
        let end = parse_coordinate(end).map_err(SessionError::InvalidEnd)?;
        Ok((start, end))
    }

    /// Apply the response for `ticket`. Failures leave routes and markers
    /// untouched; responses for superseded tickets are dropped.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<RankedResult, EndpointError>,
    ) -> FetchOutcome {
        if ticket.generation != self.generation {
            crate::log!("Dropping response for superseded request #{}", ticket.generation);
            return FetchOutcome::Superseded;
        }

        match result {
            Ok(ranked) => {
                let routes = ranked.len();
                if ranked.is_empty() {
                    self.messages.error("No ranked routes");
                } else {
                    self.messages.info("Routes computed");
                    self.messages.info(ranked.summary(MAX_DRAWN_ROUTES));
                }
                render::release_layers(&mut self.selection, &mut self.surface);
                self.selection.install(ranked);
                self.rerender();
                FetchOutcome::Installed { routes }
            }
            Err(e) => {
                let e = SessionError::from(e);
                self.messages.error(e.to_string());
                FetchOutcome::Failed(e)
            }
        }
    }

    /// Make a scoreboard row the active route
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Range` if `index` does not name a route.
    pub fn select_route(&mut self, index: usize) -> Result<(), SessionError> {
        self.selection.select_index(index)?;
        self.rerender();
        Ok(())
    }

    /// Remove drawn routes and the scoreboard. Any request still in flight
    /// is superseded.
    pub fn clear_routes(&mut self) {
        self.supersede_in_flight();
        render::release_layers(&mut self.selection, &mut self.surface);
        self.selection.clear();
        self.rerender();
    }

    /// Returns true when a route fetch should follow
    pub fn map_clicked(&mut self, at: Coordinate) -> bool {
        let effect = self.markers.on_map_click(&mut self.surface, at, self.auto_fetch);
        self.apply(effect)
    }

    /// Returns true when a route fetch should follow
    pub fn marker_dragged(&mut self, slot: MarkerSlot, at: Coordinate) -> bool {
        let effect = self.markers.on_drag_end(slot, at, self.auto_fetch);
        self.apply(effect)
    }

    /// Returns true when a route fetch should follow
    pub fn swap_points(&mut self) -> bool {
        let effect = self.markers.swap(&mut self.surface, self.auto_fetch);
        self.apply(effect)
    }

    pub fn clear_markers(&mut self) {
        let effect = self.markers.clear_markers(&mut self.surface);
        let _ = self.apply(effect);
        self.messages.info("Markers cleared");
    }

    /// Typed input. Drawn routes stay, but a request still in flight for
    /// the previous text is superseded.
    pub fn set_field_text(&mut self, slot: MarkerSlot, text: impl Into<String>) {
        let text = text.into();
        if self.markers.text(slot) != text {
            self.supersede_in_flight();
            self.markers.set_text(slot, text);
        }
    }

    // Every marker interaction moves an endpoint
    fn apply(&mut self, effect: MarkerEffect) -> bool {
        self.supersede_in_flight();
        if effect.routes_stale {
            self.clear_routes();
        }
        effect.fetch_requested
    }

    fn supersede_in_flight(&mut self) {
        self.generation += 1;
    }

    fn rerender(&mut self) {
        self.scoreboard = render::render(&mut self.selection, &mut self.surface);
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            start_text: self.markers.text(MarkerSlot::Start).to_string(),
            end_text: self.markers.text(MarkerSlot::End).to_string(),
            rows: self.scoreboard.clone(),
            messages: self.messages.iter().cloned().collect(),
        }
    }
}

/// Run one user-triggered fetch from validation to render.
///
/// The session is only borrowed before and after the request, never across
/// the await, so other events can be handled while it is in flight. The
/// busy indicator is held for exactly the duration of the request.
/// Returns `None` if the fields did not validate.
pub async fn run_fetch<S, R, B>(
    session: &RefCell<Session<S>>,
    source: &R,
    in_flight: &InFlight<B>,
) -> Option<FetchOutcome>
where
    S: MapSurface,
    R: RouteSource,
    B: BusyIndicator,
{
    let ticket = session.borrow_mut().prepare_fetch().ok()?;
    let _guard = in_flight.acquire();
    let result = source.fetch_safest_routes(ticket.start(), ticket.end()).await;
    Some(session.borrow_mut().complete_fetch(ticket, result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::interpret_response;
    use crate::map::fake::FakeSurface;
    use crate::models::route::tests::ranked;
    use crate::models::MessageLevel;
    use futures::executor::block_on;
    use std::cell::Cell;

    struct MockSource<'a> {
        response: Result<RankedResult, EndpointError>,
        in_flight: Option<&'a InFlight<Cell<bool>>>,
        busy_during_request: Cell<bool>,
        requests: RefCell<Vec<(Coordinate, Coordinate)>>,
    }

    impl<'a> MockSource<'a> {
        fn new(response: Result<RankedResult, EndpointError>) -> Self {
            Self {
                response,
                in_flight: None,
                busy_during_request: Cell::new(false),
                requests: RefCell::new(Vec::new()),
            }
        }

        fn watching(mut self, in_flight: &'a InFlight<Cell<bool>>) -> Self {
            self.in_flight = Some(in_flight);
            self
        }
    }

    impl RouteSource for MockSource<'_> {
        async fn fetch_safest_routes(
            &self,
            start: Coordinate,
            end: Coordinate,
        ) -> Result<RankedResult, EndpointError> {
            self.requests.borrow_mut().push((start, end));
            if let Some(in_flight) = self.in_flight {
                self.busy_during_request.set(in_flight.indicator().get());
            }
            self.response.clone()
        }
    }

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).expect("valid coordinate")
    }

    fn session_with_fields(start: &str, end: &str) -> Session<FakeSurface> {
        let mut session = Session::new(FakeSurface::default(), false);
        session.set_field_text(MarkerSlot::Start, start);
        session.set_field_text(MarkerSlot::End, end);
        session
    }

    fn last_message(session: &Session<FakeSurface>) -> (MessageLevel, String) {
        let message = session.messages().last().expect("message recorded");
        (message.level, message.text.clone())
    }

    #[test]
    fn test_fetch_installs_three_ranked_routes() {
        let session = RefCell::new(session_with_fields("30.1,76.1", "30.2,76.2"));
        let source = MockSource::new(Ok(ranked(&[1.2, 3.4, 5.6])));
        let in_flight = InFlight::new(Cell::new(false));

        let outcome = block_on(run_fetch(&session, &source, &in_flight));

        assert_eq!(outcome, Some(FetchOutcome::Installed { routes: 3 }));
        let session = session.borrow();
        assert_eq!(session.selection().active_index(), Some(0));
        let rows: Vec<(usize, &str)> = session
            .scoreboard()
            .iter()
            .map(|r| (r.rank, r.score.as_str()))
            .collect();
        assert_eq!(rows, vec![(1, "1.20"), (2, "3.40"), (3, "5.60")]);
        assert_eq!(session.surface().polylines.len(), 3);
        assert_eq!(
            source.requests.borrow().as_slice(),
            &[(coord(30.1, 76.1), coord(30.2, 76.2))]
        );
    }

    #[test]
    fn test_fetch_from_decoded_payload() {
        let body = r#"{"ranked_routes": [
            {"score": 1.2, "distance": 1000, "time": 60000, "route": {"points": {"coordinates": [[76.1, 30.1]]}}},
            {"score": 3.4, "distance": 2000, "time": 120000, "route": {"points": {"coordinates": [[76.2, 30.2]]}}},
            {"score": 5.6, "distance": 3000, "time": 180000, "route": {"points": {"coordinates": [[76.3, 30.3]]}}}
        ]}"#;
        let session = RefCell::new(session_with_fields("30.1,76.1", "30.3,76.3"));
        let source = MockSource::new(interpret_response(200, body));
        let in_flight = InFlight::new(Cell::new(false));

        block_on(run_fetch(&session, &source, &in_flight));

        let session = session.borrow();
        let summary = session.messages().last().expect("summary").text.clone();
        assert_eq!(
            summary,
            "#1 score=1.20 dist 1.00km | #2 score=3.40 dist 2.00km | #3 score=5.60 dist 3.00km"
        );
        let minutes: Vec<&str> = session.scoreboard().iter().map(|r| r.duration_min.as_str()).collect();
        assert_eq!(minutes, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_application_error_leaves_state_untouched() {
        let session = RefCell::new(session_with_fields("30.1,76.1", "30.2,76.2"));
        let in_flight = InFlight::new(Cell::new(false));
        block_on(run_fetch(&session, &MockSource::new(Ok(ranked(&[1.0, 2.0]))), &in_flight));
        session.borrow_mut().select_route(1).expect("index in range");

        let failing = MockSource::new(interpret_response(200, r#"{"error": "No route between points"}"#));
        let outcome = block_on(run_fetch(&session, &failing, &in_flight));

        assert_eq!(
            outcome,
            Some(FetchOutcome::Failed(SessionError::Endpoint(EndpointError::Application(
                "No route between points".to_string()
            ))))
        );
        let session = session.borrow();
        assert_eq!(session.selection().ranked().len(), 2);
        assert_eq!(session.selection().active_index(), Some(1));
        assert_eq!(session.surface().polylines.len(), 2);
        assert_eq!(
            last_message(&session),
            (MessageLevel::Error, "No route between points".to_string())
        );
    }

    #[test]
    fn test_busy_indicator_released_after_failure() {
        let session = RefCell::new(session_with_fields("30.1,76.1", "30.2,76.2"));
        let in_flight = InFlight::new(Cell::new(false));
        let source = MockSource::new(Err(EndpointError::Transport { status: 502 })).watching(&in_flight);

        let outcome = block_on(run_fetch(&session, &source, &in_flight));

        assert!(matches!(outcome, Some(FetchOutcome::Failed(_))));
        assert!(source.busy_during_request.get());
        assert!(!in_flight.indicator().get());
        assert_eq!(
            last_message(&session.borrow()).1,
            "Request failed: HTTP 502"
        );
    }

    #[test]
    fn test_busy_indicator_released_after_success() {
        let session = RefCell::new(session_with_fields("30.1,76.1", "30.2,76.2"));
        let in_flight = InFlight::new(Cell::new(false));
        let source = MockSource::new(Ok(ranked(&[1.0]))).watching(&in_flight);

        block_on(run_fetch(&session, &source, &in_flight));

        assert!(source.busy_during_request.get());
        assert!(!in_flight.is_busy());
    }

    #[test]
    fn test_missing_input_never_reaches_endpoint() {
        let session = RefCell::new(session_with_fields("30.1,76.1", "  "));
        let in_flight = InFlight::new(Cell::new(false));
        let source = MockSource::new(Ok(ranked(&[1.0])));

        let outcome = block_on(run_fetch(&session, &source, &in_flight));

        assert_eq!(outcome, None);
        assert!(source.requests.borrow().is_empty());
        assert_eq!(
            last_message(&session.borrow()),
            (MessageLevel::Error, "Provide start and end coordinates".to_string())
        );
    }

    #[test]
    fn test_malformed_input_is_reported_per_field() {
        let mut session = session_with_fields("30.1;76.1", "30.2,76.2");
        assert!(matches!(
            session.prepare_fetch(),
            Err(SessionError::InvalidStart(ParseError::Format { .. }))
        ));

        session.set_field_text(MarkerSlot::Start, "30.1,76.1");
        session.set_field_text(MarkerSlot::End, "north,76.2");
        assert!(matches!(
            session.prepare_fetch(),
            Err(SessionError::InvalidEnd(ParseError::Numeric(_)))
        ));
    }

    #[test]
    fn test_empty_result_clears_routes() {
        let mut session = session_with_fields("30.1,76.1", "30.2,76.2");
        let ticket = session.prepare_fetch().expect("valid fields");
        session.complete_fetch(ticket, Ok(ranked(&[1.0, 2.0])));

        let ticket = session.prepare_fetch().expect("valid fields");
        let outcome = session.complete_fetch(ticket, Ok(RankedResult::default()));

        assert_eq!(outcome, FetchOutcome::Installed { routes: 0 });
        assert_eq!(session.selection().active_index(), None);
        assert!(session.surface().polylines.is_empty());
        assert!(session.scoreboard().is_empty());
        assert_eq!(last_message(&session), (MessageLevel::Error, "No ranked routes".to_string()));
    }

    #[test]
    fn test_older_response_is_dropped() {
        let mut session = session_with_fields("30.1,76.1", "30.2,76.2");
        let first = session.prepare_fetch().expect("valid fields");
        let second = session.prepare_fetch().expect("valid fields");

        let newer = session.complete_fetch(second, Ok(ranked(&[1.0])));
        let older = session.complete_fetch(first, Ok(ranked(&[5.0, 6.0, 7.0])));

        assert_eq!(newer, FetchOutcome::Installed { routes: 1 });
        assert_eq!(older, FetchOutcome::Superseded);
        assert_eq!(session.selection().ranked().len(), 1);
        assert_eq!(session.surface().polylines.len(), 1);
    }

    #[test]
    fn test_endpoint_edit_supersedes_in_flight_request() {
        let mut session = Session::new(FakeSurface::default(), false);
        assert!(!session.map_clicked(coord(30.1, 76.1)));
        assert!(!session.map_clicked(coord(30.2, 76.2)));
        let ticket = session.prepare_fetch().expect("valid fields");

        let _ = session.map_clicked(coord(30.3, 76.3));
        let outcome = session.complete_fetch(ticket, Ok(ranked(&[1.0])));

        assert_eq!(outcome, FetchOutcome::Superseded);
        assert!(session.selection().ranked().is_empty());
        assert!(session.surface().polylines.is_empty());
    }

    #[test]
    fn test_drag_supersedes_in_flight_request_but_keeps_routes() {
        let mut session = Session::new(FakeSurface::default(), false);
        let _ = session.map_clicked(coord(30.1, 76.1));
        let _ = session.map_clicked(coord(30.2, 76.2));
        let ticket = session.prepare_fetch().expect("valid fields");
        session.complete_fetch(ticket, Ok(ranked(&[1.0])));

        let ticket = session.prepare_fetch().expect("valid fields");
        assert!(!session.marker_dragged(MarkerSlot::Start, coord(30.9, 76.9)));
        let outcome = session.complete_fetch(ticket, Ok(ranked(&[1.0, 2.0])));

        assert_eq!(outcome, FetchOutcome::Superseded);
        assert_eq!(session.selection().ranked().len(), 1);
        assert_eq!(session.surface().polylines.len(), 1);
    }

    #[test]
    fn test_typed_edit_supersedes_in_flight_request() {
        let mut session = session_with_fields("30.1,76.1", "30.2,76.2");
        let ticket = session.prepare_fetch().expect("valid fields");

        session.set_field_text(MarkerSlot::End, "31.5,77.5");
        let outcome = session.complete_fetch(ticket, Ok(ranked(&[1.0])));

        assert_eq!(outcome, FetchOutcome::Superseded);
        assert!(session.selection().ranked().is_empty());
    }

    #[test]
    fn test_unchanged_text_keeps_request_current() {
        let mut session = session_with_fields("30.1,76.1", "30.2,76.2");
        let ticket = session.prepare_fetch().expect("valid fields");

        session.set_field_text(MarkerSlot::End, "30.2,76.2");
        let outcome = session.complete_fetch(ticket, Ok(ranked(&[1.0])));

        assert_eq!(outcome, FetchOutcome::Installed { routes: 1 });
    }

    #[test]
    fn test_select_route_rerenders() {
        let mut session = session_with_fields("30.1,76.1", "30.2,76.2");
        let ticket = session.prepare_fetch().expect("valid fields");
        session.complete_fetch(ticket, Ok(ranked(&[1.0, 2.0, 3.0, 4.0])));

        session.select_route(3).expect("index in range");
        assert!(session.scoreboard()[3].active);
        assert!(!session.scoreboard()[0].active);

        let err = session.select_route(4).expect_err("Expected error");
        assert_eq!(err, SessionError::Range(RangeError { index: 4, len: 4 }));
        assert_eq!(session.selection().active_index(), Some(3));
    }

    #[test]
    fn test_second_click_clears_drawn_routes() {
        let mut session = Session::new(FakeSurface::default(), true);
        assert!(!session.map_clicked(coord(30.1, 76.1)));
        assert!(session.map_clicked(coord(30.2, 76.2)));
        let ticket = session.prepare_fetch().expect("valid fields");
        session.complete_fetch(ticket, Ok(ranked(&[1.0, 2.0])));
        assert_eq!(session.surface().polylines.len(), 2);

        assert!(session.map_clicked(coord(30.3, 76.3)));

        assert!(session.surface().polylines.is_empty());
        assert!(session.scoreboard().is_empty());
        assert_eq!(session.surface().markers.len(), 2);
    }

    #[test]
    fn test_swap_points_clears_routes_and_swaps_fields() {
        let mut session = session_with_fields("30.1,76.1", "30.2,76.2");
        let ticket = session.prepare_fetch().expect("valid fields");
        session.complete_fetch(ticket, Ok(ranked(&[1.0])));

        assert!(!session.swap_points());

        let snapshot = session.snapshot();
        assert_eq!(snapshot.start_text, "30.2,76.2");
        assert_eq!(snapshot.end_text, "30.1,76.1");
        assert!(snapshot.rows.is_empty());
        assert!(session.surface().polylines.is_empty());
        assert_eq!(session.surface().marker_at(MarkerSlot::Start), vec![coord(30.2, 76.2)]);
        assert_eq!(session.surface().marker_at(MarkerSlot::End), vec![coord(30.1, 76.1)]);
    }

    #[test]
    fn test_drag_with_auto_fetch_requests_fetch() {
        let mut session = Session::new(FakeSurface::default(), true);
        let _ = session.map_clicked(coord(30.1, 76.1));
        let _ = session.map_clicked(coord(30.2, 76.2));

        assert!(session.marker_dragged(MarkerSlot::Start, coord(30.05, 76.05)));
        assert_eq!(session.markers().text(MarkerSlot::Start), "30.050000,76.050000");

        session.set_auto_fetch(false);
        assert!(!session.marker_dragged(MarkerSlot::Start, coord(30.06, 76.05)));
    }

    #[test]
    fn test_clear_markers_resets_view() {
        let mut session = Session::new(FakeSurface::default(), false);
        let _ = session.map_clicked(coord(30.1, 76.1));
        let _ = session.map_clicked(coord(30.2, 76.2));
        let ticket = session.prepare_fetch().expect("valid fields");
        session.complete_fetch(ticket, Ok(ranked(&[1.0])));

        session.clear_markers();

        let snapshot = session.snapshot();
        assert_eq!(snapshot.start_text, "");
        assert_eq!(snapshot.end_text, "");
        assert!(snapshot.rows.is_empty());
        assert!(session.surface().markers.is_empty());
        assert!(session.surface().polylines.is_empty());
        assert_eq!(last_message(&session), (MessageLevel::Info, "Markers cleared".to_string()));
    }

    #[test]
    fn test_clear_routes_keeps_markers() {
        let mut session = Session::new(FakeSurface::default(), false);
        let _ = session.map_clicked(coord(30.1, 76.1));
        let _ = session.map_clicked(coord(30.2, 76.2));
        let ticket = session.prepare_fetch().expect("valid fields");
        session.complete_fetch(ticket, Ok(ranked(&[1.0, 2.0])));

        session.clear_routes();

        assert!(session.surface().polylines.is_empty());
        assert_eq!(session.selection().active_index(), None);
        assert_eq!(session.surface().markers.len(), 2);
    }
}
