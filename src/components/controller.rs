use std::cell::RefCell;
use std::rc::Rc;

use leptos::{spawn_local, SignalSet, WriteSignal};

use crate::api::SafestRouteClient;
use crate::config::AppConfig;
use crate::map::{LeafletSurface, MarkerSlot};
use crate::models::Coordinate;
use crate::session::{run_fetch, InFlight, Session, SessionSnapshot};

/// Glue between the page and the [`Session`]: every UI event goes through
/// here and the snapshot signal is refreshed afterwards.
#[derive(Clone)]
pub struct RouteController {
    session: Rc<RefCell<Session<LeafletSurface>>>,
    client: Rc<SafestRouteClient>,
    in_flight: Rc<InFlight<WriteSignal<bool>>>,
    config: Rc<RefCell<AppConfig>>,
    set_snapshot: WriteSignal<SessionSnapshot>,
}

impl RouteController {
    pub fn new(
        surface: LeafletSurface,
        config: AppConfig,
        set_snapshot: WriteSignal<SessionSnapshot>,
        set_is_loading: WriteSignal<bool>,
    ) -> Self {
        let mut session = Session::new(surface, config.auto_fetch);
        session.messages_mut().info("Map initialized");

        let controller = Self {
            session: Rc::new(RefCell::new(session)),
            client: Rc::new(SafestRouteClient::new(config.api_base_url.clone())),
            in_flight: Rc::new(InFlight::new(set_is_loading)),
            config: Rc::new(RefCell::new(config)),
            set_snapshot,
        };

        // The map lives as long as the page, so these handlers are never removed
        {
            let mut session = controller.session.borrow_mut();
            let on_click = controller.clone();
            session
                .surface_mut()
                .set_click_handler(move |at| on_click.map_clicked(at));
            let on_drag = controller.clone();
            session
                .surface_mut()
                .set_drag_handler(move |slot, at| on_drag.marker_dragged(slot, at));
            session.messages_mut().info("Safety Route app initialized");
        }

        controller.sync();
        controller
    }

    fn sync(&self) {
        let snapshot = self.session.borrow().snapshot();
        self.set_snapshot.set(snapshot);
    }

    /// Start a route request for the current fields
    pub fn fetch(&self) {
        let this = self.clone();
        spawn_local(async move {
            run_fetch(&this.session, this.client.as_ref(), this.in_flight.as_ref()).await;
            this.sync();
        });
    }

    fn map_clicked(&self, at: Coordinate) {
        let fetch = self.session.borrow_mut().map_clicked(at);
        self.sync();
        if fetch {
            self.fetch();
        }
    }

    fn marker_dragged(&self, slot: MarkerSlot, at: Coordinate) {
        let fetch = self.session.borrow_mut().marker_dragged(slot, at);
        self.sync();
        if fetch {
            self.fetch();
        }
    }

    pub fn swap_points(&self) {
        let fetch = self.session.borrow_mut().swap_points();
        self.sync();
        if fetch {
            self.fetch();
        }
    }

    pub fn clear_markers(&self) {
        self.session.borrow_mut().clear_markers();
        self.sync();
    }

    pub fn clear_routes(&self) {
        self.session.borrow_mut().clear_routes();
        self.sync();
    }

    pub fn select_route(&self, index: usize) {
        {
            let mut session = self.session.borrow_mut();
            if let Err(e) = session.select_route(index) {
                session.messages_mut().error(e.to_string());
            }
        }
        self.sync();
    }

    pub fn set_field_text(&self, slot: MarkerSlot, text: String) {
        self.session.borrow_mut().set_field_text(slot, text);
        self.sync();
    }

    pub fn clear_messages(&self) {
        self.session.borrow_mut().messages_mut().clear();
        self.sync();
    }

    /// Toggle auto-fetch and remember the choice for the next visit
    pub fn set_auto_fetch(&self, enabled: bool) {
        self.session.borrow_mut().set_auto_fetch(enabled);
        let mut config = self.config.borrow_mut();
        config.auto_fetch = enabled;
        if let Err(e) = config.save() {
            leptos::logging::warn!("Failed to save settings: {e}");
        }
    }
}
