//! View state and the transitions that drive it.
//!
//! [`Widget`] owns the [`ViewState`]. Starting a search hands out a
//! [`FetchRequest`] tagged with a generation number; the host performs the
//! network call (see [`crate::service`]) and feeds the resulting
//! [`FetchOutcome`] back through [`Widget::apply`]. Only the outcome of the
//! most recently started fetch is applied.

use tracing::{debug, info, warn};

use crate::{FetchError, WeatherSnapshot, render::View};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    pub city_query: String,
    pub weather: Option<WeatherSnapshot>,
    pub loading: bool,
    pub error: Option<String>,
}

/// A search that has been started and is waiting for its network call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub generation: u64,
    pub city: String,
}

/// Result of the network call for one [`FetchRequest`].
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub generation: u64,
    pub result: Result<WeatherSnapshot, FetchError>,
}

impl FetchRequest {
    pub fn complete(&self, result: Result<WeatherSnapshot, FetchError>) -> FetchOutcome {
        FetchOutcome { generation: self.generation, result }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Widget {
    state: ViewState,
    generation: u64,
}

impl Widget {
    pub fn new(default_city: impl Into<String>) -> Self {
        Self {
            state: ViewState { city_query: default_city.into(), ..ViewState::default() },
            generation: 0,
        }
    }

    /// Seed the automatic first search for the default city.
    pub fn mount(&mut self) -> FetchRequest {
        let city = self.state.city_query.clone();
        self.begin_fetch(city)
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Replace the query text verbatim.
    pub fn set_city_query(&mut self, text: impl Into<String>) {
        self.state.city_query = text.into();
    }

    /// Start a search for the trimmed query, or do nothing if it is blank.
    pub fn submit(&mut self) -> Option<FetchRequest> {
        let city = self.state.city_query.trim();
        if city.is_empty() {
            return None;
        }

        let city = city.to_string();
        Some(self.begin_fetch(city))
    }

    /// Enter the loading state for `city` and supersede any in-flight fetch.
    pub fn begin_fetch(&mut self, city: impl Into<String>) -> FetchRequest {
        self.generation += 1;
        self.state.loading = true;
        self.state.error = None;

        let request = FetchRequest { generation: self.generation, city: city.into() };
        info!(city = %request.city, generation = request.generation, "weather search started");
        request
    }

    /// Apply a finished fetch. Returns `false` if the outcome was stale.
    pub fn apply(&mut self, outcome: FetchOutcome) -> bool {
        if outcome.generation != self.generation {
            debug!(
                generation = outcome.generation,
                latest = self.generation,
                "discarding outcome of superseded fetch"
            );
            return false;
        }

        match outcome.result {
            Ok(snapshot) => {
                self.state.weather = Some(snapshot);
                self.state.error = None;
            }
            Err(err) => {
                warn!(kind = err.kind(), error = %err, "error fetching weather data");
                self.state.error = Some(err.user_message());
            }
        }
        self.state.loading = false;
        true
    }

    /// Clear the visible error, leaving everything else untouched.
    pub fn dismiss_error(&mut self) {
        self.state.error = None;
    }

    /// The host should not accept input while a fetch is running.
    pub fn input_enabled(&self) -> bool {
        !self.state.loading
    }

    pub fn is_loading(&self) -> bool {
        self.state.loading
    }

    pub fn view(&self) -> View<'_> {
        crate::render::select(
            self.state.loading,
            self.state.error.as_deref(),
            self.state.weather.as_ref(),
        )
    }
}
