//! Core library for the `cityweather` widget.
//!
//! This crate defines:
//! - Configuration & API key handling
//! - The relay-backed weather source and its payload validation
//! - The view-state machine, view selection and icon categories
//! - An async driver that runs fetches off the owner's task
//!
//! It is used by `cityweather-cli`, but any host that can render a [`View`]
//! can mount a [`Widget`].

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod render;
pub mod service;
pub mod widget;

pub use config::{ApiKey, Config};
pub use error::FetchError;
pub use model::{IconCategory, WeatherSnapshot, categorize};
pub use provider::{WeatherSource, relay::RelayedWeatherApi, source_from_config};
pub use render::{View, select};
pub use service::{WidgetHost, WidgetMessage, spawn_fetch};
pub use widget::{FetchOutcome, FetchRequest, ViewState, Widget};
