//! Async fetch driver: network work runs on spawned tasks, results are sent
//! back over an mpsc channel to whoever owns the [`Widget`].

use std::sync::Arc;

use tokio::{sync::mpsc, task::JoinHandle};
use tracing::debug;

use crate::{
    WeatherSource,
    widget::{FetchOutcome, FetchRequest, Widget},
};

/// Messages sent from fetch tasks back to the widget owner.
#[derive(Debug)]
pub enum WidgetMessage {
    FetchDone(FetchOutcome),
}

/// Perform the network call for `request`.
pub async fn run_fetch(source: &dyn WeatherSource, request: &FetchRequest) -> FetchOutcome {
    request.complete(source.fetch_weather(&request.city).await)
}

/// Run `request` on a tokio task and post `FetchDone` on `tx` when finished.
///
/// If the receiver is gone (widget unmounted) the outcome is dropped.
pub fn spawn_fetch(
    tx: &mpsc::UnboundedSender<WidgetMessage>,
    source: Arc<dyn WeatherSource>,
    request: FetchRequest,
) -> JoinHandle<()> {
    let tx = tx.clone();
    tokio::spawn(async move {
        let outcome = run_fetch(source.as_ref(), &request).await;
        if tx.send(WidgetMessage::FetchDone(outcome)).is_err() {
            debug!(generation = request.generation, "widget is gone, dropping fetch outcome");
        }
    })
}

/// Owns a [`Widget`] together with its weather source and message channel.
#[derive(Debug)]
pub struct WidgetHost {
    widget: Widget,
    source: Arc<dyn WeatherSource>,
    tx: mpsc::UnboundedSender<WidgetMessage>,
    rx: mpsc::UnboundedReceiver<WidgetMessage>,
}

impl WidgetHost {
    pub fn new(widget: Widget, source: Arc<dyn WeatherSource>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { widget, source, tx, rx }
    }

    pub fn widget(&self) -> &Widget {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut Widget {
        &mut self.widget
    }

    /// Start the automatic search for the default city.
    pub fn mount(&mut self) {
        let request = self.widget.mount();
        spawn_fetch(&self.tx, self.source.clone(), request);
    }

    /// Submit the current query. Returns `false` if it was blank.
    pub fn submit(&mut self) -> bool {
        match self.widget.submit() {
            Some(request) => {
                spawn_fetch(&self.tx, self.source.clone(), request);
                true
            }
            None => false,
        }
    }

    /// Wait for the next finished fetch and apply it.
    ///
    /// Returns whether it was applied, or `None` if the channel closed.
    pub async fn next_outcome(&mut self) -> Option<bool> {
        let WidgetMessage::FetchDone(outcome) = self.rx.recv().await?;
        Some(self.widget.apply(outcome))
    }

    /// Apply outcomes until the latest fetch has finished.
    pub async fn settle(&mut self) {
        while self.widget.is_loading() {
            if self.next_outcome().await.is_none() {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FetchError, WeatherSnapshot, render::View};
    use async_trait::async_trait;

    #[derive(Debug)]
    struct FixedSource;

    #[async_trait]
    impl WeatherSource for FixedSource {
        async fn fetch_weather(&self, city: &str) -> Result<WeatherSnapshot, FetchError> {
            if city == "Atlantis" {
                return Err(FetchError::Upstream("No matching location found.".into()));
            }
            Ok(WeatherSnapshot {
                city: city.to_string(),
                country: "India".into(),
                temperature_c: 25.5,
                condition: "Partly cloudy".into(),
                humidity_pct: 70,
                wind_kph: 12.0,
                icon_ref: "//cdn/116.png".into(),
            })
        }
    }

    #[tokio::test]
    async fn mount_seeds_default_city() {
        let mut host = WidgetHost::new(Widget::new("Mumbai"), Arc::new(FixedSource));
        host.mount();
        host.settle().await;

        match host.widget().view() {
            View::Snapshot { snapshot, .. } => assert_eq!(snapshot.city, "Mumbai"),
            other => panic!("expected snapshot, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn blank_submit_spawns_nothing() {
        let mut host = WidgetHost::new(Widget::new("Mumbai"), Arc::new(FixedSource));
        host.widget_mut().set_city_query("  ");

        assert!(!host.submit());
        assert!(!host.widget().is_loading());
        assert_eq!(host.widget().view(), View::Empty);
    }

    #[tokio::test]
    async fn upstream_failure_surfaces_as_error_view() {
        let mut host = WidgetHost::new(Widget::new("Mumbai"), Arc::new(FixedSource));
        host.mount();
        host.settle().await;

        host.widget_mut().set_city_query("Atlantis");
        assert!(host.submit());
        host.settle().await;

        assert_eq!(host.widget().view(), View::Error("No matching location found."));
        assert!(host.widget().state().weather.is_some());
    }

    #[tokio::test]
    async fn outcome_after_unmount_is_dropped() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);

        let mut widget = Widget::new("Mumbai");
        let request = widget.mount();
        let handle = spawn_fetch(&tx, Arc::new(FixedSource), request);

        handle.await.expect("fetch task must not panic");
    }
}
