//! Session lifecycle tests against a recording map surface and canned feed
//! transport. No network access.

use quake_viz::feed::{FeedClient, FeedLoader};
use quake_viz::layer::{BUBBLE_LAYER_ID, SYMBOL_LAYER_ID};
use quake_viz::model::QuakeCollection;
use quake_viz::session::{MapSessionController, MapSurface, SessionState, SOURCE_ID};
use quake_viz::{FetchError, MapOptions, SessionError};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

const SAMPLE_FEED: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {
            "type": "Feature",
            "properties": {"mag": 6.1, "place": "central Chile", "time": 1700000000000},
            "geometry": {"type": "Point", "coordinates": [-71.6, -33.0, 30.1]}
        },
        {
            "type": "Feature",
            "properties": {"mag": 4.8, "place": "Kermadec Islands", "time": 1700000100000},
            "geometry": {"type": "Point", "coordinates": [-177.9, -29.2, 10.0]}
        }
    ]
}"#;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

enum CannedResponse {
    Body(String),
    Unreachable,
}

struct CannedClient {
    response: CannedResponse,
}

impl FeedClient for CannedClient {
    async fn get(&self, _url: &str) -> Result<String, FetchError> {
        match &self.response {
            CannedResponse::Body(body) => Ok(body.clone()),
            CannedResponse::Unreachable => {
                Err(FetchError::Network("connection refused".to_string()))
            }
        }
    }
}

fn feed_ok() -> FeedLoader<CannedClient> {
    FeedLoader::with_client(CannedClient {
        response: CannedResponse::Body(SAMPLE_FEED.to_string()),
    })
}

fn feed_unreachable() -> FeedLoader<CannedClient> {
    FeedLoader::with_client(CannedClient {
        response: CannedResponse::Unreachable,
    })
}

/// What the surface was asked to do, in order.
#[derive(Debug, Default)]
struct Recorded {
    sources: Vec<String>,
    feature_counts: Vec<usize>,
    layer_ids: Vec<String>,
}

#[derive(Debug)]
struct RecordingSurface {
    recorded: Arc<Mutex<Recorded>>,
    ready_rx: Option<oneshot::Receiver<()>>,
}

impl RecordingSurface {
    /// A surface whose ready signal already fired.
    fn ready_now() -> (Self, Arc<Mutex<Recorded>>) {
        let (tx, rx) = oneshot::channel();
        tx.send(()).expect("receiver alive");
        let recorded = Arc::new(Mutex::new(Recorded::default()));
        (
            RecordingSurface {
                recorded: Arc::clone(&recorded),
                ready_rx: Some(rx),
            },
            recorded,
        )
    }

    /// A surface whose ready signal is controlled by the returned sender.
    fn pending() -> (Self, oneshot::Sender<()>, Arc<Mutex<Recorded>>) {
        let (tx, rx) = oneshot::channel();
        let recorded = Arc::new(Mutex::new(Recorded::default()));
        (
            RecordingSurface {
                recorded: Arc::clone(&recorded),
                ready_rx: Some(rx),
            },
            tx,
            recorded,
        )
    }
}

impl MapSurface for RecordingSurface {
    fn create(_options: &MapOptions) -> Result<Self, SessionError> {
        Ok(RecordingSurface::ready_now().0)
    }

    async fn ready(&mut self) -> Result<(), SessionError> {
        let Some(rx) = self.ready_rx.take() else {
            return Err(SessionError::SurfaceClosed);
        };
        rx.await.map_err(|_| SessionError::SurfaceClosed)
    }

    fn attach_source(&mut self, source_id: &str) -> Result<(), SessionError> {
        self.recorded
            .lock()
            .unwrap()
            .sources
            .push(source_id.to_string());
        Ok(())
    }

    fn set_features(
        &mut self,
        _source_id: &str,
        features: &QuakeCollection,
    ) -> Result<(), SessionError> {
        self.recorded
            .lock()
            .unwrap()
            .feature_counts
            .push(features.len());
        Ok(())
    }

    fn add_layers(&mut self, layers: Vec<quake_viz::LayerSpec>) -> Result<(), SessionError> {
        let mut recorded = self.recorded.lock().unwrap();
        for layer in &layers {
            recorded.layer_ids.push(layer.id().to_string());
        }
        Ok(())
    }
}

struct FailingSurface;

impl MapSurface for FailingSurface {
    fn create(_options: &MapOptions) -> Result<Self, SessionError> {
        Err(SessionError::Initialization(
            "no WebGL context".to_string(),
        ))
    }

    async fn ready(&mut self) -> Result<(), SessionError> {
        Err(SessionError::SurfaceClosed)
    }

    fn attach_source(&mut self, _source_id: &str) -> Result<(), SessionError> {
        Ok(())
    }

    fn set_features(
        &mut self,
        _source_id: &str,
        _features: &QuakeCollection,
    ) -> Result<(), SessionError> {
        Ok(())
    }

    fn add_layers(&mut self, _layers: Vec<quake_viz::LayerSpec>) -> Result<(), SessionError> {
        Ok(())
    }
}

#[tokio::test]
async fn session_reaches_active_with_features_and_layers() {
    init_tracing();
    let (surface, recorded) = RecordingSurface::ready_now();
    let controller =
        MapSessionController::with_loader(surface, feed_ok(), MapOptions::default());
    assert_eq!(controller.state(), SessionState::Uninitialized);

    let session = controller.run().await.unwrap();
    assert_eq!(session.state(), SessionState::Active);
    assert_eq!(session.features().len(), 2);
    assert_eq!(session.layer_ids(), [BUBBLE_LAYER_ID, SYMBOL_LAYER_ID]);

    let recorded = recorded.lock().unwrap();
    assert_eq!(recorded.sources, [SOURCE_ID]);
    assert_eq!(recorded.feature_counts, [2]);
    assert_eq!(recorded.layer_ids, [BUBBLE_LAYER_ID, SYMBOL_LAYER_ID]);
}

#[tokio::test]
async fn feed_failure_leaves_session_ready_and_empty() {
    init_tracing();
    let (surface, recorded) = RecordingSurface::ready_now();
    let controller =
        MapSessionController::with_loader(surface, feed_unreachable(), MapOptions::default());

    // No error propagates; the session recovers with an empty source.
    let session = controller.run().await.unwrap();
    assert_eq!(session.state(), SessionState::Ready);
    assert!(session.features().is_empty());
    assert!(session.layer_ids().is_empty());

    let recorded = recorded.lock().unwrap();
    assert_eq!(recorded.sources, [SOURCE_ID]);
    assert!(recorded.feature_counts.is_empty());
    assert!(recorded.layer_ids.is_empty());
}

#[tokio::test]
async fn aborting_before_ready_registers_nothing() {
    init_tracing();
    let (surface, ready_tx, recorded) = RecordingSurface::pending();
    let controller =
        MapSessionController::with_loader(surface, feed_ok(), MapOptions::default());

    let handle = tokio::spawn(controller.run());
    // Let the session park on the ready signal, then tear the host down.
    tokio::task::yield_now().await;
    handle.abort();
    let Err(join_error) = handle.await else {
        panic!("aborted session should not complete");
    };
    assert!(join_error.is_cancelled());

    let recorded = recorded.lock().unwrap();
    assert!(recorded.sources.is_empty());
    assert!(recorded.layer_ids.is_empty());
    drop(ready_tx);
}

#[tokio::test]
async fn surface_dropped_before_ready_is_an_error() {
    init_tracing();
    let (surface, ready_tx, recorded) = RecordingSurface::pending();
    drop(ready_tx);
    let controller =
        MapSessionController::with_loader(surface, feed_ok(), MapOptions::default());

    let error = controller.run().await.unwrap_err();
    assert!(matches!(error, SessionError::SurfaceClosed));
    assert!(recorded.lock().unwrap().sources.is_empty());
}

#[tokio::test]
async fn surface_construction_failure_is_fatal() {
    init_tracing();
    let result = MapSessionController::<FailingSurface>::create(MapOptions::default());
    assert!(matches!(
        result.map(|_| ()).unwrap_err(),
        SessionError::Initialization(_)
    ));
}
