//! One-shot map session lifecycle: wait for the surface, attach the data
//! source, load the feed, register the rendering layers.

use crate::config::MapOptions;
use crate::error::SessionError;
use crate::feed::{FeedClient, FeedLoader, ReqwestClient};
use crate::layer::{BubbleLayer, LayerSpec, SymbolLayer};
use crate::model::QuakeCollection;
use std::future::Future;

/// Data source id the earthquake layers are bound to.
pub const SOURCE_ID: &str = "earthquakes";

/// The seam to the external map SDK. Construction, the one-shot ready
/// signal, and the source/layer surface area the session drives. Rendering,
/// projection and event plumbing all live behind this trait.
pub trait MapSurface: Send {
    fn create(options: &MapOptions) -> Result<Self, SessionError>
    where
        Self: Sized;

    /// Resolves once the surface has finished its internal setup. Fires at
    /// most once per surface.
    fn ready(&mut self) -> impl Future<Output = Result<(), SessionError>> + Send;

    fn attach_source(&mut self, source_id: &str) -> Result<(), SessionError>;

    fn set_features(
        &mut self,
        source_id: &str,
        features: &QuakeCollection,
    ) -> Result<(), SessionError>;

    fn add_layers(&mut self, layers: Vec<LayerSpec>) -> Result<(), SessionError>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Uninitialized,
    Ready,
    Active,
}

/// Drives one session from `Uninitialized` to its terminal state.
/// Reconfiguration means building a new controller; an `Active` session is
/// never mutated in place.
pub struct MapSessionController<S: MapSurface, C: FeedClient = ReqwestClient> {
    surface: S,
    loader: FeedLoader<C>,
    options: MapOptions,
    state: SessionState,
}

impl<S: MapSurface> MapSessionController<S, ReqwestClient> {
    /// Constructs the surface from the options and wraps it in a controller.
    /// A surface that fails to construct is fatal for the session.
    pub fn create(options: MapOptions) -> Result<Self, SessionError> {
        let surface = S::create(&options)?;
        Ok(MapSessionController::with_loader(
            surface,
            FeedLoader::new(),
            options,
        ))
    }
}

impl<S: MapSurface, C: FeedClient> MapSessionController<S, C> {
    pub fn with_loader(surface: S, loader: FeedLoader<C>, options: MapOptions) -> Self {
        MapSessionController {
            surface,
            loader,
            options,
            state: SessionState::Uninitialized,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Runs the one-time setup sequence. Dropping the returned future before
    /// the surface signals ready abandons the session: no feed fetch
    /// completes and no layer is registered against it.
    pub async fn run(mut self) -> Result<MapSession<S>, SessionError> {
        if self.state != SessionState::Uninitialized {
            return Err(SessionError::AlreadyStarted);
        }

        self.surface.ready().await?;
        self.state = SessionState::Ready;
        tracing::debug!("map surface ready");

        self.surface.attach_source(SOURCE_ID)?;

        let features = match self.loader.load(&self.options.feed_url).await {
            Ok(collection) => collection,
            Err(error) => {
                // Recovered locally: the session stays Ready with an empty
                // data source and no layers. No retry.
                tracing::warn!(error = %error, "earthquake feed load failed");
                return Ok(MapSession {
                    surface: self.surface,
                    features: QuakeCollection::default(),
                    layer_ids: Vec::new(),
                    state: SessionState::Ready,
                });
            }
        };
        self.surface.set_features(SOURCE_ID, &features)?;

        let layers = vec![
            LayerSpec::Bubble(BubbleLayer::earthquake(SOURCE_ID)),
            LayerSpec::Symbol(SymbolLayer::earthquake(SOURCE_ID)),
        ];
        let layer_ids = layers.iter().map(|layer| layer.id().to_string()).collect();
        self.surface.add_layers(layers)?;
        self.state = SessionState::Active;
        tracing::info!(features = features.len(), "map session active");

        Ok(MapSession {
            surface: self.surface,
            features,
            layer_ids,
            state: SessionState::Active,
        })
    }
}

/// A session after setup: the surface, the loaded result set and the
/// registered layers. `Active` is terminal; `Ready` means the feed load
/// failed and the map renders without data points.
#[derive(Debug)]
pub struct MapSession<S: MapSurface> {
    surface: S,
    features: QuakeCollection,
    layer_ids: Vec<String>,
    state: SessionState,
}

impl<S: MapSurface> MapSession<S> {
    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn features(&self) -> &QuakeCollection {
        &self.features
    }

    pub fn layer_ids(&self) -> &[String] {
        &self.layer_ids
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Tears the session down, handing the surface back to the host.
    pub fn into_surface(self) -> S {
        self.surface
    }
}
