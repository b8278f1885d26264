//! Runs a map session against the live USGS feed with a console surface in
//! place of a real map SDK, logging what a renderer would be asked to draw.

use quake_viz::model::QuakeCollection;
use quake_viz::session::{MapSessionController, MapSurface, SessionState};
use quake_viz::{color_for, label_for, radius_for};
use quake_viz::{LayerSpec, MapOptions, SessionError};

/// Stand-in for the external map SDK: immediately ready, logs every call.
struct ConsoleSurface;

impl MapSurface for ConsoleSurface {
    fn create(options: &MapOptions) -> Result<Self, SessionError> {
        tracing::info!(
            center = ?options.center,
            view = ?options.view,
            "console surface created"
        );
        Ok(ConsoleSurface)
    }

    async fn ready(&mut self) -> Result<(), SessionError> {
        Ok(())
    }

    fn attach_source(&mut self, source_id: &str) -> Result<(), SessionError> {
        tracing::info!(source_id, "data source attached");
        Ok(())
    }

    fn set_features(
        &mut self,
        source_id: &str,
        features: &QuakeCollection,
    ) -> Result<(), SessionError> {
        tracing::info!(source_id, count = features.len(), "features installed");
        Ok(())
    }

    fn add_layers(&mut self, layers: Vec<LayerSpec>) -> Result<(), SessionError> {
        for layer in &layers {
            tracing::info!(id = layer.id(), source = layer.source(), "layer added");
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), SessionError> {
    tracing_subscriber::fmt::init();

    let options = MapOptions::default();
    let controller = MapSessionController::<ConsoleSurface>::create(options)?;
    let session = controller.run().await?;

    match session.state() {
        SessionState::Active => {
            for quake in session.features().iter() {
                println!(
                    "{:>6} {} r={:>4.1}px {} ({:.3}, {:.3})",
                    label_for(quake.magnitude),
                    color_for(quake.magnitude).to_hex(),
                    radius_for(quake.magnitude),
                    quake.place.as_deref().unwrap_or("unknown location"),
                    quake.position.longitude,
                    quake.position.latitude,
                );
            }
        }
        state => println!("session finished in {state:?} with no data points"),
    }
    Ok(())
}
