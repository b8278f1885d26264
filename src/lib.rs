mod error;
pub use error::{FetchError, SessionError, StyleError};
pub mod config;
pub mod feed;
pub mod layer;
pub mod model;
pub mod session;
pub mod style;

pub use config::{AuthOptions, MapOptions, ViewMode, DEFAULT_EARTHQUAKE_FEED};
pub use feed::{FeedClient, FeedLoader, ReqwestClient};
pub use layer::{BubbleLayer, LayerSpec, SymbolLayer};
pub use model::{GeoPosition, QuakeCollection, QuakeFeature};
pub use session::{MapSession, MapSessionController, MapSurface, SessionState, SOURCE_ID};
pub use style::{color_for, label_for, radius_for, Color, StyleRule};
