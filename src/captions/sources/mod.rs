// Platform caption sources

pub mod kaltura;
pub mod youtube;

pub use kaltura::KalturaCaptionSource;
pub use youtube::YouTubeCaptionSource;
