/// Domain types for Lyra
mod ids;
mod listening;
mod track;

pub use ids::TrackId;
pub use listening::ListeningReport;
pub use track::Track;
