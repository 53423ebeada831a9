// Report module - formatting, presentation and the aggregation pipeline

pub mod format;
pub mod overlay;
pub mod pipeline;

#[cfg(test)]
pub(crate) mod tests;

// Re-export public types and functions
pub use overlay::{HtmlOverlaySink, OverlayHandle, PresentationSink};
pub use pipeline::{AggregationPipeline, LobbyReport, PlayerReport};
