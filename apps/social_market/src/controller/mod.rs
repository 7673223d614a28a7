//! Controller layer: view events, the pure state reducer, and the adapter that
//! drives requests and publishes state to the renderer.

pub mod events;
pub mod orchestration;
pub mod reducer;

pub use events::{GenerationMode, RequestToken, ViewEvent, FALLBACK_ERROR_MESSAGE};
pub use orchestration::CampaignController;
pub use reducer::{reduce, ViewPhase, ViewState};
