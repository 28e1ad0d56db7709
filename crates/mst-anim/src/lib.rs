//! `mst-anim`: everything that turns compute results into frames.
//!
//! # Frame loop
//!
//! ```text
//! FrameDriver::run(|now| {
//!     session.poll_worker(&worker, &mut renderer)?;   // new results?
//!     session.tick(now, &mut renderer);               // advance animation
//! })
//! ```
//!
//! Rendering is behind the [`Renderer`] trait; no call into it is allowed to
//! stop the loop.  All state lives in one [`VizSession`] passed around by
//! reference.
//!
//! # Crate layout
//!
//! | Module         | Contents                                              |
//! |----------------|-------------------------------------------------------|
//! | [`timing`]     | `StepTiming` (growth + pause per edge)                |
//! | [`renderer`]   | `Renderer` trait, `NoopRenderer`, `RecordingRenderer` |
//! | [`edge_anim`]  | `EdgeAnim`: prefix reveal with antimeridian split     |
//! | [`highlight`]  | `HighlightFade`: endpoint markers fading in           |
//! | [`scheduler`]  | `AnimationScheduler` state machine                    |
//! | [`candidates`] | `CandidateLayer`, zoom-adaptive `zoom_k`              |
//! | [`frame`]      | `FrameClock`, `FixedClock`, `RealtimeClock`, `FrameDriver` |
//! | [`session`]    | `VizSession` context object                           |
//! | [`error`]      | `AnimError`, `RenderError`                            |

pub mod candidates;
pub mod edge_anim;
pub mod error;
pub mod frame;
pub mod highlight;
pub mod renderer;
pub mod scheduler;
pub mod session;
pub mod timing;


pub use candidates::{CandidateLayer, ZoomRange, zoom_k};
pub use edge_anim::EdgeAnim;
pub use error::{AnimError, AnimResult, RenderError, RenderResult};
pub use frame::{FixedClock, FrameClock, FrameDriver, RealtimeClock};
pub use highlight::HighlightFade;
pub use renderer::{
    LayerId, NoopRenderer, Pane, RecordedMarker, RecordedPolyline, RecordingRenderer, Renderer,
};
pub use scheduler::{AnimationContext, AnimationScheduler, SchedulerState};
pub use session::VizSession;
pub use timing::StepTiming;
