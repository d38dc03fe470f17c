//! Workflow engine — the cross-mode content pipeline.
//!
//! A user picks a [`Mode`](hookstudio_core::Mode), fills the shared inputs,
//! and the [`WorkflowController`] turns them into one generation request:
//!
//! ```text
//! inputs ──► prompt::build ──► GenerationGateway ──► result ──► parser::classify
//!    ▲                                                 │
//!    └──────────── transfer (context carried over) ◄───┘
//! ```
//!
//! Finished results are recorded in the capped history, and any finished
//! result can be carried into the inputs of a follow-up mode.

pub mod controller;
pub mod gateway;
pub mod parser;
pub mod prompt;
pub mod transfer;

pub use controller::{Completion, GenerationTicket, WorkflowController};
pub use gateway::{FALLBACK_TEXT, GenerationGateway};
pub use parser::{Rendering, classify, parse};
pub use prompt::{Prompt, build};
pub use transfer::{NextStep, next_steps};
