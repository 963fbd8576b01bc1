//! Chat view model: the append-only transcript, the submit flow that turns
//! one user query into at most one bot reply, and the cosmetic wall clock.

pub mod clock;
pub mod render;
pub mod transcript;
pub mod typing;
pub mod view;

pub use clock::Clock;
pub use transcript::Transcript;
pub use typing::TypingIndicator;
pub use view::{ChatView, Notice, PendingSubmit, SubmitOutcome};
