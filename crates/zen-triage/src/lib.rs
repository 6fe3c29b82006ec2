//! Triage engine for Zen List.
//!
//! Holds the ordered backlog, classifies swipe and keyboard gestures on the
//! top card, derives the visible stack, and acknowledges each decision for a
//! bounded window. Everything is driven by the host through
//! [`session::TriageSession`]; nothing here touches the terminal.

pub mod error;
pub mod executor;
pub mod feedback;
pub mod gesture;
pub mod keymap;
pub mod motion;
pub mod provider;
pub mod queue;
pub mod session;
pub mod stack;
pub mod status;
pub mod timer;

pub use error::{ProviderError, TriageError};
pub use executor::{ApprovalExecutor, LogExecutor};
pub use feedback::FeedbackController;
pub use gesture::{GestureClassifier, GestureState, ReleaseOutcome};
pub use keymap::{Command, Key, KeyMap};
pub use motion::CardMotion;
pub use provider::{DemoProvider, FileProvider, ItemProvider, ProviderBatch};
pub use queue::TriageQueue;
pub use session::{InputEvent, SessionSettings, SessionView, Step, Toast, TriageSession};
pub use stack::{CardSlot, ExitAnimations, ExitFrame, ExitTransition, StackLayout};
pub use status::{StatusDescriptor, StatusIndicator, StatusTask};
