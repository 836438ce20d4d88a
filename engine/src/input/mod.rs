//! Input Module
//!
//! Two interchangeable input sources behind one interface:
//!
//! - [`PolledInput`]: raw key/mouse events folded into held keys and edges,
//!   read back as axes every frame.
//! - [`StructuredInput`]: performed/canceled [`ActionEvent`]s from a
//!   structured device, with at most one subscription per button action.
//!
//! Both produce an [`InputFrame`] per tick; the controller only ever sees the
//! frame.
//!
//! # Example
//!
//! ```rust,ignore
//! use strider_engine::input::{InputSource, KeyBindings, KeyCode, PolledInput};
//!
//! let mut input = PolledInput::new(KeyBindings::default());
//! input.handle_key(KeyCode::W, true);
//! let frame = input.next_frame();
//! assert_eq!(frame.move_axis.y, 1.0);
//! ```

pub mod actions;
pub mod bindings;
pub mod keyboard;
pub mod mouse_state;
pub mod polled;
pub mod source;

pub use actions::{ActionEvent, StructuredInput};
pub use bindings::{Action, KeyBindings};
pub use keyboard::{KeyCode, KeyboardState};
pub use mouse_state::LookAccumulator;
pub use polled::{MOUSE_AXIS_SCALE, PolledInput};
pub use source::{InputDriver, InputFrame, InputSource, InputSourceKind};
