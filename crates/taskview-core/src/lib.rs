//! Core plumbing for taskview.
//!
//! This crate provides the signal/slot mechanism the model/view layer is
//! built on. Models announce structural changes, views announce user
//! gestures, and controllers wire the two together by connecting slots —
//! every other taskview crate communicates exclusively through [`Signal`]
//! values.
//!
//! # Example
//!
//! ```
//! use taskview_core::Signal;
//!
//! let row_activated = Signal::<usize>::new();
//!
//! let conn_id = row_activated.connect(|row| {
//!     println!("row {row} activated");
//! });
//!
//! row_activated.emit(3);
//! row_activated.disconnect(conn_id);
//! ```

pub mod signal;

pub use signal::{ConnectionId, Signal};
