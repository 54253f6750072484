//! Core systems for Vitrine.
//!
//! This crate provides the foundational pieces shared by the Vitrine widgets
//! and the fragment loader:
//!
//! - **Signal/Slot System**: Type-safe, synchronous change notification
//! - **Debounce Timers**: Deadline-based coalescing of bursty events (resize)
//! - **Logging**: `tracing` target names per subsystem
//!
//! # Signal/Slot Example
//!
//! ```
//! use vitrine_core::Signal;
//!
//! let open_changed = Signal::<bool>::new();
//! let conn_id = open_changed.connect(|open| {
//!     println!("Open: {}", open);
//! });
//! open_changed.emit(true);
//! open_changed.disconnect(conn_id);
//! ```
//!
//! # Debounce Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use vitrine_core::Debouncer;
//!
//! let start = Instant::now();
//! let mut resize = Debouncer::from_millis(250);
//! resize.schedule(start, 1280u32);
//! assert_eq!(resize.poll(start + Duration::from_millis(250)), Some(1280));
//! ```

pub mod debounce;
pub mod logging;
pub mod signal;

pub use debounce::Debouncer;
pub use signal::{ConnectionId, Signal};
