// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

//! Conditional tracing support.
//!
//! With the `profiling` feature enabled the evaluator emits `tracing` spans
//! around graph construction; the subscriber is chosen by the application.
//! Without the feature the instrumentation compiles away.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[cfg_attr(feature = "profiling", tracing::instrument(skip_all))]
//! pub fn build(...) -> Result<Self, Error> {
//!     // ...
//! }
//! ```
//!
//! For spans inside a function:
//!
//! ```rust,ignore
//! #[cfg(feature = "profiling")]
//! let _span = crate::instrument::debug_span!("make_edges").entered();
//! ```

#[cfg(feature = "profiling")]
pub use tracing::debug_span;
