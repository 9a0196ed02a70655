// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Footprint pipeline shared by command line tools and services.
//!
//! Pulls element shapes and map conversion records from a [`ModelSource`],
//! projects elements in parallel, and runs union, exterior extraction,
//! georeferencing and metrics. Elements without a usable shape are skipped and
//! logged; every other failure aborts the run with the failing [`Stage`].

pub mod config;
pub mod error;
pub mod pipeline;
pub mod source;
pub mod types;

pub use config::FootprintConfig;
pub use error::{FootprintError, Result, SourceError, Stage};
pub use pipeline::{ElementOutcome, FootprintPipeline};
pub use source::{ElementShape, InMemoryModel, ModelSource};
pub use types::{FootprintResult, FootprintSummary, ProcessingStats, SkipReason, SkippedElement};
