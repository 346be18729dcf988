//! `gp-output` — step-result recording for gridpursuit.
//!
//! One backend is provided: CSV.  It implements [`TurnWriter`] and is
//! driven by [`RecordingObserver`], which implements
//! `gp_engine::SimObserver`.
//!
//! | File                 | Contents                         |
//! |----------------------|----------------------------------|
//! | `turn_log.csv`       | one row per actor per turn       |
//! | `turn_summaries.csv` | one row per turn                 |
//!
//! # Usage
//!
//! ```rust,ignore
//! use gp_output::{CsvWriter, RecordingObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = RecordingObserver::new(writer);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::RecordingObserver;
pub use row::{ActorTurnRow, TurnSummaryRow};
pub use writer::TurnWriter;
