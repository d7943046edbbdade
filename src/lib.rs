//! Class Timetabler - Constraint-based weekly timetable generator
//!
//! This library builds conflict-free weekly class timetables for a
//! multi-program department (CS and IT) using Mixed Integer Programming.
//!
//! # Algorithm Overview
//!
//! The engine works in 4 phases:
//! 1. **Demand Expansion**: Turn (program x year x section counts) into
//!    cohort sections and per-subject meeting events
//! 2. **Eligibility Filtering**: Compute admissible teachers and rooms per
//!    event, applying the room exclusivity rules
//! 3. **MIP Solve**: Bind each event to a day, start slot, teacher, and
//!    room under the no-overlap constraints; a reduced fallback model runs
//!    when the full model fails
//! 4. **Decode & Validate**: Emit meeting records and re-scan them for
//!    residual conflicts
//!
//! # Example
//!
//! ```no_run
//! use class_timetabler::parser::load_request_from_dir;
//! use class_timetabler::scheduler::generate_timetable;
//! use class_timetabler::types::SolverConfig;
//! use std::path::Path;
//!
//! let request = load_request_from_dir(Path::new("./data/demo")).unwrap();
//! let timetable = generate_timetable(&request, &SolverConfig::default(), false);
//! println!("{} meetings scheduled", timetable.schedule.len());
//! ```

pub mod error;
pub mod parser;
pub mod reporter;
pub mod scheduler;
pub mod types;
pub mod validator;

pub use error::{Result, TimetableError};
