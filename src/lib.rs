#[cfg_attr(not(test), allow(unused_imports))]
#[macro_use]
extern crate approx;

//! Exact-arithmetic offset engine for SVG paths of lines and elliptical
//! arcs: given a simple closed path, produce an inward or outward parallel
//! path, and optionally enumerate the bevel faces that tile the strip
//! between the two.

pub mod expr;
pub mod geometry;
pub mod intersect;
pub mod path;
pub mod error;
pub mod assembler;
pub mod bevel;

pub use assembler::offset_path;
pub use bevel::{bevel_path, BevelArced, BevelFace, BevelPolygon};
pub use error::{OffsetError, OffsetResult};
pub use expr::{Expr, Precision, PrecisionMode};
pub use geometry::{Arc, Line, Point, Segment, Vec2};
pub use intersect::{intersect, Ext, Record};
pub use path::{Path, PathItem};

/// Parse a log level string into a `log::LevelFilter`, for binaries/tests
/// wiring up `env_logger` against this crate.
pub fn parse_log_level(level: Option<&str>) -> log::LevelFilter {
    match level {
        Some("error") => log::LevelFilter::Error,
        Some("warn") => log::LevelFilter::Warn,
        Some("info") | Some("") | None => log::LevelFilter::Info,
        Some("debug") => log::LevelFilter::Debug,
        Some("trace") => log::LevelFilter::Trace,
        Some(level) => panic!("invalid log level: {}", level),
    }
}
