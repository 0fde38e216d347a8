//! Services layer (ports + adapters).
//!
//! - `ports`: contracts/types the document core is written against.
//! - `adapters`: OS specific implementations (filesystem, settings, key maps).

pub mod adapters;
pub mod ports;
