//! Core module - units, input records and configuration

pub mod config;
pub mod input;
pub mod units;

pub use config::Config;
pub use input::{parse_number, HourInputs, RawInputs, TimeQuantity};
pub use units::{
    convert_from_hours, convert_to_hours, from_hours, to_hours, TimeUnit, UnitParseError,
};
