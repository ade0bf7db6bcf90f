//! Utility functions shared by the codecs.

mod datetime;

pub use datetime::{
    format_partial_date, parse_datetime_stamp, DatePrecision, DateTimeParseError, DateTimeStamp,
};
