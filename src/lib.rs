#![crate_name = "datetime_utils"]
#![crate_type = "rlib"]

#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
//#![warn(missing_docs)]

#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unused_qualifications)]
#![warn(unused_results)]

//! A date adapter for calendar and date-picker components, along with the
//! [date and time](https://crates.io/crates/datetime) library underneath it.
//!
//! Components are written against the `DateUtils` trait, and `LocalUtils`
//! implements it over `Moment` values: wall-clock readings at a fixed UTC
//! offset, formatted and parsed with glibc locale data.
//!
//! # Examples
//!
//! ```
//! use datetime_utils::{DateUtils, LocalUtils, Input};
//!
//! let utils = LocalUtils::new(Some("en-US"));
//! let date = utils.date(Input::Text("2024-02-01T10:30:00Z")).unwrap();
//!
//! assert_eq!(utils.get_calendar_header_text(&date), "February 2024");
//! assert_eq!(utils.get_week_array(&date).len(), 5);
//! ```

pub mod cal;
pub mod duration;
pub mod instant;
pub mod locale;
pub mod moment;
mod system;
pub mod utils;
mod util;

pub use crate::cal::{LocalDate, LocalTime, LocalDateTime, DatePiece, TimePiece, Month, Weekday};
pub use crate::cal::offset::Offset;
pub use crate::duration::Duration;
pub use crate::instant::Instant;
pub use crate::locale::Locale;
pub use crate::moment::{Moment, Invalid};
pub use crate::utils::{DateUtils, LocalUtils, Input, DiffOperand, Meridiem, Formats, Config, ConfigError};
