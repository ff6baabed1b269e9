// File: ./src/model/mod.rs
pub mod clock;
pub mod display;
pub mod extract;
pub mod item;
pub mod matcher;
pub mod numerals;
pub mod parser;
pub mod validate;

pub use clock::Clock;
pub use item::{ScheduleEntry, Settings, StoreData};
pub use validate::{Validation, ValidationError};
