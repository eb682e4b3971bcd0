//! Core domain logic for biometric attendance tracking.
//!
//! This crate contains the fundamental types and logic for:
//! - Aggregation: pairing check-ins with check-outs and deriving statistics
//! - Device boundary: raw punches and users as read from a time-clock
//! - Punch directions, employee status and the stored timestamp format

pub mod aggregate;
pub mod device;
pub mod direction;
pub mod employee;
pub mod event;

pub use aggregate::{
    Aggregator, AttendanceStats, DailyAttendance, DayWindow, EmployeeSummary, MonthlyRow,
    PairingPolicy, PunchLog, ReportRow, WorkRules, round_hours,
};
pub use device::{DeviceError, DeviceGateway, DeviceRecord, DeviceUser};
pub use direction::{Direction, UnknownDirection};
pub use employee::{EmployeeStatus, InvalidStatus};
pub use event::{
    AttendanceEvent, DateRange, InvalidDateRange, TIMESTAMP_FORMAT, format_timestamp,
    parse_timestamp,
};
