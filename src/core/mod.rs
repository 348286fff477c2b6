//! Mutation and aggregation services plus the dashboard facade that ties them to storage.

pub mod charts;
pub mod dashboard;
pub mod format;
pub mod services;
pub mod time;
