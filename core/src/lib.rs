//! Meal rotation engine for the dinner decider.
//!
//! [`registry::MealRegistry`] holds the meal list, [`selection`] draws
//! tonight's meal while steering clear of anything picked in the last week,
//! [`stats`] summarizes pick history, and [`session::Session`] ties them to a
//! [`storage::MealStore`].

pub mod db;
pub mod models;
pub mod registry;
pub mod selection;
pub mod session;
pub mod stats;
pub mod storage;
