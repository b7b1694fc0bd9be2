//! Core data models for the quote engine.
//!
//! This module contains all the domain models used throughout the engine.

mod booking;
mod options;
mod order;
mod quote;
mod service;

pub use booking::{BookingForm, PricingInput};
pub use options::{Adjustment, AutoOptions, OptionSet, UserOptions};
pub use order::{Order, OrderPayload};
pub use quote::{AdjustmentEffect, AppliedAdjustment, AuditStep, BaseCostParts, PriceResult, Quote};
pub use service::{BookingKind, Course, Service, Tutor};
