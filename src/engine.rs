//! The quote engine.
//!
//! [`QuoteEngine`] holds a loaded configuration and wraps the pricing
//! pipeline with quote identity, timing and logging. It is cheap to clone and
//! can be shared between threads.

use std::sync::Arc;
use std::time::Instant;

use chrono::{Local, NaiveDate, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    auto_badges, calculate_price, ensure_order_matches, validate_submission,
};
use crate::config::ConfigLoader;
use crate::error::EngineResult;
use crate::models::{BookingForm, Order, OrderPayload, Quote, Service};

/// Prices bookings against a shared configuration.
///
/// # Example
///
/// ```
/// use quote_engine::config::ConfigLoader;
/// use quote_engine::engine::QuoteEngine;
/// use quote_engine::models::{BookingForm, Service, Tutor};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let engine = QuoteEngine::new(ConfigLoader::default());
/// let tutor = Service::Tutor(Tutor {
///     id: 1,
///     name: "Anna".to_string(),
///     work_experience: 5,
///     languages_spoken: vec![],
///     languages_offered: vec![],
///     language_level: "B2".to_string(),
///     price_per_hour: Decimal::from(1000),
/// });
/// let form = BookingForm {
///     duration: Some(Decimal::from(3)),
///     ..BookingForm::default()
/// };
///
/// let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
/// let quote = engine.quote_on(&tutor, &form, today);
/// assert_eq!(quote.price.total, Decimal::from(3000));
/// ```
#[derive(Debug, Clone)]
pub struct QuoteEngine {
    config: Arc<ConfigLoader>,
}

impl QuoteEngine {
    /// Creates an engine over the given configuration.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Prices a form as of the local current date.
    pub fn quote(&self, service: &Service, form: &BookingForm) -> Quote {
        self.quote_on(service, form, Local::now().date_naive())
    }

    /// Prices a form as of `today`.
    pub fn quote_on(&self, service: &Service, form: &BookingForm, today: NaiveDate) -> Quote {
        let quote_id = Uuid::new_v4();
        let start_time = Instant::now();

        let price = calculate_price(service, form, self.config.config(), today);

        let duration = start_time.elapsed();
        info!(
            quote_id = %quote_id,
            kind = %service.kind(),
            service_id = service.id(),
            total = %price.total,
            adjustments = price.adjustments.len(),
            duration_us = duration.as_micros(),
            "Quote calculated"
        );

        Quote {
            quote_id,
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            price,
            duration_us: u64::try_from(duration.as_micros()).unwrap_or(u64::MAX),
        }
    }

    /// Re-prices a stored order as of `today`.
    ///
    /// The customer's choices are taken from the order; the auto options are
    /// derived afresh, so an order booked for early registration loses it
    /// once its start date is closer than the lead time.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::EngineError::InvalidOrder`] if the order is not for `service`.
    pub fn requote(&self, order: &Order, service: &Service, today: NaiveDate) -> EngineResult<Quote> {
        if let Err(err) = ensure_order_matches(order, service) {
            warn!(order_id = order.id, error = %err, "Order does not match service");
            return Err(err);
        }

        let form = BookingForm::from_order(order);
        let quote = self.quote_on(service, &form, today);

        if quote.price.options.auto() != order.options.auto() {
            info!(
                quote_id = %quote.quote_id,
                order_id = order.id,
                "Auto options changed since the order was priced"
            );
        }

        Ok(quote)
    }

    /// Validates a form, prices it, and builds the order payload.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::EngineError::InvalidOrder`] if the form fails validation.
    pub fn submit(
        &self,
        service: &Service,
        form: &BookingForm,
        today: NaiveDate,
    ) -> EngineResult<(Quote, OrderPayload)> {
        if let Err(err) = validate_submission(service, form, &self.config.tariff().limits) {
            warn!(
                kind = %service.kind(),
                service_id = service.id(),
                error = %err,
                "Order validation failed"
            );
            return Err(err);
        }

        let quote = self.quote_on(service, form, today);
        let payload = OrderPayload::from_quote(service, form, &quote.price)?;

        info!(
            quote_id = %quote.quote_id,
            price = payload.price,
            "Order payload built"
        );

        Ok((quote, payload))
    }

    /// Notices for the auto options that fired in a quote.
    pub fn badges(&self, quote: &Quote) -> Vec<String> {
        auto_badges(&quote.price.options.auto(), self.config.adjustments())
    }
}
