//! Input validation for wave picking instances.
//!
//! Checks structural integrity of orders, aisles, and wave bounds before
//! any model is built. Detects:
//! - Inverted wave-size bounds (LB > UB)
//! - Item indices outside `[0, n_items)`
//! - Zero-quantity entries in order or aisle maps
//!
//! A failed check is a data-integrity error: [`Instance::new`](crate::models::Instance::new)
//! refuses to construct the instance and reports every issue found.

use thiserror::Error;

use crate::models::{Aisle, Order};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Wave-size lower bound exceeds the upper bound.
    InvertedWaveBounds,
    /// An order or aisle references an item outside `[0, n_items)`.
    ItemOutOfRange,
    /// An order or aisle stores an explicit zero quantity.
    ZeroQuantity,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input data for a wave picking instance.
///
/// Checks:
/// 1. `wave_size_lb <= wave_size_ub`
/// 2. Every order item lies in `[0, n_items)` and has positive quantity
/// 3. Every aisle item lies in `[0, n_items)` and has positive quantity
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_instance(
    orders: &[Order],
    aisles: &[Aisle],
    n_items: usize,
    wave_size_lb: u64,
    wave_size_ub: u64,
) -> ValidationResult {
    let mut errors = Vec::new();

    if wave_size_lb > wave_size_ub {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvertedWaveBounds,
            format!("Wave size lower bound {wave_size_lb} exceeds upper bound {wave_size_ub}"),
        ));
    }

    for (idx, order) in orders.iter().enumerate() {
        check_items("Order", idx, order.items.iter(), n_items, &mut errors);
    }
    for (idx, aisle) in aisles.iter().enumerate() {
        check_items("Aisle", idx, aisle.items.iter(), n_items, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_items<'a>(
    entity: &str,
    idx: usize,
    items: impl Iterator<Item = (&'a usize, &'a u32)>,
    n_items: usize,
    errors: &mut Vec<ValidationError>,
) {
    for (&item, &qty) in items {
        if item >= n_items {
            errors.push(ValidationError::new(
                ValidationErrorKind::ItemOutOfRange,
                format!("{entity} {idx} references item {item} (n_items = {n_items})"),
            ));
        }
        if qty == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroQuantity,
                format!("{entity} {idx} has zero quantity for item {item}"),
            ));
        }
    }
}
