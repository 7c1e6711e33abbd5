//! Validation helpers for production and waste inputs

/// Validate a product name (non-empty, free-form otherwise)
pub fn validate_product_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Product name cannot be empty");
    }
    Ok(())
}

/// Validate a produced quantity for a new lot
pub fn validate_produced_quantity(quantity: i64) -> Result<(), &'static str> {
    if quantity <= 0 {
        return Err("Produced quantity must be positive");
    }
    Ok(())
}

/// Validate a wasted quantity before checking it against available stock
pub fn validate_wasted_quantity(quantity: i64) -> Result<(), &'static str> {
    if quantity <= 0 {
        return Err("Wasted quantity must be positive");
    }
    Ok(())
}
