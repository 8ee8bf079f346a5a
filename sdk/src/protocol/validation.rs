//! Token parameter validation
//!
//! Every check runs before any network traffic. Field validators return the
//! list of rules the value breaks (empty when valid) so `validate_all` can
//! report every problem in a single pass instead of stopping at the first.

use rust_decimal::Decimal;
use solana_sdk::pubkey::MAX_SEED_LEN;

use crate::core::{
    PartnerAddress, SdkError, SdkResult, SupplyAmount, SupplyUnits, TokenCreationRequest,
    MAX_DECIMALS, MAX_NAME_LENGTH, MAX_SUPPLY, MAX_SYMBOL_LENGTH,
};
use crate::protocol::units::{scale_supply, to_base_units};

/// Aggregate outcome of `validate_all`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
    /// Largest accepted supply, in base units
    pub max_supply: String,
}

impl ValidationReport {
    /// Convert into a result, carrying the full error list on failure
    pub fn into_result(self) -> SdkResult<()> {
        if self.is_valid {
            Ok(())
        } else {
            Err(SdkError::InvalidInput(self.errors))
        }
    }
}

pub fn validate_name(name: &str) -> Vec<String> {
    let mut errors = Vec::new();
    if name.is_empty() {
        errors.push("Token name is required".to_string());
        return errors;
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        errors.push(format!(
            "Token name must be at most {} characters, got {}",
            MAX_NAME_LENGTH,
            name.chars().count()
        ));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '_' | '.' | '-'))
    {
        errors.push(
            "Token name may only contain letters, digits, spaces, '_', '.' and '-'".to_string(),
        );
    }
    errors
}

pub fn validate_symbol(symbol: &str) -> Vec<String> {
    let mut errors = Vec::new();
    if symbol.is_empty() {
        errors.push("Token symbol is required".to_string());
        return errors;
    }
    if symbol.chars().count() > MAX_SYMBOL_LENGTH {
        errors.push(format!(
            "Token symbol must be at most {} characters, got {}",
            MAX_SYMBOL_LENGTH,
            symbol.chars().count()
        ));
    }
    if symbol.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Token symbol must be uppercase (A-Z, 0-9 only)".to_string());
    }
    if !symbol.chars().all(|c| c.is_ascii_alphanumeric()) {
        errors.push("Token symbol may only contain A-Z and 0-9".to_string());
    }
    errors
}

pub fn validate_decimals(decimals: u8) -> Vec<String> {
    if decimals > MAX_DECIMALS {
        vec![format!(
            "Decimals must be between 0 and {}, got {}",
            MAX_DECIMALS, decimals
        )]
    } else {
        Vec::new()
    }
}

/// Parse the caller's supply into a u64, or describe why it is unacceptable
pub fn parse_supply(supply: &SupplyAmount) -> Result<u64, String> {
    let positive = || "Initial supply must be a positive integer".to_string();
    let too_large = || format!("Initial supply must not exceed {}", MAX_SUPPLY);

    match supply {
        SupplyAmount::Integer(value) => {
            if *value <= 0 {
                Err(positive())
            } else {
                u64::try_from(*value).map_err(|_| too_large())
            }
        }
        SupplyAmount::Text(text) => {
            let text = text.trim();
            let digits = text.strip_prefix('-').unwrap_or(text);
            if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
                return Err("Initial supply must contain only digits".to_string());
            }
            if text.starts_with('-') {
                return Err(positive());
            }
            // Leading zeros do not count towards the magnitude
            let significant = digits.trim_start_matches('0');
            if significant.is_empty() {
                return Err(positive());
            }
            significant.parse::<u64>().map_err(|_| too_large())
        }
    }
}

pub fn validate_initial_supply(supply: &SupplyAmount) -> Vec<String> {
    match parse_supply(supply) {
        Ok(_) => Vec::new(),
        Err(error) => vec![error],
    }
}

pub fn validate_metadata_uri(uri: &str) -> Vec<String> {
    if uri.is_empty() {
        return vec!["Metadata URI is required".to_string()];
    }
    match url::Url::parse(uri) {
        Ok(parsed) if parsed.scheme() == "https" => Vec::new(),
        Ok(parsed) => vec![format!(
            "Metadata URI must use https, got '{}'",
            parsed.scheme()
        )],
        Err(e) => vec![format!("Metadata URI is not a valid URL: {}", e)],
    }
}

pub fn validate_partner_address(partner: &PartnerAddress) -> Vec<String> {
    match partner {
        PartnerAddress::Key(_) => Vec::new(),
        PartnerAddress::Encoded(encoded) => {
            if !(32..=44).contains(&encoded.len()) {
                return vec![format!(
                    "Partner address must be 32-44 base-58 characters, got {}",
                    encoded.len()
                )];
            }
            match bs58::decode(encoded).into_vec() {
                Ok(bytes) if bytes.len() == 32 => Vec::new(),
                Ok(bytes) => vec![format!(
                    "Partner address decodes to {} bytes, expected 32",
                    bytes.len()
                )],
                Err(e) => vec![format!("Partner address is not valid base-58: {}", e)],
            }
        }
    }
}

pub fn validate_partner_amount(amount: Decimal, partner: Option<&PartnerAddress>) -> Vec<String> {
    let mut errors = Vec::new();
    if let Err(e) = to_base_units(amount) {
        errors.extend(e.details().into_iter().map(|e| format!("Partner amount: {}", e)));
    }
    if partner.is_none() && amount > Decimal::ZERO {
        errors.push("Partner amount requires a partner address".to_string());
    }
    errors
}

pub fn validate_unique_key(unique_key: Option<&str>) -> Vec<String> {
    match unique_key {
        Some("") => vec!["Unique key must not be empty when provided".to_string()],
        Some(key) if key.len() > MAX_SEED_LEN => vec![format!(
            "Unique key must be at most {} bytes, got {}",
            MAX_SEED_LEN,
            key.len()
        )],
        _ => Vec::new(),
    }
}

/// Run every rule against the request and collect all violations
pub fn validate_all(request: &TokenCreationRequest) -> ValidationReport {
    let mut errors = Vec::new();
    errors.extend(validate_name(&request.name));
    errors.extend(validate_symbol(&request.symbol));
    errors.extend(validate_decimals(request.decimals));
    errors.extend(validate_initial_supply(&request.initial_supply));
    errors.extend(validate_metadata_uri(&request.metadata_uri));
    errors.extend(validate_unique_key(request.unique_key.as_deref()));
    if let Some(partner) = &request.partner_address {
        errors.extend(validate_partner_address(partner));
    }
    errors.extend(validate_partner_amount(
        request.partner_amount,
        request.partner_address.as_ref(),
    ));

    if request.supply_units == SupplyUnits::Human && request.decimals <= MAX_DECIMALS {
        if let Ok(supply) = parse_supply(&request.initial_supply) {
            if scale_supply(supply, request.decimals).is_none() {
                errors.push(format!(
                    "Initial supply {} with {} decimals exceeds the maximum of {} base units",
                    supply, request.decimals, MAX_SUPPLY
                ));
            }
        }
    }

    ValidationReport {
        is_valid: errors.is_empty(),
        errors,
        max_supply: MAX_SUPPLY.to_string(),
    }
}
