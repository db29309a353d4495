//! Input checks run before any request leaves the client. The backend
//! re-validates everything; these only save a round trip.

use regex::Regex;
use std::sync::LazyLock;

use crate::models::payment_methods::PaymentMethod;

pub const MIN_AMOUNT: u64 = 100;
pub const AMOUNT_STEP: u64 = 10;
pub const MIN_PASSWORD_LEN: usize = 6;
pub const MIN_NAME_LEN: usize = 2;
pub const REFERRAL_CODE_LEN: usize = 6;

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{10}$").unwrap());
static DIGITS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+$").unwrap());

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter phone number and password")]
    MissingCredentials,
    #[error("Please enter a valid 10-digit phone number")]
    InvalidPhone,
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
    #[error("Please enter your name")]
    MissingName,
    #[error("Name must be at least 2 characters")]
    NameTooShort,
    #[error("Please accept the Terms and Conditions to continue")]
    TermsNotAccepted,
    #[error("Please enter an amount")]
    MissingAmount,
    #[error("Amount must contain digits only")]
    NotANumber,
    #[error("Minimum {0} amount is ₹100")]
    BelowMinimum(&'static str),
    #[error("Amount must be a multiple of 10")]
    NotMultipleOfTen,
    #[error("Insufficient balance")]
    InsufficientBalance,
    #[error("Please enter a valid UTR number")]
    MissingUtr,
    #[error("Account holder name, account number, and IFSC code are required")]
    IncompletePaymentMethod,
    #[error("All amounts must be non-negative")]
    NegativeReward,
}

pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if PHONE_RE.is_match(phone) {
        Ok(())
    } else {
        Err(ValidationError::InvalidPhone)
    }
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

pub fn validate_login(phone: &str, password: &str) -> Result<(), ValidationError> {
    if phone.is_empty() || password.is_empty() {
        return Err(ValidationError::MissingCredentials);
    }
    validate_phone(phone)?;
    validate_password(password)
}

pub fn validate_registration(
    phone: &str,
    name: &str,
    password: &str,
    accepted_terms: bool,
) -> Result<(), ValidationError> {
    validate_login(phone, password)?;

    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingName);
    }
    if name.chars().count() < MIN_NAME_LEN {
        return Err(ValidationError::NameTooShort);
    }
    if !accepted_terms {
        return Err(ValidationError::TermsNotAccepted);
    }
    Ok(())
}

pub fn parse_amount(text: &str) -> Result<u64, ValidationError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ValidationError::MissingAmount);
    }
    if !DIGITS_RE.is_match(text) {
        return Err(ValidationError::NotANumber);
    }
    text.parse().map_err(|_| ValidationError::NotANumber)
}

pub fn validate_recharge_amount(amount: u64) -> Result<(), ValidationError> {
    if amount < MIN_AMOUNT {
        return Err(ValidationError::BelowMinimum("recharge"));
    }
    if amount % AMOUNT_STEP != 0 {
        return Err(ValidationError::NotMultipleOfTen);
    }
    Ok(())
}

pub fn validate_withdrawal_amount(amount: u64, balance: f64) -> Result<(), ValidationError> {
    if amount < MIN_AMOUNT {
        return Err(ValidationError::BelowMinimum("withdrawal"));
    }
    if amount as f64 > balance {
        return Err(ValidationError::InsufficientBalance);
    }
    if amount % AMOUNT_STEP != 0 {
        return Err(ValidationError::NotMultipleOfTen);
    }
    Ok(())
}

/// Codes are issued in upper case.
pub fn normalize_referral_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Referral codes are only looked up once fully typed.
pub fn referral_code_ready(code: &str) -> bool {
    code.trim().chars().count() >= REFERRAL_CODE_LEN
}

pub fn validate_utr(utr: &str) -> Result<&str, ValidationError> {
    let utr = utr.trim();
    if utr.is_empty() {
        return Err(ValidationError::MissingUtr);
    }
    Ok(utr)
}

pub fn validate_payment_method(pm: &PaymentMethod) -> Result<(), ValidationError> {
    if pm.account_holder_name.trim().is_empty()
        || pm.account_number.trim().is_empty()
        || pm.ifsc_code.trim().is_empty()
    {
        return Err(ValidationError::IncompletePaymentMethod);
    }
    Ok(())
}

pub fn validate_referral_rewards(referrer: f64, referred: f64) -> Result<(), ValidationError> {
    if referrer < 0.0 || referred < 0.0 {
        return Err(ValidationError::NegativeReward);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_must_be_exactly_ten_digits() {
        assert!(validate_phone("9876543210").is_ok());

        for bad in ["", "987654321", "98765432100", "98765 43210", "+919876543", "abcdefghij"] {
            assert_eq!(validate_phone(bad), Err(ValidationError::InvalidPhone), "{bad}");
        }
    }

    #[test]
    fn login_checks_in_order() {
        assert_eq!(validate_login("", "secret1"), Err(ValidationError::MissingCredentials));
        assert_eq!(validate_login("123", "secret1"), Err(ValidationError::InvalidPhone));
        assert_eq!(validate_login("9876543210", "short"), Err(ValidationError::PasswordTooShort));
        assert!(validate_login("9876543210", "secret1").is_ok());
    }

    #[test]
    fn registration_needs_name_and_terms() {
        assert_eq!(
            validate_registration("9876543210", "", "secret1", true),
            Err(ValidationError::MissingName)
        );
        assert_eq!(
            validate_registration("9876543210", " A ", "secret1", true),
            Err(ValidationError::NameTooShort)
        );
        assert_eq!(
            validate_registration("9876543210", "Asha", "secret1", false),
            Err(ValidationError::TermsNotAccepted)
        );
        assert!(validate_registration("9876543210", "Al", "secret1", true).is_ok());
    }

    #[test]
    fn recharge_amounts() {
        assert_eq!(parse_amount(""), Err(ValidationError::MissingAmount));
        assert_eq!(parse_amount("12a"), Err(ValidationError::NotANumber));
        assert_eq!(parse_amount("-100"), Err(ValidationError::NotANumber));
        assert_eq!(parse_amount(" 250 "), Ok(250));

        assert_eq!(validate_recharge_amount(90), Err(ValidationError::BelowMinimum("recharge")));
        assert_eq!(validate_recharge_amount(105), Err(ValidationError::NotMultipleOfTen));
        assert!(validate_recharge_amount(100).is_ok());
        assert!(validate_recharge_amount(10_000).is_ok());
    }

    #[test]
    fn withdrawal_respects_cached_balance() {
        assert!(validate_withdrawal_amount(500, 500.0).is_ok());
        assert_eq!(
            validate_withdrawal_amount(510, 500.0),
            Err(ValidationError::InsufficientBalance)
        );
        assert_eq!(
            validate_withdrawal_amount(50, 500.0),
            Err(ValidationError::BelowMinimum("withdrawal"))
        );
        assert_eq!(
            validate_withdrawal_amount(255, 1000.0),
            Err(ValidationError::NotMultipleOfTen)
        );
    }

    #[test]
    fn referral_lookup_waits_for_six_characters() {
        assert!(!referral_code_ready(""));
        assert!(!referral_code_ready("ABC12"));
        assert!(referral_code_ready("ABC123"));
        assert!(referral_code_ready("ABC1234"));
    }

    #[test]
    fn referral_codes_are_upper_cased() {
        assert_eq!(normalize_referral_code(" asha01 "), "ASHA01");
        assert_eq!(normalize_referral_code("ASHA01"), "ASHA01");
    }

    #[test]
    fn misc_checks() {
        assert_eq!(validate_utr("  "), Err(ValidationError::MissingUtr));
        assert_eq!(validate_utr(" 123456789012 "), Ok("123456789012"));

        let mut pm = PaymentMethod::default();
        assert_eq!(validate_payment_method(&pm), Err(ValidationError::IncompletePaymentMethod));
        pm.account_holder_name = "Asha".into();
        pm.account_number = "0012345".into();
        pm.ifsc_code = "SBIN0000001".into();
        assert!(validate_payment_method(&pm).is_ok());

        assert_eq!(validate_referral_rewards(-1.0, 5.0), Err(ValidationError::NegativeReward));
        assert!(validate_referral_rewards(0.0, 0.0).is_ok());
    }
}
