use std::fmt;

/// Rankings must be strictly below this value.
pub const MAX_RANKING: u32 = 10000;

/// Why a typed ranking was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    NotANumber,
    TooLarge,
}

impl InputError {
    /// Message shown next to the offending field.
    pub fn message(&self) -> String {
        match self {
            InputError::NotANumber => "enter a number".to_string(),
            InputError::TooLarge => format!("value must be below {}", MAX_RANKING),
        }
    }
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for InputError {}

/// Digits-only ranking in `[0, MAX_RANKING)`, kept exactly as typed.
///
/// The empty value means "not entered yet". Leading zeros are preserved in the
/// text; comparisons use [`RankingValue::magnitude`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RankingValue(String);

impl RankingValue {
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// Strict parse: the value, or the reason it is not a ranking.
    pub fn parse(raw: &str) -> Result<Self, InputError> {
        classify(raw).map(|_| Self(raw.chars().filter(char::is_ascii_digit).collect()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Numeric value, `None` while unset.
    pub fn magnitude(&self) -> Option<u32> {
        if self.0.is_empty() {
            return None;
        }
        // Construction guarantees a digit string below MAX_RANKING once leading zeros go
        self.0.parse().ok()
    }
}

impl fmt::Display for RankingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of validating one keystroke's worth of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub value: RankingValue,
    pub error: Option<InputError>,
}

impl ValidationResult {
    /// Display string for the field, empty when the input was accepted.
    pub fn message(&self) -> String {
        self.error.map(|e| e.message()).unwrap_or_default()
    }

    pub fn is_accepted(&self) -> bool {
        self.error.is_none()
    }
}

/// Validate raw field text against the previously accepted value.
///
/// Rejected input never replaces the field: on error the returned value is
/// `previous`, unchanged.
pub fn validate(raw: &str, previous: &RankingValue) -> ValidationResult {
    match RankingValue::parse(raw) {
        Ok(value) => ValidationResult { value, error: None },
        Err(error) => ValidationResult {
            value: previous.clone(),
            error: Some(error),
        },
    }
}

fn classify(raw: &str) -> Result<(), InputError> {
    if !raw.chars().all(|c| c.is_ascii_digit()) {
        return Err(InputError::NotANumber);
    }
    if raw.is_empty() {
        return Ok(());
    }
    // Too many digits for u64 is still just "too large"
    match raw.parse::<u64>() {
        Ok(n) if n < u64::from(MAX_RANKING) => Ok(()),
        _ => Err(InputError::TooLarge),
    }
}
