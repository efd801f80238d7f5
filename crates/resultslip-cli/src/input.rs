//! Parsing of typed-in values shared by the shell and the `add` command

use resultslip_core::SlipError;

/// Parse a score; any finite number is accepted
pub fn parse_score(raw: &str) -> Result<f64, SlipError> {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(score) if score.is_finite() => Ok(score),
        _ => Err(SlipError::InvalidScore {
            raw: trimmed.to_string(),
        }),
    }
}

/// Parse a non-negative whole number such as a unit count
pub fn parse_count(field: &str, raw: &str) -> Result<usize, SlipError> {
    let trimmed = raw.trim();
    trimmed.parse::<usize>().map_err(|_| SlipError::InvalidNumber {
        field: field.to_string(),
        raw: trimmed.to_string(),
    })
}

/// Require a non-blank value, returned trimmed
pub fn require(field: &str, raw: &str) -> Result<String, SlipError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SlipError::EmptyField {
            field: field.to_string(),
        });
    }
    Ok(trimmed.to_string())
}

/// Parse `UNIT=SCORE`; the unit may itself contain `=`, the score may not
pub fn parse_mark_pair(raw: &str) -> Result<(String, f64), SlipError> {
    let invalid = || SlipError::InvalidMarkPair {
        raw: raw.to_string(),
    };
    let (unit, score) = raw.rsplit_once('=').ok_or_else(invalid)?;
    let unit = require("Unit name", unit).map_err(|_| invalid())?;
    let score = parse_score(score)?;
    Ok((unit, score))
}
