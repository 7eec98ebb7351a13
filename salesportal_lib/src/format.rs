//! Display formatting for money and percentages (pt-BR conventions).

use crate::error::EngineError;

/// Whole-real amount with `.` thousands separators: `R$ 1.234.567`.
///
/// Rounds half away from zero. Negative or non-finite amounts fail with
/// `InvalidAmount`; use [`format_signed_brl`] for deltas.
pub fn format_currency_brl(amount: f64) -> Result<String, EngineError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(EngineError::invalid_amount("currency", amount));
    }
    Ok(format!("R$ {}", group_thousands(amount.round())))
}

/// Like [`format_currency_brl`] but allows negatives: `-R$ 10.000`.
pub fn format_signed_brl(delta: f64) -> Result<String, EngineError> {
    if !delta.is_finite() {
        return Err(EngineError::invalid_amount("signed currency", delta));
    }
    let rounded = delta.round();
    let body = format!("R$ {}", group_thousands(rounded.abs()));
    // -0.4 rounds to -0 and prints unsigned
    if rounded < 0.0 {
        Ok(format!("-{}", body))
    } else {
        Ok(body)
    }
}

/// Percentage with a comma decimal separator: `85,71%`.
pub fn format_pct(value: f64, decimals: usize) -> Result<String, EngineError> {
    if !value.is_finite() {
        return Err(EngineError::invalid_amount("percentage", value));
    }
    let text = format!("{:.*}", decimals, value);
    let text = if text.starts_with('-') && text[1..].chars().all(|c| c == '0' || c == '.') {
        text[1..].to_string()
    } else {
        text
    };
    Ok(format!("{}%", text.replace('.', ",")))
}

fn group_thousands(whole: f64) -> String {
    let digits = format!("{:.0}", whole);
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}
