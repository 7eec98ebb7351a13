use crate::error::EngineError;

pub const MAX_REP_ID_LENGTH: usize = 64;
pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 2200;

/// Month abbreviations accepted in month lists, Portuguese first, then
/// English where it differs.
pub const MONTH_NAMES: &[(&str, u32)] = &[
    ("jan", 1),
    ("fev", 2),
    ("feb", 2),
    ("mar", 3),
    ("abr", 4),
    ("apr", 4),
    ("mai", 5),
    ("may", 5),
    ("jun", 6),
    ("jul", 7),
    ("ago", 8),
    ("aug", 8),
    ("set", 9),
    ("sep", 9),
    ("out", 10),
    ("oct", 10),
    ("nov", 11),
    ("dez", 12),
    ("dec", 12),
];

/// Strip ASCII control characters (0x00-0x1F except space 0x20), trim whitespace,
/// and enforce a byte-length limit.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, EngineError> {
    if input.len() > max_len {
        return Err(EngineError::InvalidInput(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    let sanitized: String = input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string();
    if sanitized.is_empty() {
        return Err(EngineError::InvalidInput(
            "input is empty after sanitization".to_string(),
        ));
    }
    Ok(sanitized)
}

/// Validate a rep id as typed on the command line.
pub fn validate_rep_id(input: &str) -> Result<String, EngineError> {
    sanitize_text(input, MAX_REP_ID_LENGTH)
}

/// Validate a calendar year: 1900..=2200.
pub fn validate_year(year: i32) -> Result<i32, EngineError> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(EngineError::InvalidInput(format!(
            "year must be between {} and {}, got {}",
            MIN_YEAR, MAX_YEAR, year
        )));
    }
    Ok(year)
}

/// Validate a single month: a number 1-12 or an abbreviation (`jan`, `fev`, `feb`, ...).
pub fn validate_month(input: &str) -> Result<u32, EngineError> {
    let lower = input.trim().to_lowercase();
    if let Ok(n) = lower.parse::<u32>() {
        if (1..=12).contains(&n) {
            return Ok(n);
        }
    }
    for &(name, number) in MONTH_NAMES {
        if name == lower {
            return Ok(number);
        }
    }
    Err(EngineError::InvalidInput(format!(
        "unknown month '{}'. Expected 1-12 or an abbreviation (jan, fev, ..., dez)",
        input
    )))
}

/// Parse a month list such as `1,2,3`, `1-3`, `jan-mar,dez` or `all`.
///
/// Returns the months sorted and without duplicates.
pub fn validate_months(input: &str) -> Result<Vec<u32>, EngineError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidInput(
            "month list is empty".to_string(),
        ));
    }
    if matches!(trimmed.to_lowercase().as_str(), "all" | "todos" | "ano") {
        return Ok((1..=12).collect());
    }

    let mut months = Vec::new();
    for part in trimmed.split(',') {
        let part = part.trim();
        match part.split_once('-') {
            Some((start, end)) => {
                let start = validate_month(start)?;
                let end = validate_month(end)?;
                if start > end {
                    return Err(EngineError::InvalidInput(format!(
                        "month range '{}' runs backwards",
                        part
                    )));
                }
                months.extend(start..=end);
            }
            None => months.push(validate_month(part)?),
        }
    }
    months.sort_unstable();
    months.dedup();
    Ok(months)
}

/// Validate a `--top` limit: must be >= 1.
pub fn validate_top(top: usize) -> Result<usize, EngineError> {
    if top < 1 {
        return Err(EngineError::InvalidInput("top must be >= 1".to_string()));
    }
    Ok(top)
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- Month lists --

    #[test]
    fn months_comma_list() {
        assert_eq!(validate_months("1,2,3").unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn months_range() {
        assert_eq!(validate_months("1-3").unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn months_names_mixed() {
        assert_eq!(validate_months("jan-mar, dez").unwrap(), vec![1, 2, 3, 12]);
        assert_eq!(validate_months("FEB,Set").unwrap(), vec![2, 9]);
    }

    #[test]
    fn months_all() {
        assert_eq!(validate_months("all").unwrap().len(), 12);
        assert_eq!(validate_months("ANO").unwrap().len(), 12);
    }

    #[test]
    fn months_deduplicated_and_sorted() {
        assert_eq!(validate_months("3,1,1-2").unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn months_invalid() {
        assert!(validate_months("13").is_err());
        assert!(validate_months("0").is_err());
        assert!(validate_months("janeiro").is_err());
        assert!(validate_months("").is_err());
        assert!(validate_months("1,,2").is_err());
    }

    #[test]
    fn months_backwards_range() {
        assert!(matches!(
            validate_months("5-2"),
            Err(EngineError::InvalidInput(_))
        ));
    }

    // -- Year --

    #[test]
    fn year_bounds() {
        assert_eq!(validate_year(2024).unwrap(), 2024);
        assert_eq!(validate_year(1900).unwrap(), 1900);
        assert_eq!(validate_year(2200).unwrap(), 2200);
        assert!(validate_year(1899).is_err());
        assert!(validate_year(2201).is_err());
    }

    // -- Rep id --

    #[test]
    fn rep_id_trimmed() {
        assert_eq!(validate_rep_id("  u1 ").unwrap(), "u1");
    }

    #[test]
    fn rep_id_control_chars_stripped() {
        assert_eq!(validate_rep_id("u\x001\n").unwrap(), "u1");
    }

    #[test]
    fn rep_id_empty() {
        assert!(validate_rep_id("   ").is_err());
    }

    #[test]
    fn rep_id_too_long() {
        assert!(validate_rep_id(&"x".repeat(MAX_REP_ID_LENGTH + 1)).is_err());
    }

    #[test]
    fn top_zero_rejected() {
        assert!(validate_top(0).is_err());
        assert_eq!(validate_top(5).unwrap(), 5);
    }
}
