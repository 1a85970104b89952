use regex::{Regex, RegexBuilder};
use tracing::debug;

/// Outcome of classifying one filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub matched: bool,
    pub serial: Option<u64>,
    pub remainder: Option<String>,
    pub extension: String,
}

impl Classification {
    fn no_match(extension: &str) -> Self {
        Self {
            matched: false,
            serial: None,
            remainder: None,
            extension: extension.to_string(),
        }
    }
}

/// Anchored `^(\d+)[separators]+(.*)$` matcher over a filename stem.
#[derive(Debug, Clone)]
pub struct SerialPattern {
    regex: Regex,
}

impl SerialPattern {
    /// Build the matcher from the configured separators. Every separator is
    /// escaped on its own so `.` and friends stay literal inside the class.
    pub fn new(separators: &[char]) -> Result<Self, regex::Error> {
        let class: String = separators
            .iter()
            .map(|sep| regex::escape(&sep.to_string()))
            .collect();
        let pattern = format!(r"^(\d+)[{class}]+(.*)$");

        let regex = RegexBuilder::new(&pattern).case_insensitive(true).build()?;
        Ok(Self { regex })
    }

    pub fn classify(&self, filename: &str) -> Classification {
        let (stem, extension) = split_extension(filename);

        let Some(caps) = self.regex.captures(stem) else {
            return Classification::no_match(extension);
        };

        let digits = &caps[1];
        let Some(serial) = parse_serial(digits) else {
            debug!(filename, digits, "Rejecting serial prefix that does not fit in u64");
            return Classification::no_match(extension);
        };

        Classification {
            matched: true,
            serial: Some(serial),
            remainder: Some(caps[2].trim().to_string()),
            extension: extension.to_string(),
        }
    }
}

/// First code point of every run of ten Unicode decimal digits (category Nd)
const DECIMAL_ZEROS: &[u32] = &[
    0x0030, 0x0660, 0x06F0, 0x07C0, 0x0966, 0x09E6, 0x0A66, 0x0AE6, 0x0B66, 0x0BE6, 0x0C66,
    0x0CE6, 0x0D66, 0x0DE6, 0x0E50, 0x0ED0, 0x0F20, 0x1040, 0x1090, 0x17E0, 0x1810, 0x1946,
    0x19D0, 0x1A80, 0x1A90, 0x1B50, 0x1BB0, 0x1C40, 0x1C50, 0xA620, 0xA8D0, 0xA900, 0xA9D0,
    0xA9F0, 0xAA50, 0xABF0, 0xFF10, 0x104A0, 0x10D30, 0x11066, 0x110F0, 0x11136, 0x111D0,
    0x112F0, 0x11450, 0x114D0, 0x11650, 0x116C0, 0x11730, 0x118E0, 0x11950, 0x11C50, 0x11D50,
    0x11DA0, 0x11F50, 0x16A60, 0x16AC0, 0x16B50, 0x1D7CE, 0x1D7D8, 0x1D7E2, 0x1D7EC, 0x1D7F6,
    0x1E140, 0x1E2F0, 0x1E4F0, 0x1E950, 0x1FBF0,
];

/// Numeric value of a Unicode decimal digit, in any script
fn decimal_digit_value(c: char) -> Option<u32> {
    let code = u32::from(c);
    let idx = DECIMAL_ZEROS.partition_point(|&zero| zero <= code);
    let zero = DECIMAL_ZEROS[idx.checked_sub(1)?];
    let value = code - zero;
    (value < 10).then_some(value)
}

/// Value of a run of decimal digits, `None` on overflow or a non-digit
fn parse_serial(digits: &str) -> Option<u64> {
    digits.chars().try_fold(0u64, |acc, c| {
        let digit = decimal_digit_value(c)?;
        acc.checked_mul(10)?.checked_add(u64::from(digit))
    })
}

/// Split a filename into stem and extension. The extension keeps its dot and
/// starts at the last `.`, except that leading dots never start one
/// (`.bashrc` has no extension).
pub fn split_extension(filename: &str) -> (&str, &str) {
    let leading_dots = filename.len() - filename.trim_start_matches('.').len();
    match filename.rfind('.') {
        Some(idx) if idx >= leading_dots => filename.split_at(idx),
        _ => (filename, ""),
    }
}
