//! Human-scaled byte formatting for size columns and totals

use serde::{Deserialize, Serialize};

/// Binary unit ladder used for size display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ByteUnit {
    #[serde(rename = "B")]
    Bytes,
    KiB,
    MiB,
    GiB,
    TiB,
}

impl ByteUnit {
    /// Units in ascending order; the index is the power of 1024.
    pub const LADDER: [ByteUnit; 5] = [
        ByteUnit::Bytes,
        ByteUnit::KiB,
        ByteUnit::MiB,
        ByteUnit::GiB,
        ByteUnit::TiB,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            ByteUnit::Bytes => "B",
            ByteUnit::KiB => "KiB",
            ByteUnit::MiB => "MiB",
            ByteUnit::GiB => "GiB",
            ByteUnit::TiB => "TiB",
        }
    }
}

impl std::fmt::Display for ByteUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A display-ready value and its unit, e.g. `("9.8", KiB)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedBytes {
    pub value: String,
    pub unit: ByteUnit,
}

impl std::fmt::Display for FormattedBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

/// Scales `value` down to the largest unit it fills.
///
/// Unit `d` (a power of 1024) is picked when `value >= 10^limes * 1000^(d-1)`,
/// so with `limes = 3` anything from 1000 bytes up is shown in KiB. The
/// scaled value is rounded half-up to `comma` decimals; a zero decimal part
/// is dropped.
pub fn format_byte_down(value: u64, limes: u32, comma: u32) -> FormattedBytes {
    let dh = 10f64.powi(comma as i32);
    let li = 10f64.powi(limes as i32);
    let raw = value as f64;

    for (d, unit) in ByteUnit::LADDER.iter().enumerate().skip(1).rev() {
        let unit_size = li * 10f64.powi(3 * (d as i32 - 1));
        if raw >= unit_size {
            let scaled = (raw / (1024f64.powi(d as i32) / dh)).round() / dh;
            return FormattedBytes {
                value: format_number(scaled, comma as usize),
                unit: *unit,
            };
        }
    }

    FormattedBytes {
        value: group_thousands(&value.to_string()),
        unit: ByteUnit::Bytes,
    }
}

/// Size column formatting: three significant integer digits, one decimal
/// for non-zero values.
pub fn format_size(bytes: u64) -> FormattedBytes {
    format_byte_down(bytes, 3, if bytes > 0 { 1 } else { 0 })
}

fn format_number(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value);
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part.trim_end_matches('0')),
        None => (fixed.as_str(), ""),
    };

    let grouped = group_thousands(int_part);
    if frac_part.is_empty() {
        grouped
    } else {
        format!("{}.{}", grouped, frac_part)
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
