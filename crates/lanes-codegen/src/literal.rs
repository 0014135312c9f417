use lanes_kind::{NumericKind, NumericValue};

/// The rendered literal did not fit the caller's buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityError {
    pub given: usize,
    pub needed: usize,
    /// Bytes of the truncated literal that were written.
    pub written: usize,
}

impl CapacityError {
    #[must_use]
    pub const fn reason_code(self) -> &'static str {
        "literal_capacity_exceeded"
    }
}

impl std::fmt::Display for CapacityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "not enough space to write value (given {} bytes, need {} bytes)",
            self.given, self.needed
        )
    }
}

impl std::error::Error for CapacityError {}

/// Renders one value as its canonical, column-aligned literal.
///
/// Sentinels win over the generic form: NaN and infinities for floats, the
/// type minimum for signed integers, and the type maximum for all integers.
#[must_use]
pub fn format_literal(value: NumericValue) -> String {
    let kind = value.kind();
    if let Some(v) = value.as_f64() {
        return float_literal(kind, v);
    }

    if value.is_min_sentinel() {
        return sentinel(kind.min_token(), kind.sentinel_width());
    }
    if value.is_max_sentinel() {
        return sentinel(kind.max_token(), kind.sentinel_width());
    }

    let magnitude = value.unsigned_magnitude().unwrap_or_default();
    let width = kind.digit_width();
    let wrapper = kind.literal_wrapper();
    if kind.is_signed() {
        let sign = if value.is_negative() { '-' } else { ' ' };
        format!("{sign}{wrapper}({magnitude:>width$})")
    } else {
        format!("{wrapper}({magnitude:>width$})")
    }
}

/// Writes the literal for `value` into `buf` and returns the byte count.
///
/// When the literal does not fit, the leading bytes that do fit are still
/// written and the error carries how many.
pub fn write_literal(buf: &mut [u8], value: NumericValue) -> Result<usize, CapacityError> {
    let text = format_literal(value);
    let bytes = text.as_bytes();
    let written = bytes.len().min(buf.len());
    buf[..written].copy_from_slice(&bytes[..written]);
    if written < bytes.len() {
        return Err(CapacityError {
            given: buf.len(),
            needed: bytes.len(),
            written,
        });
    }
    Ok(written)
}

fn float_literal(kind: NumericKind, v: f64) -> String {
    if v.is_nan() {
        return sentinel(kind.nan_token(), kind.sentinel_width());
    }
    if v.is_infinite() {
        let sign = if v < 0.0 { '-' } else { ' ' };
        let width = kind.infinity_sign_width();
        let token = kind.infinity_token().unwrap_or_default();
        return format!("{sign:>width$}{token}");
    }
    let width = kind.digit_width();
    format!("{}({v:>width$.2})", kind.literal_wrapper())
}

fn sentinel(token: Option<&'static str>, width: usize) -> String {
    let token = token.unwrap_or_default();
    format!("{token:>width$}")
}
