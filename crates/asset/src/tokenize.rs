//! Character-level tokenizers for numeric attribute lines and face lines.
//!
//! Both scanners skip the leading keyword implicitly: values only begin once
//! the first whitespace separator has been seen. Exponent notation and
//! thousands separators are not understood; malformed numbers degrade to a
//! best-effort value instead of failing.

/// Digit accumulator shared by both scanners.
#[derive(Debug, Default)]
struct Digits {
    digits: Vec<u8>,
    negative: bool,
    decimal_seen: bool,
    decimals: i32,
}

impl Digits {
    fn push_digit(&mut self, digit: u8) {
        self.digits.push(digit);
        if self.decimal_seen {
            self.decimals += 1;
        }
    }

    fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Finish the current number as a decimal value. Returns `None` when no
    /// digits were accumulated so empty tokens never produce a spurious zero.
    fn take_float(&mut self) -> Option<f32> {
        let value = if self.digits.is_empty() {
            None
        } else {
            let len = self.digits.len() as i32;
            let magnitude: f64 = self
                .digits
                .iter()
                .enumerate()
                .map(|(n, &d)| f64::from(d) * 10f64.powi(len - self.decimals - 1 - n as i32))
                .sum();
            let signed = if self.negative { -magnitude } else { magnitude };
            Some(signed as f32)
        };
        *self = Self::default();
        value
    }

    /// Finish the current number as an index; 0 when nothing was accumulated.
    fn take_index(&mut self) -> u32 {
        let value = self
            .digits
            .iter()
            .fold(0u32, |acc, &d| acc.saturating_mul(10).saturating_add(u32::from(d)));
        *self = Self::default();
        value
    }
}

fn digit_value(c: char) -> Option<u8> {
    c.to_digit(10).map(|d| d as u8)
}

/// Extract the decimal numbers following the keyword of `line`.
///
/// `"v 1.0 -2.5 3"` yields `[1.0, -2.5, 3.0]`.
pub fn extract_floats(line: &str) -> Vec<f32> {
    let mut floats = Vec::new();
    let mut acc = Digits::default();
    let mut values_begin = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        let separator = c.is_whitespace();
        match c {
            '-' => acc.negative = true,
            '.' => acc.decimal_seen = true,
            _ => {
                if let Some(d) = digit_value(c) {
                    acc.push_digit(d);
                }
            }
        }

        if (separator && values_begin) || chars.peek().is_none() {
            floats.extend(acc.take_float());
        } else if separator {
            values_begin = true;
        }
    }

    floats
}

/// Extract `position[/uv][/normal]` index groups from a face line.
///
/// Every group is padded to a triple; 0 marks an absent sub-index, so
/// `"f 1//1 2//2 3//3"` yields `[[1, 0, 1], [2, 0, 2], [3, 0, 3]]`.
/// Relative (negative) indices are unsupported: a group containing a sign
/// comes back as `[0, 0, 0]`.
pub fn extract_face_sequence(line: &str) -> Vec<[u32; 3]> {
    let mut groups = Vec::new();
    let mut group: Vec<u32> = Vec::with_capacity(3);
    let mut acc = Digits::default();
    let mut signed = false;
    let mut values_begin = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        let separator = c.is_whitespace();
        if c == '-' {
            signed = true;
        } else if c == '/' {
            group.push(acc.take_index());
        } else if let Some(d) = digit_value(c) {
            acc.push_digit(d);
        }

        if (separator && values_begin) || chars.peek().is_none() {
            if !acc.is_empty() || !group.is_empty() || signed {
                group.push(acc.take_index());
                groups.push(if signed {
                    [0; 3]
                } else {
                    [
                        group.first().copied().unwrap_or(0),
                        group.get(1).copied().unwrap_or(0),
                        group.get(2).copied().unwrap_or(0),
                    ]
                });
            }
            group.clear();
            signed = false;
        } else if separator {
            values_begin = true;
        }
    }

    groups
}
