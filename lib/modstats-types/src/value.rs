/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Double(f64),
    Signed(i64),
    Unsigned(u64),
}

impl MetricValue {
    /// Integers are always finite, doubles must not be NaN or infinite.
    pub fn is_finite(&self) -> bool {
        match self {
            MetricValue::Double(f) => f.is_finite(),
            MetricValue::Signed(_) | MetricValue::Unsigned(_) => true,
        }
    }
}

impl Default for MetricValue {
    fn default() -> Self {
        MetricValue::Unsigned(0)
    }
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(
            impl From<$t> for MetricValue {
                fn from(v: $t) -> Self {
                    MetricValue::Unsigned(v as u64)
                }
            }
        )*
    };
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(
            impl From<$t> for MetricValue {
                fn from(v: $t) -> Self {
                    MetricValue::Signed(v as i64)
                }
            }
        )*
    };
}

impl_from_unsigned!(u8, u16, u32, u64, usize);
impl_from_signed!(i8, i16, i32, i64, isize);

impl From<f32> for MetricValue {
    fn from(v: f32) -> Self {
        MetricValue::Double(f64::from(v))
    }
}

impl From<f64> for MetricValue {
    fn from(v: f64) -> Self {
        MetricValue::Double(v)
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Unsigned(u) => f.write_str(itoa::Buffer::new().format(*u)),
            MetricValue::Signed(i) => f.write_str(itoa::Buffer::new().format(*i)),
            MetricValue::Double(v) => f.write_str(ryu::Buffer::new().format(*v)),
        }
    }
}
