// ABOUTME: Decimal rounding helpers for reported quantities
// ABOUTME: All kcal, minute, and nutrient values are reported to one decimal place
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Round to one decimal place, halves away from zero
#[must_use]
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
