//! Digit-sum numerology.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Numerology {
    pub life_path: String,
    pub birthday: String,
}

impl Numerology {
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            life_path: life_path_number(date),
            birthday: birthday_number(date),
        }
    }
}

fn digit_sum(mut n: u32) -> u32 {
    let mut sum = 0;
    while n > 0 {
        sum += n % 10;
        n /= 10;
    }
    sum
}

fn master_label(n: u32) -> Option<&'static str> {
    match n {
        11 => Some("11/2"),
        22 => Some("22/4"),
        33 => Some("33/6"),
        _ => None,
    }
}

/// Reduce a digit sum to a single digit.
///
/// 11, 22, 28 and 33 are kept with their reduction, e.g. `"28/1"`; a
/// master number reached part way through also stops the reduction.
pub fn reduce_number(n: u32) -> String {
    if n == 28 {
        return "28/1".to_string();
    }
    let mut value = n;
    loop {
        if let Some(label) = master_label(value) {
            return label.to_string();
        }
        if value <= 9 {
            return value.to_string();
        }
        value = digit_sum(value);
    }
}

/// Sum of every digit of the date, reduced.
pub fn life_path_number(date: NaiveDate) -> String {
    let year = date.year().unsigned_abs();
    reduce_number(digit_sum(year) + digit_sum(date.month()) + digit_sum(date.day()))
}

pub fn birthday_number(date: NaiveDate) -> String {
    reduce_number(date.day())
}
