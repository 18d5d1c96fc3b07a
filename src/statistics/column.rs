// Copyright 2025 Stoolap Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Per-column running statistics
//!
//! A [`ColumnStatistic`] is updated from every value of its column in the
//! root's output. Fields marked final were established by a pushed-down
//! equality filter and are never touched again by row observation.

use std::fmt::{self, Write as _};

use super::distinct::DistinctSet;
use crate::core::{DataType, Value};

/// How values of a declared column type are aggregated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatKind {
    /// Whole numbers
    Integral,
    /// Fractional numbers, approximated by truncation to an integer
    Decimal,
    /// Character data
    Text,
    /// No statistics are kept
    Unsupported,
}

impl StatKind {
    pub fn of(data_type: DataType) -> Self {
        match data_type {
            DataType::Integer => StatKind::Integral,
            DataType::Float => StatKind::Decimal,
            DataType::Text => StatKind::Text,
            DataType::Null | DataType::Boolean | DataType::Timestamp => StatKind::Unsupported,
        }
    }
}

/// A min/max/most-frequent value in wide-integer form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatValue {
    Integer(i64),
    /// Decimal truncated toward zero
    Decimal(i64),
}

impl StatValue {
    #[inline]
    pub fn as_i64(&self) -> i64 {
        match self {
            StatValue::Integer(v) | StatValue::Decimal(v) => *v,
        }
    }

    /// Wide-integer form of a predicate constant
    ///
    /// Numeric text is accepted; anything else has no form.
    pub fn from_constant(value: &Value) -> Option<Self> {
        match value {
            Value::Float(_) => value.as_int64().map(StatValue::Decimal),
            Value::Null(_) | Value::Boolean(_) | Value::Timestamp(_) => None,
            _ => value.as_int64().map(StatValue::Integer),
        }
    }

    fn from_repr(kind: StatKind, repr: &str) -> Option<Self> {
        let v = repr.parse::<i64>().ok()?;
        match kind {
            StatKind::Integral => Some(StatValue::Integer(v)),
            StatKind::Decimal => Some(StatValue::Decimal(v)),
            _ => None,
        }
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i64())
    }
}

/// Running statistics for one output column
#[derive(Debug, Clone, Default)]
pub struct ColumnStatistic {
    is_numeric: bool,
    min_value: Option<StatValue>,
    max_value: Option<StatValue>,
    most_frequent_value: Option<StatValue>,
    distinct: DistinctSet,

    min_final: bool,
    max_final: bool,
    most_frequent_final: bool,
    distinct_final: bool,
}

impl ColumnStatistic {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the column to a single value known from an equality filter
    ///
    /// Sets every finality flag. A constant with no wide-integer form leaves
    /// the values absent but still marks them final.
    pub fn pin(&mut self, constant: &Value) {
        let value = StatValue::from_constant(constant);
        self.min_value = value;
        self.max_value = value;
        self.most_frequent_value = value;
        self.is_numeric = true;

        self.min_final = true;
        self.max_final = true;
        self.most_frequent_final = true;
        self.distinct_final = true;
    }

    /// Observe one value of the column
    ///
    /// `repr` is cleared and receives the value's string representation,
    /// which is empty for NULL and unsupported values.
    pub fn observe(&mut self, kind: StatKind, value: &Value, repr: &mut String) {
        repr.clear();
        if value.is_null() {
            return;
        }

        match (kind, value) {
            (StatKind::Integral, Value::Integer(v)) => {
                self.observe_number(StatValue::Integer(*v), repr);
            }
            (StatKind::Decimal, Value::Float(_) | Value::Integer(_)) => {
                if let Some(v) = value.as_int64() {
                    self.observe_number(StatValue::Decimal(v), repr);
                }
            }
            (StatKind::Text, Value::Text(s)) => {
                repr.push_str(s);
                if !self.is_pinned() {
                    self.is_numeric = false;
                }
                if !self.distinct_final {
                    self.distinct.insert(repr.as_str());
                }
            }
            _ => {}
        }
    }

    fn observe_number(&mut self, value: StatValue, repr: &mut String) {
        // Writing into a String cannot fail
        let _ = write!(repr, "{}", value.as_i64());
        if !self.is_pinned() {
            self.is_numeric = true;
        }

        if !self.min_final && self.min_value.map_or(true, |min| value.as_i64() < min.as_i64()) {
            self.min_value = Some(value);
        }
        if !self.max_final && self.max_value.map_or(true, |max| value.as_i64() > max.as_i64()) {
            self.max_value = Some(value);
        }
        if !self.distinct_final {
            self.distinct.insert(repr.as_str());
        }
    }

    /// Derive the most frequent value from the distinct set
    ///
    /// No-op for pinned columns and text columns.
    pub fn resolve_most_frequent(&mut self, kind: StatKind) {
        if self.most_frequent_final {
            return;
        }
        self.most_frequent_value = self
            .distinct
            .most_frequent()
            .and_then(|(repr, _)| StatValue::from_repr(kind, repr));
    }

    /// Approximate distinct count after `rows` observed rows
    pub fn distinct_count(&self, rows: u64) -> u64 {
        if self.distinct_final {
            u64::from(rows > 0)
        } else {
            self.distinct.len() as u64
        }
    }

    /// Most frequent representation and its count, if any
    pub fn most_frequent_repr(&self) -> Option<(&str, u64)> {
        self.distinct.most_frequent()
    }

    pub fn is_numeric(&self) -> bool {
        self.is_numeric
    }

    pub fn min_value(&self) -> Option<StatValue> {
        self.min_value
    }

    pub fn max_value(&self) -> Option<StatValue> {
        self.max_value
    }

    pub fn most_frequent_value(&self) -> Option<StatValue> {
        self.most_frequent_value
    }

    pub fn distinct(&self) -> &DistinctSet {
        &self.distinct
    }

    pub fn is_min_final(&self) -> bool {
        self.min_final
    }

    pub fn is_max_final(&self) -> bool {
        self.max_final
    }

    pub fn is_most_frequent_final(&self) -> bool {
        self.most_frequent_final
    }

    pub fn is_distinct_final(&self) -> bool {
        self.distinct_final
    }

    /// True when the column was pinned by an equality filter
    pub fn is_pinned(&self) -> bool {
        self.min_final && self.max_final && self.most_frequent_final && self.distinct_final
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observe_all(stat: &mut ColumnStatistic, kind: StatKind, values: &[Value]) -> Vec<String> {
        let mut out = Vec::new();
        let mut repr = String::new();
        for v in values {
            stat.observe(kind, v, &mut repr);
            out.push(repr.clone());
        }
        out
    }

    #[test]
    fn test_integral_bounds() {
        let mut stat = ColumnStatistic::new();
        let reprs = observe_all(
            &mut stat,
            StatKind::Integral,
            &[Value::integer(3), Value::integer(-4), Value::integer(9), Value::integer(3)],
        );

        assert_eq!(reprs, vec!["3", "-4", "9", "3"]);
        assert!(stat.is_numeric());
        assert_eq!(stat.min_value(), Some(StatValue::Integer(-4)));
        assert_eq!(stat.max_value(), Some(StatValue::Integer(9)));
        assert_eq!(stat.distinct_count(4), 3);

        stat.resolve_most_frequent(StatKind::Integral);
        assert_eq!(stat.most_frequent_value(), Some(StatValue::Integer(3)));
    }

    #[test]
    fn test_extreme_values_are_real_bounds() {
        let mut stat = ColumnStatistic::new();
        observe_all(
            &mut stat,
            StatKind::Integral,
            &[Value::integer(i64::MAX), Value::integer(i64::MIN)],
        );
        assert_eq!(stat.min_value(), Some(StatValue::Integer(i64::MIN)));
        assert_eq!(stat.max_value(), Some(StatValue::Integer(i64::MAX)));
    }

    #[test]
    fn test_decimal_truncates() {
        let mut stat = ColumnStatistic::new();
        let reprs = observe_all(
            &mut stat,
            StatKind::Decimal,
            &[Value::float(2.9), Value::float(-1.5), Value::integer(4)],
        );
        assert_eq!(reprs, vec!["2", "-1", "4"]);
        assert_eq!(stat.min_value(), Some(StatValue::Decimal(-1)));
        assert_eq!(stat.max_value(), Some(StatValue::Decimal(4)));
    }

    #[test]
    fn test_text_marks_non_numeric() {
        let mut stat = ColumnStatistic::new();
        let reprs = observe_all(
            &mut stat,
            StatKind::Text,
            &[Value::text("Can"), Value::text("Faust"), Value::text("Can")],
        );
        assert_eq!(reprs, vec!["Can", "Faust", "Can"]);
        assert!(!stat.is_numeric());
        assert_eq!(stat.min_value(), None);
        assert_eq!(stat.distinct_count(3), 2);
        assert_eq!(stat.most_frequent_repr(), Some(("Can", 2)));
    }

    #[test]
    fn test_null_and_unsupported_leave_stats_untouched() {
        let mut stat = ColumnStatistic::new();
        let reprs = observe_all(
            &mut stat,
            StatKind::Integral,
            &[Value::null(DataType::Integer), Value::text("12")],
        );
        assert_eq!(reprs, vec!["", ""]);
        assert_eq!(stat.min_value(), None);
        assert!(stat.distinct().is_empty());

        let mut stat = ColumnStatistic::new();
        let reprs = observe_all(&mut stat, StatKind::Unsupported, &[Value::boolean(true)]);
        assert_eq!(reprs, vec![""]);
        assert!(stat.distinct().is_empty());
    }

    #[test]
    fn test_pinned_column_is_frozen() {
        let mut stat = ColumnStatistic::new();
        stat.pin(&Value::integer(7));
        assert!(stat.is_pinned());
        assert_eq!(stat.distinct_count(0), 0);

        let reprs = observe_all(
            &mut stat,
            StatKind::Integral,
            &[Value::integer(1), Value::integer(100)],
        );
        // the representation is still produced for pairwise sets
        assert_eq!(reprs, vec!["1", "100"]);
        assert_eq!(stat.min_value(), Some(StatValue::Integer(7)));
        assert_eq!(stat.max_value(), Some(StatValue::Integer(7)));
        assert_eq!(stat.most_frequent_value(), Some(StatValue::Integer(7)));
        assert!(stat.distinct().is_empty());
        assert_eq!(stat.distinct_count(2), 1);

        stat.resolve_most_frequent(StatKind::Integral);
        assert_eq!(stat.most_frequent_value(), Some(StatValue::Integer(7)));
    }

    #[test]
    fn test_pin_with_text_constant() {
        let mut stat = ColumnStatistic::new();
        stat.pin(&Value::text("42"));
        assert_eq!(stat.min_value(), Some(StatValue::Integer(42)));

        let mut stat = ColumnStatistic::new();
        stat.pin(&Value::text("Can"));
        assert!(stat.is_pinned());
        assert_eq!(stat.min_value(), None);
        assert_eq!(stat.most_frequent_value(), None);

        // Later text rows keep the pinned numeric marker
        let reprs = observe_all(&mut stat, StatKind::Text, &[Value::text("Can")]);
        assert_eq!(reprs, vec!["Can"]);
        assert!(stat.is_numeric());
    }

    #[test]
    fn test_stat_kind_of() {
        assert_eq!(StatKind::of(DataType::Integer), StatKind::Integral);
        assert_eq!(StatKind::of(DataType::Float), StatKind::Decimal);
        assert_eq!(StatKind::of(DataType::Text), StatKind::Text);
        assert_eq!(StatKind::of(DataType::Timestamp), StatKind::Unsupported);
    }
}
