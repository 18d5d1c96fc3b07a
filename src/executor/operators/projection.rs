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

//! Column projection.

use crate::core::{Error, Result, Row};
use crate::executor::observer::ExecutionObserver;
use crate::executor::operator::{ColumnInfo, Operator, PlanNodeId};

/// Selects (and optionally renames) columns of its input.
///
/// Projected columns keep their base-table source.
pub struct ProjectionOperator {
    id: PlanNodeId,
    input: Box<dyn Operator>,
    indices: Vec<usize>,
    schema: Vec<ColumnInfo>,
}

impl ProjectionOperator {
    /// Project `indices` of the input schema, in that order.
    pub fn new(input: Box<dyn Operator>, indices: Vec<usize>) -> Result<Self> {
        let input_schema = input.schema();
        let schema = indices
            .iter()
            .map(|&idx| {
                input_schema
                    .get(idx)
                    .cloned()
                    .ok_or(Error::ColumnIndexOutOfBounds { index: idx })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            id: PlanNodeId::next(),
            input,
            indices,
            schema,
        })
    }

    /// Project input columns by name.
    pub fn by_name(input: Box<dyn Operator>, names: &[&str]) -> Result<Self> {
        let indices = names
            .iter()
            .map(|name| {
                input
                    .schema()
                    .iter()
                    .position(|c| c.name.eq_ignore_ascii_case(name))
                    .ok_or_else(|| Error::invalid_argument(format!("unknown column '{}'", name)))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(input, indices)
    }

    /// Rename output columns (AS aliases).
    pub fn with_aliases(mut self, aliases: &[&str]) -> Result<Self> {
        if aliases.len() != self.schema.len() {
            return Err(Error::invalid_argument(format!(
                "expected {} aliases, got {}",
                self.schema.len(),
                aliases.len()
            )));
        }
        self.schema = self
            .schema
            .iter()
            .zip(aliases)
            .map(|(col, alias)| col.renamed(*alias))
            .collect();
        Ok(self)
    }
}

impl Operator for ProjectionOperator {
    fn open(&mut self, observer: &mut dyn ExecutionObserver) -> Result<()> {
        self.input.open(observer)
    }

    fn next(&mut self) -> Result<Option<Row>> {
        match self.input.next()? {
            Some(row) => Ok(Some(row.select_columns(&self.indices)?)),
            None => Ok(None),
        }
    }

    fn close(&mut self) -> Result<()> {
        self.input.close()
    }

    fn schema(&self) -> &[ColumnInfo] {
        &self.schema
    }

    fn id(&self) -> PlanNodeId {
        self.id
    }

    fn estimated_rows(&self) -> Option<usize> {
        self.input.estimated_rows()
    }

    fn name(&self) -> &str {
        "Projection"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DataType, Value};
    use crate::executor::observer::NoopObserver;
    use crate::executor::operator::MaterializedOperator;

    fn input() -> Box<dyn Operator> {
        Box::new(MaterializedOperator::new(
            vec![Row::from_values(vec![
                Value::integer(1),
                Value::text("a"),
                Value::integer(10),
            ])],
            vec![
                ColumnInfo::new("id", DataType::Integer),
                ColumnInfo::new("name", DataType::Text),
                ColumnInfo::new("score", DataType::Integer),
            ],
        ))
    }

    #[test]
    fn test_projection_reorders() {
        let mut op = ProjectionOperator::by_name(input(), &["score", "id"])
            .unwrap()
            .with_aliases(&["s", "i"])
            .unwrap();
        assert_eq!(op.schema()[0].name, "s");
        assert_eq!(op.schema()[1].data_type, DataType::Integer);

        op.open(&mut NoopObserver).unwrap();
        let row = op.next().unwrap().unwrap();
        assert_eq!(row.as_slice(), &[Value::integer(10), Value::integer(1)]);
        assert!(op.next().unwrap().is_none());
        op.close().unwrap();
    }

    #[test]
    fn test_projection_rejects_bad_index() {
        assert!(matches!(
            ProjectionOperator::new(input(), vec![0, 3]),
            Err(Error::ColumnIndexOutOfBounds { index: 3 })
        ));
        assert!(ProjectionOperator::by_name(input(), &["missing"]).is_err());
        assert!(ProjectionOperator::new(input(), vec![0])
            .unwrap()
            .with_aliases(&["a", "b"])
            .is_err());
    }
}
