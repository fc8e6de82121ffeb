use crate::common::{Error, Result};
use crate::storage::tuple::Row;
use crate::types::field::Field;

/// A scalar expression evaluated against a row. `SeqScan` uses these for its predicate and for
/// projecting each output-schema column; this stays a closed set rather than growing toward a
/// general expression language, since planning/optimization of SQL expressions is out of scope.
#[derive(Debug, Clone)]
pub enum Expression {
    /// References the row's column at this index.
    Column(usize),
    /// A fixed value, independent of the row.
    Constant(Field),
}

impl Expression {
    pub fn evaluate(&self, row: &Row) -> Result<Field> {
        match self {
            Expression::Column(index) => row.get_field(*index),
            Expression::Constant(field) => Ok(field.clone()),
        }
    }

    /// Evaluates this expression as a boolean predicate. Errors if the result isn't a boolean.
    pub fn evaluate_predicate(&self, row: &Row) -> Result<bool> {
        match self.evaluate(row)? {
            Field::Boolean(b) => Ok(b),
            other => Err(Error::InvalidData(format!(
                "predicate expression evaluated to {other}, expected a boolean"
            ))),
        }
    }

    /// The identity projection for a table with `col_count` columns: `[Column(0), Column(1), ...]`.
    pub fn identity_projection(col_count: usize) -> Vec<Expression> {
        (0..col_count).map(Expression::Column).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> Row {
        Row::from(vec![Field::Integer(7), Field::Boolean(true)])
    }

    #[test]
    fn test_column_evaluates_to_field_at_index() {
        assert_eq!(Expression::Column(0).evaluate(&row()).unwrap(), Field::Integer(7));
    }

    #[test]
    fn test_constant_ignores_row() {
        let expr = Expression::Constant(Field::from("hi"));
        assert_eq!(expr.evaluate(&row()).unwrap(), Field::String("hi".to_string()));
    }

    #[test]
    fn test_evaluate_predicate_true() {
        assert!(Expression::Column(1).evaluate_predicate(&row()).unwrap());
    }

    #[test]
    fn test_evaluate_predicate_non_boolean_errors() {
        assert!(Expression::Column(0).evaluate_predicate(&row()).is_err());
    }

    #[test]
    fn test_identity_projection_covers_all_columns() {
        let projection = Expression::identity_projection(3);
        assert_eq!(projection.len(), 3);
        assert!(matches!(projection[2], Expression::Column(2)));
    }
}
