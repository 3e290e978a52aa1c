use serde_json::{Map, Value};

use chroma_common::{ChromaError, Result};

use crate::metadata::MetadataValue;

/// Comparison operator for a metadata leaf condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhereOperator {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
    Nin,
}

impl WhereOperator {
    /// Wire token ("$eq", "$in", ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            WhereOperator::Eq => "$eq",
            WhereOperator::Ne => "$ne",
            WhereOperator::Gt => "$gt",
            WhereOperator::Gte => "$gte",
            WhereOperator::Lt => "$lt",
            WhereOperator::Lte => "$lte",
            WhereOperator::In => "$in",
            WhereOperator::Nin => "$nin",
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "$eq" => Some(WhereOperator::Eq),
            "$ne" => Some(WhereOperator::Ne),
            "$gt" => Some(WhereOperator::Gt),
            "$gte" => Some(WhereOperator::Gte),
            "$lt" => Some(WhereOperator::Lt),
            "$lte" => Some(WhereOperator::Lte),
            "$in" => Some(WhereOperator::In),
            "$nin" => Some(WhereOperator::Nin),
            _ => None,
        }
    }

    /// Whether the operator takes a list operand instead of a scalar
    pub fn requires_list(&self) -> bool {
        matches!(self, WhereOperator::In | WhereOperator::Nin)
    }
}

/// Operand of a metadata leaf condition
#[derive(Debug, Clone, PartialEq)]
pub enum WhereOperand {
    Scalar(MetadataValue),
    List(Vec<MetadataValue>),
}

impl WhereOperand {
    fn to_value(&self) -> Value {
        match self {
            WhereOperand::Scalar(v) => v.to_value(),
            WhereOperand::List(items) => {
                Value::Array(items.iter().map(MetadataValue::to_value).collect())
            }
        }
    }

    fn from_value(field: &str, value: &Value) -> Result<Self> {
        match value {
            Value::Array(items) => {
                let list = items
                    .iter()
                    .map(|v| MetadataValue::from_value(field, v))
                    .collect::<Result<Vec<_>>>()?;
                Ok(WhereOperand::List(list))
            }
            other => Ok(WhereOperand::Scalar(MetadataValue::from_value(
                field, other,
            )?)),
        }
    }
}

/// Recursive boolean predicate over record metadata
///
/// Leaves compare one field against an operand; composites AND/OR an ordered
/// list of children. The wire form is the nested map structure Chroma's
/// filter protocol expects: `{field: {op: operand}}` for leaves and
/// `{"$and"|"$or": [child, ...]}` for composites.
#[derive(Debug, Clone, PartialEq)]
pub enum WhereOperation {
    Leaf {
        field: String,
        operator: WhereOperator,
        operand: WhereOperand,
    },
    Composite {
        and: bool,
        children: Vec<WhereOperation>,
    },
}

impl WhereOperation {
    /// Leaf condition with a scalar operand
    pub fn leaf(
        field: impl Into<String>,
        operator: WhereOperator,
        operand: impl Into<MetadataValue>,
    ) -> Self {
        WhereOperation::Leaf {
            field: field.into(),
            operator,
            operand: WhereOperand::Scalar(operand.into()),
        }
    }

    pub fn eq(field: impl Into<String>, operand: impl Into<MetadataValue>) -> Self {
        Self::leaf(field, WhereOperator::Eq, operand)
    }

    pub fn ne(field: impl Into<String>, operand: impl Into<MetadataValue>) -> Self {
        Self::leaf(field, WhereOperator::Ne, operand)
    }

    pub fn gt(field: impl Into<String>, operand: impl Into<MetadataValue>) -> Self {
        Self::leaf(field, WhereOperator::Gt, operand)
    }

    pub fn gte(field: impl Into<String>, operand: impl Into<MetadataValue>) -> Self {
        Self::leaf(field, WhereOperator::Gte, operand)
    }

    pub fn lt(field: impl Into<String>, operand: impl Into<MetadataValue>) -> Self {
        Self::leaf(field, WhereOperator::Lt, operand)
    }

    pub fn lte(field: impl Into<String>, operand: impl Into<MetadataValue>) -> Self {
        Self::leaf(field, WhereOperator::Lte, operand)
    }

    pub fn is_in(field: impl Into<String>, operands: Vec<MetadataValue>) -> Self {
        WhereOperation::Leaf {
            field: field.into(),
            operator: WhereOperator::In,
            operand: WhereOperand::List(operands),
        }
    }

    pub fn not_in(field: impl Into<String>, operands: Vec<MetadataValue>) -> Self {
        WhereOperation::Leaf {
            field: field.into(),
            operator: WhereOperator::Nin,
            operand: WhereOperand::List(operands),
        }
    }

    pub fn and(children: Vec<WhereOperation>) -> Self {
        WhereOperation::Composite {
            and: true,
            children,
        }
    }

    pub fn or(children: Vec<WhereOperation>) -> Self {
        WhereOperation::Composite {
            and: false,
            children,
        }
    }

    /// Check structural invariants: operand arity per operator, non-empty
    /// composites, non-empty field names
    pub fn validate(&self) -> Result<()> {
        match self {
            WhereOperation::Leaf {
                field,
                operator,
                operand,
            } => {
                if field.is_empty() {
                    return Err(ChromaError::invalid_filter("leaf has an empty field name"));
                }
                match operand {
                    WhereOperand::List(items) => {
                        if !operator.requires_list() {
                            return Err(ChromaError::invalid_filter(format!(
                                "operator {} on field '{}' requires a scalar operand",
                                operator.as_str(),
                                field
                            )));
                        }
                        if items.is_empty() {
                            return Err(ChromaError::invalid_filter(format!(
                                "operator {} on field '{}' requires a non-empty list",
                                operator.as_str(),
                                field
                            )));
                        }
                    }
                    WhereOperand::Scalar(_) => {
                        if operator.requires_list() {
                            return Err(ChromaError::invalid_filter(format!(
                                "operator {} on field '{}' requires a list operand",
                                operator.as_str(),
                                field
                            )));
                        }
                    }
                }
                Ok(())
            }
            WhereOperation::Composite { and, children } => {
                if children.is_empty() {
                    let token = if *and { "$and" } else { "$or" };
                    return Err(ChromaError::invalid_filter(format!(
                        "{} must have at least one child",
                        token
                    )));
                }
                for child in children {
                    child.validate()?;
                }
                Ok(())
            }
        }
    }

    /// Render to the wire map structure
    pub fn to_value(&self) -> Value {
        match self {
            WhereOperation::Leaf {
                field,
                operator,
                operand,
            } => {
                let mut condition = Map::new();
                condition.insert(operator.as_str().to_string(), operand.to_value());
                let mut leaf = Map::new();
                leaf.insert(field.clone(), Value::Object(condition));
                Value::Object(leaf)
            }
            WhereOperation::Composite { and, children } => {
                let token = if *and { "$and" } else { "$or" };
                let mut composite = Map::new();
                composite.insert(
                    token.to_string(),
                    Value::Array(children.iter().map(WhereOperation::to_value).collect()),
                );
                Value::Object(composite)
            }
        }
    }

    /// Reconstruct a tree from its wire map structure
    pub fn from_value(value: &Value) -> Result<Self> {
        let obj = value.as_object().ok_or_else(|| {
            ChromaError::invalid_filter(format!("expected a filter object, got {}", value))
        })?;
        if obj.len() != 1 {
            return Err(ChromaError::invalid_filter(format!(
                "filter node must have exactly one key, got {}",
                obj.len()
            )));
        }
        let (key, inner) = obj.iter().next().unwrap();

        if key == "$and" || key == "$or" {
            let items = inner.as_array().ok_or_else(|| {
                ChromaError::invalid_filter(format!("{} expects an array of children", key))
            })?;
            let children = items
                .iter()
                .map(WhereOperation::from_value)
                .collect::<Result<Vec<_>>>()?;
            let op = WhereOperation::Composite {
                and: key == "$and",
                children,
            };
            op.validate()?;
            return Ok(op);
        }

        // leaf: {field: {op: operand}}
        let condition = inner.as_object().ok_or_else(|| {
            ChromaError::invalid_filter(format!(
                "condition for field '{}' must be an object, got {}",
                key, inner
            ))
        })?;
        if condition.len() != 1 {
            return Err(ChromaError::invalid_filter(format!(
                "condition for field '{}' must have exactly one operator",
                key
            )));
        }
        let (token, operand) = condition.iter().next().unwrap();
        let operator = WhereOperator::from_token(token).ok_or_else(|| {
            ChromaError::invalid_filter(format!(
                "unsupported operator '{}' on field '{}'",
                token, key
            ))
        })?;
        let op = WhereOperation::Leaf {
            field: key.clone(),
            operator,
            operand: WhereOperand::from_value(key, operand)?,
        };
        op.validate()?;
        Ok(op)
    }
}
