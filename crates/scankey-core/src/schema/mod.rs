//! Module: schema
//! Responsibility: physical row-key field layout (fixed vs separator-terminated).
//! Does not own: value encoding of individual fields.
//! Boundary: key building reads field widths; field order never changes.


use derive_more::Deref;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// SchemaError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SchemaError {
    #[error("row key schema must have at least one field")]
    Empty,

    #[error("row key field {index} declares a fixed width of zero")]
    ZeroFixedWidth { index: usize },
}

///
/// FieldDescriptor
///
/// One row-key field: fixed-width with a known byte length, or
/// variable-width and terminated by the separator byte unless last.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct FieldDescriptor {
    pub fixed_width: Option<u32>,
}

impl FieldDescriptor {
    #[must_use]
    pub const fn fixed(width: u32) -> Self {
        Self {
            fixed_width: Some(width),
        }
    }

    #[must_use]
    pub const fn variable() -> Self {
        Self { fixed_width: None }
    }

    #[must_use]
    pub const fn is_fixed_width(&self) -> bool {
        self.fixed_width.is_some()
    }
}

///
/// RowKeySchema
///
/// Ordered field layout of the packed row key.
/// Field order is the physical byte order of the encoded key.
///

#[derive(Clone, Debug, Deref, Deserialize, Eq, PartialEq, Serialize)]
#[serde(try_from = "Vec<FieldDescriptor>", into = "Vec<FieldDescriptor>")]
pub struct RowKeySchema {
    fields: Vec<FieldDescriptor>,
}

impl RowKeySchema {
    pub fn new(fields: Vec<FieldDescriptor>) -> Result<Self, SchemaError> {
        if fields.is_empty() {
            return Err(SchemaError::Empty);
        }
        if let Some(index) = fields
            .iter()
            .position(|field| field.fixed_width == Some(0))
        {
            return Err(SchemaError::ZeroFixedWidth { index });
        }

        Ok(Self { fields })
    }

    #[must_use]
    pub const fn builder() -> RowKeySchemaBuilder {
        RowKeySchemaBuilder::new()
    }

    /// Number of fields in the row key.
    #[must_use]
    pub const fn max_fields(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn field(&self, index: usize) -> Option<&FieldDescriptor> {
        self.fields.get(index)
    }

    #[must_use]
    pub const fn is_last_field(&self, index: usize) -> bool {
        index + 1 == self.fields.len()
    }

    /// Whether field `index` is followed by a separator byte in the packed key.
    #[must_use]
    pub fn writes_separator(&self, index: usize) -> bool {
        !self.is_last_field(index)
            && self
                .field(index)
                .is_some_and(|field| !field.is_fixed_width())
    }
}

impl TryFrom<Vec<FieldDescriptor>> for RowKeySchema {
    type Error = SchemaError;

    fn try_from(fields: Vec<FieldDescriptor>) -> Result<Self, Self::Error> {
        Self::new(fields)
    }
}

impl From<RowKeySchema> for Vec<FieldDescriptor> {
    fn from(schema: RowKeySchema) -> Self {
        schema.fields
    }
}

///
/// RowKeySchemaBuilder
///

#[derive(Debug, Default)]
pub struct RowKeySchemaBuilder {
    fields: Vec<FieldDescriptor>,
}

impl RowKeySchemaBuilder {
    #[must_use]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    #[must_use]
    pub fn fixed(mut self, width: u32) -> Self {
        self.fields.push(FieldDescriptor::fixed(width));
        self
    }

    #[must_use]
    pub fn variable(mut self) -> Self {
        self.fields.push(FieldDescriptor::variable());
        self
    }

    pub fn build(self) -> Result<RowKeySchema, SchemaError> {
        RowKeySchema::new(self.fields)
    }
}
