//! Tools for inspecting record schemas.
//! Useful for checking how a record will be laid out in its documents.

use crate::field::Record;
use crate::schema::{FieldKind, Schema};
use serde::Serialize;
use std::fmt;

/// A structural report of a record schema.
#[derive(Debug, Serialize)]
pub struct SchemaReport {
    /// Record type name.
    pub name: &'static str,
    /// Fields in traversal order, nested records expanded.
    pub fields: Vec<FieldReport>,
    /// Element types that need a `VarArray` container, each listed once.
    pub container_types: Vec<&'static str>,
}

/// Layout of a single field.
#[derive(Debug, Serialize)]
pub struct FieldReport {
    /// Field name and document key.
    pub name: &'static str,
    /// Field layout.
    pub kind: FieldKind,
    /// Element type name.
    pub element: &'static str,
    /// Element count of fixed arrays.
    pub cardinality: Option<usize>,
    /// Whether the field owns dynamically-sized content.
    pub owned: bool,
    /// Fields of a composite element. Empty for scalars and for recursive
    /// references to a record already being expanded.
    pub children: Vec<FieldReport>,
}

/// The jsonwrap schema inspector.
#[derive(Debug)]
pub struct SchemaInspector;

impl SchemaInspector {
    /// Reports on the schema of `R`.
    pub fn inspect<R: Record>() -> SchemaReport {
        Self::inspect_schema(R::schema())
    }

    /// Reports on an arbitrary schema.
    pub fn inspect_schema(schema: &'static Schema) -> SchemaReport {
        let mut stack = vec![schema.name];
        let mut container_types = Vec::new();
        let fields = Self::inspect_fields(schema, &mut stack, &mut container_types);
        SchemaReport {
            name: schema.name,
            fields,
            container_types,
        }
    }

    fn inspect_fields(
        schema: &'static Schema,
        stack: &mut Vec<&'static str>,
        container_types: &mut Vec<&'static str>,
    ) -> Vec<FieldReport> {
        schema
            .iter()
            .map(|info| {
                let descriptor = info.descriptor;
                let element = descriptor.element.name();
                if descriptor.kind == FieldKind::VariableArray && !container_types.contains(&element) {
                    container_types.push(element);
                }

                let children = match descriptor.element.schema() {
                    Some(nested) if !stack.contains(&nested.name) => {
                        stack.push(nested.name);
                        let children = Self::inspect_fields(nested, stack, container_types);
                        stack.pop();
                        children
                    }
                    _ => Vec::new(),
                };

                FieldReport {
                    name: info.name,
                    kind: descriptor.kind,
                    element,
                    cardinality: descriptor.cardinality,
                    owned: descriptor.is_owned(),
                    children,
                }
            })
            .collect()
    }
}

impl fmt::Display for SchemaReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        for field in &self.fields {
            field.write_tree(f, 1)?;
        }
        Ok(())
    }
}

impl FieldReport {
    fn write_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        let layout = match (self.kind, self.cardinality) {
            (FieldKind::FixedArray, Some(n)) => format!("[{}; {n}]", self.element),
            (FieldKind::VariableArray, _) => format!("VarArray<{}>", self.element),
            _ => self.element.to_string(),
        };
        writeln!(f, "{indent}{}: {layout}", self.name)?;
        for child in &self.children {
            child.write_tree(f, depth + 1)?;
        }
        Ok(())
    }
}
