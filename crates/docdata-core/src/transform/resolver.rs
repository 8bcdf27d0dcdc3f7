use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use log::debug;

use crate::error::ResolveError;
use crate::model::{ItemSchema, Property, ResolvedDefinition, ResponseSchema, SchemaType};
use crate::parse::document::Definition;
use crate::parse::schema::Schema;

const REF_PREFIX: &str = "#/definitions/";

/// Resolves local `#/definitions/` references into a fresh output graph and
/// normalizes property maps into ordered, annotated records along the way.
///
/// Resolved definitions are memoized per name, so every reference to a name
/// shares one canonical resolved form; a definition already on the current
/// traversal path resolves to a bare name token, which breaks reference
/// cycles between non-resource definitions.
pub struct Resolver<'a> {
    definitions: &'a IndexMap<String, Definition>,
    resources: &'a HashSet<String>,
    resolved: HashMap<String, ResolvedDefinition>,
    path: Vec<String>,
}

impl<'a> Resolver<'a> {
    pub fn new(
        definitions: &'a IndexMap<String, Definition>,
        resources: &'a HashSet<String>,
    ) -> Self {
        Self {
            definitions,
            resources,
            resolved: HashMap::new(),
            path: Vec::new(),
        }
    }

    /// Resolve a named definition into its normalized form: properties in
    /// declared order, each with its name, computed required flag, promoted
    /// enum type, and every nested reference replaced.
    pub fn resolve_definition(
        &mut self,
        name: &str,
        context: &str,
    ) -> Result<ResolvedDefinition, ResolveError> {
        if let Some(hit) = self.resolved.get(name) {
            return Ok(hit.clone());
        }

        let definitions = self.definitions;
        let definition = definitions
            .get(name)
            .ok_or_else(|| ResolveError::DanglingRef {
                target: name.to_string(),
                context: context.to_string(),
            })?;

        self.path.push(name.to_string());
        let properties: Result<Vec<Property>, ResolveError> = definition
            .properties
            .iter()
            .map(|(prop_name, raw)| {
                let required = definition.required.iter().any(|r| r == prop_name);
                self.resolve_property(prop_name, raw, required, name)
            })
            .collect();
        self.path.pop();

        let resolved = ResolvedDefinition {
            properties: properties?,
            required: definition.required.clone(),
        };
        self.resolved.insert(name.to_string(), resolved.clone());
        Ok(resolved)
    }

    /// Resolve a raw response/model schema node.
    pub fn resolve_schema(
        &mut self,
        raw: &Schema,
        context: &str,
    ) -> Result<ResponseSchema, ResolveError> {
        let (kind, items, is_ref) = self.resolve_node(raw, context)?;
        Ok(ResponseSchema {
            kind,
            format: raw.format.clone(),
            items,
            description: raw.description.clone(),
            is_ref,
        })
    }

    fn resolve_property(
        &mut self,
        name: &str,
        raw: &Schema,
        required: bool,
        context: &str,
    ) -> Result<Property, ResolveError> {
        let (kind, items, is_ref) = self.resolve_node(raw, context)?;
        Ok(Property {
            name: name.to_string(),
            kind,
            format: raw.format.clone(),
            items,
            required,
            enum_values: raw.enum_values.clone(),
            description: raw.description.clone(),
            is_ref,
        })
    }

    /// Shared shape logic for properties and response schemas: reference,
    /// enum promotion, array with resolved items, or primitive passthrough.
    fn resolve_node(
        &mut self,
        raw: &Schema,
        context: &str,
    ) -> Result<(SchemaType, Option<Box<ItemSchema>>, bool), ResolveError> {
        if let Some(ref_path) = &raw.ref_path {
            let (kind, is_ref) = self.resolve_ref(ref_path, context)?;
            return Ok((kind, None, is_ref));
        }
        if !raw.enum_values.is_empty() {
            return Ok((SchemaType::Enum, None, false));
        }
        if raw.schema_type.as_deref() == Some("array") {
            let items = match &raw.items {
                Some(items) => Some(Box::new(self.resolve_items(items, context)?)),
                None => None,
            };
            return Ok((SchemaType::Array, items, false));
        }
        Ok((SchemaType::Primitive(declared_type(raw)), None, false))
    }

    fn resolve_items(&mut self, raw: &Schema, context: &str) -> Result<ItemSchema, ResolveError> {
        let (kind, is_ref) = if let Some(ref_path) = &raw.ref_path {
            self.resolve_ref(ref_path, context)?
        } else {
            (SchemaType::Primitive(declared_type(raw)), false)
        };
        Ok(ItemSchema {
            kind,
            format: raw.format.clone(),
            enum_values: raw.enum_values.clone(),
            is_ref,
        })
    }

    /// Resolve one reference marker. Resources and definitions already on
    /// the current traversal path become name tokens; everything else is
    /// expanded in place and marked `isRef`.
    fn resolve_ref(
        &mut self,
        ref_path: &str,
        context: &str,
    ) -> Result<(SchemaType, bool), ResolveError> {
        let target = ref_path
            .strip_prefix(REF_PREFIX)
            .ok_or_else(|| ResolveError::InvalidRefFormat(ref_path.to_string()))?;

        debug!("resolving {ref_path} in {context}");

        if self.resources.contains(target) {
            return Ok((SchemaType::Token(target.to_string()), false));
        }
        if self.path.iter().any(|name| name == target) {
            debug!("breaking reference cycle at {target}");
            return Ok((SchemaType::Token(target.to_string()), false));
        }

        let resolved = self.resolve_definition(target, context)?;
        Ok((SchemaType::Inline(Box::new(resolved)), true))
    }
}

fn declared_type(raw: &Schema) -> String {
    raw.schema_type
        .clone()
        .unwrap_or_else(|| "object".to_string())
}
