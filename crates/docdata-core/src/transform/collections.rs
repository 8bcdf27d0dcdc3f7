use indexmap::IndexMap;

use crate::config::GroupingConfig;
use crate::error::BuildError;
use crate::model::{Collection, Method, ParameterDoc, PathDoc, Resource, ResponseDoc, StatusCode};
use crate::parse::document::{SwaggerDoc, Tag};
use crate::parse::operation::{Operation, ParamLocation};
use crate::render;

use super::resolver::Resolver;
use super::resources::{resource_key, resource_names};

/// Build one documentation collection per tag, in document order, then sort
/// by (group weight, name). Any failure aborts the whole build; nothing is
/// emitted for a partially built document.
pub fn build_collections(
    doc: &SwaggerDoc,
    grouping: &GroupingConfig,
) -> Result<Vec<Collection>, BuildError> {
    let resources = resource_names(&doc.tags);
    let mut resolver = Resolver::new(&doc.definitions, &resources);

    let mut collections = Vec::with_capacity(doc.tags.len());
    for tag in &doc.tags {
        collections.push(build_collection(tag, doc, grouping, &mut resolver)?);
    }

    collections.sort_by(|a, b| {
        (a.group.weight, a.name.as_str()).cmp(&(b.group.weight, b.name.as_str()))
    });
    Ok(collections)
}

fn build_collection(
    tag: &Tag,
    doc: &SwaggerDoc,
    grouping: &GroupingConfig,
    resolver: &mut Resolver<'_>,
) -> Result<Collection, BuildError> {
    let group = grouping
        .lookup(&tag.name)
        .cloned()
        .ok_or_else(|| BuildError::UnknownGroup(tag.name.clone()))?;

    let base_path = base_path(&tag.name);
    let resource = build_resource(tag, doc, resolver)?;

    let mut paths = Vec::new();
    for (path_name, methods) in &doc.paths {
        if !path_name.starts_with(&base_path) {
            continue;
        }
        let methods = methods
            .iter()
            .map(|(verb, op)| build_method(verb, op, path_name, resolver))
            .collect::<Result<Vec<Method>, BuildError>>()?;
        paths.push(PathDoc {
            name: path_name.clone(),
            methods,
        });
    }

    Ok(Collection {
        name: tag.name.clone(),
        description: tag.description.clone(),
        base_path,
        group,
        resource,
        paths,
    })
}

/// The collection's path prefix: lower-cased tag name under `/api/`, every
/// space replaced with an underscore.
fn base_path(tag_name: &str) -> String {
    format!("/api/{}", tag_name.to_lowercase().replace(' ', "_"))
}

fn build_resource(
    tag: &Tag,
    doc: &SwaggerDoc,
    resolver: &mut Resolver<'_>,
) -> Result<Resource, BuildError> {
    // Display name keeps the space; the definition key does not.
    let mut display_name = tag.name.clone();
    display_name.pop();
    let definition_key = resource_key(&tag.name);

    if !doc.definitions.contains_key(&definition_key) {
        return Err(BuildError::MissingResource {
            collection: tag.name.clone(),
            definition: definition_key,
        });
    }

    let resolved = resolver.resolve_definition(&definition_key, &tag.name)?;
    let example = render::render_resource(&resolved.properties);
    Ok(Resource {
        name: display_name,
        properties: resolved.properties,
        example,
    })
}

fn build_method(
    verb: &str,
    op: &Operation,
    path_name: &str,
    resolver: &mut Resolver<'_>,
) -> Result<Method, BuildError> {
    let name = verb.to_uppercase();
    let parameters = group_parameters(&op.parameters);
    let responses = build_responses(op, &name, path_name, resolver)?;

    // Canonical model: the first 2xx response after sorting.
    let model = responses
        .iter()
        .find(|r| r.code.is_success())
        .and_then(|r| r.schema.clone());
    let example = model.as_ref().map(render::render_example);

    Ok(Method {
        name,
        description: op.summary.clone(),
        parameters,
        responses,
        model,
        example,
    })
}

/// Sort parameters required-first (stable), group them by location in
/// first-seen order, then apply the file-upload rule: file (or array-of-file)
/// parameters declared in `query` belong in `formData`.
fn group_parameters(
    parameters: &[crate::parse::operation::Parameter],
) -> IndexMap<ParamLocation, Vec<ParameterDoc>> {
    let mut sorted: Vec<ParameterDoc> = parameters.iter().map(ParameterDoc::from).collect();
    sorted.sort_by_key(|p| !p.required);

    let mut groups: IndexMap<ParamLocation, Vec<ParameterDoc>> = IndexMap::new();
    for param in sorted {
        groups.entry(param.location).or_default().push(param);
    }

    let uploads: Vec<ParameterDoc> = match groups.get_mut(&ParamLocation::Query) {
        Some(query) => {
            let (uploads, rest): (Vec<_>, Vec<_>) =
                query.drain(..).partition(is_file_upload);
            *query = rest;
            uploads
        }
        None => Vec::new(),
    };

    if !uploads.is_empty() {
        let form = groups.entry(ParamLocation::FormData).or_default();
        for mut param in uploads {
            param.location = ParamLocation::FormData;
            form.push(param);
        }
        form.sort_by_key(|p| !p.required);
    }

    if groups
        .get(&ParamLocation::Query)
        .is_some_and(|q| q.is_empty())
    {
        groups.shift_remove(&ParamLocation::Query);
    }

    groups
}

fn is_file_upload(param: &ParameterDoc) -> bool {
    match param.schema_type.as_deref() {
        Some("file") => true,
        Some("array") => param
            .items
            .as_ref()
            .is_some_and(|items| items.schema_type.as_deref() == Some("file")),
        _ => false,
    }
}

fn build_responses(
    op: &Operation,
    method_name: &str,
    path_name: &str,
    resolver: &mut Resolver<'_>,
) -> Result<Vec<ResponseDoc>, BuildError> {
    let mut responses = Vec::with_capacity(op.responses.len());
    for (code_str, def) in &op.responses {
        // Non-numeric keys like `default` are carried through; they sort
        // after the numeric codes and never become a model.
        let code = match code_str.parse::<u16>() {
            Ok(numeric) => StatusCode::Numeric(numeric),
            Err(_) => StatusCode::Named(code_str.clone()),
        };
        let context = format!("{method_name} {path_name} {code_str}");
        let schema = match &def.schema {
            Some(raw) => Some(resolver.resolve_schema(raw, &context)?),
            None => None,
        };
        responses.push(ResponseDoc {
            code,
            description: def.description.clone(),
            schema,
        });
    }
    responses.sort_by(|a, b| a.code.cmp(&b.code));
    Ok(responses)
}
