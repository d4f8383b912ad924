//! OData metadata parsing.
//! Converts an `edmx:Edmx` document into a flat, ordered list of entity
//! descriptors that the generator turns into prompts.

use crate::error::{Error, Result};
use log::debug;
use roxmltree::{Document, Node};
use serde::Serialize;

/// A single declared property of an entity type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyDescriptor {
    pub name: String,
    /// Type tag exactly as written in the document, e.g. `Edm.String`
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(rename = "maxLength", skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
}

/// An entity type declared in the metadata document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityDescriptor {
    pub name: String,
    pub properties: Vec<PropertyDescriptor>,
}

/// Iterates over the element children of `node` with the given local name.
fn children_named<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children().filter(move |child| child.is_element() && child.tag_name().name() == name)
}

fn required_attribute(node: Node, attribute: &str) -> Result<String> {
    node.attribute(attribute).map(str::to_string).ok_or_else(|| {
        let pos = node.document().text_pos_at(node.range().start);
        Error::MalformedDocument(format!(
            "<{}> at {} is missing the '{}' attribute",
            node.tag_name().name(),
            pos,
            attribute
        ))
    })
}

fn parse_property(node: Node) -> Result<PropertyDescriptor> {
    let name = required_attribute(node, "Name")?;
    let type_name = required_attribute(node, "Type")?;
    let max_length = node.attribute("MaxLength").and_then(|raw| match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            debug!("Ignoring non-numeric MaxLength '{}' on property '{}'", raw, name);
            None
        }
    });

    Ok(PropertyDescriptor { name, type_name, max_length })
}

fn parse_entity(node: Node) -> Result<EntityDescriptor> {
    let name = required_attribute(node, "Name")?;
    let properties = children_named(node, "Property")
        .map(parse_property)
        .collect::<Result<Vec<_>>>()?;

    Ok(EntityDescriptor { name, properties })
}

/// Parses a metadata document into entity descriptors.
///
/// Every `Schema` under `DataServices` contributes its entity types, in
/// schema order and then declaration order. Elements are matched by local
/// name, so the `edmx:` prefix (or any other) is irrelevant.
///
/// # Errors
/// * `Error::MalformedDocument` if the text is not XML or a required
///   `Name`/`Type` attribute is missing
/// * `Error::NoEntitiesFound` if no entity type is declared at all
pub fn parse(document: &str) -> Result<Vec<EntityDescriptor>> {
    let doc = Document::parse(document).map_err(|e| Error::MalformedDocument(e.to_string()))?;

    let mut entities = Vec::new();
    for data_services in children_named(doc.root_element(), "DataServices") {
        for schema in children_named(data_services, "Schema") {
            for entity_type in children_named(schema, "EntityType") {
                entities.push(parse_entity(entity_type)?);
            }
        }
    }

    if entities.is_empty() {
        return Err(Error::NoEntitiesFound);
    }

    debug!("Parsed {} entity types from metadata", entities.len());
    Ok(entities)
}

/// Serializes an entity's properties into the text substituted for
/// `${propertiesText}`: a pretty-printed JSON array.
pub fn properties_text(entity: &EntityDescriptor) -> Result<String> {
    Ok(serde_json::to_string_pretty(&entity.properties)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_children_named_ignores_prefix_and_text_nodes() {
        let doc = Document::parse(
            r#"<a:Root xmlns:a="urn:a"><a:Item/> text <Item/><Other/></a:Root>"#,
        )
        .unwrap();
        assert_eq!(children_named(doc.root_element(), "Item").count(), 2);
    }

    #[test]
    fn test_max_length_is_trimmed() {
        let doc = Document::parse(r#"<Property Name="Code" Type="Edm.String" MaxLength=" 12 "/>"#)
            .unwrap();
        let property = parse_property(doc.root_element()).unwrap();
        assert_eq!(property.max_length, Some(12));
    }
}
