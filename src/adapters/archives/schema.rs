//! Structural validation of exported records
//!
//! Exported files are checked for well-formedness plus the structural marks
//! of their standard: the EAD2002 root element, namespace, and header/archdesc
//! sections for finding aids, and the MARC21 slim namespace, record and leader
//! elements for bibliographic records. Failure detail is returned as a plain
//! string so the worker can record it in the item's outcome.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// EAD2002 namespace
const EAD_NAMESPACE: &str = "urn:isbn:1-931666-22-9";

/// MARC21 slim XML namespace
const MARC_NAMESPACE: &str = "http://www.loc.gov/MARC21/slim";

/// Validate a record against the EAD2002 structure
pub fn validate_ead(record: &[u8]) -> Result<(), String> {
    let outline = outline(record)?;

    if outline.root != "ead" {
        return Err(format!(
            "root element is `{}`, expected `ead`",
            outline.root
        ));
    }

    if !outline.declares_namespace(EAD_NAMESPACE) {
        return Err(format!("missing EAD2002 namespace `{EAD_NAMESPACE}`"));
    }

    for required in ["eadheader", "archdesc"] {
        if !outline.has_child(required) {
            return Err(format!("missing required element `{required}`"));
        }
    }

    Ok(())
}

/// Validate a record against the MARC21 slim structure
pub fn validate_marc(record: &[u8]) -> Result<(), String> {
    let outline = outline(record)?;

    if !outline.declares_namespace(MARC_NAMESPACE) {
        return Err(format!("missing MARC21 namespace `{MARC_NAMESPACE}`"));
    }

    match outline.root.as_str() {
        "collection" => {
            if !outline.has_child("record") {
                return Err("collection contains no `record` element".to_string());
            }
            Ok(())
        }
        "record" => {
            if !outline.has_child("leader") {
                return Err("record contains no `leader` element".to_string());
            }
            Ok(())
        }
        other => Err(format!(
            "root element is `{other}`, expected `collection` or `record`"
        )),
    }
}

/// Shape of a parsed document: root element, its namespace declarations,
/// and the local names of its direct children.
struct XmlOutline {
    root: String,
    namespaces: Vec<String>,
    children: Vec<String>,
}

impl XmlOutline {
    fn declares_namespace(&self, namespace: &str) -> bool {
        self.namespaces.iter().any(|ns| ns == namespace)
    }

    fn has_child(&self, local_name: &str) -> bool {
        self.children.iter().any(|child| child == local_name)
    }
}

/// Walk the document once, collecting the outline and rejecting malformed XML
fn outline(record: &[u8]) -> Result<XmlOutline, String> {
    let mut reader = Reader::from_reader(record);
    let mut buf = Vec::new();

    let mut root: Option<String> = None;
    let mut namespaces = Vec::new();
    let mut children = Vec::new();
    let mut depth = 0usize;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(element)) => {
                visit_element(
                    &element, depth, &mut root, &mut namespaces, &mut children,
                )?;
                depth += 1;
            }
            Ok(Event::Empty(element)) => {
                visit_element(
                    &element, depth, &mut root, &mut namespaces, &mut children,
                )?;
            }
            Ok(Event::End(_)) => {
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(format!(
                    "not well-formed XML at byte {}: {e}",
                    reader.buffer_position()
                ));
            }
        }
        buf.clear();
    }

    match root {
        Some(root) => Ok(XmlOutline {
            root,
            namespaces,
            children,
        }),
        None => Err("document has no root element".to_string()),
    }
}

fn visit_element(
    element: &BytesStart<'_>,
    depth: usize,
    root: &mut Option<String>,
    namespaces: &mut Vec<String>,
    children: &mut Vec<String>,
) -> Result<(), String> {
    let local_name = String::from_utf8_lossy(element.local_name().as_ref()).into_owned();

    match depth {
        0 => {
            *root = Some(local_name);
            for attribute in element.attributes() {
                let attribute =
                    attribute.map_err(|e| format!("malformed attribute on root element: {e}"))?;
                let key = attribute.key.as_ref();
                if key == b"xmlns" || key.starts_with(b"xmlns:") {
                    namespaces.push(String::from_utf8_lossy(&attribute.value).into_owned());
                }
            }
        }
        1 => children.push(local_name),
        _ => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_EAD: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ead xmlns="urn:isbn:1-931666-22-9">
  <eadheader><eadid>mc_100</eadid></eadheader>
  <archdesc level="collection"><did/></archdesc>
</ead>"#;

    const VALID_MARC_COLLECTION: &str = r#"<?xml version="1.0"?>
<collection xmlns="http://www.loc.gov/MARC21/slim">
  <record><leader>00000npcaa2200000 u 4500</leader></record>
</collection>"#;

    #[test]
    fn test_valid_ead_passes() {
        assert!(validate_ead(VALID_EAD.as_bytes()).is_ok());
    }

    #[test]
    fn test_ead_with_wrong_root_fails() {
        let detail = validate_ead(b"<finding-aid/>").unwrap_err();
        assert!(detail.contains("expected `ead`"));
    }

    #[test]
    fn test_ead_without_namespace_fails() {
        let record = b"<ead><eadheader/><archdesc/></ead>";
        let detail = validate_ead(record).unwrap_err();
        assert!(detail.contains("namespace"));
    }

    #[test]
    fn test_ead_missing_archdesc_fails() {
        let record = br#"<ead xmlns="urn:isbn:1-931666-22-9"><eadheader/></ead>"#;
        let detail = validate_ead(record).unwrap_err();
        assert!(detail.contains("archdesc"));
    }

    #[test]
    fn test_malformed_xml_fails() {
        let detail = validate_ead(b"<ead><eadheader></ead>").unwrap_err();
        assert!(detail.contains("not well-formed"));
    }

    #[test]
    fn test_valid_marc_collection_passes() {
        assert!(validate_marc(VALID_MARC_COLLECTION.as_bytes()).is_ok());
    }

    #[test]
    fn test_valid_marc_single_record_passes() {
        let record = br#"<record xmlns="http://www.loc.gov/MARC21/slim"><leader>x</leader></record>"#;
        assert!(validate_marc(record).is_ok());
    }

    #[test]
    fn test_marc_empty_collection_fails() {
        let record = br#"<collection xmlns="http://www.loc.gov/MARC21/slim"></collection>"#;
        let detail = validate_marc(record).unwrap_err();
        assert!(detail.contains("no `record`"));
    }

    #[test]
    fn test_marc_without_namespace_fails() {
        let record = b"<collection><record/></collection>";
        let detail = validate_marc(record).unwrap_err();
        assert!(detail.contains("MARC21 namespace"));
    }

    #[test]
    fn test_prefixed_namespace_accepted() {
        let record = br#"<marc:collection xmlns:marc="http://www.loc.gov/MARC21/slim">
  <marc:record><marc:leader>x</marc:leader></marc:record>
</marc:collection>"#;
        assert!(validate_marc(record).is_ok());
    }
}
