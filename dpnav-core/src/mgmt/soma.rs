//! DataPower SOAP management interface (SOMA / AMP, XML).
//!
//! A `get-filestore` request with `no-subdirectories="false"` returns the
//! complete hierarchy of a filestore, so this interface is bulk: the
//! repository caches one such response and answers deeper listings from it.

use roxmltree::{Document, Node};

use super::{DirectoryNode, FileEntry, HttpClient, ManagementApi};
use crate::error::{Error, Result};
use crate::paths;

const SOMA_PATH: &str = "/service/mgmt/current";
const AMP_PATH: &str = "/service/mgmt/amp/1.0";

pub struct SomaApi {
    http: HttpClient,
}

impl SomaApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

impl ManagementApi for SomaApi {
    fn is_bulk(&self) -> bool {
        true
    }

    fn domains(&self) -> Result<Vec<String>> {
        let body = envelope(
            r#"<dp:GetDomainListRequest xmlns:dp="http://www.datapower.com/schemas/appliance/management/1.0"/>"#,
        );
        parse_domains(&self.http.post(AMP_PATH, body)?)
    }

    fn filestores(&self, domain: &str) -> Result<Vec<String>> {
        let body = envelope(&management_request(
            domain,
            r#"<dp:get-filestore layout-only="true" no-subdirectories="true"/>"#,
        ));
        parse_filestores(&self.http.post(SOMA_PATH, body)?)
    }

    fn fetch_filestore(&self, domain: &str, filestore: &str) -> Result<DirectoryNode> {
        let op = format!(
            r#"<dp:get-filestore layout-only="false" no-subdirectories="false" location="{}"/>"#,
            escape_attr(filestore)
        );
        let body = envelope(&management_request(domain, &op));
        parse_filestore_tree(filestore, &self.http.post(SOMA_PATH, body)?)
    }

    fn fetch_directory(&self, domain: &str, path: &str) -> Result<DirectoryNode> {
        let tree = self.fetch_filestore(domain, paths::filestore_of(path))?;
        tree.find(path)
            .cloned()
            .ok_or_else(|| Error::malformed("filestore", format!("directory {path} not present")))
    }
}

fn envelope(body: &str) -> String {
    format!(
        r#"<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/"><soapenv:Body>{body}</soapenv:Body></soapenv:Envelope>"#
    )
}

fn management_request(domain: &str, op: &str) -> String {
    format!(
        r#"<dp:request xmlns:dp="http://www.datapower.com/schemas/management" domain="{}">{op}</dp:request>"#,
        escape_attr(domain)
    )
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn parse_xml<'a>(what: &'static str, body: &'a str) -> Result<Document<'a>> {
    let doc = Document::parse(body).map_err(|e| Error::malformed(what, e.to_string()))?;
    if let Some(fault) = elements(doc.root()).find(|n| n.tag_name().name() == "Fault") {
        let reason = elements(fault)
            .find(|n| n.tag_name().name() == "faultstring")
            .and_then(|n| n.text())
            .unwrap_or("SOAP fault");
        return Err(Error::malformed(what, reason.trim().to_owned()));
    }
    Ok(doc)
}

fn elements<'a, 'input>(node: Node<'a, 'input>) -> impl Iterator<Item = Node<'a, 'input>> {
    node.descendants().filter(Node::is_element)
}

fn child_elements<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(move |c| c.is_element() && c.tag_name().name() == name)
}

fn child_text(node: Node<'_, '_>, name: &'static str) -> String {
    child_elements(node, name)
        .next()
        .and_then(|n| n.text())
        .unwrap_or_default()
        .trim()
        .to_owned()
}

pub(crate) fn parse_domains(body: &str) -> Result<Vec<String>> {
    let doc = parse_xml("domain list", body)?;
    let response = elements(doc.root())
        .find(|n| n.tag_name().name() == "GetDomainListResponse")
        .ok_or_else(|| Error::malformed("domain list", "missing GetDomainListResponse"))?;
    Ok(child_elements(response, "Domain")
        .filter_map(|n| n.text())
        .map(|s| s.trim().to_owned())
        .collect())
}

pub(crate) fn parse_filestores(body: &str) -> Result<Vec<String>> {
    let doc = parse_xml("filestore list", body)?;
    Ok(elements(doc.root())
        .filter(|n| n.tag_name().name() == "location")
        .filter_map(|n| n.attribute("name"))
        .map(str::to_owned)
        .collect())
}

pub(crate) fn parse_filestore_tree(filestore: &str, body: &str) -> Result<DirectoryNode> {
    let doc = parse_xml("filestore", body)?;
    let location = elements(doc.root())
        .find(|n| n.tag_name().name() == "location" && n.attribute("name") == Some(filestore))
        .ok_or_else(|| Error::malformed("filestore", format!("location {filestore} not present")))?;
    directory_node(filestore.to_owned(), location)
}

fn directory_node(path: String, node: Node<'_, '_>) -> Result<DirectoryNode> {
    let mut dir = DirectoryNode::new(path);
    for child in child_elements(node, "directory") {
        let name = child
            .attribute("name")
            .ok_or_else(|| Error::malformed("filestore", "directory without name"))?;
        dir.directories.push(directory_node(name.to_owned(), child)?);
    }
    for file in child_elements(node, "file") {
        let name = file
            .attribute("name")
            .ok_or_else(|| Error::malformed("filestore", "file without name"))?;
        dir.files.push(FileEntry {
            name: name.to_owned(),
            size: child_text(file, "size"),
            modified: child_text(file, "modified"),
        });
    }
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TREE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<env:Envelope xmlns:env="http://schemas.xmlsoap.org/soap/envelope/"><env:Body>
<dp:response xmlns:dp="http://www.datapower.com/schemas/management">
<dp:timestamp>2024-05-01T10:00:00+02:00</dp:timestamp>
<dp:filestore>
  <location name="local:">
    <directory name="local:/xsl">
      <directory name="local:/xsl/common"/>
      <file name="main.xsl"><size>1024</size><modified>2024-04-30 12:00:00</modified></file>
    </directory>
    <file name="readme.txt"><size>12</size><modified>2024-04-01 08:00:00</modified></file>
  </location>
</dp:filestore>
</dp:response></env:Body></env:Envelope>"#;

    #[test]
    fn filestore_tree_is_recursive() {
        let tree = parse_filestore_tree("local:", TREE).unwrap();
        assert_eq!(tree.path, "local:");
        assert_eq!(tree.files[0].name, "readme.txt");
        let xsl = tree.find("local:/xsl").unwrap();
        assert_eq!(xsl.files[0].size, "1024");
        assert_eq!(xsl.directories[0].path, "local:/xsl/common");
    }

    #[test]
    fn filestores_from_layout_response() {
        let body = r#"<env:Envelope xmlns:env="http://schemas.xmlsoap.org/soap/envelope/"><env:Body>
<dp:response xmlns:dp="http://www.datapower.com/schemas/management"><dp:filestore>
<location name="cert:"/><location name="local:"/><location name="store:"/>
</dp:filestore></dp:response></env:Body></env:Envelope>"#;
        assert_eq!(parse_filestores(body).unwrap(), ["cert:", "local:", "store:"]);
    }

    #[test]
    fn amp_domain_list() {
        let body = r#"<env:Envelope xmlns:env="http://schemas.xmlsoap.org/soap/envelope/"><env:Body>
<amp:GetDomainListResponse xmlns:amp="http://www.datapower.com/schemas/appliance/management/1.0">
<amp:Domain>default</amp:Domain><amp:Domain>test</amp:Domain>
</amp:GetDomainListResponse></env:Body></env:Envelope>"#;
        assert_eq!(parse_domains(body).unwrap(), ["default", "test"]);
    }

    #[test]
    fn soap_fault_is_malformed() {
        let body = r#"<env:Envelope xmlns:env="http://schemas.xmlsoap.org/soap/envelope/"><env:Body>
<env:Fault><faultcode>env:Client</faultcode><faultstring>Authentication failure</faultstring></env:Fault>
</env:Body></env:Envelope>"#;
        let err = parse_filestores(body).unwrap_err();
        assert!(err.to_string().contains("Authentication failure"));
    }

    #[test]
    fn missing_location_is_malformed() {
        assert!(parse_filestore_tree("store:", TREE).is_err());
    }

    #[test]
    fn attributes_are_escaped() {
        assert_eq!(escape_attr(r#"a"b<c"#), "a&quot;b&lt;c");
    }
}
