//! DataPower REST management interface (`/mgmt/...`, JSON).
//!
//! REST answers one directory per request, so it is never treated as bulk.
//! Collections in its responses are an array when there are several members
//! and a bare object when there is exactly one; [`one_or_many`] hides that.

use serde_json::Value;

use super::{DirectoryNode, FileEntry, HttpClient, ManagementApi};
use crate::error::{Error, Result};

pub struct RestApi {
    http: HttpClient,
}

impl RestApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

impl ManagementApi for RestApi {
    fn is_bulk(&self) -> bool {
        false
    }

    fn domains(&self) -> Result<Vec<String>> {
        parse_domains(&self.http.get("/mgmt/domains/config/")?)
    }

    fn filestores(&self, domain: &str) -> Result<Vec<String>> {
        parse_filestores(&self.http.get(&format!("/mgmt/filestore/{domain}"))?)
    }

    fn fetch_filestore(&self, domain: &str, filestore: &str) -> Result<DirectoryNode> {
        self.fetch_directory(domain, filestore)
    }

    fn fetch_directory(&self, domain: &str, path: &str) -> Result<DirectoryNode> {
        let body = self.http.get(&format!("/mgmt/filestore/{domain}/{}", rest_path(path)))?;
        parse_directory(path, &body)
    }
}

/// `local:/dir/sub` becomes `local/dir/sub`.
fn rest_path(dp_path: &str) -> String {
    dp_path.replacen(':', "", 1)
}

fn parse_json(what: &'static str, body: &str) -> Result<Value> {
    serde_json::from_str(body).map_err(|e| Error::malformed(what, e.to_string()))
}

fn one_or_many(value: Option<&Value>) -> Vec<&Value> {
    match value {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(obj @ Value::Object(_)) => vec![obj],
        _ => Vec::new(),
    }
}

fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn required_name(what: &'static str, node: &Value) -> Result<String> {
    text(node.get("name")).ok_or_else(|| Error::malformed(what, format!("entry without name: {node}")))
}

pub(crate) fn parse_domains(body: &str) -> Result<Vec<String>> {
    let doc = parse_json("domain list", body)?;
    one_or_many(doc.get("domain"))
        .into_iter()
        .map(|d| required_name("domain list", d))
        .collect()
}

pub(crate) fn parse_filestores(body: &str) -> Result<Vec<String>> {
    let doc = parse_json("filestore list", body)?;
    let filestore = doc
        .get("filestore")
        .ok_or_else(|| Error::malformed("filestore list", "missing \"filestore\""))?;
    one_or_many(filestore.get("location"))
        .into_iter()
        .map(|l| required_name("filestore list", l))
        .collect()
}

pub(crate) fn parse_directory(path: &str, body: &str) -> Result<DirectoryNode> {
    let doc = parse_json("directory listing", body)?;
    let location = doc
        .get("filestore")
        .and_then(|f| f.get("location"))
        .ok_or_else(|| Error::malformed("directory listing", "missing \"filestore.location\""))?;

    let mut node = DirectoryNode::new(path);
    for dir in one_or_many(location.get("directory")) {
        node.directories.push(DirectoryNode::new(required_name("directory listing", dir)?));
    }
    for file in one_or_many(location.get("file")) {
        node.files.push(FileEntry {
            name: required_name("directory listing", file)?,
            size: text(file.get("size")).unwrap_or_default(),
            modified: text(file.get("modified")).unwrap_or_default(),
        });
    }
    Ok(node)
}
