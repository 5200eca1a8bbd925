//! Minimal writer for the old-style property list used by `project.pbxproj`.

use std::collections::BTreeMap;
use std::fmt::Write;

use crate::utils::path::sha256_hex;

/// 24 hex character object identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Derives a stable identifier from a seed, so regenerating the same
    /// project yields the same file.
    pub fn derive(seed: &str) -> Self {
        Self(sha256_hex(seed.as_bytes())[..24].to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Reference { id: ObjectId, comment: String },
    List(Vec<Value>),
    Dict(Vec<(String, Value)>),
}

impl Value {
    pub fn string(s: impl Into<String>) -> Self {
        Self::String(s.into())
    }

    pub fn reference(object: &Object) -> Self {
        Self::Reference {
            id: object.id.clone(),
            comment: object.comment.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    pub id: ObjectId,
    pub isa: &'static str,
    pub comment: String,
    pub fields: Vec<(String, Value)>,
}

impl Object {
    pub fn new(id: ObjectId, isa: &'static str, comment: impl Into<String>) -> Self {
        Self {
            id,
            isa,
            comment: comment.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, key: &str, value: Value) -> Self {
        self.fields.push((key.to_string(), value));
        self
    }
}

#[derive(Debug, Clone)]
pub struct ProjectFile {
    pub object_version: u32,
    pub root_object: ObjectId,
    objects: Vec<Object>,
}

impl ProjectFile {
    pub fn new(object_version: u32, root_object: ObjectId) -> Self {
        Self {
            object_version,
            root_object,
            objects: Vec::new(),
        }
    }

    pub fn add(&mut self, object: Object) {
        self.objects.push(object);
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    /// Renders the file the way Xcode does: objects grouped in sections by
    /// `isa`, sections and objects sorted.
    pub fn render(&self) -> String {
        let mut sections: BTreeMap<&str, Vec<&Object>> = BTreeMap::new();
        for object in self.objects() {
            sections.entry(object.isa).or_default().push(object);
        }

        let mut out = String::new();
        out.push_str("// !$*UTF8*$!\n{\n");
        out.push_str("\tarchiveVersion = 1;\n\tclasses = {\n\t};\n");
        let _ = writeln!(out, "\tobjectVersion = {};", self.object_version);
        out.push_str("\tobjects = {\n");

        for (isa, mut objects) in sections {
            objects.sort_by(|a, b| a.id.cmp(&b.id));
            let _ = writeln!(out, "\n/* Begin {isa} section */");
            for object in objects {
                render_object(&mut out, object);
            }
            let _ = writeln!(out, "/* End {isa} section */");
        }

        out.push_str("\t};\n");
        let root_comment = self
            .objects
            .iter()
            .find(|o| o.id == self.root_object)
            .map(|o| o.comment.as_str())
            .unwrap_or("Project object");
        let _ = writeln!(
            out,
            "\trootObject = {} /* {} */;",
            self.root_object.as_str(),
            root_comment
        );
        out.push_str("}\n");
        out
    }
}

fn render_object(out: &mut String, object: &Object) {
    let _ = writeln!(
        out,
        "\t\t{} /* {} */ = {{",
        object.id.as_str(),
        object.comment
    );
    let _ = writeln!(out, "\t\t\tisa = {};", object.isa);
    for (key, value) in &object.fields {
        let _ = write!(out, "\t\t\t{} = ", quote(key));
        render_value(out, value, 3);
        out.push_str(";\n");
    }
    out.push_str("\t\t};\n");
}

fn render_value(out: &mut String, value: &Value, depth: usize) {
    let indent = "\t".repeat(depth);
    match value {
        Value::String(s) => out.push_str(&quote(s)),
        Value::Reference { id, comment } => {
            let _ = write!(out, "{} /* {} */", id.as_str(), comment);
        }
        Value::List(items) => {
            out.push_str("(\n");
            for item in items {
                out.push_str(&indent);
                out.push('\t');
                render_value(out, item, depth + 1);
                out.push_str(",\n");
            }
            out.push_str(&indent);
            out.push(')');
        }
        Value::Dict(entries) => {
            out.push_str("{\n");
            for (key, item) in entries {
                let _ = write!(out, "{indent}\t{} = ", quote(key));
                render_value(out, item, depth + 1);
                out.push_str(";\n");
            }
            out.push_str(&indent);
            out.push('}');
        }
    }
}

/// Strings made only of characters that are safe unquoted stay bare,
/// everything else is quoted and escaped.
pub fn quote(s: &str) -> String {
    let bare = !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '.' | '/'));
    if bare {
        return s.to_string();
    }

    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in s.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
