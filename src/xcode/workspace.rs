use std::fmt::Display;
use std::path::{Path, PathBuf};

use quick_xml::{
    Reader, Writer,
    events::{BytesDecl, BytesEnd, BytesStart, Event},
};

/// File inside an `.xcworkspace` bundle holding the workspace description.
pub const CONTENTS_FILE: &str = "contents.xcworkspacedata";

#[derive(Debug, thiserror::Error)]
pub enum WorkspaceDataError {
    #[error("Workspace already exists at {}", .0.display())]
    AlreadyExists(PathBuf),
    #[error("Unknown workspace location '{0}'")]
    UnknownLocation(String),
    #[error("Element <{0}> is missing its location")]
    MissingLocation(String),
    #[error("Malformed workspace data: {0}")]
    Xml(String),
    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn xml_error(e: impl Display) -> WorkspaceDataError {
    WorkspaceDataError::Xml(e.to_string())
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> WorkspaceDataError + '_ {
    move |source| WorkspaceDataError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Where a workspace element points, as written in its `location` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Absolute(String),
    /// Relative to the enclosing group, or the workspace for top-level elements.
    Group(String),
    Container(String),
    Current(String),
}

impl Location {
    pub fn parse(value: &str) -> Result<Self, WorkspaceDataError> {
        let (kind, path) = value
            .split_once(':')
            .ok_or_else(|| WorkspaceDataError::UnknownLocation(value.to_string()))?;
        let path = path.to_string();
        match kind {
            "absolute" => Ok(Self::Absolute(path)),
            "group" => Ok(Self::Group(path)),
            "container" => Ok(Self::Container(path)),
            "self" => Ok(Self::Current(path)),
            _ => Err(WorkspaceDataError::UnknownLocation(value.to_string())),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Self::Absolute(p) | Self::Group(p) | Self::Container(p) | Self::Current(p) => p,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Absolute(_) => "absolute",
            Self::Group(_) => "group",
            Self::Container(_) => "container",
            Self::Current(_) => "self",
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind(), self.path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceGroup {
    pub location: Location,
    pub name: Option<String>,
    pub children: Vec<WorkspaceElement>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceElement {
    File(FileRef),
    Group(WorkspaceGroup),
}

/// Ordered contents of a workspace. Order is the order Xcode displays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkspaceData {
    pub children: Vec<WorkspaceElement>,
}

impl WorkspaceData {
    pub fn to_xml(&self) -> Result<String, WorkspaceDataError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 3);

        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(xml_error)?;
        writer
            .write_event(Event::Start(
                BytesStart::new("Workspace").with_attributes([("version", "1.0")]),
            ))
            .map_err(xml_error)?;
        for child in &self.children {
            write_element(&mut writer, child)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new("Workspace")))
            .map_err(xml_error)?;

        let mut xml = String::from_utf8(writer.into_inner()).map_err(xml_error)?;
        xml.push('\n');
        Ok(xml)
    }

    pub fn from_xml(xml: &str) -> Result<Self, WorkspaceDataError> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        // Bottom of the stack collects top-level elements, each open group pushes a frame.
        let mut stack: Vec<(Option<WorkspaceGroup>, Vec<WorkspaceElement>)> =
            vec![(None, Vec::new())];

        loop {
            match reader.read_event().map_err(xml_error)? {
                Event::Start(e) => match e.name().as_ref() {
                    b"Group" => stack.push((Some(read_group(&e)?), Vec::new())),
                    b"FileRef" => push_child(&mut stack, WorkspaceElement::File(read_file(&e)?)),
                    _ => {}
                },
                Event::Empty(e) => match e.name().as_ref() {
                    b"Group" => {
                        push_child(&mut stack, WorkspaceElement::Group(read_group(&e)?));
                    }
                    b"FileRef" => push_child(&mut stack, WorkspaceElement::File(read_file(&e)?)),
                    _ => {}
                },
                Event::End(e) if e.name().as_ref() == b"Group" => {
                    let Some((Some(mut group), children)) = stack.pop() else {
                        return Err(xml_error("unbalanced </Group>"));
                    };
                    group.children = children;
                    push_child(&mut stack, WorkspaceElement::Group(group));
                }
                Event::Eof => break,
                _ => {}
            }
        }

        match stack.pop() {
            Some((None, children)) if stack.is_empty() => Ok(Self { children }),
            _ => Err(xml_error("unclosed <Group>")),
        }
    }
}

fn push_child(
    stack: &mut [(Option<WorkspaceGroup>, Vec<WorkspaceElement>)],
    element: WorkspaceElement,
) {
    if let Some((_, children)) = stack.last_mut() {
        children.push(element);
    }
}

fn attribute(e: &BytesStart, name: &str) -> Result<Option<String>, WorkspaceDataError> {
    let Some(attr) = e.try_get_attribute(name).map_err(xml_error)? else {
        return Ok(None);
    };
    let value = attr.unescape_value().map_err(xml_error)?;
    Ok(Some(value.into_owned()))
}

fn read_location(e: &BytesStart, element: &str) -> Result<Location, WorkspaceDataError> {
    let value = attribute(e, "location")?
        .ok_or_else(|| WorkspaceDataError::MissingLocation(element.to_string()))?;
    Location::parse(&value)
}

fn read_file(e: &BytesStart) -> Result<FileRef, WorkspaceDataError> {
    Ok(FileRef {
        location: read_location(e, "FileRef")?,
    })
}

fn read_group(e: &BytesStart) -> Result<WorkspaceGroup, WorkspaceDataError> {
    Ok(WorkspaceGroup {
        location: read_location(e, "Group")?,
        name: attribute(e, "name")?,
        children: Vec::new(),
    })
}

fn write_element(
    writer: &mut Writer<Vec<u8>>,
    element: &WorkspaceElement,
) -> Result<(), WorkspaceDataError> {
    match element {
        WorkspaceElement::File(file) => {
            let location = file.location.to_string();
            writer
                .write_event(Event::Start(
                    BytesStart::new("FileRef").with_attributes([("location", location.as_str())]),
                ))
                .map_err(xml_error)?;
            writer
                .write_event(Event::End(BytesEnd::new("FileRef")))
                .map_err(xml_error)?;
        }
        WorkspaceElement::Group(group) => {
            let location = group.location.to_string();
            let mut start = BytesStart::new("Group");
            start.push_attribute(("location", location.as_str()));
            if let Some(name) = &group.name {
                start.push_attribute(("name", name.as_str()));
            }
            writer.write_event(Event::Start(start)).map_err(xml_error)?;
            for child in &group.children {
                write_element(writer, child)?;
            }
            writer
                .write_event(Event::End(BytesEnd::new("Group")))
                .map_err(xml_error)?;
        }
    }
    Ok(())
}

/// An `.xcworkspace` bundle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workspace {
    pub data: WorkspaceData,
}

impl Workspace {
    pub fn new(data: WorkspaceData) -> Self {
        Self { data }
    }

    /// Writes the bundle at `path`. With `overwrite`, whatever exists at `path`
    /// is removed first; nothing from it is kept.
    pub fn write(&self, path: &Path, overwrite: bool) -> Result<(), WorkspaceDataError> {
        let xml = self.data.to_xml()?;

        if path.exists() || path.is_symlink() {
            if !overwrite {
                return Err(WorkspaceDataError::AlreadyExists(path.to_path_buf()));
            }
            tracing::debug!("Removing existing workspace at {}", path.display());
            if path.is_dir() {
                std::fs::remove_dir_all(path).map_err(io_error(path))?;
            } else {
                std::fs::remove_file(path).map_err(io_error(path))?;
            }
        }

        std::fs::create_dir_all(path).map_err(io_error(path))?;
        let contents_path = path.join(CONTENTS_FILE);
        std::fs::write(&contents_path, xml).map_err(io_error(&contents_path))?;

        Ok(())
    }

    pub fn read(path: &Path) -> Result<Self, WorkspaceDataError> {
        let contents_path = path.join(CONTENTS_FILE);
        let xml = std::fs::read_to_string(&contents_path).map_err(io_error(&contents_path))?;
        Ok(Self::new(WorkspaceData::from_xml(&xml)?))
    }

    /// Locations of every file reference, depth first, in document order.
    pub fn file_locations(&self) -> Vec<&Location> {
        fn collect<'a>(elements: &'a [WorkspaceElement], out: &mut Vec<&'a Location>) {
            for element in elements {
                match element {
                    WorkspaceElement::File(file) => out.push(&file.location),
                    WorkspaceElement::Group(group) => collect(&group.children, out),
                }
            }
        }

        let mut out = Vec::new();
        collect(&self.data.children, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn file(location: &str) -> WorkspaceElement {
        WorkspaceElement::File(FileRef {
            location: Location::Group(location.to_string()),
        })
    }

    #[test]
    fn test_location_parsing() {
        assert_eq!(
            Location::parse("group:App/App.xcodeproj").unwrap(),
            Location::Group("App/App.xcodeproj".to_string())
        );
        assert_eq!(
            Location::parse("self:").unwrap(),
            Location::Current(String::new())
        );
        assert!(matches!(
            Location::parse("remote:App"),
            Err(WorkspaceDataError::UnknownLocation(_))
        ));
        assert!(Location::parse("App.xcodeproj").is_err());
    }

    #[test]
    fn test_xml_lists_file_refs_in_order() {
        let data = WorkspaceData {
            children: vec![file("Zed/Zed.xcodeproj"), file("App/App.xcodeproj")],
        };

        let xml = data.to_xml().unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<Workspace version=\"1.0\">"));
        let zed = xml.find("group:Zed/Zed.xcodeproj").unwrap();
        let app = xml.find("group:App/App.xcodeproj").unwrap();
        assert!(zed < app);
    }

    #[test]
    fn test_attribute_values_are_escaped() {
        let data = WorkspaceData {
            children: vec![file("R&D/\"Lab\".xcodeproj")],
        };

        let xml = data.to_xml().unwrap();
        assert!(xml.contains("R&amp;D/&quot;Lab&quot;.xcodeproj"));
        assert_eq!(WorkspaceData::from_xml(&xml).unwrap(), data);
    }

    #[test]
    fn test_reads_nested_groups_written_by_xcode() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<Workspace
   version = "1.0">
   <Group
      location = "container:"
      name = "Modules">
      <FileRef
         location = "group:Core/Core.xcodeproj">
      </FileRef>
   </Group>
   <FileRef
      location = "group:App/App.xcodeproj">
   </FileRef>
</Workspace>
"#;

        let data = WorkspaceData::from_xml(xml).unwrap();
        assert_eq!(
            data.children,
            vec![
                WorkspaceElement::Group(WorkspaceGroup {
                    location: Location::Container(String::new()),
                    name: Some("Modules".to_string()),
                    children: vec![file("Core/Core.xcodeproj")],
                }),
                file("App/App.xcodeproj"),
            ]
        );
    }

    #[test]
    fn test_file_ref_without_location_is_rejected() {
        let xml = "<Workspace version=\"1.0\"><FileRef/></Workspace>";
        assert!(matches!(
            WorkspaceData::from_xml(xml),
            Err(WorkspaceDataError::MissingLocation(_))
        ));
    }

    #[test]
    fn test_write_refuses_existing_without_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("App.xcworkspace");
        std::fs::create_dir_all(&path).unwrap();

        let err = Workspace::default().write(&path, false).unwrap_err();
        assert!(matches!(err, WorkspaceDataError::AlreadyExists(_)));
    }

    #[test]
    fn test_overwrite_replaces_whole_bundle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("App.xcworkspace");
        std::fs::create_dir_all(path.join("xcuserdata")).unwrap();
        std::fs::write(path.join(CONTENTS_FILE), "unrelated").unwrap();

        let workspace = Workspace::new(WorkspaceData {
            children: vec![file("App/App.xcodeproj")],
        });
        workspace.write(&path, true).unwrap();

        assert!(!path.join("xcuserdata").exists());
        assert_eq!(Workspace::read(&path).unwrap(), workspace);
    }

    #[test]
    fn test_overwrite_replaces_plain_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("App.xcworkspace");
        std::fs::write(&path, "not a bundle").unwrap();

        Workspace::default().write(&path, true).unwrap();
        assert!(path.is_dir());
        assert!(Workspace::read(&path).unwrap().file_locations().is_empty());
    }
}
