use std::path::{Path, PathBuf};

use quick_xml::Reader;
use quick_xml::events::{BytesStart, BytesText, Event};

use super::{OutputConfiguration, ProjectModel};
use crate::base::line_at_offset;
use crate::error::{Error, Result};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Parse the project file at `path`.
pub fn parse(path: &Path) -> Result<ProjectModel> {
    let bytes = std::fs::read(path).map_err(|e| Error::not_found(path, e))?;
    parse_bytes(&bytes, path)
}

/// Parse project file contents; `path` is only used for error messages.
pub fn parse_bytes(input: &[u8], path: &Path) -> Result<ProjectModel> {
    let input = input.strip_prefix(UTF8_BOM).unwrap_or(input);
    let mut reader = Reader::from_reader(input);
    reader.config_mut().trim_text(true);

    let mut state = ProjectReader::new(path, input);
    let mut buf = Vec::new();

    loop {
        let event = reader.read_event_into(&mut buf).map_err(|e| {
            let line = line_at_offset(input, to_offset(reader.error_position()));
            Error::xml(path, format!("{e} at line {line}"))
        })?;
        let end = to_offset(reader.buffer_position());

        match event {
            Event::Start(ref e) => state.start(e, end)?,
            Event::Empty(ref e) => {
                state.start(e, end)?;
                state.end();
            }
            Event::End(_) => state.end(),
            Event::Text(ref t) => state.text(t)?,
            Event::CData(ref c) => state.push_text(&String::from_utf8_lossy(c))?,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    state.finish()
}

fn to_offset<T>(position: T) -> usize
where
    usize: TryFrom<T>,
{
    usize::try_from(position).unwrap_or(usize::MAX)
}

/// Element whose text content is being captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Capture {
    OutputType,
    AssemblyName,
    OutputPath,
}

struct ProjectReader<'a> {
    path: PathBuf,
    input: &'a [u8],
    model: ProjectModel,
    /// Local names of the open elements.
    open: Vec<String>,
    /// Conditions of the open `PropertyGroup` elements, innermost last.
    groups: Vec<String>,
    capture: Option<(Capture, usize, String)>,
    seen_root: bool,
    root_closed: bool,
}

impl<'a> ProjectReader<'a> {
    fn new(path: &Path, input: &'a [u8]) -> Self {
        Self {
            path: path.to_path_buf(),
            input,
            model: ProjectModel::default(),
            open: Vec::new(),
            groups: Vec::new(),
            capture: None,
            seen_root: false,
            root_closed: false,
        }
    }

    fn start(&mut self, e: &BytesStart<'_>, end: usize) -> Result<()> {
        let local = e.local_name();
        let name = std::str::from_utf8(local.as_ref())
            .map_err(|err| Error::xml(&self.path, format!("Invalid tag name: {err}")))?
            .to_string();
        if self.root_closed {
            return Err(Error::xml(
                &self.path,
                format!("<{name}> after the root element at line {}", self.tag_line(end)),
            ));
        }
        self.check_attributes(e)?;
        self.seen_root = true;

        match name.as_str() {
            "Compile" => {
                let include = self.attribute(e, "Include")?.ok_or_else(|| {
                    Error::MalformedProject {
                        path: self.path.clone(),
                        element: name.clone(),
                        attribute: "Include",
                        line: self.tag_line(end),
                    }
                })?;
                self.model.files.push(include);
            }
            "PropertyGroup" => {
                let condition = self.attribute(e, "Condition")?.unwrap_or_default();
                self.groups.push(condition);
            }
            "OutputType" => self.begin_capture(Capture::OutputType),
            "AssemblyName" => self.begin_capture(Capture::AssemblyName),
            "OutputPath" => self.begin_capture(Capture::OutputPath),
            _ => {}
        }

        self.open.push(name);
        Ok(())
    }

    fn end(&mut self) {
        let Some(name) = self.open.pop() else {
            return;
        };
        if self.open.is_empty() {
            self.root_closed = true;
        }
        if name == "PropertyGroup" {
            self.groups.pop();
        }
        if let Some((capture, depth, text)) = self.capture.take() {
            if depth == self.open.len() {
                self.commit(capture, text);
            } else {
                self.capture = Some((capture, depth, text));
            }
        }
    }

    fn text(&mut self, t: &BytesText<'_>) -> Result<()> {
        let text = t
            .unescape()
            .map_err(|e| Error::xml(&self.path, format!("Text error: {e}")))?;
        self.push_text(&text)
    }

    fn push_text(&mut self, text: &str) -> Result<()> {
        if self.open.is_empty() && !text.trim().is_empty() {
            return Err(Error::xml(&self.path, "text outside the root element"));
        }
        if let Some((_, _, buffer)) = self.capture.as_mut() {
            buffer.push_str(text);
        }
        Ok(())
    }

    fn begin_capture(&mut self, capture: Capture) {
        if self.capture.is_none() {
            self.capture = Some((capture, self.open.len(), String::new()));
        }
    }

    fn commit(&mut self, capture: Capture, text: String) {
        match capture {
            Capture::OutputType => set_once(&mut self.model.output_type, text),
            Capture::AssemblyName => set_once(&mut self.model.assembly_name, text),
            Capture::OutputPath => {
                let condition = self.groups.last().cloned().unwrap_or_default();
                self.model
                    .configurations
                    .push(OutputConfiguration::new(condition, text));
            }
        }
    }

    /// Every attribute must be unique and carry a well-formed value.
    fn check_attributes(&self, e: &BytesStart<'_>) -> Result<()> {
        for attr_result in e.attributes() {
            let attr = attr_result
                .map_err(|err| Error::xml(&self.path, format!("Attribute error: {err}")))?;
            attr.unescape_value()
                .map_err(|err| Error::xml(&self.path, format!("Attribute value error: {err}")))?;
        }
        Ok(())
    }

    fn attribute(&self, e: &BytesStart<'_>, wanted: &str) -> Result<Option<String>> {
        for attr_result in e.attributes() {
            let attr = attr_result
                .map_err(|err| Error::xml(&self.path, format!("Attribute error: {err}")))?;
            if attr.key.local_name().as_ref() == wanted.as_bytes() {
                let value = attr
                    .unescape_value()
                    .map_err(|err| Error::xml(&self.path, format!("Attribute value error: {err}")))?;
                return Ok(Some(value.into_owned()));
            }
        }
        Ok(None)
    }

    /// Line of the `<` opening the tag that ends at `end`.
    fn tag_line(&self, end: usize) -> usize {
        let end = end.min(self.input.len());
        let start = self.input[..end]
            .iter()
            .rposition(|&b| b == b'<')
            .unwrap_or(end);
        line_at_offset(self.input, start)
    }

    fn finish(self) -> Result<ProjectModel> {
        if !self.seen_root {
            return Err(Error::xml(&self.path, "no root element"));
        }
        if let Some(name) = self.open.last() {
            return Err(Error::xml(
                &self.path,
                format!("unexpected end of file, <{name}> is not closed"),
            ));
        }
        Ok(self.model)
    }
}

/// Keep the first non-empty value.
fn set_once(slot: &mut Option<String>, text: String) {
    let text = text.trim();
    if slot.is_none() && !text.is_empty() {
        *slot = Some(text.to_string());
    }
}
