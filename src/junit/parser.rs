use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use quick_xml::{
    events::{BytesStart, Event},
    Reader,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("could not read report: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed xml near byte {position}: {source}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },
    #[error("document has no root element")]
    NoRootElement,
    #[error("document has more than one root element")]
    MultipleRootElements,
    #[error("element <{0}> is never closed")]
    UnclosedElement(String),
    #[error("end tag </{0}> found without start tag")]
    EndTagWithoutStartTag(String),
    #[error("text found outside the root element")]
    TextOutsideRoot,
}

/// A parsed element. Only what the translator reads is kept: the tag name,
/// attributes in document order, direct text content and element children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: String,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn new<T: Into<String>>(name: T) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_attribute<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(child);
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Attribute value, treating an empty value the same as a missing one.
    pub fn non_empty_attr(&self, name: &str) -> Option<&str> {
        self.attr(name).filter(|value| !value.is_empty())
    }

    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|child| child.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |child| child.name == name)
    }
}

pub fn load<P: AsRef<Path>>(path: P) -> Result<XmlElement, LoadError> {
    let file = File::open(path)?;
    parse(BufReader::new(file))
}

pub fn parse<R: BufRead>(xml: R) -> Result<XmlElement, LoadError> {
    let mut reader = Reader::from_reader(xml);
    let mut builder = TreeBuilder::default();

    let mut buf = Vec::new();
    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|source| LoadError::Xml {
                position: reader.error_position() as u64,
                source,
            })?;
        let position = reader.buffer_position() as u64;
        if !builder.match_event(event, position)? {
            break;
        }
        buf.clear();
    }

    builder.finish()
}

#[derive(Debug, Default)]
struct TreeBuilder {
    open: Vec<XmlElement>,
    root: Option<XmlElement>,
}

impl TreeBuilder {
    /// Returns `false` once the end of the document is reached.
    fn match_event(&mut self, event: Event, position: u64) -> Result<bool, LoadError> {
        let xml_error = |source: quick_xml::Error| LoadError::Xml { position, source };
        match event {
            Event::Eof => return Ok(false),
            Event::Start(e) => {
                let element = open_element(&e).map_err(xml_error)?;
                self.open.push(element);
            }
            Event::Empty(e) => {
                let element = open_element(&e).map_err(xml_error)?;
                self.close_element(element)?;
            }
            Event::End(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                match self.open.pop() {
                    Some(element) if element.name == name => self.close_element(element)?,
                    Some(element) => return Err(LoadError::UnclosedElement(element.name)),
                    None => return Err(LoadError::EndTagWithoutStartTag(name)),
                }
            }
            Event::Text(e) => {
                let text = e.unescape().map_err(xml_error)?;
                self.push_text(&text)?;
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(&e).into_owned();
                self.push_text(&text)?;
            }
            _ => (),
        };
        Ok(true)
    }

    fn push_text(&mut self, text: &str) -> Result<(), LoadError> {
        match self.open.last_mut() {
            Some(element) => element.text.push_str(text),
            None if text.trim().is_empty() => (),
            None => return Err(LoadError::TextOutsideRoot),
        }
        Ok(())
    }

    fn close_element(&mut self, element: XmlElement) -> Result<(), LoadError> {
        if let Some(parent) = self.open.last_mut() {
            parent.children.push(element);
        } else if self.root.is_some() {
            return Err(LoadError::MultipleRootElements);
        } else {
            self.root = Some(element);
        }
        Ok(())
    }

    fn finish(mut self) -> Result<XmlElement, LoadError> {
        if let Some(element) = self.open.pop() {
            return Err(LoadError::UnclosedElement(element.name));
        }
        self.root.ok_or(LoadError::NoRootElement)
    }
}

fn open_element(e: &BytesStart) -> Result<XmlElement, quick_xml::Error> {
    let mut element = XmlElement::new(String::from_utf8_lossy(e.name().as_ref()));
    for attr in e.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}
