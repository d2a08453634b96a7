use std::{
    fs,
    io::{Cursor, Write},
    path::Path,
};

use quick_xml::{
    escape::escape,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
    Writer,
};

use super::{
    index::FileGroup, report::TestExecutions, test_case::TestCase, DurationFormat, TAG_FAILURE,
    TAG_FILE, TAG_SKIPPED, TAG_TEST_CASE, TAG_TEST_EXECUTIONS,
};

const INDENT_SIZE: usize = 2;

pub fn serialize<W: Write>(
    report: &TestExecutions,
    duration_format: DurationFormat,
    inner: W,
) -> anyhow::Result<()> {
    let mut writer = Writer::new_with_indent(inner, b' ', INDENT_SIZE);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new(TAG_TEST_EXECUTIONS);
    push_attr(&mut root, "version", report.version());
    if report.files().is_empty() {
        writer.write_event(Event::Empty(root))?;
    } else {
        writer.write_event(Event::Start(root))?;
        for file in report.files() {
            write_file(&mut writer, file, duration_format)?;
        }
        writer.write_event(Event::End(BytesEnd::new(TAG_TEST_EXECUTIONS)))?;
    }

    let mut inner = writer.into_inner();
    inner.write_all(b"\n")?;
    Ok(())
}

pub fn to_string(report: &TestExecutions, duration_format: DurationFormat) -> anyhow::Result<String> {
    let mut buffer = Cursor::new(Vec::new());
    serialize(report, duration_format, &mut buffer)?;
    Ok(String::from_utf8(buffer.into_inner())?)
}

/// Renders the whole document before touching `destination`, so a failed
/// render never leaves a partial file behind. Missing parent directories are
/// created and an existing file is overwritten.
pub fn write_report<P: AsRef<Path>>(
    report: &TestExecutions,
    duration_format: DurationFormat,
    destination: P,
) -> anyhow::Result<()> {
    let destination = destination.as_ref();
    let document = to_string(report, duration_format)?;

    if let Some(parent) = destination
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
    {
        fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!("Failed to create directory {:?}: {}", parent, e)
        })?;
    }
    fs::write(destination, document)
        .map_err(|e| anyhow::anyhow!("Failed to write report to {:?}: {}", destination, e))?;
    Ok(())
}

fn write_file<W: Write>(
    writer: &mut Writer<W>,
    file: &FileGroup,
    duration_format: DurationFormat,
) -> anyhow::Result<()> {
    let mut element = BytesStart::new(TAG_FILE);
    push_attr(&mut element, "path", &file.path);
    if file.test_cases.is_empty() {
        writer.write_event(Event::Empty(element))?;
        return Ok(());
    }

    writer.write_event(Event::Start(element))?;
    for test_case in &file.test_cases {
        write_test_case(writer, test_case, duration_format)?;
    }
    writer.write_event(Event::End(BytesEnd::new(TAG_FILE)))?;
    Ok(())
}

fn write_test_case<W: Write>(
    writer: &mut Writer<W>,
    test_case: &TestCase,
    duration_format: DurationFormat,
) -> anyhow::Result<()> {
    let mut element = BytesStart::new(TAG_TEST_CASE);
    push_attr(&mut element, "name", &test_case.name);
    push_attr(
        &mut element,
        "duration",
        &duration_format.render(test_case.duration),
    );

    if test_case.skipped.is_none() && test_case.failure.is_none() {
        writer.write_event(Event::Empty(element))?;
        return Ok(());
    }

    writer.write_event(Event::Start(element))?;
    if let Some(skipped) = &test_case.skipped {
        write_outcome(writer, TAG_SKIPPED, &skipped.message, &skipped.text)?;
    }
    if let Some(failure) = &test_case.failure {
        write_outcome(
            writer,
            TAG_FAILURE,
            &failure.message,
            failure.body.as_deref().unwrap_or_default(),
        )?;
    }
    writer.write_event(Event::End(BytesEnd::new(TAG_TEST_CASE)))?;
    Ok(())
}

fn write_outcome<W: Write>(
    writer: &mut Writer<W>,
    tag: &str,
    message: &str,
    body: &str,
) -> anyhow::Result<()> {
    let mut element = BytesStart::new(tag);
    push_attr(&mut element, "message", message);
    if body.is_empty() {
        writer.write_event(Event::Empty(element))?;
    } else {
        writer.write_event(Event::Start(element))?;
        writer.write_event(Event::Text(BytesText::new(body)))?;
        writer.write_event(Event::End(BytesEnd::new(tag)))?;
    }
    Ok(())
}

/// Pushes an escaped attribute. Line breaks are written as character
/// references because parsers normalize literal ones in attributes to spaces.
fn push_attr(element: &mut BytesStart, key: &str, value: &str) {
    let escaped = escape(value).replace('\n', "&#10;").replace('\r', "&#13;");
    element.push_attribute((key.as_bytes(), escaped.as_bytes()));
}
