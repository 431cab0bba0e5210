//! DOCX reader
//!
//! Reads `word/document.xml` out of the zip container. Body paragraphs come
//! first in document order, then table rows with cells joined by ` | `.

use super::ExtractError;
use crate::models::DocumentData;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub(super) fn read_docx(path: &Path) -> Result<DocumentData, ExtractError> {
    let file = File::open(path)?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| ExtractError::Docx(e.to_string()))?;
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| ExtractError::Docx(format!("missing word/document.xml: {e}")))?
        .read_to_string(&mut xml)?;

    let text = document_text(&xml)?;
    Ok(DocumentData::from_text(text, "docx"))
}

#[derive(Default)]
struct Collector {
    paragraphs: Vec<String>,
    table_rows: Vec<String>,
    para: String,
    cell_paras: Vec<String>,
    row: Vec<String>,
    table_depth: usize,
    in_text: bool,
}

fn document_text(xml: &str) -> Result<String, ExtractError> {
    let mut reader = Reader::from_str(xml);
    let mut c = Collector::default();

    loop {
        let event = reader
            .read_event()
            .map_err(|e| ExtractError::Docx(format!("XML error at {}: {e}", reader.buffer_position())))?;
        match event {
            Event::Start(e) => match e.local_name().as_ref() {
                b"p" => c.para.clear(),
                b"t" => c.in_text = true,
                b"tbl" => c.table_depth += 1,
                b"tr" if c.table_depth == 1 => c.row.clear(),
                b"tc" if c.table_depth == 1 => c.cell_paras.clear(),
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"tab" => c.para.push('\t'),
                b"br" | b"cr" => c.para.push('\n'),
                _ => {}
            },
            Event::Text(t) if c.in_text => {
                let s = t.unescape().map_err(|e| ExtractError::Docx(e.to_string()))?;
                c.para.push_str(&s);
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => c.in_text = false,
                b"p" => {
                    let para = std::mem::take(&mut c.para);
                    if c.table_depth == 0 {
                        if !para.is_empty() {
                            c.paragraphs.push(para);
                        }
                    } else {
                        c.cell_paras.push(para);
                    }
                }
                b"tc" if c.table_depth == 1 => {
                    let cell = c.cell_paras.join("\n");
                    c.row.push(cell);
                }
                b"tr" if c.table_depth == 1 => {
                    if c.row.iter().any(|cell| !cell.is_empty()) {
                        c.table_rows.push(c.row.join(" | "));
                    }
                }
                b"tbl" => c.table_depth = c.table_depth.saturating_sub(1),
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    let mut parts = c.paragraphs;
    parts.extend(c.table_rows);
    Ok(parts.join("\n"))
}
