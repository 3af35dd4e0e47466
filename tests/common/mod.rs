#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{Cursor, Write};

use docx_markup::{Backend, Docx, ImageSize};
use zip::write::SimpleFileOptions;

const NAMESPACES: &str = concat!(
    r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
    r#"xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing" "#,
    r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
    r#"xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture" "#,
    r#"xmlns:v="urn:schemas-microsoft-com:vml" "#,
    r#"xmlns:o="urn:schemas-microsoft-com:office:office""#,
);

pub fn document_xml(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document {NAMESPACES}><w:body>{body}<w:sectPr><w:pgSz w:w="12240" w:h="15840"/></w:sectPr></w:body></w:document>"#
    )
}

/// `<w:p>` with a single plain run.
pub fn para(text: &str) -> String {
    format!(r#"<w:p><w:r><w:t>{text}</w:t></w:r></w:p>"#)
}

/// `<w:p>` carrying `numPr` with the given numbering id and level.
pub fn list_para(num_id: &str, ilvl: &str, text: &str) -> String {
    format!(
        r#"<w:p><w:pPr><w:pStyle w:val="ListParagraph"/><w:numPr><w:ilvl w:val="{ilvl}"/><w:numId w:val="{num_id}"/></w:numPr></w:pPr><w:r><w:t>{text}</w:t></w:r></w:p>"#
    )
}

/// One abstract definition per entry: `(numId, [numFmt for ilvl 0, 1, ...])`.
pub fn numbering_xml(defs: &[(&str, &[&str])]) -> String {
    let mut abstracts = String::new();
    let mut nums = String::new();
    for (i, (num_id, formats)) in defs.iter().enumerate() {
        abstracts.push_str(&format!(r#"<w:abstractNum w:abstractNumId="{i}">"#));
        for (ilvl, fmt) in formats.iter().enumerate() {
            abstracts.push_str(&format!(
                r#"<w:lvl w:ilvl="{ilvl}"><w:start w:val="1"/><w:numFmt w:val="{fmt}"/><w:lvlText w:val="%{}."/></w:lvl>"#,
                ilvl + 1
            ));
        }
        abstracts.push_str("</w:abstractNum>");
        nums.push_str(&format!(
            r#"<w:num w:numId="{num_id}"><w:abstractNumId w:val="{i}"/></w:num>"#
        ));
    }
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:numbering {NAMESPACES}>{abstracts}{nums}</w:numbering>"#
    )
}

/// `(id, author, date, text)` per comment.
pub fn comments_xml(comments: &[(&str, &str, &str, &str)]) -> String {
    let mut body = String::new();
    for (id, author, date, text) in comments {
        body.push_str(&format!(
            r#"<w:comment w:id="{id}" w:author="{author}" w:date="{date}" w:initials="X"><w:p><w:r><w:t>{text}</w:t></w:r></w:p></w:comment>"#
        ));
    }
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:comments {NAMESPACES}>{body}</w:comments>"#
    )
}

/// In-memory DOCX package.
pub struct Package {
    document: Option<Vec<u8>>,
    rels: Option<Vec<(String, String)>>,
    numbering: Option<String>,
    comments: Option<String>,
}

impl Package {
    pub fn new(body: &str) -> Self {
        Package {
            document: Some(document_xml(body).into_bytes()),
            rels: Some(Vec::new()),
            numbering: None,
            comments: None,
        }
    }

    pub fn raw_document(mut self, xml: &str) -> Self {
        self.document = Some(xml.as_bytes().to_vec());
        self
    }

    /// Store `word/document.xml` verbatim, even if it is not valid UTF-8.
    pub fn document_bytes(mut self, bytes: &[u8]) -> Self {
        self.document = Some(bytes.to_vec());
        self
    }

    pub fn without_document(mut self) -> Self {
        self.document = None;
        self
    }

    pub fn without_rels(mut self) -> Self {
        self.rels = None;
        self
    }

    pub fn rel(mut self, id: &str, target: &str) -> Self {
        self.rels
            .get_or_insert_with(Vec::new)
            .push((id.to_string(), target.to_string()));
        self
    }

    pub fn numbering(mut self, xml: String) -> Self {
        self.numbering = Some(xml);
        self
    }

    pub fn comments(mut self, xml: String) -> Self {
        self.comments = Some(xml);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);

        let mut add = |name: &str, content: &[u8]| {
            writer.start_file(name, options).unwrap();
            writer.write_all(content).unwrap();
        };

        add(
            "[Content_Types].xml",
            r#"<?xml version="1.0"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/></Types>"#.as_bytes(),
        );
        if let Some(document) = &self.document {
            add("word/document.xml", document);
        }
        if let Some(rels) = &self.rels {
            let mut xml = String::from(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
            );
            for (id, target) in rels {
                xml.push_str(&format!(
                    r#"<Relationship Id="{id}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="{target}" TargetMode="External"/>"#
                ));
            }
            xml.push_str("</Relationships>");
            add("word/_rels/document.xml.rels", xml.as_bytes());
        }
        if let Some(numbering) = &self.numbering {
            add("word/numbering.xml", numbering.as_bytes());
        }
        if let Some(comments) = &self.comments {
            add("word/comments.xml", comments.as_bytes());
        }

        writer.finish().unwrap().into_inner()
    }

    pub fn open(&self) -> Docx {
        Docx::from_bytes(&self.build()).expect("package should load")
    }
}

/// Backend that renders every construct as `name(...)` and counts calls.
#[derive(Default)]
pub struct Recorder {
    pub calls: HashMap<&'static str, usize>,
}

impl Recorder {
    pub fn count(&self, name: &str) -> usize {
        self.calls.get(name).copied().unwrap_or(0)
    }

    fn wrap(&mut self, name: &'static str, text: &str) -> String {
        *self.calls.entry(name).or_insert(0) += 1;
        format!("{name}({text})")
    }
}

fn or_dash(v: Option<&str>) -> &str {
    v.unwrap_or("-")
}

impl Backend for Recorder {
    fn escape(&self, text: &str) -> String {
        text.to_string()
    }

    fn paragraph(&mut self, text: &str) -> String {
        self.wrap("p", text)
    }

    fn bold(&mut self, text: &str) -> String {
        self.wrap("b", text)
    }

    fn italics(&mut self, text: &str) -> String {
        self.wrap("i", text)
    }

    fn underline(&mut self, text: &str) -> String {
        self.wrap("u", text)
    }

    fn hyperlink(&mut self, text: &str, href: &str) -> String {
        *self.calls.entry("a").or_insert(0) += 1;
        format!("a[{href}]({text})")
    }

    fn image(&mut self, src: &str, size: &ImageSize) -> String {
        *self.calls.entry("img").or_insert(0) += 1;
        format!("img[{src},{},{}]", size.width, size.height)
    }

    fn insertion(&mut self, text: &str, _author: &str, _date: &str) -> String {
        self.wrap("ins", text)
    }

    fn deletion(&mut self, text: &str, _author: &str, _date: &str) -> String {
        self.wrap("del", text)
    }

    fn ordered_list(&mut self, text: &str, kind: &str) -> String {
        *self.calls.entry("ol").or_insert(0) += 1;
        format!("ol[{kind}]({text})")
    }

    fn unordered_list(&mut self, text: &str) -> String {
        self.wrap("ul", text)
    }

    fn list_element(&mut self, text: &str) -> String {
        self.wrap("li", text)
    }

    fn table(&mut self, text: &str) -> String {
        self.wrap("tbl", text)
    }

    fn table_row(&mut self, text: &str) -> String {
        self.wrap("tr", text)
    }

    fn table_cell(&mut self, text: &str) -> String {
        self.wrap("tc", text)
    }

    fn page_break(&mut self) -> String {
        *self.calls.entry("pb").or_insert(0) += 1;
        "PB".to_string()
    }

    fn right_justify(&mut self, text: &str) -> String {
        self.wrap("right", text)
    }

    fn center_justify(&mut self, text: &str) -> String {
        self.wrap("center", text)
    }

    fn indent(
        &mut self,
        text: &str,
        left: Option<&str>,
        right: Option<&str>,
        first_line: Option<&str>,
    ) -> String {
        *self.calls.entry("ind").or_insert(0) += 1;
        format!(
            "ind[{},{},{}]({text})",
            or_dash(left),
            or_dash(right),
            or_dash(first_line)
        )
    }
}

/// Render a package body with a fresh [`Recorder`].
pub fn render(package: &Package) -> (String, Recorder) {
    let docx = package.open();
    let mut recorder = Recorder::default();
    let out = docx.render(&mut recorder);
    (out, recorder)
}

pub fn render_body(body: &str) -> (String, Recorder) {
    render(&Package::new(body))
}
