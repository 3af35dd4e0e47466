use crate::model::ImageSize;
use crate::render::Backend;

#[derive(Clone, Debug, Default)]
pub struct HtmlOptions {
    /// Wrap the rendered body in `<html><body>` when finishing.
    pub full_document: bool,
}

/// Renders fragments as HTML.
#[derive(Clone, Debug, Default)]
pub struct HtmlBackend {
    options: HtmlOptions,
}

impl HtmlBackend {
    pub fn new(options: HtmlOptions) -> Self {
        HtmlBackend { options }
    }

    /// Apply document-level wrapping to a rendered body.
    pub fn finish(&self, body: String) -> String {
        if self.options.full_document {
            format!(
                "<html><head><meta charset=\"utf-8\"/></head><body>{body}</body></html>"
            )
        } else {
            body
        }
    }
}

/// Text already went through `escape`; only quotes remain unsafe inside `"..."`.
fn attr(value: &str) -> String {
    value.replace('"', "&quot;")
}

fn list_style_type(kind: &str) -> &'static str {
    match kind {
        "lowerLetter" => "lower-alpha",
        "upperLetter" => "upper-alpha",
        "lowerRoman" => "lower-roman",
        "upperRoman" => "upper-roman",
        "decimalZero" => "decimal-leading-zero",
        _ => "decimal",
    }
}

/// Tracked-change attributes, skipped while author/date are unknown.
fn change_attrs(author: &str, date: &str) -> String {
    let mut attrs = String::new();
    if !author.is_empty() {
        attrs.push_str(&format!(" data-author=\"{}\"", attr(author)));
    }
    if !date.is_empty() {
        attrs.push_str(&format!(" data-date=\"{}\"", attr(date)));
    }
    attrs
}

impl Backend for HtmlBackend {
    fn escape(&self, text: &str) -> String {
        html_escape::encode_text(text).into_owned()
    }

    fn paragraph(&mut self, text: &str) -> String {
        format!("<p>{text}</p>")
    }

    fn bold(&mut self, text: &str) -> String {
        format!("<strong>{text}</strong>")
    }

    fn italics(&mut self, text: &str) -> String {
        format!("<em>{text}</em>")
    }

    fn underline(&mut self, text: &str) -> String {
        format!("<u>{text}</u>")
    }

    fn hyperlink(&mut self, text: &str, href: &str) -> String {
        format!("<a href=\"{}\">{text}</a>", attr(href))
    }

    fn image(&mut self, src: &str, size: &ImageSize) -> String {
        let mut tag = format!("<img src=\"{}\"", attr(src));
        if ImageSize::is_known(&size.width) {
            tag.push_str(&format!(" width=\"{}\"", attr(&size.width)));
        }
        if ImageSize::is_known(&size.height) {
            tag.push_str(&format!(" height=\"{}\"", attr(&size.height)));
        }
        tag.push_str(" />");
        tag
    }

    fn insertion(&mut self, text: &str, author: &str, date: &str) -> String {
        format!("<ins{}>{text}</ins>", change_attrs(author, date))
    }

    fn deletion(&mut self, text: &str, author: &str, date: &str) -> String {
        format!("<del{}>{text}</del>", change_attrs(author, date))
    }

    fn ordered_list(&mut self, text: &str, kind: &str) -> String {
        format!(
            "<ol style=\"list-style-type: {}\">{text}</ol>",
            list_style_type(kind)
        )
    }

    fn unordered_list(&mut self, text: &str) -> String {
        format!("<ul>{text}</ul>")
    }

    fn list_element(&mut self, text: &str) -> String {
        format!("<li>{text}</li>")
    }

    fn table(&mut self, text: &str) -> String {
        format!("<table border=\"1\">{text}</table>")
    }

    fn table_row(&mut self, text: &str) -> String {
        format!("<tr>{text}</tr>")
    }

    fn table_cell(&mut self, text: &str) -> String {
        format!("<td>{text}</td>")
    }

    fn page_break(&mut self) -> String {
        "<hr />".to_string()
    }

    fn right_justify(&mut self, text: &str) -> String {
        format!("<span style=\"display: block; text-align: right\">{text}</span>")
    }

    fn center_justify(&mut self, text: &str) -> String {
        format!("<span style=\"display: block; text-align: center\">{text}</span>")
    }

    fn indent(
        &mut self,
        text: &str,
        left: Option<&str>,
        right: Option<&str>,
        first_line: Option<&str>,
    ) -> String {
        let mut style = String::new();
        if let Some(left) = left {
            style.push_str(&format!("margin-left: {left}pt; "));
        }
        if let Some(right) = right {
            style.push_str(&format!("margin-right: {right}pt; "));
        }
        if let Some(first_line) = first_line {
            style.push_str(&format!("text-indent: {first_line}pt; "));
        }
        if style.is_empty() {
            return text.to_string();
        }
        format!(
            "<span style=\"display: inline-block; {}\">{text}</span>",
            style.trim_end()
        )
    }
}
