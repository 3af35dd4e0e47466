mod docx;
mod error;
mod html;
mod model;
mod render;

pub use docx::Docx;
pub use error::{Error, Result};
pub use html::{HtmlBackend, HtmlOptions};
pub use model::{
    Annotation, Comment, Descendants, DocTree, Element, ImageSize, ListStyle, NodeId,
};
pub use render::Backend;

use std::path::Path;
use std::time::Instant;

pub fn convert_docx_to_html(input: &Path) -> Result<String> {
    let t0 = Instant::now();
    let doc = Docx::open(input)?;
    Ok(render_html(&doc, t0))
}

pub fn convert_docx_bytes_to_html(input: &[u8]) -> Result<String> {
    let t0 = Instant::now();
    let doc = Docx::from_bytes(input)?;
    Ok(render_html(&doc, t0))
}

fn render_html(doc: &Docx, t0: Instant) -> String {
    let t_parse = t0.elapsed();

    let mut backend = HtmlBackend::new(HtmlOptions {
        full_document: true,
    });
    let body = doc.render(&mut backend);
    let html = backend.finish(body);
    let t_total = t0.elapsed();

    log::info!(
        "Timing: parse={:.1}ms, render={:.1}ms, total={:.1}ms (output {} bytes)",
        t_parse.as_secs_f64() * 1000.0,
        (t_total - t_parse).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        html.len(),
    );

    html
}
