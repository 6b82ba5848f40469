//! HTML backend.
//!
//! Produces a self-contained page: a scaled preview wrapper around the
//! unscaled `#resume-content` node, which is what the PDF exporter captures.

use crate::export::CONTENT_ELEMENT_ID;
use crate::renderer::{RenderContext, RenderResult, Renderer};
use crate::tree::{
    Column, ColumnRole, ContactItem, ContentBlock, EntryBlock, HeaderBlock, LayoutMode, Overlays, PageStyle,
    RenderTree, RenderedSection, SkillBlock,
};
use std::fmt::Write;
use vitae_core::SerializableColor;
use vitae_core::style::BorderDecoration;

const STYLESHEET: &str = r#"
.vitae-preview { transform-origin: top center; }
.vitae-page { box-sizing: border-box; position: relative; overflow: hidden; }
.vitae-page * { box-sizing: border-box; }
.vitae-page p { margin: 0; }
.vitae-page ul { margin: 0; padding: 0; list-style: none; }
.vitae-page a { color: inherit; text-decoration: none; }

.border-simple { border: 1px solid var(--rule); }
.border-double { border: 4px double var(--rule); }
.border-thick { border: 6px solid var(--rule); }
.border-offset { box-shadow: 8px 8px 0 var(--rule); border: 1px solid var(--rule); }
.border-rounded { border: 2px solid var(--rule); border-radius: 16px; }
.border-minimal { border-top: 4px solid var(--rule); }
.corner { position: absolute; width: 28px; height: 28px; border-color: var(--rule); border-style: solid; }
.corner-tl { top: 8px; left: 8px; border-width: 3px 0 0 3px; }
.corner-tr { top: 8px; right: 8px; border-width: 3px 3px 0 0; }
.corner-bl { bottom: 8px; left: 8px; border-width: 0 0 3px 3px; }
.corner-br { bottom: 8px; right: 8px; border-width: 0 3px 3px 0; }

.vitae-header { display: flex; gap: 16pt; align-items: center; margin-bottom: var(--section-gap); }
.vitae-header.align-center { flex-direction: column; text-align: center; }
.vitae-header.align-right { flex-direction: row-reverse; text-align: right; }
.vitae-header h1 { margin: 0; line-height: 1.1; }
.header-banner { padding: 14pt; color: #ffffff; border-radius: 4px; }
.header-underline { padding-bottom: 10pt; border-bottom: 2px solid var(--rule); }
.header-boxed { padding: 12pt; border: 1px solid var(--rule); }
.title-accent { color: var(--accent); }
.title-italic { font-style: italic; }
.title-uppercase { text-transform: uppercase; letter-spacing: 0.08em; }
.contacts { display: flex; flex-wrap: wrap; gap: 4pt 12pt; margin-top: 6pt; }
.contacts-stacked { flex-direction: column; }
.contacts-pills li { padding: 1pt 8pt; border: 1px solid var(--rule); border-radius: 999px; }
.contacts .icon { margin-right: 4pt; }
.photo { object-fit: cover; flex-shrink: 0; }
.photo-circle { border-radius: 50%; }
.photo-rounded { border-radius: 12px; }
.photo-border-thin { border: 1px solid var(--photo-border); }
.photo-border-thick { border: 4px solid var(--photo-border); }
.photo-border-accent { border: 3px solid var(--photo-border); box-shadow: 0 0 0 3px #ffffff, 0 0 0 5px var(--photo-border); }

.vitae-columns { display: flex; gap: 18pt; }
.column-sidebar { padding: 12pt; }
.section { margin-bottom: var(--section-gap); }
.section-header { margin: 0 0 var(--item-gap) 0; font-size: 1.15em; }
.header-style-underline { border-bottom: 1.5px solid var(--rule); padding-bottom: 2pt; }
.header-style-bar { border-left: 4px solid var(--rule); padding-left: 6pt; }
.header-style-filled { background: var(--rule); color: #ffffff !important; padding: 2pt 6pt; }
.header-style-boxed { border: 1px solid var(--rule); padding: 2pt 6pt; }
.header-style-centered { text-align: center; }

.divider-solid .section + .section { border-top: 1px solid var(--rule); padding-top: var(--item-gap); }
.divider-dashed .section + .section { border-top: 1px dashed var(--rule); padding-top: var(--item-gap); }
.divider-dotted .section + .section { border-top: 1px dotted var(--rule); padding-top: var(--item-gap); }
.divider-double .section + .section { border-top: 3px double var(--rule); padding-top: var(--item-gap); }

.justified { text-align: justify; }
.entry { margin-bottom: var(--item-gap); }
.entry-head { display: flex; justify-content: space-between; gap: 8pt; }
.date-below .entry-head { flex-direction: column; }
.entry-title { font-weight: 600; }
.entry-date { color: var(--muted); white-space: nowrap; }
.date-italic { font-style: italic; }
.date-bold { font-weight: 700; }
.date-pill { padding: 0 6pt; border-radius: 999px; background: var(--tint); }
.company-italic { font-style: italic; }
.company-bold { font-weight: 700; }
.company-accent { color: var(--accent); }

.tags { display: flex; flex-wrap: wrap; gap: 4pt; }
.tags li { padding: 1pt 6pt; border-radius: 3px; background: var(--chip-fill); color: var(--chip-text); }
.tag-outline li { background: transparent; border: 1px solid var(--chip-border); }
.tag-pill li { border-radius: 999px; }
.marker { display: inline-block; width: 1.2em; color: var(--accent); }
.skill-bar { margin-bottom: 4pt; }
.skill-bar .track { height: 5pt; border-radius: 3pt; overflow: hidden; }
.skill-bar .fill { height: 100%; }

.watermark { position: absolute; top: 50%; left: 50%; font-size: 64pt; font-weight: 700; white-space: nowrap; pointer-events: none; }
.vitae-footer { position: absolute; left: 0; right: 0; bottom: 8mm; text-align: center; color: var(--muted); font-size: 0.85em; }
"#;

/// HTML-escape text content and attribute values.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Escape each line and join them with `<br>`.
fn escape_lines(lines: &[String]) -> String {
    lines.iter().map(|line| escape_html(line)).collect::<Vec<_>>().join("<br>")
}

fn css(color: SerializableColor) -> String {
    color.to_hex()
}

fn role_class(role: ColumnRole) -> &'static str {
    match role {
        ColumnRole::Full => "full",
        ColumnRole::Main => "main",
        ColumnRole::Sidebar => "sidebar",
        ColumnRole::GridLeft => "grid-left",
        ColumnRole::GridRight => "grid-right",
    }
}

/// Renders a [`RenderTree`] to an HTML string.
#[derive(Debug, Default)]
pub struct HtmlRenderer {
    output: String,
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Markup produced by the last successful build.
    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn into_output(self) -> String {
        self.output
    }

    fn page(out: &mut String, ctx: &RenderContext) -> std::fmt::Result {
        let tree = ctx.tree;
        write!(
            out,
            r#"<div class="vitae-preview" style="transform:scale({});">"#,
            ctx.scale_factor
        )?;
        Self::content(out, tree)?;
        out.push_str("</div>");
        Ok(())
    }

    fn content(out: &mut String, tree: &RenderTree) -> std::fmt::Result {
        let page = &tree.page;
        let border = tree.overlays.border.key();
        write!(
            out,
            r#"<div id="{CONTENT_ELEMENT_ID}" class="vitae-page border-{border} divider-{divider}" style="{style}">"#,
            divider = page.divider.key(),
            style = page_css(page),
        )?;

        if tree.overlays.border == BorderDecoration::CornerAccents {
            for corner in ["tl", "tr", "bl", "br"] {
                write!(out, r#"<span class="corner corner-{corner}"></span>"#)?;
            }
        }

        Self::header(out, &tree.header)?;

        if let Some(lede) = &tree.lede {
            Self::section(out, lede)?;
        }

        let layout_class = match tree.layout {
            LayoutMode::SingleColumn { grid: false } => "single",
            LayoutMode::SingleColumn { grid: true } => "grid",
            LayoutMode::Sidebar { .. } => "sidebar",
        };
        write!(out, r#"<div class="vitae-columns layout-{layout_class}">"#)?;
        for column in &tree.columns {
            Self::column(out, column)?;
        }
        out.push_str("</div>");

        Self::overlays(out, &tree.overlays)?;
        out.push_str("</div>");
        Ok(())
    }

    fn header(out: &mut String, header: &HeaderBlock) -> std::fmt::Result {
        let mut style = String::new();
        if let Some(band) = header.band {
            write!(style, "background:{};", css(band))?;
        }
        write!(
            out,
            r#"<header class="vitae-header header-{} align-{}" style="{style}">"#,
            header.style.key(),
            header.align.key()
        )?;

        if let Some(photo) = &header.photo {
            write!(
                out,
                r#"<img class="photo photo-{} photo-border-{}" src="{}" alt="" style="width:{size}pt;height:{size}pt;--photo-border:{};">"#,
                photo.shape.key(),
                photo.border.key(),
                escape_html(&photo.src),
                css(photo.border_color),
                size = photo.size_pt,
            )?;
        }

        out.push_str(r#"<div class="identity">"#);
        if let Some(name) = &header.name {
            let color = if header.band.is_some() { "#ffffff" } else { "var(--accent)" };
            write!(
                out,
                r#"<h1 style="font-size:{}pt;font-weight:{};text-transform:{};color:{color};">{}</h1>"#,
                header.name_size_pt,
                header.name_weight,
                header.name_case.key(),
                escape_html(name)
            )?;
        }
        if let Some(title) = &header.title {
            write!(
                out,
                r#"<p class="title title-{}">{}</p>"#,
                header.title_style.key(),
                escape_html(title)
            )?;
        }
        if !header.contacts.is_empty() {
            write!(out, r#"<ul class="contacts contacts-{}">"#, header.contact_style.key())?;
            for contact in &header.contacts {
                Self::contact(out, contact)?;
            }
            out.push_str("</ul>");
        }
        out.push_str("</div></header>");
        Ok(())
    }

    fn contact(out: &mut String, contact: &ContactItem) -> std::fmt::Result {
        out.push_str("<li>");
        if let Some(color) = contact.icon_color {
            write!(
                out,
                r#"<span class="icon" style="color:{};">{}</span>"#,
                css(color),
                escape_html(contact.kind.icon())
            )?;
        }
        match &contact.href {
            Some(href) => write!(
                out,
                r#"<a href="{}">{}</a>"#,
                escape_html(href),
                escape_html(&contact.text)
            )?,
            None => write!(out, "<span>{}</span>", escape_html(&contact.text))?,
        }
        out.push_str("</li>");
        Ok(())
    }

    fn column(out: &mut String, column: &Column) -> std::fmt::Result {
        let mut style = format!(
            "flex:0 0 {:.2}%;color:{};",
            column.width_fraction * 100.0,
            css(column.text_color)
        );
        if let Some(background) = column.background {
            write!(style, "background:{};", css(background))?;
        }
        write!(
            out,
            r#"<div class="column column-{}" style="{style}">"#,
            role_class(column.role)
        )?;
        for section in &column.sections {
            Self::section(out, section)?;
        }
        out.push_str("</div>");
        Ok(())
    }

    fn section(out: &mut String, section: &RenderedSection) -> std::fmt::Result {
        let header = &section.header;
        write!(
            out,
            r#"<section class="section section-{id}" data-section="{id}"><h2 class="section-header header-style-{}" style="color:{};text-transform:{};--rule:{};">{}</h2>"#,
            header.style.key(),
            css(header.color),
            header.case.key(),
            css(header.rule_color),
            escape_html(&header.title),
            id = escape_html(&section.id),
        )?;
        Self::block(out, &section.content)?;
        out.push_str("</section>");
        Ok(())
    }

    fn block(out: &mut String, block: &ContentBlock) -> std::fmt::Result {
        match block {
            ContentBlock::Paragraph { lines, justified } => {
                let class = if *justified { "paragraph justified" } else { "paragraph" };
                write!(out, r#"<p class="{class}">{}</p>"#, escape_lines(lines))?;
            }
            ContentBlock::Entries { entries } => {
                for entry in entries {
                    Self::entry(out, entry)?;
                }
            }
            ContentBlock::Skills { skills } => Self::skills(out, skills)?,
            ContentBlock::Bullets { marker, items } => {
                out.push_str(r#"<ul class="bullets">"#);
                for item in items {
                    out.push_str("<li>");
                    Self::marker(out, *marker)?;
                    write!(out, "{}</li>", escape_html(item))?;
                }
                out.push_str("</ul>");
            }
        }
        Ok(())
    }

    fn marker(out: &mut String, marker: Option<char>) -> std::fmt::Result {
        if let Some(marker) = marker {
            write!(out, r#"<span class="marker">{marker}</span>"#)?;
        }
        Ok(())
    }

    fn entry(out: &mut String, entry: &EntryBlock) -> std::fmt::Result {
        write!(
            out,
            r#"<div class="entry date-{}"><div class="entry-head">"#,
            entry.date_align.key()
        )?;
        if let Some(title) = &entry.title {
            write!(out, r#"<span class="entry-title">{}</span>"#, escape_html(title))?;
        }
        if let Some(date) = &entry.date {
            write!(
                out,
                r#"<span class="entry-date date-{}">{}</span>"#,
                entry.date_style.key(),
                escape_html(date)
            )?;
        }
        out.push_str("</div>");
        if let Some(subtitle) = &entry.subtitle {
            write!(
                out,
                r#"<div class="entry-subtitle company-{}">{}</div>"#,
                entry.subtitle_style.key(),
                escape_html(subtitle)
            )?;
        }
        if !entry.details.is_empty() {
            write!(out, r#"<p class="entry-details">{}</p>"#, escape_lines(&entry.details))?;
        }
        out.push_str("</div>");
        Ok(())
    }

    fn skills(out: &mut String, skills: &SkillBlock) -> std::fmt::Result {
        match skills {
            SkillBlock::Tags {
                names,
                style,
                fill,
                text,
                border,
            } => {
                write!(
                    out,
                    r#"<ul class="skills tags tag-{}" style="--chip-fill:{};--chip-text:{};--chip-border:{};">"#,
                    style.key(),
                    css(*fill),
                    css(*text),
                    css(*border)
                )?;
                for name in names {
                    write!(out, "<li>{}</li>", escape_html(name))?;
                }
                out.push_str("</ul>");
            }
            SkillBlock::List { marker, names } => {
                out.push_str(r#"<ul class="skills list">"#);
                for name in names {
                    out.push_str("<li>");
                    Self::marker(out, *marker)?;
                    write!(out, "{}</li>", escape_html(name))?;
                }
                out.push_str("</ul>");
            }
            SkillBlock::Bars { bars, fill, track } => {
                out.push_str(r#"<div class="skills bars">"#);
                for bar in bars {
                    write!(
                        out,
                        r#"<div class="skill-bar"><span class="skill-name">{}</span><div class="track" style="background:{};"><div class="fill" style="width:{}%;background:{};"></div></div></div>"#,
                        escape_html(&bar.name),
                        css(*track),
                        bar.level,
                        css(*fill)
                    )?;
                }
                out.push_str("</div>");
            }
            SkillBlock::Sentence { text } => {
                write!(out, r#"<p class="skills sentence">{}</p>"#, escape_html(text))?;
            }
        }
        Ok(())
    }

    fn overlays(out: &mut String, overlays: &Overlays) -> std::fmt::Result {
        if let Some(watermark) = &overlays.watermark {
            write!(
                out,
                r#"<div class="watermark" style="color:{};transform:translate(-50%,-50%) rotate({}deg);">{}</div>"#,
                css(watermark.color),
                watermark.angle_deg,
                escape_html(&watermark.text)
            )?;
        }
        if let Some(footer) = &overlays.footer {
            write!(out, r#"<footer class="vitae-footer">{}</footer>"#, escape_html(footer))?;
        }
        Ok(())
    }
}

fn page_css(page: &PageStyle) -> String {
    format!(
        "width:{}mm;min-height:{}mm;padding:{}mm;background:{};color:{};font-family:{};font-size:{}pt;line-height:{};\
         --accent:{};--rule:{};--tint:{};--muted:{};--section-gap:{}pt;--item-gap:{}pt;",
        page.size_mm.width,
        page.size_mm.height,
        page.margin_mm,
        css(page.background),
        css(page.text_color),
        escape_html(page.font_stack),
        page.base_font_pt,
        page.line_height,
        css(page.accent),
        css(page.rule_color),
        css(page.tint),
        css(page.muted_color),
        page.section_gap_pt,
        page.item_gap_pt,
    )
}

impl Renderer for HtmlRenderer {
    fn build(&mut self, ctx: &RenderContext) -> RenderResult<()> {
        ctx.validate()?;

        let mut out = String::new();
        if ctx.standalone {
            let title = ctx
                .tree
                .header
                .name
                .as_deref()
                .map(|name| format!("{name} - Resume"))
                .unwrap_or_else(|| "Resume".to_string());
            write!(
                out,
                r#"<!DOCTYPE html><html lang="en"><head><meta charset="utf-8"><title>{}</title><style>{STYLESHEET}</style></head><body>"#,
                escape_html(&title)
            )?;
            Self::page(&mut out, ctx)?;
            out.push_str("</body></html>");
        } else {
            write!(out, "<style>{STYLESHEET}</style>")?;
            Self::page(&mut out, ctx)?;
        }

        log::debug!("rendered {} bytes of HTML", out.len());
        self.output = out;
        Ok(())
    }
}

/// Render a composed page to a standalone HTML document.
pub fn render_html(tree: &RenderTree) -> RenderResult<String> {
    let mut renderer = HtmlRenderer::new();
    renderer.build(&RenderContext::new(tree))?;
    Ok(renderer.into_output())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose_document;
    use vitae_core::style::SkillStyle;
    use vitae_core::{ResumeDocument, StyleRegistry};

    fn sample_html(doc: &ResumeDocument) -> String {
        let tree = compose_document(doc, StyleRegistry::builtin());
        render_html(&tree).unwrap()
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<b>"Tom" & Jerry</b>"#), "&lt;b&gt;&quot;Tom&quot; &amp; Jerry&lt;/b&gt;");
    }

    #[test]
    fn test_content_node_is_unscaled() {
        let doc = ResumeDocument::sample();
        let tree = compose_document(&doc, StyleRegistry::builtin());
        let mut renderer = HtmlRenderer::new();
        renderer
            .build(&RenderContext::new(&tree).with_scale_factor(0.6))
            .unwrap();
        let html = renderer.output();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert_eq!(html.matches(r#"id="resume-content""#).count(), 1);
        assert!(html.contains("transform:scale(0.6)"));

        let content_start = html.find(r#"id="resume-content""#).unwrap();
        let content_tag_end = content_start + html[content_start..].find('>').unwrap();
        assert!(!html[content_start..content_tag_end].contains("scale"));
    }

    #[test]
    fn test_user_text_is_escaped_and_keeps_line_breaks() {
        let mut doc = ResumeDocument::sample();
        doc.data.personal.name = "<script>alert(1)</script>".to_string();
        doc.data.personal.summary = "Line one\nLine & two".to_string();

        let html = sample_html(&doc);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("Line one<br>Line &amp; two"));
    }

    #[test]
    fn test_contacts_are_rendered_in_full() {
        let mut doc = ResumeDocument::sample();
        doc.data.personal.portfolio = "portfolio.example.com/a/really/long/path/that/stays/whole".to_string();
        let html = sample_html(&doc);
        assert!(html.contains(">portfolio.example.com/a/really/long/path/that/stays/whole</a>"));
        assert!(html.contains(r#"href="mailto:alex.morgan@example.com""#));
    }

    #[test]
    fn test_skill_bars_width() {
        let mut doc = ResumeDocument::sample();
        doc.config.skill_style = SkillStyle::Bars;
        let html = sample_html(&doc);
        assert!(html.contains("width:90%"));
        assert!(html.contains(r#"class="skills bars""#));
    }

    #[test]
    fn test_overlays() {
        let mut doc = ResumeDocument::sample();
        doc.config.border_style = BorderDecoration::CornerAccents;
        doc.config.watermark = "DRAFT".to_string();
        doc.config.custom_footer = "Available from June".to_string();

        let html = sample_html(&doc);
        assert!(html.contains("border-corner-accents"));
        assert_eq!(html.matches(r#"class="corner "#).count(), 4);
        assert!(html.contains("rotate(-30deg);\">DRAFT</div>"));
        assert!(html.contains(r#"<footer class="vitae-footer">Available from June</footer>"#));
    }

    #[test]
    fn test_fragment_has_no_document_shell() {
        let tree = compose_document(&ResumeDocument::sample(), StyleRegistry::builtin());
        let mut renderer = HtmlRenderer::new();
        renderer.build(&RenderContext::new(&tree).fragment()).unwrap();
        assert!(!renderer.output().contains("<html"));
        assert!(renderer.output().contains(CONTENT_ELEMENT_ID));
    }

    #[test]
    fn test_empty_document_renders() {
        let html = sample_html(&ResumeDocument::default());
        assert!(html.contains("<title>Resume</title>"));
        assert!(!html.contains("<section"));
    }
}
