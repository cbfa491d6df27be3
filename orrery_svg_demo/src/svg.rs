// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG backend: applies diff streams to a retained element map.

use std::collections::HashMap;

use kurbo::Rect;
use peniko::Brush;
use orrery_core::{MarkDiff, MarkId, MarkPayload, TextAnchor, TextBaseline};

#[derive(Debug, Default)]
pub(crate) struct SvgScene {
    marks: HashMap<MarkId, (i32, MarkPayload)>,
    view_box: Option<Rect>,
}

impl SvgScene {
    pub(crate) fn set_view_box(&mut self, view_box: Rect) {
        self.view_box = Some(view_box);
    }

    pub(crate) fn apply_diffs(&mut self, diffs: &[MarkDiff]) {
        for diff in diffs {
            match diff {
                MarkDiff::Enter { id, z_index, new } => {
                    self.marks.insert(*id, (*z_index, (**new).clone()));
                }
                MarkDiff::Update {
                    id, new_z_index, new, ..
                } => {
                    self.marks.insert(*id, (*new_z_index, (**new).clone()));
                }
                MarkDiff::Exit { id, .. } => {
                    self.marks.remove(id);
                }
            }
        }
    }

    pub(crate) fn to_svg_string(&self) -> String {
        let view_box = self.view_box.unwrap_or_else(|| Rect::new(0.0, 0.0, 100.0, 100.0));
        let mut out = String::new();

        out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
        out.push_str(&format!(
            r#"viewBox="{} {} {} {}" width="{}" height="{}" preserveAspectRatio="xMinYMin meet">"#,
            view_box.x0,
            view_box.y0,
            view_box.width(),
            view_box.height(),
            view_box.width(),
            view_box.height()
        ));
        out.push('\n');

        let mut ids: Vec<_> = self.marks.keys().copied().collect();
        ids.sort_by_key(|id| {
            let (z, _payload) = self.marks.get(id).expect("id from keys");
            (*z, id.0)
        });

        for id in ids {
            let (_z, payload) = self.marks.get(&id).expect("id from keys");
            match payload {
                MarkPayload::Rect(r) => {
                    out.push_str(&format!(
                        r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                        r.rect.x0,
                        r.rect.y0,
                        r.rect.width(),
                        r.rect.height(),
                    ));
                    write_paint_attr(&mut out, "fill", &r.fill);
                    out.push_str("/>\n");
                }
                MarkPayload::Point(p) => {
                    out.push_str(&format!(
                        r#"<circle cx="{}" cy="{}" r="{}""#,
                        p.center.x, p.center.y, p.radius
                    ));
                    write_paint_attr(&mut out, "fill", &p.fill);
                    out.push_str("/>\n");
                }
                MarkPayload::Path(p) => {
                    out.push_str(&format!(r#"<path d="{}""#, p.path.to_svg()));
                    write_paint_attr(&mut out, "fill", &p.fill);
                    write_paint_attr(&mut out, "stroke", &p.stroke);
                    if p.stroke_width > 0.0 {
                        out.push_str(&format!(r#" stroke-width="{}""#, p.stroke_width));
                    }
                    out.push_str("/>\n");
                }
                MarkPayload::Text(t) => {
                    let baseline = match t.baseline {
                        TextBaseline::Middle => "middle",
                        TextBaseline::Alphabetic => "alphabetic",
                        TextBaseline::Hanging => "hanging",
                        TextBaseline::Ideographic => "ideographic",
                    };
                    out.push_str(&format!(
                        r#"<text x="{}" y="{}" font-size="{}" dominant-baseline="{}""#,
                        t.pos.x, t.pos.y, t.font_size, baseline
                    ));
                    if t.angle != 0.0 {
                        out.push_str(&format!(
                            r#" transform="rotate({} {} {})""#,
                            t.angle, t.pos.x, t.pos.y
                        ));
                    }
                    out.push_str(match t.anchor {
                        TextAnchor::Start => r#" text-anchor="start""#,
                        TextAnchor::Middle => r#" text-anchor="middle""#,
                        TextAnchor::End => r#" text-anchor="end""#,
                    });
                    write_paint_attr(&mut out, "fill", &t.fill);
                    out.push('>');
                    out.push_str(&escape_xml(&t.text));
                    out.push_str("</text>\n");
                }
            }
        }

        out.push_str("</svg>\n");
        out
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    match brush {
        Brush::Solid(color) => {
            let c = color.to_rgba8();
            if c.a == 0 {
                out.push_str(&format!(r#" {name}="none""#));
            } else {
                out.push_str(&format!(r#" {name}="rgb({},{},{})""#, c.r, c.g, c.b));
                if c.a != 255 {
                    out.push_str(&format!(
                        r#" {name}-opacity="{:.3}""#,
                        f64::from(c.a) / 255.0
                    ));
                }
            }
        }
        // Gradients/images are not used by the dashboards.
        _ => out.push_str(&format!(r#" {name}="none""#)),
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
