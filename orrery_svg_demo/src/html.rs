// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tiny HTML report assembly for the demo.

pub(crate) struct HtmlSection {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) svgs: Vec<String>,
}

pub(crate) fn render_report(title: &str, sections: &[HtmlSection]) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    out.push_str(&format!("<meta charset=\"utf-8\"><title>{title}</title>\n"));
    out.push_str(
        "<style>\n\
         body { font-family: sans-serif; margin: 2em; }\n\
         section { margin-bottom: 3em; }\n\
         .charts { display: flex; flex-wrap: wrap; gap: 1em; }\n\
         .charts svg { border: 1px solid #ddd; }\n\
         p.desc { color: #555; }\n\
         </style>\n",
    );
    out.push_str("</head>\n<body>\n");
    out.push_str(&format!("<h1>{title}</h1>\n"));

    for section in sections {
        out.push_str("<section>\n");
        out.push_str(&format!("<h2>{}</h2>\n", section.title));
        out.push_str(&format!("<p class=\"desc\">{}</p>\n", section.description));
        out.push_str("<div class=\"charts\">\n");
        for svg in &section.svgs {
            out.push_str(svg);
        }
        out.push_str("</div>\n</section>\n");
    }

    out.push_str("</body>\n</html>\n");
    out
}
