use std::fmt::Write;

/// A data cell; `footnote` wraps a `<sup><a href=..>` marker after the text.
pub struct Cell<'a> {
    pub text: &'a str,
    pub footnote: Option<&'a str>,
}

pub fn plain(text: &str) -> Cell<'_> {
    Cell {
        text,
        footnote: None,
    }
}

pub fn cited<'a>(text: &'a str, href: &'a str) -> Cell<'a> {
    Cell {
        text,
        footnote: Some(href),
    }
}

pub fn render_page(table_attrs: &str, headers: &[&str], rows: &[Vec<Cell<'_>>]) -> String {
    let mut html = String::from("<!DOCTYPE html><html><head><title>fixture</title></head><body>");
    html.push_str("<p>Intro paragraph<sup><a href=\"#not-in-table\">[0]</a></sup></p>");
    let _ = write!(html, "<table {table_attrs}><tbody><tr>");
    for header in headers {
        let _ = write!(html, "<th>\n{header}\n</th>");
    }
    html.push_str("</tr>");

    for row in rows {
        html.push_str("<tr>");
        for cell in row {
            html.push_str("<td>\n");
            html.push_str(cell.text);
            if let Some(href) = cell.footnote {
                let _ = write!(
                    html,
                    "<sup class=\"reference\"><a href=\"{href}\">[n]</a></sup>"
                );
            }
            html.push_str("\n</td>");
        }
        html.push_str("</tr>");
    }

    html.push_str("</tbody></table></body></html>");
    html
}
