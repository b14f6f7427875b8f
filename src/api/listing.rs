use std::fmt::Write;
use crate::core::types::DirectoryView;

const STYLE: &str = "\
        body { font-family: Arial, sans-serif; margin: 20px; }
        h1 { color: #333; }
        ul { list-style: none; padding: 0; }
        li { padding: 5px 0; }
        a { text-decoration: none; color: #0066cc; }
        a:hover { text-decoration: underline; }
        .dir { font-weight: bold; }
";

/// Render a browsable HTML page for one directory level.
///
/// Directories and files are interleaved in name order, directories
/// suffixed with `/`. Names are escaped, links are relative to `url_path`.
pub fn render_directory_listing(url_path: &str, view: &DirectoryView) -> String {
    let title = escape_html(url_path);
    let mut html = String::with_capacity(512 + 64 * (view.directories.len() + view.files.len()));

    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html>\n<head>\n    <meta charset=\"utf-8\">\n    <title>Directory: {title}</title>\n    <style>\n{STYLE}    </style>\n</head>\n<body>\n    <h1>Directory: {title}</h1>\n    <ul>\n        <li><a href=\"../\">../</a></li>\n"
    );

    let mut items: Vec<(&str, bool)> = view
        .directories
        .iter()
        .map(|d| (d.as_str(), true))
        .chain(view.files.iter().map(|f| (f.as_str(), false)))
        .collect();
    items.sort_unstable();

    for (item, is_dir) in items {
        let name = escape_html(item);
        if is_dir {
            let _ = writeln!(html, "        <li class=\"dir\"><a href=\"{name}/\">{name}/</a></li>");
        } else {
            let _ = writeln!(html, "        <li class=\"\"><a href=\"{name}\">{name}</a></li>");
        }
    }

    html.push_str("    </ul>\n</body>\n</html>");
    html
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_entries_in_name_order() {
        let view = DirectoryView {
            directories: vec!["City".to_string(), "zoo".to_string()],
            files: vec!["banner.png".to_string(), "cover.webp?v=1".to_string()],
        };
        let html = render_directory_listing("/images/home/", &view);

        assert!(html.contains("<title>Directory: /images/home/</title>"));
        assert!(html.contains("<li class=\"dir\"><a href=\"City/\">City/</a></li>"));
        assert!(html.contains("<a href=\"cover.webp?v=1\">cover.webp?v=1</a>"));

        let positions: Vec<usize> = ["City/", "banner.png", "cover.webp?v=1", "zoo/"]
            .iter()
            .map(|name| html.find(&format!(">{}</a>", name)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{:?}", positions);
        assert!(html.ends_with("</html>"));
    }

    #[test]
    fn names_are_escaped() {
        let view = DirectoryView {
            directories: vec![],
            files: vec!["<b>&\"x\".png".to_string()],
        };
        let html = render_directory_listing("/a<b>/", &view);

        assert!(html.contains("Directory: /a&lt;b&gt;/"));
        assert!(html.contains("&lt;b&gt;&amp;&quot;x&quot;.png"));
        assert!(!html.contains("<b>"));
    }
}
