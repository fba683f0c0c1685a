//! LESS stylesheet generation.
//!
//! Each base icon becomes one parametrized mixin. Every length is written as
//! `(<n>px * @scale)` so callers can render an icon at any scale with
//! `.icon-name(2);`.

use std::fs;
use std::path::Path;

use crate::error::{Result, SpriteError};
use crate::layout::{LayoutEntry, Size};

/// Media features matching high pixel density screens, for both the ratio 2
/// and the ratio 1.5 conventions.
const RETINA_QUERIES: &[&str] = &[
    "(-webkit-min-device-pixel-ratio: 2)",
    "(min--moz-device-pixel-ratio: 2)",
    "(-o-min-device-pixel-ratio: 2/1)",
    "(min-device-pixel-ratio: 2)",
    "(min-resolution: 2dppx)",
    "(-webkit-min-device-pixel-ratio: 1.5)",
    "(min--moz-device-pixel-ratio: 1.5)",
    "(-o-min-device-pixel-ratio: 3/2)",
    "(min-device-pixel-ratio: 1.5)",
    "(min-resolution: 1.5dppx)",
];

/// A composite image as the stylesheet refers to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetImage {
    /// URL used in `background-image`, without any cache token.
    pub url: String,
    /// Pixel size of the written composite.
    pub size: Size,
}

/// Rendering options.
#[derive(Debug, Clone, Default)]
pub struct StyleOptions {
    /// Prepended to every mixin name.
    pub prefix: String,
    /// Appended to image URLs as `?v=<token>` when set.
    pub cache_token: Option<String>,
}

/// Mixin name for an icon.
pub fn class_name(prefix: &str, icon_name: &str) -> String {
    format!("{}{}", prefix, icon_name.to_lowercase())
}

/// Render one rule block per entry, in layout order.
///
/// `retina` is the retina composite; the media query block is only emitted
/// for entries that carry a validated retina icon and when it is present.
pub fn render(
    entries: &[LayoutEntry],
    sprite: &SheetImage,
    retina: Option<&SheetImage>,
    options: &StyleOptions,
) -> String {
    let mut content = String::new();

    for entry in entries {
        let icon = &entry.icon;
        content.push_str(&format!(
            ".{}(@scale: 1) {{\n",
            class_name(&options.prefix, &icon.name)
        ));
        content.push_str("\tdisplay: inline-block;\n");
        content.push_str(&format!("\twidth: {};\n", scaled(i64::from(icon.width))));
        content.push_str(&format!("\theight: {};\n", scaled(i64::from(icon.height))));
        push_background(
            &mut content,
            "\t",
            &image_url(&sprite.url, options),
            (entry.offset_x, entry.offset_y),
            sprite.size,
        );

        if let (Some(_), Some(retina)) = (&entry.retina, retina) {
            content.push_str(&format!("\t@media {} {{\n", RETINA_QUERIES.join(",\n\t\t")));
            push_background(
                &mut content,
                "\t\t",
                &image_url(&retina.url, options),
                (entry.retina_offset_x, entry.retina_offset_y),
                retina.size.half_ceil(),
            );
            content.push_str("\t}\n");
        }

        content.push_str("}\n");
    }

    content
}

/// Write rendered stylesheet text to disk.
pub fn write_stylesheet(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| SpriteError::Write {
        path: path.to_path_buf(),
        message: format!("Failed to write stylesheet: {}", e),
    })
}

fn push_background(content: &mut String, indent: &str, url: &str, offset: (i64, i64), size: Size) {
    content.push_str(&format!("{}background-image: url(\"{}\");\n", indent, url));
    content.push_str(&format!(
        "{}background-position: {} {};\n",
        indent,
        scaled(offset.0),
        scaled(offset.1)
    ));
    content.push_str(&format!(
        "{}background-size: {} {};\n",
        indent,
        scaled(i64::from(size.width)),
        scaled(i64::from(size.height))
    ));
}

fn image_url(url: &str, options: &StyleOptions) -> String {
    match &options.cache_token {
        Some(token) => format!("{}?v={}", url, token),
        None => url.to_string(),
    }
}

fn scaled(px: i64) -> String {
    format!("({}px * @scale)", px)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{compute_layout, Direction, IconSpec};
    use pretty_assertions::assert_eq;

    fn icon(name: &str, w: u32, h: u32) -> IconSpec {
        IconSpec::new(name, Size::new(w, h), format!("{}.png", name))
    }

    fn sheet(url: &str, w: u32, h: u32) -> SheetImage {
        SheetImage {
            url: url.to_string(),
            size: Size::new(w, h),
        }
    }

    #[test]
    fn test_render_single_icon() {
        let (layout, _) = compute_layout(&[icon("Arrow", 10, 12)], &[], Direction::Down, 2);
        let options = StyleOptions {
            prefix: "icon-".to_string(),
            cache_token: None,
        };

        let css = render(&layout.entries, &sheet("img/sprite.png", 14, 16), None, &options);

        insta::assert_snapshot!(css, @r#"
.icon-arrow(@scale: 1) {
	display: inline-block;
	width: (10px * @scale);
	height: (12px * @scale);
	background-image: url("img/sprite.png");
	background-position: (-2px * @scale) (-2px * @scale);
	background-size: (14px * @scale) (16px * @scale);
}
"#);
    }

    #[test]
    fn test_render_keeps_layout_order() {
        let icons = vec![icon("b", 10, 10), icon("a", 20, 20)];
        let (layout, _) = compute_layout(&icons, &[], Direction::Down, 0);

        let css = render(
            &layout.entries,
            &sheet("sprite.png", 20, 30),
            None,
            &StyleOptions::default(),
        );

        let b = css.find(".b(@scale: 1)").unwrap();
        let a = css.find(".a(@scale: 1)").unwrap();
        assert!(b < a);
        assert!(css.contains("background-position: (0px * @scale) (-10px * @scale);"));
        assert!(!css.contains("@media"));
    }

    #[test]
    fn test_render_retina_block() {
        let icons = vec![icon("icon", 10, 10)];
        let retinas = vec![IconSpec::new("icon", Size::new(20, 20), "icon@2x.png")];
        let (layout, _) = compute_layout(&icons, &retinas, Direction::Down, 0);

        let css = render(
            &layout.entries,
            &sheet("sprite.png", 10, 10),
            Some(&sheet("sprite@2x.png", 20, 20)),
            &StyleOptions::default(),
        );

        let media = format!("\t@media {} {{", RETINA_QUERIES.join(",\n\t\t"));
        let expected = [
            ".icon(@scale: 1) {",
            "\tdisplay: inline-block;",
            "\twidth: (10px * @scale);",
            "\theight: (10px * @scale);",
            "\tbackground-image: url(\"sprite.png\");",
            "\tbackground-position: (0px * @scale) (0px * @scale);",
            "\tbackground-size: (10px * @scale) (10px * @scale);",
            media.as_str(),
            "\t\tbackground-image: url(\"sprite@2x.png\");",
            "\t\tbackground-position: (0px * @scale) (0px * @scale);",
            "\t\tbackground-size: (10px * @scale) (10px * @scale);",
            "\t}",
            "}",
            "",
        ]
        .join("\n");

        assert_eq!(css, expected);
    }

    #[test]
    fn test_retina_size_rounds_up() {
        let icons = vec![icon("a", 4, 4)];
        let retinas = vec![IconSpec::new("a", Size::new(8, 8), "a@2x.png")];
        let (layout, _) = compute_layout(&icons, &retinas, Direction::Right, 0);

        let css = render(
            &layout.entries,
            &sheet("s.png", 4, 4),
            Some(&sheet("s@2x.png", 9, 13)),
            &StyleOptions::default(),
        );

        assert!(css.contains("\t\tbackground-size: (5px * @scale) (7px * @scale);"));
    }

    #[test]
    fn test_media_query_covers_both_ratios() {
        let joined = RETINA_QUERIES.join(" ");
        assert!(joined.contains("-webkit-min-device-pixel-ratio: 2"));
        assert!(joined.contains("min-resolution: 2dppx"));
        assert!(joined.contains("-webkit-min-device-pixel-ratio: 1.5"));
        assert!(joined.contains("min-resolution: 1.5dppx"));
    }

    #[test]
    fn test_cache_token() {
        let icons = vec![icon("i", 1, 1)];
        let retinas = vec![IconSpec::new("i", Size::new(2, 2), "i@2x.png")];
        let (layout, _) = compute_layout(&icons, &retinas, Direction::Down, 0);
        let options = StyleOptions {
            prefix: String::new(),
            cache_token: Some("1700000000000".to_string()),
        };

        let css = render(
            &layout.entries,
            &sheet("/img/s.png", 1, 1),
            Some(&sheet("/img/s@2x.png", 2, 2)),
            &options,
        );

        assert!(css.contains("url(\"/img/s.png?v=1700000000000\")"));
        assert!(css.contains("url(\"/img/s@2x.png?v=1700000000000\")"));
    }

    #[test]
    fn test_class_name() {
        assert_eq!(class_name("ico-", "Save-AS"), "ico-save-as");
        assert_eq!(class_name("", "plain"), "plain");
    }

    #[test]
    fn test_write_stylesheet() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sprite.less");
        write_stylesheet(&path, ".a() {}\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), ".a() {}\n");

        let err = write_stylesheet(&dir.path().join("missing/sprite.less"), "").unwrap_err();
        assert!(matches!(err, SpriteError::Write { .. }));
    }
}
