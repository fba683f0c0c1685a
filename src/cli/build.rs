//! Build command implementation.
//!
//! Reads a sprite spec, builds the composite(s) and writes the stylesheet.

use std::path::Path;

use crate::builder::{BuildReport, SpriteBuilder};
use crate::clock::SystemClock;
use crate::config::BuildSettings;
use crate::error::Result;
use crate::output::{display_path, plural, Printer};
use crate::render::RasterBackend;

pub fn run(spec: &Path, printer: &Printer) -> Result<()> {
    let settings = BuildSettings::from_spec_file(spec)?;
    printer.status("Collecting", &display_path(&settings.source_dir));

    let builder = SpriteBuilder::new(RasterBackend::new(), SystemClock);
    let report = builder.build(&settings)?;

    print_report(&report, printer);
    Ok(())
}

fn print_report(report: &BuildReport, printer: &Printer) {
    for diagnostic in report.diagnostics.iter() {
        printer.diagnostic(diagnostic);
    }

    printer.status(
        "Compositing",
        &format!(
            "{} -> {} ({}x{})",
            plural(report.icon_count, "icon", "icons"),
            display_path(&report.sprite_path),
            report.sprite_size.width,
            report.sprite_size.height
        ),
    );
    if let (Some(path), Some(size)) = (&report.retina_path, report.retina_size) {
        printer.status(
            "Compositing",
            &format!(
                "{} -> {} ({}x{})",
                plural(report.retina_count, "retina icon", "retina icons"),
                display_path(path),
                size.width,
                size.height
            ),
        );
    }
    printer.status("Writing", &display_path(&report.less_path));

    let warnings = if report.diagnostics.is_empty() {
        String::new()
    } else {
        format!(
            " {}",
            printer.dim(&format!(
                "({})",
                plural(report.diagnostics.len(), "warning", "warnings")
            ))
        )
    };
    printer.status("Finished", &format!("sprite{}", warnings));
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_run_builds_sprite_next_to_spec() {
        let dir = tempdir().unwrap();
        let icons = dir.path().join("icons");
        fs::create_dir(&icons).unwrap();
        RgbaImage::from_pixel(3, 3, Rgba([1, 2, 3, 255]))
            .save(icons.join("dot.png"))
            .unwrap();
        let spec = dir.path().join("toolbar.json");
        fs::write(&spec, r#"{"dir": "icons", "border": 0}"#).unwrap();

        run(&spec, &Printer::new()).unwrap();

        let sprite = image::open(dir.path().join("toolbar.png")).unwrap();
        assert_eq!((sprite.width(), sprite.height()), (3, 3));
        let css = fs::read_to_string(dir.path().join("toolbar.less")).unwrap();
        assert!(css.starts_with(".dot(@scale: 1) {"));
        assert!(css.contains("url(\"../toolbar.png\")"));
    }

    #[test]
    fn test_run_missing_spec() {
        let err = run(Path::new("/nonexistent/spec.json"), &Printer::new()).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }
}
