use approx::assert_relative_eq;
use nesting_svg::{
    ConvertError, RenderOptions, Renderer, parse_job, render_empty_canvas, render_part,
};
use quick_xml::Reader;
use quick_xml::events::Event;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// An element of a generated document with its attributes
#[derive(Debug)]
struct SvgElement {
    name: String,
    attrs: HashMap<String, String>,
}

fn artifacts_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/artifacts")
}

fn read_artifact(file: &str) -> String {
    fs::read_to_string(artifacts_dir().join(file))
        .unwrap_or_else(|_| panic!("Failed to read {}", file))
}

fn convert_artifact(name: &str) -> Result<String, ConvertError> {
    let job = parse_job(&read_artifact(&format!("{}.json", name)))
        .unwrap_or_else(|_| panic!("Failed to parse {}.json", name));
    render_part(&job.part, job.invalid_geometry.as_deref(), 1.0)
}

/// Parse a generated document, failing on malformed XML or unbalanced tags
fn parse_svg(svg: &str) -> Vec<SvgElement> {
    let mut reader = Reader::from_str(svg);
    let mut elements = Vec::new();
    let mut depth = 0usize;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                let name_bytes = e.name();
                let name = std::str::from_utf8(name_bytes.as_ref()).unwrap_or("");
                let mut attrs = HashMap::new();
                for attr in e.attributes() {
                    let attr = attr.expect("Malformed attribute");
                    let key = std::str::from_utf8(attr.key.as_ref()).unwrap_or("");
                    let value = std::str::from_utf8(&attr.value).unwrap_or("");
                    attrs.insert(key.to_string(), value.to_string());
                }
                elements.push(SvgElement {
                    name: name.to_string(),
                    attrs,
                });
                if name == "svg" {
                    depth += 1;
                }
            }
            Ok(Event::End(ref e)) => {
                assert_eq!(e.name().as_ref(), b"svg");
                depth -= 1;
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => panic!("XML parsing error: {:?}", e),
        }
    }

    assert_eq!(depth, 0, "Unbalanced document");
    elements
}

fn run_conversion_test(name: &str) {
    let expected = read_artifact(&format!("{}.svg", name));
    let generated =
        convert_artifact(name).unwrap_or_else(|e| panic!("Failed to convert {}: {}", name, e));

    // Save generated SVG for debugging
    let temp_dir = artifacts_dir().join("temp");
    let _ = fs::create_dir_all(&temp_dir);
    let _ = fs::write(temp_dir.join(format!("{}.svg", name)), &generated);

    parse_svg(&generated);
    assert_eq!(generated, expected.trim(), "SVG mismatch for {}", name);
}

/// Coordinates following each `L` in a path
fn line_targets(d: &str) -> Vec<(f64, f64)> {
    let tokens: Vec<&str> = d.split_whitespace().collect();
    tokens
        .windows(3)
        .filter(|w| w[0] == "L")
        .map(|w| (w[1].parse().unwrap(), w[2].parse().unwrap()))
        .collect()
}

#[test]
fn test_square() {
    run_conversion_test("square");
}

#[test]
fn test_rectangle() {
    run_conversion_test("rectangle");
}

#[test]
fn test_slot() {
    run_conversion_test("slot");
}

#[test]
fn test_circles() {
    run_conversion_test("circles");
}

#[test]
fn test_invalid_polyline() {
    run_conversion_test("invalid_polyline");
}

#[test]
fn test_unknown_type_fails() {
    let err = convert_artifact("unknown_type").unwrap_err();
    assert!(matches!(err, ConvertError::UnknownGeometryType(ref t) if t == "Bogus"));
}

#[test]
fn test_composite() {
    let svg = convert_artifact("composite").unwrap();
    let elements = parse_svg(&svg);

    let root = &elements[0];
    assert_eq!(root.name, "svg");
    assert_eq!(root.attrs["viewBox"], "-3 -3 17 17");
    assert_eq!(root.attrs["transform"], "scale(1 -1)");

    assert_eq!(elements.len(), 3);
    assert_eq!(elements[2].name, "circle");
    assert_eq!(elements[2].attrs["r"], "1.5");

    let path = &elements[1];
    assert_eq!(path.name, "path");
    let d = &path.attrs["d"];
    assert!(d.starts_with("M 0 0 L 10 0 A 5,5 0 0,1 "), "unexpected path start: {}", d);
    assert!(d.ends_with(" L 0 0 Z"));
    assert_eq!(d.matches('M').count(), 1);
    assert_eq!(d.matches('Z').count(), 1);

    // Polyline edge, 19 sampled spline segments, closing edge
    let targets = line_targets(d);
    assert_eq!(targets.len(), 21);
    let (x, y) = targets[19];
    assert_relative_eq!(x, 0.0, epsilon = 1e-9);
    assert_relative_eq!(y, 10.0, epsilon = 1e-9);
}

#[test]
fn test_composite_without_evaluator_fails() {
    let job = parse_job(&read_artifact("composite.json")).unwrap();
    let err = Renderer::new(RenderOptions::default())
        .render_part(&job.part, None)
        .unwrap_err();
    assert!(matches!(err, ConvertError::MissingCapability(_)));
}

#[test]
fn test_invalid_geometry_drawn_after_contours() {
    let job = parse_job(&read_artifact("square.json")).unwrap();
    let overlay = parse_job(&read_artifact("invalid_polyline.json"))
        .unwrap()
        .invalid_geometry
        .unwrap();

    let svg = render_part(&job.part, Some(&overlay), 0.5).unwrap();
    let elements = parse_svg(&svg);

    // Box still decides the canvas
    assert_eq!(elements[0].attrs["viewBox"], "-1 -1 13 8");
    assert_eq!(elements[0].attrs["style"], "stroke:black;fill:none;stroke-width:0.5");
    assert!(!elements[1].attrs.contains_key("stroke"));
    assert_eq!(elements[2].attrs["stroke"], "red");
    assert_eq!(elements[2].attrs["d"], "M 0 0 L 100 0");
}

#[test]
fn test_empty_canvas_is_well_formed() {
    let elements = parse_svg(&render_empty_canvas(640, 480));
    assert_eq!(elements.len(), 1);
    assert_eq!(elements[0].attrs["width"], "640");
    assert_eq!(elements[0].attrs["height"], "480");
    assert_eq!(elements[0].attrs["viewBox"], "0 0 640 480");
}
