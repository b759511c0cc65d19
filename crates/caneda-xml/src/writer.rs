use crate::version::FORMAT_VERSION;
use crate::Result;
use caneda_sch::{Document, Painting, Point, Rect, Size, Transform, ViewState};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

type W = Writer<Vec<u8>>;

pub(crate) fn write_document(document: &Document) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::DocType(BytesText::new("caneda")))?;

    let mut root = BytesStart::new("caneda");
    root.push_attribute(("version", FORMAT_VERSION));
    writer.write_event(Event::Start(root))?;

    write_view(&mut writer, &document.view)?;
    write_components(&mut writer, document)?;
    write_wires(&mut writer, document)?;
    write_paintings(&mut writer, document)?;

    // The embedded symbol travels with the schematic even when empty.
    write_text_element(&mut writer, "symbol", &document.symbol)?;

    writer.write_event(Event::End(BytesEnd::new("caneda")))?;

    let bytes = writer.into_inner();
    Ok(String::from_utf8(bytes).expect("XML writer emits UTF-8"))
}

fn write_view(writer: &mut W, view: &ViewState) -> Result<()> {
    write_start(writer, "view", &[])?;

    let rect = view.scene_rect;
    write_empty(
        writer,
        "scenerect",
        &[
            ("x", &rect.x.to_string()),
            ("y", &rect.y.to_string()),
            ("width", &rect.width.to_string()),
            ("height", &rect.height.to_string()),
        ],
    )?;

    let t = view.view_transform;
    write_empty(
        writer,
        "viewtransform",
        &[
            ("m11", &t.m11.to_string()),
            ("m12", &t.m12.to_string()),
            ("m21", &t.m21.to_string()),
            ("m22", &t.m22.to_string()),
            ("dx", &t.dx.to_string()),
            ("dy", &t.dy.to_string()),
        ],
    )?;

    write_start(writer, "scrollbarvalues", &[])?;
    write_text_element(writer, "horizontal", &view.horizontal_scroll.to_string())?;
    write_text_element(writer, "vertical", &view.vertical_scroll.to_string())?;
    write_end(writer, "scrollbarvalues")?;

    write_empty(
        writer,
        "grid",
        &[
            ("visible", bool_attr(view.grid_visible)),
            ("width", &view.grid_width.to_string()),
            ("height", &view.grid_height.to_string()),
        ],
    )?;

    write_start(writer, "data", &[])?;
    write_text_element(writer, "dataset", &view.dataset)?;
    write_text_element(writer, "datadisplay", &view.data_display)?;
    write_text_element(
        writer,
        "opensdatadisplay",
        bool_attr(view.opens_data_display),
    )?;
    write_end(writer, "data")?;

    write_start(writer, "frame", &[("visible", bool_attr(view.frame_visible))])?;
    write_start(writer, "frametexts", &[])?;
    for text in &view.frame_texts {
        write_text_element(writer, "text", text)?;
    }
    write_end(writer, "frametexts")?;
    write_end(writer, "frame")?;

    write_end(writer, "view")
}

fn write_components(writer: &mut W, document: &Document) -> Result<()> {
    if document.components.is_empty() {
        return Ok(());
    }

    write_start(writer, "components", &[])?;
    for component in &document.components {
        write_start(
            writer,
            "component",
            &[
                ("name", &component.name),
                ("library", &component.library),
                ("pos", &point_attr(component.position)),
                ("transform", &transform_attr(component.transform)),
            ],
        )?;

        write_start(writer, "properties", &[])?;
        for (name, property) in component.properties.iter() {
            write_empty(
                writer,
                "property",
                &[
                    ("name", name),
                    ("value", &property.value),
                    ("label", &property.description),
                    ("visible", bool_attr(property.visible)),
                ],
            )?;
        }
        write_end(writer, "properties")?;

        write_end(writer, "component")?;
    }
    write_end(writer, "components")
}

fn write_wires(writer: &mut W, document: &Document) -> Result<()> {
    if document.wires.is_empty() {
        return Ok(());
    }

    write_start(writer, "wires", &[])?;
    for group in document.equipotentials() {
        write_start(writer, "equipotential", &[("id", &group.id.to_string())])?;
        for (offset, &index) in group.wires.iter().enumerate() {
            let wire = &document.wires[index];
            write_empty(
                writer,
                "wire",
                &[
                    ("id", &(group.first_wire_id + offset).to_string()),
                    ("port1", &point_attr(wire.port1)),
                    ("port2", &point_attr(wire.port2)),
                ],
            )?;
        }
        write_end(writer, "equipotential")?;
    }
    write_end(writer, "wires")
}

fn write_paintings(writer: &mut W, document: &Document) -> Result<()> {
    if document.paintings.is_empty() {
        return Ok(());
    }

    write_start(writer, "paintings", &[])?;
    for painting in &document.paintings {
        let type_name = painting.type_name();
        match painting {
            Painting::Arrow(arrow) => write_empty(
                writer,
                "painting",
                &[
                    ("name", type_name),
                    ("line", &line_attr(arrow.p1, arrow.p2)),
                    ("headsize", &size_attr(arrow.head_size)),
                ],
            )?,
            Painting::Ellipse(ellipse) => write_empty(
                writer,
                "painting",
                &[
                    ("name", type_name),
                    ("rect", &rect_attr(ellipse.rect)),
                    ("filled", bool_attr(ellipse.filled)),
                ],
            )?,
            Painting::EllipseArc(arc) => write_empty(
                writer,
                "painting",
                &[
                    ("name", type_name),
                    ("rect", &rect_attr(arc.rect)),
                    ("startangle", &arc.start_angle.to_string()),
                    ("spanangle", &arc.span_angle.to_string()),
                ],
            )?,
            Painting::Line(line) => write_empty(
                writer,
                "painting",
                &[("name", type_name), ("line", &line_attr(line.p1, line.p2))],
            )?,
            Painting::Rectangle(rectangle) => write_empty(
                writer,
                "painting",
                &[
                    ("name", type_name),
                    ("rect", &rect_attr(rectangle.rect)),
                    ("filled", bool_attr(rectangle.filled)),
                ],
            )?,
            Painting::Text(text) => {
                write_start(
                    writer,
                    "painting",
                    &[
                        ("name", type_name),
                        ("pos", &point_attr(text.pos)),
                        ("angle", &text.angle.to_string()),
                    ],
                )?;
                writer.write_event(Event::Text(BytesText::new(&text.text)))?;
                write_end(writer, "painting")?;
            }
        }
    }
    write_end(writer, "paintings")
}

fn write_start(writer: &mut W, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
    let mut element = BytesStart::new(name);
    for &(key, value) in attrs {
        element.push_attribute((key, value));
    }
    writer.write_event(Event::Start(element))?;
    Ok(())
}

fn write_empty(writer: &mut W, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
    let mut element = BytesStart::new(name);
    for &(key, value) in attrs {
        element.push_attribute((key, value));
    }
    writer.write_event(Event::Empty(element))?;
    Ok(())
}

fn write_end(writer: &mut W, name: &str) -> Result<()> {
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn write_text_element(writer: &mut W, name: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn bool_attr(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

fn point_attr(p: Point) -> String {
    format!("{},{}", p.x, p.y)
}

fn line_attr(p1: Point, p2: Point) -> String {
    format!("{},{},{},{}", p1.x, p1.y, p2.x, p2.y)
}

fn rect_attr(r: Rect) -> String {
    format!("{},{},{},{}", r.x, r.y, r.width, r.height)
}

fn size_attr(s: Size) -> String {
    format!("{},{}", s.width, s.height)
}

fn transform_attr(t: Transform) -> String {
    format!("{},{},{},{},{},{}", t.m11, t.m12, t.m21, t.m22, t.dx, t.dy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use caneda_sch::Wire;

    #[test]
    fn empty_collections_are_omitted() {
        let xml = write_document(&Document::new()).unwrap();
        assert!(xml.contains("<view>"));
        assert!(!xml.contains("<components>"));
        assert!(!xml.contains("<wires>"));
        assert!(!xml.contains("<paintings>"));
        assert!(xml.contains("<symbol>"));
    }

    #[test]
    fn root_carries_version_and_doctype() {
        let xml = write_document(&Document::new()).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<!DOCTYPE caneda>"));
        assert!(xml.contains(&format!("<caneda version=\"{FORMAT_VERSION}\">")));
    }

    #[test]
    fn connected_wires_share_an_equipotential_element() {
        let mut document = Document::new();
        document.add_wire(Wire::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0)));
        document.add_wire(Wire::new(Point::new(10.0, 0.0), Point::new(20.0, 0.0)));
        document.add_wire(Wire::new(Point::new(50.0, 0.0), Point::new(60.0, 0.0)));

        let xml = write_document(&document).unwrap();
        assert_eq!(xml.matches("<equipotential").count(), 2);
        assert!(xml.contains("<equipotential id=\"0\">"));
        assert!(xml.contains("<equipotential id=\"1\">"));
        // Wire ids keep running across groups.
        assert!(xml.contains("wire id=\"0\""));
        assert!(xml.contains("wire id=\"1\""));
        assert!(xml.contains("wire id=\"2\""));
    }
}
