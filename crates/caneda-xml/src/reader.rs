use crate::{Result, XmlFormatError};
use caneda_sch::{
    ComponentRegistry, Document, Painting, Point, Property, Rect, Size, Transform, ViewState,
    Wire,
};
use caneda_sch::painting::{Arrow, Ellipse, EllipseArc, GraphicText, Line, Rectangle};
use roxmltree::Node;

/// Recursive-descent decoder over the parsed XML tree.
///
/// All decoding goes into a scratch [`Document`]; the caller only ever sees
/// it after the whole text parsed cleanly. Unknown structure inside the
/// four top-level blocks is fatal, unknown entity types (a component
/// missing from the registry, an unrecognized painting token) are skipped
/// with a warning.
pub(crate) struct Parser<'r> {
    registry: &'r ComponentRegistry,
}

impl<'r> Parser<'r> {
    pub fn new(registry: &'r ComponentRegistry) -> Self {
        Self { registry }
    }

    pub fn parse_document(
        &self,
        tree: &roxmltree::Document,
        version_ok: impl Fn(&str) -> bool,
    ) -> Result<Document> {
        let root = tree.root_element();
        if root.tag_name().name() != "caneda" {
            return Err(XmlFormatError::MalformedStructure(format!(
                "not a caneda schematic, root element is '{}'",
                root.tag_name().name()
            )));
        }

        // The version gate comes before any entity is decoded.
        let version = root
            .attribute("version")
            .ok_or(XmlFormatError::MissingAttribute {
                element: "caneda",
                attr: "version",
            })?;
        if !version_ok(version) {
            return Err(XmlFormatError::VersionMismatch {
                found: version.to_string(),
            });
        }

        let mut document = Document::new();
        for child in elements(root) {
            match child.tag_name().name() {
                "view" => self.parse_view(child, &mut document)?,
                "components" => self.parse_components(child, &mut document)?,
                "wires" => self.parse_wires(child, &mut document)?,
                "paintings" => self.parse_paintings(child, &mut document)?,
                "symbol" => document.symbol = child.text().unwrap_or_default().to_string(),
                other => log::warn!("skipping unknown element '{other}' in schematic root"),
            }
        }

        Ok(document)
    }

    fn parse_view(&self, node: Node, document: &mut Document) -> Result<()> {
        expect_element(node, "view")?;

        let mut view = ViewState::default();
        for child in elements(node) {
            match child.tag_name().name() {
                "scenerect" => {
                    let rect = Rect::new(
                        f64_attr(child, "x", "scenerect")?,
                        f64_attr(child, "y", "scenerect")?,
                        f64_attr(child, "width", "scenerect")?,
                        f64_attr(child, "height", "scenerect")?,
                    );
                    if !rect.is_valid() {
                        return Err(XmlFormatError::InvalidAttribute(
                            "scene rectangle has no extent".into(),
                        ));
                    }
                    view.scene_rect = rect;
                }
                "viewtransform" => {
                    view.view_transform = Transform::new(
                        f64_attr(child, "m11", "viewtransform")?,
                        f64_attr(child, "m12", "viewtransform")?,
                        f64_attr(child, "m21", "viewtransform")?,
                        f64_attr(child, "m22", "viewtransform")?,
                        f64_attr(child, "dx", "viewtransform")?,
                        f64_attr(child, "dy", "viewtransform")?,
                    );
                }
                "scrollbarvalues" => {
                    view.horizontal_scroll = child_i32(child, "horizontal")?;
                    view.vertical_scroll = child_i32(child, "vertical")?;
                }
                "grid" => {
                    view.grid_visible = bool_attr(child, "visible", "grid")?;
                    view.grid_width = u32_attr(child, "width", "grid")?;
                    view.grid_height = u32_attr(child, "height", "grid")?;
                }
                "data" => {
                    view.dataset = required_child_text(child, "dataset")?;
                    view.data_display = required_child_text(child, "datadisplay")?;
                    view.opens_data_display = required_child_text(child, "opensdatadisplay")?
                        .eq_ignore_ascii_case("true");
                }
                "frame" => {
                    view.frame_visible = bool_attr(child, "visible", "frame")?;
                    for sub in elements(child) {
                        if sub.tag_name().name() != "frametexts" {
                            return Err(unexpected(sub, "frame"));
                        }
                        for text in elements(sub) {
                            if text.tag_name().name() != "text" {
                                return Err(unexpected(text, "frametexts"));
                            }
                            view.frame_texts
                                .push(text.text().unwrap_or_default().to_string());
                        }
                    }
                }
                _ => return Err(unexpected(child, "view")),
            }
        }

        document.view = view;
        Ok(())
    }

    fn parse_components(&self, node: Node, document: &mut Document) -> Result<()> {
        expect_element(node, "components")?;
        for child in elements(node) {
            if child.tag_name().name() != "component" {
                return Err(unexpected(child, "components"));
            }
            self.parse_component(child, document)?;
        }
        Ok(())
    }

    fn parse_component(&self, node: Node, document: &mut Document) -> Result<()> {
        let name = required_attr(node, "name", "component")?;
        let library = required_attr(node, "library", "component")?;

        // A miss here is the forward-compatibility case: a document from an
        // installation with more libraries than ours. Drop the component,
        // keep the rest.
        let Some(data) = self.registry.lookup(name, library) else {
            log::warn!("unknown component '{name}' from library '{library}', skipping");
            return Ok(());
        };

        let mut component = data.instantiate();
        component.position = point_attr(node, "pos", "component")?;
        component.transform = transform_attr(node, "transform", "component")?;

        for child in elements(node) {
            match child.tag_name().name() {
                "properties" => {
                    for entry in elements(child) {
                        if entry.tag_name().name() != "property" {
                            log::warn!(
                                "skipping unknown element '{}' in properties",
                                entry.tag_name().name()
                            );
                            continue;
                        }
                        let prop_name = required_attr(entry, "name", "property")?;
                        component.properties.insert(
                            prop_name,
                            Property::new(
                                required_attr(entry, "value", "property")?,
                                required_attr(entry, "label", "property")?,
                                bool_attr(entry, "visible", "property")?,
                            ),
                        );
                    }
                }
                other => log::warn!("skipping unknown element '{other}' in component"),
            }
        }

        document.add_component(component);
        Ok(())
    }

    fn parse_wires(&self, node: Node, document: &mut Document) -> Result<()> {
        expect_element(node, "wires")?;
        for group in elements(node) {
            if group.tag_name().name() != "equipotential" {
                return Err(unexpected(group, "wires"));
            }
            for child in elements(group) {
                if child.tag_name().name() != "wire" {
                    return Err(unexpected(child, "equipotential"));
                }
                // Stored wire ids are renumbered on the next save, so only
                // the endpoints matter. Coincident endpoints connect by
                // construction once the wire is part of the document.
                document.add_wire(Wire::new(
                    point_attr(child, "port1", "wire")?,
                    point_attr(child, "port2", "wire")?,
                ));
            }
        }
        Ok(())
    }

    fn parse_paintings(&self, node: Node, document: &mut Document) -> Result<()> {
        expect_element(node, "paintings")?;
        for child in elements(node) {
            if child.tag_name().name() != "painting" {
                return Err(unexpected(child, "paintings"));
            }

            let painting = match required_attr(child, "name", "painting")? {
                "arrow" => {
                    let (p1, p2) = line_attr(child, "line", "painting")?;
                    Painting::Arrow(Arrow {
                        p1,
                        p2,
                        head_size: size_attr(child, "headsize", "painting")?,
                    })
                }
                "ellipse" => Painting::Ellipse(Ellipse {
                    rect: rect_attr(child, "rect", "painting")?,
                    filled: bool_attr(child, "filled", "painting")?,
                }),
                "ellipsearc" => Painting::EllipseArc(EllipseArc {
                    rect: rect_attr(child, "rect", "painting")?,
                    start_angle: f64_attr(child, "startangle", "painting")?,
                    span_angle: f64_attr(child, "spanangle", "painting")?,
                }),
                "line" => {
                    let (p1, p2) = line_attr(child, "line", "painting")?;
                    Painting::Line(Line { p1, p2 })
                }
                "rectangle" => Painting::Rectangle(Rectangle {
                    rect: rect_attr(child, "rect", "painting")?,
                    filled: bool_attr(child, "filled", "painting")?,
                }),
                "text" => Painting::Text(GraphicText {
                    pos: point_attr(child, "pos", "painting")?,
                    angle: f64_attr(child, "angle", "painting")?,
                    text: child.text().unwrap_or_default().to_string(),
                }),
                other => {
                    log::warn!("unknown painting type '{other}', skipping");
                    continue;
                }
            };
            document.add_painting(painting);
        }
        Ok(())
    }
}

fn elements<'a, 'i>(node: Node<'a, 'i>) -> impl Iterator<Item = Node<'a, 'i>> {
    node.children().filter(|n| n.is_element())
}

fn expect_element(node: Node, name: &'static str) -> Result<()> {
    if node.tag_name().name() != name {
        return Err(XmlFormatError::MalformedStructure(format!(
            "'{}' parser invoked on element '{}'",
            name,
            node.tag_name().name()
        )));
    }
    Ok(())
}

fn unexpected(node: Node, context: &str) -> XmlFormatError {
    XmlFormatError::MalformedStructure(format!(
        "unexpected element '{}' in {} block",
        node.tag_name().name(),
        context
    ))
}

fn required_attr<'a>(
    node: Node<'a, '_>,
    attr: &'static str,
    element: &'static str,
) -> Result<&'a str> {
    node.attribute(attr)
        .ok_or(XmlFormatError::MissingAttribute { element, attr })
}

fn f64_attr(node: Node, attr: &'static str, element: &'static str) -> Result<f64> {
    required_attr(node, attr, element)?
        .parse()
        .map_err(|_| XmlFormatError::InvalidAttribute(format!("invalid number for '{attr}'")))
}

fn u32_attr(node: Node, attr: &'static str, element: &'static str) -> Result<u32> {
    required_attr(node, attr, element)?
        .parse()
        .map_err(|_| XmlFormatError::InvalidAttribute(format!("invalid integer for '{attr}'")))
}

fn bool_attr(node: Node, attr: &'static str, element: &'static str) -> Result<bool> {
    let value = required_attr(node, attr, element)?;
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(XmlFormatError::InvalidAttribute(format!(
            "invalid bool value for '{attr}'"
        )))
    }
}

fn csv_floats(value: &str, expected: usize, attr: &'static str) -> Result<Vec<f64>> {
    let fields: Vec<f64> = value
        .split(',')
        .map(|field| field.trim().parse())
        .collect::<std::result::Result<_, _>>()
        .map_err(|_| XmlFormatError::InvalidAttribute(format!("invalid number in '{attr}'")))?;
    if fields.len() != expected {
        return Err(XmlFormatError::InvalidAttribute(format!(
            "expected {expected} comma separated values in '{attr}'"
        )));
    }
    Ok(fields)
}

fn point_attr(node: Node, attr: &'static str, element: &'static str) -> Result<Point> {
    let fields = csv_floats(required_attr(node, attr, element)?, 2, attr)?;
    Ok(Point::new(fields[0], fields[1]))
}

fn line_attr(node: Node, attr: &'static str, element: &'static str) -> Result<(Point, Point)> {
    let fields = csv_floats(required_attr(node, attr, element)?, 4, attr)?;
    Ok((
        Point::new(fields[0], fields[1]),
        Point::new(fields[2], fields[3]),
    ))
}

fn rect_attr(node: Node, attr: &'static str, element: &'static str) -> Result<Rect> {
    let fields = csv_floats(required_attr(node, attr, element)?, 4, attr)?;
    Ok(Rect::new(fields[0], fields[1], fields[2], fields[3]))
}

fn size_attr(node: Node, attr: &'static str, element: &'static str) -> Result<Size> {
    let fields = csv_floats(required_attr(node, attr, element)?, 2, attr)?;
    Ok(Size::new(fields[0], fields[1]))
}

fn transform_attr(node: Node, attr: &'static str, element: &'static str) -> Result<Transform> {
    let fields = csv_floats(required_attr(node, attr, element)?, 6, attr)?;
    Ok(Transform::new(
        fields[0], fields[1], fields[2], fields[3], fields[4], fields[5],
    ))
}

fn required_child_text(node: Node, name: &'static str) -> Result<String> {
    let child = elements(node)
        .find(|n| n.tag_name().name() == name)
        .ok_or(XmlFormatError::MissingElement(name))?;
    Ok(child.text().unwrap_or_default().to_string())
}

fn child_i32(node: Node, name: &'static str) -> Result<i32> {
    required_child_text(node, name)?
        .trim()
        .parse()
        .map_err(|_| XmlFormatError::InvalidAttribute(format!("invalid integer in '{name}'")))
}
