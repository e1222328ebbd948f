//! SVG choropleth writer.

use std::io::{Cursor, Write};

use anyhow::{Context, Result};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use taxmap_geo::{Bounds, Point, ProvinceShape};
use taxmap_model::Amount;
use taxmap_transform::{JoinedMap, JoinedRecord};

use crate::naming::MapKind;
use crate::scale::ColorScale;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

const CANVAS_WIDTH: f64 = 1400.0;
const CANVAS_HEIGHT: f64 = 1200.0;
const MAP_LEFT: f64 = 60.0;
const MAP_TOP: f64 = 110.0;
const MAP_WIDTH: f64 = 1280.0;
const MAP_HEIGHT: f64 = 780.0;
/// Vertical gap between the province code and the value, in map units.
const CODE_OFFSET: f64 = 0.07;

pub const SOURCE_NOTE: &str = "Kaynak: Hazine ve Maliye Bakanlığı";
pub const FOOTNOTE: &str =
    "Dipnot: Kırmızı renkli iller ya eksik veridir ya negatif veridir ya da 0'dır.";
pub const MISSING_MARK: &str = "✖";

/// Equirectangular fit of map bounds into the drawing area, y pointing down.
#[derive(Debug, Clone, Copy)]
struct Projection {
    bounds: Bounds,
    scale: f64,
    offset_x: f64,
    offset_y: f64,
}

impl Projection {
    fn fit(bounds: Bounds) -> Self {
        let width = bounds.width().max(f64::EPSILON);
        let height = bounds.height().max(f64::EPSILON);
        let scale = (MAP_WIDTH / width).min(MAP_HEIGHT / height);
        Self {
            bounds,
            scale,
            offset_x: MAP_LEFT + (MAP_WIDTH - width * scale) / 2.0,
            offset_y: MAP_TOP + (MAP_HEIGHT - height * scale) / 2.0,
        }
    }

    fn project(&self, point: Point) -> (f64, f64) {
        (
            self.offset_x + (point.x - self.bounds.min_x) * self.scale,
            self.offset_y + (self.bounds.max_y - point.y) * self.scale,
        )
    }
}

/// Value a map colours and labels a record by.
fn map_value(record: &JoinedRecord<'_>, kind: MapKind) -> Amount {
    match kind {
        MapKind::Accrual => record.accrual,
        MapKind::Collection => record.collection,
        MapKind::Ratio => record.ratio,
    }
}

/// Text drawn at a province's centroid.
pub fn value_label(kind: MapKind, value: Amount) -> String {
    match (kind, value.value()) {
        (_, None) => MISSING_MARK.to_string(),
        (MapKind::Ratio, Some(ratio)) => format!("{ratio:.2}%"),
        (_, Some(amount)) => format!("{:.2}M", amount / 1_000_000.0),
    }
}

/// Summary line under the map.
pub fn total_line(joined: &JoinedMap<'_>, kind: MapKind) -> String {
    let totals = &joined.totals;
    match kind {
        MapKind::Accrual => format!("Toplam Tahakkuk: {:.3} Milyar TL", totals.accrual / 1e9),
        MapKind::Collection => {
            format!("Toplam Tahsilat: {:.3} Milyar TL", totals.collection / 1e9)
        }
        MapKind::Ratio => format!("TR Geneli Tahsilat Oranı: {:.2}%", totals.overall_ratio),
    }
}

fn color_scale(joined: &JoinedMap<'_>, kind: MapKind) -> ColorScale {
    let values = joined
        .records
        .iter()
        .filter_map(|record| map_value(record, kind).value());
    match kind {
        MapKind::Ratio => ColorScale::linear(values),
        MapKind::Accrual | MapKind::Collection => ColorScale::log1p(values),
    }
}

/// Renders one choropleth of the joined map as an SVG document.
pub fn render_map_svg(joined: &JoinedMap<'_>, kind: MapKind, title: &str) -> Result<String> {
    let mut xml = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let view_box = format!("0 0 {CANVAS_WIDTH} {CANVAS_HEIGHT}");
    let mut root = BytesStart::new("svg");
    root.push_attribute(("xmlns", SVG_NS));
    root.push_attribute(("width", CANVAS_WIDTH.to_string().as_str()));
    root.push_attribute(("height", CANVAS_HEIGHT.to_string().as_str()));
    root.push_attribute(("viewBox", view_box.as_str()));
    root.push_attribute(("font-family", "DejaVu Sans, Arial, sans-serif"));
    xml.write_event(Event::Start(root))?;

    let mut background = BytesStart::new("rect");
    background.push_attribute(("width", "100%"));
    background.push_attribute(("height", "100%"));
    background.push_attribute(("fill", "white"));
    xml.write_event(Event::Empty(background))?;

    write_text(
        &mut xml,
        (CANVAS_WIDTH / 2.0, 60.0),
        title,
        &[("font-size", "24"), ("font-weight", "bold"), ("text-anchor", "middle")],
    )?;

    let bounds = joined
        .records
        .iter()
        .filter_map(|record| record.shape.bounds())
        .reduce(Bounds::union);
    if let Some(bounds) = bounds {
        let projection = Projection::fit(bounds);
        let scale = color_scale(joined, kind);

        xml.write_event(Event::Start(BytesStart::new("g")))?;
        for record in &joined.records {
            let fill = scale.fill(map_value(record, kind).value());
            write_province(&mut xml, &projection, record.shape, &fill.to_string())?;
        }
        xml.write_event(Event::End(BytesEnd::new("g")))?;

        xml.write_event(Event::Start(BytesStart::new("g")))?;
        for record in &joined.records {
            write_labels(&mut xml, &projection, record, kind)?;
        }
        xml.write_event(Event::End(BytesEnd::new("g")))?;
    }

    write_footer(&mut xml, &total_line(joined, kind))?;
    xml.write_event(Event::End(BytesEnd::new("svg")))?;

    let bytes = xml.into_inner().into_inner();
    String::from_utf8(bytes).context("svg output is not utf-8")
}

fn write_province<W: Write>(
    xml: &mut Writer<W>,
    projection: &Projection,
    shape: &ProvinceShape,
    fill: &str,
) -> Result<()> {
    let mut d = String::new();
    for polygon in &shape.polygons {
        for ring in polygon.rings() {
            for (i, point) in ring.iter().enumerate() {
                let (x, y) = projection.project(*point);
                let command = if i == 0 { 'M' } else { 'L' };
                d.push_str(&format!("{command}{x:.2},{y:.2} "));
            }
            if !ring.is_empty() {
                d.push_str("Z ");
            }
        }
    }

    let mut path = BytesStart::new("path");
    path.push_attribute(("d", d.trim_end()));
    path.push_attribute(("fill", fill));
    path.push_attribute(("fill-rule", "evenodd"));
    path.push_attribute(("stroke", "gray"));
    path.push_attribute(("stroke-width", "0.5"));
    xml.write_event(Event::Start(path))?;
    xml.write_event(Event::Start(BytesStart::new("title")))?;
    xml.write_event(Event::Text(BytesText::new(&shape.name)))?;
    xml.write_event(Event::End(BytesEnd::new("title")))?;
    xml.write_event(Event::End(BytesEnd::new("path")))?;
    Ok(())
}

fn write_labels<W: Write>(
    xml: &mut Writer<W>,
    projection: &Projection,
    record: &JoinedRecord<'_>,
    kind: MapKind,
) -> Result<()> {
    let Some(centroid) = record.shape.centroid() else {
        return Ok(());
    };
    let above = projection.project(Point::new(centroid.x, centroid.y + CODE_OFFSET));
    write_text(
        xml,
        above,
        &record.shape.abbreviation(),
        &[("font-size", "9"), ("font-weight", "bold"), ("text-anchor", "middle")],
    )?;

    let value = map_value(record, kind);
    let size = if value.is_missing() { "13" } else { "10" };
    write_text(
        xml,
        projection.project(centroid),
        &value_label(kind, value),
        &[
            ("font-size", size),
            ("font-weight", "bold"),
            ("text-anchor", "middle"),
            ("dominant-baseline", "central"),
        ],
    )
}

fn write_footer<W: Write>(xml: &mut Writer<W>, total: &str) -> Result<()> {
    let bold = [("font-size", "15"), ("font-weight", "bold")];
    write_text(xml, (1036.0, 930.0), total, &bold)?;
    write_text(xml, (1022.0, 955.0), SOURCE_NOTE, &bold)?;

    let mut frame = BytesStart::new("rect");
    frame.push_attribute(("x", "104"));
    frame.push_attribute(("y", "967"));
    frame.push_attribute(("width", "620"));
    frame.push_attribute(("height", "28"));
    frame.push_attribute(("rx", "6"));
    frame.push_attribute(("fill", "white"));
    frame.push_attribute(("stroke", "red"));
    xml.write_event(Event::Empty(frame))?;
    write_text(
        xml,
        (112.0, 986.0),
        FOOTNOTE,
        &[("font-size", "13"), ("font-weight", "bold")],
    )
}

fn write_text<W: Write>(
    xml: &mut Writer<W>,
    (x, y): (f64, f64),
    text: &str,
    attributes: &[(&str, &str)],
) -> Result<()> {
    let mut element = BytesStart::new("text");
    element.push_attribute(("x", format!("{x:.2}").as_str()));
    element.push_attribute(("y", format!("{y:.2}").as_str()));
    for attribute in attributes {
        element.push_attribute(*attribute);
    }
    xml.write_event(Event::Start(element))?;
    xml.write_event(Event::Text(BytesText::new(text)))?;
    xml.write_event(Event::End(BytesEnd::new("text")))?;
    Ok(())
}
