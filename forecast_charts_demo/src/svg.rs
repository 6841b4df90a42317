// Copyright 2025 the Forecast Charts Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG dump of a [`ChartScene`].

use forecast_charts::{ChartScene, Layer, Mark, MarkShape, StrokeStyle, TextAnchor};
use peniko::Brush;

/// Draw order of the layer groups and the class each group carries.
const LAYERS: [(Layer, &str); 3] = [
    (Layer::Grid, "ct-grids"),
    (Layer::Series, "ct-series"),
    (Layer::Labels, "ct-labels"),
];

/// Renders every mark of `scene` into a standalone SVG document.
pub(crate) fn to_svg_string(scene: &ChartScene) -> String {
    let view = scene.view;
    let mut out = String::new();

    out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
    out.push_str(&format!(
        r#"viewBox="{} {} {} {}" width="{}" height="{}" class="forecast-chart">"#,
        view.x0,
        view.y0,
        view.width(),
        view.height(),
        view.width(),
        view.height()
    ));
    out.push('\n');

    for (layer, class) in LAYERS {
        out.push_str(&format!(r#"<g class="{class}">"#));
        out.push('\n');
        // Marks arrive sorted by (z_index, id); filtering keeps that order.
        for mark in scene.marks.iter().filter(|m| m.layer == layer) {
            write_mark(&mut out, mark);
        }
        out.push_str("</g>\n");
    }

    out.push_str("</svg>\n");
    out
}

fn write_mark(out: &mut String, mark: &Mark) {
    match &mark.shape {
        MarkShape::Path(path) => {
            let d = path.to_svg();
            out.push_str(&format!(r#"<path class="{}" d="{d}""#, mark.class));
            match &mark.fill {
                Some(fill) => write_paint_attr(out, "fill", fill),
                None => out.push_str(r#" fill="none""#),
            }
            if let Some(stroke) = &mark.stroke {
                write_stroke(out, stroke);
            }
            out.push_str("/>\n");
        }
        MarkShape::Text {
            pos,
            text,
            font_size,
            anchor,
        } => {
            out.push_str(&format!(
                r#"<text class="{}" x="{}" y="{}" font-size="{}" dominant-baseline="middle""#,
                mark.class, pos.x, pos.y, font_size
            ));
            out.push_str(match anchor {
                TextAnchor::Start => r#" text-anchor="start""#,
                TextAnchor::Middle => r#" text-anchor="middle""#,
                TextAnchor::End => r#" text-anchor="end""#,
            });
            if let Some(fill) = &mark.fill {
                write_paint_attr(out, "fill", fill);
            }
            out.push('>');
            out.push_str(&escape_xml(text));
            out.push_str("</text>\n");
        }
    }
}

fn write_stroke(out: &mut String, stroke: &StrokeStyle) {
    if stroke.stroke_width > 0.0 {
        write_paint_attr(out, "stroke", &stroke.brush);
        out.push_str(&format!(r#" stroke-width="{}""#, stroke.stroke_width));
    }
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let fill = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let fill_opacity = if rgba.a == 255 {
                None
            } else {
                Some(f64::from(rgba.a) / 255.0)
            };
            (fill, fill_opacity)
        }
        _ => ("none".to_string(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    out.push_str(&format!(r#" {name}="{value}""#));
    if let Some(o) = opacity {
        out.push_str(&format!(r#" {name}-opacity="{o}""#));
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use forecast_charts::{ChartData, ForecastChartSpec, Sample, Thresholds};

    use super::*;

    #[test]
    fn escapes_markup_in_labels() {
        assert_eq!(escape_xml("a<b & 'c'"), "a&lt;b &amp; &apos;c&apos;");
    }

    #[test]
    fn layers_render_in_order_with_classes() {
        let data = ChartData {
            labels: vec!["Jan".to_string(), "Feb".to_string()],
            thresholds: Thresholds::new(10.0, 20.0, 30.0).unwrap(),
            series: vec![vec![Sample::new(5.0), Sample::new(25.0)]],
        };
        let svg = to_svg_string(&ForecastChartSpec::default().build(&data));

        let grids = svg.find(r#"<g class="ct-grids">"#).unwrap();
        let series = svg.find(r#"<g class="ct-series">"#).unwrap();
        let labels = svg.find(r#"<g class="ct-labels">"#).unwrap();
        assert!(grids < series && series < labels);

        assert!(svg.contains("forecast-chart__thresholds--min"));
        assert!(svg.contains(r#"class="forecast-chart__line""#));
        assert!(svg.contains(">Feb</text>"));
        assert!(svg.contains(r#" stroke-width="2""#), "series stroke width");
        assert!(svg.contains(r#" fill-opacity="0.2""#), "translucent band fill");
        assert!(svg.ends_with("</svg>\n"));
    }
}
