use kurbo::{Affine, Rect};
use crate::canvas::Canvas;
use crate::objects::SceneNode;
use crate::scene::NodeId;
use crate::types::{Gradient, NodeKind, Paint};

fn matrix(transform: Affine) -> String {
    let c = transform.as_coeffs();
    format!("matrix({} {} {} {} {} {})", c[0], c[1], c[2], c[3], c[4], c[5])
}

fn gradient_def(id: &str, grad: &Gradient) -> String {
    let mut svg = if grad.is_radial {
        let r = ((grad.x2 - grad.x1).powi(2) + (grad.y2 - grad.y1).powi(2)).sqrt();
        format!(r##"<radialGradient id="{}" cx="{}" cy="{}" r="{}" gradientUnits="userSpaceOnUse">"##, id, grad.x1, grad.y1, r)
    } else {
        format!(r##"<linearGradient id="{}" x1="{}" y1="{}" x2="{}" y2="{}" gradientUnits="userSpaceOnUse">"##,
            id, grad.x1, grad.y1, grad.x2, grad.y2)
    };
    for stop in &grad.stops {
        svg.push_str(&format!(r##"<stop offset="{}" stop-color="{}" />"##, stop.offset, stop.color));
    }
    svg.push_str(if grad.is_radial { "</radialGradient>" } else { "</linearGradient>" });
    svg
}

/// `fill`/`stroke` attribute for the top paint of a list. Gradients go to `defs`.
fn paint_attr(name: &str, paints: &[Paint], owner: NodeId, defs: &mut Vec<String>) -> String {
    match paints.last() {
        None => format!(r##"{}="none""##, name),
        Some(Paint::Solid { color, opacity }) if *opacity < 1.0 => {
            format!(r##"{}="{}" {}-opacity="{}""##, name, color, name, opacity)
        }
        Some(Paint::Solid { color, .. }) => format!(r##"{}="{}""##, name, color),
        Some(Paint::Gradient(grad)) => {
            let id = format!("grad_{}_{}", name, owner.0);
            defs.push(gradient_def(&id, grad));
            format!(r##"{}="url(#{})""##, name, id)
        }
    }
}

impl Canvas {
    /// Renders the page as a standalone SVG document.
    pub fn export_svg(&self) -> String {
        let mut defs = Vec::new();
        let mut body = String::new();
        let mut area: Option<Rect> = None;
        for &id in &self.page {
            if let Some(node) = self.node(id) {
                let b = node.bounds();
                area = Some(area.map_or(b, |a| a.union(b)));
                body.push_str(&self.node_svg(node, &mut defs));
            }
        }
        let area = area.unwrap_or(Rect::ZERO);
        let defs_str = if defs.is_empty() { String::new() } else { format!("<defs>{}</defs>", defs.join("")) };
        format!(
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="{} {} {} {}">{}{}</svg>"##,
            area.width(), area.height(), area.x0, area.y0, area.width(), area.height(), defs_str, body
        )
    }

    fn node_svg(&self, node: &SceneNode, defs: &mut Vec<String>) -> String {
        if !node.visible {
            return String::new();
        }
        let mut attrs = vec![format!(r##"transform="{}""##, matrix(node.transform))];
        if node.opacity < 1.0 {
            attrs.push(format!(r##"opacity="{}""##, node.opacity));
        }
        if let Some(mode) = node.blend_mode.css() {
            attrs.push(format!(r##"style="mix-blend-mode: {}""##, mode));
        }
        let attr_str = attrs.join(" ");

        match node.kind {
            NodeKind::Ellipse | NodeKind::Vector => {
                let Some(path) = node.local_path() else { return String::new() };
                let mut shape = vec![paint_attr("fill", &node.fills, node.id, defs)];
                if !node.strokes.is_empty() && node.stroke_weight > 0.0 {
                    shape.push(paint_attr("stroke", &node.strokes, node.id, defs));
                    shape.push(format!(r##"stroke-width="{}""##, node.stroke_weight));
                    if !node.dash_pattern.is_empty() {
                        let dash: Vec<String> = node.dash_pattern.iter().map(|d| d.to_string()).collect();
                        shape.push(format!(r##"stroke-dasharray="{}""##, dash.join(" ")));
                    }
                }
                format!(r##"<path d="{}" {} {} />"##, path.to_svg(), shape.join(" "), attr_str)
            }
            NodeKind::Instance => {
                let content = node
                    .main_component
                    .and_then(|c| self.node(c))
                    .map(|component| self.contents_svg(component, defs))
                    .unwrap_or_default();
                format!(r##"<g {}>{}</g>"##, attr_str, content)
            }
            NodeKind::Frame | NodeKind::Component | NodeKind::ComponentSet => {
                format!(r##"<g {}>{}</g>"##, attr_str, self.contents_svg(node, defs))
            }
        }
    }

    /// Background and children of a frame-like node, in its own space.
    fn contents_svg(&self, node: &SceneNode, defs: &mut Vec<String>) -> String {
        let mut inner = String::new();
        if !node.fills.is_empty() {
            inner.push_str(&format!(r##"<rect width="{}" height="{}" {} />"##,
                node.width, node.height, paint_attr("fill", &node.fills, node.id, defs)));
        }
        for child in node.children.iter().filter_map(|&c| self.node(c)) {
            inner.push_str(&self.node_svg(child, defs));
        }
        inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::RadialBuilder;
    use crate::config::RadialConfig;
    use crate::settings::EngineSettings;

    #[test]
    fn empty_page() {
        assert_eq!(
            Canvas::new().export_svg(),
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="0" height="0" viewBox="0 0 0 0"></svg>"##
        );
    }

    #[test]
    fn segments_render_through_their_component() {
        let mut canvas = Canvas::new();
        let settings = EngineSettings::default();
        let config = RadialConfig { num_segments: 4, ..Default::default() };
        RadialBuilder::new(&settings).build(&mut canvas, &config, "Radial 1").unwrap();

        let svg = canvas.export_svg();
        assert!(svg.starts_with("<svg"));
        // two variant shapes plus one per segment
        assert_eq!(svg.matches("<path").count(), 2 + 4);
        // the unfocused shape and the four segments drawn from it
        assert_eq!(svg.matches(r##"fill="#d9d9d9""##).count(), 5);
    }

    #[test]
    fn gradients_are_collected_in_defs() {
        use crate::scene::SceneGraph;
        use crate::types::{GradientStop, StyleValue};
        let mut canvas = Canvas::new();
        let frame = canvas.create_container().unwrap();
        let grad = Gradient {
            is_radial: false, x1: 0.0, y1: 0.0, x2: 100.0, y2: 0.0,
            stops: vec![GradientStop { offset: 0.0, color: "#000".into() }, GradientStop { offset: 1.0, color: "#fff".into() }],
        };
        canvas.set_style_attribute(frame, StyleValue::Fills(vec![Paint::Gradient(grad)])).unwrap();
        let svg = canvas.export_svg();
        assert!(svg.contains(r##"<defs><linearGradient id="grad_fill_1""##));
        assert!(svg.contains(r##"fill="url(#grad_fill_1)""##));
    }
}
