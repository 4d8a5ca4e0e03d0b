use grid_core::{DrawArea, Point, StrokeStyle, Surface};

/// SVG document drawn through the [`Surface`] calls, one `<path>` per stroke.
pub struct SvgSurface {
    width: u32,
    height: u32,
    background: Option<String>,
    stroke: StrokeStyle,
    clip: Option<DrawArea>,
    path: String,
    body: String,
}

impl SvgSurface {
    pub fn new(width: u32, height: u32) -> Self {
        SvgSurface {
            width,
            height,
            background: None,
            stroke: StrokeStyle::default(),
            clip: None,
            path: String::new(),
            body: String::new(),
        }
    }

    /// Fill the whole sheet with `color` beneath the strokes.
    pub fn with_background(mut self, color: &str) -> Self {
        self.background = Some(color.to_string());
        self
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn finish(self) -> String {
        let mut s = String::new();
        s.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        s.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\" fill=\"none\" stroke-linejoin=\"round\">\n",
            self.width, self.height, self.width, self.height
        ));
        if let Some(bg) = &self.background {
            s.push_str(&format!(
                "<rect x=\"0\" y=\"0\" width=\"100%\" height=\"100%\" fill=\"{}\"/>\n",
                svg_escape(bg)
            ));
        }
        match &self.clip {
            Some(a) => {
                s.push_str(&format!(
                    "<defs><clipPath id=\"grid-area\"><rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"#000000\"/></clipPath></defs>\n",
                    a.left,
                    a.top,
                    a.width(),
                    a.height()
                ));
                s.push_str("<g clip-path=\"url(#grid-area)\">\n");
                s.push_str(&self.body);
                s.push_str("</g>\n");
            }
            None => s.push_str(&self.body),
        }
        s.push_str("</svg>\n");
        s
    }
}

impl Surface for SvgSurface {
    fn clear(&mut self) {
        self.clip = None;
        self.path.clear();
        self.body.clear();
    }

    fn clip(&mut self, area: &DrawArea) {
        self.clip = Some(*area);
    }

    fn set_stroke(&mut self, style: &StrokeStyle) {
        self.stroke = style.clone();
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, p: Point) {
        if !self.path.is_empty() {
            self.path.push(' ');
        }
        self.path.push_str(&format!("M {:.2} {:.2}", p.x, p.y));
    }

    fn line_to(&mut self, p: Point) {
        self.path.push_str(&format!(" L {:.2} {:.2}", p.x, p.y));
    }

    fn close_path(&mut self) {
        self.path.push_str(" Z");
    }

    fn stroke(&mut self) {
        if self.path.is_empty() {
            return;
        }
        self.body.push_str(&format!(
            "<path d=\"{}\" stroke=\"{}\" stroke-width=\"{:.2}\"/>\n",
            self.path,
            svg_escape(&self.stroke.color),
            self.stroke.width
        ));
    }
}

pub(crate) fn svg_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
