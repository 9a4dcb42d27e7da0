use std::{fmt, io, path};

use num_traits::real::Real;
use smallvec::SmallVec;

use crate::{Coords, debug, mesh::{FaceId, VertexId}};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum SvgOutputLevel {
    None,
    ResultOnly,
    MajorSteps,
    AllSteps,
}

pub(crate) struct SvgOutput<'a> {
    pub context: &'a SvgContext,
    pub style: SvgMeshStyle,
    content: String,
}

impl<'a> SvgOutput<'a> {
    pub fn new(context: &'a SvgContext, style: SvgMeshStyle) -> Self {
        Self {
            context,
            style,
            content: String::new(),
        }
    }

    pub fn append_element<State, E: SvgElement<State>>(&mut self, element: &E, state: &State) -> fmt::Result {
        element.write_svg(self, state)
    }

    pub fn save<P: AsRef<path::Path>>(self, file_name: P) -> io::Result<()> {
        use std::io::Write;

        let path = self.context.output_path.join(file_name);
        let f = std::fs::File::create(path)?;
        let mut w = io::BufWriter::new(&f);

        writeln!(w, "<svg viewBox=\"{}, {}, {}, {}\" xmlns=\"http://www.w3.org/2000/svg\">", self.context.view_x_min, self.context.view_y_min, self.context.view_w(), self.context.view_h())?;
        writeln!(w, "{}", self.content)?;
        writeln!(w, "</svg>")?;
        Ok(())
    }
}

impl<'a> fmt::Write for SvgOutput<'a> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.content.write_str(s)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum SvgElementStyle {
    Hide,
    Standard,
    Highlight,
}

/// Which elements of a snapshot stand out
pub(crate) struct SvgMeshStyle {
    vertex: Option<VertexId>,
    faces: SmallVec<[FaceId; 3]>,
    pub add_labels: bool,
}

impl Default for SvgMeshStyle {
    fn default() -> Self {
        Self {
            vertex: None,
            faces: SmallVec::new(),
            add_labels: debug::env::svg::show_labels(),
        }
    }
}

impl SvgMeshStyle {
    pub fn highlight_vertex(v: VertexId) -> Self {
        Self {
            vertex: Some(v),
            ..Self::default()
        }
    }

    pub fn highlight_faces(faces: &[FaceId]) -> Self {
        Self {
            faces: faces.iter().copied().collect(),
            ..Self::default()
        }
    }

    pub fn vertex_style(&self, v: VertexId) -> SvgElementStyle {
        if self.vertex == Some(v) {
            SvgElementStyle::Highlight
        } else {
            SvgElementStyle::Standard
        }
    }

    pub fn face_style(&self, f: FaceId, removed: bool) -> SvgElementStyle {
        if removed {
            SvgElementStyle::Hide
        } else if self.faces.contains(&f) {
            SvgElementStyle::Highlight
        } else {
            SvgElementStyle::Standard
        }
    }
}

pub(crate) struct SvgContext {
    pub output_path: path::PathBuf,
    pub output_level: SvgOutputLevel,
    pub view_x_min: f32,
    pub view_x_max: f32,
    pub view_y_min: f32,
    pub view_y_max: f32,
}

impl SvgContext {
    /// Read the configuration from the environment and frame the view around `points`.
    ///
    /// Returns `None` if no snapshot would ever be written.
    pub fn from_env<C: Real>(points: &[Coords<C>]) -> Option<Self> {
        let output_path = debug::env::svg::output_path()?;
        let output_level = debug::env::svg::output_level();
        if output_level == SvgOutputLevel::None {
            return None;
        }

        let mut view_x_min = f32::MAX;
        let mut view_x_max = f32::MIN;
        let mut view_y_min = f32::MAX;
        let mut view_y_max = f32::MIN;
        for [x, y] in points.iter().map(|p| p.to_f32()) {
            view_x_min = view_x_min.min(x);
            view_x_max = view_x_max.max(x);
            view_y_min = view_y_min.min(y);
            view_y_max = view_y_max.max(y);
        }

        let w = view_x_max - view_x_min;
        let h = view_y_max - view_y_min;
        let margin_scale = 0.05;
        view_x_min -= w * margin_scale;
        view_x_max += w * margin_scale;
        view_y_min -= h * margin_scale;
        view_y_max += h * margin_scale;

        Some(Self {
            output_path,
            output_level,
            view_x_min,
            view_x_max,
            view_y_min,
            view_y_max,
        })
    }

    pub fn view_w(&self) -> f32 { self.view_x_max - self.view_x_min }
    pub fn view_h(&self) -> f32 { self.view_y_max - self.view_y_min }

    pub fn view_min_size(&self) -> f32 { self.view_w().min(self.view_h()) }

    pub fn percent(&self, p: f32) -> f32 { self.view_min_size() * p / 100.0 }
}

pub(crate) trait SvgElement<State=()> {
    fn write_svg(&self, svg_output: &mut SvgOutput<'_>, state: &State) -> fmt::Result;
}

// svg_fmt is missing a function for Circle
pub(crate) fn circle(x: f32, y: f32, r: f32) -> svg_fmt::Circle {
    svg_fmt::Circle {
        x,
        y,
        radius: r,
        style: svg_fmt::Style::default(),
        comment: None,
    }
}
