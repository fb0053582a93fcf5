use crate::surface::matrix::MatrixImage;

/// Marker glyph drawn at data points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerShape {
    Cross,
    Circle,
    Square,
    TriangleUp,
    TriangleDown,
}

/// Line rendering variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineKind {
    #[default]
    Solid,
    Dashed,
}

/// Stroke style for polylines
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub color: [u8; 3],
    pub width: u32,
    pub kind: LineKind,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: [0, 0, 0],
            width: 1,
            kind: LineKind::Solid,
        }
    }
}

impl LineStyle {
    pub fn solid(color: [u8; 3]) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }
}

/// Style for marker glyphs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    pub shape: MarkerShape,
    pub size: u32,
    pub color: [u8; 3],
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            shape: MarkerShape::Cross,
            size: 8,
            color: [0, 0, 0],
        }
    }
}

/// A retained drawing element on an axes surface
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// Connected polyline, optionally with a marker at each vertex
    Line {
        xs: Vec<f64>,
        ys: Vec<f64>,
        style: LineStyle,
        marker: Option<MarkerStyle>,
    },
    /// Unconnected markers
    Markers {
        xs: Vec<f64>,
        ys: Vec<f64>,
        style: MarkerStyle,
    },
    /// Dense cell grid drawn in matrix-index coordinates
    Matrix(MatrixImage),
}
