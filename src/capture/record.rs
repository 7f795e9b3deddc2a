use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptureKind {
    Position,
    Click,
    Area,
    DoubleClick,
}

impl CaptureKind {
    /// Tag written to the `tipo` column of the CSV file.
    pub fn tag(self) -> &'static str {
        match self {
            CaptureKind::Position => "posicao",
            CaptureKind::Click => "clique",
            CaptureKind::Area => "area",
            CaptureKind::DoubleClick => "duplo_clique",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            CaptureKind::Position => "📍",
            CaptureKind::Click => "👉",
            CaptureKind::Area => "🔲",
            CaptureKind::DoubleClick => "🔖",
        }
    }
}

impl fmt::Display for CaptureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Screen rectangle in global physical pixels, always stored with
/// `x1 <= x2` and `y1 <= y2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CaptureRect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl CaptureRect {
    pub fn point(point: (i32, i32)) -> Self {
        Self {
            x1: point.0,
            y1: point.1,
            x2: point.0,
            y2: point.1,
        }
    }

    pub fn from_corners(a: (i32, i32), b: (i32, i32)) -> Self {
        Self {
            x1: a.0.min(b.0),
            y1: a.1.min(b.1),
            x2: a.0.max(b.0),
            y2: a.1.max(b.1),
        }
    }

    pub fn width(&self) -> u32 {
        self.x2.abs_diff(self.x1)
    }

    pub fn height(&self) -> u32 {
        self.y2.abs_diff(self.y1)
    }

    pub fn is_degenerate(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn top_left(&self) -> (i32, i32) {
        (self.x1, self.y1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureRecord {
    pub kind: CaptureKind,
    pub rect: CaptureRect,
}

impl CaptureRecord {
    pub fn new(kind: CaptureKind, rect: CaptureRect) -> Self {
        Self { kind, rect }
    }

    pub fn at_point(kind: CaptureKind, point: (i32, i32)) -> Self {
        Self::new(kind, CaptureRect::point(point))
    }

    pub fn csv_row(&self) -> String {
        let r = &self.rect;
        format!("{},{},{},{},{}", self.kind.tag(), r.x1, r.y1, r.x2, r.y2)
    }

    pub fn log_line(&self) -> String {
        let r = &self.rect;
        format!(
            "{} {}: ({},{}) → ({},{})",
            self.kind.icon(),
            self.kind.tag(),
            r.x1,
            r.y1,
            r.x2,
            r.y2
        )
    }

}
