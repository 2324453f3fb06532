use core::fmt;

pub const DEFAULT_WINDOW_SIZE: u32 = 800;
pub const DEFAULT_ROWS: usize = 40;

/// Geometry of the visualizer: a square window of `window_size` pixels split into `rows` by
/// `rows` cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisualizerConfig {
    #[cfg_attr(feature = "serde", serde(default = "default_window_size"))]
    pub window_size: u32,
    #[cfg_attr(feature = "serde", serde(default = "default_rows"))]
    pub rows: usize,
}

#[cfg(feature = "serde")]
fn default_window_size() -> u32 {
    DEFAULT_WINDOW_SIZE
}

#[cfg(feature = "serde")]
fn default_rows() -> usize {
    DEFAULT_ROWS
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            rows: DEFAULT_ROWS,
        }
    }
}

impl VisualizerConfig {
    pub fn new(window_size: u32, rows: usize) -> Self {
        Self { window_size, rows }
    }
    /// Side of a cell in pixels, rounded down.
    pub fn cell_size(&self) -> u32 {
        match u32::try_from(self.rows) {
            Ok(rows) if rows > 0 => self.window_size / rows,
            _ => 0,
        }
    }
    /// Checks that every cell is at least one pixel wide.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 {
            return Err(ConfigError::NoRows);
        }
        if self.cell_size() == 0 {
            return Err(ConfigError::WindowTooSmall {
                window_size: self.window_size,
                rows: self.rows,
            });
        }
        Ok(())
    }
}

/// Invalid [VisualizerConfig].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The grid needs at least one row.
    NoRows,
    /// The window cannot fit one pixel per cell.
    WindowTooSmall { window_size: u32, rows: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoRows => write!(f, "grid must have at least one row"),
            Self::WindowTooSmall { window_size, rows } => {
                write!(f, "window of {window_size} px cannot hold {rows} rows")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
