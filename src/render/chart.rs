use crate::preferences::Theme;
use crate::session::languages::LanguageShare;
use serde::{Serialize, Serializer};

pub const NO_LANGUAGE_DATA: &str = "No language data available";

const BAR_WIDTH: usize = 40;
const GOLDEN_ANGLE: f64 = 137.508;

/// Colors for languages people actually search for
const KNOWN_LANGUAGES: &[(&str, Rgb)] = &[
    ("JavaScript", Rgb::new(0xf1, 0xe0, 0x5a)),
    ("TypeScript", Rgb::new(0x31, 0x78, 0xc6)),
    ("Python", Rgb::new(0x35, 0x72, 0xa5)),
    ("Java", Rgb::new(0xb0, 0x72, 0x19)),
    ("C", Rgb::new(0x55, 0x55, 0x55)),
    ("C++", Rgb::new(0xf3, 0x4b, 0x7d)),
    ("C#", Rgb::new(0x17, 0x86, 0x00)),
    ("Go", Rgb::new(0x00, 0xad, 0xd8)),
    ("Rust", Rgb::new(0xde, 0xa5, 0x84)),
    ("Ruby", Rgb::new(0x70, 0x15, 0x16)),
    ("PHP", Rgb::new(0x4f, 0x5d, 0x95)),
    ("Swift", Rgb::new(0xf0, 0x51, 0x38)),
    ("Kotlin", Rgb::new(0xa9, 0x7b, 0xff)),
    ("Dart", Rgb::new(0x00, 0xb4, 0xab)),
    ("HTML", Rgb::new(0xe3, 0x4c, 0x26)),
    ("CSS", Rgb::new(0x56, 0x3d, 0x7c)),
    ("Shell", Rgb::new(0x89, 0xe0, 0x51)),
    ("Vue", Rgb::new(0x41, 0xb8, 0x83)),
    ("Jupyter Notebook", Rgb::new(0xda, 0x5b, 0x0b)),
    ("Lua", Rgb::new(0x00, 0x00, 0x80)),
    ("Scala", Rgb::new(0xc2, 0x2d, 0x40)),
    ("Haskell", Rgb::new(0x5e, 0x50, 0x86)),
    ("Elixir", Rgb::new(0x6e, 0x4a, 0x7e)),
    ("Objective-C", Rgb::new(0x43, 0x8e, 0xff)),
    ("R", Rgb::new(0x19, 0x8c, 0xe7)),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Convert HSL (hue in degrees, saturation and lightness in 0..=1)
    pub fn from_hsl(hue: f64, saturation: f64, lightness: f64) -> Self {
        let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
        let h = hue.rem_euclid(360.0) / 60.0;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = lightness - c / 2.0;
        let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Self::new(channel(r), channel(g), channel(b))
    }

    fn ansi_fg(self) -> String {
        format!("\x1b[38;2;{};{};{}m", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Segment color for a language label.
///
/// Known languages use a fixed table; anything else gets a hue derived
/// from the label so repeated renders agree.
pub fn language_color(label: &str) -> Rgb {
    if let Some((_, color)) = KNOWN_LANGUAGES.iter().find(|(name, _)| *name == label) {
        return *color;
    }

    let hash = label
        .chars()
        .fold(0i32, |hash, c| (c as i32).wrapping_add(hash.wrapping_shl(5).wrapping_sub(hash)));
    let hue = (f64::from(hash).abs() * GOLDEN_ANGLE) % 360.0;
    Rgb::from_hsl(hue, 0.65, 0.55)
}

/// Legend text color for a theme
pub fn legend_color(theme: Theme) -> Rgb {
    match theme {
        Theme::Light => Rgb::new(0x33, 0x33, 0x33),
        Theme::Dark => Rgb::new(0xf3, 0xf4, 0xf6),
    }
}

/// Input of the doughnut chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub values: Vec<u64>,
    pub percentages: Vec<f64>,
    pub colors: Vec<Rgb>,
}

impl ChartData {
    pub fn from_shares(shares: &[LanguageShare]) -> Self {
        Self {
            labels: shares.iter().map(|s| s.label.clone()).collect(),
            values: shares.iter().map(|s| s.count).collect(),
            percentages: shares.iter().map(|s| s.percentage).collect(),
            colors: shares.iter().map(|s| language_color(&s.label)).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Boundary to whatever draws the language chart
pub trait ChartRenderer {
    /// Replace the current chart, tearing the old one down first
    fn render(&mut self, data: &ChartData);

    /// Show the "no data" placeholder instead of a chart
    fn render_no_data(&mut self);

    fn destroy(&mut self);

    /// Recolor in place after a theme toggle
    fn set_theme(&mut self, theme: Theme);
}

#[derive(Debug, Clone)]
struct DrawnChart {
    data: ChartData,
    ring: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ChartContent {
    Empty,
    NoData,
}

/// Terminal rendition: a proportional bar standing in for the ring, plus a legend
#[derive(Debug, Clone)]
pub struct TextChart {
    theme: Theme,
    ansi: bool,
    chart: Option<DrawnChart>,
    placeholder: ChartContent,
    builds: usize,
}

impl TextChart {
    pub fn new(theme: Theme, ansi: bool) -> Self {
        Self {
            theme,
            ansi,
            chart: None,
            placeholder: ChartContent::Empty,
            builds: 0,
        }
    }

    /// Number of times a chart was built from data
    pub fn builds(&self) -> usize {
        self.builds
    }

    pub fn has_chart(&self) -> bool {
        self.chart.is_some()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Current frame as printable text
    pub fn frame(&self) -> String {
        let Some(chart) = &self.chart else {
            return match self.placeholder {
                ChartContent::NoData => NO_LANGUAGE_DATA.to_string(),
                ChartContent::Empty => String::new(),
            };
        };

        let legend = legend_color(self.theme);
        let mut out = chart.ring.clone();
        for ((label, pct), color) in chart
            .data
            .labels
            .iter()
            .zip(&chart.data.percentages)
            .zip(&chart.data.colors)
        {
            out.push('\n');
            if self.ansi {
                out.push_str(&format!(
                    "{}●\x1b[0m {}{label} {pct:.1}%\x1b[0m",
                    color.ansi_fg(),
                    legend.ansi_fg()
                ));
            } else {
                out.push_str(&format!("● {label} {pct:.1}%"));
            }
        }
        out
    }

    fn draw_ring(&self, data: &ChartData) -> String {
        let total: u64 = data.values.iter().sum();
        if total == 0 {
            return String::new();
        }

        let mut ring = String::new();
        let mut used = 0;
        for (i, (value, color)) in data.values.iter().zip(&data.colors).enumerate() {
            let width = if i + 1 == data.values.len() {
                BAR_WIDTH - used
            } else {
                ((*value as f64 / total as f64) * BAR_WIDTH as f64).round() as usize
            };
            let width = width.min(BAR_WIDTH - used);
            used += width;

            let segment = "█".repeat(width);
            if self.ansi {
                ring.push_str(&format!("{}{segment}\x1b[0m", color.ansi_fg()));
            } else {
                ring.push_str(&segment);
            }
        }
        ring
    }
}

impl ChartRenderer for TextChart {
    fn render(&mut self, data: &ChartData) {
        self.destroy();
        if data.is_empty() {
            self.placeholder = ChartContent::NoData;
            return;
        }

        let ring = self.draw_ring(data);
        self.chart = Some(DrawnChart {
            data: data.clone(),
            ring,
        });
        self.builds += 1;
    }

    fn render_no_data(&mut self) {
        self.destroy();
        self.placeholder = ChartContent::NoData;
    }

    fn destroy(&mut self) {
        self.chart = None;
        self.placeholder = ChartContent::Empty;
    }

    fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn share(label: &str, count: u64, percentage: f64) -> LanguageShare {
        LanguageShare {
            label: label.to_string(),
            count,
            percentage,
            share_of_sample: percentage,
        }
    }

    #[test]
    fn test_known_language_colors() {
        assert_eq!(language_color("Rust").to_hex(), "#dea584");
        assert_eq!(language_color("Go").to_hex(), "#00add8");
    }

    #[test]
    fn test_generated_colors_are_deterministic() {
        let first = language_color("Zig");
        let second = language_color("Zig");
        assert_eq!(first, second);
        assert_ne!(language_color("Zig"), language_color("Nim"));
    }

    #[test]
    fn test_from_hsl() {
        assert_eq!(Rgb::from_hsl(0.0, 1.0, 0.5), Rgb::new(255, 0, 0));
        assert_eq!(Rgb::from_hsl(120.0, 1.0, 0.5), Rgb::new(0, 255, 0));
        assert_eq!(Rgb::from_hsl(240.0, 1.0, 0.5), Rgb::new(0, 0, 255));
    }

    #[test]
    fn test_render_replaces_previous_chart() {
        let mut chart = TextChart::new(Theme::Dark, false);
        chart.render(&ChartData::from_shares(&[share("Rust", 3, 75.0), share("Go", 1, 25.0)]));
        chart.render(&ChartData::from_shares(&[share("Python", 2, 100.0)]));

        assert_eq!(chart.builds(), 2);
        let frame = chart.frame();
        assert!(frame.contains("Python 100.0%"));
        assert!(!frame.contains("Rust"));
        assert_eq!(frame.lines().next().unwrap().chars().count(), BAR_WIDTH);
    }

    #[test]
    fn test_theme_change_does_not_rebuild() {
        let mut chart = TextChart::new(Theme::Dark, true);
        chart.render(&ChartData::from_shares(&[share("Rust", 1, 100.0)]));
        let dark = chart.frame();

        chart.set_theme(Theme::Light);
        let light = chart.frame();

        assert_eq!(chart.builds(), 1);
        assert_ne!(dark, light);
        assert!(light.contains(&legend_color(Theme::Light).ansi_fg()));
    }

    #[test]
    fn test_no_data_placeholder() {
        let mut chart = TextChart::new(Theme::Dark, false);
        chart.render(&ChartData::from_shares(&[]));
        assert!(!chart.has_chart());
        assert_eq!(chart.frame(), NO_LANGUAGE_DATA);

        chart.render_no_data();
        assert_eq!(chart.frame(), NO_LANGUAGE_DATA);
    }
}
