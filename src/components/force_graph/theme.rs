//! Visual theming for the force graph.
//!
//! Colors for the background, edges, labels and highlight rings, plus the
//! categorical palette used to color nodes by category.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Categorical node palette, indexed by category slot.
#[derive(Clone, Debug)]
pub struct NodePalette {
	pub colors: Vec<Color>,
}

impl NodePalette {
	/// Distinct, evenly weighted hues on a dark background.
	pub fn categorical() -> Self {
		Self {
			colors: vec![
				Color::rgb(94, 129, 172),  // Steel blue
				Color::rgb(208, 135, 112), // Terracotta
				Color::rgb(163, 190, 140), // Sage
				Color::rgb(180, 142, 173), // Wisteria
				Color::rgb(235, 203, 139), // Amber
				Color::rgb(136, 192, 208), // Frost
				Color::rgb(191, 97, 106),  // Rose
				Color::rgb(143, 163, 180), // Cool gray
			],
		}
	}

	pub fn get(&self, index: usize) -> Color {
		if self.colors.is_empty() {
			return Color::rgb(128, 128, 128);
		}
		self.colors[index % self.colors.len()]
	}
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub background: Color,
	/// Edge color at rest.
	pub edge: Color,
	/// Edge color when touching the hovered node.
	pub edge_highlight: Color,
	/// Hover label text.
	pub label: Color,
	/// Secondary hover label text (category).
	pub label_secondary: Color,
	pub hover_ring: Color,
	pub selected_ring: Color,
	pub palette: NodePalette,
}

impl Theme {
	pub fn category_color(&self, slot: usize) -> Color {
		self.palette.get(slot)
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self {
			background: Color::rgb(22, 27, 34),
			edge: Color::rgba(140, 160, 180, 0.35),
			edge_highlight: Color::rgba(220, 230, 240, 0.9),
			label: Color::rgba(255, 255, 255, 0.95),
			label_secondary: Color::rgba(200, 210, 220, 0.8),
			hover_ring: Color::rgba(255, 255, 255, 0.8),
			selected_ring: Color::rgb(235, 203, 139),
			palette: NodePalette::categorical(),
		}
	}
}
