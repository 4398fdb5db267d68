//! Visual theming for the force graph.
//!
//! Node colors come from the role palette.

use crate::network::Role;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Alpha, 0.0 to 1.0.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with alpha.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same channels, new alpha.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
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

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * f) as u8,
			g: (self.g as f64 * f) as u8,
			b: (self.b as f64 * f) as u8,
			a: self.a,
		}
	}

	/// Hex when opaque, `rgba()` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Fill colors per node role.
#[derive(Clone, Debug)]
pub struct RolePalette {
	/// Hospitals and other organizations.
	pub entity: Color,
	/// Doctors and other staff.
	pub professional: Color,
	/// Patients and unrecognized roles.
	pub patient: Color,
}

impl RolePalette {
	/// Fill for a node of `role`.
	pub fn color_for(&self, role: &Role) -> Color {
		match role {
			Role::Entity => self.entity,
			Role::Professional => self.professional,
			Role::Patient | Role::Other(_) => self.patient,
		}
	}
}

impl Default for RolePalette {
	fn default() -> Self {
		Self {
			entity: Color::rgb(76, 175, 80),        // Green
			professional: Color::rgb(33, 150, 243), // Blue
			patient: Color::rgb(244, 67, 54),       // Red
		}
	}
}

/// Background style configuration.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Primary background color
	pub color: Color,
	/// Secondary color for gradients
	pub color_secondary: Color,
	/// Whether to use radial gradient
	pub use_gradient: bool,
}

/// Edge visual style.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	/// Base edge color
	pub color: Color,
	/// Color of edges touching the hovered node
	pub highlight_color: Color,
}

/// Node visual style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Whether nodes have inner gradients
	pub use_gradient: bool,
	/// Border/stroke width (0 = no border)
	pub border_width: f64,
	/// Border color
	pub border_color: Color,
	/// Label text color
	pub label_color: Color,
	/// Hover ring color
	pub ring_color: Color,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Logged when the canvas starts.
	pub name: &'static str,
	/// Canvas fill.
	pub background: BackgroundStyle,
	/// Link strokes.
	pub edge: EdgeStyle,
	/// Node discs and labels.
	pub node: NodeStyle,
	/// Fill per role.
	pub roles: RolePalette,
}

impl Theme {
	/// Light dashboard theme (default)
	pub fn clinical() -> Self {
		Self {
			name: "clinical",
			background: BackgroundStyle {
				color: Color::rgb(255, 255, 255),
				color_secondary: Color::rgb(246, 249, 252),
				use_gradient: true,
			},
			edge: EdgeStyle {
				color: Color::rgb(204, 204, 204),
				highlight_color: Color::rgb(120, 130, 145),
			},
			node: NodeStyle {
				use_gradient: true,
				border_width: 1.5,
				border_color: Color::rgb(255, 255, 255),
				label_color: Color::rgb(55, 65, 81),
				ring_color: Color::rgb(30, 41, 59),
			},
			roles: RolePalette::default(),
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::clinical()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn css_output_drops_alpha_when_opaque() {
		assert_eq!(Color::rgb(76, 175, 80).to_css(), "#4caf50");
		assert_eq!(Color::rgb(1, 2, 3).with_alpha(0.5).to_css(), "rgba(1, 2, 3, 0.5)");
		assert_eq!(Color::rgb(100, 100, 100).lighten(1.0), Color::rgb(255, 255, 255));
		assert_eq!(Color::rgb(100, 100, 100).darken(1.0), Color::rgb(0, 0, 0));
	}

	#[test]
	fn unknown_roles_use_patient_color() {
		let palette = RolePalette::default();
		assert_eq!(palette.color_for(&Role::Other("x".into())), palette.patient);
	}
}
