//! SVG geometry for edges, the connection line and the dotted background.
//! Sources leave a node at the bottom and targets enter at the top.

use super::types::{EdgeKind, XYPosition};
use super::viewport::Viewport;

const STEP_RADIUS: f64 = 5.0;
const MIN_CURVE_OFFSET: f64 = 25.0;

#[derive(Clone, Debug, PartialEq)]
pub struct EdgeGeometry {
	pub path: String,
	pub label: XYPosition,
}

pub fn edge_geometry(kind: EdgeKind, from: XYPosition, to: XYPosition) -> EdgeGeometry {
	match kind {
		EdgeKind::Default => bezier(from, to),
		EdgeKind::Step => step(from, to, 0.0),
		EdgeKind::SmoothStep => step(from, to, STEP_RADIUS),
	}
}

fn bezier(from: XYPosition, to: XYPosition) -> EdgeGeometry {
	let offset = ((to.y - from.y).abs() / 2.0).max(MIN_CURVE_OFFSET);
	let (c1, c2) = (
		XYPosition::new(from.x, from.y + offset),
		XYPosition::new(to.x, to.y - offset),
	);
	// cubic at t = 0.5
	let label = XYPosition::new(
		0.125 * from.x + 0.375 * c1.x + 0.375 * c2.x + 0.125 * to.x,
		0.125 * from.y + 0.375 * c1.y + 0.375 * c2.y + 0.125 * to.y,
	);
	EdgeGeometry {
		path: format!(
			"M{},{} C{},{} {},{} {},{}",
			from.x, from.y, c1.x, c1.y, c2.x, c2.y, to.x, to.y
		),
		label,
	}
}

/// Vertical, horizontal, vertical, bending halfway between the endpoints.
/// A non-zero `radius` rounds both corners.
fn step(from: XYPosition, to: XYPosition, radius: f64) -> EdgeGeometry {
	let mid_y = (from.y + to.y) / 2.0;
	let label = XYPosition::new((from.x + to.x) / 2.0, mid_y);
	if radius == 0.0 || from.x == to.x {
		return EdgeGeometry {
			path: format!(
				"M{},{} L{},{} L{},{} L{},{}",
				from.x, from.y, from.x, mid_y, to.x, mid_y, to.x, to.y
			),
			label,
		};
	}

	let r = radius
		.min((to.x - from.x).abs() / 2.0)
		.min((mid_y - from.y).abs());
	let dx = (to.x - from.x).signum();
	let dy = (to.y - from.y).signum();
	EdgeGeometry {
		path: format!(
			"M{},{} L{},{} Q{},{} {},{} L{},{} Q{},{} {},{} L{},{}",
			from.x,
			from.y,
			from.x,
			mid_y - dy * r,
			from.x,
			mid_y,
			from.x + dx * r,
			mid_y,
			to.x - dx * r,
			mid_y,
			to.x,
			mid_y,
			to.x,
			mid_y + dy * r,
			to.x,
			to.y
		),
		label,
	}
}

/// Straight line from the source handle to the pointer.
pub fn connection_line_path(from: XYPosition, to: XYPosition) -> String {
	format!("M{},{} L{},{}", from.x, from.y, to.x, to.y)
}

/// Dot pattern cell `(size, offset_x, offset_y)` in screen space, following pan and zoom.
pub fn background_pattern(viewport: &Viewport, gap: f64) -> (f64, f64, f64) {
	let size = gap * viewport.zoom;
	(size, viewport.x.rem_euclid(size), viewport.y.rem_euclid(size))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn step_path_bends_halfway() {
		let geometry = edge_geometry(
			EdgeKind::Step,
			XYPosition::new(325.0, 365.0),
			XYPosition::new(475.0, 450.0),
		);
		assert_eq!(
			geometry.path,
			"M325,365 L325,407.5 L475,407.5 L475,450"
		);
		assert_eq!(geometry.label, XYPosition::new(400.0, 407.5));
	}

	#[test]
	fn smoothstep_rounds_corners() {
		let geometry = edge_geometry(
			EdgeKind::SmoothStep,
			XYPosition::new(300.0, 0.0),
			XYPosition::new(100.0, 100.0),
		);
		assert_eq!(
			geometry.path,
			"M300,0 L300,45 Q300,50 295,50 L105,50 Q100,50 100,55 L100,100"
		);
	}

	#[test]
	fn smoothstep_on_a_vertical_line_is_straight() {
		let geometry = edge_geometry(
			EdgeKind::SmoothStep,
			XYPosition::new(10.0, 0.0),
			XYPosition::new(10.0, 100.0),
		);
		assert_eq!(geometry.path, "M10,0 L10,50 L10,50 L10,100");
	}

	#[test]
	fn bezier_label_sits_on_the_curve_midpoint() {
		let geometry = edge_geometry(
			EdgeKind::Default,
			XYPosition::new(0.0, 0.0),
			XYPosition::new(0.0, 100.0),
		);
		assert_eq!(geometry.path, "M0,0 C0,50 0,50 0,100");
		assert_eq!(geometry.label, XYPosition::new(0.0, 50.0));
	}

	#[test]
	fn background_follows_viewport() {
		let viewport = Viewport {
			x: -30.0,
			y: 60.0,
			zoom: 2.0,
		};
		assert_eq!(background_pattern(&viewport, 25.0), (50.0, 20.0, 10.0));
	}
}
