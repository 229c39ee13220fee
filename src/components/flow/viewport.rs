use super::types::{Node, XYPosition};

/// Screen-space transform of the flow pane: `screen = flow * zoom + (x, y)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	pub x: f64,
	pub y: f64,
	pub zoom: f64,
}

impl Default for Viewport {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			zoom: 1.0,
		}
	}
}

impl Viewport {
	pub fn screen_to_flow(&self, sx: f64, sy: f64) -> XYPosition {
		XYPosition::new((sx - self.x) / self.zoom, (sy - self.y) / self.zoom)
	}

	/// Scale by `factor` while keeping the flow point under `(sx, sy)` fixed.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64, min_zoom: f64, max_zoom: Option<f64>) {
		let new_zoom = clamp_zoom(self.zoom * factor, min_zoom, max_zoom);
		let ratio = new_zoom / self.zoom;
		self.x = sx - (sx - self.x) * ratio;
		self.y = sy - (sy - self.y) * ratio;
		self.zoom = new_zoom;
	}

	pub fn css_transform(&self) -> String {
		format!(
			"transform: translate({}px, {}px) scale({}); transform-origin: 0 0;",
			self.x, self.y, self.zoom
		)
	}
}

fn clamp_zoom(zoom: f64, min_zoom: f64, max_zoom: Option<f64>) -> f64 {
	let zoom = zoom.max(min_zoom);
	match max_zoom {
		Some(max) => zoom.min(max),
		None => zoom,
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
	pub x: f64,
	pub y: f64,
	pub width: f64,
	pub height: f64,
}

/// Bounding box of all nodes in flow coordinates, `None` for an empty diagram.
pub fn nodes_bounds(nodes: &[Node]) -> Option<Rect> {
	let mut iter = nodes.iter();
	let first = iter.next()?;
	let (mut min_x, mut min_y) = (first.position.x, first.position.y);
	let (mut max_x, mut max_y) = (min_x + first.width(), min_y + first.height());
	for node in iter {
		min_x = min_x.min(node.position.x);
		min_y = min_y.min(node.position.y);
		max_x = max_x.max(node.position.x + node.width());
		max_y = max_y.max(node.position.y + node.height());
	}
	Some(Rect {
		x: min_x,
		y: min_y,
		width: max_x - min_x,
		height: max_y - min_y,
	})
}

/// Viewport that centres `bounds` in a `width` x `height` pane with relative padding.
pub fn fit_view(
	bounds: Rect,
	width: f64,
	height: f64,
	padding: f64,
	min_zoom: f64,
	max_zoom: Option<f64>,
) -> Viewport {
	let x_zoom = width / (bounds.width * (1.0 + padding));
	let y_zoom = height / (bounds.height * (1.0 + padding));
	let zoom = clamp_zoom(x_zoom.min(y_zoom), min_zoom, max_zoom);
	let (center_x, center_y) = (
		bounds.x + bounds.width / 2.0,
		bounds.y + bounds.height / 2.0,
	);
	Viewport {
		x: width / 2.0 - center_x * zoom,
		y: height / 2.0 - center_y * zoom,
		zoom,
	}
}

pub fn snap_to_grid(position: XYPosition, grid: [f64; 2]) -> XYPosition {
	XYPosition::new(
		(position.x / grid[0]).round() * grid[0],
		(position.y / grid[1]).round() * grid[1],
	)
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;
	use crate::components::flow::initial::initial_nodes;

	fn flow_to_screen(viewport: &Viewport, position: XYPosition) -> (f64, f64) {
		(
			position.x * viewport.zoom + viewport.x,
			position.y * viewport.zoom + viewport.y,
		)
	}

	#[rstest]
	#[case(XYPosition::new(12.4, 12.6), XYPosition::new(0.0, 25.0))]
	#[case(XYPosition::new(-13.0, 37.4), XYPosition::new(-25.0, 25.0))]
	#[case(XYPosition::new(250.0, 325.0), XYPosition::new(250.0, 325.0))]
	fn snaps_to_nearest_cell(#[case] input: XYPosition, #[case] expected: XYPosition) {
		assert_eq!(snap_to_grid(input, [25.0, 25.0]), expected);
	}

	#[test]
	fn screen_and_flow_coordinates_invert() {
		let viewport = Viewport {
			x: 40.0,
			y: -10.0,
			zoom: 2.0,
		};
		let flow = viewport.screen_to_flow(100.0, 50.0);
		assert_eq!(flow, XYPosition::new(30.0, 30.0));
		assert_eq!(flow_to_screen(&viewport, flow), (100.0, 50.0));
	}

	#[test]
	fn zoom_keeps_point_under_cursor() {
		let mut viewport = Viewport::default();
		let before = viewport.screen_to_flow(200.0, 100.0);
		viewport.zoom_at(200.0, 100.0, 1.5, 0.5, None);
		assert_eq!(viewport.zoom, 1.5);
		let after = viewport.screen_to_flow(200.0, 100.0);
		assert!((before.x - after.x).abs() < 1e-9);
		assert!((before.y - after.y).abs() < 1e-9);
	}

	#[test]
	fn zoom_is_clamped() {
		let mut viewport = Viewport::default();
		viewport.zoom_at(0.0, 0.0, 0.1, 0.5, None);
		assert_eq!(viewport.zoom, 0.5);
		viewport.zoom_at(0.0, 0.0, 100.0, 0.5, Some(4.0));
		assert_eq!(viewport.zoom, 4.0);
		viewport.zoom_at(0.0, 0.0, 1000.0, 0.5, None);
		assert_eq!(viewport.zoom, 4000.0);
	}

	#[test]
	fn bounds_cover_seed() {
		let bounds = nodes_bounds(&initial_nodes()).expect("bounds");
		assert_eq!(bounds.x, 100.0);
		assert_eq!(bounds.y, 0.0);
		// node 3 is 180 wide at x=400, node 6 bottom is 480 + 40
		assert_eq!(bounds.width, 480.0);
		assert_eq!(bounds.height, 520.0);
		assert!(nodes_bounds(&[]).is_none());
	}

	#[test]
	fn fit_view_centres_bounds() {
		let bounds = Rect {
			x: 100.0,
			y: 0.0,
			width: 400.0,
			height: 200.0,
		};
		let viewport = fit_view(bounds, 1000.0, 800.0, 0.2, 0.5, None);
		let (cx, cy) = flow_to_screen(&viewport, XYPosition::new(300.0, 100.0));
		assert!((cx - 500.0).abs() < 1e-9);
		assert!((cy - 400.0).abs() < 1e-9);
		assert!((viewport.zoom - 1000.0 / 480.0).abs() < 1e-9);
	}
}
