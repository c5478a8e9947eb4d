//! Camera math: fitting content into the canvas and animating toward it.

/// Delay between a render and the automatic fit.
pub const FIT_DELAY_MS: u32 = 500;
/// Length of the fit camera animation.
pub const FIT_DURATION_SECS: f64 = 1.0;

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 10.0;
/// Fitting never zooms in further than this.
const MAX_FIT_ZOOM: f64 = 2.0;
/// Screen-space margin kept around fitted content.
const FIT_PADDING: f64 = 40.0;

/// Screen = world * k + (x, y).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

impl ViewTransform {
	pub fn lerp(&self, to: &ViewTransform, t: f64) -> ViewTransform {
		ViewTransform {
			x: self.x + (to.x - self.x) * t,
			y: self.y + (to.y - self.y) * t,
			k: self.k + (to.k - self.k) * t,
		}
	}

	/// Zoom by `factor` keeping the screen point `(sx, sy)` fixed.
	pub fn zoom_at(&self, sx: f64, sy: f64, factor: f64) -> ViewTransform {
		let k = (self.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = k / self.k;
		ViewTransform {
			x: sx - (sx - self.x) * ratio,
			y: sy - (sy - self.y) * ratio,
			k,
		}
	}
}

/// World-space bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	pub min_x: f64,
	pub min_y: f64,
	pub max_x: f64,
	pub max_y: f64,
}

impl Bounds {
	/// Box around every point, grown by `radius`. `None` for no points.
	pub fn around(points: impl IntoIterator<Item = (f64, f64)>, radius: f64) -> Option<Bounds> {
		points.into_iter().fold(None, |acc: Option<Bounds>, (x, y)| {
			Some(match acc {
				None => Bounds {
					min_x: x - radius,
					min_y: y - radius,
					max_x: x + radius,
					max_y: y + radius,
				},
				Some(b) => Bounds {
					min_x: b.min_x.min(x - radius),
					min_y: b.min_y.min(y - radius),
					max_x: b.max_x.max(x + radius),
					max_y: b.max_y.max(y + radius),
				},
			})
		})
	}
}

/// Transform that centers `bounds` in a `width` x `height` canvas.
pub fn fit_transform(bounds: &Bounds, width: f64, height: f64) -> ViewTransform {
	let (bw, bh) = (
		(bounds.max_x - bounds.min_x).max(1.0),
		(bounds.max_y - bounds.min_y).max(1.0),
	);
	let (aw, ah) = (
		(width - 2.0 * FIT_PADDING).max(1.0),
		(height - 2.0 * FIT_PADDING).max(1.0),
	);
	let k = (aw / bw).min(ah / bh).clamp(MIN_ZOOM, MAX_FIT_ZOOM);
	let (cx, cy) = (
		(bounds.min_x + bounds.max_x) / 2.0,
		(bounds.min_y + bounds.max_y) / 2.0,
	);
	ViewTransform {
		x: width / 2.0 - cx * k,
		y: height / 2.0 - cy * k,
		k,
	}
}

fn ease_in_out_quad(t: f64) -> f64 {
	if t < 0.5 {
		2.0 * t * t
	} else {
		1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
	}
}

/// An in-progress camera move.
#[derive(Clone, Debug, PartialEq)]
pub struct FitAnimation {
	from: ViewTransform,
	to: ViewTransform,
	elapsed: f64,
	duration: f64,
}

impl FitAnimation {
	pub fn new(from: ViewTransform, to: ViewTransform, duration: f64) -> Self {
		Self {
			from,
			to,
			elapsed: 0.0,
			duration,
		}
	}

	/// Advance by `dt` seconds; returns the transform to show and whether the
	/// animation has finished.
	pub fn step(&mut self, dt: f64) -> (ViewTransform, bool) {
		self.elapsed += dt;
		if self.duration <= 0.0 || self.elapsed >= self.duration {
			return (self.to, true);
		}
		let t = ease_in_out_quad(self.elapsed / self.duration);
		(self.from.lerp(&self.to, t), false)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_bounds_around_points() {
		assert_eq!(Bounds::around([], 5.0), None);
		let b = Bounds::around([(0.0, 0.0), (100.0, -50.0)], 10.0).expect("two points");
		assert_eq!(
			b,
			Bounds {
				min_x: -10.0,
				min_y: -60.0,
				max_x: 110.0,
				max_y: 10.0
			}
		);
	}

	#[test]
	fn test_fit_centers_content() {
		let bounds = Bounds {
			min_x: -100.0,
			min_y: -50.0,
			max_x: 100.0,
			max_y: 50.0,
		};
		let t = fit_transform(&bounds, 480.0, 280.0);
		assert!((t.k - 2.0).abs() < 1e-9);
		assert!((t.x - 240.0).abs() < 1e-9);
		assert!((t.y - 140.0).abs() < 1e-9);

		let wide = Bounds {
			min_x: 0.0,
			min_y: 0.0,
			max_x: 4000.0,
			max_y: 100.0,
		};
		let t = fit_transform(&wide, 880.0, 600.0);
		assert!((t.k - 0.2).abs() < 1e-9);
		// Center of content lands in the center of the canvas.
		assert!((2000.0 * t.k + t.x - 440.0).abs() < 1e-9);
	}

	#[test]
	fn test_fit_single_point_does_not_overzoom() {
		let bounds = Bounds::around([(30.0, 30.0)], 10.0).expect("one point");
		assert_eq!(fit_transform(&bounds, 800.0, 600.0).k, 2.0);
	}

	#[test]
	fn test_animation_reaches_target() {
		let to = ViewTransform {
			x: 100.0,
			y: 50.0,
			k: 2.0,
		};
		let mut anim = FitAnimation::new(ViewTransform::default(), to, FIT_DURATION_SECS);

		let (mid, done) = anim.step(0.5);
		assert!(!done);
		assert!((mid.x - 50.0).abs() < 1e-9);

		let (end, done) = anim.step(0.6);
		assert!(done);
		assert_eq!(end, to);
	}

	#[test]
	fn test_zoom_at_keeps_anchor_and_clamps() {
		let t = ViewTransform {
			x: 10.0,
			y: 20.0,
			k: 1.0,
		};
		let zoomed = t.zoom_at(110.0, 120.0, 2.0);
		// World point under the cursor stays put.
		assert!(((110.0 - t.x) / t.k - (110.0 - zoomed.x) / zoomed.k).abs() < 1e-9);
		assert_eq!(t.zoom_at(0.0, 0.0, 1000.0).k, MAX_ZOOM);
		assert_eq!(t.zoom_at(0.0, 0.0, 0.0001).k, MIN_ZOOM);
	}
}
