//! Layout engine configuration.

use force_graph::SimulationParameters;

/// Force model parameters.
///
/// Defaults give a readable layout for graphs of tens to low hundreds of
/// nodes without tuning.
#[derive(Clone, Debug, PartialEq)]
pub struct PhysicsOptions {
	pub enabled: bool,
	/// Simulation steps run before the first frame is drawn.
	pub stabilization_iterations: u32,
	/// Repulsion between nodes; negative values push apart.
	pub gravitational_constant: f64,
	/// Pull of every node toward the origin, per second.
	pub central_gravity: f64,
	/// Rest length of an edge spring, in world units.
	pub spring_length: f64,
}

impl Default for PhysicsOptions {
	fn default() -> Self {
		Self {
			enabled: true,
			stabilization_iterations: 300,
			gravitational_constant: -20000.0,
			central_gravity: 0.3,
			spring_length: 250.0,
		}
	}
}

impl PhysicsOptions {
	/// Translate into the parameters of the canvas simulation.
	///
	/// Repulsion scales with the gravitational constant and spring stiffness
	/// falls as the rest length grows, so longer springs spread the layout.
	pub fn simulation_parameters(&self) -> SimulationParameters {
		SimulationParameters {
			force_charge: (self.gravitational_constant.abs() / 100.0) as f32,
			force_spring: (12.5 / self.spring_length.max(1.0)) as f32,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		}
	}
}

/// Which user interactions the canvas accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InteractionOptions {
	pub navigation_buttons: bool,
	pub keyboard: bool,
	pub zoom: bool,
	pub pan: bool,
}

impl Default for InteractionOptions {
	fn default() -> Self {
		Self {
			navigation_buttons: true,
			keyboard: true,
			zoom: true,
			pan: true,
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutOptions {
	pub physics: PhysicsOptions,
	pub interaction: InteractionOptions,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let options = LayoutOptions::default();
		assert!(options.physics.enabled);
		assert_eq!(options.physics.stabilization_iterations, 300);
		assert_eq!(options.physics.gravitational_constant, -20000.0);
		assert_eq!(options.physics.central_gravity, 0.3);
		assert_eq!(options.physics.spring_length, 250.0);
		assert_eq!(options.interaction, InteractionOptions::default());
		assert!(options.interaction.keyboard && options.interaction.navigation_buttons);
	}

	#[test]
	fn test_simulation_parameters() {
		let params = PhysicsOptions::default().simulation_parameters();
		assert_eq!(params.force_charge, 200.0);
		assert!((params.force_spring - 0.05).abs() < 1e-6);
	}
}
